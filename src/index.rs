//! A set of meteorites kept in three [`OrderedTree`]s at once: one by identity holding every
//! record, one by mass holding the records with a recorded mass, and one by year holding the
//! records with a recorded year. Every add and remove is fanned out to whichever of the trees
//! the record belongs in, so mass and year queries only ever touch the matching part of their
//! tree.
//!
//! # Examples
//!
//! ```
//! use meteorite_bst::{Meteorite, RecordIndex};
//!
//! let mut index = RecordIndex::new();
//! index.add(Meteorite::new("Aachen", 1).unwrap().with_mass(21).unwrap()).unwrap();
//! index.add(Meteorite::new("Aarhus", 2).unwrap().with_mass(720).unwrap()).unwrap();
//! index.add(Meteorite::new("Abee", 6).unwrap().with_mass(107_000).unwrap()).unwrap();
//!
//! let light = index.by_mass_range(100, 100).unwrap().unwrap();
//! assert_eq!(light.len(), 1);
//! assert_eq!(light.iter().next().unwrap().name(), "Aachen");
//!
//! assert_eq!(index.by_mass_range(5_000, 10).unwrap(), None);
//! ```

use std::cmp;
use std::fmt;
use std::rc::Rc;

use log::{debug, trace};

use crate::error::{Result, TreeError};
use crate::meteorite::{Location, Meteorite};
use crate::order::Order;
use crate::tree::{Iter, OrderedTree};

/// A meteorite as stored in a [`RecordIndex`]. The same allocation is shared by every tree the
/// record sits in.
pub type Record = Rc<Meteorite>;

type Records = OrderedTree<Record, RecordOrder>;

/// The orderings a [`RecordIndex`] keeps its trees in. Mass and year orderings fall back to the
/// identity ordering for records with the same mass or year, so no two distinct records ever
/// compare equal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RecordOrder {
    /// By name, then id.
    #[default]
    Identity,
    /// By mass, then identity.
    Mass,
    /// By year, then identity.
    Year,
}

impl Order<Record> for RecordOrder {
    fn compare(&self, a: &Record, b: &Record) -> Result<cmp::Ordering> {
        let ordering = match self {
            Self::Identity => a.cmp(b),
            Self::Mass => a.mass().cmp(&b.mass()).then_with(|| a.cmp(b)),
            Self::Year => a.year().cmp(&b.year()).then_with(|| a.cmp(b)),
        };
        Ok(ordering)
    }
}

/// Meteorites indexed by identity, mass, and year.
///
/// The identity tree holds every record and is what iteration, size, and equality go by. The
/// mass and year trees hold the subset of those same records that have a mass or a year.
#[derive(Clone, Debug)]
pub struct RecordIndex {
    records: Records,
    by_mass: Records,
    by_year: Records,
}

impl Default for RecordIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordIndex {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self {
            records: OrderedTree::with_order(RecordOrder::Identity),
            by_mass: OrderedTree::with_order(RecordOrder::Mass),
            by_year: OrderedTree::with_order(RecordOrder::Year),
        }
    }

    /// Number of meteorites in the index.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the index holds no meteorites.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whether a meteorite with the same identity as `meteorite` is in the index.
    pub fn contains(&self, meteorite: &Meteorite) -> Result<bool> {
        self.records.contains(&Rc::new(meteorite.identity_copy()))
    }

    /// Iterates over every meteorite by name, then id.
    pub fn iter(&self) -> Iter<'_, Record> {
        self.records.iter()
    }

    /// Iterates over the meteorites with a recorded mass, lightest first.
    pub fn iter_by_mass(&self) -> Iter<'_, Record> {
        self.by_mass.iter()
    }

    /// Iterates over the meteorites with a recorded year, earliest first.
    pub fn iter_by_year(&self) -> Iter<'_, Record> {
        self.by_year.iter()
    }

    /// Adds `meteorite` unless one with the same identity is already present, in which case
    /// nothing changes and `false` is returned.
    pub fn add(&mut self, meteorite: impl Into<Record>) -> Result<bool> {
        let record = meteorite.into();
        if !self.records.add(Rc::clone(&record))? {
            trace!("{} ({}) already indexed", record.name(), record.id());
            return Ok(false);
        }

        if record.mass().is_some() {
            self.by_mass.add(Rc::clone(&record))?;
        }
        if record.year().is_some() {
            self.by_year.add(Rc::clone(&record))?;
        }
        trace!(
            "indexed {} ({}), mass: {:?}, year: {:?}",
            record.name(),
            record.id(),
            record.mass(),
            record.year()
        );
        Ok(true)
    }

    /// Removes the meteorite with the same identity as `meteorite`, if there is one. Only the
    /// identity of `meteorite` matters: the stored record is the one whose mass and year decide
    /// which trees it gets removed from.
    pub fn remove(&mut self, meteorite: &Meteorite) -> Result<bool> {
        let key = Rc::new(meteorite.identity_copy());
        let stored = match self.records.range(&key, &key)?.into_iter().next() {
            Some(stored) => Rc::clone(stored),
            None => return Ok(false),
        };

        self.records.remove(&stored)?;
        if stored.mass().is_some() {
            self.by_mass.remove(&stored)?;
        }
        if stored.year().is_some() {
            self.by_year.remove(&stored)?;
        }
        trace!("removed {} ({})", stored.name(), stored.id());
        Ok(true)
    }

    /// Returns the meteorites weighing within `delta` grams of `mass`, or `None` when there are
    /// none. Masses below 1 gram are never matched.
    ///
    /// Only the part of the mass tree between the bounds is visited.
    pub fn by_mass_range(&self, mass: i64, delta: i64) -> Result<Option<RecordIndex>> {
        if mass < 0 || delta < 0 {
            return Err(TreeError::InvalidArgument(format!(
                "mass and delta must not be negative, got {} and {}",
                mass, delta
            )));
        }
        if self.is_empty() {
            return Ok(None);
        }

        let low = if mass <= delta { 1 } else { mass - delta };
        let high = mass.saturating_add(delta);
        if low > high {
            return Ok(None);
        }

        let (from, to) = self.bounds(|bound| bound.set_mass(low), |bound| bound.set_mass(high))?;
        let matches = self.by_mass.range_tree(&from, &to)?;
        debug!(
            "{} meteorites weigh between {}g and {}g",
            matches.len(),
            low,
            high
        );

        if matches.is_empty() {
            return Ok(None);
        }
        Self::from_matches(&matches).map(Some)
    }

    /// Returns the meteorites that landed in `year`. [`YEAR_ABSENT`][crate::YEAR_ABSENT]
    /// matches nothing.
    ///
    /// Only the part of the year tree holding `year` is visited.
    pub fn by_year_range(&self, year: i64) -> Result<RecordIndex> {
        if year < 0 {
            return Err(TreeError::InvalidArgument(format!(
                "year must not be negative, got {}",
                year
            )));
        }
        if year == 0 || self.is_empty() {
            return Ok(Self::new());
        }

        let (from, to) = self.bounds(|bound| bound.set_year(year), |bound| bound.set_year(year))?;
        let matches = self.by_year.range_tree(&from, &to)?;
        debug!("{} meteorites landed in {}", matches.len(), year);

        Self::from_matches(&matches)
    }

    /// Returns the meteorite that landed closest to `location`. Meteorites without a landing
    /// site are skipped; on a tie the one that comes first by name and id wins.
    ///
    /// Landing sites aren't indexed, so every meteorite is looked at.
    pub fn nearest_by_location(&self, location: &Location) -> Option<Record> {
        self.nearest_by(location, Location::distance)
    }

    /// Like [`nearest_by_location`][Self::nearest_by_location] with a caller supplied
    /// `distance` function. Meteorites it puts at a NaN distance are skipped.
    pub fn nearest_by<F>(&self, location: &Location, distance: F) -> Option<Record>
    where
        F: Fn(&Location, &Location) -> f64,
    {
        let mut nearest: Option<(f64, &Record)> = None;
        for record in self.records.iter() {
            let Some(site) = record.location() else {
                continue;
            };

            let d = distance(location, site);
            if d.is_nan() {
                continue;
            }
            if nearest.map_or(true, |(best, _)| d < best) {
                nearest = Some((d, record));
            }
        }
        nearest.map(|(_, record)| Rc::clone(record))
    }

    /// Builds the synthetic lower and upper bounds of a query: copies of the first and last
    /// meteorite by identity, adjusted by `lower` and `upper`. Every stored record whose queried
    /// field lies between the adjusted values then also orders between the bounds.
    fn bounds<L, U>(&self, lower: L, upper: U) -> Result<(Record, Record)>
    where
        L: FnOnce(&mut Meteorite) -> Result<()>,
        U: FnOnce(&mut Meteorite) -> Result<()>,
    {
        let mut from = self.records.first()?.identity_copy();
        lower(&mut from)?;
        let mut to = self.records.last()?.identity_copy();
        upper(&mut to)?;
        Ok((Rc::new(from), Rc::new(to)))
    }

    /// Indexes the records of a query result. They are taken in pre-order so none of the new
    /// trees collapses into a list.
    fn from_matches(matches: &Records) -> Result<Self> {
        let mut index = Self::new();
        for record in matches.pre_order() {
            index.add(Rc::clone(record))?;
        }
        Ok(index)
    }
}

/// Two indexes are equal when they hold the same meteorites.
impl PartialEq for RecordIndex {
    fn eq(&self, other: &Self) -> bool {
        self.records == other.records
    }
}

impl Eq for RecordIndex {}

/// One meteorite per line, by name and id.
impl fmt::Display for RecordIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for record in self.iter() {
            writeln!(f, "{}", record)?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a RecordIndex {
    type Item = &'a Record;
    type IntoIter = Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
