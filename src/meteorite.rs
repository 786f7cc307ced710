//! The records kept by a [`RecordIndex`][crate::RecordIndex]: meteorite landings identified by
//! name and id, with optionally recorded mass, year, and landing site.
//!
//! Mass and year are handed in the way landing catalogues encode them, with a sentinel for
//! "not recorded": [`MASS_ABSENT`] and [`YEAR_ABSENT`].

use std::cmp::Ordering;
use std::fmt;

use crate::error::{Result, TreeError};

/// Mass value meaning "mass not recorded".
pub const MASS_ABSENT: i64 = -1;

/// Year value meaning "year not recorded".
pub const YEAR_ABSENT: i64 = 0;

/// Mean radius of the Earth in kilometres.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// A point on the Earth's surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Location {
    latitude: f64,
    longitude: f64,
}

impl Location {
    /// Creates a location from degrees of latitude (`-90..=90`) and longitude (`-180..=180`).
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(TreeError::InvalidArgument(format!(
                "latitude must be within [-90, 90], got {}",
                latitude
            )));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(TreeError::InvalidArgument(format!(
                "longitude must be within [-180, 180], got {}",
                longitude
            )));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Degrees north of the equator.
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Degrees east of the prime meridian.
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Great-circle distance to `other` in kilometres (haversine formula).
    ///
    /// # Examples
    ///
    /// ```
    /// use meteorite_bst::Location;
    ///
    /// let a = Location::new(0.0, 0.0).unwrap();
    /// let b = Location::new(0.0, 1.0).unwrap();
    ///
    /// assert!((a.distance(&b) - 111.19).abs() < 0.01);
    /// ```
    pub fn distance(&self, other: &Location) -> f64 {
        let (lat1, lat2) = (self.latitude.to_radians(), other.latitude.to_radians());
        let d_lat = lat2 - lat1;
        let d_lon = (other.longitude - self.longitude).to_radians();

        let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
        2.0 * EARTH_RADIUS_KM * a.sqrt().atan2((1.0 - a).sqrt())
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.5}, {:.5})", self.latitude, self.longitude)
    }
}

/// A recorded meteorite landing.
///
/// Meteorites are identified, ordered, and compared for equality by name and then id alone;
/// mass, year, and location don't take part.
///
/// # Examples
///
/// ```
/// use meteorite_bst::Meteorite;
///
/// let mut aachen = Meteorite::new("Aachen", 1).unwrap();
/// assert_eq!(aachen.mass(), None);
///
/// aachen.set_mass(21).unwrap();
/// assert_eq!(aachen.mass(), Some(21));
///
/// // The catalogue's "not recorded" marker clears it again.
/// aachen.set_mass(-1).unwrap();
/// assert_eq!(aachen.mass(), None);
///
/// assert!(aachen.set_mass(-2).is_err());
/// ```
#[derive(Clone, Debug)]
pub struct Meteorite {
    name: String,
    id: u32,
    mass: Option<u64>,
    year: Option<u32>,
    location: Option<Location>,
}

impl Meteorite {
    /// Creates a meteorite with nothing but its identity recorded. `name` must not be blank.
    pub fn new(name: impl Into<String>, id: u32) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(TreeError::InvalidArgument(
                "meteorite name must not be blank".to_string(),
            ));
        }
        Ok(Self {
            name,
            id,
            mass: None,
            year: None,
            location: None,
        })
    }

    /// Name of the meteorite.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Catalogue id of the meteorite.
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Mass in grams, if recorded.
    pub fn mass(&self) -> Option<u64> {
        self.mass
    }

    /// Landing year, if recorded.
    pub fn year(&self) -> Option<u32> {
        self.year
    }

    /// Landing site, if recorded.
    pub fn location(&self) -> Option<&Location> {
        self.location.as_ref()
    }

    /// Sets the mass in grams. [`MASS_ABSENT`] clears it; any other negative value is rejected.
    pub fn set_mass(&mut self, mass: i64) -> Result<()> {
        self.mass = match mass {
            MASS_ABSENT => None,
            // Non-negative so the cast can't wrap.
            mass if mass >= 0 => Some(mass as u64),
            mass => {
                return Err(TreeError::InvalidArgument(format!(
                    "mass must be {} or at least 0, got {}",
                    MASS_ABSENT, mass
                )))
            }
        };
        Ok(())
    }

    /// Sets the landing year. [`YEAR_ABSENT`] clears it; negative values and years past
    /// `u32::MAX` are rejected.
    pub fn set_year(&mut self, year: i64) -> Result<()> {
        self.year = match year {
            YEAR_ABSENT => None,
            year if year < 0 => {
                return Err(TreeError::InvalidArgument(format!(
                    "year must not be negative, got {}",
                    year
                )))
            }
            year => Some(u32::try_from(year).map_err(|_| {
                TreeError::InvalidArgument(format!(
                    "year must be at most {}, got {}",
                    u32::MAX,
                    year
                ))
            })?),
        };
        Ok(())
    }

    /// Sets or clears the landing site.
    pub fn set_location(&mut self, location: Option<Location>) {
        self.location = location;
    }

    /// Builder form of [`set_mass`][Self::set_mass].
    pub fn with_mass(mut self, mass: i64) -> Result<Self> {
        self.set_mass(mass)?;
        Ok(self)
    }

    /// Builder form of [`set_year`][Self::set_year].
    pub fn with_year(mut self, year: i64) -> Result<Self> {
        self.set_year(year)?;
        Ok(self)
    }

    /// Builder form of [`set_location`][Self::set_location].
    pub fn with_location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    /// A meteorite with the same identity and nothing else recorded.
    pub(crate) fn identity_copy(&self) -> Self {
        Self {
            name: self.name.clone(),
            id: self.id,
            mass: None,
            year: None,
            location: None,
        }
    }
}

impl PartialEq for Meteorite {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.name == other.name
    }
}

impl Eq for Meteorite {}

impl PartialOrd for Meteorite {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Meteorite {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name
            .cmp(&other.name)
            .then_with(|| self.id.cmp(&other.id))
    }
}

/// One line per meteorite: name, id, year, mass, then location. Blank where not recorded.
impl fmt::Display for Meteorite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mass = self.mass.map(|m| m.to_string()).unwrap_or_default();
        let year = self.year.map(|y| y.to_string()).unwrap_or_default();
        let location = self.location.map(|l| l.to_string()).unwrap_or_default();

        write!(
            f,
            "{:<20} {:>4} {:>4} {:>10} {}",
            self.name, self.id, year, mass, location
        )
    }
}
