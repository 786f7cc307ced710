use meteorite_bst::{Meteorite, RecordIndex, MASS_ABSENT, YEAR_ABSENT};
use quickcheck_macros::quickcheck;

/// Builds an index from `(id, mass, year)` triples. Negative masses stand for a missing mass and
/// a year of 0 for a missing year.
fn index_of(entries: &[(u8, i16, u8)]) -> RecordIndex {
    let mut index = RecordIndex::new();
    for (id, mass, year) in entries {
        let mass = if *mass < 0 { MASS_ABSENT } else { i64::from(*mass) };
        let year = if *year == 0 { YEAR_ABSENT } else { 1900 + i64::from(*year) };
        let meteorite = Meteorite::new(format!("M{}", id), u32::from(*id))
            .unwrap()
            .with_mass(mass)
            .unwrap()
            .with_year(year)
            .unwrap();
        index.add(meteorite).unwrap();
    }
    index
}

#[quickcheck]
fn mass_and_year_trees_are_subsets(entries: Vec<(u8, i16, u8)>) -> bool {
    let index = index_of(&entries);

    let with_mass = index.iter().filter(|r| r.mass().is_some()).count();
    let with_year = index.iter().filter(|r| r.year().is_some()).count();

    index.iter_by_mass().count() == with_mass
        && index.iter_by_year().count() == with_year
        && index.iter_by_mass().all(|r| index.contains(r) == Ok(true))
        && index.iter_by_year().all(|r| index.contains(r) == Ok(true))
}

#[quickcheck]
fn by_mass_range_matches_a_scan(entries: Vec<(u8, i16, u8)>, mass: u16, delta: u16) -> bool {
    let index = index_of(&entries);
    let (mass, delta) = (i64::from(mass), i64::from(delta));
    let low = (mass - delta).max(1) as u64;
    let high = (mass + delta) as u64;

    let expected: Vec<_> = index
        .iter()
        .filter(|r| r.mass().map_or(false, |m| low <= m && m <= high))
        .collect();

    match index.by_mass_range(mass, delta).unwrap() {
        None => expected.is_empty(),
        Some(found) => found.iter().eq(expected.into_iter()),
    }
}

#[quickcheck]
fn by_year_range_matches_a_scan(entries: Vec<(u8, i16, u8)>, year: u8) -> bool {
    let index = index_of(&entries);
    let year = if year == 0 { 0 } else { 1900 + i64::from(year) };

    let found = index.by_year_range(year).unwrap();
    let expected: Vec<_> = index
        .iter()
        .filter(|r| r.year().map(i64::from) == Some(year))
        .collect();

    found.iter().eq(expected.into_iter())
}

#[quickcheck]
fn remove_keeps_indexes_in_step(entries: Vec<(u8, i16, u8)>, removals: Vec<u8>) -> bool {
    let mut index = index_of(&entries);

    for id in removals {
        let key = Meteorite::new(format!("M{}", id), u32::from(id)).unwrap();
        let present = index.contains(&key).unwrap();
        if index.remove(&key) != Ok(present) || index.contains(&key) != Ok(false) {
            return false;
        }
    }

    index.iter_by_mass().all(|r| index.contains(r) == Ok(true))
        && index.iter_by_year().all(|r| index.contains(r) == Ok(true))
        && index.iter_by_mass().count() == index.iter().filter(|r| r.mass().is_some()).count()
        && index.iter_by_year().count() == index.iter().filter(|r| r.year().is_some()).count()
}
