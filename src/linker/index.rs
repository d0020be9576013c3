use std::collections::hash_map::Entry;
use std::collections::{BTreeSet, HashMap};

use log::{debug, info, warn};

use crate::data::models::{Coordinates, Grouping, ReferenceAddress};
use crate::linker::normalize::{
    normalize_house_number,
    normalize_municipality_code,
    normalize_street,
    parse_postal_code
};

/// Lookup structures for one grouping (postal code or municipality).
#[derive(Debug, Default)]
pub struct GroupIndex {
    streets: HashMap<String, BTreeSet<String>>,
    house_numbers: HashMap<(String, String), BTreeSet<String>>,
    coordinates: HashMap<(String, String, String), Coordinates>,
}

impl GroupIndex {
    pub fn streets(&self, key: &str) -> Option<&BTreeSet<String>> {
        self.streets.get(key)
    }

    pub fn house_numbers(&self, street: &str, key: &str) -> Option<&BTreeSet<String>> {
        self.house_numbers.get(&(street.to_owned(), key.to_owned()))
    }

    pub fn coordinates(&self, key: &str, street: &str, house_number: &str) -> Option<Coordinates> {
        self.coordinates
            .get(&(key.to_owned(), street.to_owned(), house_number.to_owned()))
            .copied()
    }

    pub fn group_count(&self) -> usize {
        self.streets.len()
    }

    /// Returns false when an earlier row already holds the coordinate key.
    fn insert(
        &mut self,
        key: &str,
        street: &str,
        house_number: &str,
        coordinates: Option<Coordinates>
    ) -> bool {
        self.streets
            .entry(key.to_owned())
            .or_default()
            .insert(street.to_owned());
        self.house_numbers
            .entry((street.to_owned(), key.to_owned()))
            .or_default()
            .insert(house_number.to_owned());

        match coordinates {
            Some(coordinates) => {
                let coordinate_key = (key.to_owned(), street.to_owned(), house_number.to_owned());
                match self.coordinates.entry(coordinate_key) {
                    Entry::Vacant(entry) => {
                        entry.insert(coordinates);
                        true
                    },
                    Entry::Occupied(_) => false,
                }
            },
            None => true,
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct IndexStats {
    pub rows: usize,
    pub skipped_rows: usize,
    pub rows_without_coordinates: usize,
    pub shadowed_coordinates: usize,
}

/// Read-only view over the reference extract, built once per run.
#[derive(Debug, Default)]
pub struct ReferenceIndex {
    postal: GroupIndex,
    municipality: GroupIndex,
    stats: IndexStats,
}

impl ReferenceIndex {
    pub fn build<'a, I>(rows: I) -> ReferenceIndex
    where
        I: IntoIterator<Item = &'a ReferenceAddress>,
    {
        let mut index = ReferenceIndex::default();

        for row in rows {
            index.stats.rows += 1;

            let street = normalize_street(&row.street);
            if street.is_empty() {
                index.stats.skipped_rows += 1;
                continue;
            }
            let house_number = normalize_house_number(&row.house_number);
            let coordinates = row.coordinates();
            if coordinates.is_none() {
                index.stats.rows_without_coordinates += 1;
            }

            let mut indexed = false;
            if let Some(postal_code) = parse_postal_code(&row.postal_code) {
                if !index.postal.insert(&postal_code, &street, &house_number, coordinates) {
                    index.stats.shadowed_coordinates += 1;
                    debug!(
                        "Duplicate coordinates for {} {} in {}, keeping the first",
                        street, house_number, postal_code
                    );
                }
                indexed = true;
            }
            let municipality_code = normalize_municipality_code(&row.municipality_code);
            if !municipality_code.is_empty() {
                if !index.municipality.insert(&municipality_code, &street, &house_number, coordinates) {
                    index.stats.shadowed_coordinates += 1;
                    debug!(
                        "Duplicate coordinates for {} {} in municipality {}, keeping the first",
                        street, house_number, municipality_code
                    );
                }
                indexed = true;
            }
            if !indexed {
                index.stats.skipped_rows += 1;
            }
        }

        index.log_stats();
        index
    }

    pub fn group(&self, grouping: Grouping) -> &GroupIndex {
        match grouping {
            Grouping::Postal => &self.postal,
            Grouping::Municipality => &self.municipality,
        }
    }

    pub fn stats(&self) -> &IndexStats {
        &self.stats
    }

    fn log_stats(&self) {
        info!(
            "Indexed {} reference rows: {} postal codes, {} municipalities",
            self.stats.rows,
            self.postal.group_count(),
            self.municipality.group_count()
        );
        if self.stats.skipped_rows > 0 {
            warn!("Skipped {} reference rows without street or grouping key", self.stats.skipped_rows);
        }
        if self.stats.rows_without_coordinates > 0 {
            warn!("{} reference rows have no usable coordinates", self.stats.rows_without_coordinates);
        }
        if self.stats.shadowed_coordinates > 0 {
            info!("{} duplicate reference coordinates ignored", self.stats.shadowed_coordinates);
        }
    }
}
