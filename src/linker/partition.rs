use std::collections::HashSet;

use crate::data::models::{LinkedAddress, MatchCandidate, RawAddress};

type DedupKey = (String, String, String, String);

fn dedup_key(address: &RawAddress) -> DedupKey {
    (
        address.business_id.clone(),
        address.street.clone(),
        address.building_number.clone(),
        address.postal_code.clone(),
    )
}

/// Drops candidates whose (business id, street, building number, postal code)
/// was already seen, keeping the first. Returns the number dropped.
fn deduplicate(candidates: Vec<MatchCandidate>) -> (Vec<MatchCandidate>, usize) {
    let before = candidates.len();
    let mut seen: HashSet<DedupKey> = HashSet::with_capacity(before);
    let unique: Vec<MatchCandidate> = candidates
        .into_iter()
        .filter(|candidate| seen.insert(dedup_key(&candidate.address)))
        .collect();
    let dropped = before - unique.len();
    (unique, dropped)
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Partitioned {
    pub resolved: Vec<LinkedAddress>,
    pub unresolved: Vec<LinkedAddress>,
    /// Unresolved rows dropped as duplicates
    pub duplicate_rows: usize,
}

/// Splits terminal candidates on whether they carry coordinates, stripping
/// the working match columns. Input order is kept within each table.
///
/// Only the unresolved table is deduplicated. Resolved rows are kept one per
/// input row, so two entrances of one building both stay.
pub fn partition(candidates: Vec<MatchCandidate>) -> Partitioned {
    let (resolved, unresolved): (Vec<MatchCandidate>, Vec<MatchCandidate>) = candidates
        .into_iter()
        .partition(MatchCandidate::is_resolved);
    let (unresolved, duplicate_rows) = deduplicate(unresolved);

    Partitioned {
        resolved: resolved.into_iter().map(LinkedAddress::from).collect(),
        unresolved: unresolved.into_iter().map(LinkedAddress::from).collect(),
        duplicate_rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::models::{Coordinates, Tier};
    use crate::linker::normalize::normalize_address;

    fn candidate(business_id: &str, street: &str, building_number: &str) -> MatchCandidate {
        normalize_address(&RawAddress {
            business_id: business_id.to_string(),
            street: street.to_string(),
            building_number: building_number.to_string(),
            apartment_number: "2".to_string(),
            postal_code: "00100".to_string(),
            ..Default::default()
        })
    }

    #[test]
    fn test_deduplicate_keeps_first() {
        let mut first = candidate("1", "Mannerheimintie", "5");
        first.address.co = "first".to_string();
        let mut second = candidate("1", "mannerheimintie", "5");
        second.address.co = "second".to_string();
        let other = candidate("1", "Mannerheimintie", "7");

        let (unique, dropped) = deduplicate(vec![first, second, other]);
        assert_eq!(dropped, 1);
        assert_eq!(unique.len(), 2);
        assert_eq!(unique[0].address.co, "first");
        assert_eq!(unique[1].address.building_number, "7");
    }

    #[test]
    fn test_partition_strips_working_columns() {
        let mut resolved = candidate("1", "Hämeenk.", "14");
        resolved.address.street = "hämeenkatu".to_string();
        resolved.street_match = Some("hämeenkatu".to_string());
        resolved.grouping_match = Some("00100".to_string());
        resolved.house_number_match = Some("14".to_string());
        resolved.coordinates = Some(Coordinates { latitude: 61.498, longitude: 23.760 });
        resolved.tier = Tier::FuzzyPostal;
        let unresolved = candidate("2", "Tuntematon tie", "1");

        let output = partition(vec![unresolved, resolved]);
        assert_eq!(output.resolved.len(), 1);
        assert_eq!(output.unresolved.len(), 1);

        let row = &output.resolved[0];
        assert_eq!(row.business_id, "1");
        assert_eq!(row.street, "hämeenkatu");
        assert_eq!(row.apartment_number, "2");
        assert_eq!(row.latitude, Some(61.498));
        assert_eq!(row.longitude, Some(23.760));

        let row = &output.unresolved[0];
        assert_eq!(row.street, "tuntematon tie");
        assert_eq!(row.latitude, None);
    }

    #[test]
    fn test_unresolved_duplicates_are_dropped() {
        let output = partition(vec![
            candidate("1", "Tuntematon tie", "1"),
            candidate("1", "Tuntematon tie", "1"),
        ]);
        assert_eq!(output.unresolved.len(), 1);
        assert_eq!(output.duplicate_rows, 1);
        assert!(output.resolved.is_empty());
    }

    #[test]
    fn test_resolved_rows_are_not_deduplicated() {
        let mut first = candidate("1", "Hämeenkatu", "14");
        first.coordinates = Some(Coordinates { latitude: 61.1, longitude: 23.7 });
        first.tier = Tier::ExactPostal;
        let second = first.clone();

        let output = partition(vec![first, second]);
        assert_eq!(output.resolved.len(), 2);
        assert_eq!(output.duplicate_rows, 0);
    }
}
