use crate::data::models::{Grouping, MatchCandidate, Tier};
use crate::linker::index::GroupIndex;
use crate::utils::ExistsExtension;

/// Looks the normalized street up in the candidate's street set for `grouping`.
///
/// On a hit the street, grouping key and composed house number become the
/// working match; exact tiers don't fuzz the house number.
pub fn match_exact(
    candidate: &mut MatchCandidate,
    group: &GroupIndex,
    grouping: Grouping,
    tier: Tier
) -> bool {
    let key = grouping.key_of(&candidate.address);
    let street = &candidate.address.street;
    let hit = group
        .streets(key)
        .exists(|streets| streets.contains(street));

    if hit {
        candidate.street_match = Some(street.clone());
        candidate.grouping_match = Some(key.to_owned());
        candidate.house_number_match = Some(candidate.house_number.clone());
        candidate.tier = tier;
    }
    hit
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::models::{RawAddress, ReferenceAddress};
    use crate::linker::index::ReferenceIndex;
    use crate::linker::normalize::normalize_address;

    fn index() -> ReferenceIndex {
        ReferenceIndex::build(&[ReferenceAddress {
            postal_code: "33100".to_string(),
            municipality_code: "837".to_string(),
            street: "Hämeenkatu".to_string(),
            house_number: "14".to_string(),
            latitude: Some(61.498),
            longitude: Some(23.760),
        }])
    }

    fn candidate(street: &str, postal_code: &str) -> MatchCandidate {
        normalize_address(&RawAddress {
            business_id: "0112038-9".to_string(),
            street: street.to_string(),
            building_number: "14".to_string(),
            postal_code: postal_code.to_string(),
            municipality_code: "837".to_string(),
            ..Default::default()
        })
    }

    #[test]
    fn test_exact_postal_hit() {
        let index = index();
        let mut candidate = candidate("HÄMEENKATU", "33100");

        assert!(match_exact(&mut candidate, index.group(Grouping::Postal), Grouping::Postal, Tier::ExactPostal));
        assert_eq!(candidate.street_match.as_deref(), Some("hämeenkatu"));
        assert_eq!(candidate.grouping_match.as_deref(), Some("33100"));
        assert_eq!(candidate.house_number_match.as_deref(), Some("14"));
        assert_eq!(candidate.tier, Tier::ExactPostal);
    }

    #[test]
    fn test_exact_miss_leaves_candidate_untouched() {
        let index = index();
        let mut candidate = candidate("Hämeenkatu", "33200");
        let before = candidate.clone();

        assert!(!match_exact(&mut candidate, index.group(Grouping::Postal), Grouping::Postal, Tier::ExactPostal));
        assert_eq!(candidate, before);
    }

    #[test]
    fn test_empty_street_never_matches() {
        let index = index();
        let mut candidate = candidate("", "33100");

        assert!(!match_exact(
            &mut candidate,
            index.group(Grouping::Municipality),
            Grouping::Municipality,
            Tier::ExactMunicipality
        ));
    }
}
