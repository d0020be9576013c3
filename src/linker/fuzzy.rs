use log::debug;

use crate::data::models::{Grouping, MatchCandidate, Tier};
use crate::linker::index::GroupIndex;
use crate::linker::scorer::{best_match, SimilarityScorer};

/// Street search bounds for one fuzzy tier.
#[derive(Debug, Clone, Copy)]
pub struct FuzzyParams {
    pub threshold: f64,
    pub candidates: usize,
}

/// Scores the normalized street against every street sharing the candidate's
/// grouping key and takes the best of the top `params.candidates`, if it
/// reaches the threshold.
///
/// Only the street is set here; the house number is resolved separately.
pub fn match_fuzzy(
    candidate: &mut MatchCandidate,
    group: &GroupIndex,
    grouping: Grouping,
    tier: Tier,
    scorer: &dyn SimilarityScorer,
    params: FuzzyParams
) -> bool {
    if candidate.address.street.is_empty() {
        return false;
    }
    let key = grouping.key_of(&candidate.address);
    let streets = match group.streets(key) {
        Some(streets) => streets,
        None => return false,
    };

    let best = best_match(
        scorer,
        &candidate.address.street,
        streets,
        params.candidates,
        params.threshold
    );

    match best {
        Some(best) => {
            debug!(
                "Street '{}' fuzzy matched '{}' in {} (score {:.1})",
                candidate.address.street, best.choice, key, best.score
            );
            candidate.street_match = Some(best.choice.to_owned());
            candidate.grouping_match = Some(key.to_owned());
            candidate.tier = tier;
            true
        },
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::models::{RawAddress, ReferenceAddress};
    use crate::linker::index::ReferenceIndex;
    use crate::linker::normalize::normalize_address;
    use crate::linker::scorer::{LevenshteinScorer, TokenSetScorer};

    const PARAMS: FuzzyParams = FuzzyParams { threshold: 80.0, candidates: 5 };

    fn index() -> ReferenceIndex {
        let streets = ["Hämeenkatu", "Hallituskatu", "Satakunnankatu", "Kuninkaankatu"];
        let rows: Vec<ReferenceAddress> = streets
            .iter()
            .map(|street| ReferenceAddress {
                postal_code: "33100".to_string(),
                municipality_code: "837".to_string(),
                street: street.to_string(),
                house_number: "1".to_string(),
                latitude: Some(61.49),
                longitude: Some(23.76),
            })
            .collect();
        ReferenceIndex::build(&rows)
    }

    fn candidate(street: &str) -> MatchCandidate {
        normalize_address(&RawAddress {
            business_id: "3456789-0".to_string(),
            street: street.to_string(),
            building_number: "1".to_string(),
            postal_code: "33100".to_string(),
            municipality_code: "837".to_string(),
            ..Default::default()
        })
    }

    #[test]
    fn test_abbreviated_street() {
        let index = index();
        let mut candidate = candidate("Hämeenk.");

        assert!(match_fuzzy(
            &mut candidate,
            index.group(Grouping::Postal),
            Grouping::Postal,
            Tier::FuzzyPostal,
            &TokenSetScorer,
            PARAMS
        ));
        assert_eq!(candidate.street_match.as_deref(), Some("hämeenkatu"));
        assert_eq!(candidate.grouping_match.as_deref(), Some("33100"));
        assert_eq!(candidate.house_number_match, None);
        assert_eq!(candidate.tier, Tier::FuzzyPostal);
    }

    #[test]
    fn test_unrelated_street_is_rejected() {
        let index = index();
        let mut candidate = candidate("Mannerheimintie");

        assert!(!match_fuzzy(
            &mut candidate,
            index.group(Grouping::Municipality),
            Grouping::Municipality,
            Tier::FuzzyMunicipality,
            &TokenSetScorer,
            PARAMS
        ));
        assert_eq!(candidate.street_match, None);
        assert_eq!(candidate.tier, Tier::Unmatched);
    }

    #[test]
    fn test_unknown_group() {
        let index = index();
        let mut candidate = candidate("Hämeenkatu");
        candidate.address.municipality_code = "999".to_string();

        assert!(!match_fuzzy(
            &mut candidate,
            index.group(Grouping::Municipality),
            Grouping::Municipality,
            Tier::FuzzyMunicipality,
            &TokenSetScorer,
            PARAMS
        ));
    }

    #[test]
    fn test_empty_street_is_skipped() {
        let index = index();
        let mut candidate = candidate("");

        // a zero threshold accepts any scored street
        assert!(!match_fuzzy(
            &mut candidate,
            index.group(Grouping::Postal),
            Grouping::Postal,
            Tier::FuzzyPostal,
            &LevenshteinScorer,
            FuzzyParams { threshold: 0.0, candidates: 5 }
        ));
    }
}
