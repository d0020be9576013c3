use log::debug;

use crate::data::models::MatchCandidate;
use crate::linker::index::GroupIndex;
use crate::linker::scorer::{best_match, SimilarityScorer};

/// Picks the house number on the matched street: exact first, then the best
/// scoring known number at or above `threshold`.
///
/// Ties go to the first ranked number, i.e. the smallest in set order.
/// Leaves `house_number_match` empty when nothing qualifies.
pub fn resolve_house_number(
    candidate: &mut MatchCandidate,
    group: &GroupIndex,
    scorer: &dyn SimilarityScorer,
    threshold: f64
) -> bool {
    let known = match (&candidate.street_match, &candidate.grouping_match) {
        (Some(street), Some(key)) => group.house_numbers(street, key),
        _ => None,
    };

    let matched = known.and_then(|known| {
        if known.contains(&candidate.house_number) {
            return Some(candidate.house_number.clone());
        }
        best_match(scorer, &candidate.house_number, known, known.len(), threshold)
            .map(|best| {
                debug!(
                    "House number '{}' resolved to '{}' (score {:.1})",
                    candidate.house_number, best.choice, best.score
                );
                best.choice.to_owned()
            })
    });

    let found = matched.is_some();
    candidate.house_number_match = matched;
    found
}
