use crate::data::models::{MatchCandidate, Tier};
use crate::linker::index::GroupIndex;

/// Reads the coordinates for the working match from the reference index.
///
/// A hit resolves the candidate and replaces its street with the canonical
/// one. A miss clears the working match so the next tier starts clean.
pub fn assign_coordinates(candidate: &mut MatchCandidate, group: &GroupIndex) -> bool {
    let found = match (
        &candidate.grouping_match,
        &candidate.street_match,
        &candidate.house_number_match
    ) {
        (Some(key), Some(street), Some(house_number)) => group.coordinates(key, street, house_number),
        _ => None,
    };

    match found {
        Some(coordinates) => {
            candidate.coordinates = Some(coordinates);
            if let Some(street) = &candidate.street_match {
                candidate.address.street = street.clone();
            }
            true
        },
        None => {
            candidate.clear_match();
            candidate.tier = Tier::Unmatched;
            false
        }
    }
}
