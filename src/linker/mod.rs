use indicatif::ProgressBar;
use log::{debug, info};
use rayon::prelude::*;

use crate::config::{FuzzyOrder, LinkerConfig};
use crate::data::models::{LinkedAddress, MatchCandidate, RawAddress, Tier};
use crate::linker::coordinates::assign_coordinates;
use crate::linker::exact::match_exact;
use crate::linker::fuzzy::{match_fuzzy, FuzzyParams};
use crate::linker::house_number::resolve_house_number;
use crate::linker::index::ReferenceIndex;
use crate::linker::normalize::normalize_address;
use crate::linker::partition::{partition, Partitioned};
use crate::linker::scorer::{HouseNumberScorer, SimilarityScorer};
use crate::linker::summary::MatchSummary;

pub mod coordinates;
pub mod exact;
pub mod fuzzy;
pub mod house_number;
pub mod index;
pub mod normalize;
pub mod partition;
pub mod scorer;
pub mod summary;

#[derive(Debug)]
pub struct LinkResult {
    pub resolved: Vec<LinkedAddress>,
    pub unresolved: Vec<LinkedAddress>,
    pub summary: MatchSummary,
}

/// Runs candidates through the tier cascade against one reference index.
pub struct Linker<'a> {
    index: &'a ReferenceIndex,
    config: &'a LinkerConfig,
    street_scorer: Box<dyn SimilarityScorer>,
    house_number_scorer: HouseNumberScorer,
    tiers: [Tier; 4],
}

impl<'a> Linker<'a> {
    pub fn new(index: &'a ReferenceIndex, config: &'a LinkerConfig) -> Linker<'a> {
        let tiers = match config.fuzzy_order {
            FuzzyOrder::MunicipalityFirst => [
                Tier::ExactPostal,
                Tier::ExactMunicipality,
                Tier::FuzzyMunicipality,
                Tier::FuzzyPostal,
            ],
            FuzzyOrder::PostalFirst => [
                Tier::ExactPostal,
                Tier::ExactMunicipality,
                Tier::FuzzyPostal,
                Tier::FuzzyMunicipality,
            ],
        };

        Linker {
            index,
            config,
            street_scorer: config.street_scorer.build(),
            house_number_scorer: HouseNumberScorer,
            tiers,
        }
    }

    pub fn tiers(&self) -> &[Tier] {
        &self.tiers
    }

    /// Tries each tier in order and stops at the first one that yields
    /// coordinates. Candidates that run out of tiers end `Unmatched`.
    pub fn resolve(&self, mut candidate: MatchCandidate) -> MatchCandidate {
        for &tier in &self.tiers {
            if self.try_tier(&mut candidate, tier) {
                debug!("{} resolved at {}", candidate.address.business_id, tier);
                return candidate;
            }
        }
        debug!("{} unresolved", candidate.address.business_id);
        candidate.tier = Tier::Unmatched;
        candidate
    }

    fn try_tier(&self, candidate: &mut MatchCandidate, tier: Tier) -> bool {
        let grouping = match tier.grouping() {
            Some(grouping) => grouping,
            None => return false,
        };
        let group = self.index.group(grouping);

        let street_hit = if tier.is_fuzzy() {
            let params = FuzzyParams {
                threshold: self.config.street_threshold,
                candidates: self.config.fuzzy_candidates,
            };
            let hit = match_fuzzy(candidate, group, grouping, tier, self.street_scorer.as_ref(), params);
            if hit {
                resolve_house_number(
                    candidate,
                    group,
                    &self.house_number_scorer,
                    self.config.house_number_threshold
                );
            }
            hit
        } else {
            match_exact(candidate, group, grouping, tier)
        };

        street_hit && assign_coordinates(candidate, group)
    }
}

/// Links a batch of staged addresses against the reference index.
///
/// Every row is normalized and resolved in parallel; the index is only read.
/// A row that matches nothing ends up in `unresolved`, which is deduplicated.
pub fn link(addresses: &[RawAddress], index: &ReferenceIndex, config: &LinkerConfig) -> LinkResult {
    let linker = Linker::new(index, config);
    info!("Linking {} addresses", addresses.len());

    let progress_bar = if config.show_progress {
        ProgressBar::new(addresses.len() as u64)
    } else {
        ProgressBar::hidden()
    };
    let terminal: Vec<MatchCandidate> = addresses
        .par_iter()
        .map(|raw| {
            let resolved = linker.resolve(normalize_address(raw));
            progress_bar.inc(1);
            resolved
        })
        .collect();
    progress_bar.finish();

    let mut summary = MatchSummary::from_candidates(&terminal);
    let Partitioned { resolved, unresolved, duplicate_rows } = partition(terminal);
    summary.drop_unresolved_duplicates(duplicate_rows);
    info!("Match summary:\n{}", summary);

    LinkResult { resolved, unresolved, summary }
}
