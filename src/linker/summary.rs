use std::fmt::Formatter;

use crate::data::models::{MatchCandidate, Tier};

/// Per-tier outcome counts for one run.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct MatchSummary {
    pub input_rows: usize,
    pub duplicate_rows: usize,
    pub exact_postal: usize,
    pub exact_municipality: usize,
    pub fuzzy_municipality: usize,
    pub fuzzy_postal: usize,
    pub unresolved: usize,
}

impl MatchSummary {
    /// Counts terminal candidates, one per input row, before the unresolved
    /// table is deduplicated.
    pub fn from_candidates(candidates: &[MatchCandidate]) -> MatchSummary {
        let mut summary = MatchSummary { input_rows: candidates.len(), ..Default::default() };
        for candidate in candidates {
            summary.record(candidate);
        }
        summary
    }

    /// Takes duplicates dropped from the unresolved table off its count.
    pub fn drop_unresolved_duplicates(&mut self, count: usize) {
        self.duplicate_rows += count;
        self.unresolved -= count;
    }

    fn record(&mut self, candidate: &MatchCandidate) {
        if !candidate.is_resolved() {
            self.unresolved += 1;
            return;
        }
        match candidate.tier {
            Tier::ExactPostal => self.exact_postal += 1,
            Tier::ExactMunicipality => self.exact_municipality += 1,
            Tier::FuzzyMunicipality => self.fuzzy_municipality += 1,
            Tier::FuzzyPostal => self.fuzzy_postal += 1,
            Tier::Unmatched => self.unresolved += 1,
        }
    }

    pub fn tier_count(&self, tier: Tier) -> usize {
        match tier {
            Tier::ExactPostal => self.exact_postal,
            Tier::ExactMunicipality => self.exact_municipality,
            Tier::FuzzyMunicipality => self.fuzzy_municipality,
            Tier::FuzzyPostal => self.fuzzy_postal,
            Tier::Unmatched => self.unresolved,
        }
    }

    pub fn resolved(&self) -> usize {
        self.exact_postal + self.exact_municipality + self.fuzzy_municipality + self.fuzzy_postal
    }
}

impl std::fmt::Display for MatchSummary {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        writeln!(f, "{} input rows ({} unresolved duplicates dropped)", self.input_rows, self.duplicate_rows)?;
        for tier in &[
            Tier::ExactPostal,
            Tier::ExactMunicipality,
            Tier::FuzzyMunicipality,
            Tier::FuzzyPostal
        ] {
            writeln!(f, "  {:<20}{}", tier.as_str(), self.tier_count(*tier))?;
        }
        writeln!(f, "  {:<20}{}", "resolved", self.resolved())?;
        write!(f, "  {:<20}{}", "unresolved", self.unresolved)
    }
}
