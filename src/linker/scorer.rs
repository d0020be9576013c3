//! String similarity on a 0 to 100 scale.
//!
//! Thresholds elsewhere in the linker are expressed on this scale, so any
//! scorer plugged in through [`SimilarityScorer`] keeps their meaning.

use std::collections::BTreeSet;
use std::str::FromStr;

pub trait SimilarityScorer: Send + Sync {
    fn score(&self, a: &str, b: &str) -> f64;
}

/// Token-set ratio: word order and repeated words are ignored, and a name
/// fully contained in the other scores 100.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokenSetScorer;

impl SimilarityScorer for TokenSetScorer {
    fn score(&self, a: &str, b: &str) -> f64 {
        let tokens_a: BTreeSet<&str> = a.split_whitespace().collect();
        let tokens_b: BTreeSet<&str> = b.split_whitespace().collect();
        if tokens_a.is_empty() || tokens_b.is_empty() {
            return 0.0;
        }

        let intersection = join(tokens_a.intersection(&tokens_b));
        let only_a = join(tokens_a.difference(&tokens_b));
        let only_b = join(tokens_b.difference(&tokens_a));

        if !intersection.is_empty() && (only_a.is_empty() || only_b.is_empty()) {
            return 100.0;
        }

        let combined_a = concat(&intersection, &only_a);
        let combined_b = concat(&intersection, &only_b);
        let mut best = indel_ratio(&combined_a, &combined_b);
        if !intersection.is_empty() {
            best = best
                .max(indel_ratio(&intersection, &combined_a))
                .max(indel_ratio(&intersection, &combined_b));
        }
        best
    }
}

/// Splits the value into its leading building number and the suffix after it.
///
/// Two values with different building numbers never score above zero, so
/// "14" can't stand in for "41". With equal numbers the suffix decides the
/// remaining share of the score, which keeps "14a" away from both "14" and
/// "14b" under the default threshold.
#[derive(Debug, Default, Clone, Copy)]
pub struct HouseNumberScorer;

impl HouseNumberScorer {
    const NUMBER_SHARE: f64 = 60.0;
    const SUFFIX_SHARE: f64 = 40.0;
}

impl SimilarityScorer for HouseNumberScorer {
    fn score(&self, a: &str, b: &str) -> f64 {
        let (number_a, suffix_a) = split_building_number(a);
        let (number_b, suffix_b) = split_building_number(b);
        if number_a.is_empty() || number_b.is_empty() {
            return indel_ratio(a, b);
        }
        if number_a != number_b {
            return 0.0;
        }
        Self::NUMBER_SHARE + Self::SUFFIX_SHARE * indel_ratio(suffix_a, suffix_b) / 100.0
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct LevenshteinScorer;

impl SimilarityScorer for LevenshteinScorer {
    fn score(&self, a: &str, b: &str) -> f64 {
        strsim::normalized_levenshtein(a, b) * 100.0
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct JaroWinklerScorer;

impl SimilarityScorer for JaroWinklerScorer {
    fn score(&self, a: &str, b: &str) -> f64 {
        strsim::jaro_winkler(a, b) * 100.0
    }
}

/// Street scorer selection, read from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScorerKind {
    TokenSet,
    Levenshtein,
    JaroWinkler,
}

impl ScorerKind {
    pub fn build(&self) -> Box<dyn SimilarityScorer> {
        match self {
            ScorerKind::TokenSet => Box::new(TokenSetScorer),
            ScorerKind::Levenshtein => Box::new(LevenshteinScorer),
            ScorerKind::JaroWinkler => Box::new(JaroWinklerScorer),
        }
    }
}

impl FromStr for ScorerKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "token_set" => Ok(ScorerKind::TokenSet),
            "levenshtein" => Ok(ScorerKind::Levenshtein),
            "jaro_winkler" => Ok(ScorerKind::JaroWinkler),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scored<'a> {
    pub choice: &'a str,
    pub score: f64,
}

/// Scores every choice and keeps the `limit` best, highest first.
///
/// The sort is stable: equal scores stay in the order `choices` yields them,
/// so for an ordered set the smallest value ranks first.
pub fn rank<'a, I>(
    scorer: &dyn SimilarityScorer,
    query: &str,
    choices: I,
    limit: usize
) -> Vec<Scored<'a>>
where
    I: IntoIterator<Item = &'a String>,
{
    let mut scored: Vec<Scored<'a>> = choices
        .into_iter()
        .map(|choice| Scored { choice: choice.as_str(), score: scorer.score(query, choice) })
        .collect();
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored.truncate(limit);
    scored
}

/// Top-ranked choice, if it reaches `threshold`.
pub fn best_match<'a, I>(
    scorer: &dyn SimilarityScorer,
    query: &str,
    choices: I,
    limit: usize,
    threshold: f64
) -> Option<Scored<'a>>
where
    I: IntoIterator<Item = &'a String>,
{
    rank(scorer, query, choices, limit.max(1))
        .into_iter()
        .next()
        .filter(|best| best.score >= threshold)
}

/// `200 * LCS / (|a| + |b|)`, counted in chars. Two empty strings are identical.
pub fn indel_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 100.0;
    }
    200.0 * longest_common_subsequence(&a, &b) as f64 / total as f64
}

fn longest_common_subsequence(a: &[char], b: &[char]) -> usize {
    let mut row = vec![0usize; b.len() + 1];
    for &ca in a {
        let mut diagonal = 0;
        for (j, &cb) in b.iter().enumerate() {
            let above = row[j + 1];
            row[j + 1] = if ca == cb { diagonal + 1 } else { above.max(row[j]) };
            diagonal = above;
        }
    }
    row[b.len()]
}

fn split_building_number(value: &str) -> (&str, &str) {
    let end = value
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(value.len());
    value.split_at(end)
}

fn join<'a, 'b: 'a, I: Iterator<Item = &'a &'b str>>(tokens: I) -> String {
    tokens.copied().collect::<Vec<&str>>().join(" ")
}

fn concat(head: &str, tail: &str) -> String {
    match (head.is_empty(), tail.is_empty()) {
        (true, _) => tail.to_owned(),
        (_, true) => head.to_owned(),
        _ => format!("{} {}", head, tail),
    }
}
