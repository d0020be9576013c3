use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use dotenv::dotenv;

use crate::data::error::LinkError;
use crate::linker::scorer::ScorerKind;

const DEFAULT_STREET_THRESHOLD: f64 = 80.0;
const DEFAULT_HOUSE_NUMBER_THRESHOLD: f64 = 65.0;
const DEFAULT_FUZZY_CANDIDATES: usize = 5;
const DEFAULT_REFERENCE_ENTRY_PATTERN: &str = r"\.csv$";
const DEFAULT_OUTPUT_DIR: &str = "output";

/// Which grouping the fuzzy tiers try first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FuzzyOrder {
    MunicipalityFirst,
    PostalFirst,
}

impl FromStr for FuzzyOrder {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "municipality_first" => Ok(FuzzyOrder::MunicipalityFirst),
            "postal_first" => Ok(FuzzyOrder::PostalFirst),
            _ => Err(()),
        }
    }
}

/// Matching parameters, shared read-only by every worker.
#[derive(Debug, Clone)]
pub struct LinkerConfig {
    pub street_threshold: f64,
    pub house_number_threshold: f64,
    pub fuzzy_candidates: usize,
    pub fuzzy_order: FuzzyOrder,
    pub street_scorer: ScorerKind,
    pub show_progress: bool,
}

impl Default for LinkerConfig {
    fn default() -> Self {
        LinkerConfig {
            street_threshold: DEFAULT_STREET_THRESHOLD,
            house_number_threshold: DEFAULT_HOUSE_NUMBER_THRESHOLD,
            fuzzy_candidates: DEFAULT_FUZZY_CANDIDATES,
            fuzzy_order: FuzzyOrder::MunicipalityFirst,
            street_scorer: ScorerKind::TokenSet,
            show_progress: false,
        }
    }
}

impl LinkerConfig {
    pub fn from_env() -> Result<LinkerConfig, LinkError> {
        dotenv().ok();

        Ok(LinkerConfig {
            street_threshold: parse_var("LINKER_STREET_THRESHOLD")?
                .unwrap_or(DEFAULT_STREET_THRESHOLD),
            house_number_threshold: parse_var("LINKER_HOUSE_NUMBER_THRESHOLD")?
                .unwrap_or(DEFAULT_HOUSE_NUMBER_THRESHOLD),
            fuzzy_candidates: parse_var("LINKER_FUZZY_CANDIDATES")?
                .unwrap_or(DEFAULT_FUZZY_CANDIDATES),
            fuzzy_order: parse_var("LINKER_FUZZY_ORDER")?
                .unwrap_or(FuzzyOrder::MunicipalityFirst),
            street_scorer: parse_var("LINKER_STREET_SCORER")?
                .unwrap_or(ScorerKind::TokenSet),
            show_progress: parse_var("LINKER_PROGRESS")?
                .unwrap_or(true),
        })
    }
}

/// File locations for one batch run.
#[derive(Debug, Clone)]
pub struct JobPaths {
    pub addresses: PathBuf,
    pub reference: PathBuf,
    pub reference_entry_pattern: String,
    pub output_dir: PathBuf,
}

impl JobPaths {
    pub fn from_env() -> Result<JobPaths, LinkError> {
        dotenv().ok();

        Ok(JobPaths {
            addresses: required_var("LINKER_ADDRESSES_PATH")?.into(),
            reference: required_var("LINKER_REFERENCE_PATH")?.into(),
            reference_entry_pattern: env::var("LINKER_REFERENCE_ENTRY_PATTERN")
                .unwrap_or_else(|_| DEFAULT_REFERENCE_ENTRY_PATTERN.to_owned()),
            output_dir: env::var("LINKER_OUTPUT_DIR")
                .unwrap_or_else(|_| DEFAULT_OUTPUT_DIR.to_owned())
                .into(),
        })
    }
}

fn required_var(key: &'static str) -> Result<String, LinkError> {
    env::var(key).map_err(|_| LinkError::MissingConfig(key))
}

fn parse_var<T: FromStr>(key: &'static str) -> Result<Option<T>, LinkError> {
    match env::var(key) {
        Ok(value) => value
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| LinkError::InvalidConfig { key, value }),
        Err(_) => Ok(None),
    }
}
