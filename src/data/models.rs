use std::fmt::Formatter;

use serde::{Deserialize, Serialize};

/// One staged registry address. Optional fields are empty strings when absent.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RawAddress {
    pub business_id: String,
    pub street: String,
    pub building_number: String,
    pub entrance: String,
    pub apartment_number: String,
    pub postal_code: String,
    pub municipality_code: String,
    pub co: String,
    pub country: String,
}

impl RawAddress {
    pub const COLUMNS: [&'static str; 9] = [
        "business_id",
        "street",
        "building_number",
        "entrance",
        "apartment_number",
        "postal_code",
        "municipality_code",
        "co",
        "country",
    ];
}

/// One row of the national reference extract.
///
/// Coordinates that fail to parse are read as `None`; such rows still feed
/// the street and house number sets but never the coordinate index.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ReferenceAddress {
    pub postal_code: String,
    pub municipality_code: String,
    pub street: String,
    pub house_number: String,
    #[serde(deserialize_with = "csv::invalid_option")]
    pub latitude: Option<f64>,
    #[serde(deserialize_with = "csv::invalid_option")]
    pub longitude: Option<f64>,
}

impl ReferenceAddress {
    pub const COLUMNS: [&'static str; 6] = [
        "postal_code",
        "municipality_code",
        "street",
        "house_number",
        "latitude",
        "longitude",
    ];

    pub fn coordinates(&self) -> Option<Coordinates> {
        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => Some(Coordinates { latitude, longitude }),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// The two alternative scopes a street is searched in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grouping {
    Postal,
    Municipality,
}

impl Grouping {
    /// The candidate's value for this grouping.
    pub fn key_of<'a>(&self, address: &'a RawAddress) -> &'a str {
        match self {
            Grouping::Postal => &address.postal_code,
            Grouping::Municipality => &address.municipality_code,
        }
    }
}

/// Match tiers, in the order a candidate can be promoted through them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    ExactPostal,
    ExactMunicipality,
    FuzzyMunicipality,
    FuzzyPostal,
    Unmatched,
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::ExactPostal => "exact_postal",
            Tier::ExactMunicipality => "exact_municipality",
            Tier::FuzzyMunicipality => "fuzzy_municipality",
            Tier::FuzzyPostal => "fuzzy_postal",
            Tier::Unmatched => "unmatched",
        }
    }

    pub fn grouping(&self) -> Option<Grouping> {
        match self {
            Tier::ExactPostal | Tier::FuzzyPostal => Some(Grouping::Postal),
            Tier::ExactMunicipality | Tier::FuzzyMunicipality => Some(Grouping::Municipality),
            Tier::Unmatched => None,
        }
    }

    pub fn is_fuzzy(&self) -> bool {
        matches!(self, Tier::FuzzyMunicipality | Tier::FuzzyPostal)
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Working state for one address while it moves through the tiers.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchCandidate {
    /// Normalized copy of the input row
    pub address: RawAddress,
    /// Building number and entrance composed and normalized
    pub house_number: String,
    pub street_match: Option<String>,
    pub grouping_match: Option<String>,
    pub house_number_match: Option<String>,
    pub coordinates: Option<Coordinates>,
    pub tier: Tier,
}

impl MatchCandidate {
    pub fn is_resolved(&self) -> bool {
        self.coordinates.is_some()
    }

    pub fn clear_match(&mut self) {
        self.street_match = None;
        self.grouping_match = None;
        self.house_number_match = None;
    }
}

/// Output row shared by the resolved and unresolved tables.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinkedAddress {
    pub business_id: String,
    pub street: String,
    pub building_number: String,
    pub entrance: String,
    pub apartment_number: String,
    pub postal_code: String,
    pub municipality_code: String,
    pub co: String,
    pub country: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl LinkedAddress {
    pub const COLUMNS: [&'static str; 11] = [
        "business_id",
        "street",
        "building_number",
        "entrance",
        "apartment_number",
        "postal_code",
        "municipality_code",
        "co",
        "country",
        "latitude",
        "longitude",
    ];
}

impl From<MatchCandidate> for LinkedAddress {
    fn from(candidate: MatchCandidate) -> Self {
        let address = candidate.address;
        LinkedAddress {
            business_id: address.business_id,
            street: address.street,
            building_number: address.building_number,
            entrance: address.entrance,
            apartment_number: address.apartment_number,
            postal_code: address.postal_code,
            municipality_code: address.municipality_code,
            co: address.co,
            country: address.country,
            latitude: candidate.coordinates.map(|c| c.latitude),
            longitude: candidate.coordinates.map(|c| c.longitude),
        }
    }
}
