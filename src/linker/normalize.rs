use lazy_static::lazy_static;
use regex::Regex;

use crate::data::models::{MatchCandidate, RawAddress, Tier};

/// Postal code given to rows whose code can't be read. No reference group uses it.
pub const POSTAL_CODE_PLACEHOLDER: &str = "00000";

const POSTAL_CODE_LENGTH: usize = 5;
const MUNICIPALITY_CODE_LENGTH: usize = 3;

lazy_static! {
    static ref STREET_SYMBOLS: Regex =
        Regex::new(r"[^\p{L}\p{N}\s-]").expect("Could not create regex");
    static ref WHITESPACE: Regex = Regex::new(r"\s+").expect("Could not create regex");
    // Apartment / business premises / lot markers that trail building numbers
    static ref HOUSE_NUMBER_PARTICLES: Regex =
        Regex::new(r"(?:as|lh|lt)\.").expect("Could not create regex");
}

pub fn normalize_street(raw: &str) -> String {
    let lowered = raw.trim().to_lowercase();
    let cleaned = STREET_SYMBOLS.replace_all(&lowered, "");
    WHITESPACE.replace_all(cleaned.trim(), " ").into_owned()
}

/// Lower-cases and strips particles and every whitespace character.
pub fn normalize_house_number(raw: &str) -> String {
    let lowered = raw.to_lowercase();
    HOUSE_NUMBER_PARTICLES
        .replace_all(&lowered, "")
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect()
}

pub fn compose_house_number(building_number: &str, entrance: &str) -> String {
    normalize_house_number(&format!("{}{}", building_number.trim(), entrance.trim()))
}

/// Returns the zero-padded code, or `None` when the value isn't 1 to 5 digits.
pub fn parse_postal_code(raw: &str) -> Option<String> {
    let code = strip_float_suffix(raw.trim());
    let valid = (1..=POSTAL_CODE_LENGTH).contains(&code.len())
        && code.chars().all(|c| c.is_ascii_digit());
    if valid {
        Some(format!("{:0>width$}", code, width = POSTAL_CODE_LENGTH))
    } else {
        None
    }
}

pub fn normalize_postal_code(raw: &str) -> String {
    parse_postal_code(raw).unwrap_or_else(|| POSTAL_CODE_PLACEHOLDER.to_owned())
}

/// Numeric codes are zero-padded back to three digits; anything else is kept as-is.
pub fn normalize_municipality_code(raw: &str) -> String {
    let code = strip_float_suffix(raw.trim());
    if !code.is_empty() && code.chars().all(|c| c.is_ascii_digit()) {
        format!("{:0>width$}", code, width = MUNICIPALITY_CODE_LENGTH)
    } else {
        code.to_owned()
    }
}

// Numeric columns that went through a float conversion upstream come back as "91.0"
fn strip_float_suffix(value: &str) -> &str {
    value.strip_suffix(".0").unwrap_or(value)
}

/// Builds the working candidate for one input row. Never fails.
pub fn normalize_address(raw: &RawAddress) -> MatchCandidate {
    let address = RawAddress {
        street: normalize_street(&raw.street),
        postal_code: normalize_postal_code(&raw.postal_code),
        municipality_code: normalize_municipality_code(&raw.municipality_code),
        ..raw.clone()
    };

    MatchCandidate {
        house_number: compose_house_number(&raw.building_number, &raw.entrance),
        address,
        street_match: None,
        grouping_match: None,
        house_number_match: None,
        coordinates: None,
        tier: Tier::Unmatched,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_street() {
        assert_eq!(normalize_street("  Hämeenkatu "), "hämeenkatu");
        assert_eq!(normalize_street("Hämeenk."), "hämeenk");
        assert_eq!(normalize_street("Pohjois-Esplanadi,"), "pohjois-esplanadi");
        assert_eq!(normalize_street("Iso   Roobertinkatu"), "iso roobertinkatu");
        assert_eq!(normalize_street(""), "");
    }

    #[test]
    fn test_normalize_house_number() {
        assert_eq!(normalize_house_number("14 A"), "14a");
        assert_eq!(normalize_house_number("3 as. 12"), "312");
        assert_eq!(normalize_house_number("LH. 5"), "5");
        assert_eq!(normalize_house_number("lt.7"), "7");
        assert_eq!(compose_house_number("14", " b"), "14b");
        assert_eq!(compose_house_number("", ""), "");
    }

    #[test]
    fn test_postal_code_padding() {
        assert_eq!(normalize_postal_code("33100"), "33100");
        assert_eq!(normalize_postal_code("100"), "00100");
        assert_eq!(normalize_postal_code("2100.0"), "02100");
        assert_eq!(normalize_postal_code(" 00500 "), "00500");
    }

    #[test]
    fn test_malformed_postal_code() {
        assert_eq!(parse_postal_code(""), None);
        assert_eq!(parse_postal_code("FI-33100"), None);
        assert_eq!(parse_postal_code("331000"), None);
        assert_eq!(normalize_postal_code("unknown"), POSTAL_CODE_PLACEHOLDER);
    }

    #[test]
    fn test_municipality_code() {
        assert_eq!(normalize_municipality_code("837.0"), "837");
        assert_eq!(normalize_municipality_code(" 091 "), "091");
        assert_eq!(normalize_municipality_code("91.0"), "091");
        assert_eq!(normalize_municipality_code("5"), "005");
        assert_eq!(normalize_municipality_code(""), "");
    }

    #[test]
    fn test_normalize_address() {
        let raw = RawAddress {
            business_id: "1234567-8".to_string(),
            street: "Hämeenkatu".to_string(),
            building_number: "14".to_string(),
            entrance: "A".to_string(),
            apartment_number: "3".to_string(),
            postal_code: "3100".to_string(),
            municipality_code: "837.0".to_string(),
            ..Default::default()
        };

        let candidate = normalize_address(&raw);
        assert_eq!(candidate.address.street, "hämeenkatu");
        assert_eq!(candidate.address.postal_code, "03100");
        assert_eq!(candidate.address.municipality_code, "837");
        assert_eq!(candidate.address.building_number, "14");
        assert_eq!(candidate.house_number, "14a");
        assert_eq!(candidate.tier, Tier::Unmatched);
        assert!(!candidate.is_resolved());
    }
}
