pub trait ExistsExtension<T> {
    fn exists<P: FnOnce(&T) -> bool>(&self, predicate: P) -> bool;
}

impl <T> ExistsExtension<T> for Option<T> {
    fn exists<P: FnOnce(&T) -> bool>(&self, predicate: P) -> bool {
        match self {
            Some(value) => predicate(value),
            None => false,
        }
    }
}

/// Column lookup on a CSV header row.
pub trait HeaderExtension {
    fn missing<'a>(&self, required: &[&'a str]) -> Option<&'a str>;
}

impl HeaderExtension for csv::StringRecord {
    fn missing<'a>(&self, required: &[&'a str]) -> Option<&'a str> {
        required
            .iter()
            .find(|column| !self.iter().any(|header| header.trim() == **column))
            .copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exists() {
        assert!(Some(3).exists(|n| *n == 3));
        assert!(!Some(3).exists(|n| *n == 4));
        assert!(!None::<u8>.exists(|_| true));
    }

    #[test]
    fn test_missing_header() {
        let headers = csv::StringRecord::from(vec!["postal_code", " street ", "latitude"]);
        assert_eq!(headers.missing(&["street", "postal_code"]), None);
        assert_eq!(headers.missing(&["street", "longitude"]), Some("longitude"));
    }
}
