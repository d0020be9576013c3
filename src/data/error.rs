use std::fmt::Formatter;

#[derive(Debug)]
pub enum LinkError {
    IO(Box<dyn std::fmt::Debug + Send>),
    InvalidZip(Box<zip::result::ZipError>),
    InvalidData(Box<dyn std::fmt::Debug + Send>),
    /// A required column is absent from one of the input tables
    MissingColumn { table: &'static str, column: &'static str },
    /// Reference file missing, unreadable, or archive without a usable entry
    ReferenceDataUnavailable(String),
    /// A required environment variable is not set
    MissingConfig(&'static str),
    InvalidConfig { key: &'static str, value: String },
}

impl std::fmt::Display for LinkError {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        let msg = match self {
            LinkError::IO(inner) => {
                format!("IO: {:?}", inner)
            },
            LinkError::InvalidZip(inner) => {
                format!("Invalid zip data file: {}", inner)
            },
            LinkError::InvalidData(inner) => {
                format!("Invalid address data: {:?}", inner)
            },
            LinkError::MissingColumn { table, column } => {
                format!("Missing column '{}' in {} table", column, table)
            },
            LinkError::ReferenceDataUnavailable(reason) => {
                format!("Reference data unavailable: {}", reason)
            },
            LinkError::MissingConfig(key) => {
                format!("{} is not set", key)
            },
            LinkError::InvalidConfig { key, value } => {
                format!("Invalid value '{}' for {}", value, key)
            }
        };
        write!(f, "Link error: {}", msg)
    }
}

impl std::error::Error for LinkError {}

impl From<std::io::Error> for LinkError {
    fn from(error: std::io::Error) -> Self {
        LinkError::IO(Box::new(error))
    }
}

impl From<zip::result::ZipError> for LinkError {
    fn from(error: zip::result::ZipError) -> Self {
        LinkError::InvalidZip(Box::new(error))
    }
}

impl From<csv::Error> for LinkError {
    fn from(error: csv::Error) -> Self {
        LinkError::InvalidData(Box::new(error))
    }
}
