//! Error types for listings-features

use listings_io::IoError;
use thiserror::Error;

use crate::config::ConfigError;

/// Result type alias for feature extraction
pub type Result<T> = std::result::Result<T, FeatureError>;

/// Main error type for the feature pipeline. Every variant is fatal.
#[derive(Error, Debug)]
pub enum FeatureError {
    /// A listing's amenities field is not a `{...}` list with balanced quotes
    #[error("Malformed amenities field in row {row}: {source}")]
    MalformedAmenityField {
        row: usize,
        #[source]
        source: AmenityFormatError,
    },

    /// Thresholding kept no tokens and the caller asked for that to fail
    #[error("No amenity occurs more than {min_count} times")]
    EmptyVocabulary { min_count: u64 },

    /// Dummy matrix rows do not line up with the listings
    #[error("Dummy matrix has {actual} rows for {expected} listings")]
    RowCountMismatch { expected: usize, actual: usize },

    /// A required listings column is absent
    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    /// A model term names a column that does not exist
    #[error("Unknown covariate: {0}")]
    UnknownCovariate(String),

    #[error("I/O error: {0}")]
    Io(#[from] IoError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Ways an amenities field can fail to parse as a delimited quoted list
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AmenityFormatError {
    #[error("expected a list wrapped in braces")]
    MissingBraces,

    #[error("unbalanced braces")]
    UnbalancedBraces,

    #[error("unbalanced double quotes")]
    UnbalancedQuotes,
}
