//! Table reader trait and I/O errors
//!
//! The `TableReader` trait provides a uniform interface for loading a
//! listings dataset regardless of its delimited-text flavour.

use crate::schema::DataSchema;
use crate::table::ListingTable;
use thiserror::Error;

/// Errors that can occur during I/O operations
#[derive(Debug, Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Failed to open file: {0}")]
    OpenFailed(String),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Malformed record {record}: {reason}")]
    MalformedRecord { record: usize, reason: String },

    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    #[error("Duplicate column: {0}")]
    DuplicateColumn(String),

    #[error("Type mismatch for column {column}: expected {expected}, got {actual}")]
    TypeMismatch {
        column: String,
        expected: String,
        actual: String,
    },

    #[error("Column {column} has {actual} rows, table has {expected}")]
    LengthMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },

    #[error("I/O error: {0}")]
    Io(String),
}

/// Result type for I/O operations
pub type IoResult<T> = Result<T, IoError>;

/// Trait for loading a listings table from a file
pub trait TableReader {
    /// Read the schema (column names, inferred types, record count)
    fn read_schema(&self) -> IoResult<DataSchema>;

    /// Read every record, preserving file order
    fn read_table(&self) -> IoResult<ListingTable>;

    /// Get the file path (if applicable)
    fn path(&self) -> Option<&str> {
        None
    }

    /// Get the format name
    fn format_name(&self) -> &'static str;
}

/// A boxed reader for dynamic dispatch
pub type BoxedReader = Box<dyn TableReader>;

/// Open a file and return an appropriate reader
///
/// The format is auto-detected from the file extension.
pub fn open_file(path: &str) -> IoResult<BoxedReader> {
    let extension = path
        .rsplit('.')
        .next()
        .map(|s| s.to_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        #[cfg(feature = "csv")]
        "csv" => {
            use crate::csv_reader::CsvReader;
            Ok(Box::new(CsvReader::open(path)?))
        }

        #[cfg(feature = "csv")]
        "tsv" => {
            use crate::csv_reader::{CsvOptions, CsvReader};
            let options = CsvOptions {
                delimiter: b'\t',
                ..CsvOptions::default()
            };
            Ok(Box::new(CsvReader::open_with_options(path, options)?))
        }

        _ => Err(IoError::InvalidFormat(format!(
            "Unknown file extension: {}",
            extension
        ))),
    }
}

/// List supported file extensions
pub fn supported_extensions() -> Vec<&'static str> {
    let mut extensions = Vec::new();

    #[cfg(feature = "csv")]
    {
        extensions.push("csv");
        extensions.push("tsv");
    }

    extensions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supported_extensions() {
        let extensions = supported_extensions();
        #[cfg(feature = "csv")]
        assert!(extensions.contains(&"csv"));
        assert!(!extensions.contains(&"parquet"));
    }

    #[test]
    fn test_unknown_extension_rejected() {
        match open_file("listings.parquet") {
            Err(IoError::InvalidFormat(msg)) => assert!(msg.contains("parquet")),
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("parquet should not be accepted"),
        }
    }
}
