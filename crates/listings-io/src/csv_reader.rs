//! CSV file reader with type inference

use crate::reader::{IoError, IoResult, TableReader};
use crate::schema::{ColumnDescriptor, ColumnType, DataColumn, DataSchema};
use crate::table::ListingTable;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Options controlling how a delimited file is read
#[derive(Debug, Clone)]
pub struct CsvOptions {
    /// Field delimiter
    pub delimiter: u8,
    /// Whether the first record holds column names
    pub has_header: bool,
    /// Columns always read as text, whatever their content looks like
    pub text_columns: Vec<String>,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            has_header: true,
            text_columns: vec!["amenities".to_string()],
        }
    }
}

/// CSV file reader
pub struct CsvReader {
    path: String,
    schema: DataSchema,
    options: CsvOptions,
}

impl CsvReader {
    /// Open a CSV file
    pub fn open(path: &str) -> IoResult<Self> {
        Self::open_with_options(path, CsvOptions::default())
    }

    /// Open a CSV file with options
    pub fn open_with_options(path: &str, options: CsvOptions) -> IoResult<Self> {
        if !Path::new(path).exists() {
            return Err(IoError::FileNotFound(path.to_string()));
        }

        let (headers, cells) = read_cells(path, &options)?;
        let num_records = cells.first().map(|c| c.len()).unwrap_or(0);

        let columns = headers
            .into_iter()
            .zip(cells.iter())
            .map(|(name, values)| {
                let dtype = if options.text_columns.contains(&name) {
                    ColumnType::Text
                } else {
                    infer_type(values)
                };
                let nullable = values.iter().any(|v| v.is_none());
                ColumnDescriptor::new(name, dtype).with_nullable(nullable)
            })
            .collect();

        Ok(Self {
            path: path.to_string(),
            schema: DataSchema::new(columns, num_records),
            options,
        })
    }
}

impl TableReader for CsvReader {
    fn read_schema(&self) -> IoResult<DataSchema> {
        Ok(self.schema.clone())
    }

    fn read_table(&self) -> IoResult<ListingTable> {
        let (_, cells) = read_cells(&self.path, &self.options)?;
        if cells.len() != self.schema.num_columns() {
            return Err(IoError::InvalidFormat(format!(
                "{} changed since it was opened",
                self.path
            )));
        }

        let mut table = ListingTable::with_rows(self.schema.num_records);
        for (desc, values) in self.schema.columns.iter().zip(cells) {
            table.add_column(desc.name.clone(), parse_column(values, desc.dtype))?;
        }
        Ok(table)
    }

    fn path(&self) -> Option<&str> {
        Some(&self.path)
    }

    fn format_name(&self) -> &'static str {
        if self.options.delimiter == b'\t' {
            "TSV"
        } else {
            "CSV"
        }
    }
}

/// Read headers and every cell, column-major. Empty cells become `None`.
fn read_cells(path: &str, options: &CsvOptions) -> IoResult<(Vec<String>, Vec<Vec<Option<String>>>)> {
    let file = File::open(path).map_err(|e| IoError::OpenFailed(e.to_string()))?;
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(options.delimiter)
        .has_headers(options.has_header)
        .from_reader(BufReader::new(file));

    let mut headers: Vec<String> = if options.has_header {
        reader
            .headers()
            .map_err(|e| IoError::InvalidFormat(e.to_string()))?
            .iter()
            .map(|s| s.to_string())
            .collect()
    } else {
        Vec::new()
    };

    let mut cells: Vec<Vec<Option<String>>> = vec![Vec::new(); headers.len()];

    for (i, result) in reader.records().enumerate() {
        let record = result.map_err(|e| IoError::MalformedRecord {
            record: i,
            reason: e.to_string(),
        })?;

        if !options.has_header && i == 0 {
            headers = (0..record.len()).map(|j| format!("col_{}", j)).collect();
            cells = vec![Vec::new(); record.len()];
        }

        for (j, value) in record.iter().enumerate() {
            let value = if value.is_empty() {
                None
            } else {
                Some(value.to_string())
            };
            cells[j].push(value);
        }
    }

    Ok((headers, cells))
}

/// Infer column type from every non-missing value
fn infer_type(values: &[Option<String>]) -> ColumnType {
    let present: Vec<&str> = values.iter().filter_map(|s| s.as_deref()).collect();
    if present.is_empty() {
        return ColumnType::Text;
    }

    if present.iter().all(|s| s.parse::<i64>().is_ok()) {
        return ColumnType::Int64;
    }

    if present.iter().all(|s| s.parse::<f64>().is_ok()) {
        return ColumnType::Float64;
    }

    if present.iter().all(|s| parse_bool(s).is_some()) {
        return ColumnType::Bool;
    }

    ColumnType::Text
}

/// Listings exports spell booleans `t`/`f`
fn parse_bool(s: &str) -> Option<bool> {
    match s.to_lowercase().as_str() {
        "t" | "true" | "yes" => Some(true),
        "f" | "false" | "no" => Some(false),
        _ => None,
    }
}

/// Parse column values into a DataColumn
fn parse_column(values: Vec<Option<String>>, dtype: ColumnType) -> DataColumn {
    match dtype {
        ColumnType::Float64 => DataColumn::Float64(
            values
                .iter()
                .map(|s| s.as_deref().and_then(|s| s.parse().ok()).unwrap_or(f64::NAN))
                .collect(),
        ),
        ColumnType::Int64 => DataColumn::Int64(
            values
                .iter()
                .map(|s| s.as_deref().and_then(|s| s.parse().ok()))
                .collect(),
        ),
        ColumnType::Bool => DataColumn::Bool(
            values
                .iter()
                .map(|s| s.as_deref().and_then(parse_bool))
                .collect(),
        ),
        ColumnType::Text => DataColumn::Text(values),
    }
}
