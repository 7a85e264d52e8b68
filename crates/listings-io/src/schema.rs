//! Schema and column types for listings tables

use serde::{Deserialize, Serialize};

/// Schema describing the columns of a listings table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataSchema {
    /// Column descriptors, in file order
    pub columns: Vec<ColumnDescriptor>,

    /// Number of records
    pub num_records: usize,
}

impl DataSchema {
    /// Create a new schema
    pub fn new(columns: Vec<ColumnDescriptor>, num_records: usize) -> Self {
        Self {
            columns,
            num_records,
        }
    }

    /// Get a column by name
    pub fn column(&self, name: &str) -> Option<&ColumnDescriptor> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Get column index by name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Get column names
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Number of columns
    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }
}

/// Descriptor for a column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    /// Column name
    pub name: String,

    /// Data type
    pub dtype: ColumnType,

    /// Whether any value in the column is missing
    pub nullable: bool,
}

impl ColumnDescriptor {
    /// Create a new column descriptor
    pub fn new(name: impl Into<String>, dtype: ColumnType) -> Self {
        Self {
            name: name.into(),
            dtype,
            nullable: true,
        }
    }

    /// Set nullable
    pub fn with_nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }
}

/// Column data type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnType {
    Float64,
    Int64,
    Bool,
    Text,
}

impl ColumnType {
    /// Check if this is a numeric type
    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnType::Float64 | ColumnType::Int64)
    }

    pub fn name(&self) -> &'static str {
        match self {
            ColumnType::Float64 => "float64",
            ColumnType::Int64 => "int64",
            ColumnType::Bool => "bool",
            ColumnType::Text => "text",
        }
    }
}

/// A column of data. Missing values are `None` (NaN for `Float64`).
#[derive(Debug, Clone, PartialEq)]
pub enum DataColumn {
    Float64(Vec<f64>),
    Int64(Vec<Option<i64>>),
    Bool(Vec<Option<bool>>),
    Text(Vec<Option<String>>),
}

impl DataColumn {
    /// Get the column type
    pub fn dtype(&self) -> ColumnType {
        match self {
            DataColumn::Float64(_) => ColumnType::Float64,
            DataColumn::Int64(_) => ColumnType::Int64,
            DataColumn::Bool(_) => ColumnType::Bool,
            DataColumn::Text(_) => ColumnType::Text,
        }
    }

    /// Get the number of elements
    pub fn len(&self) -> usize {
        match self {
            DataColumn::Float64(v) => v.len(),
            DataColumn::Int64(v) => v.len(),
            DataColumn::Bool(v) => v.len(),
            DataColumn::Text(v) => v.len(),
        }
    }

    /// Check if the column is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Build a fully populated boolean column
    pub fn from_bools(values: Vec<bool>) -> Self {
        DataColumn::Bool(values.into_iter().map(Some).collect())
    }

    /// Number of missing values
    pub fn missing_count(&self) -> usize {
        match self {
            DataColumn::Float64(v) => v.iter().filter(|x| x.is_nan()).count(),
            DataColumn::Int64(v) => v.iter().filter(|x| x.is_none()).count(),
            DataColumn::Bool(v) => v.iter().filter(|x| x.is_none()).count(),
            DataColumn::Text(v) => v.iter().filter(|x| x.is_none()).count(),
        }
    }

    /// Convert to f64 (for numeric types), with NaN for missing values
    pub fn to_f64(&self) -> Option<Vec<f64>> {
        match self {
            DataColumn::Float64(v) => Some(v.clone()),
            DataColumn::Int64(v) => Some(
                v.iter()
                    .map(|x| x.map(|x| x as f64).unwrap_or(f64::NAN))
                    .collect(),
            ),
            _ => None,
        }
    }

    /// Render one cell the way it is written back to delimited text
    pub fn cell(&self, row: usize) -> Option<String> {
        match self {
            DataColumn::Float64(v) => v
                .get(row)
                .filter(|x| !x.is_nan())
                .map(|x| x.to_string()),
            DataColumn::Int64(v) => v.get(row).copied().flatten().map(|x| x.to_string()),
            DataColumn::Bool(v) => v.get(row).copied().flatten().map(|x| x.to_string()),
            DataColumn::Text(v) => v.get(row).cloned().flatten(),
        }
    }
}
