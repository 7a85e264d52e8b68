//! Ordered in-memory listings table

use crate::reader::{IoError, IoResult};
use crate::schema::{ColumnDescriptor, ColumnType, DataColumn, DataSchema};
use std::collections::{HashMap, HashSet};

/// Column-oriented table whose row order matches the source file.
///
/// Columns keep insertion order for output; lookups by name go through an
/// index. Every column holds exactly `num_rows` values.
#[derive(Debug, Clone, Default)]
pub struct ListingTable {
    names: Vec<String>,
    columns: Vec<DataColumn>,
    index: HashMap<String, usize>,
    num_rows: usize,
}

impl ListingTable {
    /// Create an empty table with a fixed row count
    pub fn with_rows(num_rows: usize) -> Self {
        Self {
            num_rows,
            ..Self::default()
        }
    }

    /// Number of rows
    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    /// Number of columns
    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// Column names in table order
    pub fn column_names(&self) -> Vec<&str> {
        self.names.iter().map(|s| s.as_str()).collect()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Get a column by name
    pub fn column(&self, name: &str) -> Option<&DataColumn> {
        self.index.get(name).map(|&i| &self.columns[i])
    }

    /// Get a column by name, failing when it is absent
    pub fn require_column(&self, name: &str) -> IoResult<&DataColumn> {
        self.column(name)
            .ok_or_else(|| IoError::ColumnNotFound(name.to_string()))
    }

    /// Borrow a text column
    pub fn text_column(&self, name: &str) -> IoResult<&[Option<String>]> {
        match self.require_column(name)? {
            DataColumn::Text(values) => Ok(values),
            other => Err(IoError::TypeMismatch {
                column: name.to_string(),
                expected: ColumnType::Text.name().to_string(),
                actual: other.dtype().name().to_string(),
            }),
        }
    }

    /// Append a column at the end of the table.
    ///
    /// The first column added to an empty, zero-row table fixes the row count.
    pub fn add_column(&mut self, name: impl Into<String>, data: DataColumn) -> IoResult<()> {
        let name = name.into();
        if self.index.contains_key(&name) {
            return Err(IoError::DuplicateColumn(name));
        }
        if self.columns.is_empty() && self.num_rows == 0 {
            self.num_rows = data.len();
        } else if data.len() != self.num_rows {
            return Err(IoError::LengthMismatch {
                column: name,
                expected: self.num_rows,
                actual: data.len(),
            });
        }

        self.index.insert(name.clone(), self.columns.len());
        self.names.push(name);
        self.columns.push(data);
        Ok(())
    }

    /// Append several columns, or none of them.
    ///
    /// Every name and length is checked before the table changes, so a clash
    /// on any column leaves the table as it was.
    pub fn add_columns<I>(&mut self, columns: I) -> IoResult<()>
    where
        I: IntoIterator<Item = (String, DataColumn)>,
    {
        let columns: Vec<(String, DataColumn)> = columns.into_iter().collect();
        let mut expected = (!self.columns.is_empty() || self.num_rows > 0).then_some(self.num_rows);
        let mut seen = HashSet::new();
        for (name, data) in &columns {
            if self.index.contains_key(name) || !seen.insert(name.as_str()) {
                return Err(IoError::DuplicateColumn(name.clone()));
            }
            match expected {
                Some(rows) if rows != data.len() => {
                    return Err(IoError::LengthMismatch {
                        column: name.clone(),
                        expected: rows,
                        actual: data.len(),
                    });
                }
                Some(_) => {}
                None => expected = Some(data.len()),
            }
        }

        for (name, data) in columns {
            self.add_column(name, data)?;
        }
        Ok(())
    }

    /// Iterate over `(name, column)` pairs in table order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &DataColumn)> {
        self.names.iter().map(|s| s.as_str()).zip(self.columns.iter())
    }

    /// Describe the table's current columns
    pub fn schema(&self) -> DataSchema {
        let columns = self
            .iter()
            .map(|(name, data)| {
                ColumnDescriptor::new(name, data.dtype()).with_nullable(data.missing_count() > 0)
            })
            .collect();
        DataSchema::new(columns, self.num_rows)
    }
}
