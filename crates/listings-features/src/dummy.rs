//! Amenity dummy matrix.

use std::collections::{HashMap, HashSet};

use crate::error::{FeatureError, Result};
use crate::vocabulary::Vocabulary;

/// Boolean feature table: one row per listing, one named column per
/// vocabulary token.
///
/// Column names and count are discovered from data, so columns are looked
/// up by name. Row `i` always describes input listing `i`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DummyMatrix {
    names: Vec<String>,
    columns: Vec<Vec<bool>>,
    index: HashMap<String, usize>,
    num_rows: usize,
}

impl DummyMatrix {
    /// Mark, for every listing and vocabulary token, whether the token is
    /// among the listing's normalized amenities (exact match).
    pub fn build(vocabulary: &Vocabulary, sequences: &[Vec<String>]) -> Result<Self> {
        let names: Vec<String> = vocabulary.tokens().map(|t| t.to_string()).collect();
        let mut columns = vec![Vec::with_capacity(sequences.len()); names.len()];

        for tokens in sequences {
            let present: HashSet<&str> = tokens.iter().map(|t| t.as_str()).collect();
            for (column, name) in columns.iter_mut().zip(&names) {
                column.push(present.contains(name.as_str()));
            }
        }

        let matrix = Self {
            index: names.iter().cloned().enumerate().map(|(i, n)| (n, i)).collect(),
            names,
            columns,
            num_rows: sequences.len(),
        };
        matrix.check_rows(sequences.len())?;
        Ok(matrix)
    }

    /// Every column must hold one value per listing
    fn check_rows(&self, expected: usize) -> Result<()> {
        let mismatch = std::iter::once(self.num_rows)
            .chain(self.columns.iter().map(|c| c.len()))
            .find(|&len| len != expected);

        match mismatch {
            Some(actual) => Err(FeatureError::RowCountMismatch { expected, actual }),
            None => Ok(()),
        }
    }

    /// Column values for a token
    pub fn column(&self, name: &str) -> Option<&[bool]> {
        self.index.get(name).map(|&i| self.columns[i].as_slice())
    }

    /// One listing's flags, in column order
    pub fn row(&self, row: usize) -> Option<Vec<bool>> {
        (row < self.num_rows).then(|| self.columns.iter().map(|c| c[row]).collect())
    }

    pub fn column_names(&self) -> &[String] {
        &self.names
    }

    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// Consume into `(name, values)` pairs in column order
    pub fn into_columns(self) -> impl Iterator<Item = (String, Vec<bool>)> {
        self.names.into_iter().zip(self.columns)
    }
}
