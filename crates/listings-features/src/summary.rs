//! Descriptive statistics for the report
//!
//! - Numeric summaries (price, counts) with missing-value accounting
//! - Amenity prevalence across listings

use serde::{Deserialize, Serialize};

use crate::dummy::DummyMatrix;

/// Summary statistics for a numeric column
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryStats {
    /// Number of finite values
    pub count: usize,
    /// Number of missing/NaN values
    pub missing: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    /// Population variance
    pub variance: f64,
    pub std_dev: f64,
    pub median: f64,
}

impl SummaryStats {
    /// Compute summary statistics, ignoring non-finite values
    pub fn from_data(data: &[f64]) -> Self {
        let mut finite: Vec<f64> = data.iter().copied().filter(|x| x.is_finite()).collect();
        let missing = data.len() - finite.len();

        if finite.is_empty() {
            return Self::empty(missing);
        }

        let count = finite.len();
        let mean = finite.iter().sum::<f64>() / count as f64;
        let variance = finite.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / count as f64;

        finite.sort_by(f64::total_cmp);
        let median = if count % 2 == 0 {
            (finite[count / 2 - 1] + finite[count / 2]) / 2.0
        } else {
            finite[count / 2]
        };

        Self {
            count,
            missing,
            min: finite[0],
            max: finite[count - 1],
            mean,
            variance,
            std_dev: variance.sqrt(),
            median,
        }
    }

    /// Statistics of an all-missing column
    fn empty(missing: usize) -> Self {
        Self {
            count: 0,
            missing,
            min: f64::NAN,
            max: f64::NAN,
            mean: f64::NAN,
            variance: f64::NAN,
            std_dev: f64::NAN,
            median: f64::NAN,
        }
    }

    pub fn range(&self) -> f64 {
        self.max - self.min
    }
}

/// Share of listings carrying one amenity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prevalence {
    pub token: String,
    pub listings: usize,
    /// `listings / total`, 0.0 for an empty table
    pub share: f64,
}

/// Prevalence of every dummy column, in column order
pub fn amenity_prevalence(matrix: &DummyMatrix) -> Vec<Prevalence> {
    let total = matrix.num_rows();
    matrix
        .column_names()
        .iter()
        .filter_map(|name| {
            let flags = matrix.column(name)?;
            let listings = flags.iter().filter(|&&f| f).count();
            Some(Prevalence {
                token: name.clone(),
                listings,
                share: if total == 0 {
                    0.0
                } else {
                    listings as f64 / total as f64
                },
            })
        })
        .collect()
}
