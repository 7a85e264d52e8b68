//! Normalize → vocabulary → dummy matrix, as one batch run.

use listings_io::{DataColumn, ListingTable};

use crate::config::FeatureConfig;
use crate::dummy::DummyMatrix;
use crate::error::{FeatureError, Result};
use crate::normalize::normalize_column;
use crate::vocabulary::Vocabulary;

/// Everything one pipeline run derives from the amenities column
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// Normalized tokens, one sequence per listing
    pub tokens: Vec<Vec<String>>,
    pub vocabulary: Vocabulary,
    pub matrix: DummyMatrix,
}

/// Amenity feature pipeline
#[derive(Debug, Clone, Default)]
pub struct FeaturePipeline {
    config: FeatureConfig,
}

impl FeaturePipeline {
    pub fn new(config: FeatureConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FeatureConfig {
        &self.config
    }

    /// Run over the raw amenities fields, in listing order.
    pub fn run(&self, amenities: &[Option<String>]) -> Result<PipelineOutput> {
        let tokens = normalize_column(amenities)?;

        let vocabulary = Vocabulary::build(&tokens, &self.config.vocabulary);
        if vocabulary.is_empty() && !self.config.allow_empty_vocabulary {
            return Err(FeatureError::EmptyVocabulary {
                min_count: self.config.vocabulary.min_count,
            });
        }

        let matrix = DummyMatrix::build(&vocabulary, &tokens)?;
        if matrix.num_rows() != amenities.len() {
            return Err(FeatureError::RowCountMismatch {
                expected: amenities.len(),
                actual: matrix.num_rows(),
            });
        }

        Ok(PipelineOutput {
            tokens,
            vocabulary,
            matrix,
        })
    }

    /// Run over a table's amenities column and append one boolean column per
    /// vocabulary token, named after the token.
    ///
    /// If any token collides with an existing column the table is left
    /// untouched.
    pub fn augment(&self, table: &mut ListingTable) -> Result<PipelineOutput> {
        let output = self.run(table.text_column(&self.config.amenities_column)?)?;

        let matrix = &output.matrix;
        let columns = matrix.column_names().iter().filter_map(|name| {
            matrix
                .column(name)
                .map(|values| (name.clone(), DataColumn::from_bools(values.to_vec())))
        });
        table.add_columns(columns)?;
        Ok(output)
    }
}
