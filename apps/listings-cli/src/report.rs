//! Text and JSON rendering of a pipeline run

use std::fmt;

use listings_features::{
    amenity_prevalence, Covariates, ModelSpec, PipelineOutput, Prevalence, SummaryStats,
    VocabularyEntry,
};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Report {
    pub listings: usize,
    pub vocabulary: Vec<VocabularyEntry>,
    pub prevalence: Vec<Prevalence>,
    pub price: Option<SummaryStats>,
    pub formulas: Vec<String>,
}

impl Report {
    pub fn new(output: &PipelineOutput, covariates: Option<&Covariates>, specs: &[ModelSpec]) -> Self {
        Self {
            listings: output.matrix.num_rows(),
            vocabulary: output.vocabulary.entries().to_vec(),
            prevalence: amenity_prevalence(&output.matrix),
            price: covariates.map(|c| SummaryStats::from_data(&c.price)),
            formulas: specs.iter().map(|s| s.render()).collect(),
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Listings: {}", self.listings)?;
        writeln!(f, "Amenities kept: {}", self.vocabulary.len())?;
        writeln!(f)?;

        writeln!(f, "{:<48} {:>10} {:>8}", "amenity", "count", "share")?;
        for (entry, prevalence) in self.vocabulary.iter().zip(&self.prevalence) {
            writeln!(
                f,
                "{:<48} {:>10} {:>7.1}%",
                entry.token,
                entry.count,
                prevalence.share * 100.0
            )?;
        }

        if let Some(price) = &self.price {
            writeln!(f)?;
            writeln!(
                f,
                "Price: n={} missing={} mean={:.2} median={:.2} sd={:.2} range=[{:.2}, {:.2}]",
                price.count, price.missing, price.mean, price.median, price.std_dev, price.min, price.max
            )?;
        }

        writeln!(f)?;
        for (i, formula) in self.formulas.iter().enumerate() {
            writeln!(f, "Model {}: {}", i + 1, formula)?;
        }
        Ok(())
    }
}
