//! listings-features - amenity dummies for listing price models
//!
//! Loads a listings file, derives the amenity vocabulary and dummy columns,
//! cleans the regression covariates, and prints the model specifications.

mod report;

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use listings_features::{Covariates, CountingMode, FeatureConfig, FeaturePipeline, ModelSpec};
use listings_io::csv_writer::CsvWriter;
use listings_io::{open_file, TableReader};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "listings-features", version, about)]
struct Cli {
    /// Listings file (.csv or .tsv)
    input: String,

    /// Feature config (.toml or .json)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Keep tokens counted strictly more than this many times
    #[arg(long)]
    min_count: Option<u64>,

    /// How token frequency is counted
    #[arg(long, value_enum)]
    counting: Option<Counting>,

    /// Fail when no amenity passes the threshold
    #[arg(long)]
    strict: bool,

    /// Write the augmented table here (tab-separated for .tsv)
    #[arg(long, short)]
    output: Option<String>,

    /// Print the report as JSON instead of text
    #[arg(long)]
    json: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Counting {
    Occurrences,
    Listings,
}

impl From<Counting> for CountingMode {
    fn from(c: Counting) -> Self {
        match c {
            Counting::Occurrences => CountingMode::Occurrences,
            Counting::Listings => CountingMode::Listings,
        }
    }
}

impl Cli {
    fn feature_config(&self) -> Result<FeatureConfig, Box<dyn std::error::Error>> {
        let mut config = match &self.config {
            Some(path) => FeatureConfig::load(path)?,
            None => FeatureConfig::default(),
        };
        if let Some(min_count) = self.min_count {
            config.vocabulary.min_count = min_count;
        }
        if let Some(counting) = self.counting {
            config.vocabulary.counting = counting.into();
        }
        if self.strict {
            config.allow_empty_vocabulary = false;
        }
        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.feature_config()?;
    tracing::debug!(?config, "Feature configuration");

    let reader = open_file(&cli.input)?;
    let mut table = reader.read_table()?;
    tracing::info!(
        "Loaded {} listings with {} columns from {} ({})",
        table.num_rows(),
        table.num_columns(),
        cli.input,
        reader.format_name()
    );

    let pipeline = FeaturePipeline::new(config);
    let output = pipeline.augment(&mut table)?;
    let vocabulary = &output.vocabulary;
    if vocabulary.is_empty() {
        tracing::warn!(
            "No amenity passed the threshold of {}; continuing with zero amenity columns",
            pipeline.config().vocabulary.min_count
        );
    } else {
        tracing::info!("Vocabulary holds {} amenities", vocabulary.len());
    }

    let covariates = match Covariates::from_table(&table) {
        Ok(covariates) => Some(covariates),
        Err(e) => {
            tracing::warn!("Skipping covariate cleaning: {}", e);
            None
        }
    };

    let specs = ModelSpec::reference_specifications(vocabulary);
    let report = report::Report::new(&output, covariates.as_ref(), &specs);

    if let Some(covariates) = covariates {
        covariates.append_to(&mut table)?;
        for spec in &specs {
            if let Err(e) = spec.validate(table.column_names()) {
                tracing::warn!("Specification {} is not fittable: {}", spec, e);
            }
        }
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report);
    }

    if let Some(path) = &cli.output {
        CsvWriter::for_path(path).write_table(&table, path)?;
        tracing::info!("Wrote augmented table to {}", path);
    }

    Ok(())
}
