//! Configuration for listings-features
//!
//! Controls which column holds the amenities list, how tokens are counted,
//! the frequency threshold, and the static exclusion list.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Tokens dropped from the vocabulary regardless of frequency. They are
/// artifacts of the export (empty list slots, untranslated template labels,
/// a split "half-bath/toilet" fragment), not amenities.
pub const DEFAULT_EXCLUDED_TOKENS: &[&str] = &[
    "",
    "_toilet",
    "translation_missing:_en.hosting_amenity_49",
    "translation_missing:_en.hosting_amenity_50",
];

/// Threshold used for the reference report
pub const DEFAULT_MIN_COUNT: u64 = 200;

/// Pipeline-wide configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureConfig {
    /// Name of the column holding the raw amenities list
    pub amenities_column: String,
    /// Treat an empty vocabulary as a successful, zero-column result
    pub allow_empty_vocabulary: bool,
    /// Vocabulary selection settings
    pub vocabulary: VocabularyConfig,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            amenities_column: "amenities".to_string(),
            allow_empty_vocabulary: true,
            vocabulary: VocabularyConfig::default(),
        }
    }
}

/// How token frequency is measured before thresholding
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CountingMode {
    /// Every occurrence in the flattened token multiset counts
    #[default]
    Occurrences,
    /// Each listing counts at most once per token
    Listings,
}

/// Vocabulary selection configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VocabularyConfig {
    /// A token is kept only if its count is strictly greater than this
    pub min_count: u64,
    /// Frequency semantics
    pub counting: CountingMode,
    /// Tokens never kept
    pub excluded_tokens: Vec<String>,
}

impl Default for VocabularyConfig {
    fn default() -> Self {
        Self {
            min_count: DEFAULT_MIN_COUNT,
            counting: CountingMode::default(),
            excluded_tokens: DEFAULT_EXCLUDED_TOKENS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl FeatureConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Serialize configuration to TOML
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json_str: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json_str)?)
    }

    /// Serialize configuration to JSON
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load from a `.toml` or `.json` file and validate
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Read(format!("{}: {}", path.display(), e)))?;

        let config = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json(&contents)?,
            Some("toml") => Self::from_toml(&contents)?,
            other => {
                return Err(ConfigError::UnsupportedFormat(
                    other.unwrap_or_default().to_string(),
                ))
            }
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.amenities_column.trim().is_empty() {
            return Err(ConfigError::MissingField("amenities_column".to_string()));
        }
        Ok(())
    }
}

/// Configuration loading or validation error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Read(String),

    #[error("Unsupported config format: {0:?}")]
    UnsupportedFormat(String),

    #[error("Invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Failed to write TOML: {0}")]
    TomlWrite(#[from] toml::ser::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Missing field: {0}")]
    MissingField(String),
}
