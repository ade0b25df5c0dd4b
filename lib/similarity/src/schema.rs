//! Engine configuration
//!
//! Declares how much each feature category matters, how qualification scores
//! are normalized, and the confidence bonuses and boost multipliers applied
//! during ranking. Every field has a default, so a config file only needs to
//! name what it overrides.

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use unimatch_core::Category;

/// Top-level engine configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    /// Per-category importance weights
    pub weights: FeatureWeights,

    /// Highest possible qualification score; scores are divided by this
    pub max_qualification: f64,

    /// Result count used when a query does not set `top_n`
    pub default_top_n: usize,

    /// Program queries at least this long may match by substring in the eligibility filter
    pub program_substring_min_len: usize,

    pub confidence: ConfidenceBonuses,

    pub boosts: BoostFactors,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            weights: FeatureWeights::default(),
            max_qualification: 4.0,
            default_top_n: 5,
            program_substring_min_len: 4,
            confidence: ConfidenceBonuses::default(),
            boosts: BoostFactors::default(),
        }
    }
}

impl EngineConfig {
    /// Read a JSON config file and validate it
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let file = File::open(path)?;
        let config: EngineConfig = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    /// - Weights and bonuses must be finite and non-negative
    /// - `max_qualification` must be positive
    /// - Boost factors must not shrink a score
    pub fn validate(&self) -> Result<(), ConfigError> {
        for category in Category::ALL {
            check_non_negative(category_name(category), self.weights.for_category(category))?;
        }
        check_non_negative("qualification", self.weights.qualification)?;

        check_non_negative("confidence.program", self.confidence.program)?;
        check_non_negative("confidence.stream", self.confidence.stream)?;
        check_non_negative("confidence.location", self.confidence.location)?;

        if !self.max_qualification.is_finite() || self.max_qualification <= 0.0 {
            return Err(ConfigError::InvalidMaxQualification(self.max_qualification));
        }

        for (name, factor) in [("program", self.boosts.program), ("location", self.boosts.location)] {
            if !factor.is_finite() || factor < 1.0 {
                return Err(ConfigError::InvalidBoost(name.to_string()));
            }
        }

        Ok(())
    }
}

fn check_non_negative(name: &str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::NonFinite(name.to_string()));
    }
    if value < 0.0 {
        return Err(ConfigError::NegativeWeight(name.to_string()));
    }
    Ok(())
}

fn category_name(category: Category) -> &'static str {
    match category {
        Category::Program => "program",
        Category::Stream => "stream",
        Category::Location => "location",
        Category::Budget => "budget",
    }
}

/// Importance weight per feature category.
///
/// The same weight is broadcast to every dimension of its category.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FeatureWeights {
    pub program: f64,
    pub stream: f64,
    pub location: f64,
    pub budget: f64,
    pub qualification: f64,
}

impl Default for FeatureWeights {
    fn default() -> Self {
        Self {
            program: 6.0,
            stream: 3.0,
            location: 4.0,
            budget: 0.8,
            qualification: 0.5,
        }
    }
}

impl FeatureWeights {
    pub fn for_category(&self, category: Category) -> f64 {
        match category {
            Category::Program => self.program,
            Category::Stream => self.stream,
            Category::Location => self.location,
            Category::Budget => self.budget,
        }
    }
}

/// Additive confidence bonuses for categorical matches
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ConfidenceBonuses {
    pub program: f64,
    pub stream: f64,
    pub location: f64,
}

impl Default for ConfidenceBonuses {
    fn default() -> Self {
        Self {
            program: 0.10,
            stream: 0.08,
            location: 0.15,
        }
    }
}

/// Multiplicative combined-score boosts for categorical matches
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BoostFactors {
    pub program: f64,
    pub location: f64,
}

impl Default for BoostFactors {
    fn default() -> Self {
        Self {
            program: 2.0,
            location: 2.0,
        }
    }
}

/// Errors that can occur while loading or validating an [`EngineConfig`]
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Weight '{0}' is negative")]
    NegativeWeight(String),

    #[error("Value '{0}' is not a finite number")]
    NonFinite(String),

    #[error("max_qualification must be positive, got {0}")]
    InvalidMaxQualification(f64),

    #[error("Boost factor '{0}' must be at least 1.0")]
    InvalidBoost(String),

    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(String),
}
