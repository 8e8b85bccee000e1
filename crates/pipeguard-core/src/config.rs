use crate::error::ConfigError;
use crate::risk_score::{RiskThresholds, Scorer, SeverityWeights};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default config file name looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = ".pipeguard.toml";

/// Configuration loaded from `.pipeguard.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct LinterConfig {
    #[serde(default)]
    pub scoring: ScoringConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ScoringConfig {
    /// Points added per finding, by severity
    #[serde(default)]
    pub weights: SeverityWeights,

    /// Inclusive upper bounds of the LOW and MEDIUM risk brackets
    #[serde(default)]
    pub thresholds: RiskThresholds,
}

impl LinterConfig {
    /// Parse and validate configuration from TOML text.
    pub fn from_toml(content: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: LinterConfig = toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config
            .scoring
            .thresholds
            .validate()
            .map_err(ConfigError::Invalid)?;
        Ok(config)
    }

    pub fn scorer(&self) -> Scorer {
        Scorer::with_settings(
            self.scoring.weights.clone(),
            self.scoring.thresholds.clone(),
        )
    }
}

/// Load configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<LinterConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    LinterConfig::from_toml(&content, path)
}

/// Generate a starter config file.
pub fn generate_default_config() -> String {
    r#"# PipeGuard Configuration

[scoring.weights]
# Points added to the score for each finding of a given severity
high = 30
medium = 15
low = 5

[scoring.thresholds]
# Scores up to low_max are LOW risk, up to medium_max MEDIUM, above that HIGH
low_max = 30
medium_max = 70
"#
    .to_string()
}
