use std::path::PathBuf;
use thiserror::Error;

/// The raw workflow document could not be obtained or deserialized.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to read workflow file '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse workflow document: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Errors raised while loading a PipeGuard configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
