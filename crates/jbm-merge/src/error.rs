//! Error types for the merge crate.
//!
//! Merging itself cannot fail. Only loading a [`MergeConfig`](crate::MergeConfig)
//! can.

use std::path::PathBuf;

/// Errors that can occur while loading merge configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration text is not valid TOML for a `MergeConfig`.
    #[error("invalid merge config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Convenience alias for configuration results.
pub type ConfigResult<T> = Result<T, ConfigError>;
