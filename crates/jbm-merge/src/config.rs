use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// How keys shared by two objects are found.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JoinStrategy {
    /// Walk both objects in lock-step over their canonical key order.
    /// O(n + m) key comparisons.
    #[default]
    SortedJoin,
    /// Walk the first object and binary-search each key in the second, then
    /// append the second object's remaining keys. O(n log m + m log n).
    /// The builder restores canonical order on close.
    Lookup,
}

/// Configuration for a [`Merger`](crate::Merger).
///
/// Every field has a default, so a TOML file only needs the fields it
/// changes:
///
/// ```toml
/// merge_arrays = false
/// strategy = "lookup"
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeConfig {
    /// Concatenate arrays found under the same key instead of letting the
    /// second one win.
    pub merge_arrays: bool,
    /// Key join algorithm used for object/object merges.
    pub strategy: JoinStrategy,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            merge_arrays: true,
            strategy: JoinStrategy::SortedJoin,
        }
    }
}

impl MergeConfig {
    pub fn with_merge_arrays(mut self, merge_arrays: bool) -> Self {
        self.merge_arrays = merge_arrays;
        self
    }

    pub fn with_strategy(mut self, strategy: JoinStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Parse a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Read and parse a TOML configuration file.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}
