//! Merge engine for jsonb-merge.
//!
//! Deep-merges two documents: objects merge key by key and recursively,
//! arrays under the same key optionally concatenate, and every other
//! conflict resolves in favour of the second document.
//!
//! Objects keep their keys in canonical order, so the default
//! [`JoinStrategy::SortedJoin`] merges two objects in a single linear pass.
//!
//! # Key Types
//!
//! - [`Merger`] — Configured engine; re-entrant and shareable across threads
//! - [`MergeConfig`] / [`JoinStrategy`] — Array handling and key join algorithm
//! - [`MergeStats`] — Per-call counters
//!
//! # Example
//!
//! ```
//! use jbm_types::Document;
//! use serde_json::json;
//!
//! let a = Document::from(json!({"a": {"x": 1, "y": 2}}));
//! let b = Document::from(json!({"a": {"y": 3, "z": 4}}));
//! let merged = jbm_merge::merge(Some(&a), Some(&b));
//! assert_eq!(merged, Some(Document::from(json!({"a": {"x": 1, "y": 3, "z": 4}}))));
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod stats;

pub use config::{JoinStrategy, MergeConfig};
pub use engine::Merger;
pub use error::{ConfigError, ConfigResult};
pub use stats::MergeStats;

use jbm_types::Document;

/// Merge two possibly absent documents with array concatenation enabled.
pub fn merge(a: Option<&Document>, b: Option<&Document>) -> Option<Document> {
    merge_with_option(a, b, true)
}

/// Merge two possibly absent documents, choosing whether arrays under the
/// same key concatenate (`true`) or the second replaces the first (`false`).
pub fn merge_with_option(
    a: Option<&Document>,
    b: Option<&Document>,
    merge_arrays: bool,
) -> Option<Document> {
    Merger::new(MergeConfig::default().with_merge_arrays(merge_arrays)).merge(a, b)
}
