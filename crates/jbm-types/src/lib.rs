//! Document model for jsonb-merge.
//!
//! Every other jsonb-merge crate depends on `jbm-types`. It defines the
//! immutable document tree that cursors read and builders produce, and the
//! canonical key order that objects keep.
//!
//! # Key Types
//!
//! - [`Document`] — Tagged document value (null, bool, number, string, array, object)
//! - [`Object`] — Canonically ordered, reference-counted key/value entries
//! - [`Array`] — Reference-counted element sequence
//! - [`Container`] — Borrowed view of an object or array
//! - [`Kind`] — Variant tag of a document
//! - [`compare_keys`] — The canonical key comparator (length, then bytes)

pub mod array;
pub mod convert;
pub mod document;
pub mod error;
pub mod key;
pub mod object;

pub use array::Array;
pub use document::{Container, Document, Kind};
pub use error::TypeError;
pub use key::{compare_keys, is_canonical};
pub use object::{canonicalize_entries, Object};
pub use serde_json::Number;
