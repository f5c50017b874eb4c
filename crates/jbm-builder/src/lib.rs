//! Stack-based incremental document builder for jsonb-merge.
//!
//! The [`Builder`] accepts begin/key/value/end events, or cursor
//! [`Token`](jbm_cursor::Token)s directly, and assembles an immutable
//! [`Document`](jbm_types::Document) bottom-up. Objects come out in canonical
//! key order.

pub mod builder;

pub use builder::Builder;
