//! Read-only token cursor over jsonb-merge documents.
//!
//! A [`Cursor`] walks an object or array in stored order and yields
//! [`Token`]s: container boundaries, keys, scalar values, and (when asked to
//! skip nested containers) opaque [`ContainerRef`] handles. Object entries
//! come out in canonical key order because that is how objects store them.

pub mod cursor;
pub mod token;

pub use cursor::{Cursor, Tokens};
pub use token::{ContainerRef, Token};
