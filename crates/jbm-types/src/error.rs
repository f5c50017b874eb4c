use thiserror::Error;

use crate::document::Kind;

/// Errors produced when building or converting documents.
#[derive(Debug, Error, PartialEq)]
pub enum TypeError {
    #[error("number is not finite: {0}")]
    NonFiniteNumber(f64),

    #[error("expected {expected}, got {actual}")]
    UnexpectedKind { expected: Kind, actual: Kind },
}
