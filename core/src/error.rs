//! Errors raised by the event registry and the partition engine.

use crate::geometry::GeometryError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SetsError {
    /// An event with this name is already registered; the existing one is kept.
    #[error("Set name already exists: {0}")]
    NameConflict(String),

    #[error("Unknown event: {0}")]
    UnknownEvent(String),

    #[error("No partition has been computed since the events last changed")]
    NotPartitioned,

    /// Malformed declarative input.
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

/// Result type for registry and partition operations.
pub type SetsResult<T> = Result<T, SetsError>;
