//! Error types for validation failures.
//!
//! [`Issue`] describes one located failure; [`ZodError`] aggregates the issues of a
//! failed parse. [`ParseIntoError`] covers
//! [`SchemaLike::parse_into`](crate::SchemaLike::parse_into), which can also fail
//! after validation when the value does not fit the target type.

mod issue;
mod zod_error;

pub use issue::{Issue, IssueCode};
pub use zod_error::{FormattedIssue, ZodError};

use thiserror::Error;

/// Failure of [`SchemaLike::parse_into`](crate::SchemaLike::parse_into).
#[derive(Debug, Error)]
pub enum ParseIntoError {
    /// The input did not satisfy the schema.
    #[error(transparent)]
    Invalid(#[from] ZodError),
    /// The validated value could not be deserialized into the requested type.
    #[error("validated value does not match the target type: {0}")]
    Shape(#[from] serde_json::Error),
}
