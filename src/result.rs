//! Outcome of the non-throwing entry point.

use stillwater::Validation;

use crate::error::ZodError;
use crate::value::Value;

/// Result of [`SchemaLike::safe_parse`](crate::SchemaLike::safe_parse).
///
/// Either the parsed data or the aggregate error, never both.
///
/// # Example
///
/// ```rust
/// use zodic::{ParseResult, Schema, SchemaLike, Value};
///
/// let schema = Schema::string();
///
/// let ok = schema.safe_parse(&Value::from("hello"));
/// assert!(ok.success());
/// assert_eq!(ok.data(), Some(&Value::from("hello")));
///
/// let failed = schema.safe_parse(&Value::Int(123));
/// assert!(!failed.success());
/// assert!(matches!(failed, ParseResult::Failure(_)));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum ParseResult {
    Success(Value),
    Failure(ZodError),
}

impl ParseResult {
    pub fn success(&self) -> bool {
        matches!(self, ParseResult::Success(_))
    }

    pub fn data(&self) -> Option<&Value> {
        match self {
            ParseResult::Success(value) => Some(value),
            ParseResult::Failure(_) => None,
        }
    }

    pub fn error(&self) -> Option<&ZodError> {
        match self {
            ParseResult::Success(_) => None,
            ParseResult::Failure(error) => Some(error),
        }
    }

    pub fn into_result(self) -> Result<Value, ZodError> {
        self.into()
    }
}

impl From<Validation<Value, ZodError>> for ParseResult {
    fn from(validation: Validation<Value, ZodError>) -> Self {
        match validation {
            Validation::Success(value) => ParseResult::Success(value),
            Validation::Failure(error) => ParseResult::Failure(error),
        }
    }
}

impl From<ParseResult> for Result<Value, ZodError> {
    fn from(result: ParseResult) -> Self {
        match result {
            ParseResult::Success(value) => Ok(value),
            ParseResult::Failure(error) => Err(error),
        }
    }
}
