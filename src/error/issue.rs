//! A single located validation failure.

use std::fmt::{self, Display};

use serde::Serialize;

use crate::path::Path;
use crate::value::Value;

/// Machine-readable classification of an [`Issue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCode {
    /// The value is missing and the schema has no default and is not optional.
    Required,
    /// Wrong kind of value, or a non-integral number where an integer is required.
    InvalidType,
    /// Length or numeric lower bound violated.
    TooSmall,
    /// Length or numeric upper bound violated.
    TooBig,
    /// Regex, email or URL check failed.
    InvalidString,
    /// Unparseable or out-of-range date/datetime.
    InvalidDate,
    InvalidLiteral,
    InvalidEnumValue,
    /// No alternative of a union matched.
    InvalidUnion,
    /// Unknown key on a strict object.
    UnrecognizedKeys,
    /// Failed refinement, or an error raised by a user callback.
    Custom,
}

impl IssueCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueCode::Required => "required",
            IssueCode::InvalidType => "invalid_type",
            IssueCode::TooSmall => "too_small",
            IssueCode::TooBig => "too_big",
            IssueCode::InvalidString => "invalid_string",
            IssueCode::InvalidDate => "invalid_date",
            IssueCode::InvalidLiteral => "invalid_literal",
            IssueCode::InvalidEnumValue => "invalid_enum_value",
            IssueCode::InvalidUnion => "invalid_union",
            IssueCode::UnrecognizedKeys => "unrecognized_keys",
            IssueCode::Custom => "custom",
        }
    }
}

impl Display for IssueCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single validation failure with full context.
///
/// `Issue` captures everything a caller needs to report a failure:
/// - **path**: where in the input the failure occurred
/// - **code**: machine-readable classification
/// - **message**: human-readable description
/// - **received**: the offending value (absent when the value itself was missing)
/// - **expected**: what was expected instead, when there is a short description
///
/// # Example
///
/// ```rust
/// use zodic::{Issue, IssueCode, Path, Value};
///
/// let issue = Issue::new(
///     Path::root().push_key("email"),
///     IssueCode::InvalidString,
///     "Invalid email format",
/// )
/// .with_received(Value::from("not-an-email"))
/// .with_expected("email");
///
/// assert_eq!(issue.code, IssueCode::InvalidString);
/// assert_eq!(issue.to_string(), "email: Invalid email format");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Issue {
    pub path: Path,
    pub code: IssueCode,
    pub message: String,
    pub received: Option<Value>,
    pub expected: Option<String>,
}

impl Issue {
    pub fn new(path: Path, code: IssueCode, message: impl Into<String>) -> Self {
        Self {
            path,
            code,
            message: message.into(),
            received: None,
            expected: None,
        }
    }

    /// Builds the standard kind-mismatch issue.
    pub fn invalid_type(path: &Path, expected: &str, received: &Value) -> Self {
        Issue::new(
            path.clone(),
            IssueCode::InvalidType,
            format!("Expected {}, received {}", expected, received.kind()),
        )
        .with_received(received.clone())
        .with_expected(expected)
    }

    pub fn with_received(mut self, received: Value) -> Self {
        self.received = Some(received);
        self
    }

    pub fn with_expected(mut self, expected: impl Into<String>) -> Self {
        self.expected = Some(expected.into());
        self
    }

    /// Replaces the message, keeping everything else.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }
}

impl Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_root() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

impl std::error::Error for Issue {}
