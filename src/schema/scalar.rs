//! Boolean, null and literal schemas.
//!
//! These schemas have no constraints of their own; they only check the kind
//! (or, for literals, the exact value) of the input.

use stillwater::Validation;

use crate::error::{Issue, IssueCode, ZodError};
use crate::path::Path;
use crate::value::Value;

use super::modifiers::Modifiers;
use super::traits::SchemaLike;

/// A schema that accepts `true` and `false` only.
///
/// No truthiness coercion is performed: `1`, `"true"` and null are rejected.
#[derive(Clone, Default)]
pub struct BooleanSchema {
    type_error_message: Option<String>,
    modifiers: Modifiers,
}

impl BooleanSchema {
    pub fn new() -> Self {
        Self {
            type_error_message: None,
            modifiers: Modifiers::default(),
        }
    }

    /// Sets a custom type error message.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        self.type_error_message = Some(message.into());
        self
    }
}

impl SchemaLike for BooleanSchema {
    fn parse_value(&self, value: &Value, path: &Path) -> Validation<Value, ZodError> {
        match value {
            Value::Bool(_) => Validation::Success(value.clone()),
            _ => Validation::Failure(ZodError::single(type_issue(
                path,
                "boolean",
                value,
                self.type_error_message.as_deref(),
            ))),
        }
    }

    fn modifiers(&self) -> &Modifiers {
        &self.modifiers
    }

    fn modifiers_mut(&mut self) -> &mut Modifiers {
        &mut self.modifiers
    }
}

/// A schema that accepts null only.
///
/// # Example
///
/// ```rust
/// use zodic::{Schema, SchemaLike, Value};
///
/// let schema = Schema::none();
///
/// assert_eq!(schema.parse(&Value::Null).unwrap(), Value::Null);
/// assert!(schema.parse(&Value::from("")).is_err());
/// ```
#[derive(Clone, Default)]
pub struct NullSchema {
    type_error_message: Option<String>,
    modifiers: Modifiers,
}

impl NullSchema {
    pub fn new() -> Self {
        Self {
            type_error_message: None,
            modifiers: Modifiers::default(),
        }
    }

    pub fn error(mut self, message: impl Into<String>) -> Self {
        self.type_error_message = Some(message.into());
        self
    }
}

impl SchemaLike for NullSchema {
    fn parse_value(&self, value: &Value, path: &Path) -> Validation<Value, ZodError> {
        match value {
            Value::Null => Validation::Success(Value::Null),
            _ => Validation::Failure(ZodError::single(type_issue(
                path,
                "null",
                value,
                self.type_error_message.as_deref(),
            ))),
        }
    }

    fn modifiers(&self) -> &Modifiers {
        &self.modifiers
    }

    fn modifiers_mut(&mut self) -> &mut Modifiers {
        &mut self.modifiers
    }
}

/// A schema that accepts exactly one value.
///
/// Equality is by kind and content: the literal `1` matches `1` and `1.0` but
/// never `true` or `"1"`.
///
/// # Example
///
/// ```rust
/// use zodic::{Schema, SchemaLike, Value};
///
/// let schema = Schema::literal("admin");
///
/// assert!(schema.parse(&Value::from("admin")).is_ok());
/// assert!(schema.parse(&Value::from("user")).is_err());
/// ```
#[derive(Clone)]
pub struct LiteralSchema {
    expected: Value,
    message: Option<String>,
    modifiers: Modifiers,
}

impl LiteralSchema {
    pub fn new(expected: impl Into<Value>) -> Self {
        Self {
            expected: expected.into(),
            message: None,
            modifiers: Modifiers::default(),
        }
    }

    pub fn value(&self) -> &Value {
        &self.expected
    }

    pub fn error(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl SchemaLike for LiteralSchema {
    fn parse_value(&self, value: &Value, path: &Path) -> Validation<Value, ZodError> {
        if self.expected.same_as(value) {
            return Validation::Success(self.expected.clone());
        }
        let message = self.message.clone().unwrap_or_else(|| {
            format!("Expected literal value {}, received {}", self.expected, value)
        });
        Validation::Failure(ZodError::single(
            Issue::new(path.clone(), IssueCode::InvalidLiteral, message)
                .with_received(value.clone())
                .with_expected(self.expected.to_string()),
        ))
    }

    fn modifiers(&self) -> &Modifiers {
        &self.modifiers
    }

    fn modifiers_mut(&mut self) -> &mut Modifiers {
        &mut self.modifiers
    }
}

fn type_issue(path: &Path, expected: &str, value: &Value, message: Option<&str>) -> Issue {
    let issue = Issue::invalid_type(path, expected, value);
    match message {
        Some(message) => issue.with_message(message),
        None => issue,
    }
}
