//! Enum schema validation.

use stillwater::Validation;

use crate::error::{Issue, IssueCode, ZodError};
use crate::path::Path;
use crate::value::Value;

use super::modifiers::Modifiers;
use super::traits::SchemaLike;

/// A schema that accepts one of a fixed, ordered set of values.
///
/// Members may be of mixed kinds. Matching uses the same kind-aware equality
/// as [`LiteralSchema`](super::LiteralSchema).
///
/// # Example
///
/// ```rust
/// use zodic::{Schema, SchemaLike, Value};
///
/// let schema = Schema::enum_(["red", "green", "blue"]);
///
/// assert!(schema.parse(&Value::from("green")).is_ok());
///
/// let error = schema.parse(&Value::from("yellow")).unwrap_err();
/// assert_eq!(
///     error.first().message,
///     r#"Expected one of ["red", "green", "blue"], received "yellow""#
/// );
/// ```
#[derive(Clone)]
pub struct EnumSchema {
    values: Vec<Value>,
    message: Option<String>,
    modifiers: Modifiers,
}

impl EnumSchema {
    pub fn new<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self {
            values: values.into_iter().map(Into::into).collect(),
            message: None,
            modifiers: Modifiers::default(),
        }
    }

    /// The allowed values in declaration order.
    pub fn options(&self) -> &[Value] {
        &self.values
    }

    pub fn error(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    fn describe(&self) -> String {
        let members: Vec<String> = self.values.iter().map(Value::to_string).collect();
        format!("[{}]", members.join(", "))
    }
}

impl SchemaLike for EnumSchema {
    fn parse_value(&self, value: &Value, path: &Path) -> Validation<Value, ZodError> {
        if let Some(member) = self.values.iter().find(|member| member.same_as(value)) {
            return Validation::Success(member.clone());
        }
        let allowed = self.describe();
        let message = self
            .message
            .clone()
            .unwrap_or_else(|| format!("Expected one of {}, received {}", allowed, value));
        Validation::Failure(ZodError::single(
            Issue::new(path.clone(), IssueCode::InvalidEnumValue, message)
                .with_received(value.clone())
                .with_expected(allowed),
        ))
    }

    fn modifiers(&self) -> &Modifiers {
        &self.modifiers
    }

    fn modifiers_mut(&mut self) -> &mut Modifiers {
        &mut self.modifiers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unwrap_failure<T: std::fmt::Debug, E>(v: Validation<T, E>) -> E {
        v.into_result().unwrap_err()
    }

    #[test]
    fn test_accepts_members() {
        let schema = EnumSchema::new(["admin", "user", "guest"]);
        for member in ["admin", "user", "guest"] {
            assert!(schema
                .parse_value(&Value::from(member), &Path::root())
                .is_success());
        }
    }

    #[test]
    fn test_rejects_non_members() {
        let schema = EnumSchema::new(["admin", "user"]);

        let errors = unwrap_failure(schema.parse_value(&Value::from("root"), &Path::root()));
        assert_eq!(errors.first().code, IssueCode::InvalidEnumValue);
        assert_eq!(errors.first().expected.as_deref(), Some(r#"["admin", "user"]"#));
        assert!(schema.parse_value(&Value::Int(1), &Path::root()).is_failure());
    }

    #[test]
    fn test_mixed_kinds() {
        let schema = EnumSchema::new(vec![Value::Int(1), Value::from("one"), Value::Bool(true)]);

        assert!(schema.parse_value(&Value::Int(1), &Path::root()).is_success());
        assert!(schema.parse_value(&Value::from("one"), &Path::root()).is_success());
        assert!(schema.parse_value(&Value::Bool(true), &Path::root()).is_success());
        assert!(schema.parse_value(&Value::Int(2), &Path::root()).is_failure());
        assert!(schema.parse_value(&Value::from("1"), &Path::root()).is_failure());
    }

    #[test]
    fn test_options_keep_order() {
        let schema = EnumSchema::new(["b", "a", "c"]);
        let options: Vec<_> = schema.options().iter().filter_map(Value::as_str).collect();
        assert_eq!(options, vec!["b", "a", "c"]);
    }
}
