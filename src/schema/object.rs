//! Object schema validation.
//!
//! This module provides [`ObjectSchema`] for validating keyed objects against a
//! set of named field schemas, with a policy for keys that are not declared.

use std::sync::Arc;

use indexmap::IndexMap;
use stillwater::Validation;

use crate::error::{Issue, IssueCode, ZodError};
use crate::path::Path;
use crate::value::{Input, Value};

use super::modifiers::Modifiers;
use super::traits::SchemaLike;

/// What happens to input keys that have no declared field.
#[derive(Clone, Default)]
pub enum UnknownKeys {
    /// Drop them from the output.
    #[default]
    Strip,
    /// Copy them into the output unchanged.
    Passthrough,
    /// Report one `unrecognized_keys` issue per key.
    Strict,
    /// Validate each value against a schema and keep the result.
    Catchall(Arc<dyn SchemaLike>),
}

impl std::fmt::Debug for UnknownKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnknownKeys::Strip => write!(f, "Strip"),
            UnknownKeys::Passthrough => write!(f, "Passthrough"),
            UnknownKeys::Strict => write!(f, "Strict"),
            UnknownKeys::Catchall(_) => write!(f, "Catchall(..)"),
        }
    }
}

/// A schema for validating objects with named fields.
///
/// Every declared field is validated, even after an earlier field has failed,
/// so a single parse reports every problem in the input. Fields keep their
/// declaration order in the output.
///
/// # Example
///
/// ```rust
/// use zodic::{Schema, SchemaLike, Value};
/// use serde_json::json;
///
/// let schema = Schema::object()
///     .field("name", Schema::string().min(1))
///     .field("age", Schema::number().int().nonnegative().optional());
///
/// let parsed = schema.parse(&Value::from(json!({"name": "John", "extra": 1}))).unwrap();
/// assert_eq!(parsed, Value::from(json!({"name": "John"})));
///
/// let error = schema.parse(&Value::from(json!({"name": "", "age": -1}))).unwrap_err();
/// assert_eq!(error.len(), 2);
/// ```
#[derive(Clone, Default)]
pub struct ObjectSchema {
    fields: IndexMap<String, Arc<dyn SchemaLike>>,
    unknown_keys: UnknownKeys,
    type_error_message: Option<String>,
    modifiers: Modifiers,
}

impl ObjectSchema {
    pub fn new() -> Self {
        Self {
            fields: IndexMap::new(),
            unknown_keys: UnknownKeys::Strip,
            type_error_message: None,
            modifiers: Modifiers::default(),
        }
    }

    /// Declares a field.
    ///
    /// Declaring a name twice replaces the earlier schema but keeps its
    /// original position. A field is required unless its schema is optional or
    /// has a default.
    pub fn field<S>(mut self, name: impl Into<String>, schema: S) -> Self
    where
        S: SchemaLike + 'static,
    {
        self.fields.insert(name.into(), Arc::new(schema));
        self
    }

    /// Adds every field of `other`, replacing same-named fields.
    ///
    /// The unknown-key policy and modifiers of `self` are kept.
    pub fn extend(mut self, other: ObjectSchema) -> Self {
        self.fields.extend(other.fields);
        self
    }

    /// Drops undeclared keys (the default).
    pub fn strip(mut self) -> Self {
        self.unknown_keys = UnknownKeys::Strip;
        self
    }

    /// Keeps undeclared keys unchanged.
    pub fn passthrough(mut self) -> Self {
        self.unknown_keys = UnknownKeys::Passthrough;
        self
    }

    /// Rejects undeclared keys.
    pub fn strict(mut self) -> Self {
        self.unknown_keys = UnknownKeys::Strict;
        self
    }

    /// Validates the values of undeclared keys against `schema`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use zodic::{Schema, SchemaLike, Value};
    /// use serde_json::json;
    ///
    /// let schema = Schema::object()
    ///     .field("id", Schema::number())
    ///     .catchall(Schema::string());
    ///
    /// assert!(schema.parse(&Value::from(json!({"id": 1, "tag": "a"}))).is_ok());
    ///
    /// let error = schema.parse(&Value::from(json!({"id": 1, "tag": 2}))).unwrap_err();
    /// assert_eq!(error.first().path.to_string(), "tag");
    /// ```
    pub fn catchall<S>(mut self, schema: S) -> Self
    where
        S: SchemaLike + 'static,
    {
        self.unknown_keys = UnknownKeys::Catchall(Arc::new(schema));
        self
    }

    /// Sets a custom message for non-object input.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        self.type_error_message = Some(message.into());
        self
    }

    /// Declared field names in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn unknown_keys(&self) -> &UnknownKeys {
        &self.unknown_keys
    }
}

impl SchemaLike for ObjectSchema {
    fn parse_value(&self, value: &Value, path: &Path) -> Validation<Value, ZodError> {
        let obj = match value.as_object() {
            Some(o) => o,
            None => {
                let mut issue = Issue::invalid_type(path, "object", value);
                if let Some(message) = &self.type_error_message {
                    issue = issue.with_message(message.clone());
                }
                return Validation::Failure(ZodError::single(issue));
            }
        };

        let mut issues = Vec::new();
        let mut validated = IndexMap::with_capacity(self.fields.len());

        for (name, schema) in &self.fields {
            let raw = Input::from(obj.get(name));
            let modifiers = schema.modifiers();
            if raw.is_absent() && modifiers.is_optional() && modifiers.default_value().is_none() {
                continue;
            }
            match schema.evaluate(raw, &path.push_key(name.as_str())) {
                Validation::Success(v) => {
                    validated.insert(name.clone(), v);
                }
                Validation::Failure(e) => issues.extend(e),
            }
        }

        for (key, raw) in obj {
            if self.fields.contains_key(key) {
                continue;
            }
            match &self.unknown_keys {
                UnknownKeys::Strip => {}
                UnknownKeys::Passthrough => {
                    validated.insert(key.clone(), raw.clone());
                }
                UnknownKeys::Strict => {
                    issues.push(
                        Issue::new(
                            path.clone(),
                            IssueCode::UnrecognizedKeys,
                            format!("Unrecognized key: {}", key),
                        )
                        .with_received(Value::String(key.clone())),
                    );
                }
                UnknownKeys::Catchall(schema) => {
                    match schema.evaluate(Input::Present(raw), &path.push_key(key.as_str())) {
                        Validation::Success(v) => {
                            validated.insert(key.clone(), v);
                        }
                        Validation::Failure(e) => issues.extend(e),
                    }
                }
            }
        }

        match ZodError::from_issues(issues) {
            Some(errors) => Validation::Failure(errors),
            None => Validation::Success(Value::Object(validated)),
        }
    }

    fn modifiers(&self) -> &Modifiers {
        &self.modifiers
    }

    fn modifiers_mut(&mut self) -> &mut Modifiers {
        &mut self.modifiers
    }
}
