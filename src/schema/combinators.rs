//! Union schema.
//!
//! A [`UnionSchema`] tries an ordered list of alternatives against the same
//! input. The first alternative that succeeds wins, so order is significant.
//!
//! # Example
//!
//! ```rust
//! use zodic::{Schema, SchemaLike, Value};
//!
//! let id = Schema::string().or(Schema::number());
//!
//! assert_eq!(id.parse(&Value::Int(42)).unwrap(), Value::Int(42));
//! assert_eq!(id.parse(&Value::from("42")).unwrap(), Value::from("42"));
//! assert!(id.parse(&Value::Bool(true)).is_err());
//! ```

use std::sync::Arc;

use stillwater::Validation;

use crate::error::{Issue, IssueCode, ZodError};
use crate::path::Path;
use crate::value::{Input, Value};

use super::modifiers::Modifiers;
use super::traits::SchemaLike;

/// A schema that accepts any value one of its alternatives accepts.
///
/// Each alternative runs its full pipeline, including its own optional,
/// nullable, refine and transform settings. When none match, a single
/// `invalid_union` issue is reported at the union's path.
#[derive(Clone)]
pub struct UnionSchema {
    options: Vec<Arc<dyn SchemaLike>>,
    message: Option<String>,
    modifiers: Modifiers,
}

impl UnionSchema {
    pub fn new(options: Vec<Arc<dyn SchemaLike>>) -> Self {
        Self {
            options,
            message: None,
            modifiers: Modifiers::default(),
        }
    }

    /// Appends another alternative, tried after the existing ones.
    ///
    /// Chaining `a.or(b).or(c)` builds a nested union, which behaves the same as
    /// a flat one; use this method to keep the list flat.
    pub fn option<S>(mut self, schema: S) -> Self
    where
        S: SchemaLike + 'static,
    {
        self.options.push(Arc::new(schema));
        self
    }

    pub fn options(&self) -> &[Arc<dyn SchemaLike>] {
        &self.options
    }

    /// Sets a custom message for the no-match issue.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl SchemaLike for UnionSchema {
    fn parse_value(&self, value: &Value, path: &Path) -> Validation<Value, ZodError> {
        for (index, option) in self.options.iter().enumerate() {
            match option.evaluate(Input::Present(value), path) {
                Validation::Success(parsed) => return Validation::Success(parsed),
                Validation::Failure(errors) => {
                    tracing::trace!(
                        %path,
                        option = index,
                        issues = errors.len(),
                        first = %errors.first().message,
                        "union option rejected input"
                    );
                }
            }
        }

        let message = self
            .message
            .clone()
            .unwrap_or_else(|| "Input did not match any union option".to_string());
        Validation::Failure(ZodError::single(
            Issue::new(path.clone(), IssueCode::InvalidUnion, message)
                .with_received(value.clone())
                .with_expected(format!("one of {} options", self.options.len())),
        ))
    }

    fn modifiers(&self) -> &Modifiers {
        &self.modifiers
    }

    fn modifiers_mut(&mut self) -> &mut Modifiers {
        &mut self.modifiers
    }
}
