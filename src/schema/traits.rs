//! The schema trait: the parse pipeline and the chain methods every schema shares.
//!
//! Concrete schemas implement two things: [`SchemaLike::parse_value`], the type
//! check plus type-specific constraints, and access to their [`Modifiers`].
//! Everything else (absence and null resolution, refine/transform steps, the
//! public entry points and the shared builder methods) is provided here.

use std::fmt::Display;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use stillwater::Validation;

use crate::error::{Issue, IssueCode, ParseIntoError, ZodError};
use crate::path::Path;
use crate::result::ParseResult;
use crate::value::{Input, Value};

use super::combinators::UnionSchema;
use super::modifiers::{fallible, infallible, Modifiers};

/// A schema that validates and parses [`Value`]s.
///
/// The `Send + Sync` bounds let schemas be shared across threads and stored as
/// `Arc<dyn SchemaLike>` inside objects, arrays and unions. Parsing never
/// mutates the schema.
///
/// # Example
///
/// ```rust
/// use zodic::{Schema, SchemaLike, Value};
///
/// let schema = Schema::string()
///     .min(3)
///     .transform(|v| match v {
///         Value::String(s) => Value::String(s.to_uppercase()),
///         other => other,
///     });
///
/// assert_eq!(schema.parse(&Value::from("hello")).unwrap(), Value::from("HELLO"));
/// assert!(schema.parse(&Value::from("hi")).is_err());
/// ```
pub trait SchemaLike: Send + Sync {
    /// Checks the kind of a present, non-resolved value and applies the
    /// schema's own constraints in the order they were added.
    fn parse_value(&self, value: &Value, path: &Path) -> Validation<Value, ZodError>;

    fn modifiers(&self) -> &Modifiers;

    fn modifiers_mut(&mut self) -> &mut Modifiers;

    /// Runs the full pipeline for one value at `path`.
    ///
    /// Collection schemas call this on their children with an extended path.
    fn evaluate(&self, raw: Input<'_>, path: &Path) -> Validation<Value, ZodError> {
        let modifiers = self.modifiers();
        let value = match raw {
            Input::Absent => match modifiers.default_value() {
                Some(default) => default.clone(),
                None if modifiers.is_optional() => return Validation::Success(Value::Null),
                None => {
                    return Validation::Failure(ZodError::single(
                        Issue::new(path.clone(), IssueCode::Required, "Required")
                            .with_expected("value"),
                    ));
                }
            },
            Input::Present(Value::Null) if modifiers.accepts_null() => {
                return Validation::Success(Value::Null);
            }
            Input::Present(value) => match self.parse_value(value, path) {
                Validation::Success(parsed) => parsed,
                Validation::Failure(errors) => return Validation::Failure(errors),
            },
        };
        modifiers.apply_steps(value, path)
    }

    /// Parses `raw`, returning the parsed value or every issue found.
    fn parse<'a>(&self, raw: impl Into<Input<'a>>) -> Result<Value, ZodError>
    where
        Self: Sized,
    {
        self.safe_parse(raw).into_result()
    }

    /// Parses `raw` without failing; the outcome says which way it went.
    fn safe_parse<'a>(&self, raw: impl Into<Input<'a>>) -> ParseResult
    where
        Self: Sized,
    {
        let result = ParseResult::from(self.evaluate(raw.into(), &Path::root()));
        if let ParseResult::Failure(error) = &result {
            tracing::debug!(issues = error.len(), "parse failed");
        }
        result
    }

    /// Parses `raw` and deserializes the result into `T`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use zodic::{Schema, SchemaLike, Value};
    /// use serde::Deserialize;
    /// use serde_json::json;
    ///
    /// #[derive(Deserialize)]
    /// struct User {
    ///     name: String,
    ///     age: i64,
    /// }
    ///
    /// let schema = Schema::object()
    ///     .field("name", Schema::string())
    ///     .field("age", Schema::number().int());
    ///
    /// let user: User = schema
    ///     .parse_into(&Value::from(json!({"name": "Ada", "age": 36.0})))
    ///     .unwrap();
    /// assert_eq!(user.age, 36);
    /// ```
    fn parse_into<'a, T>(&self, raw: impl Into<Input<'a>>) -> Result<T, ParseIntoError>
    where
        Self: Sized,
        T: DeserializeOwned,
    {
        let value = self.parse(raw)?;
        Ok(serde_json::from_value(value.into())?)
    }

    /// Accepts an absent value (resolving to null) and an explicit null.
    fn optional(mut self) -> Self
    where
        Self: Sized,
    {
        self.modifiers_mut().set_optional();
        self
    }

    /// Accepts an explicit null.
    fn nullable(mut self) -> Self
    where
        Self: Sized,
    {
        self.modifiers_mut().set_nullable();
        self
    }

    /// Substitutes `value` when the input is absent.
    ///
    /// The default skips the type check but still runs refine/transform steps.
    fn default(mut self, value: impl Into<Value>) -> Self
    where
        Self: Sized,
    {
        self.modifiers_mut().set_default(value.into());
        self
    }

    /// Adds a predicate; a `false` result fails with `message`.
    fn refine<F>(mut self, check: F, message: impl Into<String>) -> Self
    where
        Self: Sized,
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        self.modifiers_mut().push_refine(Arc::new(check), message.into());
        self
    }

    /// Adds a mapping applied to the value produced so far.
    fn transform<F>(mut self, f: F) -> Self
    where
        Self: Sized,
        F: Fn(Value) -> Value + Send + Sync + 'static,
    {
        self.modifiers_mut().push_transform(infallible(f));
        self
    }

    /// Adds a mapping that may fail; its error becomes a `custom` issue.
    fn try_transform<F, E>(mut self, f: F) -> Self
    where
        Self: Sized,
        F: Fn(Value) -> Result<Value, E> + Send + Sync + 'static,
        E: Display,
    {
        self.modifiers_mut().push_transform(fallible(f));
        self
    }

    /// Builds a union that tries `self` first, then `other`.
    fn or<S>(self, other: S) -> UnionSchema
    where
        Self: Sized + 'static,
        S: SchemaLike + 'static,
    {
        UnionSchema::new(vec![Arc::new(self) as Arc<dyn SchemaLike>, Arc::new(other)])
    }
}
