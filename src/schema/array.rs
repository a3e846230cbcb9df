//! Array schema validation.
//!
//! This module provides [`ArraySchema`] for validating homogeneous arrays with
//! an element schema and length constraints.

use stillwater::Validation;

use crate::error::{Issue, IssueCode, ZodError};
use crate::path::Path;
use crate::value::{Input, Value};

use super::modifiers::Modifiers;
use super::traits::SchemaLike;

/// A constraint applied to array length.
#[derive(Clone)]
enum ArrayConstraint {
    MinLength {
        min: usize,
        message: Option<String>,
    },
    MaxLength {
        max: usize,
        message: Option<String>,
    },
    Length {
        len: usize,
        message: Option<String>,
    },
}

/// A schema for validating arrays.
///
/// Every element is validated against the element schema, and all failing
/// elements are reported together. The first violated length constraint is
/// reported at the array's own path, before any element issues.
///
/// # Example
///
/// ```rust
/// use zodic::{Schema, SchemaLike, Value};
/// use serde_json::json;
///
/// let schema = Schema::array(Schema::string()).nonempty().max(10);
///
/// assert!(schema.parse(&Value::from(json!(["hello", "world"]))).is_ok());
/// assert!(schema.parse(&Value::from(json!([]))).is_err());
///
/// let error = schema.parse(&Value::from(json!(["a", 1, "b"]))).unwrap_err();
/// assert_eq!(error.len(), 1);
/// assert_eq!(error.first().path.to_string(), "[1]");
/// ```
#[derive(Clone)]
pub struct ArraySchema<S> {
    element: S,
    constraints: Vec<ArrayConstraint>,
    type_error_message: Option<String>,
    modifiers: Modifiers,
}

impl<S: SchemaLike> ArraySchema<S> {
    pub fn new(element: S) -> Self {
        Self {
            element,
            constraints: Vec::new(),
            type_error_message: None,
            modifiers: Modifiers::default(),
        }
    }

    /// The schema applied to each element.
    pub fn element(&self) -> &S {
        &self.element
    }

    /// Requires at least `min` elements.
    pub fn min(mut self, min: usize) -> Self {
        self.constraints.push(ArrayConstraint::MinLength { min, message: None });
        self
    }

    /// Requires at most `max` elements.
    pub fn max(mut self, max: usize) -> Self {
        self.constraints.push(ArrayConstraint::MaxLength { max, message: None });
        self
    }

    /// Requires exactly `len` elements.
    pub fn length(mut self, len: usize) -> Self {
        self.constraints.push(ArrayConstraint::Length { len, message: None });
        self
    }

    /// Requires at least one element. Shorthand for `min(1)`.
    pub fn nonempty(self) -> Self {
        self.min(1)
    }

    /// Sets a custom error message for the most recent constraint.
    ///
    /// If no constraints have been added yet, this sets the type error message.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        if let Some(last) = self.constraints.last_mut() {
            match last {
                ArrayConstraint::MinLength { message: m, .. }
                | ArrayConstraint::MaxLength { message: m, .. }
                | ArrayConstraint::Length { message: m, .. } => *m = Some(message.into()),
            }
        } else {
            self.type_error_message = Some(message.into());
        }
        self
    }
}

impl<S: SchemaLike> SchemaLike for ArraySchema<S> {
    fn parse_value(&self, value: &Value, path: &Path) -> Validation<Value, ZodError> {
        let items = match value.as_array() {
            Some(items) => items,
            None => {
                let mut issue = Issue::invalid_type(path, "array", value);
                if let Some(message) = &self.type_error_message {
                    issue = issue.with_message(message.clone());
                }
                return Validation::Failure(ZodError::single(issue));
            }
        };

        let mut issues: Vec<Issue> = self
            .constraints
            .iter()
            .find_map(|c| check_constraint(c, items.len(), path))
            .map(|issue| issue.with_received(value.clone()))
            .into_iter()
            .collect();

        let mut validated = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            match self
                .element
                .evaluate(Input::Present(item), &path.push_index(index))
            {
                Validation::Success(v) => validated.push(v),
                Validation::Failure(e) => issues.extend(e),
            }
        }

        match ZodError::from_issues(issues) {
            Some(errors) => Validation::Failure(errors),
            None => Validation::Success(Value::Array(validated)),
        }
    }

    fn modifiers(&self) -> &Modifiers {
        &self.modifiers
    }

    fn modifiers_mut(&mut self) -> &mut Modifiers {
        &mut self.modifiers
    }
}

fn check_constraint(constraint: &ArrayConstraint, len: usize, path: &Path) -> Option<Issue> {
    match constraint {
        ArrayConstraint::MinLength { min, message } => (len < *min).then(|| {
            let msg = message
                .clone()
                .unwrap_or_else(|| format!("Array must contain at least {} elements", min));
            Issue::new(path.clone(), IssueCode::TooSmall, msg)
                .with_expected(format!("at least {} elements", min))
        }),
        ArrayConstraint::MaxLength { max, message } => (len > *max).then(|| {
            let msg = message
                .clone()
                .unwrap_or_else(|| format!("Array must contain at most {} elements", max));
            Issue::new(path.clone(), IssueCode::TooBig, msg)
                .with_expected(format!("at most {} elements", max))
        }),
        ArrayConstraint::Length { len: expected, message } => (len != *expected).then(|| {
            let msg = message
                .clone()
                .unwrap_or_else(|| format!("Array must contain exactly {} elements", expected));
            let code = if len < *expected {
                IssueCode::TooSmall
            } else {
                IssueCode::TooBig
            };
            Issue::new(path.clone(), code, msg)
                .with_expected(format!("exactly {} elements", expected))
        }),
    }
}
