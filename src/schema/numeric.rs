//! Numeric schema validation.
//!
//! This module provides [`NumberSchema`] for validating integers and floats
//! with integrality, bound and sign constraints.

use std::cmp::Ordering;
use std::ops::RangeInclusive;

use stillwater::Validation;

use crate::error::{Issue, IssueCode, ZodError};
use crate::path::Path;
use crate::value::Value;

use super::modifiers::Modifiers;
use super::traits::SchemaLike;

/// `2^63` as an `f64`; every integral float strictly below it and at or
/// above its negation fits an `i64`.
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

/// A validated numeric input, kept in its original representation.
#[derive(Clone, Copy)]
enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    /// Orders this number against a float bound without rounding the integer.
    fn cmp_bound(self, bound: f64) -> Option<Ordering> {
        match self {
            Number::Float(f) => f.partial_cmp(&bound),
            Number::Int(_) if bound.is_nan() => None,
            Number::Int(_) if bound >= I64_BOUND => Some(Ordering::Less),
            Number::Int(_) if bound < -I64_BOUND => Some(Ordering::Greater),
            Number::Int(i) => {
                let whole = bound.trunc();
                // Equal integer parts: the bound's fraction decides.
                let fraction = bound - whole;
                Some(i.cmp(&(whole as i64)).then_with(|| {
                    0.0_f64.partial_cmp(&fraction).unwrap_or(Ordering::Equal)
                }))
            }
        }
    }

    /// The value as an `i64`, if it is integral and in range.
    fn as_integral(self) -> Option<i64> {
        match self {
            Number::Int(i) => Some(i),
            Number::Float(f) if f.fract() == 0.0 && (-I64_BOUND..I64_BOUND).contains(&f) => {
                Some(f as i64)
            }
            Number::Float(_) => None,
        }
    }
}

/// A constraint applied to numeric values.
#[derive(Clone)]
enum NumberConstraint {
    Int { message: Option<String> },
    Min { value: f64, message: Option<String> },
    Max { value: f64, message: Option<String> },
    Positive { message: Option<String> },
    Negative { message: Option<String> },
    NonNegative { message: Option<String> },
}

/// A schema for validating numbers.
///
/// Accepts `Value::Int` and finite `Value::Float`. Booleans are rejected even
/// though some sources treat them as numbers, as are NaN and the infinities.
/// Integer inputs stay integers; [`int`](Self::int) turns an integral float
/// such as `3.0` into `Value::Int(3)`.
///
/// # Example
///
/// ```rust
/// use zodic::{Schema, SchemaLike, Value};
///
/// let schema = Schema::number().int().min(0.0).max(100.0);
///
/// assert_eq!(schema.parse(&Value::Float(42.0)).unwrap(), Value::Int(42));
/// assert!(schema.parse(&Value::Float(4.5)).is_err());
/// assert!(schema.parse(&Value::Int(-1)).is_err());
/// assert!(schema.parse(&Value::Bool(true)).is_err());
/// ```
#[derive(Clone)]
pub struct NumberSchema {
    constraints: Vec<NumberConstraint>,
    type_error_message: Option<String>,
    modifiers: Modifiers,
}

impl NumberSchema {
    pub fn new() -> Self {
        Self {
            constraints: Vec::new(),
            type_error_message: None,
            modifiers: Modifiers::default(),
        }
    }

    /// Requires an integral value.
    ///
    /// A float with no fractional part is accepted and produced as an integer.
    pub fn int(mut self) -> Self {
        self.constraints.push(NumberConstraint::Int { message: None });
        self
    }

    /// Adds an inclusive lower bound.
    pub fn min(mut self, value: f64) -> Self {
        self.constraints.push(NumberConstraint::Min {
            value,
            message: None,
        });
        self
    }

    /// Adds an inclusive upper bound.
    pub fn max(mut self, value: f64) -> Self {
        self.constraints.push(NumberConstraint::Max {
            value,
            message: None,
        });
        self
    }

    /// Adds both bounds from an inclusive range.
    ///
    /// # Example
    ///
    /// ```rust
    /// use zodic::{Schema, SchemaLike, Value};
    ///
    /// let schema = Schema::number().range(1.0..=10.0);
    ///
    /// assert!(schema.parse(&Value::Int(1)).is_ok());
    /// assert!(schema.parse(&Value::Int(10)).is_ok());
    /// assert!(schema.parse(&Value::Float(10.5)).is_err());
    /// ```
    pub fn range(self, range: RangeInclusive<f64>) -> Self {
        let (min, max) = range.into_inner();
        self.min(min).max(max)
    }

    /// Requires a value strictly greater than zero.
    pub fn positive(mut self) -> Self {
        self.constraints.push(NumberConstraint::Positive { message: None });
        self
    }

    /// Requires a value strictly less than zero.
    pub fn negative(mut self) -> Self {
        self.constraints.push(NumberConstraint::Negative { message: None });
        self
    }

    /// Requires a value greater than or equal to zero.
    pub fn nonnegative(mut self) -> Self {
        self.constraints.push(NumberConstraint::NonNegative { message: None });
        self
    }

    /// Sets a custom error message for the most recent constraint.
    ///
    /// If no constraints have been added yet, this sets the type error message.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        if let Some(last) = self.constraints.last_mut() {
            match last {
                NumberConstraint::Int { message: m }
                | NumberConstraint::Min { message: m, .. }
                | NumberConstraint::Max { message: m, .. }
                | NumberConstraint::Positive { message: m }
                | NumberConstraint::Negative { message: m }
                | NumberConstraint::NonNegative { message: m } => *m = Some(message.into()),
            }
        } else {
            self.type_error_message = Some(message.into());
        }
        self
    }

    fn type_issue(&self, path: &Path, value: &Value) -> Issue {
        let issue = Issue::invalid_type(path, "number", value);
        match &self.type_error_message {
            Some(message) => issue.with_message(message.clone()),
            None => issue,
        }
    }
}

impl Default for NumberSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaLike for NumberSchema {
    fn parse_value(&self, value: &Value, path: &Path) -> Validation<Value, ZodError> {
        let n = match value {
            Value::Int(i) => Number::Int(*i),
            Value::Float(f) if f.is_nan() => {
                let issue = self
                    .type_issue(path, value)
                    .with_message(self.type_error_message.clone().unwrap_or_else(|| {
                        "Number cannot be NaN".to_string()
                    }));
                return Validation::Failure(ZodError::single(issue));
            }
            Value::Float(f) if f.is_infinite() => {
                let issue = self
                    .type_issue(path, value)
                    .with_message(self.type_error_message.clone().unwrap_or_else(|| {
                        "Number cannot be infinite".to_string()
                    }));
                return Validation::Failure(ZodError::single(issue));
            }
            Value::Float(f) => Number::Float(*f),
            _ => return Validation::Failure(ZodError::single(self.type_issue(path, value))),
        };

        let mut output = value.clone();
        for constraint in &self.constraints {
            if let Some(issue) = check_constraint(constraint, n, path) {
                return Validation::Failure(ZodError::single(issue.with_received(value.clone())));
            }
            if matches!(constraint, NumberConstraint::Int { .. }) {
                if let Some(i) = n.as_integral() {
                    output = Value::Int(i);
                }
            }
        }
        Validation::Success(output)
    }

    fn modifiers(&self) -> &Modifiers {
        &self.modifiers
    }

    fn modifiers_mut(&mut self) -> &mut Modifiers {
        &mut self.modifiers
    }
}

/// Checks a single constraint and returns an issue if it fails.
fn check_constraint(constraint: &NumberConstraint, n: Number, path: &Path) -> Option<Issue> {
    let fail = |code: IssueCode, message: &Option<String>, default: String, expected: String| {
        Issue::new(path.clone(), code, message.clone().unwrap_or(default)).with_expected(expected)
    };
    let sign = n.cmp_bound(0.0);

    match constraint {
        NumberConstraint::Int { message } => n.as_integral().is_none().then(|| {
            fail(
                IssueCode::InvalidType,
                message,
                "Expected integer, received float".to_string(),
                "integer".to_string(),
            )
        }),
        NumberConstraint::Min { value, message } => {
            let below = n.cmp_bound(*value) == Some(Ordering::Less);
            below.then(|| {
                fail(
                    IssueCode::TooSmall,
                    message,
                    format!("Number must be greater than or equal to {}", value),
                    format!(">= {}", value),
                )
            })
        }
        NumberConstraint::Max { value, message } => {
            let above = n.cmp_bound(*value) == Some(Ordering::Greater);
            above.then(|| {
                fail(
                    IssueCode::TooBig,
                    message,
                    format!("Number must be less than or equal to {}", value),
                    format!("<= {}", value),
                )
            })
        }
        NumberConstraint::Positive { message } => (sign != Some(Ordering::Greater)).then(|| {
            fail(
                IssueCode::TooSmall,
                message,
                "Number must be positive".to_string(),
                "> 0".to_string(),
            )
        }),
        NumberConstraint::Negative { message } => (sign != Some(Ordering::Less)).then(|| {
            fail(
                IssueCode::TooBig,
                message,
                "Number must be negative".to_string(),
                "< 0".to_string(),
            )
        }),
        NumberConstraint::NonNegative { message } => (sign == Some(Ordering::Less)).then(|| {
            fail(
                IssueCode::TooSmall,
                message,
                "Number must be nonnegative".to_string(),
                ">= 0".to_string(),
            )
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unwrap_success<T, E: std::fmt::Debug>(v: Validation<T, E>) -> T {
        v.into_result().unwrap()
    }

    fn unwrap_failure<T: std::fmt::Debug, E>(v: Validation<T, E>) -> E {
        v.into_result().unwrap_err()
    }

    #[test]
    fn test_accepts_integers_and_floats() {
        let schema = NumberSchema::new();
        assert_eq!(
            unwrap_success(schema.parse_value(&Value::Int(42), &Path::root())),
            Value::Int(42)
        );
        assert_eq!(
            unwrap_success(schema.parse_value(&Value::Float(3.14), &Path::root())),
            Value::Float(3.14)
        );
        assert_eq!(
            unwrap_success(schema.parse_value(&Value::Int(-10), &Path::root())),
            Value::Int(-10)
        );
    }

    #[test]
    fn test_rejects_booleans() {
        let schema = NumberSchema::new();
        let errors = unwrap_failure(schema.parse_value(&Value::Bool(true), &Path::root()));
        assert_eq!(errors.first().code, IssueCode::InvalidType);
        assert_eq!(errors.first().message, "Expected number, received boolean");
    }

    #[test]
    fn test_rejects_non_numbers() {
        let schema = NumberSchema::new();
        assert!(schema.parse_value(&Value::from("42"), &Path::root()).is_failure());
        assert!(schema.parse_value(&Value::Null, &Path::root()).is_failure());
    }

    #[test]
    fn test_rejects_nan_and_infinity() {
        let schema = NumberSchema::new();

        let errors = unwrap_failure(schema.parse_value(&Value::Float(f64::NAN), &Path::root()));
        assert_eq!(errors.first().message, "Number cannot be NaN");

        let infinity = Value::Float(f64::INFINITY);
        let errors = unwrap_failure(schema.parse_value(&infinity, &Path::root()));
        assert_eq!(errors.first().message, "Number cannot be infinite");
        assert!(schema
            .parse_value(&Value::Float(f64::NEG_INFINITY), &Path::root())
            .is_failure());
    }

    #[test]
    fn test_int_coerces_integral_float() {
        let schema = NumberSchema::new().int();

        assert_eq!(
            unwrap_success(schema.parse_value(&Value::Float(3.0), &Path::root())),
            Value::Int(3)
        );
        assert_eq!(
            unwrap_success(schema.parse_value(&Value::Int(3), &Path::root())),
            Value::Int(3)
        );

        let errors = unwrap_failure(schema.parse_value(&Value::Float(3.14), &Path::root()));
        assert_eq!(errors.first().code, IssueCode::InvalidType);
        assert_eq!(errors.first().message, "Expected integer, received float");
    }

    #[test]
    fn test_min_max_inclusive() {
        let schema = NumberSchema::new().min(0.0).max(100.0);

        assert!(schema.parse_value(&Value::Int(0), &Path::root()).is_success());
        assert!(schema.parse_value(&Value::Int(100), &Path::root()).is_success());

        let errors = unwrap_failure(schema.parse_value(&Value::Int(-1), &Path::root()));
        assert_eq!(errors.first().code, IssueCode::TooSmall);
        assert_eq!(
            errors.first().message,
            "Number must be greater than or equal to 0"
        );

        let errors = unwrap_failure(schema.parse_value(&Value::Float(100.5), &Path::root()));
        assert_eq!(errors.first().code, IssueCode::TooBig);
    }

    #[test]
    fn test_integer_bounds_compare_exactly() {
        assert_eq!(Number::Int(3).cmp_bound(3.5), Some(Ordering::Less));
        assert_eq!(Number::Int(-3).cmp_bound(-3.5), Some(Ordering::Greater));
        assert_eq!(Number::Int(4).cmp_bound(4.0), Some(Ordering::Equal));
        assert_eq!(Number::Int(i64::MAX).cmp_bound(1e19), Some(Ordering::Less));
        assert_eq!(Number::Int(i64::MIN).cmp_bound(-1e19), Some(Ordering::Greater));
        assert_eq!(
            Number::Int((1 << 53) + 1).cmp_bound(9_007_199_254_740_992.0),
            Some(Ordering::Greater)
        );
        assert_eq!(Number::Int(0).cmp_bound(f64::NAN), None);
    }

    #[test]
    fn test_range_constraint() {
        let schema = NumberSchema::new().range(1.0..=10.0);
        assert!(schema.parse_value(&Value::Int(5), &Path::root()).is_success());
        assert!(schema.parse_value(&Value::Int(0), &Path::root()).is_failure());
        assert!(schema.parse_value(&Value::Int(11), &Path::root()).is_failure());
    }

    #[test]
    fn test_sign_constraints_at_zero() {
        assert!(NumberSchema::new()
            .positive()
            .parse_value(&Value::Int(0), &Path::root())
            .is_failure());
        assert!(NumberSchema::new()
            .negative()
            .parse_value(&Value::Int(0), &Path::root())
            .is_failure());
        assert_eq!(
            unwrap_success(
                NumberSchema::new()
                    .nonnegative()
                    .parse_value(&Value::Int(0), &Path::root())
            ),
            Value::Int(0)
        );
        assert!(NumberSchema::new()
            .negative()
            .parse_value(&Value::Float(-0.5), &Path::root())
            .is_success());
    }

    #[test]
    fn test_first_failing_constraint_wins() {
        let schema = NumberSchema::new().positive().int();

        let errors = unwrap_failure(schema.parse_value(&Value::Float(-1.5), &Path::root()));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.first().message, "Number must be positive");
    }

    #[test]
    fn test_custom_error_messages() {
        let schema = NumberSchema::new().error("must be a number");
        let errors = unwrap_failure(schema.parse_value(&Value::from("x"), &Path::root()));
        assert_eq!(errors.first().message, "must be a number");

        let schema = NumberSchema::new().min(18.0).error("too young");
        let errors = unwrap_failure(schema.parse_value(&Value::Int(12), &Path::root()));
        assert_eq!(errors.first().message, "too young");
    }

    #[test]
    fn test_path_tracking() {
        let schema = NumberSchema::new().positive();
        let path = Path::root().push_key("items").push_index(2);

        let errors = unwrap_failure(schema.parse_value(&Value::Int(-3), &path));
        assert_eq!(errors.first().path.to_string(), "items[2]");
        assert_eq!(errors.first().received, Some(Value::Int(-3)));
    }
}
