//! String schema validation.
//!
//! This module provides [`StringSchema`] for validating string values with
//! length, pattern, email and URL constraints.

use std::sync::OnceLock;

use regex::Regex;
use stillwater::Validation;
use url::Url;

use crate::error::{Issue, IssueCode, ZodError};
use crate::path::Path;
use crate::value::Value;

use super::modifiers::Modifiers;
use super::traits::SchemaLike;

/// A constraint applied to string values.
#[derive(Clone)]
enum StringConstraint {
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
    Pattern {
        regex: Regex,
        message: Option<String>,
    },
    Email {
        message: Option<String>,
    },
    Url {
        message: Option<String>,
    },
}

/// A schema for validating string values.
///
/// `StringSchema` validates that values are strings and applies its constraints
/// in the order they were added. The first violated constraint is reported.
///
/// # Example
///
/// ```rust
/// use zodic::{Schema, SchemaLike, Value};
///
/// let schema = Schema::string().min(5).max(50).email();
///
/// assert!(schema.parse(&Value::from("test@example.com")).is_ok());
///
/// // Too short wins over "not an email" because min was added first
/// let error = schema.parse(&Value::from("ab")).unwrap_err();
/// assert_eq!(error.len(), 1);
/// assert!(error.to_string().contains("at least 5 characters"));
/// ```
#[derive(Clone)]
pub struct StringSchema {
    constraints: Vec<StringConstraint>,
    type_error_message: Option<String>,
    modifiers: Modifiers,
}

impl StringSchema {
    pub fn new() -> Self {
        Self {
            constraints: Vec::new(),
            type_error_message: None,
            modifiers: Modifiers::default(),
        }
    }

    /// Requires at least `min` characters (Unicode scalar values).
    pub fn min(mut self, min: usize) -> Self {
        self.constraints.push(StringConstraint::MinLength { min, message: None });
        self
    }

    /// Requires at most `max` characters.
    pub fn max(mut self, max: usize) -> Self {
        self.constraints.push(StringConstraint::MaxLength { max, message: None });
        self
    }

    /// Requires exactly `len` characters.
    pub fn length(mut self, len: usize) -> Self {
        self.constraints.push(StringConstraint::Length { len, message: None });
        self
    }

    /// Requires the string to match a regex pattern.
    ///
    /// Returns an error if the pattern does not compile.
    ///
    /// # Example
    ///
    /// ```rust
    /// use zodic::{Schema, SchemaLike, Value};
    ///
    /// let schema = Schema::string().regex(r"^[A-Z]{2,3}$").unwrap();
    ///
    /// assert!(schema.parse(&Value::from("XYZ")).is_ok());
    /// assert!(schema.parse(&Value::from("abc")).is_err());
    /// ```
    pub fn regex(mut self, pattern: &str) -> Result<Self, regex::Error> {
        let regex = Regex::new(pattern)?;
        self.constraints.push(StringConstraint::Pattern {
            regex,
            message: None,
        });
        Ok(self)
    }

    /// Requires a structurally valid email address: a non-empty local part,
    /// `@`, and a domain of two or more non-empty dot-separated labels.
    pub fn email(mut self) -> Self {
        self.constraints.push(StringConstraint::Email { message: None });
        self
    }

    /// Requires an `http` or `https` URL with a non-empty host.
    pub fn url(mut self) -> Self {
        self.constraints.push(StringConstraint::Url { message: None });
        self
    }

    /// Sets a custom error message for the most recent constraint.
    ///
    /// If no constraints have been added yet, this sets the type error message
    /// (used when the value is not a string).
    ///
    /// # Example
    ///
    /// ```rust
    /// use zodic::{Schema, SchemaLike, Value};
    ///
    /// let schema = Schema::string().min(5).error("username too short");
    ///
    /// let error = schema.parse(&Value::from("hi")).unwrap_err();
    /// assert_eq!(error.first().message, "username too short");
    /// ```
    pub fn error(mut self, message: impl Into<String>) -> Self {
        if let Some(last) = self.constraints.last_mut() {
            match last {
                StringConstraint::MinLength { message: m, .. }
                | StringConstraint::MaxLength { message: m, .. }
                | StringConstraint::Length { message: m, .. }
                | StringConstraint::Pattern { message: m, .. }
                | StringConstraint::Email { message: m }
                | StringConstraint::Url { message: m } => *m = Some(message.into()),
            }
        } else {
            self.type_error_message = Some(message.into());
        }
        self
    }
}

impl Default for StringSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaLike for StringSchema {
    fn parse_value(&self, value: &Value, path: &Path) -> Validation<Value, ZodError> {
        let s = match value.as_str() {
            Some(s) => s,
            None => {
                let mut issue = Issue::invalid_type(path, "string", value);
                if let Some(message) = &self.type_error_message {
                    issue = issue.with_message(message.clone());
                }
                return Validation::Failure(ZodError::single(issue));
            }
        };

        match self
            .constraints
            .iter()
            .find_map(|c| check_constraint(c, s, path))
        {
            Some(issue) => {
                Validation::Failure(ZodError::single(issue.with_received(value.clone())))
            }
            None => Validation::Success(value.clone()),
        }
    }

    fn modifiers(&self) -> &Modifiers {
        &self.modifiers
    }

    fn modifiers_mut(&mut self) -> &mut Modifiers {
        &mut self.modifiers
    }
}

/// Checks a single constraint and returns an issue if it fails.
fn check_constraint(constraint: &StringConstraint, value: &str, path: &Path) -> Option<Issue> {
    match constraint {
        StringConstraint::MinLength { min, message } => {
            let len = value.chars().count();
            (len < *min).then(|| {
                let msg = message.clone().unwrap_or_else(|| {
                    format!("String must contain at least {} characters", min)
                });
                Issue::new(path.clone(), IssueCode::TooSmall, msg)
                    .with_expected(format!("at least {} characters", min))
            })
        }
        StringConstraint::MaxLength { max, message } => {
            let len = value.chars().count();
            (len > *max).then(|| {
                let msg = message
                    .clone()
                    .unwrap_or_else(|| format!("String must contain at most {} characters", max));
                Issue::new(path.clone(), IssueCode::TooBig, msg)
                    .with_expected(format!("at most {} characters", max))
            })
        }
        StringConstraint::Length { len: expected, message } => {
            let len = value.chars().count();
            if len == *expected {
                return None;
            }
            let msg = message.clone().unwrap_or_else(|| {
                format!("String must contain exactly {} characters", expected)
            });
            let code = if len < *expected {
                IssueCode::TooSmall
            } else {
                IssueCode::TooBig
            };
            Some(
                Issue::new(path.clone(), code, msg)
                    .with_expected(format!("exactly {} characters", expected)),
            )
        }
        StringConstraint::Pattern { regex, message } => (!regex.is_match(value)).then(|| {
            let msg = message
                .clone()
                .unwrap_or_else(|| format!("String does not match pattern {}", regex.as_str()));
            Issue::new(path.clone(), IssueCode::InvalidString, msg)
                .with_expected(format!("string matching '{}'", regex.as_str()))
        }),
        StringConstraint::Email { message } => (!is_email(value)).then(|| {
            let msg = message
                .clone()
                .unwrap_or_else(|| "Invalid email format".to_string());
            Issue::new(path.clone(), IssueCode::InvalidString, msg).with_expected("email")
        }),
        StringConstraint::Url { message } => (!is_http_url(value)).then(|| {
            let msg = message
                .clone()
                .unwrap_or_else(|| "Invalid URL format".to_string());
            Issue::new(path.clone(), IssueCode::InvalidString, msg).with_expected("url")
        }),
    }
}

fn is_email(value: &str) -> bool {
    static EMAIL: OnceLock<Option<Regex>> = OnceLock::new();
    EMAIL
        .get_or_init(|| Regex::new(r"^[^@\s]+@([^@\s.]+\.)+[^@\s.]+$").ok())
        .as_ref()
        .is_some_and(|re| re.is_match(value))
}

fn is_http_url(value: &str) -> bool {
    match Url::parse(value) {
        Ok(url) => {
            matches!(url.scheme(), "http" | "https")
                && url.host_str().is_some_and(|host| !host.is_empty())
        }
        Err(_) => false,
    }
}
