//! Date and datetime schemas.
//!
//! Both schemas accept native chrono values as well as strings, and produce
//! `Value::Date` / `Value::DateTime` respectively. Timezone information in
//! datetime strings is normalized to UTC and then dropped.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use stillwater::Validation;

use crate::error::{Issue, IssueCode, ZodError};
use crate::path::Path;
use crate::value::{Value, DATETIME_FORMAT};

use super::modifiers::Modifiers;
use super::traits::SchemaLike;

/// Date string formats, tried in order. The first that parses wins, so
/// `01/02/2023` is read as January 2nd.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%d/%m/%Y"];

/// Offset-free datetime string formats, tried after RFC 3339.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
];

/// An inclusive bound on an ordered value.
#[derive(Clone)]
enum Bound<T> {
    Min { value: T, message: Option<String> },
    Max { value: T, message: Option<String> },
}

impl<T> Bound<T> {
    fn message_mut(&mut self) -> &mut Option<String> {
        match self {
            Bound::Min { message, .. } | Bound::Max { message, .. } => message,
        }
    }
}

/// Returns the first violated bound as an issue.
///
/// `label` names the kind in messages ("Date", "Datetime") and `render` prints a
/// bound value.
fn check_bounds<T: PartialOrd>(
    bounds: &[Bound<T>],
    candidate: &T,
    path: &Path,
    label: &str,
    render: impl Fn(&T) -> String,
) -> Option<Issue> {
    bounds.iter().find_map(|bound| match bound {
        Bound::Min { value, message } if candidate < value => {
            let rendered = render(value);
            Some(
                Issue::new(
                    path.clone(),
                    IssueCode::InvalidDate,
                    message.clone().unwrap_or_else(|| {
                        format!("{} must be after or equal to {}", label, rendered)
                    }),
                )
                .with_expected(format!(">= {}", rendered)),
            )
        }
        Bound::Max { value, message } if candidate > value => {
            let rendered = render(value);
            Some(
                Issue::new(
                    path.clone(),
                    IssueCode::InvalidDate,
                    message.clone().unwrap_or_else(|| {
                        format!("{} must be before or equal to {}", label, rendered)
                    }),
                )
                .with_expected(format!("<= {}", rendered)),
            )
        }
        _ => None,
    })
}

/// A schema for calendar dates.
///
/// Accepts `Value::Date`, `Value::DateTime` (truncated to its date) and strings
/// in `YYYY-MM-DD`, `MM/DD/YYYY` or `DD/MM/YYYY` form, tried in that order.
///
/// # Example
///
/// ```rust
/// use chrono::NaiveDate;
/// use zodic::{Schema, SchemaLike, Value};
///
/// let schema = Schema::date();
/// let expected = Value::Date(NaiveDate::from_ymd_opt(2023, 12, 25).unwrap());
///
/// assert_eq!(schema.parse(&Value::from("2023-12-25")).unwrap(), expected);
/// assert_eq!(schema.parse(&Value::from("12/25/2023")).unwrap(), expected);
/// assert!(schema.parse(&Value::from("not-a-date")).is_err());
/// ```
#[derive(Clone, Default)]
pub struct DateSchema {
    bounds: Vec<Bound<NaiveDate>>,
    type_error_message: Option<String>,
    modifiers: Modifiers,
}

impl DateSchema {
    pub fn new() -> Self {
        Self {
            bounds: Vec::new(),
            type_error_message: None,
            modifiers: Modifiers::default(),
        }
    }

    /// Adds an inclusive lower bound.
    pub fn min(mut self, value: NaiveDate) -> Self {
        self.bounds.push(Bound::Min {
            value,
            message: None,
        });
        self
    }

    /// Adds an inclusive upper bound.
    pub fn max(mut self, value: NaiveDate) -> Self {
        self.bounds.push(Bound::Max {
            value,
            message: None,
        });
        self
    }

    /// Sets a custom error message for the most recent bound, or for type and
    /// format errors when no bound has been added yet.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        match self.bounds.last_mut() {
            Some(bound) => *bound.message_mut() = Some(message.into()),
            None => self.type_error_message = Some(message.into()),
        }
        self
    }

    fn coerce(&self, value: &Value, path: &Path) -> Result<NaiveDate, Issue> {
        let issue = match value {
            Value::Date(date) => return Ok(*date),
            Value::DateTime(datetime) => return Ok(datetime.date()),
            Value::String(s) => match parse_date(s) {
                Some(date) => return Ok(date),
                None => Issue::new(path.clone(), IssueCode::InvalidDate, "Invalid date format")
                    .with_received(value.clone())
                    .with_expected("date string"),
            },
            _ => Issue::invalid_type(path, "date", value),
        };
        Err(match &self.type_error_message {
            Some(message) => issue.with_message(message.clone()),
            None => issue,
        })
    }
}

impl SchemaLike for DateSchema {
    fn parse_value(&self, value: &Value, path: &Path) -> Validation<Value, ZodError> {
        let date = match self.coerce(value, path) {
            Ok(date) => date,
            Err(issue) => return Validation::Failure(ZodError::single(issue)),
        };
        match check_bounds(&self.bounds, &date, path, "Date", |d| {
            d.format("%Y-%m-%d").to_string()
        }) {
            Some(issue) => {
                Validation::Failure(ZodError::single(issue.with_received(value.clone())))
            }
            None => Validation::Success(Value::Date(date)),
        }
    }

    fn modifiers(&self) -> &Modifiers {
        &self.modifiers
    }

    fn modifiers_mut(&mut self) -> &mut Modifiers {
        &mut self.modifiers
    }
}

/// A schema for timezone-naive datetimes.
///
/// Accepts `Value::DateTime` and strings: RFC 3339 with `Z` or an offset
/// (converted to UTC), ISO 8601 without an offset, `YYYY-MM-DD HH:MM:SS`, and a
/// bare `YYYY-MM-DD` (midnight).
///
/// # Example
///
/// ```rust
/// use chrono::NaiveDate;
/// use zodic::{Schema, SchemaLike, Value};
///
/// let schema = Schema::datetime();
/// let expected = NaiveDate::from_ymd_opt(2023, 12, 25)
///     .unwrap()
///     .and_hms_opt(10, 30, 0)
///     .unwrap();
///
/// assert_eq!(
///     schema.parse(&Value::from("2023-12-25T10:30:00Z")).unwrap(),
///     Value::DateTime(expected)
/// );
/// assert_eq!(
///     schema.parse(&Value::from("2023-12-25T12:30:00+02:00")).unwrap(),
///     Value::DateTime(expected)
/// );
/// ```
#[derive(Clone, Default)]
pub struct DateTimeSchema {
    bounds: Vec<Bound<NaiveDateTime>>,
    type_error_message: Option<String>,
    modifiers: Modifiers,
}

impl DateTimeSchema {
    pub fn new() -> Self {
        Self {
            bounds: Vec::new(),
            type_error_message: None,
            modifiers: Modifiers::default(),
        }
    }

    pub fn min(mut self, value: NaiveDateTime) -> Self {
        self.bounds.push(Bound::Min {
            value,
            message: None,
        });
        self
    }

    pub fn max(mut self, value: NaiveDateTime) -> Self {
        self.bounds.push(Bound::Max {
            value,
            message: None,
        });
        self
    }

    pub fn error(mut self, message: impl Into<String>) -> Self {
        match self.bounds.last_mut() {
            Some(bound) => *bound.message_mut() = Some(message.into()),
            None => self.type_error_message = Some(message.into()),
        }
        self
    }

    fn coerce(&self, value: &Value, path: &Path) -> Result<NaiveDateTime, Issue> {
        let issue = match value {
            Value::DateTime(datetime) => return Ok(*datetime),
            Value::String(s) => match parse_datetime(s) {
                Some(datetime) => return Ok(datetime),
                None => {
                    Issue::new(path.clone(), IssueCode::InvalidDate, "Invalid datetime format")
                        .with_received(value.clone())
                        .with_expected("datetime string")
                }
            },
            _ => Issue::invalid_type(path, "datetime", value),
        };
        Err(match &self.type_error_message {
            Some(message) => issue.with_message(message.clone()),
            None => issue,
        })
    }
}

impl SchemaLike for DateTimeSchema {
    fn parse_value(&self, value: &Value, path: &Path) -> Validation<Value, ZodError> {
        let datetime = match self.coerce(value, path) {
            Ok(datetime) => datetime,
            Err(issue) => return Validation::Failure(ZodError::single(issue)),
        };
        match check_bounds(&self.bounds, &datetime, path, "Datetime", |dt| {
            dt.format(DATETIME_FORMAT).to_string()
        }) {
            Some(issue) => {
                Validation::Failure(ZodError::single(issue.with_received(value.clone())))
            }
            None => Validation::Success(Value::DateTime(datetime)),
        }
    }

    fn modifiers(&self) -> &Modifiers {
        &self.modifiers
    }

    fn modifiers_mut(&mut self) -> &mut Modifiers {
        &mut self.modifiers
    }
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(s, format).ok())
}

fn parse_datetime(s: &str) -> Option<NaiveDateTime> {
    if let Ok(with_offset) = DateTime::parse_from_rfc3339(s) {
        return Some(with_offset.naive_utc());
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(s, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .map(|date| date.and_time(NaiveTime::MIN))
        })
}
