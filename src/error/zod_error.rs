//! The error aggregate raised by a failed parse.
//!
//! This module provides [`ZodError`], a non-empty ordered collection of
//! [`Issue`]s, and [`FormattedIssue`], its serializable per-issue view.

use std::fmt::{self, Display};

use indexmap::IndexMap;
use serde::Serialize;
use stillwater::prelude::*;

use super::issue::{Issue, IssueCode};
use crate::path::Path;
use crate::value::Value;

/// A non-empty collection of validation issues.
///
/// `ZodError` wraps a `NonEmptyVec<Issue>` so a failure always carries at least
/// one issue. It implements `Semigroup`, which is how object and array
/// validation merge the failures of sibling fields and elements.
///
/// # Example
///
/// ```rust
/// use zodic::{Schema, SchemaLike, Value};
/// use serde_json::json;
///
/// let schema = Schema::object()
///     .field("user", Schema::object()
///         .field("email", Schema::string().email())
///         .field("age", Schema::number().positive()));
///
/// let input = Value::from(json!({"user": {"email": "nope", "age": -5}}));
/// let error = schema.parse(&input).unwrap_err();
///
/// let flat = error.flatten();
/// assert!(flat.contains_key("user.email"));
/// assert!(flat.contains_key("user.age"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ZodError(NonEmptyVec<Issue>);

impl ZodError {
    pub fn single(issue: Issue) -> Self {
        Self(NonEmptyVec::singleton(issue))
    }

    /// Builds an error from collected issues, or `None` when nothing failed.
    pub fn from_issues(issues: Vec<Issue>) -> Option<Self> {
        let mut issues = issues.into_iter();
        let head = ZodError::single(issues.next()?);
        Some(issues.fold(head, |acc, issue| acc.combine(ZodError::single(issue))))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; a `ZodError` holds at least one issue.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns the issues in the order they were recorded.
    pub fn issues(&self) -> impl Iterator<Item = &Issue> {
        self.0.iter()
    }

    pub fn first(&self) -> &Issue {
        self.0.head()
    }

    pub fn at_path(&self, path: &Path) -> Vec<&Issue> {
        self.0.iter().filter(|i| &i.path == path).collect()
    }

    pub fn with_code(&self, code: IssueCode) -> Vec<&Issue> {
        self.0.iter().filter(|i| i.code == code).collect()
    }

    /// Groups messages by rendered path.
    ///
    /// Keys are the dotted/bracketed path (`user.email`, `items[0][1]`), or
    /// `root` for issues about the top-level value. Keys appear in the order
    /// their first issue was recorded.
    pub fn flatten(&self) -> IndexMap<String, Vec<String>> {
        let mut grouped: IndexMap<String, Vec<String>> = IndexMap::new();
        for issue in self.0.iter() {
            grouped
                .entry(issue.path.flatten_key())
                .or_default()
                .push(issue.message.clone());
        }
        grouped
    }

    /// Returns one structured record per issue, in insertion order.
    pub fn format(&self) -> Vec<FormattedIssue> {
        self.0.iter().map(FormattedIssue::from).collect()
    }

    pub fn into_issues(self) -> Vec<Issue> {
        self.0.into_vec()
    }
}

impl Semigroup for ZodError {
    fn combine(self, other: Self) -> Self {
        ZodError(self.0.combine(other.0))
    }
}

impl Display for ZodError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Validation failed with {} issue(s):", self.len())?;
        for (i, issue) in self.0.iter().enumerate() {
            writeln!(f, "  {}. {}: {}", i + 1, issue.path.flatten_key(), issue.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ZodError {}

impl IntoIterator for ZodError {
    type Item = Issue;
    type IntoIter = std::vec::IntoIter<Issue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_vec().into_iter()
    }
}

impl From<Issue> for ZodError {
    fn from(issue: Issue) -> Self {
        ZodError::single(issue)
    }
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<ZodError>();
    assert_sync::<ZodError>();
};

/// Serializable view of one issue, as returned by [`ZodError::format`].
///
/// This is the shape an HTTP layer would hand to clients.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormattedIssue {
    pub path: String,
    pub segments: Path,
    pub code: IssueCode,
    pub message: String,
    pub received: Option<Value>,
    pub expected: Option<String>,
}

impl From<&Issue> for FormattedIssue {
    fn from(issue: &Issue) -> Self {
        Self {
            path: issue.path.flatten_key(),
            segments: issue.path.clone(),
            code: issue.code,
            message: issue.message.clone(),
            received: issue.received.clone(),
            expected: issue.expected.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn issue(key: &str, message: &str) -> Issue {
        Issue::new(Path::root().push_key(key), IssueCode::Custom, message)
    }

    #[test]
    fn test_from_issues_rejects_empty() {
        assert!(ZodError::from_issues(Vec::new()).is_none());
        assert_eq!(ZodError::from_issues(vec![issue("a", "x")]).unwrap().len(), 1);
    }

    #[test]
    fn test_combine_preserves_order() {
        let combined = ZodError::single(issue("a", "first"))
            .combine(ZodError::single(issue("b", "second")))
            .combine(ZodError::single(issue("c", "third")));

        let messages: Vec<_> = combined.issues().map(|i| i.message.as_str()).collect();
        assert_eq!(messages, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_flatten_groups_by_path() {
        let error = ZodError::single(issue("a", "one"))
            .combine(ZodError::single(issue("b", "two")))
            .combine(ZodError::single(issue("a", "three")))
            .combine(ZodError::single(Issue::new(Path::root(), IssueCode::Custom, "top")));

        let flat = error.flatten();
        assert_eq!(flat["a"], vec!["one".to_string(), "three".to_string()]);
        assert_eq!(flat["b"], vec!["two".to_string()]);
        assert_eq!(flat["root"], vec!["top".to_string()]);
        assert_eq!(flat.keys().collect::<Vec<_>>(), vec!["a", "b", "root"]);
    }

    #[test]
    fn test_format_keeps_received_and_expected() {
        let issue = Issue::invalid_type(&Path::root(), "string", &Value::Int(123));
        let error = ZodError::single(issue);
        let formatted = error.format();

        assert_eq!(formatted.len(), 1);
        assert_eq!(formatted[0].path, "root");
        assert_eq!(formatted[0].code, IssueCode::InvalidType);
        assert_eq!(formatted[0].received, Some(Value::Int(123)));
        assert_eq!(formatted[0].expected.as_deref(), Some("string"));
    }

    #[test]
    fn test_display_lists_every_issue() {
        let error = ZodError::single(issue("name", "Required"))
            .combine(ZodError::single(issue("email", "Invalid email format")));
        let display = error.to_string();

        assert!(display.contains("2 issue(s)"));
        assert!(display.contains("name: Required"));
        assert!(display.contains("email: Invalid email format"));
    }

    #[test]
    fn test_filters() {
        let error = ZodError::single(issue("a", "x"))
            .combine(ZodError::single(Issue::new(
                Path::root().push_key("a"),
                IssueCode::TooSmall,
                "y",
            )));

        assert_eq!(error.at_path(&Path::root().push_key("a")).len(), 2);
        assert_eq!(error.with_code(IssueCode::TooSmall).len(), 1);
        assert_eq!(error.first().message, "x");
    }
}
