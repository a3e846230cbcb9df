//! Paths for locating values in nested input.
//!
//! This module provides [`Path`] and [`PathSegment`]. Every issue carries the path
//! of the value it describes, built up as object and array validation descend
//! into their children.

use std::fmt::{self, Display};

use serde::Serialize;

/// A segment of a path: an object key or an array index.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum PathSegment {
    /// An object key (e.g., `user`, `email`)
    Key(String),
    /// An array position (e.g., `[0]`)
    Index(usize),
}

impl PathSegment {
    pub fn key(name: impl Into<String>) -> Self {
        PathSegment::Key(name.into())
    }

    pub fn index(idx: usize) -> Self {
        PathSegment::Index(idx)
    }
}

impl From<&str> for PathSegment {
    fn from(name: &str) -> Self {
        PathSegment::Key(name.to_string())
    }
}

impl From<usize> for PathSegment {
    fn from(idx: usize) -> Self {
        PathSegment::Index(idx)
    }
}

/// The location of a value inside the top-level input.
///
/// The empty path is the input itself. Children are addressed by appending
/// segments; the original path is left untouched so siblings can share a parent.
///
/// # Example
///
/// ```rust
/// use zodic::Path;
///
/// let items = Path::root().push_key("items");
/// let path = items.push_index(0).push_index(1);
///
/// assert_eq!(path.to_string(), "items[0][1]");
/// assert_eq!(items.to_string(), "items");
/// assert_eq!(Path::root().flatten_key(), "root");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct Path {
    segments: Vec<PathSegment>,
}

impl Path {
    pub fn root() -> Self {
        Self::default()
    }

    /// Returns a new path with a key segment appended.
    pub fn push_key(&self, name: impl Into<String>) -> Self {
        self.push(PathSegment::Key(name.into()))
    }

    /// Returns a new path with an index segment appended.
    pub fn push_index(&self, index: usize) -> Self {
        self.push(PathSegment::Index(index))
    }

    fn push(&self, segment: PathSegment) -> Self {
        let mut segments = Vec::with_capacity(self.segments.len() + 1);
        segments.extend(self.segments.iter().cloned());
        segments.push(segment);
        Self { segments }
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// The key this path is grouped under by [`ZodError::flatten`](crate::ZodError::flatten).
    ///
    /// Same as the `Display` form, except the empty path renders as `root`.
    pub fn flatten_key(&self) -> String {
        if self.is_root() {
            "root".to_string()
        } else {
            self.to_string()
        }
    }
}

impl<S: Into<PathSegment>> FromIterator<S> for Path {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            segments: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Key(name) => {
                    if i > 0 {
                        write!(f, ".")?;
                    }
                    write!(f, "{}", name)?;
                }
                PathSegment::Index(idx) => write!(f, "[{}]", idx)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_path_is_empty() {
        let path = Path::root();
        assert!(path.is_root());
        assert_eq!(path.len(), 0);
        assert_eq!(path.to_string(), "");
        assert_eq!(path.flatten_key(), "root");
    }

    #[test]
    fn test_index_then_key() {
        let path = Path::root().push_index(1).push_key("age");
        assert_eq!(path.to_string(), "[1].age");
    }

    #[test]
    fn test_nested_indexes() {
        let path = Path::root().push_key("items").push_index(0).push_index(1);
        assert_eq!(path.to_string(), "items[0][1]");
    }

    #[test]
    fn test_deeply_nested_keys() {
        let path = Path::root()
            .push_key("level1")
            .push_key("level2")
            .push_key("level3")
            .push_key("value");
        assert_eq!(path.flatten_key(), "level1.level2.level3.value");
    }

    #[test]
    fn test_push_leaves_parent_untouched() {
        let base = Path::root().push_key("users");
        let first = base.push_index(0);
        let second = base.push_index(1);

        assert_eq!(base.to_string(), "users");
        assert_eq!(first.to_string(), "users[0]");
        assert_eq!(second.to_string(), "users[1]");
    }

    #[test]
    fn test_from_iter() {
        let path: Path = vec![PathSegment::key("a"), PathSegment::index(2)]
            .into_iter()
            .collect();
        assert_eq!(path, Path::root().push_key("a").push_index(2));
    }

    #[test]
    fn test_serializes_as_segment_list() {
        let path = Path::root().push_key("items").push_index(3);
        let json = serde_json::to_value(&path).unwrap();
        assert_eq!(json, serde_json::json!(["items", 3]));
    }
}
