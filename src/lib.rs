//! # Zodic
//!
//! Runtime validation and parsing for untyped, JSON-like data.
//!
//! ## Overview
//!
//! A schema describes the shape a value must have. Parsing checks the value,
//! coerces it into canonical form (integral floats become integers, date
//! strings become dates, unknown object keys are stripped) and reports every
//! violation with the path where it happened.
//!
//! Within one value, checks stop at the first failure. Across the fields of an
//! object and the elements of an array, every sibling is validated and all
//! issues are collected, so one parse reports every independent problem.
//!
//! ## Core Types
//!
//! - [`Value`]: the dynamic input and output value; [`Input`] separates an absent
//!   value ([`UNDEFINED`]) from an explicit null
//! - [`Schema`]: entry point for creating schemas
//! - [`SchemaLike`]: the parse pipeline and the chain methods every schema shares
//! - [`Issue`] and [`ZodError`]: one located failure, and the non-empty aggregate
//! - [`ParseResult`]: the outcome of [`SchemaLike::safe_parse`]
//!
//! ## Example
//!
//! ```rust
//! use zodic::{Schema, SchemaLike, Value};
//! use serde_json::json;
//!
//! let user = Schema::object()
//!     .field("name", Schema::string().min(2))
//!     .field("email", Schema::string().email())
//!     .field("age", Schema::number().int().positive().optional());
//!
//! let input = Value::from(json!({"name": "Ada", "email": "ada@example.com", "age": 36}));
//! assert!(user.parse(&input).is_ok());
//!
//! let input = Value::from(json!({"name": "A", "email": "nope"}));
//! let result = user.safe_parse(&input);
//! assert!(!result.success());
//!
//! let flat = result.error().unwrap().flatten();
//! assert_eq!(flat["name"], vec!["String must contain at least 2 characters"]);
//! assert_eq!(flat["email"], vec!["Invalid email format"]);
//! ```

pub mod error;
pub mod path;
pub mod result;
pub mod schema;
pub mod value;

pub use error::{FormattedIssue, Issue, IssueCode, ParseIntoError, ZodError};
pub use path::{Path, PathSegment};
pub use result::ParseResult;
pub use schema::{
    ArraySchema, BooleanSchema, DateSchema, DateTimeSchema, EnumSchema, LiteralSchema, Modifiers,
    NullSchema, NumberSchema, ObjectSchema, Schema, SchemaLike, StringSchema, UnionSchema,
    UnknownKeys,
};
pub use value::{Input, Value, UNDEFINED};
