//! Schema definitions for validation.
//!
//! Each schema kind is its own type implementing [`SchemaLike`]. Builder methods
//! consume the schema and return the extended one; clone a schema first to keep
//! the original around. Parsing only borrows the schema, so a built schema can
//! be shared freely, including across threads.
//!
//! # Example
//!
//! ```rust
//! use zodic::{Schema, SchemaLike, Value};
//!
//! let base = Schema::string().min(1);
//! let short = base.clone().max(5);
//!
//! assert!(base.parse(&Value::from("a long string")).is_ok());
//! assert!(short.parse(&Value::from("a long string")).is_err());
//! ```

mod array;
mod combinators;
mod enums;
mod modifiers;
mod numeric;
mod object;
mod scalar;
mod string;
mod temporal;
mod traits;

use std::sync::Arc;

pub use array::ArraySchema;
pub use combinators::UnionSchema;
pub use enums::EnumSchema;
pub use modifiers::Modifiers;
pub use numeric::NumberSchema;
pub use object::{ObjectSchema, UnknownKeys};
pub use scalar::{BooleanSchema, LiteralSchema, NullSchema};
pub use string::StringSchema;
pub use temporal::{DateSchema, DateTimeSchema};
pub use traits::SchemaLike;

use crate::value::Value;

/// Entry point for creating validation schemas.
///
/// # Example
///
/// ```rust
/// use zodic::{Schema, SchemaLike, Value};
/// use serde_json::json;
///
/// let user = Schema::object()
///     .field("name", Schema::string().min(1))
///     .field("email", Schema::string().email())
///     .field("role", Schema::enum_(["admin", "user"]).default("user"))
///     .field("tags", Schema::array(Schema::string()).max(5).optional());
///
/// let parsed = user
///     .parse(&Value::from(json!({"name": "Ada", "email": "ada@example.com"})))
///     .unwrap();
/// assert_eq!(parsed.get("role"), Some(&Value::from("user")));
/// assert_eq!(parsed.get("tags"), None);
/// ```
pub struct Schema;

impl Schema {
    pub fn string() -> StringSchema {
        StringSchema::new()
    }

    /// Creates a number schema accepting integers and finite floats.
    pub fn number() -> NumberSchema {
        NumberSchema::new()
    }

    pub fn boolean() -> BooleanSchema {
        BooleanSchema::new()
    }

    /// Creates a schema that accepts only null.
    pub fn none() -> NullSchema {
        NullSchema::new()
    }

    pub fn literal(value: impl Into<Value>) -> LiteralSchema {
        LiteralSchema::new(value)
    }

    /// Creates an enum schema over a fixed set of values.
    ///
    /// The trailing underscore avoids the `enum` keyword.
    pub fn enum_<I, V>(values: I) -> EnumSchema
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        EnumSchema::new(values)
    }

    pub fn date() -> DateSchema {
        DateSchema::new()
    }

    pub fn datetime() -> DateTimeSchema {
        DateTimeSchema::new()
    }

    /// Creates an object schema with no fields. Add fields with
    /// [`ObjectSchema::field`].
    pub fn object() -> ObjectSchema {
        ObjectSchema::new()
    }

    pub fn array<S: SchemaLike>(element: S) -> ArraySchema<S> {
        ArraySchema::new(element)
    }

    /// Creates a union from boxed alternatives, tried in order.
    ///
    /// # Example
    ///
    /// ```rust
    /// use zodic::{Schema, SchemaLike, Value};
    ///
    /// let schema = Schema::union(vec![
    ///     Box::new(Schema::string()) as Box<dyn SchemaLike>,
    ///     Box::new(Schema::number()),
    ///     Box::new(Schema::boolean()),
    /// ]);
    ///
    /// assert!(schema.parse(&Value::Bool(true)).is_ok());
    /// assert!(schema.parse(&Value::Null).is_err());
    /// ```
    pub fn union(options: Vec<Box<dyn SchemaLike>>) -> UnionSchema {
        UnionSchema::new(options.into_iter().map(Arc::<dyn SchemaLike>::from).collect())
    }

    /// Same as calling `.optional()` on the schema.
    pub fn optional<S: SchemaLike>(schema: S) -> S {
        schema.optional()
    }

    /// Same as calling `.nullable()` on the schema.
    pub fn nullable<S: SchemaLike>(schema: S) -> S {
        schema.nullable()
    }
}
