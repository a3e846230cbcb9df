//! Integration tests for union schemas.

use serde_json::json;
use zodic::{IssueCode, Schema, SchemaLike, Value};

fn v(json: serde_json::Value) -> Value {
    Value::from(json)
}

#[test]
fn test_or_accepts_either_alternative() {
    let schema = Schema::string().or(Schema::number());

    assert_eq!(schema.parse(&Value::from("hello")).unwrap(), Value::from("hello"));
    assert_eq!(schema.parse(&Value::Int(42)).unwrap(), Value::Int(42));

    let error = schema.parse(&Value::Bool(true)).unwrap_err();
    assert_eq!(error.len(), 1);
    assert_eq!(error.first().code, IssueCode::InvalidUnion);
}

#[test]
fn test_first_match_wins() {
    let schema = Schema::string().or(Schema::number());
    assert_eq!(schema.parse(&Value::from("42")).unwrap(), Value::from("42"));

    let coerce_first = Schema::number()
        .int()
        .or(Schema::number().transform(|_| Value::from("float")));
    assert_eq!(coerce_first.parse(&Value::Float(2.0)).unwrap(), Value::Int(2));
    assert_eq!(
        coerce_first.parse(&Value::Float(2.5)).unwrap(),
        Value::from("float")
    );
}

#[test]
fn test_union_factory() {
    let schema = Schema::union(vec![
        Box::new(Schema::string()) as Box<dyn SchemaLike>,
        Box::new(Schema::number()),
        Box::new(Schema::boolean()),
    ]);

    assert!(schema.parse(&Value::from("x")).is_ok());
    assert!(schema.parse(&Value::Int(1)).is_ok());
    assert!(schema.parse(&Value::Bool(false)).is_ok());
    assert!(schema.parse(&Value::Null).is_err());
}

#[test]
fn test_discriminated_shapes() {
    let circle = Schema::object()
        .field("kind", Schema::literal("circle"))
        .field("radius", Schema::number().positive());
    let square = Schema::object()
        .field("kind", Schema::literal("square"))
        .field("side", Schema::number().positive());
    let shape = circle.or(square);

    assert!(shape.parse(&v(json!({"kind": "circle", "radius": 2}))).is_ok());
    assert!(shape.parse(&v(json!({"kind": "square", "side": 3}))).is_ok());

    let error = shape
        .parse(&v(json!({"kind": "triangle", "side": 3})))
        .unwrap_err();
    assert_eq!(error.first().code, IssueCode::InvalidUnion);
    assert!(error.first().path.is_root());
}

#[test]
fn test_union_in_object_reports_field_path() {
    let schema = Schema::object().field("id", Schema::string().or(Schema::number()));

    let error = schema.parse(&v(json!({"id": [1]}))).unwrap_err();
    assert_eq!(error.first().path.to_string(), "id");
    assert_eq!(error.flatten()["id"], vec!["Input did not match any union option"]);
}

#[test]
fn test_union_modifiers() {
    let schema = Schema::string().or(Schema::number()).optional();

    assert_eq!(schema.parse(&Value::Null).unwrap(), Value::Null);
    assert_eq!(schema.parse(zodic::UNDEFINED).unwrap(), Value::Null);

    let described = Schema::string()
        .or(Schema::number())
        .transform(|value| Value::from(value.kind()));
    assert_eq!(described.parse(&Value::Int(1)).unwrap(), Value::from("integer"));
}

#[test]
fn test_nullable_alternative() {
    let schema = Schema::number().or(Schema::none());
    assert_eq!(schema.parse(&Value::Null).unwrap(), Value::Null);
    assert!(schema.parse(&Value::from("x")).is_err());
}
