//! Behavioral guarantees of the parse pipeline, checked over sample inputs.

use serde_json::json;
use zodic::{IssueCode, Path, Schema, SchemaLike, Value, UNDEFINED};

fn v(json: serde_json::Value) -> Value {
    Value::from(json)
}

fn samples() -> Vec<Value> {
    vec![
        v(json!(null)),
        v(json!(true)),
        v(json!(0)),
        v(json!(-3)),
        v(json!(2.5)),
        v(json!("")),
        v(json!("hello")),
        v(json!("a@b.co")),
        v(json!([])),
        v(json!(["a", 1])),
        v(json!({})),
        v(json!({"name": "J", "age": 3})),
    ]
}

fn schemas() -> Vec<Box<dyn SchemaLike>> {
    vec![
        Box::new(Schema::string().min(1).transform(|v| v)),
        Box::new(Schema::number().int().nonnegative()),
        Box::new(Schema::string().email().optional()),
        Box::new(Schema::array(Schema::string().or(Schema::number()))),
        Box::new(
            Schema::object()
                .field("name", Schema::string())
                .field("age", Schema::number().optional()),
        ),
        Box::new(Schema::boolean().nullable()),
    ]
}

#[test]
fn test_repeated_parses_are_equal() {
    for schema in schemas() {
        for sample in samples() {
            let first = schema.evaluate((&sample).into(), &Path::root()).into_result();
            let second = schema.evaluate((&sample).into(), &Path::root()).into_result();
            assert_eq!(first, second, "input {sample}");
        }
    }
}

#[test]
fn test_parse_and_safe_parse_agree() {
    let schema = Schema::object()
        .field("name", Schema::string())
        .field("age", Schema::number().optional());

    for sample in samples() {
        let thrown = schema.parse(&sample);
        let safe = schema.safe_parse(&sample);

        assert_eq!(thrown.is_ok(), safe.success(), "input {sample}");
        if let Ok(data) = thrown {
            assert_eq!(safe.data(), Some(&data));
        }
    }
}

#[test]
fn test_object_unknown_key_policies() {
    let input = v(json!({"name": "J", "extra": 1}));
    let schema = Schema::object().field("name", Schema::string());

    assert_eq!(schema.parse(&input).unwrap(), v(json!({"name": "J"})));
    assert_eq!(
        schema.clone().passthrough().parse(&input).unwrap(),
        v(json!({"name": "J", "extra": 1}))
    );

    let error = schema.strict().parse(&input).unwrap_err();
    assert!(error
        .issues()
        .any(|i| i.code == IssueCode::UnrecognizedKeys && i.message.contains("extra")));
}

#[test]
fn test_missing_required_field() {
    let schema = Schema::object()
        .field("name", Schema::string())
        .field("age", Schema::number());

    let error = schema.parse(&v(json!({"name": "J"}))).unwrap_err();
    assert!(error
        .issues()
        .any(|i| i.path == Path::root().push_key("age") && i.code == IssueCode::Required));
}

#[test]
fn test_array_element_path() {
    let schema = Schema::array(Schema::string());

    let error = schema.parse(&v(json!(["a", 1, "b"]))).unwrap_err();
    assert_eq!(error.len(), 1);
    assert_eq!(error.first().path, Path::root().push_index(1));
    assert_eq!(error.first().code, IssueCode::InvalidType);

    for valid in [json!([]), json!(["a"]), json!(["a", "b", "c"])] {
        let input = v(valid);
        assert_eq!(schema.parse(&input).unwrap(), input);
    }
}

#[test]
fn test_union_order_sensitivity() {
    let schema = Schema::string().or(Schema::number());

    assert_eq!(schema.parse(&Value::Int(42)).unwrap(), Value::Int(42));
    assert_eq!(schema.parse(&Value::from("42")).unwrap(), Value::from("42"));
}

#[test]
fn test_zero_boundary() {
    assert!(Schema::number().positive().parse(&Value::Int(0)).is_err());
    assert_eq!(
        Schema::number().nonnegative().parse(&Value::Int(0)).unwrap(),
        Value::Int(0)
    );
}

#[test]
fn test_default_versus_null() {
    assert_eq!(
        Schema::string().default("x").safe_parse(UNDEFINED).data(),
        Some(&Value::from("x"))
    );
    assert_eq!(
        Schema::string().nullable().parse(&Value::Null).unwrap(),
        Value::Null
    );
    let error = Schema::string().nullable().parse(&Value::Int(123)).unwrap_err();
    assert_eq!(error.first().code, IssueCode::InvalidType);
}

#[test]
fn test_transform_composition() {
    let f = |v: Value| match v {
        Value::String(s) => Value::String(format!("{s}!")),
        other => other,
    };
    let g = |v: Value| match v {
        Value::String(s) => Value::String(s.to_uppercase()),
        other => other,
    };
    let schema = Schema::string().transform(f).transform(g);

    for input in ["", "a", "hello world", "ünïcödé"] {
        let expected = g(f(Value::from(input)));
        assert_eq!(schema.parse(&Value::from(input)).unwrap(), expected);
    }
}

#[test]
fn test_refine_fail_fast() {
    let schema = Schema::string()
        .refine(|_| false, "m1")
        .refine(|_| false, "m2");

    let error = schema.parse(&Value::from("x")).unwrap_err();
    assert_eq!(error.len(), 1);
    assert_eq!(error.first().message, "m1");
}
