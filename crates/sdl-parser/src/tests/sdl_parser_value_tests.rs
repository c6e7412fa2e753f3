//! Constant values in default values and directive arguments.

use crate::ast::ObjectField;
use crate::ast::Value;
use crate::tests::ast_utils::extract_default_value;
use crate::tests::ast_utils::extract_first_object_type;

#[test]
fn int_values() {
    assert_eq!(extract_default_value("0"), Value::Int(0));
    assert_eq!(extract_default_value("-17"), Value::Int(-17));
    assert_eq!(extract_default_value("2147483647"), Value::Int(i32::MAX));
    assert_eq!(extract_default_value("-2147483648"), Value::Int(i32::MIN));
}

#[test]
fn float_values() {
    assert_eq!(extract_default_value("1.5"), Value::Float(1.5));
    assert_eq!(extract_default_value("1.5e3"), Value::Float(1500.0));
    assert_eq!(extract_default_value("-2E-2"), Value::Float(-0.02));
}

#[test]
fn literal_keywords() {
    assert_eq!(extract_default_value("true"), Value::Boolean(true));
    assert_eq!(extract_default_value("false"), Value::Boolean(false));
    assert_eq!(extract_default_value("null"), Value::Null);
    assert_eq!(extract_default_value("ADMIN"), Value::Enum("ADMIN".to_string()));
}

/// Escapes are decoded, including both unicode escape forms.
#[test]
fn string_escapes() {
    assert_eq!(
        extract_default_value(r#""a\nb\t\"q\" A\u{1F600}""#),
        Value::String("a\nb\t\"q\" A\u{1F600}".to_string()),
    );
}

#[test]
fn block_string_value() {
    assert_eq!(
        extract_default_value("\"\"\"\n    first\n      second\n    \"\"\""),
        Value::String("first\n  second".to_string()),
    );
}

#[test]
fn list_values() {
    assert_eq!(extract_default_value("[]"), Value::List(vec![]));
    assert_eq!(
        extract_default_value("[1, [2, 3], \"x\"]"),
        Value::List(vec![
            Value::Int(1),
            Value::List(vec![Value::Int(2), Value::Int(3)]),
            Value::String("x".to_string()),
        ]),
    );
}

#[test]
fn object_values() {
    assert_eq!(extract_default_value("{}"), Value::Object(vec![]));
    assert_eq!(
        extract_default_value("{ limit: 10, tags: [A] }"),
        Value::Object(vec![
            ObjectField {
                name: "limit".to_string(),
                value: Value::Int(10),
            },
            ObjectField {
                name: "tags".to_string(),
                value: Value::List(vec![Value::Enum("A".to_string())]),
            },
        ]),
    );
}

/// Directive arguments accept the same values as defaults.
#[test]
fn directive_argument_values() {
    let obj = extract_first_object_type(
        r#"type User @model(class: "App\\Models\\User", soft: true, weight: 0.5) { id: ID }"#,
    );
    let model = &obj.directives[0];
    assert_eq!(model.name, "model");
    assert_eq!(model.argument("class").and_then(Value::as_str), Some("App\\Models\\User"));
    assert_eq!(model.argument("soft"), Some(&Value::Boolean(true)));
    assert_eq!(model.argument("weight"), Some(&Value::Float(0.5)));
    assert_eq!(model.argument("missing"), None);
}

#[test]
fn repeated_argument_last_wins() {
    let obj = extract_first_object_type(r#"type A @tag(name: "x", name: "y") { a: Int }"#);
    assert_eq!(
        obj.directives[0].argument("name"),
        Some(&Value::String("y".to_string())),
    );
}

#[test]
fn value_kind_names() {
    assert_eq!(Value::Int(1).kind_name(), "int");
    assert_eq!(Value::List(vec![]).kind_name(), "list");
    assert_eq!(Value::Null.kind_name(), "null");
}
