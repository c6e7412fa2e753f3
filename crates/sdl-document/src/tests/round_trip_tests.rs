//! Parse, encode and decode arbitrary schemas; the decoded document must
//! equal the parsed one.

use crate::deserialize;
use crate::resolve_bindings;
use crate::serialize;
use crate::tests::utils::parse;
use crate::Document;
use crate::ResolvedDocument;
use proptest::prelude::*;
use std::collections::HashSet;

const APP_SCHEMA: &str = include_str!("fixtures/app_schema.graphql");

// =========================================================================
// Fixture
// =========================================================================

#[test]
fn fixture_unresolved_round_trip() {
    let doc = parse(APP_SCHEMA);
    assert_eq!(doc.types().len(), 10);
    assert_eq!(doc.type_extensions("User").len(), 1);
    assert_eq!(deserialize(&serialize(&doc).unwrap()).unwrap(), doc);
}

#[test]
fn fixture_resolved_round_trip() {
    let classes: HashSet<String> = ["App\\Models\\Node", "App\\Models\\User", "App\\Models\\Post"]
        .into_iter()
        .map(String::from)
        .collect();
    let resolved = resolve_bindings(parse(APP_SCHEMA), &classes).unwrap();
    assert_eq!(resolved.class_name_to_type_name().len(), 3);

    let restored = ResolvedDocument::from_bytes(&resolved.to_bytes().unwrap()).unwrap();
    assert_eq!(restored, resolved);
    assert_eq!(restored.model_type("App\\Models\\Post").unwrap().name(), "Post");
}

// =========================================================================
// Generated schemas
// =========================================================================

fn default_value() -> impl Strategy<Value = String> {
    prop_oneof![
        (-1000i32..1000).prop_map(|v| v.to_string()),
        (-1.0e6f64..1.0e6).prop_map(|v| format!("{v:?}")),
        "[a-z ]{0,10}".prop_map(|s| format!("\"{s}\"")),
        Just("null".to_string()),
        Just("[1, 2, 3]".to_string()),
        Just("{ a: true, b: [V_A] }".to_string()),
    ]
}

fn type_ref() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("Int"), Just("String!"), Just("[Float]"), Just("[ID!]!")]
}

fn field() -> impl Strategy<Value = String> {
    (
        "f[a-zA-Z0-9_]{0,6}",
        type_ref(),
        proptest::option::of(default_value()),
        proptest::option::of("[a-zA-Z ]{0,12}"),
    )
        .prop_map(|(name, ty, default, description)| {
            let description = description
                .map(|d| format!("\"{d}\" "))
                .unwrap_or_default();
            match default {
                Some(value) => format!("{description}{name}(arg: Int = {value}): {ty}"),
                None => format!("{description}{name}: {ty}"),
            }
        })
}

fn object_type() -> impl Strategy<Value = String> {
    (
        "T[A-Za-z0-9]{0,6}",
        proptest::option::of("[A-Z][a-z]{0,5}"),
        proptest::collection::vec(field(), 1..5),
    )
        .prop_map(|(name, class, fields)| {
            let binding = class
                .map(|c| format!(" @model(class: \"{c}\")"))
                .unwrap_or_default();
            format!("type {name}{binding} {{\n  {}\n}}\n", fields.join("\n  "))
        })
}

fn enum_type() -> impl Strategy<Value = String> {
    (
        "E[A-Za-z0-9]{0,6}",
        proptest::collection::btree_set("V_[A-Z0-9]{0,4}", 1..5),
    )
        .prop_map(|(name, values)| {
            let values: Vec<_> = values.into_iter().collect();
            format!("enum {name} {{ {} }}\n", values.join(" "))
        })
}

fn directive_definition() -> impl Strategy<Value = String> {
    ("d[a-z0-9]{0,5}", default_value(), any::<bool>()).prop_map(|(name, value, repeatable)| {
        let repeatable = if repeatable { " repeatable" } else { "" };
        format!("directive @{name}(x: Int = {value}){repeatable} on FIELD | OBJECT\n")
    })
}

fn schema_source() -> impl Strategy<Value = String> {
    proptest::collection::vec(
        prop_oneof![object_type(), enum_type(), directive_definition()],
        0..8,
    )
    .prop_map(|definitions| definitions.concat())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn unresolved_round_trip(source in schema_source()) {
        let doc = parse(&source);
        let restored = deserialize(&serialize(&doc).unwrap()).unwrap();
        prop_assert_eq!(restored, doc);
    }

    #[test]
    fn resolved_round_trip(source in schema_source()) {
        let doc = parse(&source);
        let classes: HashSet<String> = doc.class_name_to_type_name().keys().cloned().collect();
        let resolved = resolve_bindings(doc, &classes).unwrap();
        let restored = ResolvedDocument::from_bytes(&resolved.to_bytes().unwrap()).unwrap();
        prop_assert_eq!(restored, resolved);
    }

    /// Splitting a source in two and merging keeps the names, their order
    /// and the bindings of parsing it whole.
    #[test]
    fn merge_matches_single_parse(first in schema_source(), second in schema_source()) {
        let whole = parse(&format!("{first}{second}"));
        let mut merged = Document::new();
        merged.merge(parse(&first));
        merged.merge(parse(&second));

        let names = |doc: &Document| doc.types().keys().cloned().collect::<Vec<_>>();
        prop_assert_eq!(names(&merged), names(&whole));
        prop_assert_eq!(
            merged.directives().keys().collect::<Vec<_>>(),
            whole.directives().keys().collect::<Vec<_>>()
        );
        prop_assert_eq!(merged.class_name_to_type_name(), whole.class_name_to_type_name());
    }
}
