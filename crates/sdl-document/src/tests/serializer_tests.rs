//! Byte encoding: headers, state checks and malformed input.

use crate::ast::DirectiveLocationKind;
use crate::deserialize;
use crate::resolve_bindings;
use crate::serialize;
use crate::serializer;
use crate::serializer::StoredState;
use crate::tests::utils::parse;
use crate::tests::utils::registry;
use crate::DecodeError;
use crate::FnClassRegistry;
use crate::ResolvedDocument;
use indexmap::IndexMap;

const QUERY_WITH_MODEL: &str = r#"
type Query @model(class: "User") {
    foo: Int
}

directive @foo on FIELD
"#;

// =========================================================================
// Round trips
// =========================================================================

/// A resolved document survives encoding with its class index, fields and
/// directive definitions intact.
#[test]
fn resolved_document_round_trip() {
    let lookup = FnClassRegistry(|name: &str| {
        (name == "User").then(|| format!("Tests\\Utils\\Models\\{name}"))
    });
    let resolved = resolve_bindings(parse(QUERY_WITH_MODEL), &lookup).unwrap();

    let bytes = resolved.to_bytes().unwrap();
    let restored = ResolvedDocument::from_bytes(&bytes).unwrap();

    assert_eq!(restored, resolved);
    assert_eq!(
        restored.class_name_to_type_name(),
        &IndexMap::from([("Tests\\Utils\\Models\\User".to_string(), "Query".to_string())]),
    );
    assert_eq!(restored.types()["Query"].fields()[0].name, "foo");
    assert_eq!(
        restored.directive("foo").unwrap().locations,
        vec![DirectiveLocationKind::Field],
    );
}

#[test]
fn unresolved_document_round_trip() {
    let doc = parse(QUERY_WITH_MODEL);
    let restored = deserialize(&serialize(&doc).unwrap()).unwrap();
    assert_eq!(restored, doc);
    assert_eq!(restored.type_name_for_class("User"), Some("Query"));
}

#[test]
fn empty_document_round_trip() {
    let doc = crate::Document::new();
    let bytes = serialize(&doc).unwrap();
    assert!(deserialize(&bytes).unwrap().is_empty());
}

// =========================================================================
// Header
// =========================================================================

#[test]
fn header_layout() {
    let doc = parse(QUERY_WITH_MODEL);
    let bytes = serialize(&doc).unwrap();
    assert_eq!(&bytes[0..4], b"SDLD");
    assert_eq!(&bytes[4..6], &1u16.to_le_bytes());
    assert_eq!(bytes[6], 0);

    let resolved = resolve_bindings(doc, &registry(&["User"])).unwrap();
    assert_eq!(resolved.to_bytes().unwrap()[6], 1);
}

#[test]
fn peek_state_reads_header_only() {
    let doc = parse(QUERY_WITH_MODEL);
    let mut bytes = serialize(&doc).unwrap();
    assert_eq!(serializer::peek_state(&bytes).unwrap(), StoredState::Unresolved);

    // Payload corruption does not matter to the header.
    bytes.truncate(serializer::HEADER_LEN);
    assert_eq!(serializer::peek_state(&bytes).unwrap(), StoredState::Unresolved);

    let resolved = resolve_bindings(doc, &registry(&["User"])).unwrap();
    let bytes = resolved.to_bytes().unwrap();
    assert_eq!(serializer::peek_state(&bytes).unwrap(), StoredState::Resolved);
}

// =========================================================================
// Malformed input
// =========================================================================

#[test]
fn rejects_short_input() {
    let err = deserialize(b"SDL").unwrap_err();
    assert!(matches!(err, DecodeError::Truncated { expected: 7, found: 3 }));
}

#[test]
fn rejects_bad_magic() {
    let mut bytes = serialize(&parse(QUERY_WITH_MODEL)).unwrap();
    bytes[0] = b'X';
    let err = deserialize(&bytes).unwrap_err();
    assert!(matches!(err, DecodeError::BadMagic { found } if &found == b"XDLD"));
}

#[test]
fn rejects_other_versions() {
    let mut bytes = serialize(&parse(QUERY_WITH_MODEL)).unwrap();
    bytes[4..6].copy_from_slice(&2u16.to_le_bytes());
    let err = deserialize(&bytes).unwrap_err();
    assert!(matches!(
        err,
        DecodeError::UnsupportedVersion { found: 2, supported: 1 }
    ));
    assert_eq!(
        err.to_string(),
        "unsupported format version 2 (this build reads version 1)",
    );
}

#[test]
fn rejects_unknown_state() {
    let mut bytes = serialize(&parse(QUERY_WITH_MODEL)).unwrap();
    bytes[6] = 7;
    assert!(matches!(deserialize(&bytes).unwrap_err(), DecodeError::UnknownState(7)));
    assert!(matches!(
        serializer::peek_state(&bytes).unwrap_err(),
        DecodeError::UnknownState(7)
    ));
}

/// Each entry point only accepts the state it writes.
#[test]
fn rejects_mismatched_state() {
    let doc = parse(QUERY_WITH_MODEL);
    let unresolved = serialize(&doc).unwrap();
    let err = ResolvedDocument::from_bytes(&unresolved).unwrap_err();
    assert!(matches!(
        err,
        DecodeError::UnexpectedState {
            expected: StoredState::Resolved,
            found: StoredState::Unresolved,
        }
    ));

    let resolved = resolve_bindings(doc, &registry(&["User"])).unwrap();
    let err = deserialize(&resolved.to_bytes().unwrap()).unwrap_err();
    assert_eq!(
        err.to_string(),
        "expected a document in the unresolved state, found one in the resolved state",
    );
}

#[test]
fn rejects_truncated_payload() {
    let bytes = serialize(&parse(QUERY_WITH_MODEL)).unwrap();
    let err = deserialize(&bytes[..bytes.len() - 3]).unwrap_err();
    assert!(matches!(err, DecodeError::Payload(_)));
}

#[test]
fn rejects_trailing_bytes() {
    let mut bytes = serialize(&parse(QUERY_WITH_MODEL)).unwrap();
    bytes.extend_from_slice(&[0, 0]);
    let err = deserialize(&bytes).unwrap_err();
    assert!(matches!(err, DecodeError::TrailingBytes { count: 2 }));
}

// =========================================================================
// Class index checks
// =========================================================================

#[test]
fn rejects_unresolved_index_not_matching_types() {
    let mut doc = parse(QUERY_WITH_MODEL);
    doc.class_name_to_type_name
        .insert("Ghost".to_string(), "Query".to_string());
    let err = deserialize(&serialize(&doc).unwrap()).unwrap_err();
    assert!(matches!(
        err,
        DecodeError::IndexMismatch { ref class_name } if class_name == "Ghost"
    ));
}

#[test]
fn rejects_unresolved_index_missing_binding() {
    let mut doc = parse(QUERY_WITH_MODEL);
    doc.class_name_to_type_name.clear();
    let err = deserialize(&serialize(&doc).unwrap()).unwrap_err();
    assert!(matches!(
        err,
        DecodeError::IndexMismatch { ref class_name } if class_name == "User"
    ));
}

/// A resolved index may only point at types carrying a binding annotation.
#[test]
fn rejects_resolved_index_pointing_at_unbound_type() {
    let mut doc = parse("type Plain { a: Int }");
    doc.set_class_index(IndexMap::from([("App\\Plain".to_string(), "Plain".to_string())]));
    let bytes = ResolvedDocument::new(doc).to_bytes().unwrap();
    let err = ResolvedDocument::from_bytes(&bytes).unwrap_err();
    assert!(matches!(
        err,
        DecodeError::IndexMismatch { ref class_name } if class_name == "App\\Plain"
    ));
}

// =========================================================================
// Nesting limits
// =========================================================================

/// Replaces the first occurrence of `pattern` in `bytes` with `replacement`.
fn splice(bytes: &[u8], pattern: &[u8], replacement: &[u8]) -> Vec<u8> {
    let start = bytes
        .windows(pattern.len())
        .position(|window| window == pattern)
        .expect("pattern not found in encoded document");
    let mut spliced = bytes[..start].to_vec();
    spliced.extend_from_slice(replacement);
    spliced.extend_from_slice(&bytes[start + pattern.len()..]);
    spliced
}

#[test]
fn parser_depth_values_round_trip() {
    let depth = 60;
    let source = format!(
        "type T @x(a: {}1{}) {{ a: Int }}",
        "[".repeat(depth),
        "]".repeat(depth),
    );
    let doc = parse(&source);
    assert_eq!(deserialize(&serialize(&doc).unwrap()).unwrap(), doc);
}

/// An encoded document whose annotation argument wraps an int in `depth`
/// lists, for `depth + 1` nested values.
fn nested_value_blob(depth: usize) -> Vec<u8> {
    let bytes = serialize(&parse("type T @x(a: [[1]]) { a: Int }")).unwrap();

    // `[[1]]`: List (variant 6) of one, List of one, Int (variant 0) 1.
    let mut nested = [6u8, 1].repeat(depth);
    nested.extend_from_slice(&[0, 2]);
    splice(&bytes, &[6, 1, 6, 1, 0, 2], &nested)
}

/// A blob nesting list values far past anything the parser produces fails
/// cleanly instead of exhausting the stack.
#[test]
fn rejects_deeply_nested_values() {
    let err = deserialize(&nested_value_blob(200_000)).unwrap_err();
    assert!(matches!(err, DecodeError::TooDeep { limit: 128 }));
    assert_eq!(
        err.to_string(),
        "document payload nests values or types deeper than 128 levels",
    );
}

#[test]
fn accepts_nesting_up_to_limit() {
    let doc = deserialize(&nested_value_blob(127)).unwrap();
    assert!(doc.types().contains_key("T"));
    assert!(matches!(
        deserialize(&nested_value_blob(128)).unwrap_err(),
        DecodeError::TooDeep { .. }
    ));
}

#[test]
fn rejects_deeply_nested_list_types() {
    let bytes = serialize(&parse("type T { a: [[Int]] }")).unwrap();

    // `[[Int]]`: List (variant 1), List, Named (variant 0) "Int", then one
    // Nullable (1) per level.
    let depth = 50_000;
    let mut nested = vec![1u8; depth];
    nested.extend_from_slice(&[0, 3, b'I', b'n', b't']);
    nested.extend(std::iter::repeat_n(1u8, depth + 1));
    let crafted = splice(&bytes, &[1, 1, 0, 3, b'I', b'n', b't', 1, 1, 1], &nested);

    let err = deserialize(&crafted).unwrap_err();
    assert!(matches!(err, DecodeError::TooDeep { .. }));
}

/// The depth count is released after a failed decode.
#[test]
fn depth_limit_does_not_leak_between_decodes() {
    let too_deep = nested_value_blob(1_000);
    let at_limit = nested_value_blob(127);
    for _ in 0..200 {
        assert!(deserialize(&too_deep).is_err());
        assert!(deserialize(&at_limit).is_ok());
    }
}
