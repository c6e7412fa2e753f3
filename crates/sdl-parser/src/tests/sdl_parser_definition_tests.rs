//! Type-system definitions: scalars, objects, interfaces, unions, enums,
//! inputs, directives and their extensions.

use crate::ast;
use crate::tests::ast_utils::extract_first_directive_def;
use crate::tests::ast_utils::extract_first_enum_type;
use crate::tests::ast_utils::extract_first_input_object_type;
use crate::tests::ast_utils::extract_first_interface_type;
use crate::tests::ast_utils::extract_first_object_type;
use crate::tests::ast_utils::extract_first_type;
use crate::tests::ast_utils::extract_first_type_extension;
use crate::tests::ast_utils::extract_first_union_type;
use crate::tests::utils::parse_schema;

// =============================================================================
// Scalars and objects
// =============================================================================

/// A scalar with an annotation keeps both its name and the annotation.
#[test]
fn scalar_with_directive() {
    let def = extract_first_type("scalar DateTime @specifiedBy(url: \"https://example.com\")");
    let ast::TypeDefinition::Scalar(scalar) = def else {
        panic!("Expected scalar, got: {def:?}");
    };
    assert_eq!(scalar.name, "DateTime");
    assert_eq!(scalar.directives.len(), 1);
    assert_eq!(scalar.directives[0].name, "specifiedBy");
    assert_eq!(
        scalar.directives[0].argument("url"),
        Some(&ast::Value::String("https://example.com".to_string())),
    );
}

/// Fields keep declaration order, arguments and type annotations.
#[test]
fn object_fields_in_order() {
    let obj = extract_first_object_type(
        "type Query { user(id: ID!, active: Boolean): User  users: [User!]! }",
    );
    assert_eq!(obj.name, "Query");
    let names: Vec<_> = obj.fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["user", "users"]);

    let user = &obj.fields[0];
    assert_eq!(user.arguments.len(), 2);
    assert_eq!(user.arguments[0].name, "id");
    assert_eq!(user.arguments[0].value_type.to_string(), "ID!");
    assert_eq!(user.arguments[1].value_type.to_string(), "Boolean");
    assert_eq!(user.field_type.to_string(), "User");
    assert_eq!(obj.fields[1].field_type.to_string(), "[User!]!");
}

/// `implements` accepts a leading `&` and `&`-separated names.
#[test]
fn object_implements_interfaces() {
    let obj = extract_first_object_type("type User implements & Node & Entity { id: ID! }");
    assert_eq!(obj.implements, vec!["Node", "Entity"]);
}

/// The legacy comma-separated `implements` form still parses.
#[test]
fn object_implements_legacy_commas() {
    let obj = extract_first_object_type("type User implements Node, Entity { id: ID! }");
    assert_eq!(obj.implements, vec!["Node", "Entity"]);
}

/// An object without a body is valid SDL.
#[test]
fn object_without_fields() {
    let obj = extract_first_object_type("type Marker @model(class: \"Marker\")");
    assert!(obj.fields.is_empty());
    assert_eq!(obj.directives[0].name, "model");
}

/// `true`, `false` and `null` are valid field names.
#[test]
fn keyword_like_field_names() {
    let obj = extract_first_object_type("type T { null: Int true: Int type: String }");
    let names: Vec<_> = obj.fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["null", "true", "type"]);
}

/// Descriptions are attached to types, fields and arguments; block strings
/// are dedented.
#[test]
fn descriptions() {
    let obj = extract_first_object_type(
        r#"
        """
          The root.
            Indented.
        """
        type Query {
          "Fetch one"
          user("the id" id: ID): User
        }
        "#,
    );
    assert_eq!(obj.description.as_deref(), Some("The root.\n  Indented."));
    assert_eq!(obj.fields[0].description.as_deref(), Some("Fetch one"));
    assert_eq!(obj.fields[0].arguments[0].description.as_deref(), Some("the id"));
}

// =============================================================================
// Interfaces, unions, enums, inputs
// =============================================================================

#[test]
fn interface_with_fields() {
    let iface = extract_first_interface_type("interface Node implements Base { id: ID! }");
    assert_eq!(iface.name, "Node");
    assert_eq!(iface.implements, vec!["Base"]);
    assert_eq!(iface.fields[0].name, "id");
}

/// Union members accept an optional leading `|`.
#[test]
fn union_members() {
    let union = extract_first_union_type("union SearchResult = | User | Post");
    assert_eq!(union.members, vec!["User", "Post"]);

    let union = extract_first_union_type("union Single = User");
    assert_eq!(union.members, vec!["User"]);
}

#[test]
fn enum_values_with_directives() {
    let enum_def = extract_first_enum_type(
        "enum Role { ADMIN USER @deprecated(reason: \"use MEMBER\") MEMBER }",
    );
    let names: Vec<_> = enum_def.values.iter().map(|v| v.name.as_str()).collect();
    assert_eq!(names, vec!["ADMIN", "USER", "MEMBER"]);
    assert_eq!(enum_def.values[1].directives[0].name, "deprecated");
}

/// Input fields carry default values and annotations.
#[test]
fn input_object_defaults() {
    let input = extract_first_input_object_type(
        "input Filter { limit: Int = 10 @rules(apply: [\"min:1\"]) order: Order = ASC }",
    );
    assert_eq!(input.fields.len(), 2);
    assert_eq!(input.fields[0].default_value, Some(ast::Value::Int(10)));
    assert_eq!(input.fields[0].directives[0].name, "rules");
    assert_eq!(
        input.fields[1].default_value,
        Some(ast::Value::Enum("ASC".to_string())),
    );
}

// =============================================================================
// Directive definitions
// =============================================================================

#[test]
fn directive_definition_full() {
    let directive = extract_first_directive_def(
        "\"Binds a type\" directive @model(class: String!) repeatable on | OBJECT | INTERFACE",
    );
    assert_eq!(directive.name, "model");
    assert_eq!(directive.description.as_deref(), Some("Binds a type"));
    assert!(directive.repeatable);
    assert_eq!(directive.arguments[0].name, "class");
    assert_eq!(
        directive.locations,
        vec![
            ast::DirectiveLocationKind::Object,
            ast::DirectiveLocationKind::Interface,
        ],
    );
}

/// Every location name maps back to itself.
#[test]
fn directive_location_names() {
    let directive = extract_first_directive_def(
        "directive @all on SCHEMA | SCALAR | OBJECT | FIELD_DEFINITION | ARGUMENT_DEFINITION \
         | INTERFACE | UNION | ENUM | ENUM_VALUE | INPUT_OBJECT | INPUT_FIELD_DEFINITION \
         | QUERY | MUTATION | SUBSCRIPTION | FIELD | FRAGMENT_DEFINITION | FRAGMENT_SPREAD \
         | INLINE_FRAGMENT | VARIABLE_DEFINITION",
    );
    assert_eq!(directive.locations.len(), 19);
    for location in &directive.locations {
        assert_eq!(
            ast::DirectiveLocationKind::from_name(location.as_str()),
            Some(*location),
        );
    }
}

// =============================================================================
// Extensions
// =============================================================================

#[test]
fn extend_object_type() {
    let ext = extract_first_type_extension("extend type Query { extra: Int }");
    assert_eq!(ext.name(), "Query");
    let ast::TypeDefinition::Object(obj) = ext.definition() else {
        panic!("Expected object extension, got: {ext:?}");
    };
    assert_eq!(obj.fields[0].name, "extra");
    assert!(obj.description.is_none());
}

#[test]
fn extend_union_and_enum() {
    let doc = parse_schema("extend union U = C\nextend enum E @tag");
    assert_eq!(doc.definitions.len(), 2);
    assert!(matches!(
        &doc.definitions[0],
        ast::Definition::TypeExtension(ext) if ext.definition().keyword() == "union"
    ));
    assert!(matches!(
        &doc.definitions[1],
        ast::Definition::TypeExtension(ext) if ext.definition().keyword() == "enum"
    ));
}

// =============================================================================
// Positions and ordering
// =============================================================================

/// Positions are 1-based and point at the first token of each node.
#[test]
fn node_positions() {
    let obj = extract_first_object_type("\n  type Query {\n    hello: String\n  }");
    assert_eq!(obj.position, ast::AstPos { line: 2, column: 3 });
    assert_eq!(obj.fields[0].position, ast::AstPos { line: 3, column: 5 });
}

/// Definitions appear in source order; repeated names are all kept by the
/// parser (deduplication is the document model's job).
#[test]
fn definitions_in_source_order() {
    let doc = parse_schema("type A { a: Int } directive @d on OBJECT type A { b: Int }");
    let names: Vec<_> = doc.definitions.iter().filter_map(|d| d.name()).collect();
    assert_eq!(names, vec!["A", "d", "A"]);
}

/// Comments and commas are ignored.
#[test]
fn comments_and_commas_ignored() {
    let obj = extract_first_object_type("# leading\ntype T { a: Int, # trailing\n b: Int,, }");
    assert_eq!(obj.fields.len(), 2);
}

/// `parse_definition` parses a single snippet.
#[test]
fn parse_single_definition() {
    let result = crate::SdlParser::new("type Query { replaced: Boolean }").parse_definition();
    let def = result.into_valid_ast().unwrap();
    assert_eq!(def.name(), Some("Query"));
}

/// `parse_definition` rejects trailing definitions.
#[test]
fn parse_single_definition_rejects_trailing() {
    let result = crate::SdlParser::new("type A { a: Int } type B { b: Int }").parse_definition();
    assert!(result.ast().is_none());
    assert_eq!(
        result.errors[0].message(),
        "expected end of input, found `type`",
    );
}
