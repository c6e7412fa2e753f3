//! Owned AST for SDL documents.
//!
//! Every node owns its strings (no borrow of the source text) and derives
//! serde, so a parsed tree can outlive its input and be persisted. Nodes
//! carry a 1-based [`AstPos`] pointing at their first token.

mod decode_depth;
mod directive_definition;
mod schema_definition;
mod type_annotation;
mod type_definitions;
mod value;

pub use decode_depth::DECODE_DEPTH_EXCEEDED;
pub use decode_depth::MAX_DECODE_DEPTH;
pub use directive_definition::DirectiveDefinition;
pub use directive_definition::DirectiveLocationKind;
pub use schema_definition::RootOperationKind;
pub use schema_definition::SchemaDefinition;
pub use type_annotation::Nullability;
pub use type_annotation::TypeAnnotation;
pub use type_definitions::EnumTypeDefinition;
pub use type_definitions::EnumValueDefinition;
pub use type_definitions::FieldDefinition;
pub use type_definitions::InputObjectTypeDefinition;
pub use type_definitions::InputValueDefinition;
pub use type_definitions::InterfaceTypeDefinition;
pub use type_definitions::ObjectTypeDefinition;
pub use type_definitions::ScalarTypeDefinition;
pub use type_definitions::TypeDefinition;
pub use type_definitions::TypeExtension;
pub use type_definitions::UnionTypeDefinition;
pub use value::Argument;
pub use value::DirectiveAnnotation;
pub use value::ObjectField;
pub use value::Value;

use serde::Deserialize;
use serde::Serialize;

/// A 1-based line/column position in the source text.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct AstPos {
    pub line: usize,
    pub column: usize,
}

impl std::fmt::Display for AstPos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Implemented by every named definition node.
pub trait NamedNode {
    fn name(&self) -> &str;
    fn position(&self) -> AstPos;
}

/// A parsed SDL document: its definitions in source order.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Document {
    pub definitions: Vec<Definition>,
}

/// A top-level definition.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub enum Definition {
    Schema(SchemaDefinition),
    SchemaExtension(SchemaDefinition),
    Type(TypeDefinition),
    TypeExtension(TypeExtension),
    Directive(DirectiveDefinition),
}

impl Definition {
    /// The definition's name. `None` for `schema` blocks, which are
    /// anonymous.
    pub fn name(&self) -> Option<&str> {
        match self {
            Definition::Schema(_) | Definition::SchemaExtension(_) => None,
            Definition::Type(def) => Some(def.name()),
            Definition::TypeExtension(ext) => Some(ext.name()),
            Definition::Directive(def) => Some(&def.name),
        }
    }

    pub fn position(&self) -> AstPos {
        match self {
            Definition::Schema(def) | Definition::SchemaExtension(def) => def.position,
            Definition::Type(def) => def.position(),
            Definition::TypeExtension(ext) => ext.position(),
            Definition::Directive(def) => def.position,
        }
    }
}
