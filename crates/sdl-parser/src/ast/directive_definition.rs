use crate::ast::AstPos;
use crate::ast::InputValueDefinition;
use crate::ast::NamedNode;
use inherent::inherent;
use serde::Deserialize;
use serde::Serialize;

/// `directive @name(args) repeatable on LOCATION | ...`
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct DirectiveDefinition {
    pub position: AstPos,
    pub description: Option<String>,
    pub name: String,
    pub arguments: Vec<InputValueDefinition>,
    pub repeatable: bool,
    pub locations: Vec<DirectiveLocationKind>,
}

#[inherent]
impl NamedNode for DirectiveDefinition {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn position(&self) -> AstPos {
        self.position
    }
}

/// Where a directive may be applied.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum DirectiveLocationKind {
    ArgumentDefinition,
    Enum,
    EnumValue,
    Field,
    FieldDefinition,
    FragmentDefinition,
    FragmentSpread,
    InlineFragment,
    InputFieldDefinition,
    InputObject,
    Interface,
    Mutation,
    Object,
    Query,
    Scalar,
    Schema,
    Subscription,
    Union,
    VariableDefinition,
}

impl DirectiveLocationKind {
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "ARGUMENT_DEFINITION" => Self::ArgumentDefinition,
            "ENUM" => Self::Enum,
            "ENUM_VALUE" => Self::EnumValue,
            "FIELD" => Self::Field,
            "FIELD_DEFINITION" => Self::FieldDefinition,
            "FRAGMENT_DEFINITION" => Self::FragmentDefinition,
            "FRAGMENT_SPREAD" => Self::FragmentSpread,
            "INLINE_FRAGMENT" => Self::InlineFragment,
            "INPUT_FIELD_DEFINITION" => Self::InputFieldDefinition,
            "INPUT_OBJECT" => Self::InputObject,
            "INTERFACE" => Self::Interface,
            "MUTATION" => Self::Mutation,
            "OBJECT" => Self::Object,
            "QUERY" => Self::Query,
            "SCALAR" => Self::Scalar,
            "SCHEMA" => Self::Schema,
            "SUBSCRIPTION" => Self::Subscription,
            "UNION" => Self::Union,
            "VARIABLE_DEFINITION" => Self::VariableDefinition,
            _ => return None,
        })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ArgumentDefinition => "ARGUMENT_DEFINITION",
            Self::Enum => "ENUM",
            Self::EnumValue => "ENUM_VALUE",
            Self::Field => "FIELD",
            Self::FieldDefinition => "FIELD_DEFINITION",
            Self::FragmentDefinition => "FRAGMENT_DEFINITION",
            Self::FragmentSpread => "FRAGMENT_SPREAD",
            Self::InlineFragment => "INLINE_FRAGMENT",
            Self::InputFieldDefinition => "INPUT_FIELD_DEFINITION",
            Self::InputObject => "INPUT_OBJECT",
            Self::Interface => "INTERFACE",
            Self::Mutation => "MUTATION",
            Self::Object => "OBJECT",
            Self::Query => "QUERY",
            Self::Scalar => "SCALAR",
            Self::Schema => "SCHEMA",
            Self::Subscription => "SUBSCRIPTION",
            Self::Union => "UNION",
            Self::VariableDefinition => "VARIABLE_DEFINITION",
        }
    }
}
