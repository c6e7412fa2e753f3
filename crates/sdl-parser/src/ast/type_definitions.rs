use crate::ast::AstPos;
use crate::ast::DirectiveAnnotation;
use crate::ast::NamedNode;
use crate::ast::TypeAnnotation;
use crate::ast::Value;
use inherent::inherent;
use serde::Deserialize;
use serde::Serialize;

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct ScalarTypeDefinition {
    pub position: AstPos,
    pub description: Option<String>,
    pub name: String,
    pub directives: Vec<DirectiveAnnotation>,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct ObjectTypeDefinition {
    pub position: AstPos,
    pub description: Option<String>,
    pub name: String,
    pub implements: Vec<String>,
    pub directives: Vec<DirectiveAnnotation>,
    pub fields: Vec<FieldDefinition>,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct InterfaceTypeDefinition {
    pub position: AstPos,
    pub description: Option<String>,
    pub name: String,
    pub implements: Vec<String>,
    pub directives: Vec<DirectiveAnnotation>,
    pub fields: Vec<FieldDefinition>,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct UnionTypeDefinition {
    pub position: AstPos,
    pub description: Option<String>,
    pub name: String,
    pub directives: Vec<DirectiveAnnotation>,
    pub members: Vec<String>,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct EnumTypeDefinition {
    pub position: AstPos,
    pub description: Option<String>,
    pub name: String,
    pub directives: Vec<DirectiveAnnotation>,
    pub values: Vec<EnumValueDefinition>,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct InputObjectTypeDefinition {
    pub position: AstPos,
    pub description: Option<String>,
    pub name: String,
    pub directives: Vec<DirectiveAnnotation>,
    pub fields: Vec<InputValueDefinition>,
}

/// A field of an object or interface type.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct FieldDefinition {
    pub position: AstPos,
    pub description: Option<String>,
    pub name: String,
    pub arguments: Vec<InputValueDefinition>,
    pub field_type: TypeAnnotation,
    pub directives: Vec<DirectiveAnnotation>,
}

/// A field argument, an input object field, or a directive argument.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct InputValueDefinition {
    pub position: AstPos,
    pub description: Option<String>,
    pub name: String,
    pub value_type: TypeAnnotation,
    pub default_value: Option<Value>,
    pub directives: Vec<DirectiveAnnotation>,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct EnumValueDefinition {
    pub position: AstPos,
    pub description: Option<String>,
    pub name: String,
    pub directives: Vec<DirectiveAnnotation>,
}

macro_rules! impl_named_node {
    ($($node:ty),* $(,)?) => {
        $(
            #[inherent]
            impl NamedNode for $node {
                pub fn name(&self) -> &str {
                    &self.name
                }

                pub fn position(&self) -> AstPos {
                    self.position
                }
            }
        )*
    };
}

impl_named_node!(
    ScalarTypeDefinition,
    ObjectTypeDefinition,
    InterfaceTypeDefinition,
    UnionTypeDefinition,
    EnumTypeDefinition,
    InputObjectTypeDefinition,
    FieldDefinition,
    InputValueDefinition,
    EnumValueDefinition,
);

/// A named type definition. The six kinds share one namespace.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub enum TypeDefinition {
    Scalar(ScalarTypeDefinition),
    Object(ObjectTypeDefinition),
    Interface(InterfaceTypeDefinition),
    Union(UnionTypeDefinition),
    Enum(EnumTypeDefinition),
    InputObject(InputObjectTypeDefinition),
}

impl TypeDefinition {
    /// The SDL keyword that introduces this kind of definition.
    pub fn keyword(&self) -> &'static str {
        match self {
            TypeDefinition::Scalar(_) => "scalar",
            TypeDefinition::Object(_) => "type",
            TypeDefinition::Interface(_) => "interface",
            TypeDefinition::Union(_) => "union",
            TypeDefinition::Enum(_) => "enum",
            TypeDefinition::InputObject(_) => "input",
        }
    }

    pub fn description(&self) -> Option<&str> {
        match self {
            TypeDefinition::Scalar(def) => def.description.as_deref(),
            TypeDefinition::Object(def) => def.description.as_deref(),
            TypeDefinition::Interface(def) => def.description.as_deref(),
            TypeDefinition::Union(def) => def.description.as_deref(),
            TypeDefinition::Enum(def) => def.description.as_deref(),
            TypeDefinition::InputObject(def) => def.description.as_deref(),
        }
    }

    /// Annotations applied to the definition itself (not to its fields).
    pub fn directives(&self) -> &[DirectiveAnnotation] {
        match self {
            TypeDefinition::Scalar(def) => &def.directives,
            TypeDefinition::Object(def) => &def.directives,
            TypeDefinition::Interface(def) => &def.directives,
            TypeDefinition::Union(def) => &def.directives,
            TypeDefinition::Enum(def) => &def.directives,
            TypeDefinition::InputObject(def) => &def.directives,
        }
    }

    /// Annotations on the definition with the given name, in source order.
    pub fn directives_named<'a>(
        &'a self,
        name: &'a str,
    ) -> impl Iterator<Item = &'a DirectiveAnnotation> + 'a {
        self.directives().iter().filter(move |d| d.name == name)
    }

    /// Field definitions of object and interface types. Empty for other
    /// kinds.
    pub fn fields(&self) -> &[FieldDefinition] {
        match self {
            TypeDefinition::Object(def) => &def.fields,
            TypeDefinition::Interface(def) => &def.fields,
            _ => &[],
        }
    }
}

#[inherent]
impl NamedNode for TypeDefinition {
    pub fn name(&self) -> &str {
        match self {
            TypeDefinition::Scalar(def) => &def.name,
            TypeDefinition::Object(def) => &def.name,
            TypeDefinition::Interface(def) => &def.name,
            TypeDefinition::Union(def) => &def.name,
            TypeDefinition::Enum(def) => &def.name,
            TypeDefinition::InputObject(def) => &def.name,
        }
    }

    pub fn position(&self) -> AstPos {
        match self {
            TypeDefinition::Scalar(def) => def.position,
            TypeDefinition::Object(def) => def.position,
            TypeDefinition::Interface(def) => def.position,
            TypeDefinition::Union(def) => def.position,
            TypeDefinition::Enum(def) => def.position,
            TypeDefinition::InputObject(def) => def.position,
        }
    }
}

/// An `extend <kind> Name ...` block.
///
/// Extensions reuse the definition node of their kind; `description` is
/// always `None` and the member lists hold only what the extension adds.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct TypeExtension(pub TypeDefinition);

impl TypeExtension {
    pub fn definition(&self) -> &TypeDefinition {
        &self.0
    }

    pub fn into_definition(self) -> TypeDefinition {
        self.0
    }
}

#[inherent]
impl NamedNode for TypeExtension {
    pub fn name(&self) -> &str {
        self.0.name()
    }

    pub fn position(&self) -> AstPos {
        self.0.position()
    }
}
