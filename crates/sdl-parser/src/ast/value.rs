use crate::ast::decode_depth::DecodeDepthGuard;
use crate::ast::AstPos;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;

/// A constant input value, as written in annotation arguments and default
/// values.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum Value {
    Int(i32),
    Float(f64),
    String(String),
    Boolean(bool),
    Null,
    Enum(String),
    List(Vec<Value>),
    Object(Vec<ObjectField>),
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Short name of the value's kind for diagnostics ("string", "list").
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Boolean(_) => "boolean",
            Value::Null => "null",
            Value::Enum(_) => "enum",
            Value::List(_) => "list",
            Value::Object(_) => "object",
        }
    }
}

/// Wire shape of [`Value`]; decoding goes through it so every nested
/// level is counted.
#[derive(Deserialize)]
#[serde(rename = "Value")]
enum ValueRepr {
    Int(i32),
    Float(f64),
    String(String),
    Boolean(bool),
    Null,
    Enum(String),
    List(Vec<Value>),
    Object(Vec<ObjectField>),
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let _depth = DecodeDepthGuard::enter::<D::Error>()?;
        Ok(match ValueRepr::deserialize(deserializer)? {
            ValueRepr::Int(v) => Value::Int(v),
            ValueRepr::Float(v) => Value::Float(v),
            ValueRepr::String(v) => Value::String(v),
            ValueRepr::Boolean(v) => Value::Boolean(v),
            ValueRepr::Null => Value::Null,
            ValueRepr::Enum(v) => Value::Enum(v),
            ValueRepr::List(items) => Value::List(items),
            ValueRepr::Object(fields) => Value::Object(fields),
        })
    }
}

/// One `name: value` entry of an object value.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct ObjectField {
    pub name: String,
    pub value: Value,
}

/// One `name: value` argument of a directive annotation.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Argument {
    pub position: AstPos,
    pub name: String,
    pub value: Value,
}

/// An applied directive, e.g. `@model(class: "App\\User")`.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct DirectiveAnnotation {
    pub position: AstPos,
    pub name: String,
    pub arguments: Vec<Argument>,
}

impl DirectiveAnnotation {
    /// Value of the named argument. The last occurrence wins if an argument
    /// is repeated.
    pub fn argument(&self, name: &str) -> Option<&Value> {
        self.arguments
            .iter()
            .rev()
            .find(|arg| arg.name == name)
            .map(|arg| &arg.value)
    }
}
