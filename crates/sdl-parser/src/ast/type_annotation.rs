use crate::ast::decode_depth::DecodeDepthGuard;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;

/// Whether a type reference carries a trailing `!`.
///
/// Stored on each level of a [`TypeAnnotation`], so `[String!]!` is a
/// non-null list of non-null `String` without a recursive `NonNull` wrapper.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Nullability {
    NonNull,
    Nullable,
}

/// A reference to a type: `Name`, `[T]`, with optional `!` on each level.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize)]
pub enum TypeAnnotation {
    Named {
        name: String,
        nullability: Nullability,
    },
    List {
        element: Box<TypeAnnotation>,
        nullability: Nullability,
    },
}

#[derive(Deserialize)]
#[serde(rename = "TypeAnnotation")]
enum TypeAnnotationRepr {
    Named {
        name: String,
        nullability: Nullability,
    },
    List {
        element: Box<TypeAnnotation>,
        nullability: Nullability,
    },
}

impl<'de> Deserialize<'de> for TypeAnnotation {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let _depth = DecodeDepthGuard::enter::<D::Error>()?;
        Ok(match TypeAnnotationRepr::deserialize(deserializer)? {
            TypeAnnotationRepr::Named { name, nullability } => {
                TypeAnnotation::Named { name, nullability }
            },
            TypeAnnotationRepr::List { element, nullability } => {
                TypeAnnotation::List { element, nullability }
            },
        })
    }
}

impl TypeAnnotation {
    /// The named type at the core of the annotation (`User` for `[User!]!`).
    pub fn innermost_name(&self) -> &str {
        match self {
            TypeAnnotation::Named { name, .. } => name,
            TypeAnnotation::List { element, .. } => element.innermost_name(),
        }
    }

    pub fn is_non_null(&self) -> bool {
        matches!(
            self,
            TypeAnnotation::Named { nullability: Nullability::NonNull, .. }
                | TypeAnnotation::List { nullability: Nullability::NonNull, .. }
        )
    }
}

impl std::fmt::Display for TypeAnnotation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let nullability = match self {
            TypeAnnotation::Named { name, nullability } => {
                write!(f, "{name}")?;
                nullability
            },
            TypeAnnotation::List { element, nullability } => {
                write!(f, "[{element}]")?;
                nullability
            },
        };
        if *nullability == Nullability::NonNull {
            write!(f, "!")?;
        }
        Ok(())
    }
}
