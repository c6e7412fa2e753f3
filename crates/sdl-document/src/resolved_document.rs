use crate::serializer;
use crate::DecodeError;
use crate::Document;
use crate::EncodeError;
use sdl_parser::ast::TypeDefinition;
use std::ops::Deref;

/// A [`Document`] whose model bindings have been checked by
/// [`resolve_bindings`](crate::resolve_bindings).
///
/// Read-only: it derefs to the underlying document but offers no way to
/// mutate it. Its class index is keyed by canonical class names.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedDocument {
    document: Document,
}

impl ResolvedDocument {
    pub(crate) fn new(document: Document) -> Self {
        Self { document }
    }

    /// The type bound to the model class `class_name`, if any.
    pub fn model_type(&self, class_name: &str) -> Option<&TypeDefinition> {
        let type_name = self.document.type_name_for_class(class_name)?;
        self.document.type_definition(type_name)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, EncodeError> {
        serializer::encode(&self.document, serializer::StoredState::Resolved)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
        serializer::decode(bytes, serializer::StoredState::Resolved).map(Self::new)
    }
}

impl Deref for ResolvedDocument {
    type Target = Document;

    fn deref(&self) -> &Document {
        &self.document
    }
}
