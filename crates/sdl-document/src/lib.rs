//! A document model for GraphQL SDL.
//!
//! A [`Document`] holds the type and directive definitions of one or more
//! parsed SDL sources, keyed by name. Documents can be merged (later
//! definitions replace earlier ones), checked against the host
//! application's model classes with [`resolve_bindings`], and cached as
//! bytes with [`serialize`] / [`deserialize`].
//!
//! ```
//! use sdl_document::Document;
//! use std::collections::HashSet;
//!
//! let doc = Document::parse(r#"
//!     type Query @model(class: "User") {
//!         me: String
//!     }
//! "#).unwrap();
//!
//! let registry: HashSet<String> = HashSet::from(["User".to_string()]);
//! let resolved = sdl_document::resolve_bindings(doc, &registry).unwrap();
//! assert_eq!(resolved.type_name_for_class("User"), Some("Query"));
//!
//! let bytes = resolved.to_bytes().unwrap();
//! let restored = sdl_document::ResolvedDocument::from_bytes(&bytes).unwrap();
//! assert_eq!(restored.types().len(), 1);
//! ```

mod binding_options;
mod bindings;
mod class_registry;
mod decode_error;
mod definition_error;
mod document;
mod encode_error;
mod file_reader;
mod load_error;
mod merge;
mod resolved_document;
pub mod serializer;
mod syntax_error;

pub use binding_options::BindingOptions;
pub use bindings::DuplicateBinding;
pub use bindings::resolve_bindings;
pub use class_registry::ClassRegistry;
pub use class_registry::FnClassRegistry;
pub use decode_error::DecodeError;
pub use definition_error::DefinitionError;
pub use document::Document;
pub use encode_error::EncodeError;
pub use file_reader::ReadContentError;
pub use load_error::LoadError;
pub use merge::merge;
pub use resolved_document::ResolvedDocument;
pub use serializer::deserialize;
pub use serializer::serialize;
pub use syntax_error::SyntaxError;

pub use sdl_parser::ast;

#[cfg(test)]
mod tests;
