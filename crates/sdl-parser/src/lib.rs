//! A parser for GraphQL schema-definition-language (SDL) documents.
//!
//! This crate lexes and parses type-system documents (`type`, `interface`,
//! `union`, `enum`, `scalar`, `input`, `directive`, `schema` and their
//! `extend` forms) into an owned, serde-serializable [`ast`].
//!
//! ```
//! use sdl_parser::SdlParser;
//!
//! let result = SdlParser::new("type Query { hello: String }")
//!     .parse_schema_document();
//! assert!(result.is_ok());
//! ```

pub mod ast;
mod error_note;
mod parse_error;
mod parse_error_kind;
mod parse_result;
mod reserved_name_context;
mod sdl_parser;
mod source_position;
mod source_span;
mod string_parsing_error;
pub mod token;
pub mod token_source;
mod token_stream;

pub use error_note::ErrorNote;
pub use error_note::ErrorNoteKind;
pub use error_note::ErrorNotes;
pub use parse_error::ParseError;
pub use parse_error_kind::ParseErrorKind;
pub use parse_result::ParseResult;
pub use reserved_name_context::ReservedNameContext;
pub use sdl_parser::SdlParser;
pub use smallvec::smallvec;
pub use smallvec::SmallVec;
pub use source_position::SourcePosition;
pub use source_span::SourceSpan;
pub use string_parsing_error::StringParsingError;
pub use string_parsing_error::ValueParsingError;
pub use token_stream::SdlTokenStream;

#[cfg(test)]
mod tests;
