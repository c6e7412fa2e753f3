//! Token types produced by SDL lexers and consumed by the parser.

mod sdl_token;
mod sdl_token_kind;
mod string_literal;

pub use sdl_token::SdlToken;
pub use sdl_token_kind::SdlTokenKind;

#[cfg(test)]
mod tests;
