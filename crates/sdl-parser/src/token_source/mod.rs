//! Lexers that turn SDL source text into [`SdlToken`](crate::token::SdlToken)s.

mod sdl_token_source;
mod str_sdl_token_source;

pub use sdl_token_source::SdlTokenSource;
pub use str_sdl_token_source::StrSdlTokenSource;
