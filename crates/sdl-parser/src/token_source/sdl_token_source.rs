use crate::token::SdlToken;

/// Marker trait for SDL lexers: iterators over [`SdlToken`]s.
///
/// Implementors skip ignored tokens (whitespace, commas, comments), emit
/// [`SdlTokenKind::Error`](crate::token::SdlTokenKind::Error) instead of
/// stopping on bad input, and finish with exactly one
/// [`SdlTokenKind::Eof`](crate::token::SdlTokenKind::Eof).
/// Lookahead and buffering live in [`SdlTokenStream`](crate::SdlTokenStream).
pub trait SdlTokenSource<'src>: Iterator<Item = SdlToken<'src>> {}

impl<'src, T> SdlTokenSource<'src> for T where T: Iterator<Item = SdlToken<'src>> {}
