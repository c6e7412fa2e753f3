use crate::SourceSpan;
use crate::token::SdlTokenKind;

/// An SDL token with its source span.
///
/// Comments, commas and whitespace are ignored tokens and never surface
/// here; the lexer skips them.
#[derive(Clone, Debug, PartialEq)]
pub struct SdlToken<'src> {
    pub kind: SdlTokenKind<'src>,
    pub span: SourceSpan,
}

impl<'src> SdlToken<'src> {
    pub fn new(kind: SdlTokenKind<'src>, span: SourceSpan) -> Self {
        Self { kind, span }
    }
}
