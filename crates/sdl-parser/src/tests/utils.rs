//! Shared helpers for parser tests.

use crate::ast;
use crate::token::SdlToken;
use crate::token::SdlTokenKind;
use crate::ParseError;
use crate::SdlParser;
use crate::SourcePosition;
use crate::SourceSpan;

/// Parses `source` and panics (with every error) unless it is fully valid.
pub fn parse_schema(source: &str) -> ast::Document {
    let result = SdlParser::new(source).parse_schema_document();
    if result.has_errors() {
        panic!(
            "expected `{source}` to parse cleanly, got:\n{}",
            result.format_errors(Some(source)),
        );
    }
    result.into_valid_ast().unwrap()
}

/// Parses `source` and returns its errors, panicking if there are none.
pub fn parse_errors(source: &str) -> Vec<ParseError> {
    let result = SdlParser::new(source).parse_schema_document();
    assert!(
        result.has_errors(),
        "expected `{source}` to produce errors",
    );
    result.errors
}

/// A token with a zero-width span at the start of the input.
pub fn mock_token(kind: SdlTokenKind<'static>) -> SdlToken<'static> {
    let pos = SourcePosition::new(0, 0, 0);
    SdlToken::new(kind, SourceSpan::new(pos.clone(), pos))
}

/// Yields a fixed list of tokens.
pub struct MockTokenSource {
    tokens: std::vec::IntoIter<SdlToken<'static>>,
}

impl MockTokenSource {
    pub fn new(tokens: Vec<SdlToken<'static>>) -> Self {
        Self {
            tokens: tokens.into_iter(),
        }
    }
}

impl Iterator for MockTokenSource {
    type Item = SdlToken<'static>;

    fn next(&mut self) -> Option<Self::Item> {
        self.tokens.next()
    }
}
