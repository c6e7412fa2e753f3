//! Bounded lookahead over an [`SdlTokenSource`].

use std::collections::VecDeque;

use crate::token::SdlToken;
use crate::token::SdlTokenKind;
use crate::token_source::SdlTokenSource;

/// Buffers tokens from a [`SdlTokenSource`] so the parser can peek ahead.
///
/// Unconsumed tokens sit in a [`VecDeque`]; `consume()` pops the front.
pub struct SdlTokenStream<'src, TTokenSource: SdlTokenSource<'src>> {
    token_source: TTokenSource,
    buffer: VecDeque<SdlToken<'src>>,
}

impl<'src, TTokenSource: SdlTokenSource<'src>> SdlTokenStream<'src, TTokenSource> {
    pub fn new(token_source: TTokenSource) -> Self {
        Self {
            token_source,
            buffer: VecDeque::new(),
        }
    }

    /// Advances past the next token and returns it.
    pub fn consume(&mut self) -> Option<SdlToken<'src>> {
        self.ensure_buffer_has(1);
        self.buffer.pop_front()
    }

    fn ensure_buffer_has(&mut self, count: usize) {
        while self.buffer.len() < count {
            match self.token_source.next() {
                Some(token) => self.buffer.push_back(token),
                None => break,
            }
        }
    }

    /// `true` when no tokens remain or the next one is `Eof`.
    pub fn is_at_end(&mut self) -> bool {
        match self.peek() {
            None => true,
            Some(token) => matches!(token.kind, SdlTokenKind::Eof),
        }
    }

    #[inline]
    pub fn peek(&mut self) -> Option<&SdlToken<'src>> {
        self.peek_nth(0)
    }

    /// `peek_nth(0)` is `peek()`.
    pub fn peek_nth(&mut self, n: usize) -> Option<&SdlToken<'src>> {
        self.ensure_buffer_has(n + 1);
        self.buffer.get(n)
    }
}
