//! A zero-copy [`SdlTokenSource`](super::SdlTokenSource) over a `&str`.
//!
//! ```rust
//! use sdl_parser::token::SdlTokenKind;
//! use sdl_parser::token_source::StrSdlTokenSource;
//!
//! let kinds: Vec<_> = StrSdlTokenSource::new("type Query")
//!     .map(|t| t.kind)
//!     .collect();
//! assert_eq!(kinds, vec![
//!     SdlTokenKind::name_borrowed("type"),
//!     SdlTokenKind::name_borrowed("Query"),
//!     SdlTokenKind::Eof,
//! ]);
//! ```

use crate::smallvec;
use crate::token::SdlToken;
use crate::token::SdlTokenKind;
use crate::ErrorNote;
use crate::SourcePosition;
use crate::SourceSpan;
use std::borrow::Cow;
use std::path::Path;

const INT_VALUE_SPEC_URL: &str = "https://spec.graphql.org/October2021/#sec-Int-Value";
const FLOAT_VALUE_SPEC_URL: &str = "https://spec.graphql.org/October2021/#sec-Float-Value";

pub struct StrSdlTokenSource<'src> {
    source: &'src str,

    /// The remaining text is `&source[curr_byte_offset..]`.
    curr_byte_offset: usize,
    curr_line: usize,
    /// Counts characters, not bytes.
    curr_column: usize,
    /// Set after `\r` so that a following `\n` is not counted twice.
    last_char_was_cr: bool,

    finished: bool,
    file_path: Option<&'src Path>,
}

impl<'src> StrSdlTokenSource<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            curr_byte_offset: 0,
            curr_line: 0,
            curr_column: 0,
            last_char_was_cr: false,
            finished: false,
            file_path: None,
        }
    }

    /// Like [`new`](Self::new), but spans carry `path` for diagnostics.
    pub fn with_file_path(source: &'src str, path: &'src Path) -> Self {
        Self {
            file_path: Some(path),
            ..Self::new(source)
        }
    }

    // =========================================================================
    // Position and scanning helpers
    // =========================================================================

    fn remaining(&self) -> &'src str {
        &self.source[self.curr_byte_offset..]
    }

    fn curr_position(&self) -> SourcePosition {
        SourcePosition::new(self.curr_line, self.curr_column, self.curr_byte_offset)
    }

    fn peek_char(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    fn peek_char_nth(&self, n: usize) -> Option<char> {
        self.remaining().chars().nth(n)
    }

    /// Consumes one character, tracking `\n`, `\r` and `\r\n` line breaks.
    fn consume(&mut self) -> Option<char> {
        let ch = self.peek_char()?;
        match ch {
            '\n' if self.last_char_was_cr => {
                self.last_char_was_cr = false;
            },
            '\n' | '\r' => {
                self.curr_line += 1;
                self.curr_column = 0;
                self.last_char_was_cr = ch == '\r';
            },
            _ => {
                self.curr_column += 1;
                self.last_char_was_cr = false;
            },
        }
        self.curr_byte_offset += ch.len_utf8();
        Some(ch)
    }

    fn consume_while(&mut self, pred: impl Fn(char) -> bool) {
        while let Some(ch) = self.peek_char() {
            if !pred(ch) {
                break;
            }
            self.consume();
        }
    }

    fn make_span(&self, start: SourcePosition) -> SourceSpan {
        let end = self.curr_position();
        match self.file_path {
            Some(path) => SourceSpan::with_file(start, end, path.to_path_buf()),
            None => SourceSpan::new(start, end),
        }
    }

    fn punctuator(&mut self, start: SourcePosition, kind: SdlTokenKind<'src>) -> SdlToken<'src> {
        self.consume();
        SdlToken::new(kind, self.make_span(start))
    }

    // =========================================================================
    // Lexer main loop
    // =========================================================================

    fn next_token(&mut self) -> SdlToken<'src> {
        self.skip_ignored();
        let start = self.curr_position();

        match self.peek_char() {
            None => SdlToken::new(SdlTokenKind::Eof, self.make_span(start)),

            Some('!') => self.punctuator(start, SdlTokenKind::Bang),
            Some('&') => self.punctuator(start, SdlTokenKind::Ampersand),
            Some('(') => self.punctuator(start, SdlTokenKind::ParenOpen),
            Some(')') => self.punctuator(start, SdlTokenKind::ParenClose),
            Some(':') => self.punctuator(start, SdlTokenKind::Colon),
            Some('=') => self.punctuator(start, SdlTokenKind::Equals),
            Some('@') => self.punctuator(start, SdlTokenKind::At),
            Some('[') => self.punctuator(start, SdlTokenKind::SquareBracketOpen),
            Some(']') => self.punctuator(start, SdlTokenKind::SquareBracketClose),
            Some('{') => self.punctuator(start, SdlTokenKind::CurlyBraceOpen),
            Some('}') => self.punctuator(start, SdlTokenKind::CurlyBraceClose),
            Some('|') => self.punctuator(start, SdlTokenKind::Pipe),

            Some('$') => {
                self.consume();
                self.consume_while(is_name_continue);
                let span = self.make_span(start);
                SdlToken::new(
                    SdlTokenKind::error(
                        "unexpected `$`",
                        smallvec![ErrorNote::general(
                            "variables only appear in executable documents, not in SDL",
                        )],
                    ),
                    span,
                )
            },
            Some('.') => {
                self.consume_while(|c| c == '.');
                let span = self.make_span(start);
                SdlToken::new(
                    SdlTokenKind::error(
                        "unexpected `.`",
                        smallvec![ErrorNote::general(
                            "fragment spreads only appear in executable documents, not in SDL",
                        )],
                    ),
                    span,
                )
            },

            Some('"') => self.lex_string(start),
            Some(c) if is_name_start(c) => self.lex_name(start),
            Some(c) if c == '-' || c.is_ascii_digit() => self.lex_number(start),

            Some(ch) => {
                self.consume();
                let span = self.make_span(start);
                SdlToken::new(
                    SdlTokenKind::error(
                        format!("unexpected character {}", describe_char(ch)),
                        smallvec![],
                    ),
                    span,
                )
            },
        }
    }

    /// Skips whitespace, line terminators, the BOM, commas and `#` comments.
    fn skip_ignored(&mut self) {
        while let Some(ch) = self.peek_char() {
            match ch {
                ' ' | '\t' | '\n' | '\r' | ',' | '\u{FEFF}' => {
                    self.consume();
                },
                '#' => self.consume_while(|c| c != '\n' && c != '\r'),
                _ => break,
            }
        }
    }

    // =========================================================================
    // Names
    // =========================================================================

    /// Names match `/[_A-Za-z][_0-9A-Za-z]*/`. `true`, `false` and `null` get
    /// their own kinds.
    fn lex_name(&mut self, start: SourcePosition) -> SdlToken<'src> {
        let name_start = self.curr_byte_offset;
        self.consume();
        self.consume_while(is_name_continue);
        let name = &self.source[name_start..self.curr_byte_offset];
        let kind = match name {
            "true" => SdlTokenKind::True,
            "false" => SdlTokenKind::False,
            "null" => SdlTokenKind::Null,
            _ => SdlTokenKind::Name(Cow::Borrowed(name)),
        };
        SdlToken::new(kind, self.make_span(start))
    }

    // =========================================================================
    // Numbers
    // =========================================================================

    /// `-?(0|[1-9][0-9]*)(\.[0-9]+)?([eE][+-]?[0-9]+)?`
    fn lex_number(&mut self, start: SourcePosition) -> SdlToken<'src> {
        let num_start = self.curr_byte_offset;
        let mut is_float = false;

        if self.peek_char() == Some('-') {
            self.consume();
        }

        match self.peek_char() {
            Some('0') => {
                self.consume();
                if self.peek_char().is_some_and(|c| c.is_ascii_digit()) {
                    return self.lex_number_error(
                        start,
                        num_start,
                        "invalid number: leading zeros are not allowed",
                        INT_VALUE_SPEC_URL,
                    );
                }
            },
            Some(c) if c.is_ascii_digit() => {
                self.consume_while(|c| c.is_ascii_digit());
            },
            _ => {
                let span = self.make_span(start);
                return SdlToken::new(SdlTokenKind::error("unexpected `-`", smallvec![]), span);
            },
        }

        if self.peek_char() == Some('.')
            && self.peek_char_nth(1).is_some_and(|c| c.is_ascii_digit())
        {
            is_float = true;
            self.consume();
            self.consume_while(|c| c.is_ascii_digit());
        }

        if matches!(self.peek_char(), Some('e' | 'E')) {
            is_float = true;
            self.consume();
            if matches!(self.peek_char(), Some('+' | '-')) {
                self.consume();
            }
            if !self.peek_char().is_some_and(|c| c.is_ascii_digit()) {
                return self.lex_number_error(
                    start,
                    num_start,
                    "invalid number: exponent must have at least one digit",
                    FLOAT_VALUE_SPEC_URL,
                );
            }
            self.consume_while(|c| c.is_ascii_digit());
        }

        if self.peek_char().is_some_and(is_name_start) {
            return self.lex_number_error(
                start,
                num_start,
                "invalid number: a name may not directly follow a number",
                INT_VALUE_SPEC_URL,
            );
        }

        let text = &self.source[num_start..self.curr_byte_offset];
        let kind = if is_float {
            SdlTokenKind::FloatValue(Cow::Borrowed(text))
        } else {
            SdlTokenKind::IntValue(Cow::Borrowed(text))
        };
        SdlToken::new(kind, self.make_span(start))
    }

    fn lex_number_error(
        &mut self,
        start: SourcePosition,
        num_start: usize,
        message: &str,
        spec_url: &str,
    ) -> SdlToken<'src> {
        self.consume_while(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '+' | '-' | '_'));
        let invalid_text = &self.source[num_start..self.curr_byte_offset];
        let span = self.make_span(start);
        SdlToken::new(
            SdlTokenKind::error(
                format!("{message}: `{invalid_text}`"),
                smallvec![ErrorNote::spec(spec_url)],
            ),
            span,
        )
    }

    // =========================================================================
    // Strings
    // =========================================================================

    fn lex_string(&mut self, start: SourcePosition) -> SdlToken<'src> {
        let str_start = self.curr_byte_offset;
        if self.remaining().starts_with("\"\"\"") {
            return self.lex_block_string(start, str_start);
        }

        self.consume();
        loop {
            match self.peek_char() {
                None => {
                    let span = self.make_span(start.clone());
                    let opened = SourceSpan {
                        end_exclusive: start.clone(),
                        ..span.clone()
                    };
                    return SdlToken::new(
                        SdlTokenKind::error(
                            "unterminated string literal",
                            smallvec![
                                ErrorNote::general_with_span("string started here", opened),
                                ErrorNote::help("add a closing `\"`"),
                            ],
                        ),
                        span,
                    );
                },
                Some('\n' | '\r') => {
                    let span = self.make_span(start);
                    self.consume();
                    return SdlToken::new(
                        SdlTokenKind::error(
                            "unterminated string literal",
                            smallvec![
                                ErrorNote::general(
                                    "single-line strings cannot contain unescaped newlines",
                                ),
                                ErrorNote::help(
                                    "use a block string (`\"\"\"`) for multi-line text",
                                ),
                            ],
                        ),
                        span,
                    );
                },
                Some('"') => {
                    self.consume();
                    break;
                },
                Some('\\') => {
                    self.consume();
                    if self.peek_char().is_some_and(|c| c != '\n' && c != '\r') {
                        self.consume();
                    }
                },
                Some(_) => {
                    self.consume();
                },
            }
        }

        let text = &self.source[str_start..self.curr_byte_offset];
        SdlToken::new(
            SdlTokenKind::StringValue(Cow::Borrowed(text)),
            self.make_span(start),
        )
    }

    fn lex_block_string(&mut self, start: SourcePosition, str_start: usize) -> SdlToken<'src> {
        for _ in 0..3 {
            self.consume();
        }
        loop {
            let rest = self.remaining();
            if rest.is_empty() {
                let span = self.make_span(start.clone());
                let opened = SourceSpan {
                    end_exclusive: start.clone(),
                    ..span.clone()
                };
                return SdlToken::new(
                    SdlTokenKind::error(
                        "unterminated block string",
                        smallvec![
                            ErrorNote::general_with_span("block string started here", opened),
                            ErrorNote::help("add a closing `\"\"\"`"),
                        ],
                    ),
                    span,
                );
            }
            if rest.starts_with("\\\"\"\"") {
                for _ in 0..4 {
                    self.consume();
                }
            } else if rest.starts_with("\"\"\"") {
                for _ in 0..3 {
                    self.consume();
                }
                break;
            } else {
                self.consume();
            }
        }

        let text = &self.source[str_start..self.curr_byte_offset];
        SdlToken::new(
            SdlTokenKind::StringValue(Cow::Borrowed(text)),
            self.make_span(start),
        )
    }
}

impl<'src> Iterator for StrSdlTokenSource<'src> {
    type Item = SdlToken<'src>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let token = self.next_token();
        if matches!(token.kind, SdlTokenKind::Eof) {
            self.finished = true;
        }
        Some(token)
    }
}

fn is_name_start(ch: char) -> bool {
    ch == '_' || ch.is_ascii_alphabetic()
}

fn is_name_continue(ch: char) -> bool {
    ch == '_' || ch.is_ascii_alphanumeric()
}

/// Printable characters are shown in backticks; invisible ones also get
/// their code point (and name, for the common offenders).
fn describe_char(ch: char) -> String {
    if !(ch.is_control() || ch.is_whitespace() || is_invisible_format_char(ch)) {
        return format!("`{ch}`");
    }
    let name = match ch {
        '\u{0000}' => Some("NULL"),
        '\u{000B}' => Some("VERTICAL TAB"),
        '\u{000C}' => Some("FORM FEED"),
        '\u{00A0}' => Some("NO-BREAK SPACE"),
        '\u{200B}' => Some("ZERO WIDTH SPACE"),
        '\u{200C}' => Some("ZERO WIDTH NON-JOINER"),
        '\u{200D}' => Some("ZERO WIDTH JOINER"),
        '\u{2028}' => Some("LINE SEPARATOR"),
        '\u{2029}' => Some("PARAGRAPH SEPARATOR"),
        '\u{3000}' => Some("IDEOGRAPHIC SPACE"),
        _ => None,
    };
    match name {
        Some(name) => format!("U+{:04X} ({name})", ch as u32),
        None => format!("U+{:04X}", ch as u32),
    }
}

fn is_invisible_format_char(ch: char) -> bool {
    matches!(ch, '\u{200B}'..='\u{200F}' | '\u{202A}'..='\u{202E}' | '\u{2060}'..='\u{2064}')
}
