use crate::ErrorNotes;
use crate::StringParsingError;
use crate::token::string_literal;
use std::borrow::Cow;
use std::num::ParseFloatError;
use std::num::ParseIntError;

/// The kind of an SDL token.
///
/// Literal values keep only their raw source text. Negative numbers are a
/// single token (`IntValue("-1")`), matching the GraphQL grammar.
#[derive(Clone, Debug, PartialEq)]
pub enum SdlTokenKind<'src> {
    // =========================================================================
    // Punctuators
    // =========================================================================
    /// `&`
    Ampersand,
    /// `@`
    At,
    /// `!`
    Bang,
    /// `:`
    Colon,
    /// `}`
    CurlyBraceClose,
    /// `{`
    CurlyBraceOpen,
    /// `=`
    Equals,
    /// `)`
    ParenClose,
    /// `(`
    ParenOpen,
    /// `|`
    Pipe,
    /// `]`
    SquareBracketClose,
    /// `[`
    SquareBracketOpen,

    // =========================================================================
    // Literals (raw source text)
    // =========================================================================
    Name(Cow<'src, str>),

    /// e.g. `"-123"`. See [`parse_int_value`](Self::parse_int_value).
    IntValue(Cow<'src, str>),

    /// e.g. `"1.5e3"`. See [`parse_float_value`](Self::parse_float_value).
    FloatValue(Cow<'src, str>),

    /// Raw text including the quotes (`"..."` or `"""..."""`).
    /// See [`parse_string_value`](Self::parse_string_value).
    StringValue(Cow<'src, str>),

    True,
    False,
    Null,

    /// End of input.
    Eof,

    /// A lexer error. The parser turns these into
    /// [`ParseError`](crate::ParseError)s and keeps going.
    Error {
        message: String,
        error_notes: ErrorNotes,
    },
}

impl<'src> SdlTokenKind<'src> {
    #[inline]
    pub fn name_borrowed(s: &'src str) -> Self {
        SdlTokenKind::Name(Cow::Borrowed(s))
    }

    #[inline]
    pub fn name_owned(s: String) -> Self {
        SdlTokenKind::Name(Cow::Owned(s))
    }

    #[inline]
    pub fn error(message: impl Into<String>, error_notes: ErrorNotes) -> Self {
        SdlTokenKind::Error {
            message: message.into(),
            error_notes,
        }
    }

    /// Returns the source text of a punctuator, or `None` for other tokens.
    pub fn as_punctuator_str(&self) -> Option<&'static str> {
        match self {
            SdlTokenKind::Ampersand => Some("&"),
            SdlTokenKind::At => Some("@"),
            SdlTokenKind::Bang => Some("!"),
            SdlTokenKind::Colon => Some(":"),
            SdlTokenKind::CurlyBraceClose => Some("}"),
            SdlTokenKind::CurlyBraceOpen => Some("{"),
            SdlTokenKind::Equals => Some("="),
            SdlTokenKind::ParenClose => Some(")"),
            SdlTokenKind::ParenOpen => Some("("),
            SdlTokenKind::Pipe => Some("|"),
            SdlTokenKind::SquareBracketClose => Some("]"),
            SdlTokenKind::SquareBracketOpen => Some("["),

            SdlTokenKind::Name(_)
            | SdlTokenKind::IntValue(_)
            | SdlTokenKind::FloatValue(_)
            | SdlTokenKind::StringValue(_)
            | SdlTokenKind::True
            | SdlTokenKind::False
            | SdlTokenKind::Null
            | SdlTokenKind::Eof
            | SdlTokenKind::Error { .. } => None,
        }
    }

    pub fn is_punctuator(&self) -> bool {
        self.as_punctuator_str().is_some()
    }

    pub fn is_error(&self) -> bool {
        matches!(self, SdlTokenKind::Error { .. })
    }

    /// Returns the name text if this token can serve as a name.
    ///
    /// `true`, `false` and `null` are lexed as their own kinds but are valid
    /// names in most positions (e.g. a field called `null`).
    pub fn as_name(&self) -> Option<&str> {
        match self {
            SdlTokenKind::Name(name) => Some(name),
            SdlTokenKind::True => Some("true"),
            SdlTokenKind::False => Some("false"),
            SdlTokenKind::Null => Some("null"),
            _ => None,
        }
    }

    /// Describes the token for messages such as "expected name, found `!`".
    pub fn describe(&self) -> String {
        if let Some(p) = self.as_punctuator_str() {
            return format!("`{p}`");
        }
        match self {
            SdlTokenKind::Name(n) => format!("`{n}`"),
            SdlTokenKind::IntValue(v) | SdlTokenKind::FloatValue(v) => format!("`{v}`"),
            SdlTokenKind::StringValue(_) => "string".to_string(),
            SdlTokenKind::True => "`true`".to_string(),
            SdlTokenKind::False => "`false`".to_string(),
            SdlTokenKind::Null => "`null`".to_string(),
            SdlTokenKind::Eof => "end of input".to_string(),
            SdlTokenKind::Error { .. } => "invalid token".to_string(),
            _ => "token".to_string(),
        }
    }

    pub fn parse_int_value(&self) -> Option<Result<i64, ParseIntError>> {
        match self {
            SdlTokenKind::IntValue(raw) => Some(raw.parse()),
            _ => None,
        }
    }

    pub fn parse_float_value(&self) -> Option<Result<f64, ParseFloatError>> {
        match self {
            SdlTokenKind::FloatValue(raw) => Some(raw.parse()),
            _ => None,
        }
    }

    /// Decodes a `StringValue`'s raw text into its content: escapes for
    /// quoted strings, indentation stripping for block strings.
    pub fn parse_string_value(&self) -> Option<Result<String, StringParsingError>> {
        match self {
            SdlTokenKind::StringValue(raw) => Some(string_literal::cook(raw)),
            _ => None,
        }
    }
}
