/// Error returned when decoding the escapes of an SDL string literal fails.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum StringParsingError {
    /// An invalid escape sequence was encountered (e.g. `\q`).
    #[error("invalid escape sequence: `{0}`")]
    InvalidEscapeSequence(String),

    /// The string was not properly terminated.
    #[error("unterminated string: missing closing quote")]
    UnterminatedString,

    /// An invalid unicode escape was encountered (e.g. `\u{ZZZZ}`).
    #[error("invalid unicode escape: `{0}`")]
    InvalidUnicodeEscape(String),
}

/// Errors converting the raw text of a literal token into a value.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValueParsingError {
    #[error("invalid string: {0}")]
    String(#[from] StringParsingError),

    /// SDL integers must fit in an `i32`.
    #[error("invalid integer: {0}")]
    Int(String),

    /// SDL floats must be finite.
    #[error("invalid float: {0}")]
    Float(String),
}
