use crate::ReservedNameContext;
use crate::string_parsing_error::ValueParsingError;

/// Categorizes parse errors for programmatic handling.
///
/// Each variant holds only what a caller needs to branch on. Human-readable
/// detail lives in [`ParseError::message`](crate::ParseError::message) and
/// its notes.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseErrorKind {
    /// Expected specific token(s) but found something else.
    ///
    /// ```text
    /// type User { name String }
    ///                  ^^^^^^ expected `:`, found `String`
    /// ```
    #[error("unexpected token: `{found}`")]
    UnexpectedToken {
        expected: Vec<String>,
        found: String,
    },

    /// The document ended before a construct was complete.
    #[error("unexpected end of input")]
    UnexpectedEof { expected: Vec<String> },

    /// The lexer produced an error token. Its message and notes are kept on
    /// the parent [`ParseError`](crate::ParseError).
    #[error("lexer error")]
    LexerError,

    /// A `{`, `[` or `(` was never closed.
    #[error("unclosed delimiter: `{delimiter}`")]
    UnclosedDelimiter { delimiter: String },

    /// A closing delimiter did not match the innermost open one.
    #[error("mismatched delimiter")]
    MismatchedDelimiter { expected: String, found: String },

    /// A literal could not be converted to a value (e.g. i32 overflow).
    #[error("invalid value")]
    InvalidValue(ValueParsingError),

    /// A name was used where it is reserved.
    #[error("reserved name: `{name}`")]
    ReservedName {
        name: String,
        context: ReservedNameContext,
    },

    /// Executable definitions (`query`, `fragment`, ...) are not allowed in
    /// an SDL document.
    #[error("executable definition `{found}` is not allowed in SDL")]
    ExecutableDefinition { found: String },

    /// A construct that must be non-empty was empty (e.g. `()` or `{}`).
    #[error("empty `{construct}`")]
    InvalidEmptyConstruct { construct: String },

    /// Catch-all for grammar violations not covered above.
    #[error("invalid syntax")]
    InvalidSyntax,
}
