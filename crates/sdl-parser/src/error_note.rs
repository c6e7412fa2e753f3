use crate::SmallVec;
use crate::SourceSpan;

/// Determines how an [`ErrorNote`] is rendered (`note:`, `help:`, `spec:`).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorNoteKind {
    /// Explanatory context.
    General,
    /// An actionable suggestion.
    Help,
    /// A link into the GraphQL specification.
    Spec,
}

/// Additional context attached to a lexer or parser error, optionally
/// pointing at a related source location (e.g. where a `{` was opened).
#[derive(Clone, Debug, PartialEq)]
pub struct ErrorNote {
    pub kind: ErrorNoteKind,
    pub message: String,
    pub span: Option<SourceSpan>,
}

impl ErrorNote {
    pub fn general(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorNoteKind::General,
            message: message.into(),
            span: None,
        }
    }

    pub fn general_with_span(message: impl Into<String>, span: SourceSpan) -> Self {
        Self {
            kind: ErrorNoteKind::General,
            message: message.into(),
            span: Some(span),
        }
    }

    pub fn help(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorNoteKind::Help,
            message: message.into(),
            span: None,
        }
    }

    pub fn spec(url: impl Into<String>) -> Self {
        Self {
            kind: ErrorNoteKind::Spec,
            message: url.into(),
            span: None,
        }
    }
}

/// Most errors carry 0-2 notes.
pub type ErrorNotes = SmallVec<[ErrorNote; 2]>;
