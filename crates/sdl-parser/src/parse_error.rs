use crate::ErrorNote;
use crate::ErrorNoteKind;
use crate::ErrorNotes;
use crate::ParseErrorKind;
use crate::SourceSpan;

/// A parse error with location information and contextual notes.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{}", self.format_oneline())]
pub struct ParseError {
    /// Primary message, e.g. "expected `:` after field name".
    message: String,

    /// Where the error was detected. For "unexpected token" errors this is
    /// the offending token; for unclosed delimiters it is the end of input.
    span: SourceSpan,

    kind: ParseErrorKind,

    /// Related locations and suggestions ("opening `{` here", help, spec).
    notes: ErrorNotes,
}

impl ParseError {
    pub fn new(
        message: impl Into<String>,
        span: SourceSpan,
        kind: ParseErrorKind,
    ) -> Self {
        Self {
            message: message.into(),
            span,
            kind,
            notes: ErrorNotes::new(),
        }
    }

    pub fn with_notes(
        message: impl Into<String>,
        span: SourceSpan,
        kind: ParseErrorKind,
        notes: ErrorNotes,
    ) -> Self {
        Self {
            message: message.into(),
            span,
            kind,
            notes,
        }
    }

    /// Converts a lexer error token into a parse error, keeping the lexer's
    /// message and notes.
    pub fn from_lexer_error(
        message: impl Into<String>,
        span: SourceSpan,
        lexer_notes: ErrorNotes,
    ) -> Self {
        Self {
            message: message.into(),
            span,
            kind: ParseErrorKind::LexerError,
            notes: lexer_notes,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn span(&self) -> &SourceSpan {
        &self.span
    }

    pub fn kind(&self) -> &ParseErrorKind {
        &self.kind
    }

    pub fn notes(&self) -> &ErrorNotes {
        &self.notes
    }

    /// 1-based line of the error.
    pub fn line(&self) -> usize {
        self.span.start_inclusive.line() + 1
    }

    /// 1-based column of the error.
    pub fn column(&self) -> usize {
        self.span.start_inclusive.column() + 1
    }

    pub fn add_note(&mut self, message: impl Into<String>) {
        self.notes.push(ErrorNote::general(message));
    }

    pub fn add_note_with_span(&mut self, message: impl Into<String>, span: SourceSpan) {
        self.notes.push(ErrorNote::general_with_span(message, span));
    }

    pub fn add_help(&mut self, message: impl Into<String>) {
        self.notes.push(ErrorNote::help(message));
    }

    pub fn add_spec(&mut self, url: impl Into<String>) {
        self.notes.push(ErrorNote::spec(url));
    }

    /// Returns the text of the source line this error points at, with
    /// surrounding whitespace trimmed. `None` if the line is out of range.
    pub fn source_line<'a>(&self, source: &'a str) -> Option<&'a str> {
        source_lines(source)
            .nth(self.span.start_inclusive.line())
            .map(str::trim)
    }

    /// Formats this error as a multi-line diagnostic:
    ///
    /// ```text
    /// error: expected `:` after field name
    ///   --> schema.graphql:5:12
    ///    |
    ///  5 |     userName String
    ///    |              ^^^^^^
    ///    = help: field definitions look like `name: Type`
    /// ```
    ///
    /// Pass the source text to include a snippet; without it only the
    /// location line is shown.
    pub fn format_detailed(&self, source: Option<&str>) -> String {
        let mut output = String::new();
        output.push_str("error: ");
        output.push_str(&self.message);
        output.push('\n');
        output.push_str(&format!(
            "  --> {}:{}:{}\n",
            self.span.source_name(),
            self.line(),
            self.column(),
        ));

        if let Some(src) = source
            && let Some(snippet) = format_snippet(src, &self.span, '^')
        {
            output.push_str(&snippet);
        }

        for note in &self.notes {
            let prefix = match note.kind {
                ErrorNoteKind::General => "note",
                ErrorNoteKind::Help => "help",
                ErrorNoteKind::Spec => "spec",
            };
            output.push_str(&format!("   = {prefix}: {}\n", note.message));
            if let (Some(note_span), Some(src)) = (&note.span, source)
                && let Some(snippet) = format_snippet(src, note_span, '-')
            {
                output.push_str(&snippet);
            }
        }

        output
    }

    /// Formats this error as `file:line:col: error: message`.
    pub fn format_oneline(&self) -> String {
        format!(
            "{}:{}:{}: error: {}",
            self.span.source_name(),
            self.line(),
            self.column(),
            self.message,
        )
    }
}

/// Splits `source` at `\r\n`, `\n` and lone `\r`, matching how the lexer
/// counts lines.
fn source_lines(source: &str) -> impl Iterator<Item = &str> {
    let mut rest = Some(source);
    std::iter::from_fn(move || {
        let text = rest?;
        match text.find(['\n', '\r']) {
            Some(idx) => {
                let terminator_len = if text[idx..].starts_with("\r\n") { 2 } else { 1 };
                rest = Some(&text[idx + terminator_len..]);
                Some(&text[..idx])
            },
            None => {
                rest = None;
                Some(text)
            },
        }
    })
}

fn format_snippet(source: &str, span: &SourceSpan, marker: char) -> Option<String> {
    let line_num = span.start_inclusive.line();
    let line_content = source_lines(source).nth(line_num)?;
    let display_line_num = line_num + 1;
    let width = display_line_num.to_string().len().max(2);

    let col_start = span.start_inclusive.column();
    let underline_len = if span.end_exclusive.line() == line_num
        && span.end_exclusive.column() > col_start
    {
        span.end_exclusive.column() - col_start
    } else {
        1
    };

    let mut output = String::new();
    output.push_str(&format!("{:>width$} |\n", ""));
    output.push_str(&format!("{display_line_num:>width$} | {line_content}\n"));
    output.push_str(&format!(
        "{:>width$} | {:>col_start$}{}\n",
        "",
        "",
        marker.to_string().repeat(underline_len),
    ));
    Some(output)
}
