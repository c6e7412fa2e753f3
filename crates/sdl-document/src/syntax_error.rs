use sdl_parser::ParseError;
use std::path::Path;

/// Every error found while parsing one SDL source.
///
/// Displays the first error as
/// ``Syntax Error: expected name, found `!` at 3:21, near: foo: Int!!``.
/// Use [`format_detailed`](Self::format_detailed) to render all of them.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[error("{}", self.summary())]
pub struct SyntaxError {
    errors: Vec<ParseError>,
    /// Trimmed source line of the first error.
    near: String,
}

impl SyntaxError {
    pub(crate) fn new(errors: Vec<ParseError>, source: &str) -> Self {
        let near = errors
            .first()
            .and_then(|err| err.source_line(source))
            .unwrap_or_default()
            .to_string();
        Self { errors, near }
    }

    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    pub fn first(&self) -> Option<&ParseError> {
        self.errors.first()
    }

    /// The file the source was read from, if it came from one.
    pub fn file_path(&self) -> Option<&Path> {
        self.first()?.span().file_path.as_deref()
    }

    /// Multi-line diagnostics for every error, with snippets from `source`.
    pub fn format_detailed(&self, source: Option<&str>) -> String {
        self.errors
            .iter()
            .map(|err| err.format_detailed(source))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn summary(&self) -> String {
        match self.first() {
            Some(err) => format!(
                "Syntax Error: {} at {}:{}, near: {}",
                err.message(),
                err.line(),
                err.column(),
                self.near,
            ),
            None => "Syntax Error".to_string(),
        }
    }
}
