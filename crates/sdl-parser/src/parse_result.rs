use crate::ParseError;

/// The result of a parsing operation.
///
/// Unlike `Result<T, E>`, a `ParseResult` can hold both a (partial) AST and
/// the errors met while producing it. The parser recovers at definition
/// boundaries, so one pass reports every broken definition in a document.
///
/// Use [`valid_ast()`](Self::valid_ast) when only a fully valid document is
/// acceptable, and [`ast()`](Self::ast) for best-effort tooling.
#[derive(Debug)]
pub struct ParseResult<TAst> {
    ast: Option<TAst>,

    /// Errors encountered during parsing, in source order.
    pub errors: Vec<ParseError>,
}

impl<TAst> ParseResult<TAst> {
    pub(crate) fn ok(ast: TAst) -> Self {
        Self {
            ast: Some(ast),
            errors: Vec::new(),
        }
    }

    pub(crate) fn err(errors: Vec<ParseError>) -> Self {
        Self { ast: None, errors }
    }

    pub(crate) fn recovered(ast: TAst, errors: Vec<ParseError>) -> Self {
        Self {
            ast: Some(ast),
            errors,
        }
    }

    /// Returns the AST only if parsing produced no errors.
    pub fn valid_ast(&self) -> Option<&TAst> {
        if self.errors.is_empty() {
            self.ast.as_ref()
        } else {
            None
        }
    }

    /// Returns the AST if present, regardless of errors.
    pub fn ast(&self) -> Option<&TAst> {
        self.ast.as_ref()
    }

    pub fn into_valid_ast(self) -> Option<TAst> {
        if self.errors.is_empty() {
            self.ast
        } else {
            None
        }
    }

    pub fn into_ast(self) -> Option<TAst> {
        self.ast
    }

    /// Splits into the (possibly partial) AST and every error.
    pub fn into_parts(self) -> (Option<TAst>, Vec<ParseError>) {
        (self.ast, self.errors)
    }

    /// Converts into a `Result`, failing with the first error.
    pub fn into_result(self) -> Result<TAst, ParseError> {
        match (self.ast, self.errors.into_iter().next()) {
            (_, Some(first)) => Err(first),
            (Some(ast), None) => Ok(ast),
            (None, None) => unreachable!("ParseResult without AST must carry an error"),
        }
    }

    /// `true` if parsing produced an AST and no errors.
    pub fn is_ok(&self) -> bool {
        self.ast.is_some() && self.errors.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Renders every error with [`ParseError::format_detailed`].
    pub fn format_errors(&self, source: Option<&str>) -> String {
        self.errors
            .iter()
            .map(|e| e.format_detailed(source))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
