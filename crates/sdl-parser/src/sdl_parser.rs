//! Recursive descent parser for SDL documents.
//!
//! Each grammar rule has a `parse_*` method returning `Result<Node, ()>`.
//! `Err(())` means an error has already been recorded in `self.errors`; the
//! top-level loop then skips ahead to the next definition keyword so that a
//! single pass reports every broken definition.

use crate::ast;
use crate::ast::AstPos;
use crate::ast::DirectiveLocationKind;
use crate::ast::Nullability;
use crate::ast::RootOperationKind;
use crate::ast::TypeAnnotation;
use crate::ast::Value;
use crate::token::SdlToken;
use crate::token::SdlTokenKind;
use crate::token_source::SdlTokenSource;
use crate::token_source::StrSdlTokenSource;
use crate::ParseError;
use crate::ParseErrorKind;
use crate::ParseResult;
use crate::ReservedNameContext;
use crate::SdlTokenStream;
use crate::SmallVec;
use crate::SourcePosition;
use crate::SourceSpan;
use crate::ValueParsingError;
use std::path::Path;

const TYPE_DEFINITION_KEYWORDS: [&str; 6] =
    ["scalar", "type", "interface", "union", "enum", "input"];

const EXECUTABLE_KEYWORDS: [&str; 4] = ["query", "mutation", "subscription", "fragment"];

// =============================================================================
// Delimiter tracking
// =============================================================================

/// What a `{`, `(` or `[` was opened for, used in error messages.
#[derive(Debug, Clone, Copy)]
enum DelimiterContext {
    SchemaDefinition,
    FieldsDefinition,
    EnumValuesDefinition,
    InputFieldsDefinition,
    ArgumentsDefinition,
    DirectiveArguments,
    ListType,
    ListValue,
    ObjectValue,
}

impl DelimiterContext {
    fn description(&self) -> &'static str {
        match self {
            DelimiterContext::SchemaDefinition => "schema definition",
            DelimiterContext::FieldsDefinition => "fields definition",
            DelimiterContext::EnumValuesDefinition => "enum values definition",
            DelimiterContext::InputFieldsDefinition => "input fields definition",
            DelimiterContext::ArgumentsDefinition => "arguments definition",
            DelimiterContext::DirectiveArguments => "directive arguments",
            DelimiterContext::ListType => "list type",
            DelimiterContext::ListValue => "list value",
            DelimiterContext::ObjectValue => "object value",
        }
    }

    /// Whether `{}`/`()` is a grammar error in this context.
    fn requires_items(&self) -> bool {
        !matches!(self, DelimiterContext::ListValue | DelimiterContext::ObjectValue)
    }
}

#[derive(Debug, Clone)]
struct OpenDelimiter {
    span: SourceSpan,
    context: DelimiterContext,
}

// =============================================================================
// Parser
// =============================================================================

/// A recursive descent parser for SDL documents, generic over its token
/// source.
///
/// ```
/// use sdl_parser::ast;
/// use sdl_parser::SdlParser;
///
/// let result = SdlParser::new("type Query { hello: String }")
///     .parse_schema_document();
/// let doc = result.valid_ast().unwrap();
/// assert!(matches!(doc.definitions[0], ast::Definition::Type(_)));
/// ```
pub struct SdlParser<'src, TTokenSource: SdlTokenSource<'src>> {
    token_stream: SdlTokenStream<'src, TTokenSource>,
    errors: Vec<ParseError>,
    delimiter_stack: SmallVec<[OpenDelimiter; 8]>,

    /// Shared by value and type-annotation parsing; bounds the native stack
    /// on inputs like `[[[[...`.
    recursion_depth: usize,

    /// End of the most recently consumed token. EOF errors point here.
    last_end_position: Option<SourcePosition>,

    /// Number of tokens consumed so far. Lets the top-level loop detect a
    /// recovery pass that made no progress.
    consumed_count: usize,
}

impl<'src> SdlParser<'src, StrSdlTokenSource<'src>> {
    pub fn new<S: AsRef<str> + ?Sized>(source: &'src S) -> Self {
        Self::from_token_source(StrSdlTokenSource::new(source.as_ref()))
    }

    /// Like [`new`](Self::new), but every error span names `path`.
    pub fn with_file_path(source: &'src str, path: &'src Path) -> Self {
        Self::from_token_source(StrSdlTokenSource::with_file_path(source, path))
    }
}

impl<'src, TTokenSource: SdlTokenSource<'src>> SdlParser<'src, TTokenSource> {
    const MAX_RECURSION_DEPTH: usize = 64;

    pub fn from_token_source(token_source: TTokenSource) -> Self {
        Self {
            token_stream: SdlTokenStream::new(token_source),
            errors: Vec::new(),
            delimiter_stack: SmallVec::new(),
            recursion_depth: 0,
            last_end_position: None,
            consumed_count: 0,
        }
    }

    // =========================================================================
    // Entry points
    // =========================================================================

    /// Parses a whole SDL document.
    ///
    /// On errors the returned [`ParseResult`] still carries every definition
    /// that parsed cleanly.
    pub fn parse_schema_document(mut self) -> ParseResult<ast::Document> {
        let mut definitions = Vec::new();
        while !self.token_stream.is_at_end() {
            let before = self.consumed_count;
            match self.parse_definition_item() {
                Ok(def) => definitions.push(def),
                Err(()) => {
                    self.recover_to_next_definition();
                    if self.consumed_count == before {
                        self.consume_token();
                    }
                },
            }
        }

        let document = ast::Document { definitions };
        if self.errors.is_empty() {
            ParseResult::ok(document)
        } else {
            ParseResult::recovered(document, self.errors)
        }
    }

    /// Parses exactly one definition; anything after it is an error.
    ///
    /// Useful for building a replacement node from a snippet of SDL.
    pub fn parse_definition(mut self) -> ParseResult<ast::Definition> {
        if self.token_stream.is_at_end() {
            let span = self.eof_span();
            self.record_error(ParseError::new(
                "expected a definition, found end of input",
                span,
                ParseErrorKind::UnexpectedEof {
                    expected: vec!["definition".to_string()],
                },
            ));
            return ParseResult::err(self.errors);
        }

        let definition = self.parse_definition_item();
        if definition.is_ok() && !self.token_stream.is_at_end() {
            self.record_unexpected(&["end of input"]);
        }
        match definition {
            Ok(def) if self.errors.is_empty() => ParseResult::ok(def),
            _ => ParseResult::err(self.errors),
        }
    }

    // =========================================================================
    // Error recording and recovery
    // =========================================================================

    fn record_error(&mut self, error: ParseError) {
        self.errors.push(error);
    }

    /// Records an error for the next token, which did not match any of
    /// `expected`. A lexer error token is consumed and reported as-is.
    fn record_unexpected(&mut self, expected: &[&str]) {
        let expected_list = format_expected(expected);
        let expected_vec: Vec<String> = expected.iter().map(|s| s.to_string()).collect();

        let is_lexer_error = self
            .token_stream
            .peek()
            .is_some_and(|t| t.kind.is_error());
        if is_lexer_error {
            if let Some(token) = self.consume_token()
                && let SdlTokenKind::Error { message, error_notes } = token.kind
            {
                self.record_error(ParseError::from_lexer_error(message, token.span, error_notes));
            }
            return;
        }

        let found = match self.token_stream.peek() {
            None => None,
            Some(token) if matches!(token.kind, SdlTokenKind::Eof) => None,
            Some(token) => Some((token.span.clone(), token.kind.describe())),
        };
        let error = match found {
            Some((span, found)) => ParseError::new(
                format!("expected {expected_list}, found {found}"),
                span,
                ParseErrorKind::UnexpectedToken {
                    expected: expected_vec,
                    found,
                },
            ),
            None => ParseError::new(
                format!("expected {expected_list}, found end of input"),
                self.eof_span(),
                ParseErrorKind::UnexpectedEof {
                    expected: expected_vec,
                },
            ),
        };
        self.record_error(error);
    }

    fn push_delimiter(&mut self, span: SourceSpan, context: DelimiterContext) {
        self.delimiter_stack.push(OpenDelimiter { span, context });
    }

    fn pop_delimiter(&mut self) -> Option<OpenDelimiter> {
        self.delimiter_stack.pop()
    }

    /// Skips tokens until one that plausibly starts a definition.
    fn recover_to_next_definition(&mut self) {
        loop {
            let is_start = match self.token_stream.peek().map(|t| &t.kind) {
                None | Some(SdlTokenKind::Eof) => break,
                Some(SdlTokenKind::Name(name)) => {
                    let name = name.to_string();
                    self.looks_like_definition_start(&name, 1)
                },
                Some(SdlTokenKind::StringValue(_)) => {
                    match self.token_stream.peek_nth(1).map(|t| &t.kind) {
                        Some(SdlTokenKind::Name(name)) => {
                            let name = name.to_string();
                            name != "extend" && self.looks_like_definition_start(&name, 2)
                        },
                        _ => false,
                    }
                },
                Some(_) => false,
            };
            if is_start {
                break;
            }
            self.consume_token();
        }
        self.delimiter_stack.clear();
    }

    /// Whether `keyword` (at lookahead `offset - 1`) starts a definition,
    /// judged by the token after it. Avoids stopping at `type: String`.
    fn looks_like_definition_start(&mut self, keyword: &str, offset: usize) -> bool {
        let next = self.token_stream.peek_nth(offset).map(|t| &t.kind);
        match keyword {
            "scalar" | "type" | "interface" | "union" | "enum" | "input" => {
                next.is_some_and(|k| k.as_name().is_some())
            },
            "directive" => matches!(next, Some(SdlTokenKind::At)),
            "schema" => matches!(
                next,
                Some(SdlTokenKind::CurlyBraceOpen | SdlTokenKind::At)
            ),
            "extend" => match next {
                Some(SdlTokenKind::Name(n)) => {
                    n.as_ref() == "schema" || TYPE_DEFINITION_KEYWORDS.contains(&n.as_ref())
                },
                _ => false,
            },
            _ => false,
        }
    }

    // =========================================================================
    // Token helpers
    // =========================================================================

    fn consume_token(&mut self) -> Option<SdlToken<'src>> {
        let token = self.token_stream.consume();
        if let Some(ref t) = token {
            self.last_end_position = Some(t.span.end_exclusive.clone());
            self.consumed_count += 1;
        }
        token
    }

    /// Consumes a token already known (via peek) to exist.
    fn advance(&mut self) -> Result<SdlToken<'src>, ()> {
        match self.consume_token() {
            Some(token) => Ok(token),
            None => {
                self.record_unexpected(&["token"]);
                Err(())
            },
        }
    }

    fn peek_kind(&mut self) -> Option<&SdlTokenKind<'src>> {
        self.token_stream.peek().map(|t| &t.kind)
    }

    fn peek_is(&mut self, kind: &SdlTokenKind<'_>) -> bool {
        self.peek_kind().is_some_and(|k| token_kinds_match(k, kind))
    }

    /// `true`, `false` and `null` are never keywords.
    fn peek_is_keyword(&mut self, keyword: &str) -> bool {
        matches!(self.peek_kind(), Some(SdlTokenKind::Name(n)) if n.as_ref() == keyword)
    }

    /// Position of the next token, for stamping the node it starts.
    fn peek_position(&mut self) -> AstPos {
        match self.token_stream.peek() {
            Some(token) => token.span.start_inclusive.to_ast_pos(),
            None => self.eof_span().start_inclusive.to_ast_pos(),
        }
    }

    fn eof_span(&self) -> SourceSpan {
        let pos = self
            .last_end_position
            .clone()
            .unwrap_or_else(|| SourcePosition::new(0, 0, 0));
        SourceSpan::new(pos.clone(), pos)
    }

    fn expect(&mut self, expected: &SdlTokenKind<'_>) -> Result<SdlToken<'src>, ()> {
        if self.peek_is(expected) {
            return self.advance();
        }
        let display = format!("`{}`", expected.as_punctuator_str().unwrap_or("token"));
        self.record_unexpected(&[&display]);
        Err(())
    }

    /// Expects a name. `true`, `false` and `null` are valid names here.
    fn expect_name(&mut self) -> Result<(String, SourceSpan), ()> {
        let is_name = self.peek_kind().is_some_and(|k| k.as_name().is_some());
        if !is_name {
            self.record_unexpected(&["name"]);
            return Err(());
        }
        let token = self.advance()?;
        let name = token.kind.as_name().unwrap_or_default().to_string();
        Ok((name, token.span))
    }

    fn expect_keyword(&mut self, keyword: &str) -> Result<SourceSpan, ()> {
        if self.peek_is_keyword(keyword) {
            return Ok(self.advance()?.span);
        }
        self.record_unexpected(&[&format!("`{keyword}`")]);
        Err(())
    }

    fn enter_recursion(&mut self) -> Result<(), ()> {
        self.recursion_depth += 1;
        if self.recursion_depth > Self::MAX_RECURSION_DEPTH {
            let span = self
                .token_stream
                .peek()
                .map(|t| t.span.clone())
                .unwrap_or_else(|| self.eof_span());
            self.record_error(ParseError::new(
                format!(
                    "maximum nesting depth of {} exceeded",
                    Self::MAX_RECURSION_DEPTH,
                ),
                span,
                ParseErrorKind::InvalidSyntax,
            ));
            self.recursion_depth -= 1;
            return Err(());
        }
        Ok(())
    }

    fn exit_recursion(&mut self) {
        self.recursion_depth = self.recursion_depth.saturating_sub(1);
    }

    /// Parses `open item* close`, tracking the delimiter for diagnostics.
    ///
    /// Records [`ParseErrorKind::InvalidEmptyConstruct`] (without failing)
    /// when the context requires at least one item.
    fn parse_delimited<T>(
        &mut self,
        open: SdlTokenKind<'static>,
        close: SdlTokenKind<'static>,
        context: DelimiterContext,
        mut parse_item: impl FnMut(&mut Self) -> Result<T, ()>,
    ) -> Result<Vec<T>, ()> {
        let open_token = self.expect(&open)?;
        self.push_delimiter(open_token.span.clone(), context);

        let mut items = Vec::new();
        let result = loop {
            let next = self.peek_kind().cloned();
            match next {
                Some(ref kind) if token_kinds_match(kind, &close) => {
                    self.consume_token();
                    break Ok(());
                },
                None | Some(SdlTokenKind::Eof) => {
                    self.handle_unclosed_delimiter(&close);
                    break Err(());
                },
                Some(
                    ref kind @ (SdlTokenKind::CurlyBraceClose
                    | SdlTokenKind::ParenClose
                    | SdlTokenKind::SquareBracketClose),
                ) => {
                    self.handle_mismatched_delimiter(kind, &close);
                    break Err(());
                },
                Some(_) => match parse_item(self) {
                    Ok(item) => items.push(item),
                    Err(()) => break Err(()),
                },
            }
        };
        self.pop_delimiter();
        result?;

        if items.is_empty() && context.requires_items() {
            let span = SourceSpan::new(
                open_token.span.start_inclusive.clone(),
                self.last_end_position
                    .clone()
                    .unwrap_or(open_token.span.end_exclusive.clone()),
            );
            self.record_error(ParseError::new(
                format!("{} must not be empty", context.description()),
                span,
                ParseErrorKind::InvalidEmptyConstruct {
                    construct: context.description().to_string(),
                },
            ));
        }
        Ok(items)
    }

    /// Reports EOF inside the innermost open delimiter.
    fn handle_unclosed_delimiter(&mut self, close: &SdlTokenKind<'_>) {
        let Some(open) = self.delimiter_stack.last().cloned() else {
            self.record_unexpected(&[&format!("`{}`", close.as_punctuator_str().unwrap_or(""))]);
            return;
        };
        let open_str = match close {
            SdlTokenKind::CurlyBraceClose => "{",
            SdlTokenKind::ParenClose => "(",
            _ => "[",
        };
        let close_str = close.as_punctuator_str().unwrap_or("");
        let mut error = ParseError::new(
            format!("unclosed `{open_str}` in {}", open.context.description()),
            self.eof_span(),
            ParseErrorKind::UnclosedDelimiter {
                delimiter: open_str.to_string(),
            },
        );
        error.add_note_with_span(format!("opening `{open_str}` here"), open.span);
        error.add_help(format!("add a closing `{close_str}`"));
        self.record_error(error);
    }

    /// Reports a closing delimiter that does not match the innermost open
    /// one, e.g. `[String)`.
    fn handle_mismatched_delimiter(&mut self, found: &SdlTokenKind<'_>, expected: &SdlTokenKind<'_>) {
        let found_str = found.as_punctuator_str().unwrap_or("");
        let expected_str = expected.as_punctuator_str().unwrap_or("");
        let span = self
            .token_stream
            .peek()
            .map(|t| t.span.clone())
            .unwrap_or_else(|| self.eof_span());
        let mut error = ParseError::new(
            format!("expected `{expected_str}`, found `{found_str}`"),
            span,
            ParseErrorKind::MismatchedDelimiter {
                expected: expected_str.to_string(),
                found: found_str.to_string(),
            },
        );
        if let Some(open) = self.delimiter_stack.last().cloned() {
            error.add_note_with_span(
                format!("{} opened here", open.context.description()),
                open.span,
            );
        }
        self.record_error(error);
    }

    // =========================================================================
    // Definitions
    // =========================================================================

    fn parse_definition_item(&mut self) -> Result<ast::Definition, ()> {
        let position = self.peek_position();
        let has_description = matches!(self.peek_kind(), Some(SdlTokenKind::StringValue(_)));
        let description = self.parse_description()?;

        let keyword = match self.peek_kind() {
            Some(SdlTokenKind::Name(name)) => Some(name.to_string()),
            _ => None,
        };
        match keyword.as_deref() {
            Some("schema") => self
                .parse_schema_definition(position, description)
                .map(ast::Definition::Schema),
            Some("directive") => self
                .parse_directive_definition(position, description)
                .map(ast::Definition::Directive),
            Some(kw) if TYPE_DEFINITION_KEYWORDS.contains(&kw) => self
                .parse_type_definition(position, description)
                .map(ast::Definition::Type),
            Some("extend") => {
                if has_description {
                    let span = self
                        .token_stream
                        .peek()
                        .map(|t| t.span.clone())
                        .unwrap_or_else(|| self.eof_span());
                    let mut error = ParseError::new(
                        "extensions cannot have a description",
                        span,
                        ParseErrorKind::InvalidSyntax,
                    );
                    error.add_help("move the description to the definition being extended");
                    self.record_error(error);
                    return Err(());
                }
                self.parse_extension(position)
            },
            Some(kw) if EXECUTABLE_KEYWORDS.contains(&kw) => {
                self.record_executable_definition(kw.to_string());
                Err(())
            },
            _ => {
                if self.peek_is(&SdlTokenKind::CurlyBraceOpen) {
                    self.record_executable_definition("{".to_string());
                    return Err(());
                }
                self.record_unexpected(&[
                    "`type`",
                    "`interface`",
                    "`union`",
                    "`enum`",
                    "`scalar`",
                    "`input`",
                    "`directive`",
                    "`schema`",
                    "`extend`",
                ]);
                Err(())
            },
        }
    }

    fn record_executable_definition(&mut self, found: String) {
        let span = self
            .token_stream
            .peek()
            .map(|t| t.span.clone())
            .unwrap_or_else(|| self.eof_span());
        let mut error = ParseError::new(
            format!("executable definition `{found}` is not allowed in a schema document"),
            span,
            ParseErrorKind::ExecutableDefinition { found },
        );
        error.add_note("SDL documents contain only type-system definitions");
        self.record_error(error);
    }

    fn parse_description(&mut self) -> Result<Option<String>, ()> {
        if !matches!(self.peek_kind(), Some(SdlTokenKind::StringValue(_))) {
            return Ok(None);
        }
        let token = self.advance()?;
        self.cook_string(token).map(Some)
    }

    fn cook_string(&mut self, token: SdlToken<'src>) -> Result<String, ()> {
        match token.kind.parse_string_value() {
            Some(Ok(value)) => Ok(value),
            Some(Err(err)) => {
                self.record_error(ParseError::new(
                    format!("invalid string: {err}"),
                    token.span,
                    ParseErrorKind::InvalidValue(ValueParsingError::String(err)),
                ));
                Err(())
            },
            None => {
                self.record_error(ParseError::new(
                    "expected string",
                    token.span,
                    ParseErrorKind::InvalidSyntax,
                ));
                Err(())
            },
        }
    }

    /// `schema @dirs { query: Q mutation: M subscription: S }`
    fn parse_schema_definition(
        &mut self,
        position: AstPos,
        description: Option<String>,
    ) -> Result<ast::SchemaDefinition, ()> {
        self.expect_keyword("schema")?;
        let directives = self.parse_directive_annotations()?;
        let mut schema = ast::SchemaDefinition {
            position,
            description,
            directives,
            ..Default::default()
        };
        self.parse_root_operation_types(&mut schema)?;
        Ok(schema)
    }

    fn parse_root_operation_types(&mut self, schema: &mut ast::SchemaDefinition) -> Result<(), ()> {
        let entries = self.parse_delimited(
            SdlTokenKind::CurlyBraceOpen,
            SdlTokenKind::CurlyBraceClose,
            DelimiterContext::SchemaDefinition,
            |parser| {
                let (keyword, keyword_span) = parser.expect_name()?;
                let Some(kind) = RootOperationKind::from_keyword(&keyword) else {
                    parser.record_error(ParseError::new(
                        format!(
                            "expected `query`, `mutation` or `subscription`, found `{keyword}`"
                        ),
                        keyword_span,
                        ParseErrorKind::UnexpectedToken {
                            expected: vec![
                                "query".to_string(),
                                "mutation".to_string(),
                                "subscription".to_string(),
                            ],
                            found: keyword,
                        },
                    ));
                    return Err(());
                };
                parser.expect(&SdlTokenKind::Colon)?;
                let (type_name, _) = parser.expect_name()?;
                Ok((kind, keyword_span, type_name))
            },
        )?;

        for (kind, span, type_name) in entries {
            if schema.root_type_name(kind).is_some() {
                self.record_error(ParseError::new(
                    format!("duplicate `{}` root operation type", kind.keyword()),
                    span,
                    ParseErrorKind::InvalidSyntax,
                ));
                continue;
            }
            schema.set_root_type_name(kind, type_name);
        }
        Ok(())
    }

    fn parse_type_definition(
        &mut self,
        position: AstPos,
        description: Option<String>,
    ) -> Result<ast::TypeDefinition, ()> {
        let (keyword, _) = self.expect_name()?;
        let (name, name_span) = self.expect_name()?;
        self.check_reserved_type_name(&name, name_span);

        match keyword.as_str() {
            "scalar" => {
                let directives = self.parse_directive_annotations()?;
                Ok(ast::TypeDefinition::Scalar(ast::ScalarTypeDefinition {
                    position,
                    description,
                    name,
                    directives,
                }))
            },
            "type" => {
                let implements = self.parse_implements_interfaces()?;
                let directives = self.parse_directive_annotations()?;
                let fields = self.parse_optional_fields_definition()?;
                Ok(ast::TypeDefinition::Object(ast::ObjectTypeDefinition {
                    position,
                    description,
                    name,
                    implements,
                    directives,
                    fields,
                }))
            },
            "interface" => {
                let implements = self.parse_implements_interfaces()?;
                let directives = self.parse_directive_annotations()?;
                let fields = self.parse_optional_fields_definition()?;
                Ok(ast::TypeDefinition::Interface(ast::InterfaceTypeDefinition {
                    position,
                    description,
                    name,
                    implements,
                    directives,
                    fields,
                }))
            },
            "union" => {
                let directives = self.parse_directive_annotations()?;
                let members = self.parse_union_members()?;
                Ok(ast::TypeDefinition::Union(ast::UnionTypeDefinition {
                    position,
                    description,
                    name,
                    directives,
                    members,
                }))
            },
            "enum" => {
                let directives = self.parse_directive_annotations()?;
                let values = if self.peek_is(&SdlTokenKind::CurlyBraceOpen) {
                    self.parse_delimited(
                        SdlTokenKind::CurlyBraceOpen,
                        SdlTokenKind::CurlyBraceClose,
                        DelimiterContext::EnumValuesDefinition,
                        Self::parse_enum_value_definition,
                    )?
                } else {
                    Vec::new()
                };
                Ok(ast::TypeDefinition::Enum(ast::EnumTypeDefinition {
                    position,
                    description,
                    name,
                    directives,
                    values,
                }))
            },
            "input" => {
                let directives = self.parse_directive_annotations()?;
                let fields = if self.peek_is(&SdlTokenKind::CurlyBraceOpen) {
                    self.parse_delimited(
                        SdlTokenKind::CurlyBraceOpen,
                        SdlTokenKind::CurlyBraceClose,
                        DelimiterContext::InputFieldsDefinition,
                        Self::parse_input_value_definition,
                    )?
                } else {
                    Vec::new()
                };
                Ok(ast::TypeDefinition::InputObject(ast::InputObjectTypeDefinition {
                    position,
                    description,
                    name,
                    directives,
                    fields,
                }))
            },
            other => {
                // Callers only dispatch here on a type keyword.
                self.record_error(ParseError::new(
                    format!("`{other}` does not start a type definition"),
                    self.eof_span(),
                    ParseErrorKind::InvalidSyntax,
                ));
                Err(())
            },
        }
    }

    /// Names starting with `__` belong to introspection. Recorded without
    /// aborting the definition.
    fn check_reserved_type_name(&mut self, name: &str, span: SourceSpan) {
        if name.starts_with("__") {
            self.record_error(ParseError::new(
                format!("type name `{name}` is reserved: names starting with `__` belong to introspection"),
                span,
                ParseErrorKind::ReservedName {
                    name: name.to_string(),
                    context: ReservedNameContext::IntrospectionPrefix,
                },
            ));
        }
    }

    /// `extend (schema | scalar | type | interface | union | enum | input) ...`
    fn parse_extension(&mut self, position: AstPos) -> Result<ast::Definition, ()> {
        let extend_span = self.expect_keyword("extend")?;

        if self.peek_is_keyword("schema") {
            self.advance()?;
            let directives = self.parse_directive_annotations()?;
            let mut schema = ast::SchemaDefinition {
                position,
                directives,
                ..Default::default()
            };
            if self.peek_is(&SdlTokenKind::CurlyBraceOpen) {
                self.parse_root_operation_types(&mut schema)?;
            } else if schema.directives.is_empty() {
                self.record_empty_extension("schema", extend_span);
                return Err(());
            }
            return Ok(ast::Definition::SchemaExtension(schema));
        }

        let is_type_keyword = matches!(
            self.peek_kind(),
            Some(SdlTokenKind::Name(n)) if TYPE_DEFINITION_KEYWORDS.contains(&n.as_ref())
        );
        if !is_type_keyword {
            self.record_unexpected(&[
                "`schema`",
                "`scalar`",
                "`type`",
                "`interface`",
                "`union`",
                "`enum`",
                "`input`",
            ]);
            return Err(());
        }

        let definition = self.parse_type_definition(position, None)?;
        let adds_nothing = match &definition {
            ast::TypeDefinition::Scalar(def) => def.directives.is_empty(),
            ast::TypeDefinition::Object(def) => {
                def.implements.is_empty() && def.directives.is_empty() && def.fields.is_empty()
            },
            ast::TypeDefinition::Interface(def) => {
                def.implements.is_empty() && def.directives.is_empty() && def.fields.is_empty()
            },
            ast::TypeDefinition::Union(def) => def.directives.is_empty() && def.members.is_empty(),
            ast::TypeDefinition::Enum(def) => def.directives.is_empty() && def.values.is_empty(),
            ast::TypeDefinition::InputObject(def) => {
                def.directives.is_empty() && def.fields.is_empty()
            },
        };
        if adds_nothing {
            self.record_empty_extension(definition.name(), extend_span);
            return Err(());
        }
        Ok(ast::Definition::TypeExtension(ast::TypeExtension(definition)))
    }

    fn record_empty_extension(&mut self, target: &str, extend_span: SourceSpan) {
        let span = SourceSpan::new(
            extend_span.start_inclusive.clone(),
            self.last_end_position
                .clone()
                .unwrap_or(extend_span.end_exclusive.clone()),
        );
        let mut error = ParseError::new(
            format!("extension of `{target}` must add directives, members or fields"),
            span,
            ParseErrorKind::InvalidSyntax,
        );
        error.add_spec("https://spec.graphql.org/October2021/#sec-Type-Extensions");
        self.record_error(error);
    }

    /// `implements &? A & B`. Commas are ignored tokens, so the legacy
    /// `implements A, B` form parses too.
    fn parse_implements_interfaces(&mut self) -> Result<Vec<String>, ()> {
        if !self.peek_is_keyword("implements") {
            return Ok(Vec::new());
        }
        self.advance()?;
        if self.peek_is(&SdlTokenKind::Ampersand) {
            self.advance()?;
        }
        let mut interfaces = vec![self.expect_name()?.0];
        loop {
            if self.peek_is(&SdlTokenKind::Ampersand) {
                self.advance()?;
                interfaces.push(self.expect_name()?.0);
            } else if matches!(self.peek_kind(), Some(SdlTokenKind::Name(_)))
                && !self.next_name_starts_definition()
            {
                interfaces.push(self.expect_name()?.0);
            } else {
                break;
            }
        }
        Ok(interfaces)
    }

    /// Guards name-list continuations (`implements A B`) against swallowing
    /// the keyword of the next definition.
    fn next_name_starts_definition(&mut self) -> bool {
        let keyword = match self.peek_kind() {
            Some(SdlTokenKind::Name(n)) => n.to_string(),
            _ => return false,
        };
        self.looks_like_definition_start(&keyword, 1)
    }

    /// `= |? A | B`
    fn parse_union_members(&mut self) -> Result<Vec<String>, ()> {
        if !self.peek_is(&SdlTokenKind::Equals) {
            return Ok(Vec::new());
        }
        self.advance()?;
        if self.peek_is(&SdlTokenKind::Pipe) {
            self.advance()?;
        }
        let mut members = vec![self.expect_name()?.0];
        while self.peek_is(&SdlTokenKind::Pipe) {
            self.advance()?;
            members.push(self.expect_name()?.0);
        }
        Ok(members)
    }

    fn parse_optional_fields_definition(&mut self) -> Result<Vec<ast::FieldDefinition>, ()> {
        if !self.peek_is(&SdlTokenKind::CurlyBraceOpen) {
            return Ok(Vec::new());
        }
        self.parse_delimited(
            SdlTokenKind::CurlyBraceOpen,
            SdlTokenKind::CurlyBraceClose,
            DelimiterContext::FieldsDefinition,
            Self::parse_field_definition,
        )
    }

    /// `"desc"? name(args)?: Type @dirs`
    fn parse_field_definition(&mut self) -> Result<ast::FieldDefinition, ()> {
        let position = self.peek_position();
        let description = self.parse_description()?;
        let (name, _) = self.expect_name()?;
        let arguments = self.parse_optional_arguments_definition()?;
        self.expect(&SdlTokenKind::Colon)?;
        let field_type = self.parse_type_annotation()?;
        let directives = self.parse_directive_annotations()?;
        Ok(ast::FieldDefinition {
            position,
            description,
            name,
            arguments,
            field_type,
            directives,
        })
    }

    fn parse_optional_arguments_definition(
        &mut self,
    ) -> Result<Vec<ast::InputValueDefinition>, ()> {
        if !self.peek_is(&SdlTokenKind::ParenOpen) {
            return Ok(Vec::new());
        }
        self.parse_delimited(
            SdlTokenKind::ParenOpen,
            SdlTokenKind::ParenClose,
            DelimiterContext::ArgumentsDefinition,
            Self::parse_input_value_definition,
        )
    }

    /// `"desc"? name: Type (= default)? @dirs`
    fn parse_input_value_definition(&mut self) -> Result<ast::InputValueDefinition, ()> {
        let position = self.peek_position();
        let description = self.parse_description()?;
        let (name, _) = self.expect_name()?;
        self.expect(&SdlTokenKind::Colon)?;
        let value_type = self.parse_type_annotation()?;
        let default_value = if self.peek_is(&SdlTokenKind::Equals) {
            self.advance()?;
            Some(self.parse_const_value()?)
        } else {
            None
        };
        let directives = self.parse_directive_annotations()?;
        Ok(ast::InputValueDefinition {
            position,
            description,
            name,
            value_type,
            default_value,
            directives,
        })
    }

    fn parse_enum_value_definition(&mut self) -> Result<ast::EnumValueDefinition, ()> {
        let position = self.peek_position();
        let description = self.parse_description()?;

        let reserved = match self.token_stream.peek() {
            Some(token) => match &token.kind {
                SdlTokenKind::True | SdlTokenKind::False | SdlTokenKind::Null => {
                    Some((token.kind.as_name().unwrap_or_default().to_string(), token.span.clone()))
                },
                _ => None,
            },
            None => None,
        };
        if let Some((name, span)) = reserved {
            let mut error = ParseError::new(
                format!("enum value cannot be `{name}`"),
                span,
                ParseErrorKind::ReservedName {
                    name,
                    context: ReservedNameContext::EnumValue,
                },
            );
            error.add_note("`true`, `false` and `null` would be ambiguous with literals");
            self.record_error(error);
            return Err(());
        }

        let (name, _) = self.expect_name()?;
        let directives = self.parse_directive_annotations()?;
        Ok(ast::EnumValueDefinition {
            position,
            description,
            name,
            directives,
        })
    }

    /// `directive @name(args)? repeatable? on |? LOC | LOC`
    fn parse_directive_definition(
        &mut self,
        position: AstPos,
        description: Option<String>,
    ) -> Result<ast::DirectiveDefinition, ()> {
        self.expect_keyword("directive")?;
        self.expect(&SdlTokenKind::At)?;
        let (name, _) = self.expect_name()?;
        let arguments = self.parse_optional_arguments_definition()?;
        let repeatable = if self.peek_is_keyword("repeatable") {
            self.advance()?;
            true
        } else {
            false
        };
        self.expect_keyword("on")?;
        if self.peek_is(&SdlTokenKind::Pipe) {
            self.advance()?;
        }
        let mut locations = vec![self.parse_directive_location()?];
        while self.peek_is(&SdlTokenKind::Pipe) {
            self.advance()?;
            locations.push(self.parse_directive_location()?);
        }
        Ok(ast::DirectiveDefinition {
            position,
            description,
            name,
            arguments,
            repeatable,
            locations,
        })
    }

    fn parse_directive_location(&mut self) -> Result<DirectiveLocationKind, ()> {
        let (name, span) = self.expect_name()?;
        match DirectiveLocationKind::from_name(&name) {
            Some(kind) => Ok(kind),
            None => {
                let mut error = ParseError::new(
                    format!("unknown directive location `{name}`"),
                    span,
                    ParseErrorKind::InvalidSyntax,
                );
                if let Some(kind) = DirectiveLocationKind::from_name(&name.to_ascii_uppercase()) {
                    error.add_help(format!("did you mean `{}`?", kind.as_str()));
                }
                self.record_error(error);
                Err(())
            },
        }
    }

    // =========================================================================
    // Annotations, types and values
    // =========================================================================

    fn parse_directive_annotations(&mut self) -> Result<Vec<ast::DirectiveAnnotation>, ()> {
        let mut directives = Vec::new();
        while self.peek_is(&SdlTokenKind::At) {
            let position = self.peek_position();
            self.advance()?;
            let (name, _) = self.expect_name()?;
            let arguments = if self.peek_is(&SdlTokenKind::ParenOpen) {
                self.parse_delimited(
                    SdlTokenKind::ParenOpen,
                    SdlTokenKind::ParenClose,
                    DelimiterContext::DirectiveArguments,
                    Self::parse_argument,
                )?
            } else {
                Vec::new()
            };
            directives.push(ast::DirectiveAnnotation {
                position,
                name,
                arguments,
            });
        }
        Ok(directives)
    }

    fn parse_argument(&mut self) -> Result<ast::Argument, ()> {
        let position = self.peek_position();
        let (name, _) = self.expect_name()?;
        self.expect(&SdlTokenKind::Colon)?;
        let value = self.parse_const_value()?;
        Ok(ast::Argument {
            position,
            name,
            value,
        })
    }

    fn parse_type_annotation(&mut self) -> Result<TypeAnnotation, ()> {
        self.enter_recursion()?;
        let result = self.parse_type_annotation_impl();
        self.exit_recursion();
        result
    }

    fn parse_type_annotation_impl(&mut self) -> Result<TypeAnnotation, ()> {
        let annotation = if self.peek_is(&SdlTokenKind::SquareBracketOpen) {
            let open = self.advance()?;
            self.push_delimiter(open.span, DelimiterContext::ListType);
            let element = self.parse_type_annotation();
            let close = element.and_then(|element| {
                if self.peek_is(&SdlTokenKind::SquareBracketClose) {
                    self.advance()?;
                    Ok(element)
                } else if self.token_stream.is_at_end() {
                    self.handle_unclosed_delimiter(&SdlTokenKind::SquareBracketClose);
                    Err(())
                } else {
                    self.record_unexpected(&["`]`"]);
                    Err(())
                }
            });
            self.pop_delimiter();
            TypeAnnotation::List {
                element: Box::new(close?),
                nullability: Nullability::Nullable,
            }
        } else {
            let (name, _) = self.expect_name()?;
            TypeAnnotation::Named {
                name,
                nullability: Nullability::Nullable,
            }
        };

        if !self.peek_is(&SdlTokenKind::Bang) {
            return Ok(annotation);
        }
        self.advance()?;
        Ok(match annotation {
            TypeAnnotation::Named { name, .. } => TypeAnnotation::Named {
                name,
                nullability: Nullability::NonNull,
            },
            TypeAnnotation::List { element, .. } => TypeAnnotation::List {
                element,
                nullability: Nullability::NonNull,
            },
        })
    }

    fn parse_const_value(&mut self) -> Result<Value, ()> {
        self.enter_recursion()?;
        let result = self.parse_const_value_impl();
        self.exit_recursion();
        result
    }

    fn parse_const_value_impl(&mut self) -> Result<Value, ()> {
        let next = self.peek_kind().cloned();
        match next {
            Some(SdlTokenKind::IntValue(_)) => {
                let token = self.advance()?;
                let parsed = token.kind.parse_int_value();
                match parsed {
                    Some(Ok(v)) if i32::try_from(v).is_ok() => Ok(Value::Int(v as i32)),
                    _ => {
                        let raw = match &token.kind {
                            SdlTokenKind::IntValue(raw) => raw.to_string(),
                            _ => String::new(),
                        };
                        let mut error = ParseError::new(
                            format!("integer `{raw}` does not fit in a 32-bit signed integer"),
                            token.span,
                            ParseErrorKind::InvalidValue(ValueParsingError::Int(raw)),
                        );
                        error.add_help("use a Float or a custom scalar for larger numbers");
                        self.record_error(error);
                        Err(())
                    },
                }
            },
            Some(SdlTokenKind::FloatValue(_)) => {
                let token = self.advance()?;
                match token.kind.parse_float_value() {
                    Some(Ok(v)) if v.is_finite() => Ok(Value::Float(v)),
                    _ => {
                        let raw = match &token.kind {
                            SdlTokenKind::FloatValue(raw) => raw.to_string(),
                            _ => String::new(),
                        };
                        self.record_error(ParseError::new(
                            format!("float `{raw}` is not a finite number"),
                            token.span,
                            ParseErrorKind::InvalidValue(ValueParsingError::Float(raw)),
                        ));
                        Err(())
                    },
                }
            },
            Some(SdlTokenKind::StringValue(_)) => {
                let token = self.advance()?;
                self.cook_string(token).map(Value::String)
            },
            Some(SdlTokenKind::True) => {
                self.advance()?;
                Ok(Value::Boolean(true))
            },
            Some(SdlTokenKind::False) => {
                self.advance()?;
                Ok(Value::Boolean(false))
            },
            Some(SdlTokenKind::Null) => {
                self.advance()?;
                Ok(Value::Null)
            },
            Some(SdlTokenKind::Name(_)) => {
                let (name, _) = self.expect_name()?;
                Ok(Value::Enum(name))
            },
            Some(SdlTokenKind::SquareBracketOpen) => self
                .parse_delimited(
                    SdlTokenKind::SquareBracketOpen,
                    SdlTokenKind::SquareBracketClose,
                    DelimiterContext::ListValue,
                    Self::parse_const_value,
                )
                .map(Value::List),
            Some(SdlTokenKind::CurlyBraceOpen) => self
                .parse_delimited(
                    SdlTokenKind::CurlyBraceOpen,
                    SdlTokenKind::CurlyBraceClose,
                    DelimiterContext::ObjectValue,
                    |parser| {
                        let (name, _) = parser.expect_name()?;
                        parser.expect(&SdlTokenKind::Colon)?;
                        let value = parser.parse_const_value()?;
                        Ok(ast::ObjectField { name, value })
                    },
                )
                .map(Value::Object),
            _ => {
                self.record_unexpected(&["value"]);
                Err(())
            },
        }
    }
}

/// Compares token kinds by variant only: "is this a name?", not "is this
/// the name `foo`?".
fn token_kinds_match<'a>(actual: &SdlTokenKind<'a>, expected: &SdlTokenKind<'a>) -> bool {
    std::mem::discriminant(actual) == std::mem::discriminant(expected)
}

/// `a`, `a or b`, `one of a, b, c`.
fn format_expected(expected: &[&str]) -> String {
    match expected {
        [] => "token".to_string(),
        [one] => one.to_string(),
        [a, b] => format!("{a} or {b}"),
        many => format!("one of {}", many.join(", ")),
    }
}
