use crate::Document;
use sdl_parser::ast;
use sdl_parser::SdlParser;
use std::collections::HashSet;

/// Parses `source`, panicking with the rendered errors if it is invalid.
pub fn parse(source: &str) -> Document {
    match Document::parse(source) {
        Ok(doc) => doc,
        Err(err) => panic!("{}", err.format_detailed(Some(source))),
    }
}

/// Parses a single type definition, as a caller building a replacement
/// node would.
pub fn type_definition(source: &str) -> ast::TypeDefinition {
    match SdlParser::new(source).parse_definition().into_result() {
        Ok(ast::Definition::Type(def)) => def,
        other => panic!("expected a type definition, got: {other:?}"),
    }
}

pub fn registry(classes: &[&str]) -> HashSet<String> {
    classes.iter().map(|c| c.to_string()).collect()
}

pub fn field_names(def: &ast::TypeDefinition) -> Vec<&str> {
    def.fields().iter().map(|f| f.name.as_str()).collect()
}
