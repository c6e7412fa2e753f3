//! Decoding of quoted and block string literals.

use crate::token::SdlTokenKind;
use crate::StringParsingError;

fn cook(raw: &str) -> Result<String, StringParsingError> {
    SdlTokenKind::StringValue(raw.into())
        .parse_string_value()
        .unwrap()
}

// =============================================================================
// Quoted strings
// =============================================================================

#[test]
fn plain_string() {
    assert_eq!(cook(r#""hello""#), Ok("hello".to_string()));
    assert_eq!(cook(r#""""#), Ok(String::new()));
}

#[test]
fn simple_escapes() {
    assert_eq!(
        cook(r#""\" \\ \/ \b \f \n \r \t""#),
        Ok("\" \\ / \u{8} \u{c} \n \r \t".to_string()),
    );
}

#[test]
fn unicode_escapes() {
    assert_eq!(cook(r#""\u00e9""#), Ok("é".to_string()));
    assert_eq!(cook(r#""\u{1F600}""#), Ok("\u{1F600}".to_string()));
}

#[test]
fn invalid_escapes() {
    assert_eq!(
        cook(r#""\q""#),
        Err(StringParsingError::InvalidEscapeSequence("\\q".to_string())),
    );
    assert_eq!(
        cook(r#""\u12""#),
        Err(StringParsingError::InvalidUnicodeEscape("\\u12".to_string())),
    );
    assert_eq!(
        cook(r#""\u{110000}""#),
        Err(StringParsingError::InvalidUnicodeEscape("\\u{110000}".to_string())),
    );
    assert_eq!(
        cook(r#""\uD800""#),
        Err(StringParsingError::InvalidUnicodeEscape("\\uD800".to_string())),
    );
}

// =============================================================================
// Block strings
// =============================================================================

/// Common indentation and surrounding blank lines are removed.
#[test]
fn block_string_dedent() {
    let raw = "\"\"\"\n    Hello,\n      World!\n\n    Yours,\n      GraphQL.\n  \"\"\"";
    assert_eq!(
        cook(raw),
        Ok("Hello,\n  World!\n\nYours,\n  GraphQL.".to_string()),
    );
}

/// The first line does not count toward the common indentation.
#[test]
fn block_string_first_line_kept() {
    assert_eq!(
        cook("\"\"\"  first\n    second\n    third\"\"\""),
        Ok("  first\nsecond\nthird".to_string()),
    );
}

#[test]
fn block_string_no_escapes() {
    assert_eq!(
        cook(r#""""a \n b \"""c""""#),
        Ok(r#"a \n b """c"#.to_string()),
    );
}

#[test]
fn block_string_blank_only() {
    assert_eq!(cook("\"\"\"\n   \n\"\"\""), Ok(String::new()));
}
