use crate::StringParsingError;
use std::iter::Peekable;
use std::str::Chars;

/// Decodes the raw text of a string literal (quotes included).
pub(crate) fn cook(raw: &str) -> Result<String, StringParsingError> {
    if raw.starts_with("\"\"\"") {
        cook_block_string(raw)
    } else {
        cook_quoted_string(raw)
    }
}

fn cook_quoted_string(raw: &str) -> Result<String, StringParsingError> {
    if raw.len() < 2 || !raw.starts_with('"') || !raw.ends_with('"') {
        return Err(StringParsingError::UnterminatedString);
    }
    let content = &raw[1..raw.len() - 1];

    let mut result = String::with_capacity(content.len());
    let mut chars = content.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => result.push('\n'),
            Some('r') => result.push('\r'),
            Some('t') => result.push('\t'),
            Some('\\') => result.push('\\'),
            Some('"') => result.push('"'),
            Some('/') => result.push('/'),
            Some('b') => result.push('\u{0008}'),
            Some('f') => result.push('\u{000C}'),
            Some('u') => result.push(cook_unicode_escape(&mut chars)?),
            Some(other) => {
                return Err(StringParsingError::InvalidEscapeSequence(format!(
                    "\\{other}"
                )));
            },
            None => {
                return Err(StringParsingError::InvalidEscapeSequence(
                    "\\".to_string(),
                ));
            },
        }
    }
    Ok(result)
}

/// Decodes the part after `\u`: either `XXXX` or `{X...}`.
fn cook_unicode_escape(chars: &mut Peekable<Chars>) -> Result<char, StringParsingError> {
    let mut hex = String::new();
    let braced = chars.peek() == Some(&'{');
    if braced {
        chars.next();
        loop {
            match chars.next() {
                Some('}') => break,
                Some(c) if c.is_ascii_hexdigit() => hex.push(c),
                Some(c) => {
                    return Err(StringParsingError::InvalidUnicodeEscape(format!(
                        "\\u{{{hex}{c}"
                    )));
                },
                None => {
                    return Err(StringParsingError::InvalidUnicodeEscape(format!(
                        "\\u{{{hex}"
                    )));
                },
            }
        }
    } else {
        for _ in 0..4 {
            match chars.next() {
                Some(c) if c.is_ascii_hexdigit() => hex.push(c),
                Some(c) => {
                    return Err(StringParsingError::InvalidUnicodeEscape(format!(
                        "\\u{hex}{c}"
                    )));
                },
                None => {
                    return Err(StringParsingError::InvalidUnicodeEscape(format!(
                        "\\u{hex}"
                    )));
                },
            }
        }
    }

    let display = if braced {
        format!("\\u{{{hex}}}")
    } else {
        format!("\\u{hex}")
    };
    if hex.is_empty() {
        return Err(StringParsingError::InvalidUnicodeEscape(display));
    }
    u32::from_str_radix(&hex, 16)
        .ok()
        .and_then(char::from_u32)
        .ok_or(StringParsingError::InvalidUnicodeEscape(display))
}

/// Applies the GraphQL block-string algorithm: strip common indentation
/// (ignoring the first line) and drop leading and trailing blank lines.
fn cook_block_string(raw: &str) -> Result<String, StringParsingError> {
    if raw.len() < 6 || !raw.ends_with("\"\"\"") {
        return Err(StringParsingError::UnterminatedString);
    }
    let content = raw[3..raw.len() - 3].replace("\\\"\"\"", "\"\"\"");
    let lines: Vec<&str> = content.lines().collect();

    let common_indent = lines
        .iter()
        .skip(1)
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.len() - line.trim_start_matches([' ', '\t']).len())
        .min()
        .unwrap_or(0);

    let mut out: Vec<&str> = lines
        .iter()
        .enumerate()
        .map(|(i, line)| {
            if i > 0 && line.len() >= common_indent {
                &line[common_indent..]
            } else {
                line
            }
        })
        .collect();

    while out.first().is_some_and(|l| l.trim().is_empty()) {
        out.remove(0);
    }
    while out.last().is_some_and(|l| l.trim().is_empty()) {
        out.pop();
    }
    Ok(out.join("\n"))
}
