use crate::ast::AstPos;

/// A location within SDL source text.
///
/// All values are 0-based:
/// - `line`: 0 = first line of the document
/// - `column`: character (not byte) count from the start of the line
/// - `byte_offset`: byte offset from the start of the document
///
/// Lexers compute these while scanning; this struct has no mutation methods.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SourcePosition {
    line: usize,
    column: usize,
    byte_offset: usize,
}

impl SourcePosition {
    pub fn new(line: usize, column: usize, byte_offset: usize) -> Self {
        Self {
            line,
            column,
            byte_offset,
        }
    }

    /// Returns the 0-based line number.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Returns the 0-based character column within the current line.
    ///
    /// Multi-byte characters (e.g. `é`) advance this by 1.
    pub fn column(&self) -> usize {
        self.column
    }

    /// Returns the 0-based byte offset from document start.
    pub fn byte_offset(&self) -> usize {
        self.byte_offset
    }

    /// Converts to the 1-based [`AstPos`] stored on AST nodes.
    pub fn to_ast_pos(&self) -> AstPos {
        AstPos {
            line: self.line + 1,
            column: self.column + 1,
        }
    }
}
