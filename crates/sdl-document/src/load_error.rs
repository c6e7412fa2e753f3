use crate::ReadContentError;
use crate::SyntaxError;
use std::path::PathBuf;

/// Failure to build a [`Document`](crate::Document) from files on disk.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error(transparent)]
    Read(#[from] ReadContentError),

    #[error("{file_path:?}: {err}")]
    Syntax {
        file_path: PathBuf,
        /// Kept for rendering snippets with
        /// [`SyntaxError::format_detailed`].
        source_text: String,
        err: SyntaxError,
    },
}
