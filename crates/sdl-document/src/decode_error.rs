use crate::serializer::StoredState;

/// Why a byte blob could not be decoded into a document.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("input is {found} bytes, shorter than the {expected}-byte header")]
    Truncated { expected: usize, found: usize },

    #[error("input does not start with the `SDLD` magic (found {found:02x?})")]
    BadMagic { found: [u8; 4] },

    #[error("unsupported format version {found} (this build reads version {supported})")]
    UnsupportedVersion { found: u16, supported: u16 },

    #[error("unknown document state byte {0:#04x}")]
    UnknownState(u8),

    #[error("expected a document in the {expected} state, found one in the {found} state")]
    UnexpectedState {
        expected: StoredState,
        found: StoredState,
    },

    #[error("malformed document payload: {0}")]
    Payload(#[from] bincode::error::DecodeError),

    #[error("document payload nests values or types deeper than {limit} levels")]
    TooDeep { limit: usize },

    #[error("{count} unexpected bytes after the document payload")]
    TrailingBytes { count: usize },

    #[error(
        "stored binding for model class `{class_name}` does not match the \
        decoded type definitions"
    )]
    IndexMismatch { class_name: String },
}
