//! Byte encoding of documents for caching between runs.
//!
//! Layout:
//!
//! | bytes | content                                             |
//! |-------|-----------------------------------------------------|
//! | 0..4  | magic `SDLD`                                        |
//! | 4..6  | format version, little-endian `u16`                 |
//! | 6     | [`StoredState`]                                     |
//! | 7..   | the document, bincode (`config::standard()`)       |
//!
//! The payload is the serde form of the document: every AST node enum is
//! written as its variant index followed by the variant's fields.

use crate::ast;
use crate::DecodeError;
use crate::Document;
use crate::EncodeError;

pub const MAGIC: [u8; 4] = *b"SDLD";
pub const FORMAT_VERSION: u16 = 1;
pub const HEADER_LEN: usize = MAGIC.len() + 2 + 1;

/// Whether the stored document had its bindings resolved.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StoredState {
    Unresolved,
    Resolved,
}

impl StoredState {
    pub fn as_byte(self) -> u8 {
        match self {
            StoredState::Unresolved => 0,
            StoredState::Resolved => 1,
        }
    }

    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(StoredState::Unresolved),
            1 => Some(StoredState::Resolved),
            _ => None,
        }
    }
}

impl std::fmt::Display for StoredState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            StoredState::Unresolved => "unresolved",
            StoredState::Resolved => "resolved",
        })
    }
}

/// Encodes an unresolved document.
pub fn serialize(document: &Document) -> Result<Vec<u8>, EncodeError> {
    encode(document, StoredState::Unresolved)
}

/// Decodes bytes written by [`serialize`].
pub fn deserialize(bytes: &[u8]) -> Result<Document, DecodeError> {
    decode(bytes, StoredState::Unresolved)
}

/// Reads the state byte without decoding the payload.
pub fn peek_state(bytes: &[u8]) -> Result<StoredState, DecodeError> {
    let header = read_header(bytes)?;
    StoredState::from_byte(header).ok_or(DecodeError::UnknownState(header))
}

pub(crate) fn encode(
    document: &Document,
    state: StoredState,
) -> Result<Vec<u8>, EncodeError> {
    let payload = bincode::serde::encode_to_vec(document, bincode::config::standard())?;
    let mut bytes = Vec::with_capacity(HEADER_LEN + payload.len());
    bytes.extend_from_slice(&MAGIC);
    bytes.extend_from_slice(&FORMAT_VERSION.to_le_bytes());
    bytes.push(state.as_byte());
    bytes.extend_from_slice(&payload);
    log::debug!(
        "Encoded {state} document: {} types, {} bytes.",
        document.types().len(),
        bytes.len(),
    );
    Ok(bytes)
}

pub(crate) fn decode(
    bytes: &[u8],
    expected_state: StoredState,
) -> Result<Document, DecodeError> {
    let found_state = peek_state(bytes)?;
    if found_state != expected_state {
        return Err(DecodeError::UnexpectedState {
            expected: expected_state,
            found: found_state,
        });
    }

    let payload = &bytes[HEADER_LEN..];
    let (document, read): (Document, usize) =
        bincode::serde::decode_from_slice(payload, bincode::config::standard())
            .map_err(payload_error)?;
    if read != payload.len() {
        return Err(DecodeError::TrailingBytes {
            count: payload.len() - read,
        });
    }

    check_class_index(&document, expected_state)?;
    log::debug!(
        "Decoded {expected_state} document: {} types.",
        document.types().len(),
    );
    Ok(document)
}

fn payload_error(err: bincode::error::DecodeError) -> DecodeError {
    match &err {
        bincode::error::DecodeError::OtherString(message)
            if message == ast::DECODE_DEPTH_EXCEEDED =>
        {
            DecodeError::TooDeep {
                limit: ast::MAX_DECODE_DEPTH,
            }
        },
        _ => DecodeError::Payload(err),
    }
}

/// Validates magic and version; returns the state byte.
fn read_header(bytes: &[u8]) -> Result<u8, DecodeError> {
    if bytes.len() < HEADER_LEN {
        return Err(DecodeError::Truncated {
            expected: HEADER_LEN,
            found: bytes.len(),
        });
    }
    let magic = [bytes[0], bytes[1], bytes[2], bytes[3]];
    if magic != MAGIC {
        return Err(DecodeError::BadMagic { found: magic });
    }
    let version = u16::from_le_bytes([bytes[4], bytes[5]]);
    if version != FORMAT_VERSION {
        return Err(DecodeError::UnsupportedVersion {
            found: version,
            supported: FORMAT_VERSION,
        });
    }
    Ok(bytes[6])
}

/// An unresolved document's index must equal the one its types imply.
/// A resolved index is keyed by canonical names, which cannot be recomputed
/// without the registry, so only its targets are checked: each must be a
/// type that carries a binding annotation.
fn check_class_index(
    document: &Document,
    state: StoredState,
) -> Result<(), DecodeError> {
    let stored = document.class_name_to_type_name();
    match state {
        StoredState::Unresolved => {
            let derived = document.derive_class_index();
            let mismatch = stored
                .iter()
                .find(|(class_name, type_name)| derived.get(*class_name) != Some(*type_name))
                .map(|(class_name, _)| class_name)
                .or_else(|| derived.keys().find(|class_name| !stored.contains_key(*class_name)));
            match mismatch {
                Some(class_name) => Err(DecodeError::IndexMismatch {
                    class_name: class_name.clone(),
                }),
                None => Ok(()),
            }
        },
        StoredState::Resolved => {
            let options = document.binding_options();
            for (class_name, type_name) in stored {
                let is_bound = document.type_definition(type_name).is_some_and(|def| {
                    def.directives()
                        .iter()
                        .any(|annotation| annotation.name == options.directive_name)
                });
                if !is_bound {
                    return Err(DecodeError::IndexMismatch {
                        class_name: class_name.clone(),
                    });
                }
            }
            Ok(())
        },
    }
}
