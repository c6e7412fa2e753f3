#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error("failed to encode document payload: {0}")]
    Payload(#[from] bincode::error::EncodeError),
}
