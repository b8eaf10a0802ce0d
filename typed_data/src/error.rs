use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypedDataError {
    #[error("community public key is not hex: {0}")]
    InvalidPublicKey(String),
}
