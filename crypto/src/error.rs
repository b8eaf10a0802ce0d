use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CryptoError {
    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("invalid digest length: {0}")]
    InvalidDigest(usize),

    #[error("signature recovery failed")]
    Recovery,
}
