//! Error type for constructing and parsing the core value types.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypesError {
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    #[error("invalid signature length: expected 64 or 65 bytes, got {0}")]
    SignatureLength(usize),

    #[error("invalid signature recovery byte: {0}")]
    SignatureRecoveryByte(u8),

    #[error("invalid hex: {0}")]
    InvalidHex(String),

    #[error("unknown vote choice: {0}")]
    UnknownVoteChoice(String),
}
