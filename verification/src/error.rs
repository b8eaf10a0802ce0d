use dirvote_types::{Address, TimestampMs};
use thiserror::Error;

/// Why a message was excluded. Never surfaced to end users; used for
/// logging and tests.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerificationFailure {
    #[error("signature is malformed; no signer could be recovered")]
    UnrecoverableSignature,

    #[error("signed by {recovered}, claims {claimed}")]
    SignerMismatch { claimed: Address, recovered: Address },

    #[error("transport timestamp {transport} does not match signed timestamp {signed}")]
    TimestampMismatch {
        signed: TimestampMs,
        transport: TimestampMs,
    },

    #[error("typed data could not be rebuilt: {0}")]
    TypedData(String),
}
