use dirvote_typed_data::TypedDataError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WalletError {
    #[error("no signing authority available: {0}")]
    SigningUnavailable(String),

    #[error("invalid key: {0}")]
    Key(String),

    #[error("signing error: {0}")]
    Signing(String),

    #[error("wallet RPC error: {0}")]
    Rpc(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error(transparent)]
    TypedData(#[from] TypedDataError),
}
