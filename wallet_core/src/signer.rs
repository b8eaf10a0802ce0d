//! Signing authorities.

use async_trait::async_trait;
use dirvote_crypto::{sign_digest, PrivateKey};
use dirvote_types::{Address, Signature};
use dirvote_typed_data::TypedPayload;

use crate::error::WalletError;

/// Whoever holds the voter's key.
///
/// `sign` may suspend indefinitely while a user decides; dropping the future
/// cancels the request. `Ok(None)` means the user declined.
#[async_trait]
pub trait SigningAuthority: Send + Sync {
    /// The address this authority signs as.
    fn address(&self) -> Address;

    async fn sign(&self, payload: &TypedPayload) -> Result<Option<Signature>, WalletError>;
}

/// Signs in-process with a secp256k1 key held in memory.
pub struct LocalKeySigner {
    key: PrivateKey,
    address: Address,
}

impl LocalKeySigner {
    pub fn new(key: PrivateKey) -> Self {
        let address = key.address();
        Self { key, address }
    }

    pub fn from_hex(raw: &str) -> Result<Self, WalletError> {
        let key = PrivateKey::from_hex(raw).map_err(|e| WalletError::Key(e.to_string()))?;
        Ok(Self::new(key))
    }
}

#[async_trait]
impl SigningAuthority for LocalKeySigner {
    fn address(&self) -> Address {
        self.address
    }

    async fn sign(&self, payload: &TypedPayload) -> Result<Option<Signature>, WalletError> {
        Ok(Some(sign_digest(&payload.signing_hash(), &self.key)))
    }
}
