//! Nullable signing authority: scripted user behaviour.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use dirvote_crypto::{sign_digest, PrivateKey};
use dirvote_types::{Address, Signature};
use dirvote_typed_data::TypedPayload;
use dirvote_wallet_core::{SigningAuthority, WalletError};

enum Behaviour {
    Sign(PrivateKey),
    Decline,
    Unreachable,
}

/// A signing authority whose user always approves, always declines, or whose
/// wallet is unreachable. Counts how often it was asked.
pub struct NullSigner {
    address: Address,
    behaviour: Behaviour,
    requests: AtomicUsize,
}

impl NullSigner {
    /// Approves every request, signing with `key`.
    pub fn approving(key: PrivateKey) -> Self {
        Self {
            address: key.address(),
            behaviour: Behaviour::Sign(key),
            requests: AtomicUsize::new(0),
        }
    }

    /// Signs as `address` but the user declines every request.
    pub fn declining(address: Address) -> Self {
        Self {
            address,
            behaviour: Behaviour::Decline,
            requests: AtomicUsize::new(0),
        }
    }

    /// Every request fails as if the wallet could not be reached.
    pub fn unreachable(address: Address) -> Self {
        Self {
            address,
            behaviour: Behaviour::Unreachable,
            requests: AtomicUsize::new(0),
        }
    }

    /// How many signatures were requested.
    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SigningAuthority for NullSigner {
    fn address(&self) -> Address {
        self.address
    }

    async fn sign(&self, payload: &TypedPayload) -> Result<Option<Signature>, WalletError> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        match &self.behaviour {
            Behaviour::Sign(key) => Ok(Some(sign_digest(&payload.signing_hash(), key))),
            Behaviour::Decline => Ok(None),
            Behaviour::Unreachable => Err(WalletError::Rpc("null signer: unreachable".into())),
        }
    }
}
