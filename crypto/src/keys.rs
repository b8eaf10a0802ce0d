//! Local secp256k1 signing keys.

use alloy_primitives::Address;
use secp256k1::{PublicKey, SecretKey};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::address::address_from_public_key;
use crate::error::CryptoError;

/// A 32-byte secp256k1 private key.
///
/// Intentionally does not implement `Debug`, `Clone` or `Serialize`.
/// Key bytes are zeroized on drop.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct PrivateKey([u8; 32]);

impl PrivateKey {
    /// Wrap raw key bytes, rejecting zero and values outside the curve order.
    pub fn from_bytes(bytes: [u8; 32]) -> Result<Self, CryptoError> {
        SecretKey::from_slice(&bytes).map_err(|e| CryptoError::InvalidPrivateKey(e.to_string()))?;
        Ok(Self(bytes))
    }

    /// Parse a hex key, with or without a `0x` prefix.
    pub fn from_hex(raw: &str) -> Result<Self, CryptoError> {
        let trimmed = raw.trim();
        let hex_part = trimmed.strip_prefix("0x").unwrap_or(trimmed);
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(hex_part, &mut bytes)
            .map_err(|e| CryptoError::InvalidPrivateKey(e.to_string()))?;
        let key = Self::from_bytes(bytes);
        bytes.zeroize();
        key
    }

    pub(crate) fn secret_key(&self) -> SecretKey {
        // Validated in `from_bytes`.
        SecretKey::from_slice(&self.0).expect("private key bytes validated at construction")
    }

    pub fn public_key(&self) -> PublicKey {
        PublicKey::from_secret_key(crate::secp(), &self.secret_key())
    }

    /// The Ethereum address this key signs for.
    pub fn address(&self) -> Address {
        address_from_public_key(&self.public_key())
    }
}
