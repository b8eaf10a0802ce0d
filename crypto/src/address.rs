//! Ethereum address derivation from secp256k1 public keys.
//!
//! address = last 20 bytes of Keccak-256(uncompressed public key without
//! its `0x04` tag byte).

use alloy_primitives::Address;
use secp256k1::PublicKey;

use crate::hash::keccak256;

/// Derive the Ethereum address controlled by a public key.
pub fn address_from_public_key(public_key: &PublicKey) -> Address {
    let uncompressed = public_key.serialize_uncompressed();
    let hash = keccak256(&uncompressed[1..]);
    Address::from_slice(&hash[12..])
}
