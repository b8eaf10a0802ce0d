//! Cryptographic primitives for dirvote.
//!
//! - **Keccak-256** for typed-data digests and address derivation
//! - **EIP-191** personal-message hashing for feature proposals
//! - **secp256k1** recoverable ECDSA for signing with a local key and for
//!   recovering the signer address from a digest + signature

pub mod address;
pub mod error;
pub mod hash;
pub mod keys;
pub mod recover;
pub mod sign;

pub use address::address_from_public_key;
pub use error::CryptoError;
pub use hash::{eth_message_hash, keccak256, keccak256_multi};
pub use keys::PrivateKey;
pub use recover::recover_signer;
pub use sign::sign_digest;

use secp256k1::{All, Secp256k1};
use std::sync::OnceLock;

/// Shared secp256k1 context; building one is expensive.
pub(crate) fn secp() -> &'static Secp256k1<All> {
    static SECP: OnceLock<Secp256k1<All>> = OnceLock::new();
    SECP.get_or_init(Secp256k1::new)
}
