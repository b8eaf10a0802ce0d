//! Recoverable ECDSA signing of 32-byte digests.

use alloy_primitives::B256;
use dirvote_types::Signature;
use secp256k1::Message;

use crate::keys::PrivateKey;

/// Sign a digest with a local key, returning a recoverable signature.
///
/// The digest is signed as-is: callers pass the final EIP-712 or EIP-191
/// hash, never the raw payload. Output `s` is always in the lower half
/// of the curve order.
pub fn sign_digest(digest: &B256, key: &PrivateKey) -> Signature {
    let msg = Message::from_digest(digest.0);
    let recoverable = crate::secp().sign_ecdsa_recoverable(&msg, &key.secret_key());
    let (recovery_id, compact) = recoverable.serialize_compact();
    Signature::from_parts(
        B256::from_slice(&compact[..32]),
        B256::from_slice(&compact[32..]),
        recovery_id.to_i32() == 1,
    )
}
