//! Signer recovery: derive the address that produced a signature over a
//! digest, without any public-key lookup.

use alloy_primitives::{Address, B256};
use dirvote_types::Signature;
use secp256k1::ecdsa::{RecoverableSignature, RecoveryId};
use secp256k1::Message;

use crate::address::address_from_public_key;
use crate::error::CryptoError;

/// Recover the address that signed `digest`.
///
/// A malformed signature (r or s out of range, no point for r) yields
/// [`CryptoError::Recovery`]. A well-formed signature over a different
/// digest recovers to some other address; callers must compare.
pub fn recover_signer(digest: &B256, signature: &Signature) -> Result<Address, CryptoError> {
    let mut compact = [0u8; 64];
    compact[..32].copy_from_slice(signature.r().as_slice());
    compact[32..].copy_from_slice(signature.s().as_slice());

    let recid = RecoveryId::from_i32(i32::from(signature.recovery_id()))
        .map_err(|_| CryptoError::Recovery)?;
    let recoverable =
        RecoverableSignature::from_compact(&compact, recid).map_err(|_| CryptoError::Recovery)?;

    let msg = Message::from_digest(digest.0);
    let pubkey = crate::secp()
        .recover_ecdsa(&msg, &recoverable)
        .map_err(|_| CryptoError::Recovery)?;
    Ok(address_from_public_key(&pubkey))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::keccak256;
    use k256::ecdsa::SigningKey;

    // Sign with an independent implementation so recovery is not only
    // checked against our own signer.
    fn k256_sign(key_bytes: [u8; 32], digest: &B256) -> (Signature, Address) {
        let signing_key = SigningKey::from_bytes(&key_bytes.into()).expect("valid key");
        let (sig, recovery_id) = signing_key
            .sign_prehash_recoverable(digest.as_slice())
            .expect("sign");
        let r = B256::from_slice(&sig.r().to_bytes());
        let s = B256::from_slice(&sig.s().to_bytes());

        let point = signing_key.verifying_key().to_encoded_point(false);
        let hash = keccak256(&point.as_bytes()[1..]);
        let address = Address::from_slice(&hash[12..]);
        (Signature::from_parts(r, s, recovery_id.is_y_odd()), address)
    }

    #[test]
    fn recovers_k256_signature() {
        let digest = keccak256(b"dirvote-recovery-test");
        let (sig, address) = k256_sign([3u8; 32], &digest);
        assert_eq!(recover_signer(&digest, &sig).unwrap(), address);
    }

    #[test]
    fn rejects_invalid_signature_components() {
        let digest = keccak256(b"invalid-signature-components");
        let invalid = Signature::from_parts(B256::repeat_byte(0xFF), B256::repeat_byte(0xFF), false);
        assert_eq!(recover_signer(&digest, &invalid), Err(CryptoError::Recovery));
    }

    #[test]
    fn zero_signature_rejected() {
        let digest = keccak256(b"zero");
        let zero = Signature::from_parts(B256::ZERO, B256::ZERO, false);
        assert!(recover_signer(&digest, &zero).is_err());
    }

    #[test]
    fn flipped_parity_recovers_different_address() {
        let digest = keccak256(b"forged-recovery-id");
        let (valid, address) = k256_sign([9u8; 32], &digest);
        let forged = Signature::from_parts(valid.r(), valid.s(), !valid.y_parity());

        match recover_signer(&digest, &forged) {
            Ok(recovered) => assert_ne!(recovered, address),
            Err(e) => assert_eq!(e, CryptoError::Recovery),
        }
    }

    #[test]
    fn different_digest_recovers_different_address() {
        let digest = keccak256(b"signed");
        let (sig, address) = k256_sign([11u8; 32], &digest);
        let other = keccak256(b"not signed");
        match recover_signer(&other, &sig) {
            Ok(recovered) => assert_ne!(recovered, address),
            Err(e) => assert_eq!(e, CryptoError::Recovery),
        }
    }
}
