//! Keccak-256 hashing and the EIP-191 personal-message prefix.

use alloy_primitives::B256;

/// Prefix wallets prepend before signing a 32-byte message with `personal_sign`.
const PERSONAL_MESSAGE_PREFIX: &[u8] = b"\x19Ethereum Signed Message:\n32";

/// Compute the Keccak-256 hash of arbitrary data.
pub fn keccak256(data: &[u8]) -> B256 {
    alloy_primitives::keccak256(data)
}

/// Hash multiple byte slices in sequence (avoids concatenation allocation).
pub fn keccak256_multi(parts: &[&[u8]]) -> B256 {
    let mut hasher = alloy_primitives::Keccak256::new();
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize()
}

/// Digest a wallet actually signs for `personal_sign(message)` when the
/// message is a 32-byte hash.
pub fn eth_message_hash(message: &B256) -> B256 {
    keccak256_multi(&[PERSONAL_MESSAGE_PREFIX, message.as_slice()])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keccak_empty_matches_known_vector() {
        assert_eq!(
            hex::encode(keccak256(b"")),
            "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
    }

    #[test]
    fn keccak_multi_equivalent() {
        let single = keccak256(b"helloworld");
        let multi = keccak256_multi(&[b"hello", b"world"]);
        assert_eq!(single, multi);
    }

    #[test]
    fn personal_hash_differs_from_raw() {
        let inner = keccak256(b"feature");
        assert_ne!(eth_message_hash(&inner), inner);
        assert_eq!(eth_message_hash(&inner), eth_message_hash(&inner));
    }
}
