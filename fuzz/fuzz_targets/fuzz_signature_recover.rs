#![no_main]

use dirvote_crypto::recover_signer;
use dirvote_types::{Signature, B256};
use libfuzzer_sys::fuzz_target;

// Any 32-byte digest followed by 64 or 65 signature bytes: parsing and
// recovery may fail but must not panic.
fuzz_target!(|data: &[u8]| {
    if data.len() < 32 + 64 {
        return;
    }
    let digest = B256::from_slice(&data[..32]);
    let sig_bytes = &data[32..data.len().min(32 + 65)];
    if let Ok(signature) = Signature::from_slice(sig_bytes) {
        let _ = recover_signer(&digest, &signature);
        assert_eq!(Signature::from_slice(&signature.to_bytes()), Ok(signature));
    }
});
