//! Minimal ABI word encoding shared by the EIP-712 and packed encoders.

use alloy_primitives::{Address, U256};

/// `uint256` as a 32-byte big-endian word.
pub(crate) fn uint_word(value: U256) -> [u8; 32] {
    value.to_be_bytes::<32>()
}

/// `address` left-padded to a 32-byte word.
pub(crate) fn address_word(address: &Address) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[12..].copy_from_slice(address.as_slice());
    word
}

/// Even-length `0x` hex of the minimal big-endian value, the form wallets
/// receive for `uint256` message fields.
pub(crate) fn hex_quantity(value: U256) -> String {
    let full = value.to_be_bytes::<32>();
    let first = full.iter().position(|b| *b != 0).unwrap_or(full.len() - 1);
    format!("0x{}", hex::encode(&full[first..]))
}
