//! Ethereum address helpers.
//!
//! Addresses travel on the wire as EIP-55 checksummed hex strings but are
//! compared as raw 20-byte values, so casing never affects equality.

use alloy_primitives::Address;
use std::str::FromStr;

use crate::error::TypesError;

/// Parse a `0x`-prefixed (or bare) hex address, ignoring letter case.
pub fn parse_address(raw: &str) -> Result<Address, TypesError> {
    Address::from_str(raw.trim()).map_err(|_| TypesError::InvalidAddress(raw.to_string()))
}

/// Render an address in EIP-55 mixed-case checksum form.
pub fn to_checksum(address: &Address) -> String {
    address.to_checksum(None)
}
