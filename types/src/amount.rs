//! SNT amount type.
//!
//! Amounts are 256-bit unsigned integers. On the wire they travel as the
//! minimal big-endian byte string of the value; zero is a single `0x00`
//! byte so that an encoded amount is never empty.

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TypesError;

/// An SNT amount in raw token units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SntAmount(U256);

impl SntAmount {
    pub const ZERO: Self = Self(U256::ZERO);

    /// Largest encoded width in bytes.
    pub const MAX_BYTES: usize = 32;

    pub fn new(raw: U256) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> U256 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    pub fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    /// Minimal big-endian representation, at least one byte long.
    pub fn to_minimal_be_bytes(&self) -> Vec<u8> {
        let full = self.0.to_be_bytes::<32>();
        let first = full.iter().position(|b| *b != 0).unwrap_or(full.len() - 1);
        full[first..].to_vec()
    }

    /// Rebuild an amount from big-endian bytes.
    ///
    /// Leading zero bytes are tolerated; empty input and input wider than
    /// 256 bits are rejected.
    pub fn from_be_slice(bytes: &[u8]) -> Result<Self, TypesError> {
        if bytes.is_empty() {
            return Err(TypesError::InvalidAmount("empty amount bytes".into()));
        }
        if bytes.len() > Self::MAX_BYTES {
            return Err(TypesError::InvalidAmount(format!(
                "{} bytes exceeds 256 bits",
                bytes.len()
            )));
        }
        Ok(Self(U256::from_be_slice(bytes)))
    }
}

impl From<u64> for SntAmount {
    fn from(raw: u64) -> Self {
        Self(U256::from(raw))
    }
}

impl From<U256> for SntAmount {
    fn from(raw: U256) -> Self {
        Self(raw)
    }
}

/// Decimal raw units, or `0x`-prefixed hex.
impl FromStr for SntAmount {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<U256>()
            .map(Self)
            .map_err(|e| TypesError::InvalidAmount(format!("{s:?}: {e}")))
    }
}

impl fmt::Display for SntAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} SNT", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_encodes_as_single_byte() {
        assert_eq!(SntAmount::ZERO.to_minimal_be_bytes(), vec![0u8]);
    }

    #[test]
    fn minimal_encoding_strips_leading_zeros() {
        assert_eq!(SntAmount::from(1000).to_minimal_be_bytes(), vec![0x03, 0xE8]);
        assert_eq!(SntAmount::from(255).to_minimal_be_bytes(), vec![0xFF]);
        assert_eq!(SntAmount::from(256).to_minimal_be_bytes(), vec![0x01, 0x00]);
    }

    #[test]
    fn max_value_uses_full_width() {
        let max = SntAmount::new(U256::MAX);
        assert_eq!(max.to_minimal_be_bytes(), vec![0xFF; 32]);
        assert_eq!(SntAmount::from_be_slice(&[0xFF; 32]).unwrap(), max);
    }

    #[test]
    fn leading_zeros_tolerated_on_decode() {
        assert_eq!(
            SntAmount::from_be_slice(&[0, 0, 0x03, 0xE8]).unwrap(),
            SntAmount::from(1000)
        );
    }

    #[test]
    fn empty_and_oversized_rejected() {
        assert!(SntAmount::from_be_slice(&[]).is_err());
        assert!(SntAmount::from_be_slice(&[1u8; 33]).is_err());
    }

    #[test]
    fn parses_decimal_and_hex() {
        assert_eq!("1000".parse::<SntAmount>().unwrap(), SntAmount::from(1000));
        assert_eq!("0x3e8".parse::<SntAmount>().unwrap(), SntAmount::from(1000));
        assert!("-1".parse::<SntAmount>().is_err());
        assert!("ten".parse::<SntAmount>().is_err());
    }

    #[test]
    fn checked_add_overflow() {
        let max = SntAmount::new(U256::MAX);
        assert!(max.checked_add(SntAmount::from(1)).is_none());
        assert_eq!(max.saturating_add(SntAmount::from(1)), max);
    }
}
