//! Recoverable secp256k1 signature value type.
//!
//! Wallets hand back signatures as 65 bytes `r ‖ s ‖ v`. The on-chain batch
//! call wants the EIP-2098 compact form `r ‖ vs`, where the top bit of `vs`
//! carries the y-parity. Everything above this module goes through the
//! accessors below and never slices raw offsets.

use alloy_primitives::B256;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::TypesError;

/// Length of the `r ‖ s ‖ v` encoding.
pub const SIGNATURE_LEN: usize = 65;
/// Length of the EIP-2098 `r ‖ vs` encoding.
pub const COMPACT_SIGNATURE_LEN: usize = 64;

/// An ECDSA signature with its recovery parity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Signature {
    r: B256,
    s: B256,
    y_parity: bool,
}

impl Signature {
    pub fn from_parts(r: B256, s: B256, y_parity: bool) -> Self {
        Self { r, s, y_parity }
    }

    /// Rebuild a signature from its compact `(r, vs)` pair.
    pub fn from_compact(r: B256, vs: B256) -> Self {
        let mut s = vs;
        let y_parity = s[0] & 0x80 != 0;
        s[0] &= 0x7F;
        Self { r, s, y_parity }
    }

    /// Parse either the 65-byte `r ‖ s ‖ v` form or the 64-byte compact form.
    ///
    /// `v` may be given as a raw parity (0/1) or in the legacy 27/28 form.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, TypesError> {
        match bytes.len() {
            SIGNATURE_LEN => {
                let y_parity = match bytes[64] {
                    0 | 27 => false,
                    1 | 28 => true,
                    other => return Err(TypesError::SignatureRecoveryByte(other)),
                };
                Ok(Self {
                    r: B256::from_slice(&bytes[..32]),
                    s: B256::from_slice(&bytes[32..64]),
                    y_parity,
                })
            }
            COMPACT_SIGNATURE_LEN => Ok(Self::from_compact(
                B256::from_slice(&bytes[..32]),
                B256::from_slice(&bytes[32..]),
            )),
            other => Err(TypesError::SignatureLength(other)),
        }
    }

    pub fn r(&self) -> B256 {
        self.r
    }

    pub fn s(&self) -> B256 {
        self.s
    }

    pub fn y_parity(&self) -> bool {
        self.y_parity
    }

    /// Recovery id in the 0/1 form expected by secp256k1 recovery.
    pub fn recovery_id(&self) -> u8 {
        u8::from(self.y_parity)
    }

    /// Legacy `v` value (27 or 28).
    pub fn v(&self) -> u8 {
        27 + self.recovery_id()
    }

    /// `s` with the y-parity folded into its top bit (EIP-2098).
    pub fn vs(&self) -> B256 {
        let mut vs = self.s;
        if self.y_parity {
            vs[0] |= 0x80;
        }
        vs
    }

    /// Canonical 65-byte encoding with `v` in 27/28 form.
    pub fn to_bytes(&self) -> [u8; SIGNATURE_LEN] {
        let mut out = [0u8; SIGNATURE_LEN];
        out[..32].copy_from_slice(self.r.as_slice());
        out[32..64].copy_from_slice(self.s.as_slice());
        out[64] = self.v();
        out
    }

    /// 64-byte `r ‖ vs` encoding.
    pub fn to_compact_bytes(&self) -> [u8; COMPACT_SIGNATURE_LEN] {
        let mut out = [0u8; COMPACT_SIGNATURE_LEN];
        out[..32].copy_from_slice(self.r.as_slice());
        out[32..].copy_from_slice(self.vs().as_slice());
        out
    }
}

impl FromStr for Signature {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let hex_part = trimmed.strip_prefix("0x").unwrap_or(trimmed);
        let bytes = hex::decode(hex_part).map_err(|e| TypesError::InvalidHex(e.to_string()))?;
        Self::from_slice(&bytes)
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.to_bytes()))
    }
}

impl Serialize for Signature {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Signature {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(v: u8) -> [u8; 65] {
        let mut bytes = [0u8; 65];
        bytes[..32].copy_from_slice(&[0x11; 32]);
        bytes[32..64].copy_from_slice(&[0x22; 32]);
        bytes[64] = v;
        bytes
    }

    #[test]
    fn accepts_both_v_conventions() {
        let legacy = Signature::from_slice(&sample(28)).unwrap();
        let raw = Signature::from_slice(&sample(1)).unwrap();
        assert_eq!(legacy, raw);
        assert!(legacy.y_parity());
        assert_eq!(legacy.v(), 28);
        assert_eq!(legacy.recovery_id(), 1);
    }

    #[test]
    fn rejects_bad_v_and_length() {
        assert_eq!(
            Signature::from_slice(&sample(5)),
            Err(TypesError::SignatureRecoveryByte(5))
        );
        assert_eq!(
            Signature::from_slice(&[0u8; 10]),
            Err(TypesError::SignatureLength(10))
        );
    }

    #[test]
    fn vs_folds_parity_into_top_bit() {
        let even = Signature::from_slice(&sample(27)).unwrap();
        let odd = Signature::from_slice(&sample(28)).unwrap();
        assert_eq!(even.vs()[0], 0x22);
        assert_eq!(odd.vs()[0], 0xA2);
        assert_eq!(odd.vs()[1..], odd.s()[1..]);
    }

    #[test]
    fn compact_roundtrip_preserves_parity() {
        for v in [27u8, 28] {
            let sig = Signature::from_slice(&sample(v)).unwrap();
            let back = Signature::from_compact(sig.r(), sig.vs());
            assert_eq!(back, sig);
            assert_eq!(Signature::from_slice(&sig.to_compact_bytes()).unwrap(), sig);
        }
    }

    #[test]
    fn hex_and_serde_roundtrip() {
        let sig = Signature::from_slice(&sample(0)).unwrap();
        let text = sig.to_string();
        assert!(text.starts_with("0x"));
        assert_eq!(text.len(), 2 + 130);
        assert_eq!(text.parse::<Signature>().unwrap(), sig);

        let json = serde_json::to_string(&sig).unwrap();
        let decoded: Signature = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, sig);
    }

    #[test]
    fn canonical_bytes_use_legacy_v() {
        let sig = Signature::from_slice(&sample(0)).unwrap();
        assert_eq!(sig.to_bytes()[64], 27);
    }
}
