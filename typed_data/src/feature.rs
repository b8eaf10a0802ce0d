//! Feature-proposal digest.
//!
//! Signed with `personal_sign` rather than typed data: the wallet signs the
//! 32-byte Keccak-256 of the Solidity-packed tuple
//! `(address voter, uint256 amount, bytes communityKey, uint256 timestampMs)`.

use alloy_primitives::{Address, B256, U256};
use dirvote_crypto::{eth_message_hash, keccak256};
use dirvote_types::{SntAmount, TimestampMs};

use crate::abi::uint_word;
use crate::error::TypedDataError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeatureProposalDigest {
    pub voter: Address,
    pub amount: SntAmount,
    community_key: Vec<u8>,
    pub timestamp: TimestampMs,
}

impl FeatureProposalDigest {
    pub fn new(
        voter: Address,
        amount: SntAmount,
        community_public_key: &str,
        timestamp: TimestampMs,
    ) -> Result<Self, TypedDataError> {
        let trimmed = community_public_key.trim();
        let hex_part = trimmed.strip_prefix("0x").unwrap_or(trimmed);
        let community_key = hex::decode(hex_part)
            .map_err(|_| TypedDataError::InvalidPublicKey(community_public_key.to_string()))?;
        if community_key.is_empty() {
            return Err(TypedDataError::InvalidPublicKey(community_public_key.to_string()));
        }
        Ok(Self {
            voter,
            amount,
            community_key,
            timestamp,
        })
    }

    pub fn community_key(&self) -> &[u8] {
        &self.community_key
    }

    /// Solidity `abi.encodePacked` of the tuple.
    pub fn packed(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(20 + 32 + self.community_key.len() + 32);
        out.extend_from_slice(self.voter.as_slice());
        out.extend_from_slice(&uint_word(self.amount.raw()));
        out.extend_from_slice(&self.community_key);
        out.extend_from_slice(&uint_word(U256::from(self.timestamp.as_millis())));
        out
    }

    /// The 32-byte message handed to `personal_sign`.
    pub fn message_hash(&self) -> B256 {
        keccak256(&self.packed())
    }

    /// The digest the wallet actually signs (EIP-191 prefixed).
    pub fn signing_hash(&self) -> B256 {
        eth_message_hash(&self.message_hash())
    }
}
