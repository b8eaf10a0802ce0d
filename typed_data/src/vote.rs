//! EIP-712 `Vote` struct.

use alloy_primitives::{Address, B256};
use dirvote_crypto::{keccak256, keccak256_multi};
use dirvote_types::{RoomKey, SntAmount};
use serde_json::{json, Value};

use crate::abi::{address_word, hex_quantity, uint_word};
use crate::domain::VotingDomain;

/// Canonical type string of the primary type. Field order is part of the
/// signed digest.
pub const VOTE_TYPE: &str = "Vote(uint256 roomIdAndType,uint256 sntAmount,address voter)";

/// The typed-data object a voter signs for one vote.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypedVote {
    pub domain: VotingDomain,
    pub room_id_and_type: RoomKey,
    pub snt_amount: SntAmount,
    pub voter: Address,
}

impl TypedVote {
    /// `hashStruct(Vote)`.
    pub fn struct_hash(&self) -> B256 {
        let type_hash = keccak256(VOTE_TYPE.as_bytes());
        keccak256_multi(&[
            type_hash.as_slice(),
            &uint_word(self.room_id_and_type.raw()),
            &uint_word(self.snt_amount.raw()),
            &address_word(&self.voter),
        ])
    }

    /// `keccak256(0x1901 ‖ domainSeparator ‖ hashStruct(Vote))`.
    pub fn signing_hash(&self) -> B256 {
        keccak256_multi(&[
            &[0x19, 0x01],
            self.domain.separator().as_slice(),
            self.struct_hash().as_slice(),
        ])
    }

    /// The JSON document handed to `eth_signTypedData_v3`.
    pub fn to_wallet_json(&self) -> Value {
        json!({
            "types": {
                "EIP712Domain": VotingDomain::type_fields(),
                "Vote": [
                    { "name": "roomIdAndType", "type": "uint256" },
                    { "name": "sntAmount", "type": "uint256" },
                    { "name": "voter", "type": "address" },
                ],
            },
            "primaryType": "Vote",
            "domain": self.domain.to_json(),
            "message": {
                "voter": self.voter.to_checksum(None),
                "roomIdAndType": hex_quantity(self.room_id_and_type.raw()),
                "sntAmount": hex_quantity(self.snt_amount.raw()),
            },
        })
    }
}
