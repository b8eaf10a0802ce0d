//! EIP-712 domain of the voting contract.

use alloy_primitives::{Address, B256, U256};
use dirvote_crypto::{keccak256, keccak256_multi};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::abi::{address_word, uint_word};

/// Canonical type string of the domain struct.
pub const EIP712_DOMAIN_TYPE: &str =
    "EIP712Domain(string name,string version,uint256 chainId,address verifyingContract)";

/// The signing domain every vote is bound to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VotingDomain {
    pub name: String,
    pub version: String,
    pub chain_id: u64,
    pub verifying_contract: Address,
}

impl VotingDomain {
    pub const DEFAULT_NAME: &'static str = "Voting Contract";
    pub const DEFAULT_VERSION: &'static str = "1";

    pub fn new(chain_id: u64, verifying_contract: Address) -> Self {
        Self {
            name: Self::DEFAULT_NAME.to_string(),
            version: Self::DEFAULT_VERSION.to_string(),
            chain_id,
            verifying_contract,
        }
    }

    /// `hashStruct(EIP712Domain)`.
    pub fn separator(&self) -> B256 {
        let type_hash = keccak256(EIP712_DOMAIN_TYPE.as_bytes());
        keccak256_multi(&[
            type_hash.as_slice(),
            keccak256(self.name.as_bytes()).as_slice(),
            keccak256(self.version.as_bytes()).as_slice(),
            &uint_word(U256::from(self.chain_id)),
            &address_word(&self.verifying_contract),
        ])
    }

    /// Field list for the `types.EIP712Domain` entry of the wallet request.
    pub(crate) fn type_fields() -> Value {
        json!([
            { "name": "name", "type": "string" },
            { "name": "version", "type": "string" },
            { "name": "chainId", "type": "uint256" },
            { "name": "verifyingContract", "type": "address" },
        ])
    }

    /// The `domain` object of the wallet request.
    pub(crate) fn to_json(&self) -> Value {
        json!({
            "name": self.name,
            "version": self.version,
            "chainId": self.chain_id,
            "verifyingContract": self.verifying_contract.to_checksum(None),
        })
    }
}

impl Default for VotingDomain {
    fn default() -> Self {
        Self::new(1, Address::ZERO)
    }
}
