//! Message-kind dispatch over the two typed-data variants.

use alloy_primitives::B256;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::feature::FeatureProposalDigest;
use crate::vote::TypedVote;

/// The two message kinds carried over the transport.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Vote,
    Feature,
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vote => f.write_str("vote"),
            Self::Feature => f.write_str("feature"),
        }
    }
}

/// A signable structure of either kind.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypedPayload {
    Vote(TypedVote),
    Feature(FeatureProposalDigest),
}

impl TypedPayload {
    pub fn kind(&self) -> MessageKind {
        match self {
            Self::Vote(_) => MessageKind::Vote,
            Self::Feature(_) => MessageKind::Feature,
        }
    }

    /// The digest the signature is produced over and recovered against.
    pub fn signing_hash(&self) -> B256 {
        match self {
            Self::Vote(vote) => vote.signing_hash(),
            Self::Feature(feature) => feature.signing_hash(),
        }
    }

    /// Wallet JSON-RPC method used to request a signature for this payload.
    pub fn signing_method(&self) -> &'static str {
        match self {
            Self::Vote(_) => "eth_signTypedData_v3",
            Self::Feature(_) => "personal_sign",
        }
    }
}

impl From<TypedVote> for TypedPayload {
    fn from(vote: TypedVote) -> Self {
        Self::Vote(vote)
    }
}

impl From<FeatureProposalDigest> for TypedPayload {
    fn from(feature: FeatureProposalDigest) -> Self {
        Self::Feature(feature)
    }
}
