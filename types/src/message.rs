//! Messages as they travel over the transport, and the verified batch row.
//!
//! Messages are created once by a publisher and never mutated. A
//! [`VerifiedVote`] is derived from a [`VoteMessage`] on every aggregation
//! pass and is never stored on its own.

use alloy_primitives::{Address, B256};
use serde::{Deserialize, Serialize};

use crate::amount::SntAmount;
use crate::room::{RoomId, RoomKey, VoteChoice};
use crate::signature::Signature;
use crate::time::TimestampMs;

/// A signed vote as received from the transport, not yet verified.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteMessage {
    pub signer: Address,
    pub session_id: RoomId,
    pub choice: VoteChoice,
    pub amount: SntAmount,
    /// Always [`VoteMessage::CURRENT_NONCE`]; carried but never checked.
    pub nonce: u64,
    pub signature: Signature,
}

impl VoteMessage {
    pub const CURRENT_NONCE: u64 = 1;

    /// The packed `room * 2 + choice` parameter this vote was signed over.
    pub fn room_key(&self) -> RoomKey {
        RoomKey::pack(self.session_id, self.choice)
    }
}

/// A signed feature proposal as received from the transport.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureProposalMessage {
    pub voter: Address,
    pub amount: SntAmount,
    pub community_public_key: String,
    /// Timestamp embedded in the signed payload.
    pub proposal_timestamp: TimestampMs,
    /// Timestamp stamped on the transport envelope. Must equal
    /// `proposal_timestamp` for the message to be accepted.
    pub transport_timestamp: TimestampMs,
    pub signature: Signature,
}

/// One row of the on-chain batch submission:
/// `(voter, roomIdAndType, sntAmount, r, vs)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifiedVote {
    pub voter: Address,
    pub room_id_and_type: RoomKey,
    pub snt_amount: SntAmount,
    pub r: B256,
    pub vs: B256,
}

impl VerifiedVote {
    /// Project a vote message into its batch row. Callers are expected to
    /// have verified the message first.
    pub fn from_message(msg: &VoteMessage) -> Self {
        Self {
            voter: msg.signer,
            room_id_and_type: msg.room_key(),
            snt_amount: msg.amount,
            r: msg.signature.r(),
            vs: msg.signature.vs(),
        }
    }

    /// The signature this row was built from.
    pub fn signature(&self) -> Signature {
        Signature::from_compact(self.r, self.vs)
    }
}
