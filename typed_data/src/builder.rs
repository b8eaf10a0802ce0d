//! One entry point for building typed data of either kind.

use alloy_primitives::Address;
use dirvote_types::{FeatureProposalMessage, RoomKey, SntAmount, TimestampMs, VoteMessage};

use crate::domain::VotingDomain;
use crate::error::TypedDataError;
use crate::feature::FeatureProposalDigest;
use crate::payload::TypedPayload;
use crate::vote::TypedVote;

/// Builds typed data for a fixed voting domain.
///
/// Pure and deterministic: the same inputs always yield the same digest.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TypedDataBuilder {
    domain: VotingDomain,
}

impl TypedDataBuilder {
    pub fn new(domain: VotingDomain) -> Self {
        Self { domain }
    }

    pub fn domain(&self) -> &VotingDomain {
        &self.domain
    }

    /// Typed data for `(voter, roomIdAndType, amount)`.
    pub fn vote(&self, voter: Address, room_key: RoomKey, amount: SntAmount) -> TypedVote {
        TypedVote {
            domain: self.domain.clone(),
            room_id_and_type: room_key,
            snt_amount: amount,
            voter,
        }
    }

    /// Digest for `(voter, amount, communityKey, timestampMs)`.
    pub fn feature(
        &self,
        voter: Address,
        amount: SntAmount,
        community_public_key: &str,
        timestamp: TimestampMs,
    ) -> Result<FeatureProposalDigest, TypedDataError> {
        FeatureProposalDigest::new(voter, amount, community_public_key, timestamp)
    }

    /// Re-derive what the sender of `msg` must have signed.
    pub fn for_vote_message(&self, msg: &VoteMessage) -> TypedPayload {
        TypedPayload::Vote(self.vote(msg.signer, msg.room_key(), msg.amount))
    }

    /// Re-derive what the sender of `msg` must have signed. Uses the
    /// timestamp embedded in the payload, never the transport one.
    pub fn for_feature_message(
        &self,
        msg: &FeatureProposalMessage,
    ) -> Result<TypedPayload, TypedDataError> {
        self.feature(
            msg.voter,
            msg.amount,
            &msg.community_public_key,
            msg.proposal_timestamp,
        )
        .map(TypedPayload::Feature)
    }
}
