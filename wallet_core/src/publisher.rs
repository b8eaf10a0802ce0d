//! Building, signing and publishing outgoing messages.

use std::sync::Arc;

use dirvote_messages::{encode_feature, encode_vote, vote_topic, TransportMessage};
use dirvote_types::{
    Address, FeatureProposalMessage, RoomId, RoomKey, Signature, SntAmount, TimestampMs,
    VoteChoice, VoteMessage,
};
use dirvote_typed_data::{TypedDataBuilder, TypedPayload};
use tracing::{debug, info};

use crate::clock::{Clock, SystemClock};
use crate::error::WalletError;
use crate::signer::SigningAuthority;
use crate::transport::Transport;

/// What happened to a publish request.
///
/// `NotSigned` is not an error: nothing was sent because no usable signer
/// was present or the user declined. Callers must still tell the user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PublishOutcome {
    Published { content_topic: String },
    NotSigned,
}

#[derive(Clone)]
pub struct Publisher {
    typed_data: TypedDataBuilder,
    vote_topic_base: String,
    feature_topic: String,
    clock: Arc<dyn Clock>,
}

/// The signer if it is present and signs as `account`.
fn usable_signer<'a>(
    account: Option<Address>,
    signer: Option<&'a dyn SigningAuthority>,
) -> Option<(Address, &'a dyn SigningAuthority)> {
    let Some(account) = account else {
        debug!("no account selected");
        return None;
    };
    let Some(signer) = signer else {
        debug!(%account, "no signing authority");
        return None;
    };
    if signer.address() != account {
        debug!(%account, signer = %signer.address(), "signer does not match account");
        return None;
    }
    Some((account, signer))
}

async fn acquire_signature(
    signer: &dyn SigningAuthority,
    payload: &TypedPayload,
    existing: Option<Signature>,
) -> Result<Option<Signature>, WalletError> {
    if existing.is_some() {
        return Ok(existing);
    }
    let signature = signer.sign(payload).await?;
    if signature.is_none() {
        debug!(kind = %payload.kind(), "signature declined");
    }
    Ok(signature)
}

impl Publisher {
    pub fn new(
        typed_data: TypedDataBuilder,
        vote_topic_base: impl Into<String>,
        feature_topic: impl Into<String>,
    ) -> Self {
        Self {
            typed_data,
            vote_topic_base: vote_topic_base.into(),
            feature_topic: feature_topic.into(),
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn typed_data(&self) -> &TypedDataBuilder {
        &self.typed_data
    }

    pub fn vote_topic(&self, room: RoomId) -> String {
        vote_topic(&self.vote_topic_base, room)
    }

    pub fn feature_topic(&self) -> &str {
        &self.feature_topic
    }

    /// Build a signed vote envelope for `room`.
    ///
    /// `Ok(None)` when the account or signer is missing, the signer signs as
    /// a different address, or the user declines. `existing_signature` is
    /// reused as-is instead of asking the signer again.
    pub async fn build_vote_message(
        &self,
        account: Option<Address>,
        signer: Option<&dyn SigningAuthority>,
        room: RoomId,
        amount: SntAmount,
        choice: VoteChoice,
        existing_signature: Option<Signature>,
    ) -> Result<Option<TransportMessage>, WalletError> {
        let Some((account, signer)) = usable_signer(account, signer) else {
            return Ok(None);
        };

        let payload: TypedPayload = self
            .typed_data
            .vote(account, RoomKey::pack(room, choice), amount)
            .into();
        let Some(signature) = acquire_signature(signer, &payload, existing_signature).await? else {
            return Ok(None);
        };

        let msg = VoteMessage {
            signer: account,
            session_id: room,
            choice,
            amount,
            nonce: VoteMessage::CURRENT_NONCE,
            signature,
        };
        Ok(Some(
            TransportMessage::new(self.vote_topic(room), encode_vote(&msg))
                .with_timestamp(self.clock.now()),
        ))
    }

    /// Build a signed feature-proposal envelope. The signed timestamp and the
    /// envelope timestamp are the same instant.
    ///
    /// A fresh request captures the instant from the clock once. An
    /// `existing_signature` carries the instant it was made over, and that
    /// instant is reused so the envelope still verifies.
    pub async fn build_feature_message(
        &self,
        account: Option<Address>,
        signer: Option<&dyn SigningAuthority>,
        amount: SntAmount,
        community_public_key: &str,
        existing_signature: Option<(Signature, TimestampMs)>,
    ) -> Result<Option<TransportMessage>, WalletError> {
        let Some((account, signer)) = usable_signer(account, signer) else {
            return Ok(None);
        };

        let (existing, timestamp) = match existing_signature {
            Some((signature, signed_at)) => (Some(signature), signed_at),
            None => (None, self.clock.now()),
        };
        let payload: TypedPayload = self
            .typed_data
            .feature(account, amount, community_public_key, timestamp)?
            .into();
        let Some(signature) = acquire_signature(signer, &payload, existing).await? else {
            return Ok(None);
        };

        let msg = FeatureProposalMessage {
            voter: account,
            amount,
            community_public_key: community_public_key.to_string(),
            proposal_timestamp: timestamp,
            transport_timestamp: timestamp,
            signature,
        };
        Ok(Some(
            TransportMessage::new(self.feature_topic.clone(), encode_feature(&msg))
                .with_timestamp(timestamp),
        ))
    }

    async fn publish(
        transport: &dyn Transport,
        message: Option<TransportMessage>,
    ) -> Result<PublishOutcome, WalletError> {
        let Some(message) = message else {
            return Ok(PublishOutcome::NotSigned);
        };
        transport.publish(&message).await?;
        info!(topic = %message.content_topic, "published message");
        Ok(PublishOutcome::Published {
            content_topic: message.content_topic,
        })
    }

    /// Sign and publish a vote. A transport failure is an error, never a
    /// silent `NotSigned`.
    pub async fn publish_vote(
        &self,
        transport: &dyn Transport,
        account: Option<Address>,
        signer: Option<&dyn SigningAuthority>,
        room: RoomId,
        amount: SntAmount,
        choice: VoteChoice,
    ) -> Result<PublishOutcome, WalletError> {
        let message = self
            .build_vote_message(account, signer, room, amount, choice, None)
            .await?;
        Self::publish(transport, message).await
    }

    pub async fn publish_feature(
        &self,
        transport: &dyn Transport,
        account: Option<Address>,
        signer: Option<&dyn SigningAuthority>,
        amount: SntAmount,
        community_public_key: &str,
    ) -> Result<PublishOutcome, WalletError> {
        let message = self
            .build_feature_message(account, signer, amount, community_public_key, None)
            .await?;
        Self::publish(transport, message).await
    }
}
