//! Subcommand implementations. Report builders are pure so they can be
//! tested without a network.

use std::collections::HashSet;

use anyhow::{bail, Context};
use dirvote_messages::{try_decode_feature, try_decode_vote};
use dirvote_types::{
    Address, FeatureProposalMessage, RoomId, SntAmount, TimestampMs, VerifiedVote, VoteChoice,
    VoteMessage,
};
use dirvote_typed_data::{MessageKind, TypedDataBuilder};
use dirvote_utils::format_age;
use dirvote_verification::{encode_cast_votes, filter_verified, tally, PendingTally, Verifier};
use dirvote_wallet_core::{
    receive_features, receive_votes, JsonRpcSigner, LocalKeySigner, PublishOutcome, Publisher,
    SigningAuthority, Transport,
};
use serde::Serialize;
use tracing::info;

use crate::config::ClientConfig;

/// Everything needed to submit one room's pending votes on chain.
#[derive(Debug, Serialize)]
pub struct BatchReport {
    pub room: RoomId,
    pub received: usize,
    pub votes: Vec<VerifiedVote>,
    pub tally: PendingTally,
    pub calldata: String,
}

pub fn build_batch_report(
    room: RoomId,
    messages: &[VoteMessage],
    already_voted: &HashSet<Address>,
    verifier: &Verifier,
) -> BatchReport {
    // Dedup is per signer, so a vote replayed from another room must not
    // reach the fold and take the signer's slot.
    let in_room: Vec<VoteMessage> = messages
        .iter()
        .filter(|m| m.session_id == room)
        .cloned()
        .collect();
    let votes: Vec<VerifiedVote> = filter_verified(&in_room, already_voted, verifier);
    let tally = tally(&votes).remove(&room).unwrap_or_default();
    let calldata = format!("0x{}", hex::encode(encode_cast_votes(&votes)));
    BatchReport {
        room,
        received: messages.len(),
        votes,
        tally,
        calldata,
    }
}

#[derive(Debug, Serialize)]
pub struct FeatureRow {
    pub voter: Address,
    pub amount: SntAmount,
    pub community_public_key: String,
    pub proposed_at: TimestampMs,
    pub age: String,
}

pub fn feature_rows(proposals: &[FeatureProposalMessage], now: TimestampMs) -> Vec<FeatureRow> {
    proposals
        .iter()
        .map(|p| FeatureRow {
            voter: p.voter,
            amount: p.amount,
            community_public_key: p.community_public_key.clone(),
            proposed_at: p.proposal_timestamp,
            age: format_age(now, p.proposal_timestamp),
        })
        .collect()
}

/// Outcome of decoding and checking one raw payload.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DecodeReport {
    Vote {
        message: VoteMessage,
        verified: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        reason: Option<String>,
    },
    Feature {
        message: FeatureProposalMessage,
        verified: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        reason: Option<String>,
    },
    Undecodable {
        reason: String,
    },
}

pub fn decode_report(
    kind: MessageKind,
    payload: &[u8],
    transport_timestamp: Option<TimestampMs>,
    verifier: &Verifier,
) -> DecodeReport {
    match kind {
        MessageKind::Vote => match try_decode_vote(payload) {
            Ok(message) => {
                let reason = verifier.check_vote(&message).err().map(|e| e.to_string());
                DecodeReport::Vote {
                    verified: reason.is_none(),
                    reason,
                    message,
                }
            }
            Err(e) => DecodeReport::Undecodable {
                reason: e.to_string(),
            },
        },
        MessageKind::Feature => match try_decode_feature(payload, transport_timestamp) {
            Ok(message) => {
                let reason = verifier.check_feature(&message).err().map(|e| e.to_string());
                DecodeReport::Feature {
                    verified: reason.is_none(),
                    reason,
                    message,
                }
            }
            Err(e) => DecodeReport::Undecodable {
                reason: e.to_string(),
            },
        },
    }
}

/// A local key wins over a wallet endpoint. `None` when neither is given.
pub async fn resolve_signer(
    private_key: Option<&str>,
    rpc_url: Option<&str>,
) -> anyhow::Result<Option<Box<dyn SigningAuthority>>> {
    if let Some(key) = private_key {
        let signer = LocalKeySigner::from_hex(key).context("invalid private key")?;
        return Ok(Some(Box::new(signer)));
    }
    if let Some(url) = rpc_url {
        let signer = JsonRpcSigner::connect(url)
            .await
            .with_context(|| format!("cannot reach wallet at {url}"))?;
        info!(account = %signer.address(), url, "using wallet over JSON-RPC");
        return Ok(Some(Box::new(signer)));
    }
    Ok(None)
}

pub fn publisher(config: &ClientConfig) -> Publisher {
    Publisher::new(
        TypedDataBuilder::new(config.voting_domain()),
        config.vote_topic_base.clone(),
        config.feature_topic.clone(),
    )
}

fn published_topic(outcome: PublishOutcome) -> anyhow::Result<String> {
    match outcome {
        PublishOutcome::Published { content_topic } => Ok(content_topic),
        PublishOutcome::NotSigned => {
            bail!("nothing was published: no matching signer, or the signature was declined")
        }
    }
}

#[allow(clippy::too_many_arguments)]
pub async fn vote(
    config: &ClientConfig,
    transport: &dyn Transport,
    signer: Option<&dyn SigningAuthority>,
    account: Option<Address>,
    room: RoomId,
    choice: VoteChoice,
    amount: SntAmount,
) -> anyhow::Result<String> {
    let account = account.or_else(|| signer.map(|s| s.address()));
    let outcome = publisher(config)
        .publish_vote(transport, account, signer, room, amount, choice)
        .await?;
    published_topic(outcome)
}

pub async fn propose(
    config: &ClientConfig,
    transport: &dyn Transport,
    signer: Option<&dyn SigningAuthority>,
    account: Option<Address>,
    amount: SntAmount,
    community_public_key: &str,
) -> anyhow::Result<String> {
    let account = account.or_else(|| signer.map(|s| s.address()));
    let outcome = publisher(config)
        .publish_feature(transport, account, signer, amount, community_public_key)
        .await?;
    published_topic(outcome)
}

pub async fn batch(
    config: &ClientConfig,
    transport: &dyn Transport,
    room: RoomId,
    already_voted: &HashSet<Address>,
) -> BatchReport {
    let messages = receive_votes(transport, &config.vote_topic_base, room).await;
    let verifier = Verifier::new(config.voting_domain());
    build_batch_report(room, &messages, already_voted, &verifier)
}

pub async fn features(config: &ClientConfig, transport: &dyn Transport) -> Vec<FeatureRow> {
    let verifier = Verifier::new(config.voting_domain());
    let proposals = receive_features(transport, &config.feature_topic, &verifier).await;
    feature_rows(&proposals, TimestampMs::now())
}
