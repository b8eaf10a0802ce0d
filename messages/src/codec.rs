//! Encode/decode between message structs and wire bytes.

use dirvote_types::{
    parse_address, to_checksum, FeatureProposalMessage, RoomId, Signature, SntAmount,
    TimestampMs, VoteChoice, VoteMessage,
};
use prost::Message;

use crate::envelope::TransportMessage;
use crate::error::DecodeError;
use crate::proto::{WakuFeature, WakuVote};

/// Encode a vote for the transport.
pub fn encode_vote(msg: &VoteMessage) -> Vec<u8> {
    WakuVote {
        address: Some(to_checksum(&msg.signer)),
        vote: Some(msg.choice.as_wire_str().to_string()),
        snt_amount: Some(msg.amount.to_minimal_be_bytes()),
        sign: Some(msg.signature.to_bytes().to_vec()),
        nonce: Some(msg.nonce),
        session_id: Some(msg.session_id.get()),
    }
    .encode_to_vec()
}

/// Encode a feature proposal. The transport timestamp is not part of the
/// payload; publishers stamp it on the envelope.
pub fn encode_feature(msg: &FeatureProposalMessage) -> Vec<u8> {
    WakuFeature {
        voter: Some(to_checksum(&msg.voter)),
        snt_amount: Some(msg.amount.to_minimal_be_bytes()),
        public_key: Some(msg.community_public_key.clone()),
        timestamp: Some(msg.proposal_timestamp.as_millis()),
        sign: Some(msg.signature.to_bytes().to_vec()),
    }
    .encode_to_vec()
}

fn required<T>(value: Option<T>, field: &'static str) -> Result<T, DecodeError> {
    value.ok_or(DecodeError::MissingField(field))
}

fn decode_amount(bytes: Vec<u8>) -> Result<SntAmount, DecodeError> {
    SntAmount::from_be_slice(&bytes).map_err(|e| DecodeError::invalid("sntAmount", e))
}

fn decode_signature(bytes: Vec<u8>) -> Result<Signature, DecodeError> {
    Signature::from_slice(&bytes).map_err(|e| DecodeError::invalid("sign", e))
}

/// Decode a vote payload, reporting why it was rejected.
pub fn try_decode_vote(payload: &[u8]) -> Result<VoteMessage, DecodeError> {
    if payload.is_empty() {
        return Err(DecodeError::EmptyPayload);
    }
    let raw = WakuVote::decode(payload)?;

    let address = required(raw.address, "address")?;
    let vote = required(raw.vote, "vote")?;
    let snt_amount = required(raw.snt_amount, "sntAmount")?;
    let sign = required(raw.sign, "sign")?;
    let nonce = required(raw.nonce, "nonce")?;
    let session_id = required(raw.session_id, "sessionID")?;

    Ok(VoteMessage {
        signer: parse_address(&address).map_err(|e| DecodeError::invalid("address", e))?,
        session_id: RoomId::new(session_id),
        choice: VoteChoice::from_wire_str(&vote)
            .ok_or_else(|| DecodeError::invalid("vote", format!("unknown choice {vote:?}")))?,
        amount: decode_amount(snt_amount)?,
        nonce,
        signature: decode_signature(sign)?,
    })
}

/// Decode a feature payload, reporting why it was rejected.
///
/// `transport_timestamp` is the envelope timestamp; an envelope without one
/// is treated as stamped at the epoch, which never matches a real proposal.
pub fn try_decode_feature(
    payload: &[u8],
    transport_timestamp: Option<TimestampMs>,
) -> Result<FeatureProposalMessage, DecodeError> {
    if payload.is_empty() {
        return Err(DecodeError::EmptyPayload);
    }
    let raw = WakuFeature::decode(payload)?;

    let voter = required(raw.voter, "voter")?;
    let snt_amount = required(raw.snt_amount, "sntAmount")?;
    let public_key = required(raw.public_key, "publicKey")?;
    let timestamp = required(raw.timestamp, "timestamp")?;
    let sign = required(raw.sign, "sign")?;

    if public_key.is_empty() {
        return Err(DecodeError::invalid("publicKey", "empty"));
    }

    Ok(FeatureProposalMessage {
        voter: parse_address(&voter).map_err(|e| DecodeError::invalid("voter", e))?,
        amount: decode_amount(snt_amount)?,
        community_public_key: public_key,
        proposal_timestamp: TimestampMs::new(timestamp),
        transport_timestamp: transport_timestamp.unwrap_or(TimestampMs::EPOCH),
        signature: decode_signature(sign)?,
    })
}

/// Decode a vote payload; `None` for anything malformed or incomplete.
pub fn decode_vote(payload: &[u8]) -> Option<VoteMessage> {
    try_decode_vote(payload)
        .map_err(|e| tracing::trace!(error = %e, "dropping undecodable vote payload"))
        .ok()
}

/// Decode a feature envelope; `None` for anything malformed or incomplete.
pub fn decode_feature(envelope: &TransportMessage) -> Option<FeatureProposalMessage> {
    try_decode_feature(&envelope.payload, envelope.timestamp)
        .map_err(|e| tracing::trace!(error = %e, "dropping undecodable feature payload"))
        .ok()
}

/// Decode every envelope that holds a valid vote, preserving transport order.
pub fn decode_votes(envelopes: &[TransportMessage]) -> Vec<VoteMessage> {
    envelopes
        .iter()
        .filter_map(|env| decode_vote(&env.payload))
        .collect()
}

/// Decode every envelope that holds a valid feature proposal, preserving
/// transport order. No signature checks happen here.
pub fn decode_features(envelopes: &[TransportMessage]) -> Vec<FeatureProposalMessage> {
    envelopes.iter().filter_map(decode_feature).collect()
}
