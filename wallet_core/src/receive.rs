//! Pulling messages back out of the transport's history store.

use dirvote_messages::{decode_features, decode_votes, vote_topic};
use dirvote_types::{FeatureProposalMessage, RoomId, VoteMessage};
use dirvote_verification::{filter_verified_features, Verifier};
use tracing::{debug, warn};

use crate::transport::Transport;

/// Decoded votes stored for `room`. Unverified; feed them to
/// `filter_verified`. An unavailable store yields no votes.
pub async fn receive_votes(
    transport: &dyn Transport,
    base_topic: &str,
    room: RoomId,
) -> Vec<VoteMessage> {
    let topic = vote_topic(base_topic, room);
    match transport.query_history(std::slice::from_ref(&topic)).await {
        Ok(envelopes) => {
            let votes = decode_votes(&envelopes);
            debug!(%topic, stored = envelopes.len(), decoded = votes.len(), "received votes");
            votes
        }
        Err(e) => {
            warn!(%topic, error = %e, "vote history unavailable");
            Vec::new()
        }
    }
}

/// Verified feature proposals stored on `topic`.
pub async fn receive_features(
    transport: &dyn Transport,
    topic: &str,
    verifier: &Verifier,
) -> Vec<FeatureProposalMessage> {
    match transport.query_history(&[topic.to_string()]).await {
        Ok(envelopes) => {
            let decoded = decode_features(&envelopes);
            let verified = filter_verified_features(&decoded, verifier);
            debug!(
                topic,
                stored = envelopes.len(),
                decoded = decoded.len(),
                verified = verified.len(),
                "received feature proposals"
            );
            verified
        }
        Err(e) => {
            warn!(topic, error = %e, "feature history unavailable");
            Vec::new()
        }
    }
}
