//! First-valid-message-wins aggregation of vote batches.

use std::collections::HashSet;

use dirvote_types::{Address, FeatureProposalMessage, VerifiedVote, VoteMessage};
use tracing::{debug, info};

use crate::verifier::Verifier;

/// Reduce a batch of decoded votes to at most one verified vote per signer.
///
/// Each message is verified; the first valid message from a signer in
/// iteration order is kept and later ones from the same signer are dropped.
/// Signers in `already_voted` are then excluded. Relative input order is
/// preserved. Invalid messages are dropped without aborting the batch.
///
/// The exclusion is applied after deduplication, so a signer's valid message
/// still shadows their later messages even when the signer is excluded.
pub fn filter_verified(
    messages: &[VoteMessage],
    already_voted: &HashSet<Address>,
    verifier: &Verifier,
) -> Vec<VerifiedVote> {
    let (kept, seen) = messages.iter().fold(
        (Vec::new(), HashSet::new()),
        |(mut kept, mut seen), msg| {
            if let Err(reason) = verifier.check_vote(msg) {
                debug!(signer = %msg.signer, %reason, "dropping unverifiable vote");
                return (kept, seen);
            }
            if !seen.insert(msg.signer) {
                debug!(signer = %msg.signer, "dropping duplicate vote");
                return (kept, seen);
            }
            if already_voted.contains(&msg.signer) {
                debug!(signer = %msg.signer, "dropping vote from signer already on chain");
                return (kept, seen);
            }
            kept.push(VerifiedVote::from_message(msg));
            (kept, seen)
        },
    );

    info!(
        received = messages.len(),
        signers = seen.len(),
        kept = kept.len(),
        "aggregated vote batch"
    );
    kept
}

/// Keep feature proposals that verify. No deduplication: a voter may
/// propose several communities.
pub fn filter_verified_features(
    messages: &[FeatureProposalMessage],
    verifier: &Verifier,
) -> Vec<FeatureProposalMessage> {
    messages
        .iter()
        .filter(|msg| match verifier.check_feature(msg) {
            Ok(()) => true,
            Err(reason) => {
                debug!(voter = %msg.voter, %reason, "dropping unverifiable feature proposal");
                false
            }
        })
        .cloned()
        .collect()
}
