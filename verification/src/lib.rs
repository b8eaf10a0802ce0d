//! Verification and aggregation of off-chain votes.
//!
//! - [`Verifier`]: recovers the signer of a message from its signature and
//!   the re-derived typed data, and checks it against the claimed sender.
//! - [`filter_verified`]: turns an unordered, possibly duplicated set of
//!   decoded votes into the batch ready for on-chain submission.
//! - [`encode_cast_votes`] / [`tally`]: batch calldata and pending totals.
//!
//! Everything here is synchronous and pure. It holds no shared mutable
//! state and is safe to call concurrently and repeatedly.

pub mod aggregator;
pub mod batch;
pub mod error;
pub mod verifier;

pub use aggregator::{filter_verified, filter_verified_features};
pub use batch::{encode_cast_votes, tally, PendingTally, CAST_VOTES_SIGNATURE};
pub use error::VerificationFailure;
pub use verifier::{recover_signer, Verifier};
