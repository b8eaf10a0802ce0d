//! Typed-data builder.
//!
//! Builds the exact structure a voter signs for each message kind, and the
//! digest recovered against at verification time. Both sides go through the
//! same constructors, so the digest signed and the digest checked cannot
//! drift apart.
//!
//! - Votes are EIP-712 typed data under the voting contract's domain.
//! - Feature proposals are an EIP-191 personal message over the Keccak-256
//!   of the Solidity-packed `(voter, amount, communityKey, timestampMs)`.

pub mod builder;
pub mod domain;
pub mod error;
pub mod feature;
pub mod payload;
pub mod vote;

mod abi;

pub use builder::TypedDataBuilder;
pub use domain::VotingDomain;
pub use error::TypedDataError;
pub use feature::FeatureProposalDigest;
pub use payload::{MessageKind, TypedPayload};
pub use vote::TypedVote;
