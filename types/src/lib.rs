//! Fundamental types for off-chain community-directory voting.
//!
//! This crate defines the data model shared by every other crate in the
//! workspace: addresses, SNT amounts, the recoverable signature value type,
//! rooms and vote choices, millisecond timestamps, and the message structs
//! that travel over the pub/sub transport.

pub mod address;
pub mod amount;
pub mod error;
pub mod message;
pub mod room;
pub mod signature;
pub mod time;

pub use address::{parse_address, to_checksum};
pub use alloy_primitives::{Address, B256, U256};
pub use amount::SntAmount;
pub use error::TypesError;
pub use message::{FeatureProposalMessage, VerifiedVote, VoteMessage};
pub use room::{RoomId, RoomKey, VoteChoice};
pub use signature::Signature;
pub use time::TimestampMs;
