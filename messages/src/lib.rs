//! Wire codec for dirvote messages.
//!
//! Two protobuf messages travel over the pub/sub transport: `WakuVote` on a
//! per-room topic and `WakuFeature` on a fixed feature topic. Fields are
//! bound to tags, not positions, and every field is optional on the wire so
//! that an absent field decodes to absence instead of a default value.
//!
//! Decoding never panics and never yields a partial message: any missing
//! required field or malformed value rejects the whole payload.

pub mod codec;
pub mod envelope;
pub mod error;
pub mod proto;
pub mod topic;

pub use codec::{
    decode_feature, decode_features, decode_vote, decode_votes, encode_feature, encode_vote,
    try_decode_feature, try_decode_vote,
};
pub use envelope::TransportMessage;
pub use error::DecodeError;
pub use topic::vote_topic;
