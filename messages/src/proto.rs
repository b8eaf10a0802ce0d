//! Protobuf schema of the two wire messages.
//!
//! ```proto
//! message WakuVote {
//!   optional string address   = 1;
//!   optional string vote      = 2;  // "yes" | "no"
//!   optional bytes  sntAmount = 3;  // minimal big-endian uint256
//!   optional bytes  sign      = 4;  // 65-byte r ‖ s ‖ v
//!   optional uint64 nonce     = 5;
//!   optional uint64 sessionID = 6;
//! }
//!
//! message WakuFeature {
//!   optional string voter     = 1;
//!   optional bytes  sntAmount = 2;
//!   optional string publicKey = 3;
//!   optional uint64 timestamp = 4;  // milliseconds since epoch
//!   optional bytes  sign      = 5;
//! }
//! ```

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct WakuVote {
    #[prost(string, optional, tag = "1")]
    pub address: Option<String>,
    #[prost(string, optional, tag = "2")]
    pub vote: Option<String>,
    #[prost(bytes = "vec", optional, tag = "3")]
    pub snt_amount: Option<Vec<u8>>,
    #[prost(bytes = "vec", optional, tag = "4")]
    pub sign: Option<Vec<u8>>,
    #[prost(uint64, optional, tag = "5")]
    pub nonce: Option<u64>,
    #[prost(uint64, optional, tag = "6")]
    pub session_id: Option<u64>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct WakuFeature {
    #[prost(string, optional, tag = "1")]
    pub voter: Option<String>,
    #[prost(bytes = "vec", optional, tag = "2")]
    pub snt_amount: Option<Vec<u8>>,
    #[prost(string, optional, tag = "3")]
    pub public_key: Option<String>,
    #[prost(uint64, optional, tag = "4")]
    pub timestamp: Option<u64>,
    #[prost(bytes = "vec", optional, tag = "5")]
    pub sign: Option<Vec<u8>>,
}
