//! Transport-level envelope.

use dirvote_types::TimestampMs;
use serde::{Deserialize, Serialize};

/// A payload as handed to, or received from, the pub/sub transport.
///
/// `timestamp` is the envelope timestamp the transport carries alongside
/// the payload; it is not part of the signed content.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransportMessage {
    pub content_topic: String,
    pub payload: Vec<u8>,
    pub timestamp: Option<TimestampMs>,
}

impl TransportMessage {
    pub fn new(content_topic: impl Into<String>, payload: Vec<u8>) -> Self {
        Self {
            content_topic: content_topic.into(),
            payload,
            timestamp: None,
        }
    }

    pub fn with_timestamp(mut self, timestamp: TimestampMs) -> Self {
        self.timestamp = Some(timestamp);
        self
    }
}
