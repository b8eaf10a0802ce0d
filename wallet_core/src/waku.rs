//! [`Transport`] over the REST API of a Waku node.
//!
//! Relay publishing uses autosharding (`/relay/v1/auto/messages`), so the
//! pubsub topic is derived from the content topic by the node. History comes
//! from the store protocol (`/store/v1/messages`), paged by cursor.

use std::time::Duration;

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as B64, Engine};
use dirvote_messages::TransportMessage;
use dirvote_types::TimestampMs;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::error::WalletError;
use crate::transport::Transport;

const PAGE_SIZE: u32 = 100;
const MAX_PAGES: usize = 50;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WakuMessage {
    payload: String,
    content_topic: String,
    #[serde(default)]
    version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    timestamp: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoreCursor {
    pubsub_topic: String,
    sender_time: u64,
    store_time: u64,
    digest: StoreDigest,
}

#[derive(Debug, Clone, Deserialize)]
struct StoreDigest {
    data: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoreResponse {
    #[serde(default)]
    messages: Vec<WakuMessage>,
    #[serde(default)]
    cursor: Option<StoreCursor>,
    #[serde(default)]
    error_message: Option<String>,
}

impl WakuMessage {
    fn from_envelope(message: &TransportMessage) -> Self {
        Self {
            payload: B64.encode(&message.payload),
            content_topic: message.content_topic.clone(),
            version: 0,
            timestamp: message
                .timestamp
                .and_then(|ts| u64::try_from(ts.as_nanos()).ok()),
        }
    }

    /// `None` if the payload is not base64; such messages are skipped.
    fn into_envelope(self) -> Option<TransportMessage> {
        let payload = B64.decode(self.payload.as_bytes()).ok()?;
        let envelope = TransportMessage::new(self.content_topic, payload);
        Some(match self.timestamp {
            Some(nanos) => envelope.with_timestamp(TimestampMs::from_nanos(u128::from(nanos))),
            None => envelope,
        })
    }
}

/// Cursor for the following store page. An empty page ends paging even if
/// the node hands back a cursor.
fn next_cursor(cursor: Option<StoreCursor>, received: usize) -> Option<StoreCursor> {
    cursor.filter(|_| received > 0)
}

/// HTTP client for a Waku node's REST API.
#[derive(Clone)]
pub struct WakuRestTransport {
    http: reqwest::Client,
    base_url: String,
}

impl WakuRestTransport {
    /// `base_url` such as `http://127.0.0.1:8645`.
    pub fn new(base_url: impl Into<String>) -> Result<Self, WalletError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| WalletError::Transport(format!("failed to create HTTP client: {e}")))?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn store_page(
        &self,
        topics: &str,
        cursor: Option<&StoreCursor>,
    ) -> Result<StoreResponse, WalletError> {
        let mut query: Vec<(&str, String)> = vec![
            ("contentTopics", topics.to_string()),
            ("pageSize", PAGE_SIZE.to_string()),
            ("ascending", "true".to_string()),
        ];
        if let Some(c) = cursor {
            query.push(("pubsubTopic", c.pubsub_topic.clone()));
            query.push(("senderTime", c.sender_time.to_string()));
            query.push(("storeTime", c.store_time.to_string()));
            query.push(("digest", c.digest.data.clone()));
        }

        let response = self
            .http
            .get(format!("{}/store/v1/messages", self.base_url))
            .query(&query)
            .send()
            .await
            .map_err(|e| WalletError::Transport(format!("store query failed: {e}")))?;

        if !response.status().is_success() {
            return Err(WalletError::Transport(format!(
                "store returned HTTP {}",
                response.status()
            )));
        }

        let page: StoreResponse = response
            .json()
            .await
            .map_err(|e| WalletError::Transport(format!("invalid store response: {e}")))?;
        if let Some(err) = page.error_message.as_deref().filter(|m| !m.is_empty()) {
            return Err(WalletError::Transport(format!("store error: {err}")));
        }
        Ok(page)
    }
}

#[async_trait]
impl Transport for WakuRestTransport {
    async fn publish(&self, message: &TransportMessage) -> Result<(), WalletError> {
        let response = self
            .http
            .post(format!("{}/relay/v1/auto/messages", self.base_url))
            .json(&WakuMessage::from_envelope(message))
            .send()
            .await
            .map_err(|e| WalletError::Transport(format!("relay publish failed: {e}")))?;

        if !response.status().is_success() {
            return Err(WalletError::Transport(format!(
                "relay returned HTTP {}",
                response.status()
            )));
        }
        debug!(topic = %message.content_topic, bytes = message.payload.len(), "relayed message");
        Ok(())
    }

    async fn query_history(&self, topics: &[String]) -> Result<Vec<TransportMessage>, WalletError> {
        let joined = topics.join(",");
        let mut out = Vec::new();
        let mut cursor = None;

        for _ in 0..MAX_PAGES {
            let page = self.store_page(&joined, cursor.as_ref()).await?;
            let received = page.messages.len();
            out.extend(page.messages.into_iter().filter_map(WakuMessage::into_envelope));
            trace!(received, total = out.len(), "store page");

            cursor = next_cursor(page.cursor, received);
            if cursor.is_none() {
                return Ok(out);
            }
        }
        warn!(
            pages = MAX_PAGES,
            total = out.len(),
            "store history truncated at page limit, later messages not fetched"
        );
        Ok(out)
    }
}
