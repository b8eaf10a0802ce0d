use async_trait::async_trait;
use dirvote_messages::TransportMessage;

use crate::error::WalletError;

/// A content-topic pub/sub network with a queryable history store.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn publish(&self, message: &TransportMessage) -> Result<(), WalletError>;

    /// Every stored message on any of `topics`, oldest first.
    async fn query_history(&self, topics: &[String]) -> Result<Vec<TransportMessage>, WalletError>;
}
