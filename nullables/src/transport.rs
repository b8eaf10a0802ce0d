//! Nullable transport: record publishes, serve scripted history.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use dirvote_messages::TransportMessage;
use dirvote_wallet_core::{Transport, WalletError};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// An in-memory transport.
///
/// Published messages are recorded and also become part of the history, so
/// a publish followed by a query sees the message, as on a live store.
#[derive(Default)]
pub struct NullTransport {
    published: Mutex<Vec<TransportMessage>>,
    history: Mutex<Vec<TransportMessage>>,
    fail_publish: AtomicBool,
    fail_history: AtomicBool,
}

impl NullTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put a message in the history store without recording a publish.
    pub fn enqueue(&self, message: TransportMessage) {
        lock(&self.history).push(message);
    }

    /// Everything published so far (for assertions).
    pub fn published(&self) -> Vec<TransportMessage> {
        lock(&self.published).clone()
    }

    pub fn set_publish_failure(&self, fail: bool) {
        self.fail_publish.store(fail, Ordering::SeqCst);
    }

    pub fn set_history_failure(&self, fail: bool) {
        self.fail_history.store(fail, Ordering::SeqCst);
    }

    /// Clear all state.
    pub fn reset(&self) {
        lock(&self.published).clear();
        lock(&self.history).clear();
        self.set_publish_failure(false);
        self.set_history_failure(false);
    }
}

#[async_trait]
impl Transport for NullTransport {
    async fn publish(&self, message: &TransportMessage) -> Result<(), WalletError> {
        if self.fail_publish.load(Ordering::SeqCst) {
            return Err(WalletError::Transport("null transport: publish disabled".into()));
        }
        lock(&self.published).push(message.clone());
        lock(&self.history).push(message.clone());
        Ok(())
    }

    async fn query_history(&self, topics: &[String]) -> Result<Vec<TransportMessage>, WalletError> {
        if self.fail_history.load(Ordering::SeqCst) {
            return Err(WalletError::Transport("null transport: store disabled".into()));
        }
        Ok(lock(&self.history)
            .iter()
            .filter(|m| topics.iter().any(|t| *t == m.content_topic))
            .cloned()
            .collect())
    }
}
