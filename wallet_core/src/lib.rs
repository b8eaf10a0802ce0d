//! Wallet-side of the vote protocol.
//!
//! - [`Publisher`]: builds, signs and publishes vote and feature-proposal
//!   messages, failing soft when no usable signing authority is present
//! - [`SigningAuthority`]: the seam to whoever holds the key, either an
//!   in-process [`LocalKeySigner`] or a browser/extension wallet reached
//!   over JSON-RPC ([`JsonRpcSigner`])
//! - [`Transport`]: the pub/sub network with a history store, implemented
//!   for a Waku node's REST API by [`WakuRestTransport`]
//! - [`receive_votes`] / [`receive_features`]: history queries that degrade
//!   to empty results when the store is unavailable

pub mod clock;
pub mod error;
pub mod publisher;
pub mod receive;
pub mod rpc_signer;
pub mod signer;
pub mod transport;
pub mod waku;

pub use clock::{Clock, SystemClock};
pub use error::WalletError;
pub use publisher::{PublishOutcome, Publisher};
pub use receive::{receive_features, receive_votes};
pub use rpc_signer::JsonRpcSigner;
pub use signer::{LocalKeySigner, SigningAuthority};
pub use transport::Transport;
pub use waku::WakuRestTransport;
