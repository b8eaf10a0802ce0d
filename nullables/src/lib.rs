//! Nullable infrastructure for deterministic testing.
//!
//! Every external dependency of the publisher (clock, transport, signing
//! authority) sits behind a trait. This crate provides test-friendly
//! implementations that:
//! - Return deterministic values
//! - Can be controlled programmatically
//! - Never touch the network or prompt a user
//!
//! Usage: swap real implementations for nullables in tests.

pub mod clock;
pub mod signer;
pub mod transport;

pub use clock::NullClock;
pub use signer::NullSigner;
pub use transport::NullTransport;
