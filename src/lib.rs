//! # pubsub-probe
//!
//! A smoke-test client for GCP Pub/Sub emulators.
//!
//! pubsub-probe provisions a topic and a pull subscription against a local
//! emulator endpoint, publishes a batch of messages, consumes them back, and
//! reports a received-message count on a fixed period. It is meant for
//! verifying that an emulator (or any Pub/Sub-compatible server) round-trips
//! messages end to end.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cli;
pub mod config;
pub mod error;
pub mod pubsub;
pub mod shutdown;
pub mod stats;

pub use error::{Error, Result};
