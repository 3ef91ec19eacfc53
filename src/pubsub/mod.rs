//! GCP Pub/Sub client plumbing.
//!
//! This module contains everything the probe needs to talk to a Pub/Sub
//! emulator over gRPC:
//! - Generated protocol bindings for the subset of the v1 API in use
//! - Resource name formatting and validation
//! - Plaintext channel setup for emulator endpoints
//! - Topic/subscription provisioning, the publish loop, and the pull session

// Include generated protobuf code
/// Generated Protocol Buffer definitions for Google Cloud Pub/Sub v1 API.
///
/// This module contains the Rust bindings for the vendored subset of the
/// Google Cloud Pub/Sub gRPC API, including Publisher and Subscriber
/// services (clients for the probe, servers for the test emulator stub).
#[allow(clippy::all, unused_imports, dead_code, missing_docs)]
pub mod proto {
    include!("generated/google.pubsub.v1.rs");
}

pub mod admin;
pub mod names;
pub mod publisher;
pub mod subscriber;
pub mod transport;
