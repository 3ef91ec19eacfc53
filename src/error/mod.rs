//! Error types for pubsub-probe.

use thiserror::Error;

/// Result type for pubsub-probe operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for pubsub-probe.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Validation error.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// gRPC transport error (channel setup, connection).
    #[error("Transport error: {0}")]
    Transport(#[from] tonic::transport::Error),

    /// RPC failure reported by the server.
    #[error("RPC error: {0}")]
    Rpc(#[from] tonic::Status),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Validation error types.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Invalid project ID.
    #[error("Invalid project ID: {0}")]
    InvalidProjectId(String),

    /// Invalid topic ID.
    #[error("Invalid topic ID: {0}")]
    InvalidTopicId(String),

    /// Invalid subscription ID.
    #[error("Invalid subscription ID: {0}")]
    InvalidSubscriptionId(String),

    /// Message too large.
    #[error("Message too large: {size} bytes (max: {max} bytes)")]
    MessageTooLarge {
        /// Actual message size.
        size: usize,
        /// Maximum allowed size.
        max: usize,
    },

    /// Invalid parameter.
    #[error("Invalid parameter {name}: {reason}")]
    InvalidParameter {
        /// Parameter name.
        name: String,
        /// Reason for invalidity.
        reason: String,
    },
}
