//! Channel setup for emulator endpoints.
//!
//! Emulators speak plaintext HTTP/2 and take no credentials, so the channel
//! is just a lazy `http://` endpoint. Connection failures surface as RPC
//! errors on first use.

use tonic::transport::{Channel, Endpoint};

use crate::error::Result;

/// Build a lazy plaintext channel to the given emulator endpoint.
///
/// Accepts a bare `host:port` (the scheme defaults to `http://`) or a full
/// URI. The channel connects on first RPC.
pub fn connect(endpoint: &str) -> Result<Channel> {
    let uri = if endpoint.contains("://") {
        endpoint.to_string()
    } else {
        format!("http://{}", endpoint)
    };

    let endpoint = Endpoint::from_shared(uri)?;
    Ok(endpoint.connect_lazy())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_connect_bare_host_port() {
        assert!(connect("localhost:8085").is_ok());
    }

    #[tokio::test]
    async fn test_connect_full_uri() {
        assert!(connect("http://127.0.0.1:8085").is_ok());
    }

    #[test]
    fn test_connect_invalid_uri() {
        let result = connect("http://exa mple.com:8085");
        assert!(matches!(result, Err(crate::Error::Transport(_))));
    }
}
