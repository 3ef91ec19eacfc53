//! Publish loop.
//!
//! Sends an identical payload a fixed number of times, one message per
//! Publish RPC, sequentially. There is no batching and no retry; the first
//! failed RPC aborts the batch and propagates.

use tonic::transport::Channel;
use tracing::{debug, info};

use crate::error::Result;
use crate::pubsub::names::validate_message_size;
use crate::pubsub::proto::publisher_client::PublisherClient;
use crate::pubsub::proto::{PublishRequest, PubsubMessage};

/// Publish `count` copies of `payload` to the topic, sequentially.
///
/// `topic_name` is the fully-qualified resource name. Returns the number of
/// server-assigned message IDs received, which equals `count` on success.
pub async fn publish_batch(
    channel: Channel,
    topic_name: &str,
    payload: &[u8],
    count: u32,
) -> Result<u64> {
    validate_message_size(payload)?;

    let mut client = PublisherClient::new(channel);
    let mut published: u64 = 0;

    for i in 0..count {
        let request = PublishRequest {
            topic: topic_name.to_string(),
            messages: vec![PubsubMessage {
                data: payload.to_vec(),
                ..Default::default()
            }],
        };

        let response = client.publish(request).await?;
        published += response.into_inner().message_ids.len() as u64;

        if (i + 1) % 100 == 0 {
            debug!("Published {}/{} messages", i + 1, count);
        }
    }

    info!("Published {} messages to {}", published, topic_name);
    Ok(published)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pubsub::transport;

    #[tokio::test]
    async fn test_oversized_payload_rejected_before_any_rpc() {
        // The lazy channel never connects; validation fails first.
        let channel = transport::connect("127.0.0.1:1").unwrap();
        let payload = vec![0u8; 11 * 1024 * 1024];

        let result = publish_batch(channel, "projects/p/topics/t", &payload, 1).await;
        assert!(matches!(result, Err(crate::Error::Validation(_))));
    }

    #[tokio::test]
    async fn test_publish_to_unreachable_endpoint_fails() {
        let channel = transport::connect("127.0.0.1:1").unwrap();

        let result = publish_batch(channel, "projects/p/topics/t", b"hi", 1).await;
        assert!(matches!(result, Err(crate::Error::Rpc(_))));
    }
}
