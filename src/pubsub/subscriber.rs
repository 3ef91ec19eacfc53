//! Pull session.
//!
//! A long-lived loop of Pull RPCs against one subscription. Every delivered
//! message is handed to a callback and then acknowledged unconditionally;
//! there is no nack or retry path, and the acknowledgment does not consult
//! the callback's outcome. The session ends cleanly on shutdown; a failed
//! RPC after startup is logged and ends the session with an error.

use std::time::Duration;

use tokio::sync::broadcast;
use tonic::transport::Channel;
use tracing::{debug, error, info};

use crate::config::PullConfig;
use crate::error::Result;
use crate::pubsub::proto::subscriber_client::SubscriberClient;
use crate::pubsub::proto::{AcknowledgeRequest, PubsubMessage, PullRequest};

/// A pull session bound to one subscription.
pub struct PullSession {
    client: SubscriberClient<Channel>,
    subscription: String,
    max_messages: i32,
    idle_delay: Duration,
}

impl PullSession {
    /// Create a pull session for the fully-qualified subscription name.
    pub fn new(channel: Channel, subscription_name: impl Into<String>, config: &PullConfig) -> Self {
        Self {
            client: SubscriberClient::new(channel),
            subscription: subscription_name.into(),
            max_messages: config.max_messages,
            idle_delay: Duration::from_millis(config.idle_delay_ms),
        }
    }

    /// Run the session until the shutdown signal fires.
    ///
    /// Invokes `handler` once per delivered message, then acknowledges the
    /// whole batch. Returns the number of messages delivered over the
    /// session's lifetime.
    pub async fn run<F>(
        mut self,
        mut handler: F,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<u64>
    where
        F: FnMut(PubsubMessage) + Send,
    {
        info!("Listening for messages on {}", self.subscription);
        let mut delivered: u64 = 0;

        loop {
            let pulled = tokio::select! {
                biased;
                _ = shutdown.recv() => {
                    info!("Pull session on {} stopping", self.subscription);
                    return Ok(delivered);
                }
                result = self.client.pull(PullRequest {
                    subscription: self.subscription.clone(),
                    max_messages: self.max_messages,
                    ..Default::default()
                }) => result,
            };

            let batch = match pulled {
                Ok(response) => response.into_inner().received_messages,
                Err(status) => {
                    error!(error = %status, "Pull failed, stopping session");
                    return Err(status.into());
                }
            };

            if batch.is_empty() {
                tokio::select! {
                    biased;
                    _ = shutdown.recv() => {
                        info!("Pull session on {} stopping", self.subscription);
                        return Ok(delivered);
                    }
                    _ = tokio::time::sleep(self.idle_delay) => {}
                }
                continue;
            }

            let mut ack_ids = Vec::with_capacity(batch.len());
            for received in batch {
                ack_ids.push(received.ack_id);
                if let Some(message) = received.message {
                    handler(message);
                }
                delivered += 1;
            }

            debug!("Acknowledging {} messages", ack_ids.len());
            if let Err(status) = self
                .client
                .acknowledge(AcknowledgeRequest {
                    subscription: self.subscription.clone(),
                    ack_ids,
                })
                .await
            {
                error!(error = %status, "Acknowledge failed, stopping session");
                return Err(status.into());
            }
        }
    }
}
