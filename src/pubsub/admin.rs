//! Topic and subscription provisioning.
//!
//! Implements the lookup-then-create pattern: check whether the resource
//! exists, create it on `NotFound`, and propagate every other failure. A
//! concurrent provisioner can win the race between the lookup and the
//! create; `AlreadyExists` from the create is therefore treated as success
//! and resolved with a second lookup.

use tonic::transport::Channel;
use tonic::Code;
use tracing::{debug, info};

use crate::error::Result;
use crate::pubsub::proto::publisher_client::PublisherClient;
use crate::pubsub::proto::subscriber_client::SubscriberClient;
use crate::pubsub::proto::{GetSubscriptionRequest, GetTopicRequest, Subscription, Topic};

/// Ensure the named topic exists, creating it if absent.
///
/// `topic_name` is the fully-qualified resource name,
/// `projects/{project}/topics/{topic}`.
pub async fn ensure_topic(channel: Channel, topic_name: &str) -> Result<Topic> {
    let mut client = PublisherClient::new(channel);

    let lookup = client
        .get_topic(GetTopicRequest {
            topic: topic_name.to_string(),
        })
        .await;

    match lookup {
        Ok(response) => {
            debug!("Topic {} already exists", topic_name);
            Ok(response.into_inner())
        }
        Err(status) if status.code() == Code::NotFound => {
            info!("Topic {} not found, creating it", topic_name);
            let created = client
                .create_topic(Topic {
                    name: topic_name.to_string(),
                    ..Default::default()
                })
                .await;

            match created {
                Ok(response) => Ok(response.into_inner()),
                // Lost the provisioning race; the topic exists now.
                Err(status) if status.code() == Code::AlreadyExists => {
                    let response = client
                        .get_topic(GetTopicRequest {
                            topic: topic_name.to_string(),
                        })
                        .await?;
                    Ok(response.into_inner())
                }
                Err(status) => Err(status.into()),
            }
        }
        Err(status) => Err(status.into()),
    }
}

/// Ensure the named pull subscription exists and is bound to the topic,
/// creating it if absent.
///
/// An absent push config selects pull delivery. `ack_deadline_seconds` of
/// zero leaves the broker default in place.
pub async fn ensure_subscription(
    channel: Channel,
    subscription_name: &str,
    topic_name: &str,
    ack_deadline_seconds: i32,
) -> Result<Subscription> {
    let mut client = SubscriberClient::new(channel);

    let lookup = client
        .get_subscription(GetSubscriptionRequest {
            subscription: subscription_name.to_string(),
        })
        .await;

    match lookup {
        Ok(response) => {
            debug!("Subscription {} already exists", subscription_name);
            Ok(response.into_inner())
        }
        Err(status) if status.code() == Code::NotFound => {
            info!(
                "Subscription {} not found, creating it on {}",
                subscription_name, topic_name
            );
            let created = client
                .create_subscription(Subscription {
                    name: subscription_name.to_string(),
                    topic: topic_name.to_string(),
                    push_config: None,
                    ack_deadline_seconds,
                    ..Default::default()
                })
                .await;

            match created {
                Ok(response) => Ok(response.into_inner()),
                // Lost the provisioning race; the subscription exists now.
                Err(status) if status.code() == Code::AlreadyExists => {
                    let response = client
                        .get_subscription(GetSubscriptionRequest {
                            subscription: subscription_name.to_string(),
                        })
                        .await?;
                    Ok(response.into_inner())
                }
                Err(status) => Err(status.into()),
            }
        }
        Err(status) => Err(status.into()),
    }
}
