//! Integration tests for topic and subscription provisioning.

mod common;

use common::spawn_emulator;
use pubsub_probe::pubsub::names::ResourceName;
use pubsub_probe::pubsub::{admin, transport};
use tonic::Code;

/// Provisioning against an empty emulator creates both resources, with the
/// subscription bound to the topic in pull mode.
#[tokio::test]
async fn test_provisioning_creates_topic_and_bound_subscription() {
    let (endpoint, state) = spawn_emulator().await;
    let channel = transport::connect(&endpoint).expect("failed to build channel");

    let topic_name = ResourceName::topic("local-dev", "test-topic");
    let subscription_name = ResourceName::subscription("local-dev", "test-sub");

    let topic = admin::ensure_topic(channel.clone(), &topic_name)
        .await
        .expect("failed to ensure topic");
    assert_eq!(topic.name, topic_name);

    let subscription =
        admin::ensure_subscription(channel, &subscription_name, &topic_name, 0)
            .await
            .expect("failed to ensure subscription");
    assert_eq!(subscription.name, subscription_name);
    assert_eq!(subscription.topic, topic_name);
    assert!(subscription.push_config.is_none()); // pull delivery

    let state = state.lock().unwrap();
    assert!(state.topics.contains_key(&topic_name));
    assert_eq!(
        state.subscriptions.get(&subscription_name).unwrap().topic,
        topic_name
    );
}

/// A topic that already exists is returned as-is; no recreation is
/// attempted and no error is raised.
#[tokio::test]
async fn test_existing_topic_is_not_recreated() {
    let (endpoint, state) = spawn_emulator().await;
    let channel = transport::connect(&endpoint).expect("failed to build channel");

    let topic_name = ResourceName::topic("local-dev", "test-topic");
    state.lock().unwrap().seed_topic(&topic_name);

    let topic = admin::ensure_topic(channel, &topic_name)
        .await
        .expect("ensure_topic must not fail for an existing topic");
    assert_eq!(topic.name, topic_name);

    assert_eq!(state.lock().unwrap().create_topic_calls, 0);
}

/// ensure_topic is idempotent: a second call finds the topic and issues no
/// second create.
#[tokio::test]
async fn test_ensure_topic_idempotent() {
    let (endpoint, state) = spawn_emulator().await;
    let channel = transport::connect(&endpoint).expect("failed to build channel");

    let topic_name = ResourceName::topic("local-dev", "test-topic");

    admin::ensure_topic(channel.clone(), &topic_name)
        .await
        .expect("first ensure_topic failed");
    admin::ensure_topic(channel, &topic_name)
        .await
        .expect("second ensure_topic failed");

    let state = state.lock().unwrap();
    assert_eq!(state.create_topic_calls, 1);
    assert_eq!(state.topics.len(), 1);
}

/// ensure_subscription is idempotent as well.
#[tokio::test]
async fn test_ensure_subscription_idempotent() {
    let (endpoint, state) = spawn_emulator().await;
    let channel = transport::connect(&endpoint).expect("failed to build channel");

    let topic_name = ResourceName::topic("local-dev", "test-topic");
    let subscription_name = ResourceName::subscription("local-dev", "test-sub");

    admin::ensure_topic(channel.clone(), &topic_name)
        .await
        .expect("ensure_topic failed");
    admin::ensure_subscription(channel.clone(), &subscription_name, &topic_name, 0)
        .await
        .expect("first ensure_subscription failed");
    admin::ensure_subscription(channel, &subscription_name, &topic_name, 0)
        .await
        .expect("second ensure_subscription failed");

    assert_eq!(state.lock().unwrap().subscriptions.len(), 1);
}

/// Failures other than "not found" on the lookup-then-create path
/// propagate: creating a subscription on a missing topic fails.
#[tokio::test]
async fn test_subscription_on_missing_topic_fails() {
    let (endpoint, _state) = spawn_emulator().await;
    let channel = transport::connect(&endpoint).expect("failed to build channel");

    let topic_name = ResourceName::topic("local-dev", "no-such-topic");
    let subscription_name = ResourceName::subscription("local-dev", "test-sub");

    let result =
        admin::ensure_subscription(channel, &subscription_name, &topic_name, 0).await;

    match result {
        Err(pubsub_probe::Error::Rpc(status)) => {
            assert_eq!(status.code(), Code::NotFound);
        }
        other => panic!("Expected RPC NotFound error, got {:?}", other.map(|s| s.name)),
    }
}
