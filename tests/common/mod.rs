//! In-process Pub/Sub emulator stub shared by the integration tests.
//!
//! Implements just enough of the Publisher and Subscriber services to drive
//! the real client path end to end: topics, pull subscriptions, per
//! subscription delivery queues, and acknowledgment tracking.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use tokio_stream::wrappers::TcpListenerStream;
use tonic::transport::Server;
use tonic::{Request, Response, Status};

use pubsub_probe::pubsub::proto::publisher_server::{Publisher, PublisherServer};
use pubsub_probe::pubsub::proto::subscriber_server::{Subscriber, SubscriberServer};
use pubsub_probe::pubsub::proto::{
    AcknowledgeRequest, GetSubscriptionRequest, GetTopicRequest, PublishRequest, PublishResponse,
    PubsubMessage, PullRequest, PullResponse, ReceivedMessage, Subscription, Topic,
};

/// Shared emulator state, inspectable from tests.
#[derive(Default)]
pub struct EmulatorState {
    pub topics: HashMap<String, Topic>,
    pub subscriptions: HashMap<String, Subscription>,
    queues: HashMap<String, VecDeque<ReceivedMessage>>,
    acked: HashMap<String, Vec<String>>,
    pub create_topic_calls: u64,
    next_message_id: u64,
}

impl EmulatorState {
    /// Seed a topic directly, bypassing the Publisher service.
    pub fn seed_topic(&mut self, name: &str) {
        self.topics.insert(
            name.to_string(),
            Topic {
                name: name.to_string(),
                ..Default::default()
            },
        );
    }

    /// Number of messages waiting for delivery on a subscription.
    pub fn queued(&self, subscription: &str) -> usize {
        self.queues.get(subscription).map_or(0, VecDeque::len)
    }

    /// Number of acknowledged messages on a subscription.
    pub fn acked_count(&self, subscription: &str) -> usize {
        self.acked.get(subscription).map_or(0, Vec::len)
    }
}

struct EmulatorPublisher {
    state: Arc<Mutex<EmulatorState>>,
}

#[tonic::async_trait]
impl Publisher for EmulatorPublisher {
    async fn create_topic(
        &self,
        request: Request<Topic>,
    ) -> Result<Response<Topic>, Status> {
        let topic = request.into_inner();
        let mut state = self.state.lock().unwrap();
        state.create_topic_calls += 1;

        if state.topics.contains_key(&topic.name) {
            return Err(Status::already_exists(format!(
                "Topic already exists: {}",
                topic.name
            )));
        }
        state.topics.insert(topic.name.clone(), topic.clone());
        Ok(Response::new(topic))
    }

    async fn get_topic(
        &self,
        request: Request<GetTopicRequest>,
    ) -> Result<Response<Topic>, Status> {
        let req = request.into_inner();
        let state = self.state.lock().unwrap();

        state
            .topics
            .get(&req.topic)
            .cloned()
            .map(Response::new)
            .ok_or_else(|| Status::not_found(format!("Topic not found: {}", req.topic)))
    }

    async fn publish(
        &self,
        request: Request<PublishRequest>,
    ) -> Result<Response<PublishResponse>, Status> {
        let req = request.into_inner();
        let mut state = self.state.lock().unwrap();

        if !state.topics.contains_key(&req.topic) {
            return Err(Status::not_found(format!("Topic not found: {}", req.topic)));
        }

        let bound: Vec<String> = state
            .subscriptions
            .values()
            .filter(|sub| sub.topic == req.topic)
            .map(|sub| sub.name.clone())
            .collect();

        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();

        let mut message_ids = Vec::with_capacity(req.messages.len());
        for message in req.messages {
            state.next_message_id += 1;
            let message_id = state.next_message_id.to_string();
            message_ids.push(message_id.clone());

            let delivered = PubsubMessage {
                message_id,
                publish_time: Some(prost_types::Timestamp {
                    seconds: now.as_secs() as i64,
                    nanos: now.subsec_nanos() as i32,
                }),
                ..message
            };

            for name in &bound {
                let ack_id = format!("ack-{}-{}", name, delivered.message_id);
                state.queues.entry(name.clone()).or_default().push_back(
                    ReceivedMessage {
                        ack_id,
                        message: Some(delivered.clone()),
                        delivery_attempt: 1,
                    },
                );
            }
        }

        Ok(Response::new(PublishResponse { message_ids }))
    }
}

struct EmulatorSubscriber {
    state: Arc<Mutex<EmulatorState>>,
}

#[tonic::async_trait]
impl Subscriber for EmulatorSubscriber {
    async fn create_subscription(
        &self,
        request: Request<Subscription>,
    ) -> Result<Response<Subscription>, Status> {
        let subscription = request.into_inner();
        let mut state = self.state.lock().unwrap();

        if !state.topics.contains_key(&subscription.topic) {
            return Err(Status::not_found(format!(
                "Topic not found: {}",
                subscription.topic
            )));
        }
        if state.subscriptions.contains_key(&subscription.name) {
            return Err(Status::already_exists(format!(
                "Subscription already exists: {}",
                subscription.name
            )));
        }

        state
            .subscriptions
            .insert(subscription.name.clone(), subscription.clone());
        state.queues.entry(subscription.name.clone()).or_default();
        Ok(Response::new(subscription))
    }

    async fn get_subscription(
        &self,
        request: Request<GetSubscriptionRequest>,
    ) -> Result<Response<Subscription>, Status> {
        let req = request.into_inner();
        let state = self.state.lock().unwrap();

        state
            .subscriptions
            .get(&req.subscription)
            .cloned()
            .map(Response::new)
            .ok_or_else(|| {
                Status::not_found(format!("Subscription not found: {}", req.subscription))
            })
    }

    async fn pull(
        &self,
        request: Request<PullRequest>,
    ) -> Result<Response<PullResponse>, Status> {
        let req = request.into_inner();
        let mut state = self.state.lock().unwrap();

        if !state.subscriptions.contains_key(&req.subscription) {
            return Err(Status::not_found(format!(
                "Subscription not found: {}",
                req.subscription
            )));
        }

        let queue = state.queues.entry(req.subscription.clone()).or_default();
        let take = (req.max_messages.max(0) as usize).min(queue.len());
        let received_messages: Vec<ReceivedMessage> = queue.drain(..take).collect();

        Ok(Response::new(PullResponse { received_messages }))
    }

    async fn acknowledge(
        &self,
        request: Request<AcknowledgeRequest>,
    ) -> Result<Response<()>, Status> {
        let req = request.into_inner();
        let mut state = self.state.lock().unwrap();

        if !state.subscriptions.contains_key(&req.subscription) {
            return Err(Status::not_found(format!(
                "Subscription not found: {}",
                req.subscription
            )));
        }

        state
            .acked
            .entry(req.subscription)
            .or_default()
            .extend(req.ack_ids);
        Ok(Response::new(()))
    }
}

/// Start the stub emulator on an ephemeral port.
///
/// Returns the `host:port` endpoint and a handle to the shared state. The
/// server task runs until the test process exits.
pub async fn spawn_emulator() -> (String, Arc<Mutex<EmulatorState>>) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind emulator listener");
    let addr = listener.local_addr().expect("listener has no local addr");

    let state = Arc::new(Mutex::new(EmulatorState::default()));
    let publisher = EmulatorPublisher {
        state: state.clone(),
    };
    let subscriber = EmulatorSubscriber {
        state: state.clone(),
    };

    tokio::spawn(async move {
        Server::builder()
            .add_service(PublisherServer::new(publisher))
            .add_service(SubscriberServer::new(subscriber))
            .serve_with_incoming(TcpListenerStream::new(listener))
            .await
            .expect("emulator stub server failed");
    });

    (format!("127.0.0.1:{}", addr.port()), state)
}
