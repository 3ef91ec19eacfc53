// Subscribe command implementation
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::info;

use crate::cli::output::{print_info, print_success};
use crate::config::ProbeConfig;
use crate::pubsub::names::ResourceName;
use crate::pubsub::subscriber::PullSession;
use crate::pubsub::{admin, transport};
use crate::shutdown::{self, ShutdownSignal};
use crate::stats::{self, DeliveryCounter};

/// Execute the subscribe command: provision both resources, then pull and
/// count deliveries until the operator interrupts.
pub async fn execute(config: ProbeConfig) -> Result<()> {
    config.validate()?;

    let topic_name = ResourceName::topic(&config.project_id, &config.topic_id);
    let subscription_name =
        ResourceName::subscription(&config.project_id, &config.subscription_id);

    info!("Using Pub/Sub endpoint {}", config.endpoint);
    let channel = transport::connect(&config.endpoint)?;

    admin::ensure_topic(channel.clone(), &topic_name)
        .await
        .context("Failed to provision topic")?;
    admin::ensure_subscription(
        channel.clone(),
        &subscription_name,
        &topic_name,
        config.pull.ack_deadline_seconds,
    )
    .await
    .context("Failed to provision subscription")?;

    let signal = ShutdownSignal::new();
    let counter = Arc::new(DeliveryCounter::new());

    let reporter = stats::spawn_reporter(
        counter.clone(),
        Duration::from_secs(config.report.interval_secs),
        signal.subscribe(),
    );

    let session = PullSession::new(channel, subscription_name.clone(), &config.pull);
    let session_counter = counter.clone();
    let session_shutdown = signal.subscribe();
    let mut session_task = tokio::spawn(async move {
        session
            .run(move |_message| session_counter.record(), session_shutdown)
            .await
    });

    print_info(&format!(
        "Listening for messages on {}. Press Ctrl-C to stop.",
        subscription_name
    ));

    let session_result = tokio::select! {
        _ = shutdown::wait_for_signal() => {
            signal.shutdown();
            session_task.await
        }
        result = &mut session_task => {
            signal.shutdown();
            result
        }
    };

    reporter.await.context("Reporter task panicked")?;
    let delivered = session_result.context("Pull session task panicked")??;

    print_success(&format!(
        "Subscriber stopped after {} delivered messages",
        delivered
    ));
    Ok(())
}
