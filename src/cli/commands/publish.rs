// Publish command implementation
use anyhow::{Context, Result};
use tracing::info;

use crate::cli::output::print_success;
use crate::config::ProbeConfig;
use crate::pubsub::names::ResourceName;
use crate::pubsub::{admin, publisher, transport};

/// Execute the publish command: provision the topic and publish the batch.
pub async fn execute(config: ProbeConfig) -> Result<()> {
    config.validate()?;

    let topic_name = ResourceName::topic(&config.project_id, &config.topic_id);

    info!("Using Pub/Sub endpoint {}", config.endpoint);
    let channel = transport::connect(&config.endpoint)?;

    admin::ensure_topic(channel.clone(), &topic_name)
        .await
        .context("Failed to provision topic")?;

    let published = publisher::publish_batch(
        channel,
        &topic_name,
        config.publish.payload.as_bytes(),
        config.publish.count,
    )
    .await
    .context("Publish batch failed")?;

    print_success(&format!(
        "Published {} messages to {}",
        published, topic_name
    ));
    Ok(())
}
