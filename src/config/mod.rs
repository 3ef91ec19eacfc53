//! Configuration system for pubsub-probe.

use serde::{Deserialize, Serialize};

use crate::pubsub::names::{validate_project_id, validate_subscription_id, validate_topic_id};

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeConfig {
    /// Emulator endpoint as `host:port` (plaintext, no credentials).
    pub endpoint: String,
    /// GCP project ID the topic and subscription live under.
    pub project_id: String,
    /// Topic ID to provision and publish to.
    pub topic_id: String,
    /// Subscription ID to provision and pull from.
    pub subscription_id: String,
    /// Publisher configuration.
    pub publish: PublishConfig,
    /// Pull session configuration.
    pub pull: PullConfig,
    /// Reporting configuration.
    pub report: ReportConfig,
}

/// Publisher configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishConfig {
    /// Number of messages to publish.
    pub count: u32,
    /// Message payload, published verbatim for every message.
    pub payload: String,
}

/// Pull session configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullConfig {
    /// Maximum messages requested per Pull RPC.
    pub max_messages: i32,
    /// Acknowledgment deadline for the subscription, in seconds.
    /// Zero leaves the broker default in place.
    pub ack_deadline_seconds: i32,
    /// Delay before re-polling after an empty pull, in milliseconds.
    pub idle_delay_ms: u64,
}

/// Reporting configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Seconds between received-message count reports.
    pub interval_secs: u64,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            endpoint: "localhost:8085".to_string(),
            project_id: "local-dev".to_string(),
            topic_id: "test-topic".to_string(),
            subscription_id: "test-sub".to_string(),
            publish: PublishConfig {
                count: 500,
                payload: "Hello World!".to_string(),
            },
            pull: PullConfig {
                max_messages: 100,
                ack_deadline_seconds: 0,
                idle_delay_ms: 200,
            },
            report: ReportConfig { interval_secs: 10 },
        }
    }
}

impl ProbeConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> crate::Result<()> {
        if self.endpoint.is_empty() {
            return Err(crate::Error::Config("Endpoint must not be empty".to_string()));
        }
        validate_project_id(&self.project_id)?;
        validate_topic_id(&self.topic_id)?;
        validate_subscription_id(&self.subscription_id)?;
        if self.pull.max_messages <= 0 {
            return Err(crate::Error::Config(
                "pull.max_messages must be positive".to_string(),
            ));
        }
        if self.report.interval_secs == 0 {
            return Err(crate::Error::Config(
                "report.interval_secs must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ProbeConfig::default();
        assert_eq!(config.endpoint, "localhost:8085");
        assert_eq!(config.project_id, "local-dev");
        assert_eq!(config.topic_id, "test-topic");
        assert_eq!(config.subscription_id, "test-sub");
        assert_eq!(config.publish.count, 500);
        assert_eq!(config.publish.payload, "Hello World!");
        assert_eq!(config.report.interval_secs, 10);
    }

    #[test]
    fn test_default_config_validates() {
        assert!(ProbeConfig::default().validate().is_ok());
    }

    #[test]
    fn test_empty_endpoint_rejected() {
        let config = ProbeConfig {
            endpoint: String::new(),
            ..ProbeConfig::default()
        };
        assert!(matches!(config.validate(), Err(crate::Error::Config(_))));
    }

    #[test]
    fn test_bad_topic_id_rejected() {
        let config = ProbeConfig {
            topic_id: "1-starts-with-digit".to_string(),
            ..ProbeConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_report_interval_rejected() {
        let mut config = ProbeConfig::default();
        config.report.interval_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_round_trips_through_json() {
        let config = ProbeConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: ProbeConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.endpoint, config.endpoint);
        assert_eq!(parsed.publish.count, config.publish.count);
    }
}
