// CLI module for pubsub-probe
/// Command execution handlers
pub mod commands;
/// Output formatting utilities
pub mod output;

use clap::{Args, Parser, Subcommand};

/// Command-line interface for pubsub-probe
#[derive(Parser)]
#[command(name = "pubsub-probe")]
#[command(
    author,
    version,
    about = "Pub/Sub emulator smoke-test: provision, publish, pull, count",
    long_about = None
)]
pub struct Cli {
    /// The command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Provision the topic and subscription, publish the batch, then pull and
    /// count deliveries until interrupted
    Run {
        /// Target emulator and resource identities
        #[command(flatten)]
        target: TargetArgs,

        /// Publish batch options
        #[command(flatten)]
        publish: PublishArgs,

        /// Reporting options
        #[command(flatten)]
        report: ReportArgs,
    },

    /// Provision the topic and publish the batch, without consuming
    Publish {
        /// Target emulator and resource identities
        #[command(flatten)]
        target: TargetArgs,

        /// Publish batch options
        #[command(flatten)]
        publish: PublishArgs,
    },

    /// Provision both resources, then pull and count until interrupted
    Subscribe {
        /// Target emulator and resource identities
        #[command(flatten)]
        target: TargetArgs,

        /// Reporting options
        #[command(flatten)]
        report: ReportArgs,
    },

    /// Show the effective configuration
    Config {
        /// Target emulator and resource identities
        #[command(flatten)]
        target: TargetArgs,

        /// Publish batch options
        #[command(flatten)]
        publish: PublishArgs,

        /// Reporting options
        #[command(flatten)]
        report: ReportArgs,
    },
}

/// Emulator endpoint and resource identity flags
#[derive(Args)]
pub struct TargetArgs {
    /// Emulator endpoint (host:port, plaintext)
    #[arg(long, env = "PUBSUB_EMULATOR_HOST", default_value = "localhost:8085")]
    pub endpoint: String,

    /// GCP project ID
    #[arg(long, env = "PUBSUB_PROBE_PROJECT", default_value = "local-dev")]
    pub project: String,

    /// Topic ID
    #[arg(long, env = "PUBSUB_PROBE_TOPIC", default_value = "test-topic")]
    pub topic: String,

    /// Subscription ID
    #[arg(long, env = "PUBSUB_PROBE_SUBSCRIPTION", default_value = "test-sub")]
    pub subscription: String,
}

/// Publish batch flags
#[derive(Args)]
pub struct PublishArgs {
    /// Number of messages to publish
    #[arg(long, env = "PUBSUB_PROBE_COUNT", default_value_t = 500)]
    pub count: u32,

    /// Message payload, published verbatim for every message
    #[arg(long, env = "PUBSUB_PROBE_PAYLOAD", default_value = "Hello World!")]
    pub payload: String,
}

/// Reporting flags
#[derive(Args)]
pub struct ReportArgs {
    /// Seconds between received-message count reports
    #[arg(long, env = "PUBSUB_PROBE_REPORT_INTERVAL", default_value_t = 10)]
    pub report_interval: u64,
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_run_defaults_match_demo_constants() {
        let cli = Cli::try_parse_from(["pubsub-probe", "run"]).unwrap();
        match cli.command {
            Commands::Run {
                target,
                publish,
                report,
            } => {
                assert_eq!(target.endpoint, "localhost:8085");
                assert_eq!(target.project, "local-dev");
                assert_eq!(target.topic, "test-topic");
                assert_eq!(target.subscription, "test-sub");
                assert_eq!(publish.count, 500);
                assert_eq!(publish.payload, "Hello World!");
                assert_eq!(report.report_interval, 10);
            }
            _ => panic!("Expected Run command"),
        }
    }

    #[test]
    fn test_publish_flag_overrides() {
        let cli = Cli::try_parse_from([
            "pubsub-probe",
            "publish",
            "--count",
            "7",
            "--payload",
            "ping",
        ])
        .unwrap();
        match cli.command {
            Commands::Publish { publish, .. } => {
                assert_eq!(publish.count, 7);
                assert_eq!(publish.payload, "ping");
            }
            _ => panic!("Expected Publish command"),
        }
    }
}
