// Commands module
/// Publish command implementation
pub mod publish;
/// Run command implementation
pub mod run;
/// Subscribe command implementation
pub mod subscribe;

use crate::cli::{output, Commands, PublishArgs, ReportArgs, TargetArgs};
use crate::config::ProbeConfig;

/// Build the effective configuration from CLI arguments.
fn build_config(
    target: TargetArgs,
    publish: Option<PublishArgs>,
    report: Option<ReportArgs>,
) -> ProbeConfig {
    let mut config = ProbeConfig::default();

    config.endpoint = target.endpoint;
    config.project_id = target.project;
    config.topic_id = target.topic;
    config.subscription_id = target.subscription;

    if let Some(publish) = publish {
        config.publish.count = publish.count;
        config.publish.payload = publish.payload;
    }
    if let Some(report) = report {
        config.report.interval_secs = report.report_interval;
    }

    config
}

/// Execute a CLI command
pub async fn execute_command(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Run {
            target,
            publish,
            report,
        } => run::execute(build_config(target, Some(publish), Some(report))).await,
        Commands::Publish { target, publish } => {
            publish::execute(build_config(target, Some(publish), None)).await
        }
        Commands::Subscribe { target, report } => {
            subscribe::execute(build_config(target, None, Some(report))).await
        }
        Commands::Config {
            target,
            publish,
            report,
        } => {
            let config = build_config(target, Some(publish), Some(report));
            config.validate()?;
            output::print_json(&config)
        }
    }
}
