use pubsub_probe::cli::{commands, Cli};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .init();

    // Parse CLI arguments
    let cli = Cli::parse_args();

    // Execute the command
    commands::execute_command(cli.command).await?;

    Ok(())
}
