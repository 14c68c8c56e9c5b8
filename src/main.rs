use clap::Parser;
use notify_sdk::cli::{Cli, execute_command, init_logging, load_settings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = load_settings(&cli)?;
    init_logging(&settings)?;

    tracing::debug!(
        version = notify_sdk::pkg_version(),
        endpoint = %settings.notification.endpoint,
        "Configuration loaded"
    );

    execute_command(&cli, settings).await?;
    Ok(())
}
