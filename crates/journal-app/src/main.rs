//! Trading journal service - Entry Point

use anyhow::Result;
use clap::Parser;
use tracing::info;

/// Trading journal session and rate-limit service
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration file path (can also be set via JOURNAL_CONFIG env var)
    #[arg(short, long)]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Before config loading, so config fallbacks are logged
    journal_telemetry::init_logging()?;
    info!("Starting trading journal v{}", env!("CARGO_PKG_VERSION"));

    let config_path = journal_app::AppConfig::resolve_path(args.config);
    let config = journal_app::AppConfig::load(&config_path)?;
    info!(config_path = %config_path, port = config.server.port, "Configuration loaded");

    let app = journal_app::Application::new(config)?;
    app.run().await?;

    Ok(())
}
