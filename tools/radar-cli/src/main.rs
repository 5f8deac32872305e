//! Receiving Radar CLI
//!
//! Loads the Next Gen receiving stats file and runs one comparison,
//! leaderboard or listing per invocation.

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;

use radar_cli::{initialize_logging_with_config, load_config, Cli, CliHandler};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Parse CLI arguments
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref()).context("Failed to load configuration")?;
    initialize_logging_with_config(&config.logging.level, &config.logging.format)?;
    debug!("Configuration loaded: {:?}", config);

    let data_path = cli.data.clone().unwrap_or_else(|| config.data.path.clone());
    let handler = CliHandler::load(&data_path, config).await?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    handler.handle_command(cli.command, &mut out)
}
