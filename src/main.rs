//! Market snapshot CLI application.

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use market_config::load_config;
use market_monitor::setup_logging;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli.config);

    // Logging settings fall back to the CLI when the configuration is unusable
    let logging = config.as_ref().ok().map(|c| c.logging.clone()).unwrap_or_default();
    let log_level = cli
        .log_level
        .map(|l| l.as_str().to_string())
        .unwrap_or(logging.level.clone());
    let _guard = setup_logging(
        &log_level,
        cli.json_logs || logging.is_json(),
        logging.file.as_deref(),
    );

    if let Commands::ValidateConfig = cli.command {
        return cli::commands::validate::run(&cli.config, config).await;
    }

    let config = config
        .with_context(|| format!("Failed to load configuration from {}", cli.config.display()))?;

    match cli.command {
        Commands::Analyze(args) => cli::commands::analyze::run(args, &config).await,
        Commands::Snapshot(args) => cli::commands::snapshot::run(args, &config).await,
        Commands::Route(args) => cli::commands::route::run(args, &config).await,
        Commands::Quote(args) => cli::commands::quote::run(args, &config).await,
        Commands::ValidateConfig => Ok(()),
    }
}
