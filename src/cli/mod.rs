//! CLI definitions.

pub mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use market_core::{AssetClass, Interval};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "market")]
#[command(author, version, about = "Multi-asset market snapshot and technical analysis")]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: PathBuf,

    /// Log level (defaults to logging.level from the configuration)
    #[arg(short, long)]
    pub log_level: Option<LogLevel>,

    /// Enable JSON log format
    #[arg(long)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

#[derive(Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Route a free-text query and analyse every matched asset
    Analyze(AnalyzeArgs),
    /// Build a single snapshot
    Snapshot(SnapshotArgs),
    /// Show which asset classes a query routes to
    Route(RouteArgs),
    /// Show the current bid/ask and spread
    Quote(QuoteArgs),
    /// Validate configuration
    ValidateConfig,
}

#[derive(clap::Args)]
pub struct AnalyzeArgs {
    /// Query text, e.g. "how are BTC and gold doing"
    #[arg(required = true, num_args = 1..)]
    pub query: Vec<String>,

    /// Output format (text, json)
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,
}

#[derive(clap::Args)]
pub struct SnapshotArgs {
    /// Asset class (crypto, fx, commodity)
    #[arg(short, long)]
    pub asset: AssetClass,

    /// Symbol (defaults to the asset class's configured symbol)
    #[arg(short, long)]
    pub symbol: Option<String>,

    /// Candle interval (overrides snapshot.interval)
    #[arg(short, long)]
    pub interval: Option<Interval>,

    /// Candles to request (overrides snapshot.limit)
    #[arg(long)]
    pub limit: Option<usize>,

    /// Output format (text, json)
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,
}

#[derive(clap::Args)]
pub struct RouteArgs {
    /// Query text
    #[arg(required = true, num_args = 1..)]
    pub query: Vec<String>,

    /// Output format (text, json)
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,
}

#[derive(clap::Args)]
pub struct QuoteArgs {
    /// Asset class (crypto, fx, commodity)
    #[arg(short, long)]
    pub asset: AssetClass,

    /// Symbol (defaults to the asset class's configured symbol)
    #[arg(short, long)]
    pub symbol: Option<String>,
}
