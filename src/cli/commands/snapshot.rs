//! Snapshot command implementation.

use anyhow::{Context, Result};
use market_analysis::{classify, SnapshotSettings};
use market_config::AppConfig;
use market_core::AssetClass;
use serde_json::json;

use super::context::{build_handler, snapshot_settings, transport};
use crate::cli::{OutputFormat, SnapshotArgs};

pub async fn run(args: SnapshotArgs, config: &AppConfig) -> Result<()> {
    let defaults = snapshot_settings(config);
    let settings = SnapshotSettings {
        interval: args.interval.unwrap_or(defaults.interval),
        limit: args.limit.unwrap_or(defaults.limit),
    };

    let handler = build_handler(config, args.asset, settings, transport()?)?;
    let symbol = args
        .symbol
        .unwrap_or_else(|| handler.default_symbol().to_string());

    let snapshot = handler
        .builder()
        .build(&symbol)
        .await
        .with_context(|| format!("Failed to build {} snapshot for {}", args.asset, symbol))?;
    let classification = classify(&snapshot);

    match args.output {
        OutputFormat::Json => {
            let value = json!({
                "asset_class": args.asset,
                "interval": settings.interval,
                "snapshot": snapshot,
                "classification": classification,
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        OutputFormat::Text => {
            let decimals = if args.asset == AssetClass::Fx { 5 } else { 2 };
            println!("{} ({}, {} candles of {})", snapshot.symbol, args.asset, settings.limit, settings.interval);
            println!("  Price:       {:.*}", decimals, snapshot.price);
            println!("  EMA20:       {:.*}", decimals, snapshot.ema20);
            println!("  EMA50:       {:.*}", decimals, snapshot.ema50);
            println!("  RSI14:       {:.2}", snapshot.rsi14);
            println!("  High (20):   {:.*}", decimals, snapshot.high_recent);
            println!("  Low (20):    {:.*}", decimals, snapshot.low_recent);
            println!("  Trend:       {}", classification.trend);
            println!("  Volatility:  {}", classification.volatility);
            println!("  Bias:        {}", classification.bias);
        }
    }

    Ok(())
}
