//! Quote command implementation.

use anyhow::{Context, Result};
use market_config::AppConfig;

use super::context::{build_source, transport};
use crate::cli::QuoteArgs;

pub async fn run(args: QuoteArgs, config: &AppConfig) -> Result<()> {
    let symbol = args
        .symbol
        .unwrap_or_else(|| config.provider(args.asset).default_symbol.clone());
    let source = build_source(config, args.asset, transport()?)?;

    let quote = source
        .fetch_quote(&symbol)
        .await
        .with_context(|| format!("Failed to fetch quote for {}", symbol))?;

    match quote {
        Some(quote) => {
            let pips = quote.spread_in_pips(args.asset.pip_size(&symbol));
            println!("Symbol: {}", quote.symbol);
            println!("Bid:    {}", quote.bid);
            println!("Ask:    {}", quote.ask);
            println!("Spread: {:.1} pips", pips);
        }
        None => println!("{} does not provide quotes for {}", source.name(), symbol),
    }

    Ok(())
}
