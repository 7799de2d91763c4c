//! Route command implementation.

use anyhow::Result;
use market_config::AppConfig;

use super::context::build_router;
use crate::cli::{OutputFormat, RouteArgs};

pub async fn run(args: RouteArgs, config: &AppConfig) -> Result<()> {
    let query = args.query.join(" ");
    let decision = build_router(config).route(&query)?;

    match args.output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&decision)?),
        OutputFormat::Text => {
            for target in &decision.targets {
                println!("{:<10} {}", target.asset_class, target.symbol);
            }
        }
    }

    Ok(())
}
