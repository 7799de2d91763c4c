//! Analyze command implementation.

use anyhow::Result;
use market_analysis::MarketReport;
use market_config::AppConfig;
use tracing::info;

use super::context::{build_dispatcher, build_router};
use crate::cli::{AnalyzeArgs, OutputFormat};

pub async fn run(args: AnalyzeArgs, config: &AppConfig) -> Result<()> {
    let query = args.query.join(" ");
    info!("Analyzing query: {:?}", query);

    let router = build_router(config);
    let dispatcher = build_dispatcher(config)?;
    let outcomes = dispatcher.analyze_query(&router, &query).await?;
    let report = MarketReport::from_outcomes(query, outcomes);

    match args.output {
        OutputFormat::Json => println!("{}", report.to_json()?),
        OutputFormat::Text => println!("{}", report.summary()),
    }

    if report.failures() == report.assets.len() {
        anyhow::bail!("No asset could be analyzed");
    }

    Ok(())
}
