//! Validate configuration command.

use anyhow::Result;
use market_analysis::EMA_SLOW;
use market_config::{resolve_api_key, AppConfig, SettingsError};
use market_core::AssetClass;
use std::path::Path;

pub async fn run(config_path: &Path, loaded: Result<AppConfig, SettingsError>) -> Result<()> {
    println!("Validating configuration: {:?}", config_path);

    let config = match loaded {
        Ok(config) => config,
        Err(e) => {
            println!("Configuration error: {}", e);
            return Err(e.into());
        }
    };

    println!("Configuration is valid!");
    println!();
    println!("App: {}", config.app.name);
    println!("Environment: {}", config.app.environment);
    println!("Log level: {}", config.logging.level);
    println!("HTTP timeout: {}s", config.http.timeout_secs);
    println!(
        "Snapshot window: {} candles of {}",
        config.snapshot.limit, config.snapshot.interval
    );
    if config.snapshot.limit < EMA_SLOW {
        println!(
            "Warning: snapshot.limit below {} always yields insufficient data",
            EMA_SLOW
        );
    }

    for asset_class in AssetClass::all() {
        let provider = config.provider(*asset_class);
        let key = match resolve_api_key(&config, *asset_class) {
            Ok(Some(_)) => "api key set".to_string(),
            Ok(None) => "no api key needed".to_string(),
            Err(e) => format!("WARNING: {}", e),
        };
        println!(
            "{}: {} (default {}, {})",
            asset_class, provider.base_url, provider.default_symbol, key
        );
    }

    println!();
    println!("Effective configuration:");
    print!("{}", config.to_toml()?);

    Ok(())
}
