//! Wiring from configuration to sources, handlers and the dispatcher.

use anyhow::{Context, Result};
use market_analysis::{AssetHandler, Dispatcher, Router, SnapshotBuilder, SnapshotSettings};
use market_config::{resolve_api_key, AppConfig};
use market_core::{AssetClass, HttpFetch, SeriesSource};
use market_data::{
    AlphaVantageConfig, AlphaVantageSource, BinanceConfig, BinanceSource, ReqwestFetch,
    StooqConfig, StooqSource,
};
use std::sync::Arc;
use tracing::warn;

/// Shared transport for every provider.
pub fn transport() -> Result<Arc<dyn HttpFetch>> {
    let fetch = ReqwestFetch::new().context("Failed to create HTTP client")?;
    Ok(Arc::new(fetch))
}

/// Snapshot window from the configuration.
pub fn snapshot_settings(config: &AppConfig) -> SnapshotSettings {
    SnapshotSettings {
        interval: config.snapshot.interval,
        limit: config.snapshot.limit,
    }
}

/// Series source for one asset class.
pub fn build_source(
    config: &AppConfig,
    asset_class: AssetClass,
    http: Arc<dyn HttpFetch>,
) -> Result<Arc<dyn SeriesSource>> {
    let provider = config.provider(asset_class);
    let timeout = config.http.timeout();

    let source: Arc<dyn SeriesSource> = match asset_class {
        AssetClass::Crypto => Arc::new(BinanceSource::new(
            BinanceConfig {
                base_url: provider.base_url.clone(),
                timeout,
            },
            http,
        )),
        AssetClass::Fx => {
            let api_key = resolve_api_key(config, asset_class)?.unwrap_or_default();
            Arc::new(AlphaVantageSource::new(
                AlphaVantageConfig {
                    base_url: provider.base_url.clone(),
                    api_key,
                    timeout,
                },
                http,
            ))
        }
        AssetClass::Commodity => Arc::new(StooqSource::new(
            StooqConfig {
                base_url: provider.base_url.clone(),
                timeout,
            },
            http,
        )),
    };
    Ok(source)
}

/// Handler for one asset class.
pub fn build_handler(
    config: &AppConfig,
    asset_class: AssetClass,
    settings: SnapshotSettings,
    http: Arc<dyn HttpFetch>,
) -> Result<AssetHandler> {
    let provider = config.provider(asset_class);
    let source = build_source(config, asset_class, http)?;
    Ok(
        AssetHandler::new(SnapshotBuilder::new(source, settings), provider.default_symbol.clone())
            .with_quotes(provider.quotes),
    )
}

/// Dispatcher with a handler for every asset class that can be configured.
///
/// A class whose provider cannot be set up (e.g. a missing API key) is left
/// unregistered; queries routed to it report the failure for that asset only.
pub fn build_dispatcher(config: &AppConfig) -> Result<Dispatcher> {
    let http = transport()?;
    let settings = snapshot_settings(config);
    let mut dispatcher = Dispatcher::new();

    for asset_class in AssetClass::all() {
        match build_handler(config, *asset_class, settings, http.clone()) {
            Ok(handler) => dispatcher.register(handler),
            Err(e) => warn!("{} provider disabled: {:#}", asset_class, e),
        }
    }

    Ok(dispatcher)
}

/// Router using the configured default symbols.
pub fn build_router(config: &AppConfig) -> Router {
    Router::new(
        AssetClass::all()
            .iter()
            .map(|a| (*a, config.provider(*a).default_symbol.clone())),
    )
}
