//! Binance spot klines adapter for crypto pairs.

use async_trait::async_trait;
use market_core::{
    AssetClass, Candle, CandleSeries, HttpFetch, Interval, Quote, SeriesSource, UpstreamError,
};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use crate::check_response;
use crate::payload::RawProviderPayload;

const PROVIDER: &str = "binance";

/// Largest `limit` the klines endpoint accepts.
const MAX_KLINES: usize = 1000;

/// Binance connection settings.
#[derive(Debug, Clone)]
pub struct BinanceConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for BinanceConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.binance.com".to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BookTicker {
    symbol: String,
    bid_price: String,
    ask_price: String,
}

/// Crypto series source backed by Binance spot market data.
pub struct BinanceSource {
    config: BinanceConfig,
    http: Arc<dyn HttpFetch>,
}

impl BinanceSource {
    pub fn new(config: BinanceConfig, http: Arc<dyn HttpFetch>) -> Self {
        Self { config, http }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// Decode the klines body into a payload.
    fn decode(body: &str) -> Result<RawProviderPayload, UpstreamError> {
        let value: Value = serde_json::from_str(body)
            .map_err(|e| UpstreamError::malformed(PROVIDER, e.to_string()))?;

        match value {
            Value::Array(rows) => rows
                .into_iter()
                .enumerate()
                .map(|(i, row)| match row {
                    Value::Array(fields) => Ok(fields),
                    other => Err(UpstreamError::malformed(
                        PROVIDER,
                        format!("kline {} is not an array: {}", i, other),
                    )),
                })
                .collect::<Result<Vec<_>, _>>()
                .map(RawProviderPayload::Klines),
            // Error bodies look like {"code": -1121, "msg": "Invalid symbol."}
            Value::Object(map) => Err(UpstreamError::MissingKey {
                provider: PROVIDER.to_string(),
                key: "klines".to_string(),
                detail: map.get("msg").and_then(Value::as_str).map(str::to_string),
            }),
            other => Err(UpstreamError::malformed(
                PROVIDER,
                format!("expected an array of klines, got {}", other),
            )),
        }
    }
}

fn parse_price(field: &str, raw: &str) -> Result<f64, UpstreamError> {
    raw.trim()
        .parse()
        .map_err(|_| UpstreamError::malformed(PROVIDER, format!("{} is not numeric: {:?}", field, raw)))
}

#[async_trait]
impl SeriesSource for BinanceSource {
    async fn fetch_candles(
        &self,
        symbol: &str,
        interval: Interval,
        limit: usize,
    ) -> Result<Vec<Candle>, UpstreamError> {
        let symbol = symbol.to_uppercase();
        let params = [
            ("symbol", symbol.clone()),
            ("interval", interval.to_string()),
            ("limit", limit.min(MAX_KLINES).to_string()),
        ];
        debug!("Fetching {} {} klines for {}", limit, interval, symbol);

        let response = self
            .http
            .get(&self.url("/api/v3/klines"), &params, self.config.timeout)
            .await
            .map_err(|e| UpstreamError::from_transport(PROVIDER, e))?;
        let body = check_response(PROVIDER, response)?;

        let candles = Self::decode(&body)?.into_candles(PROVIDER)?;
        let series = CandleSeries::from_unordered(symbol.as_str(), candles, limit);
        debug!("Received {} klines for {}", series.len(), symbol);
        Ok(series.into_candles())
    }

    async fn fetch_quote(&self, symbol: &str) -> Result<Option<Quote>, UpstreamError> {
        let params = [("symbol", symbol.to_uppercase())];
        let response = self
            .http
            .get(&self.url("/api/v3/ticker/bookTicker"), &params, self.config.timeout)
            .await
            .map_err(|e| UpstreamError::from_transport(PROVIDER, e))?;
        let body = check_response(PROVIDER, response)?;

        let ticker: BookTicker = serde_json::from_str(&body)
            .map_err(|e| UpstreamError::malformed(PROVIDER, e.to_string()))?;
        let bid = parse_price("bidPrice", &ticker.bid_price)?;
        let ask = parse_price("askPrice", &ticker.ask_price)?;

        Ok(Some(Quote::new(ticker.symbol, bid, ask)))
    }

    fn asset_class(&self) -> AssetClass {
        AssetClass::Crypto
    }

    fn name(&self) -> &str {
        PROVIDER
    }
}
