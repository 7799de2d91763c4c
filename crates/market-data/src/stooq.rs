//! Stooq CSV adapter for commodities.

use async_trait::async_trait;
use csv::ReaderBuilder;
use market_core::{AssetClass, Candle, CandleSeries, HttpFetch, Interval, SeriesSource, UpstreamError};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use crate::check_response;
use crate::payload::{RawProviderPayload, TableRow};

const PROVIDER: &str = "stooq";

const REQUIRED_COLUMNS: [&str; 5] = ["date", "open", "high", "low", "close"];

/// Stooq connection settings.
#[derive(Debug, Clone)]
pub struct StooqConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for StooqConfig {
    fn default() -> Self {
        Self {
            base_url: "https://stooq.com".to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

/// CSV record format.
#[derive(Debug, Deserialize)]
struct CsvRecord {
    #[serde(alias = "Date", alias = "date")]
    date: String,
    #[serde(alias = "Open", alias = "open")]
    open: f64,
    #[serde(alias = "High", alias = "high")]
    high: f64,
    #[serde(alias = "Low", alias = "low")]
    low: f64,
    #[serde(alias = "Close", alias = "close")]
    close: f64,
}

/// Commodity series source backed by Stooq's CSV download endpoint.
pub struct StooqSource {
    config: StooqConfig,
    http: Arc<dyn HttpFetch>,
}

impl StooqSource {
    pub fn new(config: StooqConfig, http: Arc<dyn HttpFetch>) -> Self {
        Self { config, http }
    }

    fn url(&self) -> String {
        format!("{}/q/d/l/", self.config.base_url.trim_end_matches('/'))
    }

    fn interval_code(interval: Interval) -> Result<&'static str, UpstreamError> {
        match interval {
            Interval::Daily => Ok("d"),
            Interval::Weekly => Ok("w"),
            Interval::Monthly => Ok("m"),
            other => Err(UpstreamError::UnsupportedInterval {
                provider: PROVIDER.to_string(),
                interval: other.to_string(),
            }),
        }
    }

    /// Decode the CSV body into a table payload.
    fn decode(body: &str) -> Result<RawProviderPayload, UpstreamError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(body.as_bytes());

        let headers = reader
            .headers()
            .map_err(|e| UpstreamError::malformed(PROVIDER, e.to_string()))?
            .clone();
        let present: Vec<String> = headers.iter().map(|h| h.to_lowercase()).collect();

        // Unknown symbols come back as a bare "No data" line instead of a header.
        if let Some(missing) = REQUIRED_COLUMNS
            .iter()
            .find(|col| !present.iter().any(|h| h == *col))
        {
            return Err(UpstreamError::MissingKey {
                provider: PROVIDER.to_string(),
                key: missing.to_string(),
                detail: Some(body.lines().next().unwrap_or_default().trim().to_string()),
            });
        }

        let mut rows = Vec::new();
        for result in reader.deserialize() {
            let record: CsvRecord =
                result.map_err(|e| UpstreamError::malformed(PROVIDER, e.to_string()))?;
            rows.push(TableRow {
                date: record.date,
                open: record.open,
                high: record.high,
                low: record.low,
                close: record.close,
            });
        }

        Ok(RawProviderPayload::Table(rows))
    }
}

#[async_trait]
impl SeriesSource for StooqSource {
    async fn fetch_candles(
        &self,
        symbol: &str,
        interval: Interval,
        limit: usize,
    ) -> Result<Vec<Candle>, UpstreamError> {
        let code = Self::interval_code(interval)?;
        let symbol = symbol.to_lowercase();
        let params = [("s", symbol.clone()), ("i", code.to_string())];
        debug!("Fetching {} {} rows for {}", limit, interval, symbol);

        let response = self
            .http
            .get(&self.url(), &params, self.config.timeout)
            .await
            .map_err(|e| UpstreamError::from_transport(PROVIDER, e))?;
        let body = check_response(PROVIDER, response)?;

        let candles = Self::decode(&body)?.into_candles(PROVIDER)?;
        let series = CandleSeries::from_unordered(symbol.to_uppercase(), candles, limit);
        debug!("Received {} rows for {}", series.len(), symbol);
        Ok(series.into_candles())
    }

    fn asset_class(&self) -> AssetClass {
        AssetClass::Commodity
    }

    fn name(&self) -> &str {
        PROVIDER
    }
}
