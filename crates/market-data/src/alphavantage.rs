//! Alpha Vantage FX adapter.

use async_trait::async_trait;
use market_core::{
    AssetClass, Candle, CandleSeries, HttpFetch, Interval, Quote, SeriesSource, UpstreamError,
};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::check_response;
use crate::payload::{parse_timestamp, RawProviderPayload};

const PROVIDER: &str = "alphavantage";

/// Rows returned by `outputsize=compact`.
const COMPACT_ROWS: usize = 100;

/// Keys Alpha Vantage uses to report failures inside a 200 response.
const NOTICE_KEYS: [&str; 3] = ["Error Message", "Note", "Information"];

const RATE_KEY: &str = "Realtime Currency Exchange Rate";

/// Alpha Vantage connection settings. The API key is resolved by the caller.
#[derive(Debug, Clone)]
pub struct AlphaVantageConfig {
    pub base_url: String,
    pub api_key: String,
    pub timeout: Duration,
}

impl AlphaVantageConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: "https://www.alphavantage.co".to_string(),
            api_key: api_key.into(),
            timeout: Duration::from_secs(10),
        }
    }
}

/// FX series source backed by Alpha Vantage.
pub struct AlphaVantageSource {
    config: AlphaVantageConfig,
    http: Arc<dyn HttpFetch>,
}

impl AlphaVantageSource {
    pub fn new(config: AlphaVantageConfig, http: Arc<dyn HttpFetch>) -> Self {
        Self { config, http }
    }

    fn url(&self) -> String {
        format!("{}/query", self.config.base_url.trim_end_matches('/'))
    }

    /// Query function and response key for an interval.
    fn series_function(interval: Interval) -> Result<(&'static str, &'static str), UpstreamError> {
        match interval {
            Interval::Daily => Ok(("FX_DAILY", "Time Series FX (Daily)")),
            Interval::Weekly => Ok(("FX_WEEKLY", "Time Series FX (Weekly)")),
            Interval::Monthly => Ok(("FX_MONTHLY", "Time Series FX (Monthly)")),
            other => Err(UpstreamError::UnsupportedInterval {
                provider: PROVIDER.to_string(),
                interval: other.to_string(),
            }),
        }
    }

    /// Split `EUR/USD`, `EURUSD` or `eur-usd` into base and quote currency.
    /// Surrounding whitespace is ignored.
    fn split_pair(symbol: &str) -> Result<(String, String), UpstreamError> {
        let trimmed = symbol.trim();
        let letters: String = trimmed
            .chars()
            .filter(|c| c.is_ascii_alphabetic())
            .collect::<String>()
            .to_uppercase();
        let separators = trimmed.chars().filter(|c| !c.is_ascii_alphabetic()).count();

        if letters.len() == 6 && separators <= 1 {
            let (base, quote) = letters.split_at(3);
            Ok((base.to_string(), quote.to_string()))
        } else {
            Err(UpstreamError::InvalidSymbol {
                provider: PROVIDER.to_string(),
                symbol: symbol.to_string(),
            })
        }
    }

    /// Pull the object under `key`, turning provider notices into `MissingKey` detail.
    fn take_object(body: &str, key: &str) -> Result<Map<String, Value>, UpstreamError> {
        let value: Value = serde_json::from_str(body)
            .map_err(|e| UpstreamError::malformed(PROVIDER, e.to_string()))?;
        let Value::Object(mut root) = value else {
            return Err(UpstreamError::malformed(PROVIDER, "expected a JSON object"));
        };

        match root.remove(key) {
            Some(Value::Object(inner)) => Ok(inner),
            Some(other) => Err(UpstreamError::malformed(
                PROVIDER,
                format!("`{}` is not an object: {}", key, other),
            )),
            None => {
                let detail = NOTICE_KEYS
                    .iter()
                    .find_map(|k| root.get(*k).and_then(Value::as_str))
                    .map(str::to_string);
                if let Some(notice) = &detail {
                    warn!("Alpha Vantage notice: {}", notice);
                }
                Err(UpstreamError::MissingKey {
                    provider: PROVIDER.to_string(),
                    key: key.to_string(),
                    detail,
                })
            }
        }
    }

    fn decode(body: &str, key: &str) -> Result<RawProviderPayload, UpstreamError> {
        let series = Self::take_object(body, key)?;
        let entries: BTreeMap<String, HashMap<String, String>> =
            serde_json::from_value(Value::Object(series))
                .map_err(|e| UpstreamError::malformed(PROVIDER, e.to_string()))?;
        Ok(RawProviderPayload::KeyedSeries(entries))
    }
}

#[async_trait]
impl SeriesSource for AlphaVantageSource {
    async fn fetch_candles(
        &self,
        symbol: &str,
        interval: Interval,
        limit: usize,
    ) -> Result<Vec<Candle>, UpstreamError> {
        let (function, series_key) = Self::series_function(interval)?;
        let (from, to) = Self::split_pair(symbol)?;
        let output_size = if limit > COMPACT_ROWS { "full" } else { "compact" };

        let params = [
            ("function", function.to_string()),
            ("from_symbol", from.clone()),
            ("to_symbol", to.clone()),
            ("outputsize", output_size.to_string()),
            ("apikey", self.config.api_key.clone()),
        ];
        debug!("Fetching {} {} for {}/{}", limit, function, from, to);

        let response = self
            .http
            .get(&self.url(), &params, self.config.timeout)
            .await
            .map_err(|e| UpstreamError::from_transport(PROVIDER, e))?;
        let body = check_response(PROVIDER, response)?;

        let candles = Self::decode(&body, series_key)?.into_candles(PROVIDER)?;
        let series = CandleSeries::from_unordered(format!("{}{}", from, to), candles, limit);
        debug!("Received {} candles for {}/{}", series.len(), from, to);
        Ok(series.into_candles())
    }

    async fn fetch_quote(&self, symbol: &str) -> Result<Option<Quote>, UpstreamError> {
        let (from, to) = Self::split_pair(symbol)?;
        let params = [
            ("function", "CURRENCY_EXCHANGE_RATE".to_string()),
            ("from_currency", from.clone()),
            ("to_currency", to.clone()),
            ("apikey", self.config.api_key.clone()),
        ];

        let response = self
            .http
            .get(&self.url(), &params, self.config.timeout)
            .await
            .map_err(|e| UpstreamError::from_transport(PROVIDER, e))?;
        let body = check_response(PROVIDER, response)?;
        let rate = Self::take_object(&body, RATE_KEY)?;

        let price = |key: &str| {
            rate.get(key)
                .and_then(Value::as_str)
                .and_then(|s| s.trim().parse::<f64>().ok())
        };
        // Bid/ask are reported as "-" outside market hours.
        let (Some(bid), Some(ask)) = (price("8. Bid Price"), price("9. Ask Price")) else {
            return Ok(None);
        };

        let mut quote = Quote::new(format!("{}{}", from, to), bid, ask);
        quote.timestamp = rate
            .get("6. Last Refreshed")
            .and_then(Value::as_str)
            .and_then(|s| parse_timestamp(PROVIDER, s).ok());
        Ok(Some(quote))
    }

    fn asset_class(&self) -> AssetClass {
        AssetClass::Fx
    }

    fn name(&self) -> &str {
        PROVIDER
    }
}
