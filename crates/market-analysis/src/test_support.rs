//! In-memory sources and transports for pipeline tests.

use async_trait::async_trait;
use market_core::{
    AssetClass, Candle, HttpFetch, HttpResponse, Interval, Quote, SeriesSource, TransportError,
    UpstreamError,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// `n` daily candles with closes 100, 101, ... and a one-point wick each side.
pub(crate) fn rising_candles(n: usize) -> Vec<Candle> {
    (0..n)
        .map(|i| {
            let close = 100.0 + i as f64;
            Candle::new(i as i64 * 86_400_000, close, close + 1.0, close - 1.0, close)
        })
        .collect()
}

/// `n` candles with closes falling from 200.
pub(crate) fn falling_candles(n: usize) -> Vec<Candle> {
    (0..n)
        .map(|i| {
            let close = 200.0 - i as f64;
            Candle::new(i as i64 * 86_400_000, close, close + 1.0, close - 1.0, close)
        })
        .collect()
}

/// Series source returning a fixed result and recording every request.
pub(crate) struct FixedSource {
    asset_class: AssetClass,
    candles: Result<Vec<Candle>, UpstreamError>,
    quote: Result<Option<Quote>, UpstreamError>,
    requests: Mutex<Vec<(String, Interval, usize)>>,
    quote_requests: AtomicUsize,
    delay: Duration,
}

impl FixedSource {
    pub fn ok(asset_class: AssetClass, candles: Vec<Candle>) -> Self {
        Self::with_result(asset_class, Ok(candles))
    }

    pub fn failing(asset_class: AssetClass, err: UpstreamError) -> Self {
        Self::with_result(asset_class, Err(err))
    }

    fn with_result(asset_class: AssetClass, candles: Result<Vec<Candle>, UpstreamError>) -> Self {
        Self {
            asset_class,
            candles,
            quote: Ok(None),
            requests: Mutex::new(Vec::new()),
            quote_requests: AtomicUsize::new(0),
            delay: Duration::ZERO,
        }
    }

    pub fn with_quote(mut self, quote: Result<Option<Quote>, UpstreamError>) -> Self {
        self.quote = quote;
        self
    }

    /// Sleep for `delay` before answering a candle request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn requests(&self) -> Vec<(String, Interval, usize)> {
        self.requests.lock().unwrap().clone()
    }

    pub fn quote_requests(&self) -> usize {
        self.quote_requests.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SeriesSource for FixedSource {
    async fn fetch_candles(
        &self,
        symbol: &str,
        interval: Interval,
        limit: usize,
    ) -> Result<Vec<Candle>, UpstreamError> {
        self.requests
            .lock()
            .unwrap()
            .push((symbol.to_string(), interval, limit));
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.candles.clone()
    }

    async fn fetch_quote(&self, _symbol: &str) -> Result<Option<Quote>, UpstreamError> {
        self.quote_requests.fetch_add(1, Ordering::SeqCst);
        self.quote.clone()
    }

    fn asset_class(&self) -> AssetClass {
        self.asset_class
    }

    fn name(&self) -> &str {
        "fixed"
    }
}

/// Transport answering every request with the same response.
pub(crate) struct CountingFetch {
    response: HttpResponse,
    count: AtomicUsize,
}

impl CountingFetch {
    pub fn new(status: u16, body: &str) -> Self {
        Self {
            response: HttpResponse::new(status, body),
            count: AtomicUsize::new(0),
        }
    }

    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl HttpFetch for CountingFetch {
    async fn get(
        &self,
        _url: &str,
        _params: &[(&str, String)],
        _timeout: Duration,
    ) -> Result<HttpResponse, TransportError> {
        self.count.fetch_add(1, Ordering::SeqCst);
        Ok(self.response.clone())
    }
}
