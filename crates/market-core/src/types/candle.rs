//! OHLC candle types.

use serde::{Deserialize, Serialize};

/// One OHLC observation for a fixed interval.
///
/// Provider data is untrusted: `high >= max(open, close)` and `low <= min(open, close)`
/// are expected but never checked or corrected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    /// Unix timestamp in milliseconds (interval open time)
    pub timestamp: i64,
    /// Opening price
    pub open: f64,
    /// Highest price
    pub high: f64,
    /// Lowest price
    pub low: f64,
    /// Closing price
    pub close: f64,
}

impl Candle {
    /// Create a new candle.
    pub fn new(timestamp: i64, open: f64, high: f64, low: f64, close: f64) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
        }
    }
}

/// Immutable, oldest-first window of candles for one symbol.
#[derive(Debug, Clone, PartialEq)]
pub struct CandleSeries {
    symbol: String,
    candles: Vec<Candle>,
}

impl CandleSeries {
    /// Build a series from candles already in chronological order.
    pub fn new(symbol: impl Into<String>, candles: Vec<Candle>) -> Self {
        Self {
            symbol: symbol.into(),
            candles,
        }
    }

    /// Sort by timestamp and keep only the `limit` most recent candles.
    pub fn from_unordered(symbol: impl Into<String>, mut candles: Vec<Candle>, limit: usize) -> Self {
        candles.sort_by_key(|c| c.timestamp);
        let start = candles.len().saturating_sub(limit);
        candles.drain(..start);
        Self::new(symbol, candles)
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.candles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    /// Get the last N candles (fewer if the series is shorter).
    pub fn last_n(&self, n: usize) -> &[Candle] {
        let start = self.candles.len().saturating_sub(n);
        &self.candles[start..]
    }

    /// Extract close prices as a vector.
    pub fn closes(&self) -> Vec<f64> {
        self.candles.iter().map(|c| c.close).collect()
    }

    pub fn into_candles(self) -> Vec<Candle> {
        self.candles
    }
}
