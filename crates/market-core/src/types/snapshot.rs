//! Indicator-enriched asset snapshot.

use serde::{Deserialize, Serialize};

/// Normalized view of one asset at query time.
///
/// Built fresh for every request from a candle window and never cached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Symbol or pair the snapshot describes
    pub symbol: String,
    /// Last close
    pub price: f64,
    /// EMA over the last 20 closes
    pub ema20: f64,
    /// EMA over the last 50 closes
    pub ema50: f64,
    /// RSI with a 14-step period
    pub rsi14: f64,
    /// Highest high over the last 20 candles
    pub high_recent: f64,
    /// Lowest low over the last 20 candles
    pub low_recent: f64,
}

impl Snapshot {
    /// Recent high-low range relative to price, or `None` for a non-positive price.
    pub fn range_ratio(&self) -> Option<f64> {
        if self.price > 0.0 {
            Some((self.high_recent - self.low_recent) / self.price)
        } else {
            None
        }
    }
}
