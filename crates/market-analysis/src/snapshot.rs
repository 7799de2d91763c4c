//! Snapshot building from a series source.

use market_core::{CandleSeries, IndicatorError, Interval, SeriesSource, Snapshot, SnapshotError};
use market_indicators::{calculate_ema, calculate_rsi, DEFAULT_RSI_PERIOD};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// Fast EMA period.
pub const EMA_FAST: usize = 20;
/// Slow EMA period; also the minimum number of candles a snapshot needs.
pub const EMA_SLOW: usize = 50;
/// Candles considered for the recent high/low.
pub const RECENT_WINDOW: usize = 20;

/// Candle request used for every snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotSettings {
    pub interval: Interval,
    pub limit: usize,
}

impl Default for SnapshotSettings {
    fn default() -> Self {
        Self {
            interval: Interval::Daily,
            limit: 100,
        }
    }
}

/// Compute a snapshot from a series ordered oldest-first.
///
/// # Errors
/// `InsufficientData` when the series holds fewer than [`EMA_SLOW`] candles.
pub fn snapshot_from_series(series: &CandleSeries) -> Result<Snapshot, IndicatorError> {
    if series.len() < EMA_SLOW {
        return Err(IndicatorError::InsufficientData {
            required: EMA_SLOW,
            available: series.len(),
        });
    }

    let closes = series.closes();
    let n = closes.len();

    let ema20 = calculate_ema(&closes[n - EMA_FAST..], EMA_FAST)?;
    let ema50 = calculate_ema(&closes[n - EMA_SLOW..], EMA_SLOW)?;
    let rsi14 = calculate_rsi(&closes, DEFAULT_RSI_PERIOD)?;

    let recent = series.last_n(RECENT_WINDOW);
    let high_recent = recent.iter().map(|c| c.high).fold(f64::NEG_INFINITY, f64::max);
    let low_recent = recent.iter().map(|c| c.low).fold(f64::INFINITY, f64::min);

    Ok(Snapshot {
        symbol: series.symbol().to_string(),
        price: closes[n - 1],
        ema20,
        ema50,
        rsi14,
        high_recent,
        low_recent,
    })
}

/// Builds snapshots for one asset class from its series source.
#[derive(Clone)]
pub struct SnapshotBuilder {
    source: Arc<dyn SeriesSource>,
    settings: SnapshotSettings,
}

impl SnapshotBuilder {
    pub fn new(source: Arc<dyn SeriesSource>, settings: SnapshotSettings) -> Self {
        Self { source, settings }
    }

    pub fn source(&self) -> &Arc<dyn SeriesSource> {
        &self.source
    }

    pub fn settings(&self) -> SnapshotSettings {
        self.settings
    }

    /// Fetch candles once and compute the snapshot. No retry.
    pub async fn build(&self, symbol: &str) -> Result<Snapshot, SnapshotError> {
        let candles = self
            .source
            .fetch_candles(symbol, self.settings.interval, self.settings.limit)
            .await?;
        debug!(
            "Building snapshot for {} from {} {} candles ({})",
            symbol,
            candles.len(),
            self.settings.interval,
            self.source.name()
        );

        Ok(snapshot_from_series(&CandleSeries::new(symbol, candles))?)
    }
}
