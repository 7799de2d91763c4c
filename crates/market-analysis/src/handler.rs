//! Per-asset-class analysis pipeline.

use market_core::{
    AssetClass, Bias, Classification, Snapshot, SnapshotError, SpreadQuality,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::classifier::classify_with_spread;
use crate::snapshot::SnapshotBuilder;

/// Successful result of one asset pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetAnalysis {
    pub asset_class: AssetClass,
    pub snapshot: Snapshot,
    pub classification: Classification,
    /// Spread in pips, when the provider quoted a bid/ask
    pub spread_pips: Option<f64>,
}

/// Snapshot builder plus classification for a single asset class.
pub struct AssetHandler {
    asset_class: AssetClass,
    builder: SnapshotBuilder,
    default_symbol: String,
    fetch_quotes: bool,
}

impl AssetHandler {
    pub fn new(builder: SnapshotBuilder, default_symbol: impl Into<String>) -> Self {
        Self {
            asset_class: builder.source().asset_class(),
            builder,
            default_symbol: default_symbol.into(),
            fetch_quotes: true,
        }
    }

    /// Enable or disable the bid/ask lookup used for spread quality.
    pub fn with_quotes(mut self, enabled: bool) -> Self {
        self.fetch_quotes = enabled;
        self
    }

    pub fn asset_class(&self) -> AssetClass {
        self.asset_class
    }

    pub fn default_symbol(&self) -> &str {
        &self.default_symbol
    }

    pub fn builder(&self) -> &SnapshotBuilder {
        &self.builder
    }

    /// Build, classify and bias-adjust a snapshot for `symbol`.
    pub async fn analyze(&self, symbol: &str) -> Result<AssetAnalysis, SnapshotError> {
        let snapshot = self.builder.build(symbol).await?;
        let spread_pips = self.spread_pips(symbol).await;

        let mut classification = classify_with_spread(&snapshot, spread_pips);
        classification.bias = adjust_bias(&classification);

        info!(
            "{} {}: trend={} volatility={} bias={}",
            self.asset_class, symbol, classification.trend, classification.volatility, classification.bias
        );

        Ok(AssetAnalysis {
            asset_class: self.asset_class,
            snapshot,
            classification,
            spread_pips,
        })
    }

    /// Quote failures only degrade spread quality to unknown.
    async fn spread_pips(&self, symbol: &str) -> Option<f64> {
        if !self.fetch_quotes {
            return None;
        }
        match self.builder.source().fetch_quote(symbol).await {
            Ok(quote) => {
                quote.map(|q| q.spread_in_pips(self.asset_class.pip_size(symbol)))
            }
            Err(e) => {
                warn!("Quote unavailable for {} {}: {}", self.asset_class, symbol, e);
                None
            }
        }
    }
}

/// A directional bias is not actionable through a bad spread.
fn adjust_bias(classification: &Classification) -> Bias {
    match (classification.bias, classification.spread_quality) {
        (Bias::Buy | Bias::Sell, SpreadQuality::Bad) => Bias::Wait,
        (bias, _) => bias,
    }
}
