//! Market outlook report generation.

use market_core::{AssetClass, Bias, Classification, Snapshot, SpreadQuality, Trend, Volatility};
use serde::{Deserialize, Serialize};

use crate::dispatch::AssetOutcome;

/// Whether an asset section carries analysis or a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    Ok,
    Failed,
}

/// One asset section of a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetReport {
    pub asset_class: AssetClass,
    pub symbol: String,
    pub status: ReportStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapshot: Option<Snapshot>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classification: Option<Classification>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spread_pips: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<AssetOutcome> for AssetReport {
    fn from(outcome: AssetOutcome) -> Self {
        match outcome.result {
            Ok(analysis) => Self {
                asset_class: outcome.asset_class,
                symbol: outcome.symbol,
                status: ReportStatus::Ok,
                snapshot: Some(analysis.snapshot),
                classification: Some(analysis.classification),
                spread_pips: analysis.spread_pips,
                error: None,
            },
            Err(e) => Self {
                asset_class: outcome.asset_class,
                symbol: outcome.symbol,
                status: ReportStatus::Failed,
                snapshot: None,
                classification: None,
                spread_pips: None,
                error: Some(e.to_string()),
            },
        }
    }
}

/// Report for one query, sections in merge order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketReport {
    pub query: String,
    pub assets: Vec<AssetReport>,
}

impl MarketReport {
    pub fn from_outcomes(query: impl Into<String>, outcomes: Vec<AssetOutcome>) -> Self {
        Self {
            query: query.into(),
            assets: outcomes.into_iter().map(AssetReport::from).collect(),
        }
    }

    /// Number of failed asset sections.
    pub fn failures(&self) -> usize {
        self.assets
            .iter()
            .filter(|a| a.status == ReportStatus::Failed)
            .count()
    }

    /// Generate a text summary.
    pub fn summary(&self) -> String {
        let mut s = String::new();

        s.push_str("═══════════════════════════════════════════════════════════\n");
        s.push_str("                    MARKET OUTLOOK                         \n");
        s.push_str("═══════════════════════════════════════════════════════════\n\n");

        for asset in &self.assets {
            s.push_str(&format!(
                "{} ({})\n",
                asset.symbol,
                asset.asset_class.as_str().to_uppercase()
            ));
            s.push_str("───────────────────────────────────────────────────────────\n");

            match (&asset.snapshot, &asset.classification) {
                (Some(snapshot), Some(classification)) => {
                    write_analysis(&mut s, asset, snapshot, classification)
                }
                _ => {
                    s.push_str("  Status:        unavailable\n");
                    s.push_str(&format!(
                        "  Error:         {}\n",
                        asset.error.as_deref().unwrap_or("unknown error")
                    ));
                }
            }
            s.push('\n');
        }

        s.push_str("═══════════════════════════════════════════════════════════\n");

        s
    }

    /// Export to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

fn write_analysis(
    s: &mut String,
    asset: &AssetReport,
    snapshot: &Snapshot,
    classification: &Classification,
) {
    let decimals = price_decimals(asset.asset_class);

    s.push_str(&format!("  Trend:         {}\n", trend_label(classification.trend)));
    s.push_str(&format!(
        "  Support:       {:.*}\n",
        decimals, snapshot.low_recent
    ));
    s.push_str(&format!(
        "  Resistance:    {:.*}\n",
        decimals, snapshot.high_recent
    ));
    s.push_str(&format!("  Bias:          {}\n", bias_label(classification.bias)));
    s.push_str(&format!(
        "  Notes:         price {:.*}, EMA20 {:.*}, EMA50 {:.*}, RSI14 {:.2}\n",
        decimals, snapshot.price, decimals, snapshot.ema20, decimals, snapshot.ema50, snapshot.rsi14
    ));
    s.push_str(&format!(
        "                 volatility {}, spread {}\n",
        volatility_label(classification.volatility),
        spread_note(classification.spread_quality, asset.spread_pips)
    ));
}

/// FX quotes need five decimals; everything else reads fine at two.
fn price_decimals(asset_class: AssetClass) -> usize {
    match asset_class {
        AssetClass::Fx => 5,
        AssetClass::Crypto | AssetClass::Commodity => 2,
    }
}

fn trend_label(trend: Trend) -> &'static str {
    match trend {
        Trend::Bullish => "bullish",
        Trend::Bearish => "bearish",
        Trend::Range => "range-bound",
    }
}

fn bias_label(bias: Bias) -> &'static str {
    match bias {
        Bias::Buy => "buy",
        Bias::Sell => "sell",
        Bias::Wait => "wait",
    }
}

fn volatility_label(volatility: Volatility) -> &'static str {
    match volatility {
        Volatility::High => "high",
        Volatility::Low => "low",
        Volatility::Normal => "normal",
    }
}

fn spread_note(quality: SpreadQuality, pips: Option<f64>) -> String {
    let label = match quality {
        SpreadQuality::Good => "good",
        SpreadQuality::Bad => "bad",
        SpreadQuality::Unknown => "unknown",
    };
    match pips {
        Some(pips) => format!("{} ({:.1} pips)", label, pips),
        None => label.to_string(),
    }
}
