//! Qualitative labels derived from a snapshot.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Trend label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trend {
    Bullish,
    Bearish,
    Range,
}

/// Volatility label from the recent high-low range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Volatility {
    High,
    Low,
    Normal,
}

/// Spread quality in pip-equivalents. `Unknown` when no bid/ask was available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpreadQuality {
    Good,
    Bad,
    Unknown,
}

/// Trade bias.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Bias {
    Buy,
    Sell,
    Wait,
}

impl From<Trend> for Bias {
    fn from(trend: Trend) -> Self {
        match trend {
            Trend::Bullish => Bias::Buy,
            Trend::Bearish => Bias::Sell,
            Trend::Range => Bias::Wait,
        }
    }
}

/// Full classification of a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub trend: Trend,
    pub volatility: Volatility,
    pub spread_quality: SpreadQuality,
    pub bias: Bias,
}

macro_rules! impl_display_as_debug {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Debug::fmt(self, f)
            }
        })*
    };
}

impl_display_as_debug!(Trend, Volatility, SpreadQuality, Bias);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bias_from_trend() {
        assert_eq!(Bias::from(Trend::Bullish), Bias::Buy);
        assert_eq!(Bias::from(Trend::Bearish), Bias::Sell);
        assert_eq!(Bias::from(Trend::Range), Bias::Wait);
    }

    #[test]
    fn test_display() {
        assert_eq!(Trend::Bullish.to_string(), "Bullish");
        assert_eq!(SpreadQuality::Unknown.to_string(), "Unknown");
    }
}
