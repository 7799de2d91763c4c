//! Threshold rules turning a snapshot into qualitative labels.

use market_core::{Bias, Classification, Snapshot, SpreadQuality, Trend, Volatility};

const RSI_BULLISH: f64 = 55.0;
const RSI_BEARISH: f64 = 45.0;
const HIGH_VOLATILITY_RATIO: f64 = 0.10;
const LOW_VOLATILITY_RATIO: f64 = 0.05;
const GOOD_SPREAD_PIPS: f64 = 1.0;
const BAD_SPREAD_PIPS: f64 = 10.0;

/// Classify a snapshot without spread data.
pub fn classify(snapshot: &Snapshot) -> Classification {
    classify_with_spread(snapshot, None)
}

/// Classify a snapshot, using the spread (in pips) when one is known.
pub fn classify_with_spread(snapshot: &Snapshot, spread_pips: Option<f64>) -> Classification {
    let trend = trend(snapshot);
    Classification {
        trend,
        volatility: volatility(snapshot),
        spread_quality: spread_quality(spread_pips),
        bias: Bias::from(trend),
    }
}

fn trend(s: &Snapshot) -> Trend {
    if s.price > s.ema20 && s.ema20 > s.ema50 && s.rsi14 > RSI_BULLISH {
        Trend::Bullish
    } else if s.price < s.ema20 && s.ema20 < s.ema50 && s.rsi14 < RSI_BEARISH {
        Trend::Bearish
    } else {
        Trend::Range
    }
}

fn volatility(s: &Snapshot) -> Volatility {
    match s.range_ratio() {
        Some(ratio) if ratio > HIGH_VOLATILITY_RATIO => Volatility::High,
        Some(ratio) if ratio < LOW_VOLATILITY_RATIO => Volatility::Low,
        _ => Volatility::Normal,
    }
}

/// Spread quality: below one pip is good, above ten is bad, anything else is unknown.
pub fn spread_quality(spread_pips: Option<f64>) -> SpreadQuality {
    match spread_pips {
        Some(pips) if pips < GOOD_SPREAD_PIPS => SpreadQuality::Good,
        Some(pips) if pips > BAD_SPREAD_PIPS => SpreadQuality::Bad,
        _ => SpreadQuality::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(price: f64, ema20: f64, ema50: f64, rsi14: f64, high: f64, low: f64) -> Snapshot {
        Snapshot {
            symbol: "TEST".to_string(),
            price,
            ema20,
            ema50,
            rsi14,
            high_recent: high,
            low_recent: low,
        }
    }

    #[test]
    fn test_bullish_high_volatility() {
        let c = classify(&snapshot(110.0, 105.0, 100.0, 60.0, 120.0, 100.0));
        assert_eq!(c.trend, Trend::Bullish);
        assert_eq!(c.bias, Bias::Buy);
        assert_eq!(c.volatility, Volatility::High);
        assert_eq!(c.spread_quality, SpreadQuality::Unknown);
    }

    #[test]
    fn test_bearish() {
        let c = classify(&snapshot(90.0, 95.0, 100.0, 40.0, 96.0, 88.0));
        assert_eq!(c.trend, Trend::Bearish);
        assert_eq!(c.bias, Bias::Sell);
        assert_eq!(c.volatility, Volatility::Normal);
    }

    #[test]
    fn test_aligned_emas_without_momentum_is_range() {
        // EMAs stacked bullishly but RSI not above 55.
        let c = classify(&snapshot(110.0, 105.0, 100.0, 55.0, 111.0, 109.0));
        assert_eq!(c.trend, Trend::Range);
        assert_eq!(c.bias, Bias::Wait);
        assert_eq!(c.volatility, Volatility::Low);

        // Bearish RSI with bullish EMA stack.
        let c = classify(&snapshot(110.0, 105.0, 100.0, 30.0, 111.0, 109.0));
        assert_eq!(c.trend, Trend::Range);
    }

    #[test]
    fn test_volatility_boundaries() {
        // Exactly 10% and exactly 5% are Normal.
        assert_eq!(
            classify(&snapshot(100.0, 100.0, 100.0, 50.0, 110.0, 100.0)).volatility,
            Volatility::Normal
        );
        assert_eq!(
            classify(&snapshot(100.0, 100.0, 100.0, 50.0, 105.0, 100.0)).volatility,
            Volatility::Normal
        );
    }

    #[test]
    fn test_non_positive_price_is_normal_volatility() {
        let c = classify(&snapshot(0.0, 0.0, 0.0, 50.0, 10.0, 0.0));
        assert_eq!(c.volatility, Volatility::Normal);
    }

    #[test]
    fn test_spread_quality() {
        assert_eq!(spread_quality(None), SpreadQuality::Unknown);
        assert_eq!(spread_quality(Some(0.4)), SpreadQuality::Good);
        assert_eq!(spread_quality(Some(1.0)), SpreadQuality::Unknown);
        assert_eq!(spread_quality(Some(10.0)), SpreadQuality::Unknown);
        assert_eq!(spread_quality(Some(12.5)), SpreadQuality::Bad);
    }

    #[test]
    fn test_spread_does_not_change_bias() {
        let c = classify_with_spread(&snapshot(110.0, 105.0, 100.0, 60.0, 120.0, 100.0), Some(50.0));
        assert_eq!(c.spread_quality, SpreadQuality::Bad);
        assert_eq!(c.bias, Bias::Buy);
    }
}
