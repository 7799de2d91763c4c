//! Momentum indicators.

use market_core::IndicatorError;

use crate::round2;

/// Default RSI period.
pub const DEFAULT_RSI_PERIOD: usize = 14;

/// Relative Strength Index (RSI) of `values`.
///
/// Gains and losses are computed for every step of the input, but only the first `period`
/// of each are averaged (sum divided by `period`). Later steps are not smoothed in.
///
/// Returns `100.0` when the average loss is zero.
///
/// # Errors
/// `InsufficientData` for fewer than two values, `InvalidParameter` for a zero period.
pub fn calculate_rsi(values: &[f64], period: usize) -> Result<f64, IndicatorError> {
    if period == 0 {
        return Err(IndicatorError::InvalidParameter(
            "RSI period must be greater than 0".to_string(),
        ));
    }
    if values.len() < 2 {
        return Err(IndicatorError::InsufficientData {
            required: 2,
            available: values.len(),
        });
    }

    let mut gains = Vec::with_capacity(values.len() - 1);
    let mut losses = Vec::with_capacity(values.len() - 1);

    for pair in values.windows(2) {
        let change = pair[1] - pair[0];
        if change > 0.0 {
            gains.push(change);
            losses.push(0.0);
        } else {
            gains.push(0.0);
            losses.push(-change);
        }
    }

    let period_f64 = period as f64;
    let avg_gain: f64 = gains.iter().take(period).sum::<f64>() / period_f64;
    let avg_loss: f64 = losses.iter().take(period).sum::<f64>() / period_f64;

    if avg_loss == 0.0 {
        return Ok(100.0);
    }

    let rs = avg_gain / avg_loss;
    Ok(round2(100.0 - (100.0 / (1.0 + rs))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_rsi_balanced_moves() {
        let rsi = calculate_rsi(&[1.0, 2.0, 3.0, 2.0, 1.0], 4).unwrap();
        assert_eq!(rsi, 50.0);
    }

    #[test]
    fn test_rsi_only_first_period_steps_count() {
        // The two losses after the first two steps are outside the averaging window.
        let rsi = calculate_rsi(&[1.0, 2.0, 3.0, 2.0, 1.0], 2).unwrap();
        assert_eq!(rsi, 100.0);
    }

    #[test]
    fn test_rsi_short_input_divides_by_period() {
        // Gains 1/14, losses 1/14 regardless of the missing steps.
        assert_eq!(calculate_rsi(&[10.0, 11.0, 10.0], DEFAULT_RSI_PERIOD).unwrap(), 50.0);
    }

    #[test]
    fn test_rsi_known_value() {
        // Gains: 2, 0, 1 -> 3/3 = 1.0; losses: 0, 1, 0 -> 1/3
        // rs = 3, rsi = 100 - 100/4 = 75
        let rsi = calculate_rsi(&[10.0, 12.0, 11.0, 12.0], 3).unwrap();
        assert_eq!(rsi, 75.0);
    }

    #[test]
    fn test_rsi_all_losses() {
        assert_eq!(calculate_rsi(&[5.0, 4.0, 3.0], 2).unwrap(), 0.0);
    }

    #[test]
    fn test_rsi_insufficient_data() {
        assert_eq!(
            calculate_rsi(&[1.0], DEFAULT_RSI_PERIOD),
            Err(IndicatorError::InsufficientData {
                required: 2,
                available: 1
            })
        );
        assert!(calculate_rsi(&[], DEFAULT_RSI_PERIOD).is_err());
    }

    proptest! {
        #[test]
        fn test_rsi_is_100_for_non_decreasing_series(
            start in 1.0f64..100_000.0,
            steps in prop::collection::vec(0.0f64..100.0, 1..120),
        ) {
            let mut values = vec![start];
            for step in steps {
                let last = *values.last().unwrap();
                values.push(last + step);
            }
            prop_assert_eq!(calculate_rsi(&values, DEFAULT_RSI_PERIOD).unwrap(), 100.0);
        }

        #[test]
        fn test_rsi_is_bounded(values in prop::collection::vec(0.01f64..1_000.0, 2..120)) {
            let rsi = calculate_rsi(&values, DEFAULT_RSI_PERIOD).unwrap();
            prop_assert!((0.0..=100.0).contains(&rsi));
        }
    }
}
