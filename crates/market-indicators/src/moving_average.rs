//! Moving average indicators.

use market_core::IndicatorError;

use crate::round2;

/// Exponential Moving Average (EMA) of `values`.
///
/// The average is seeded with `values[0]` rather than an SMA of the first `period` values,
/// then blended with `k = 2 / (period + 1)` for every later value. Any non-empty slice is
/// accepted, including one shorter than `period`.
///
/// The result is rounded to 2 decimals, so for sub-cent prices (FX) it can land up to
/// half a cent outside the input range.
///
/// # Errors
/// `InsufficientData` for an empty slice, `InvalidParameter` for a zero period.
pub fn calculate_ema(values: &[f64], period: usize) -> Result<f64, IndicatorError> {
    if period == 0 {
        return Err(IndicatorError::InvalidParameter(
            "EMA period must be greater than 0".to_string(),
        ));
    }
    let (&seed, rest) = values.split_first().ok_or(IndicatorError::InsufficientData {
        required: 1,
        available: 0,
    })?;

    let k = 2.0 / (period as f64 + 1.0);
    let one_minus_k = 1.0 - k;
    let ema = rest
        .iter()
        .fold(seed, |ema, &price| price * k + ema * one_minus_k);

    Ok(round2(ema))
}
