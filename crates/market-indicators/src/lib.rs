//! Technical indicators for market snapshots.
//!
//! Both indicators are pure functions over a closing-price slice and round their output to
//! two decimal places so that snapshots are reproducible across runs:
//! - [`calculate_ema`]: exponential moving average seeded from the first value
//! - [`calculate_rsi`]: relative strength index averaged over the first `period` steps

pub mod momentum;
pub mod moving_average;

pub use momentum::{calculate_rsi, DEFAULT_RSI_PERIOD};
pub use moving_average::calculate_ema;

/// Round to two decimal places, half away from zero.
#[inline]
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
