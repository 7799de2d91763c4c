//! Core data types for the market snapshot engine.

mod asset;
mod candle;
mod classification;
mod interval;
mod quote;
mod snapshot;

pub use asset::AssetClass;
pub use candle::{Candle, CandleSeries};
pub use classification::{Bias, Classification, SpreadQuality, Trend, Volatility};
pub use interval::Interval;
pub use quote::Quote;
pub use snapshot::Snapshot;
