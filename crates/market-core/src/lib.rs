//! Core types and traits for the market snapshot engine.
//!
//! This crate provides the foundational building blocks including:
//! - Market data types (Candle, CandleSeries, Quote)
//! - Derived analysis types (Snapshot, Classification)
//! - Asset classes and candle intervals
//! - Core traits for series sources and the HTTP transport they use

pub mod error;
pub mod traits;
pub mod types;

pub use error::{IndicatorError, RouteError, SnapshotError, TransportError, UpstreamError};
pub use traits::*;
pub use types::*;
