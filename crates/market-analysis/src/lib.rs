//! Snapshot building, classification and query routing.
//!
//! The pipeline for one query:
//! - [`Router`] turns free text into a [`RouteDecision`] (asset classes + symbols)
//! - [`Dispatcher`] runs one [`AssetHandler`] per routed asset class concurrently
//! - each handler builds a [`Snapshot`](market_core::Snapshot) through its
//!   [`SnapshotBuilder`] and labels it with [`classify_with_spread`]
//! - [`MarketReport`] renders the merged outcomes as text or JSON

mod classifier;
mod dispatch;
mod handler;
mod report;
mod router;
mod snapshot;

#[cfg(test)]
mod test_support;

pub use classifier::{classify, classify_with_spread, spread_quality};
pub use dispatch::{AssetOutcome, Dispatcher};
pub use handler::{AssetAnalysis, AssetHandler};
pub use report::{AssetReport, MarketReport, ReportStatus};
pub use router::{RouteDecision, RouteState, RouteTarget, Router};
pub use snapshot::{
    snapshot_from_series, SnapshotBuilder, SnapshotSettings, EMA_FAST, EMA_SLOW, RECENT_WINDOW,
};
