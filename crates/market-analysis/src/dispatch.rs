//! Concurrent fan-out of a route decision to asset handlers.

use futures::future::join_all;
use market_core::{AssetClass, RouteError, Snapshot, SnapshotError};
use std::collections::BTreeMap;
use tracing::{info, warn};

use crate::handler::{AssetAnalysis, AssetHandler};
use crate::router::{RouteDecision, RouteState, Router};

/// Result of one asset pipeline within a fan-out.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetOutcome {
    pub asset_class: AssetClass,
    pub symbol: String,
    pub result: Result<AssetAnalysis, SnapshotError>,
}

impl AssetOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Registry of asset handlers keyed by asset class.
#[derive(Default)]
pub struct Dispatcher {
    handlers: BTreeMap<AssetClass, AssetHandler>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler, replacing any previous one for its asset class.
    pub fn register(&mut self, handler: AssetHandler) {
        self.handlers.insert(handler.asset_class(), handler);
    }

    pub fn with_handler(mut self, handler: AssetHandler) -> Self {
        self.register(handler);
        self
    }

    pub fn handler(&self, asset_class: AssetClass) -> Option<&AssetHandler> {
        self.handlers.get(&asset_class)
    }

    /// Asset classes with a registered handler.
    pub fn asset_classes(&self) -> Vec<AssetClass> {
        self.handlers.keys().copied().collect()
    }

    /// Build a bare snapshot for one asset class.
    pub async fn build_snapshot(
        &self,
        asset_class: AssetClass,
        symbol: &str,
    ) -> Result<Snapshot, SnapshotError> {
        let handler = self
            .handler(asset_class)
            .ok_or(SnapshotError::NoHandler(asset_class))?;
        handler.builder().build(symbol).await
    }

    /// Analyse one asset class for an already resolved symbol.
    pub async fn analyze(
        &self,
        asset_class: AssetClass,
        symbol: &str,
    ) -> Result<AssetAnalysis, SnapshotError> {
        let handler = self
            .handler(asset_class)
            .ok_or(SnapshotError::NoHandler(asset_class))?;
        handler.analyze(symbol).await
    }

    /// Run every routed target concurrently.
    ///
    /// Outcomes come back in the decision's order; a failing asset never
    /// affects the others.
    pub async fn dispatch(&self, decision: &RouteDecision) -> Vec<AssetOutcome> {
        let outcomes = join_all(decision.targets.iter().map(|target| async move {
            let symbol = self.resolve_symbol(target.asset_class, &target.symbol);
            let result = self.analyze(target.asset_class, &symbol).await;
            if let Err(e) = &result {
                warn!("{} {} failed: {}", target.asset_class, symbol, e);
            }
            AssetOutcome {
                asset_class: target.asset_class,
                symbol,
                result,
            }
        }))
        .await;

        let failed = outcomes.iter().filter(|o| !o.is_ok()).count();
        info!(
            "Dispatched {} asset(s), {} failed",
            outcomes.len(),
            failed
        );
        outcomes
    }

    /// Route a query and dispatch it.
    pub async fn analyze_query(
        &self,
        router: &Router,
        query: &str,
    ) -> Result<Vec<AssetOutcome>, RouteError> {
        match RouteState::AwaitingClassification.classify(router, query)? {
            RouteState::Dispatched(decision) => Ok(self.dispatch(&decision).await),
            RouteState::AwaitingClassification => Ok(Vec::new()),
        }
    }

    /// An empty target symbol means the handler's default.
    fn resolve_symbol(&self, asset_class: AssetClass, symbol: &str) -> String {
        match (symbol.is_empty(), self.handler(asset_class)) {
            (true, Some(handler)) => handler.default_symbol().to_string(),
            _ => symbol.to_string(),
        }
    }
}
