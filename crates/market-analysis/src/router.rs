//! Keyword routing of free-text queries to asset classes.

use market_core::{AssetClass, RouteError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Keyword table: (keyword, asset class, implied symbol).
const KEYWORDS: &[(&str, AssetClass, Option<&str>)] = &[
    ("btc", AssetClass::Crypto, Some("BTCUSDT")),
    ("bitcoin", AssetClass::Crypto, Some("BTCUSDT")),
    ("eth", AssetClass::Crypto, Some("ETHUSDT")),
    ("ethereum", AssetClass::Crypto, Some("ETHUSDT")),
    ("eur/usd", AssetClass::Fx, Some("EUR/USD")),
    ("eurusd", AssetClass::Fx, Some("EUR/USD")),
    ("forex", AssetClass::Fx, None),
    ("fx", AssetClass::Fx, None),
    ("xau", AssetClass::Commodity, None),
    ("gold", AssetClass::Commodity, None),
];

/// One asset class to analyse and the symbol to analyse it with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteTarget {
    pub asset_class: AssetClass,
    pub symbol: String,
}

/// Asset classes matched by a query, in merge order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteDecision {
    pub targets: Vec<RouteTarget>,
}

impl RouteDecision {
    pub fn asset_classes(&self) -> Vec<AssetClass> {
        self.targets.iter().map(|t| t.asset_class).collect()
    }

    pub fn is_multi_asset(&self) -> bool {
        self.targets.len() > 1
    }
}

/// Lifecycle of one query through the router.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteState {
    AwaitingClassification,
    Dispatched(RouteDecision),
}

impl RouteState {
    /// Classify the query; only valid from `AwaitingClassification`.
    ///
    /// An already dispatched state is returned unchanged.
    pub fn classify(self, router: &Router, query: &str) -> Result<RouteState, RouteError> {
        match self {
            RouteState::AwaitingClassification => router.route(query).map(RouteState::Dispatched),
            dispatched => Ok(dispatched),
        }
    }

    pub fn decision(&self) -> Option<&RouteDecision> {
        match self {
            RouteState::AwaitingClassification => None,
            RouteState::Dispatched(decision) => Some(decision),
        }
    }
}

/// Case-insensitive whole-token keyword router.
#[derive(Debug, Clone)]
pub struct Router {
    defaults: BTreeMap<AssetClass, String>,
}

impl Default for Router {
    fn default() -> Self {
        Self::new([
            (AssetClass::Crypto, "BTCUSDT".to_string()),
            (AssetClass::Fx, "EUR/USD".to_string()),
            (AssetClass::Commodity, "XAUUSD".to_string()),
        ])
    }
}

impl Router {
    /// Create a router with a default symbol per asset class.
    pub fn new(defaults: impl IntoIterator<Item = (AssetClass, String)>) -> Self {
        Self {
            defaults: defaults.into_iter().collect(),
        }
    }

    pub fn default_symbol(&self, asset_class: AssetClass) -> Option<&str> {
        self.defaults.get(&asset_class).map(String::as_str)
    }

    /// Route a query to the asset classes its keywords name.
    ///
    /// Within one class the first keyword that implies a symbol wins;
    /// otherwise the class default is used.
    pub fn route(&self, query: &str) -> Result<RouteDecision, RouteError> {
        let lowered = query.to_lowercase();
        let mut matched: BTreeMap<AssetClass, Option<&'static str>> = BTreeMap::new();

        for token in tokenize(&lowered) {
            let hits = match lookup(token) {
                Some(hit) => vec![hit],
                // "btc/usdt" is not a keyword, but its parts may be
                None if token.contains('/') => token.split('/').filter_map(lookup).collect(),
                None => Vec::new(),
            };
            for (asset_class, hint) in hits {
                let entry = matched.entry(asset_class).or_insert(None);
                if entry.is_none() {
                    *entry = hint;
                }
            }
        }

        if matched.is_empty() {
            return Err(RouteError::NoRoute {
                query: query.to_string(),
            });
        }

        let targets: Vec<RouteTarget> = matched
            .into_iter()
            .map(|(asset_class, hint)| RouteTarget {
                asset_class,
                symbol: hint
                    .map(str::to_string)
                    .or_else(|| self.defaults.get(&asset_class).cloned())
                    .unwrap_or_default(),
            })
            .collect();

        debug!("Routed {:?} to {:?}", query, targets);
        Ok(RouteDecision { targets })
    }
}

fn tokenize(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '/'))
        .filter(|t| !t.is_empty())
}

fn lookup(token: &str) -> Option<(AssetClass, Option<&'static str>)> {
    KEYWORDS
        .iter()
        .find(|(keyword, _, _)| *keyword == token)
        .map(|(_, asset_class, hint)| (*asset_class, *hint))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multi_asset_in_enum_order() {
        let decision = Router::default().route("BTC and EUR/USD").unwrap();
        assert_eq!(
            decision.asset_classes(),
            vec![AssetClass::Crypto, AssetClass::Fx]
        );
        assert_eq!(decision.targets[0].symbol, "BTCUSDT");
        assert_eq!(decision.targets[1].symbol, "EUR/USD");
        assert!(decision.is_multi_asset());

        let decision = Router::default().route("gold vs forex vs ethereum").unwrap();
        assert_eq!(
            decision.asset_classes(),
            vec![AssetClass::Crypto, AssetClass::Fx, AssetClass::Commodity]
        );
    }

    #[test]
    fn test_no_route() {
        let err = Router::default().route("tell me about the weather").unwrap_err();
        assert_eq!(
            err,
            RouteError::NoRoute {
                query: "tell me about the weather".to_string()
            }
        );
        assert!(Router::default().route("").is_err());
    }

    #[test]
    fn test_whole_token_matching() {
        // "fx" inside "effect", "eth" inside "method"
        assert!(Router::default().route("what effect does this method have").is_err());
        let decision = Router::default().route("FX outlook?").unwrap();
        assert_eq!(decision.asset_classes(), vec![AssetClass::Fx]);
    }

    #[test]
    fn test_slash_pair_falls_back_to_parts() {
        let decision = Router::default().route("btc/usdt chart").unwrap();
        assert_eq!(decision.asset_classes(), vec![AssetClass::Crypto]);
        assert_eq!(decision.targets[0].symbol, "BTCUSDT");

        let decision = Router::default().route("xau/usd").unwrap();
        assert_eq!(decision.asset_classes(), vec![AssetClass::Commodity]);
    }

    #[test]
    fn test_symbol_hints_and_defaults() {
        let router = Router::new([
            (AssetClass::Crypto, "SOLUSDT".to_string()),
            (AssetClass::Commodity, "XAGUSD".to_string()),
        ]);

        let decision = router.route("eth please").unwrap();
        assert_eq!(decision.targets[0].symbol, "ETHUSDT");

        let decision = router.route("Gold").unwrap();
        assert_eq!(decision.targets[0].symbol, "XAGUSD");

        // Keyword without a hint and no configured default
        let decision = router.route("forex").unwrap();
        assert_eq!(decision.targets[0].symbol, "");
    }

    #[test]
    fn test_first_hint_in_class_wins() {
        let decision = Router::default().route("crypto: fx? no, eth then bitcoin").unwrap();
        assert_eq!(decision.targets[0].symbol, "ETHUSDT");
        assert_eq!(decision.targets[1].asset_class, AssetClass::Fx);
    }

    #[test]
    fn test_route_state_transition() {
        let router = Router::default();
        let state = RouteState::AwaitingClassification;
        assert!(state.decision().is_none());

        let state = state.classify(&router, "gold").unwrap();
        let decision = state.decision().unwrap().clone();
        assert_eq!(decision.asset_classes(), vec![AssetClass::Commodity]);

        // A dispatched state does not re-route.
        let state = state.classify(&router, "btc").unwrap();
        assert_eq!(state, RouteState::Dispatched(decision));

        assert!(RouteState::AwaitingClassification
            .classify(&router, "weather")
            .is_err());
    }
}
