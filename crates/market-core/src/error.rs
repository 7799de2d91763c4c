//! Error types for the market snapshot engine.

use thiserror::Error;

use crate::types::AssetClass;

/// Failures raised by the HTTP transport before a provider response exists.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("request timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("connection error: {0}")]
    Connection(String),
}

/// Provider-side failures. Never retried; every variant carries the provider name.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UpstreamError {
    #[error("{provider} returned HTTP {status}: {body}")]
    Status {
        provider: String,
        status: u16,
        body: String,
    },

    #[error("{provider} returned an empty payload")]
    EmptyPayload { provider: String },

    #[error("{provider} payload is missing `{key}`{}", .detail.as_deref().map(|d| format!(" ({d})")).unwrap_or_default())]
    MissingKey {
        provider: String,
        key: String,
        detail: Option<String>,
    },

    #[error("{provider} payload is malformed: {reason}")]
    Malformed { provider: String, reason: String },

    #[error("{provider} request timed out after {timeout_ms}ms")]
    Timeout { provider: String, timeout_ms: u64 },

    #[error("{provider} transport error: {reason}")]
    Transport { provider: String, reason: String },

    #[error("{provider} does not support interval {interval}")]
    UnsupportedInterval { provider: String, interval: String },

    #[error("{provider} cannot interpret symbol {symbol:?}")]
    InvalidSymbol { provider: String, symbol: String },
}

impl UpstreamError {
    /// Attach provider context to a transport failure.
    pub fn from_transport(provider: &str, err: TransportError) -> Self {
        match err {
            TransportError::Timeout { timeout_ms } => UpstreamError::Timeout {
                provider: provider.to_string(),
                timeout_ms,
            },
            TransportError::Connection(reason) => UpstreamError::Transport {
                provider: provider.to_string(),
                reason,
            },
        }
    }

    pub fn malformed(provider: &str, reason: impl Into<String>) -> Self {
        UpstreamError::Malformed {
            provider: provider.to_string(),
            reason: reason.into(),
        }
    }

    pub fn missing_key(provider: &str, key: &str) -> Self {
        UpstreamError::MissingKey {
            provider: provider.to_string(),
            key: key.to_string(),
            detail: None,
        }
    }

    /// Name of the provider that produced the error.
    pub fn provider(&self) -> &str {
        match self {
            UpstreamError::Status { provider, .. }
            | UpstreamError::EmptyPayload { provider }
            | UpstreamError::MissingKey { provider, .. }
            | UpstreamError::Malformed { provider, .. }
            | UpstreamError::Timeout { provider, .. }
            | UpstreamError::Transport { provider, .. }
            | UpstreamError::UnsupportedInterval { provider, .. }
            | UpstreamError::InvalidSymbol { provider, .. } => provider,
        }
    }
}

/// Indicator calculation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IndicatorError {
    #[error("Insufficient data: need {required} points, have {available}")]
    InsufficientData { required: usize, available: usize },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Query routing errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    #[error("Cannot determine asset class from query: {query:?}")]
    NoRoute { query: String },
}

/// Failure channel of a single asset-class pipeline.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SnapshotError {
    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    #[error(transparent)]
    Indicator(#[from] IndicatorError),

    #[error("no handler registered for {0}")]
    NoHandler(AssetClass),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_error_gets_provider_context() {
        let err = UpstreamError::from_transport("binance", TransportError::Timeout { timeout_ms: 10 });
        assert_eq!(
            err,
            UpstreamError::Timeout {
                provider: "binance".to_string(),
                timeout_ms: 10
            }
        );
        assert_eq!(err.provider(), "binance");
        assert_eq!(err.to_string(), "binance request timed out after 10ms");
    }

    #[test]
    fn test_missing_key_display() {
        let bare = UpstreamError::missing_key("alphavantage", "Time Series FX (Daily)");
        assert_eq!(
            bare.to_string(),
            "alphavantage payload is missing `Time Series FX (Daily)`"
        );

        let detailed = UpstreamError::MissingKey {
            provider: "alphavantage".to_string(),
            key: "Time Series FX (Daily)".to_string(),
            detail: Some("Invalid API call".to_string()),
        };
        assert!(detailed.to_string().ends_with("(Invalid API call)"));
    }
}
