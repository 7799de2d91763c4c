//! Provider adapters for market data.
//!
//! One [`SeriesSource`](market_core::SeriesSource) implementation per asset class:
//! - [`BinanceSource`]: crypto klines (array of arrays)
//! - [`AlphaVantageSource`]: FX series (JSON map keyed by date)
//! - [`StooqSource`]: commodity series (CSV table)
//!
//! All adapters talk to the network through an injected [`HttpFetch`](market_core::HttpFetch);
//! [`ReqwestFetch`] is the production transport.

mod alphavantage;
mod binance;
mod http;
mod payload;
mod stooq;

#[cfg(test)]
mod test_support;

pub use alphavantage::{AlphaVantageConfig, AlphaVantageSource};
pub use binance::{BinanceConfig, BinanceSource};
pub use http::ReqwestFetch;
pub use payload::{RawProviderPayload, TableRow};
pub use stooq::{StooqConfig, StooqSource};

use market_core::{HttpResponse, UpstreamError};

/// Reject non-2xx and blank responses with provider context.
pub(crate) fn check_response(provider: &str, response: HttpResponse) -> Result<String, UpstreamError> {
    if !response.is_success() {
        return Err(UpstreamError::Status {
            provider: provider.to_string(),
            status: response.status,
            body: truncate(&response.body, 256),
        });
    }
    if response.body.trim().is_empty() {
        return Err(UpstreamError::EmptyPayload {
            provider: provider.to_string(),
        });
    }
    Ok(response.body)
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
