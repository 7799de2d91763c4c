//! Series source trait definitions.

use crate::error::UpstreamError;
use crate::types::{AssetClass, Candle, Interval, Quote};
use async_trait::async_trait;

/// Provider adapter for one asset class.
///
/// Adapters own the provider's query parameters and response shape, and always hand back
/// candles in chronological order regardless of how the provider ordered them.
#[async_trait]
pub trait SeriesSource: Send + Sync {
    /// Fetch the `limit` most recent candles.
    ///
    /// # Arguments
    /// * `symbol` - Provider symbol or pair
    /// * `interval` - Candle interval
    /// * `limit` - Maximum number of candles to return
    ///
    /// # Returns
    /// Candles ordered from oldest to newest. Fewer than `limit` candles are returned as-is,
    /// never padded.
    async fn fetch_candles(
        &self,
        symbol: &str,
        interval: Interval,
        limit: usize,
    ) -> Result<Vec<Candle>, UpstreamError>;

    /// Fetch the current best bid/ask, if the provider exposes one.
    async fn fetch_quote(&self, _symbol: &str) -> Result<Option<Quote>, UpstreamError> {
        Ok(None)
    }

    /// Asset class served by this source.
    fn asset_class(&self) -> AssetClass;

    /// Get the provider name.
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EmptySource;

    #[async_trait]
    impl SeriesSource for EmptySource {
        async fn fetch_candles(
            &self,
            _symbol: &str,
            _interval: Interval,
            _limit: usize,
        ) -> Result<Vec<Candle>, UpstreamError> {
            Err(UpstreamError::EmptyPayload {
                provider: self.name().to_string(),
            })
        }

        fn asset_class(&self) -> AssetClass {
            AssetClass::Commodity
        }

        fn name(&self) -> &str {
            "empty"
        }
    }

    #[tokio::test]
    async fn test_default_quote_is_none() {
        let source = EmptySource;
        assert_eq!(source.fetch_quote("XAUUSD").await.unwrap(), None);
        assert!(source.fetch_candles("XAUUSD", Interval::Daily, 10).await.is_err());
    }
}
