//! Top-of-book quotes.

use serde::{Deserialize, Serialize};

/// A best bid/ask quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    /// Symbol
    pub symbol: String,
    /// Best bid price
    pub bid: f64,
    /// Best ask price
    pub ask: f64,
    /// Timestamp (Unix milliseconds), when the provider reports one
    pub timestamp: Option<i64>,
}

impl Quote {
    pub fn new(symbol: impl Into<String>, bid: f64, ask: f64) -> Self {
        Self {
            symbol: symbol.into(),
            bid,
            ask,
            timestamp: None,
        }
    }

    /// Get the spread.
    pub fn spread(&self) -> f64 {
        self.ask - self.bid
    }

    /// Express the spread in pips of the given size.
    pub fn spread_in_pips(&self, pip_size: f64) -> f64 {
        self.spread() / pip_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_calculations() {
        let quote = Quote::new("EURUSD", 1.08500, 1.08512);

        assert!((quote.spread() - 0.00012).abs() < 1e-9);
        assert!((quote.spread_in_pips(0.0001) - 1.2).abs() < 1e-6);
    }
}
