//! Asset classes handled by the engine.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Asset class of a query target.
///
/// The declaration order is the merge order of multi-asset results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetClass {
    Crypto,
    Fx,
    Commodity,
}

impl AssetClass {
    /// All asset classes in merge order.
    pub fn all() -> &'static [AssetClass] {
        &[AssetClass::Crypto, AssetClass::Fx, AssetClass::Commodity]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AssetClass::Crypto => "crypto",
            AssetClass::Fx => "fx",
            AssetClass::Commodity => "commodity",
        }
    }

    /// Pip size used to express spreads as pip-equivalents.
    ///
    /// FX pairs quoted in JPY use two decimals, other FX pairs four.
    pub fn pip_size(&self, symbol: &str) -> f64 {
        match self {
            AssetClass::Fx if symbol.to_uppercase().ends_with("JPY") => 0.01,
            AssetClass::Fx => 0.0001,
            AssetClass::Commodity | AssetClass::Crypto => 0.01,
        }
    }
}

impl fmt::Display for AssetClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssetClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "crypto" => Ok(AssetClass::Crypto),
            "fx" | "forex" => Ok(AssetClass::Fx),
            "commodity" | "commodities" => Ok(AssetClass::Commodity),
            _ => Err(format!("Invalid asset class: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_order() {
        let mut classes = vec![AssetClass::Commodity, AssetClass::Crypto, AssetClass::Fx];
        classes.sort();
        assert_eq!(classes, AssetClass::all());
    }

    #[test]
    fn test_pip_size() {
        assert_eq!(AssetClass::Fx.pip_size("EURUSD"), 0.0001);
        assert_eq!(AssetClass::Fx.pip_size("usdjpy"), 0.01);
        assert_eq!(AssetClass::Commodity.pip_size("XAUUSD"), 0.01);
    }

    #[test]
    fn test_parse() {
        assert_eq!("Forex".parse::<AssetClass>().unwrap(), AssetClass::Fx);
        assert!("bonds".parse::<AssetClass>().is_err());
    }
}
