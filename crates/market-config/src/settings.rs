//! Configuration structures.

use market_core::{AssetClass, Interval};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Main application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub app: AppSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub http: HttpSettings,
    #[serde(default)]
    pub snapshot: SnapshotConfig,
    #[serde(default = "ProviderSettings::crypto")]
    pub crypto: ProviderSettings,
    #[serde(default = "ProviderSettings::fx")]
    pub fx: ProviderSettings,
    #[serde(default = "ProviderSettings::commodity")]
    pub commodity: ProviderSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            app: AppSettings::default(),
            logging: LoggingConfig::default(),
            http: HttpSettings::default(),
            snapshot: SnapshotConfig::default(),
            crypto: ProviderSettings::crypto(),
            fx: ProviderSettings::fx(),
            commodity: ProviderSettings::commodity(),
        }
    }
}

impl AppConfig {
    /// Provider settings for an asset class.
    pub fn provider(&self, asset_class: AssetClass) -> &ProviderSettings {
        match asset_class {
            AssetClass::Crypto => &self.crypto,
            AssetClass::Fx => &self.fx,
            AssetClass::Commodity => &self.commodity,
        }
    }

    /// Render the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

/// General app settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    pub name: String,
    pub environment: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: "market".to_string(),
            environment: "development".to_string(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    /// "pretty" or "json"
    pub format: String,
    pub file: Option<String>,
}

impl LoggingConfig {
    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            file: None,
        }
    }
}

/// Outbound HTTP settings shared by all providers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpSettings {
    pub timeout_secs: u64,
}

impl HttpSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self { timeout_secs: 10 }
    }
}

/// Candle window requested for every snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotConfig {
    pub interval: Interval,
    pub limit: usize,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            interval: Interval::Daily,
            limit: 100,
        }
    }
}

/// Per-asset-class provider settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderSettings {
    pub base_url: String,
    pub default_symbol: String,
    /// Environment variable holding the API key, for providers that need one
    #[serde(default)]
    pub api_key_env: Option<String>,
    /// Fetch bid/ask quotes for spread quality
    #[serde(default = "default_quotes")]
    pub quotes: bool,
}

fn default_quotes() -> bool {
    true
}

impl ProviderSettings {
    pub fn crypto() -> Self {
        Self {
            base_url: "https://api.binance.com".to_string(),
            default_symbol: "BTCUSDT".to_string(),
            api_key_env: None,
            quotes: true,
        }
    }

    pub fn fx() -> Self {
        Self {
            base_url: "https://www.alphavantage.co".to_string(),
            default_symbol: "EUR/USD".to_string(),
            api_key_env: Some("ALPHAVANTAGE_API_KEY".to_string()),
            quotes: true,
        }
    }

    pub fn commodity() -> Self {
        Self {
            base_url: "https://stooq.com".to_string(),
            default_symbol: "XAUUSD".to_string(),
            api_key_env: None,
            quotes: false,
        }
    }
}
