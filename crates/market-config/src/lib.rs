//! Configuration management.

mod settings;

pub use settings::{
    AppConfig, AppSettings, HttpSettings, LoggingConfig, ProviderSettings, SnapshotConfig,
};

use config::{Config, ConfigError, Environment, File};
use market_core::AssetClass;
use std::path::Path;
use thiserror::Error;

/// Prefix of environment overrides, e.g. `MARKET__HTTP__TIMEOUT_SECS=5`.
pub const ENV_PREFIX: &str = "MARKET";

/// Configuration loading and validation errors.
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error(transparent)]
    Load(#[from] ConfigError),

    #[error("{asset_class} provider needs an API key in ${var}")]
    MissingApiKey { asset_class: AssetClass, var: String },

    #[error("invalid setting {key}: {reason}")]
    Invalid { key: String, reason: String },
}

/// Load configuration from file and environment.
///
/// Built-in defaults fill any key the file leaves out.
pub fn load_config(path: &Path) -> Result<AppConfig, SettingsError> {
    load_with_env(
        path,
        Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .try_parsing(true),
    )
}

fn load_with_env(path: &Path, env: Environment) -> Result<AppConfig, SettingsError> {
    let config = Config::builder()
        .add_source(Config::try_from(&AppConfig::default())?)
        .add_source(File::from(path).required(true))
        .add_source(env)
        .build()?;

    let app: AppConfig = config.try_deserialize()?;
    validate(&app)?;
    Ok(app)
}

/// Check values serde cannot reject on its own.
pub fn validate(config: &AppConfig) -> Result<(), SettingsError> {
    if config.http.timeout_secs == 0 {
        return Err(invalid("http.timeout_secs", "must be positive"));
    }
    if config.snapshot.limit == 0 {
        return Err(invalid("snapshot.limit", "must be positive"));
    }
    if !matches!(config.logging.format.to_lowercase().as_str(), "pretty" | "json") {
        return Err(invalid("logging.format", "expected \"pretty\" or \"json\""));
    }
    for asset_class in AssetClass::all() {
        let provider = config.provider(*asset_class);
        if provider.base_url.trim().is_empty() {
            return Err(invalid(&format!("{}.base_url", asset_class), "must not be empty"));
        }
        if provider.default_symbol.trim().is_empty() {
            return Err(invalid(
                &format!("{}.default_symbol", asset_class),
                "must not be empty",
            ));
        }
    }
    Ok(())
}

fn invalid(key: &str, reason: &str) -> SettingsError {
    SettingsError::Invalid {
        key: key.to_string(),
        reason: reason.to_string(),
    }
}

/// Resolve the API key of an asset class's provider from the process environment.
///
/// `Ok(None)` when the provider needs no key.
pub fn resolve_api_key(
    config: &AppConfig,
    asset_class: AssetClass,
) -> Result<Option<String>, SettingsError> {
    resolve_api_key_with(config, asset_class, |var| std::env::var(var).ok())
}

/// Resolve an API key through a custom variable lookup.
pub fn resolve_api_key_with<F>(
    config: &AppConfig,
    asset_class: AssetClass,
    lookup: F,
) -> Result<Option<String>, SettingsError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(var) = config.provider(asset_class).api_key_env.as_deref() else {
        return Ok(None);
    };
    match lookup(var) {
        Some(key) if !key.trim().is_empty() => Ok(Some(key)),
        _ => Err(SettingsError::MissingApiKey {
            asset_class,
            var: var.to_string(),
        }),
    }
}
