//! Controller configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `CAMPUSBITE_DELIVERY_FEE` - Flat delivery fee in the catalog currency (default: 50)
//! - `CAMPUSBITE_TRACKING_INTERVAL_MS` - Milliseconds between delivery stage
//!   advances (default: 3000)
//! - `CAMPUSBITE_CATALOG_PATH` - YAML catalog file (default: built-in campus catalog)

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use rust_decimal::Decimal;
use thiserror::Error;

const DEFAULT_DELIVERY_FEE: i64 = 50;
const DEFAULT_TRACKING_INTERVAL_MS: u64 = 3_000;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Fee added to every order at checkout
    pub delivery_fee: Decimal,
    /// Time between delivery stage advances on the tracking screen
    pub tracking_interval: Duration,
    /// Catalog file to load instead of the built-in one
    pub catalog_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            delivery_fee: Decimal::from(DEFAULT_DELIVERY_FEE),
            tracking_interval: Duration::from_millis(DEFAULT_TRACKING_INTERVAL_MS),
            catalog_path: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed, the
    /// fee is negative, or the interval is zero.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Same as [`AppConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let delivery_fee = parse_optional::<Decimal, _>(&lookup, "CAMPUSBITE_DELIVERY_FEE")?
            .unwrap_or(defaults.delivery_fee);
        if delivery_fee < Decimal::ZERO {
            return Err(ConfigError::InvalidEnvVar(
                "CAMPUSBITE_DELIVERY_FEE".to_string(),
                "must not be negative".to_string(),
            ));
        }

        let interval_ms = parse_optional::<u64, _>(&lookup, "CAMPUSBITE_TRACKING_INTERVAL_MS")?;
        let tracking_interval = match interval_ms {
            Some(0) => {
                return Err(ConfigError::InvalidEnvVar(
                    "CAMPUSBITE_TRACKING_INTERVAL_MS".to_string(),
                    "must be greater than zero".to_string(),
                ));
            }
            Some(ms) => Duration::from_millis(ms),
            None => defaults.tracking_interval,
        };

        let catalog_path = lookup("CAMPUSBITE_CATALOG_PATH")
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            delivery_fee,
            tracking_interval,
            catalog_path,
        })
    }

    #[must_use]
    pub const fn with_delivery_fee(mut self, fee: Decimal) -> Self {
        self.delivery_fee = fee;
        self
    }

    #[must_use]
    pub const fn with_tracking_interval(mut self, interval: Duration) -> Self {
        self.tracking_interval = interval;
        self
    }

    #[must_use]
    pub fn with_catalog_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.catalog_path = Some(path.into());
        self
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse an optional variable, treating unset and blank the same.
fn parse_optional<T, F>(lookup: &F, key: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string())),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = config_from(&[]).expect("defaults");
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.delivery_fee, Decimal::from(50));
        assert_eq!(config.tracking_interval, Duration::from_secs(3));
        assert!(config.catalog_path.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("CAMPUSBITE_DELIVERY_FEE", "75.5"),
            ("CAMPUSBITE_TRACKING_INTERVAL_MS", "250"),
            ("CAMPUSBITE_CATALOG_PATH", "/etc/campus/catalog.yaml"),
        ])
        .expect("valid");
        assert_eq!(config.delivery_fee, Decimal::new(755, 1));
        assert_eq!(config.tracking_interval, Duration::from_millis(250));
        assert_eq!(
            config.catalog_path,
            Some(PathBuf::from("/etc/campus/catalog.yaml"))
        );
    }

    #[test]
    fn test_blank_values_fall_back() {
        let config = config_from(&[
            ("CAMPUSBITE_DELIVERY_FEE", "  "),
            ("CAMPUSBITE_CATALOG_PATH", ""),
        ])
        .expect("valid");
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_invalid_fee() {
        let err = config_from(&[("CAMPUSBITE_DELIVERY_FEE", "fifty")]).unwrap_err();
        assert!(
            matches!(err, ConfigError::InvalidEnvVar(key, _) if key == "CAMPUSBITE_DELIVERY_FEE")
        );
    }

    #[test]
    fn test_negative_fee() {
        assert!(config_from(&[("CAMPUSBITE_DELIVERY_FEE", "-1")]).is_err());
    }

    #[test]
    fn test_zero_interval() {
        let err = config_from(&[("CAMPUSBITE_TRACKING_INTERVAL_MS", "0")]).unwrap_err();
        assert!(
            matches!(err, ConfigError::InvalidEnvVar(key, _) if key == "CAMPUSBITE_TRACKING_INTERVAL_MS")
        );
    }

    #[test]
    fn test_builders() {
        let config = AppConfig::default()
            .with_delivery_fee(Decimal::ZERO)
            .with_tracking_interval(Duration::from_millis(10))
            .with_catalog_path("menu.yaml");
        assert_eq!(config.delivery_fee, Decimal::ZERO);
        assert_eq!(config.tracking_interval, Duration::from_millis(10));
        assert_eq!(config.catalog_path, Some(PathBuf::from("menu.yaml")));
    }
}
