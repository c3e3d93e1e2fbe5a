//! # Configuration State
//!
//! Back office configuration loaded at startup.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     SOLE_CURRENCY_SYMBOL=₺   SOLE_BACKUP_DIR=/mnt/usb                  │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/sole-pos/backoffice.toml (Linux)                         │
//! │     ~/Library/Application Support/com.sole.sole-pos/backoffice.toml    │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     TRY, demo data on first start, platform backup directory           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [currency]
//! code = "TRY"
//! symbol = "₺"
//! decimals = 2
//! symbol_after = true
//!
//! [store]
//! seed_demo_data = true
//!
//! [backup]
//! dir = "/mnt/usb/sole-backups"
//! ```
//!
//! Read-only after startup, so no mutex.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{ApiError, ApiResult};

/// Environment variable that points at an alternative config file.
pub const CONFIG_PATH_VAR: &str = "SOLE_CONFIG";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyConfig {
    /// ISO 4217 code
    #[serde(default = "default_currency_code")]
    pub code: String,

    #[serde(default = "default_currency_symbol")]
    pub symbol: String,

    #[serde(default = "default_currency_decimals")]
    pub decimals: u8,

    /// `1500.00 ₺` rather than `₺1500.00`
    #[serde(default = "default_symbol_after", alias = "symbol_after")]
    pub symbol_after: bool,
}

fn default_currency_code() -> String {
    "TRY".to_string()
}

fn default_currency_symbol() -> String {
    "₺".to_string()
}

fn default_currency_decimals() -> u8 {
    2
}

fn default_symbol_after() -> bool {
    true
}

impl Default for CurrencyConfig {
    fn default() -> Self {
        CurrencyConfig {
            code: default_currency_code(),
            symbol: default_currency_symbol(),
            decimals: default_currency_decimals(),
            symbol_after: default_symbol_after(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreBootConfig {
    /// Start with the demo store instead of an empty one
    #[serde(default = "default_seed_demo", alias = "seed_demo_data")]
    pub seed_demo_data: bool,
}

fn default_seed_demo() -> bool {
    true
}

impl Default for StoreBootConfig {
    fn default() -> Self {
        StoreBootConfig {
            seed_demo_data: default_seed_demo(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupConfig {
    /// Where exports go; `None` uses the platform data directory
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    #[serde(default)]
    pub currency: CurrencyConfig,

    #[serde(default)]
    pub store: StoreBootConfig,

    #[serde(default)]
    pub backup: BackupConfig,
}

impl AppConfig {
    /// Loads configuration from file and environment.
    ///
    /// A missing file is not an error; an unreadable or malformed one is.
    pub fn load(config_path: Option<PathBuf>) -> ApiResult<Self> {
        let mut config = Self::default();

        let path = config_path
            .or_else(|| std::env::var(CONFIG_PATH_VAR).ok().map(PathBuf::from))
            .or_else(Self::default_config_path);

        if let Some(path) = path {
            if path.exists() {
                info!(?path, "Loading back office config from file");
                config = Self::from_file(&path)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> ApiResult<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ApiError::config(format!("Cannot read {}: {}", path.display(), e)))?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> ApiResult<Self> {
        toml::from_str(contents).map_err(|e| ApiError::config(format!("Invalid config: {}", e)))
    }

    pub fn validate(&self) -> ApiResult<()> {
        if self.currency.decimals > 4 {
            return Err(ApiError::config("Currency decimals must be between 0 and 4"));
        }
        if self.currency.symbol.trim().is_empty() {
            return Err(ApiError::config("Currency symbol cannot be empty"));
        }
        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies `SOLE_*` overrides from `lookup`.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(code) = lookup("SOLE_CURRENCY_CODE") {
            self.currency.code = code;
        }

        if let Some(symbol) = lookup("SOLE_CURRENCY_SYMBOL") {
            self.currency.symbol = symbol;
        }

        if let Some(decimals) = lookup("SOLE_CURRENCY_DECIMALS") {
            if let Ok(d) = decimals.parse::<u8>() {
                self.currency.decimals = d;
            }
        }

        if let Some(seed) = lookup("SOLE_SEED_DEMO") {
            match seed.to_lowercase().as_str() {
                "1" | "true" | "yes" => self.store.seed_demo_data = true,
                "0" | "false" | "no" => self.store.seed_demo_data = false,
                other => warn!(value = %other, "Ignoring SOLE_SEED_DEMO"),
            }
        }

        if let Some(dir) = lookup("SOLE_BACKUP_DIR") {
            debug!(dir = %dir, "Overriding backup directory from environment");
            self.backup.dir = Some(PathBuf::from(dir));
        }
    }

    /// Platform config file location.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "sole", "sole-pos")
            .map(|dirs| dirs.config_dir().join("backoffice.toml"))
    }

    /// Configured backup directory, or the platform default.
    pub fn backup_dir(&self) -> ApiResult<PathBuf> {
        match &self.backup.dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(sole_store::default_backup_dir()?),
        }
    }

    /// Formats a minor-unit amount for display.
    ///
    /// ## Example
    /// ```rust
    /// use sole_backoffice::state::AppConfig;
    ///
    /// let config = AppConfig::default();
    /// assert_eq!(config.format_currency(150_000), "1500.00 ₺");
    /// ```
    pub fn format_currency(&self, cents: i64) -> String {
        let decimals = self.currency.decimals as u32;
        let divisor = 10_i64.pow(decimals);
        let whole = (cents / divisor).abs();
        let frac = (cents % divisor).abs();
        let sign = if cents < 0 { "-" } else { "" };

        let number = if decimals > 0 {
            format!("{}.{:0width$}", whole, frac, width = decimals as usize)
        } else {
            whole.to_string()
        };

        if self.currency.symbol_after {
            format!("{}{} {}", sign, number, self.currency.symbol)
        } else {
            format!("{}{}{}", sign, self.currency.symbol, number)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_format_currency() {
        let config = AppConfig::default();
        assert_eq!(config.format_currency(123_456), "1234.56 ₺");
        assert_eq!(config.format_currency(1), "0.01 ₺");
        assert_eq!(config.format_currency(0), "0.00 ₺");
        assert_eq!(config.format_currency(-1234), "-12.34 ₺");
    }

    #[test]
    fn test_format_currency_symbol_before() {
        let mut config = AppConfig::default();
        config.currency.symbol = "$".to_string();
        config.currency.symbol_after = false;
        assert_eq!(config.format_currency(1234), "$12.34");
        assert_eq!(config.format_currency(-1234), "-$12.34");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = AppConfig::from_toml(
            r#"
            [backup]
            dir = "/tmp/sole"
            "#,
        )
        .unwrap();
        assert_eq!(config.backup.dir, Some(PathBuf::from("/tmp/sole")));
        assert_eq!(config.currency, CurrencyConfig::default());
        assert!(config.store.seed_demo_data);
    }

    #[test]
    fn test_snake_case_keys_are_accepted() {
        let config = AppConfig::from_toml(
            r#"
            [currency]
            symbol_after = false

            [store]
            seed_demo_data = false
            "#,
        )
        .unwrap();
        assert!(!config.currency.symbol_after);
        assert!(!config.store.seed_demo_data);
    }

    #[test]
    fn test_invalid_toml_is_a_config_error() {
        let err = AppConfig::from_toml("[currency\n").unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::ConfigError);
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            ("SOLE_CURRENCY_SYMBOL", "TL"),
            ("SOLE_SEED_DEMO", "false"),
            ("SOLE_BACKUP_DIR", "/mnt/usb"),
        ]
        .into_iter()
        .collect();

        let mut config = AppConfig::default();
        config.apply_overrides(|k| vars.get(k).map(|v| v.to_string()));

        assert_eq!(config.currency.symbol, "TL");
        assert!(!config.store.seed_demo_data);
        assert_eq!(config.backup_dir().unwrap(), PathBuf::from("/mnt/usb"));
    }

    #[test]
    fn test_validate() {
        let mut config = AppConfig::default();
        assert!(config.validate().is_ok());
        config.currency.decimals = 9;
        assert!(config.validate().is_err());
    }
}
