//! CLI configuration.

use std::path::Path;

use anyhow::{Context, Result};
use qeirex_commerce::cart::{
    ValidationRules, DEFAULT_FREE_SHIPPING_THRESHOLD, MAX_QUANTITY_PER_ITEM,
};
use qeirex_commerce::Money;
use serde::{Deserialize, Serialize};

/// Config file names searched for, in order.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["qeirex.toml", ".qeirex.toml", "qeirex.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Cart storage configuration.
    #[serde(default)]
    pub store: StoreConfig,

    /// Validation applied to replayed actions.
    #[serde(default)]
    pub validation: ValidationConfig,

    /// Log output configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if is_json(path) {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }

    /// Save config to a file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = if is_json(path) {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }

    /// Validation rules for the cart boundary.
    pub fn validation_rules(&self) -> ValidationRules {
        ValidationRules {
            max_quantity: self.validation.max_quantity,
            allow_negative_prices: self.validation.allow_negative_prices,
            ..ValidationRules::default()
        }
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
}

/// Cart storage configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Directory holding saved cart snapshots.
    #[serde(default = "default_snapshot_dir")]
    pub snapshot_dir: String,

    /// Total at which shipping becomes free, in dollars.
    #[serde(default = "default_free_shipping_threshold")]
    pub free_shipping_threshold: Money,

    /// Session used when `--session` is not given.
    #[serde(default = "default_session")]
    pub default_session: String,

    /// JSON catalog to use instead of the featured products.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog_path: Option<String>,
}

fn default_snapshot_dir() -> String {
    ".qeirex/carts".to_string()
}

fn default_free_shipping_threshold() -> Money {
    DEFAULT_FREE_SHIPPING_THRESHOLD
}

fn default_session() -> String {
    "default".to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            snapshot_dir: default_snapshot_dir(),
            free_shipping_threshold: default_free_shipping_threshold(),
            default_session: default_session(),
            catalog_path: None,
        }
    }
}

/// Validation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Upper bound on any line's quantity.
    #[serde(default = "default_max_quantity")]
    pub max_quantity: i64,

    /// Accept prices below zero.
    #[serde(default)]
    pub allow_negative_prices: bool,
}

fn default_max_quantity() -> i64 {
    MAX_QUANTITY_PER_ITEM
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            max_quantity: default_max_quantity(),
            allow_negative_prices: false,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// JSON lines (for log aggregation).
    Json,
    /// Human-readable format.
    #[default]
    Human,
}

/// Log output configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset.
    #[serde(default = "default_level")]
    pub level: String,

    /// Output format.
    #[serde(default)]
    pub format: LogFormat,
}

fn default_level() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: LogFormat::default(),
        }
    }
}

/// Generate a default qeirex.toml config file.
pub fn generate_default_config() -> String {
    r#"# Qeirex storefront configuration

[store]
snapshot_dir = ".qeirex/carts"
free_shipping_threshold = 25.00
default_session = "default"
# catalog_path = "catalog.json"

[validation]
max_quantity = 9999
allow_negative_prices = false

[logging]
level = "warn"
format = "human"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses_to_defaults() {
        let config: CliConfig = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config, CliConfig::default());
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: CliConfig = toml::from_str(
            r#"
[store]
free_shipping_threshold = 40
[logging]
format = "json"
"#,
        )
        .unwrap();
        assert_eq!(config.store.free_shipping_threshold, Money::new(4000));
        assert_eq!(config.store.snapshot_dir, ".qeirex/carts");
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.validation.max_quantity, MAX_QUANTITY_PER_ITEM);
    }

    #[test]
    fn test_validation_rules_from_config() {
        let mut config = CliConfig::default();
        config.validation.max_quantity = 10;
        config.validation.allow_negative_prices = true;

        let rules = config.validation_rules();
        assert_eq!(rules.max_quantity, 10);
        assert!(rules.allow_negative_prices);
        assert!(rules.require_unique_ids);
    }

    #[test]
    fn test_save_and_load_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("qeirex.json");

        let mut config = CliConfig::default();
        config.store.default_session = "guest".to_string();
        config.save(&path).unwrap();

        assert_eq!(CliConfig::load(&path).unwrap(), config);
    }
}
