//! CLI configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use marketplace_cart::CartConfig;
use serde::{Deserialize, Serialize};

/// CLI configuration file (`cart.toml`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Where the cart is stored on disk.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Cart store settings.
    #[serde(default)]
    pub cart: CartConfig,
}

impl CliConfig {
    /// Load config from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
    }

    fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.cart.validate()?;
        Ok(config)
    }
}

/// Storage location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the key-value files.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(".gomarketplace")
}

#[cfg(test)]
mod tests {
    use marketplace_cart::prelude::{Currency, Locale};

    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = CliConfig::parse("").unwrap();
        assert_eq!(config.storage.data_dir, PathBuf::from(".gomarketplace"));
        assert_eq!(config.cart.storage_key, "@Gomarketplace:cart");
    }

    #[test]
    fn test_sections() {
        let config = CliConfig::parse(
            r#"
            [storage]
            data_dir = "/tmp/cart"

            [cart]
            currency = "USD"
            locale = "en-US"
            "#,
        )
        .unwrap();
        assert_eq!(config.storage.data_dir, PathBuf::from("/tmp/cart"));
        assert_eq!(config.cart.currency, Currency::USD);
        assert_eq!(config.cart.locale, Locale::EnUs);
    }

    #[test]
    fn test_invalid_cart_section_rejected() {
        assert!(CliConfig::parse("[cart]\nmax_quantity_per_item = 0").is_err());
    }

    #[test]
    fn test_load_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("cart.toml");
        let err = CliConfig::load(&missing).unwrap_err();
        assert!(format!("{:#}", err).contains("cart.toml"));
    }
}
