//! Cart store configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::cart::MAX_QUANTITY_PER_ITEM;
use crate::error::CartError;
use crate::format::Locale;
use crate::money::Currency;

/// Namespace prefix for keys the storefront writes to device storage.
pub const STORAGE_NAMESPACE: &str = "@Gomarketplace";

/// What to do when writing the cart to storage fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PersistFailurePolicy {
    /// Return the storage error from the command.
    #[default]
    Surface,
    /// Log the error and report the command as successful.
    LogAndIgnore,
}

/// Configuration for a cart store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CartConfig {
    /// Storage key holding the serialized cart.
    pub storage_key: String,
    /// Currency the cart total is expressed in.
    pub currency: Currency,
    /// Locale used to format the cart total.
    pub locale: Locale,
    /// Largest quantity a single product may reach.
    pub max_quantity_per_item: u32,
    /// Behavior on storage write failures.
    pub on_persist_failure: PersistFailurePolicy,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            storage_key: marketplace_storage::cache_key!(STORAGE_NAMESPACE, "cart"),
            currency: Currency::default(),
            locale: Locale::default(),
            max_quantity_per_item: MAX_QUANTITY_PER_ITEM,
            on_persist_failure: PersistFailurePolicy::default(),
        }
    }
}

impl CartConfig {
    /// Parse a TOML document. Missing fields take their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, CartError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CartError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| CartError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&content)
    }

    /// Set the storage key.
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    /// Set the display currency.
    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    /// Set the display locale.
    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    /// Set the per-item quantity limit.
    pub fn with_max_quantity(mut self, max: u32) -> Self {
        self.max_quantity_per_item = max;
        self
    }

    /// Set the write failure policy.
    pub fn with_persist_failure_policy(mut self, policy: PersistFailurePolicy) -> Self {
        self.on_persist_failure = policy;
        self
    }

    /// Reject settings the store cannot run with.
    pub fn validate(&self) -> Result<(), CartError> {
        if self.storage_key.is_empty() {
            return Err(CartError::Config("storage_key must not be empty".to_string()));
        }
        if self.max_quantity_per_item == 0 {
            return Err(CartError::Config(
                "max_quantity_per_item must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CartConfig::default();
        assert_eq!(config.storage_key, "@Gomarketplace:cart");
        assert_eq!(config.currency, Currency::BRL);
        assert_eq!(config.locale, Locale::PtBr);
        assert_eq!(config.max_quantity_per_item, 9999);
        assert_eq!(config.on_persist_failure, PersistFailurePolicy::Surface);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = CartConfig::from_toml_str(
            r#"
            currency = "USD"
            locale = "en-US"
            on_persist_failure = "log_and_ignore"
            "#,
        )
        .unwrap();

        assert_eq!(config.currency, Currency::USD);
        assert_eq!(config.locale, Locale::EnUs);
        assert_eq!(config.on_persist_failure, PersistFailurePolicy::LogAndIgnore);
        assert_eq!(config.storage_key, "@Gomarketplace:cart");
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(matches!(
            CartConfig::from_toml_str("max_quantity_per_item = 0"),
            Err(CartError::Config(_))
        ));
        assert!(CartConfig::from_toml_str(r#"storage_key = """#).is_err());
        assert!(CartConfig::from_toml_str(r#"currency = "XYZ""#).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cart.toml");
        std::fs::write(&path, r#"storage_key = "@Test:cart""#).unwrap();

        let config = CartConfig::load(&path).unwrap();
        assert_eq!(config.storage_key, "@Test:cart");

        assert!(CartConfig::load(dir.path().join("missing.toml")).is_err());
    }

    #[test]
    fn test_builders() {
        let config = CartConfig::default()
            .with_storage_key("k")
            .with_max_quantity(5)
            .with_currency(Currency::EUR)
            .with_locale(Locale::EnUs)
            .with_persist_failure_policy(PersistFailurePolicy::LogAndIgnore);
        assert_eq!(config.storage_key, "k");
        assert_eq!(config.max_quantity_per_item, 5);
        assert_eq!(config.currency, Currency::EUR);
    }
}
