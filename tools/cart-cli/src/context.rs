//! CLI execution context.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context as _, Result};
use marketplace_cart::CartProvider;
use marketplace_storage::FileStore;
use tracing::debug;

use crate::config::CliConfig;
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Output handler.
    pub output: Output,
    /// Provider owning the cart store.
    pub provider: CartProvider,
}

impl Context {
    /// Load config, open storage and start the cart provider.
    pub async fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let config = match config_path {
            Some(path) => CliConfig::load(Path::new(path))?,
            None => {
                let cwd = std::env::current_dir().context("Failed to get current directory")?;
                Self::find_config(&cwd)?.unwrap_or_default()
            }
        };

        let store = FileStore::open(&config.storage.data_dir)
            .await
            .with_context(|| {
                format!("Failed to open storage at {}", config.storage.data_dir.display())
            })?;
        debug!(data_dir = %store.root().display(), "opened cart storage");

        let provider = CartProvider::from_config(config.cart.clone(), Arc::new(store));
        provider.ready().await;

        Ok(Self {
            config,
            output,
            provider,
        })
    }

    /// Find config file in the directory tree.
    fn find_config(start: &Path) -> Result<Option<CliConfig>> {
        let config_names = ["cart.toml", ".cart.toml"];

        let mut current = PathBuf::from(start);
        loop {
            for name in &config_names {
                let config_path = current.join(name);
                if config_path.exists() {
                    return CliConfig::load(&config_path).map(Some);
                }
            }

            if !current.pop() {
                return Ok(None);
            }
        }
    }

    /// Wait for background work and release the provider.
    pub async fn shutdown(self) {
        self.provider.shutdown().await;
    }
}
