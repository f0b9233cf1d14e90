//! Provider scope that shares one cart store with every consumer.
//!
//! A [`CartProvider`] owns the process-wide [`CartStore`]. Consumers either
//! hold a [`CartHandle`] directly or, inside [`CartProvider::scope`], call
//! [`use_cart`] to reach the store without threading it through.

use std::future::Future;
use std::ops::Deref;
use std::sync::Arc;

use marketplace_storage::KeyValueStore;
use tokio::task::JoinHandle;
use tracing::warn;

use crate::config::CartConfig;
use crate::error::CartError;
use crate::store::CartStore;

tokio::task_local! {
    static CURRENT_CART: CartHandle;
}

/// Cheap, cloneable reference to the shared cart store.
#[derive(Clone)]
pub struct CartHandle(Arc<CartStore>);

impl Deref for CartHandle {
    type Target = CartStore;

    fn deref(&self) -> &CartStore {
        &self.0
    }
}

impl CartHandle {
    /// Whether two handles point at the same store.
    pub fn same_store(&self, other: &CartHandle) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// Owns the cart store for the lifetime of the application.
pub struct CartProvider {
    handle: CartHandle,
    init: Option<JoinHandle<()>>,
}

impl CartProvider {
    /// Start a provider around `store` and begin loading the persisted cart
    /// in the background.
    ///
    /// # Panics
    /// Panics if called outside a tokio runtime.
    pub fn start(store: CartStore) -> Self {
        let handle = CartHandle(Arc::new(store));
        let loader = handle.clone();
        let init = tokio::spawn(async move {
            loader.initialize().await;
        });

        Self {
            handle,
            init: Some(init),
        }
    }

    /// Build a store from `config` and `storage` and start a provider for it.
    pub fn from_config(config: CartConfig, storage: Arc<dyn KeyValueStore>) -> Self {
        Self::start(CartStore::new(config, storage))
    }

    /// Handle to the shared store.
    pub fn handle(&self) -> CartHandle {
        self.handle.clone()
    }

    /// Wait until the persisted cart has been loaded.
    pub async fn ready(&self) {
        self.handle.initialize().await;
    }

    /// Run `fut` with this provider's cart available through [`use_cart`].
    ///
    /// The scope covers `fut` itself; tasks spawned from inside it do not
    /// inherit the cart and need their own scope or a handle.
    pub async fn scope<F: Future>(&self, fut: F) -> F::Output {
        CURRENT_CART.scope(self.handle.clone(), fut).await
    }

    /// Synchronous variant of [`CartProvider::scope`].
    pub fn sync_scope<R>(&self, f: impl FnOnce() -> R) -> R {
        CURRENT_CART.sync_scope(self.handle.clone(), f)
    }

    /// Stop the provider once the background load has finished.
    pub async fn shutdown(mut self) {
        if let Some(init) = self.init.take() {
            if let Err(e) = init.await {
                warn!(error = %e, "cart initialization task failed");
            }
        }
    }
}

/// The cart of the enclosing [`CartProvider::scope`].
///
/// # Panics
/// Panics if called outside a provider scope. That is a programming error,
/// not a runtime condition; use [`try_use_cart`] to probe instead.
pub fn use_cart() -> CartHandle {
    match try_use_cart() {
        Ok(handle) => handle,
        Err(e) => panic!("{e}"),
    }
}

/// The cart of the enclosing provider scope, if there is one.
pub fn try_use_cart() -> Result<CartHandle, CartError> {
    CURRENT_CART
        .try_with(CartHandle::clone)
        .map_err(|_| CartError::NoProvider)
}

#[cfg(test)]
mod tests {
    use marketplace_storage::MemoryStore;

    use super::*;

    fn provider() -> CartProvider {
        CartProvider::from_config(CartConfig::default(), Arc::new(MemoryStore::new()))
    }

    #[tokio::test]
    async fn test_use_cart_inside_scope() {
        let provider = provider();
        let handle = provider.scope(async { use_cart() }).await;
        assert!(handle.same_store(&provider.handle()));

        let sync_handle = provider.sync_scope(use_cart);
        assert!(sync_handle.same_store(&handle));
    }

    #[tokio::test]
    async fn test_try_use_cart_outside_scope() {
        assert!(matches!(try_use_cart(), Err(CartError::NoProvider)));
    }

    #[test]
    #[should_panic(expected = "use_cart must be used within a CartProvider")]
    fn test_use_cart_outside_scope_panics() {
        let _ = use_cart();
    }

    #[tokio::test]
    async fn test_ready_and_shutdown() {
        let provider = provider();
        provider.ready().await;
        assert!(provider.handle().is_loaded());
        provider.shutdown().await;
    }
}
