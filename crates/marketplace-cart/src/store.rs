//! The cart store: authoritative in-memory cart mirrored to storage.

use std::sync::Arc;

use marketplace_storage::{Cache, KeyValueStore, StorageError};
use serde::Serialize;
use tokio::sync::{watch, Mutex, OnceCell};
use tracing::{debug, error, info, instrument, warn};

use crate::cart::{
    AddOutcome, CartItem, CartState, DecrementOutcome, NewCartItem, PendingRemoval,
    RemovalOutcome,
};
use crate::config::{CartConfig, PersistFailurePolicy};
use crate::confirm::{ConfirmRemoval, RemovalPrompt};
use crate::error::CartError;
use crate::format::{CurrencyFormatter, LocaleFormatter};
use crate::money::{Money, Price};

/// Read-only view of the cart handed to consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartSnapshot {
    /// Items in insertion order.
    pub items: Vec<CartItem>,
    /// Formatted sum of price times quantity.
    pub cart_total: String,
    /// Sum of quantities.
    pub total_items_in_cart: u64,
    /// Whether the persisted cart has been loaded.
    pub loaded: bool,
}

/// Result of [`CartStore::decrement_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecrementResult {
    /// Quantity went down by one.
    Decremented { quantity: u32 },
    /// The user confirmed and the product was removed.
    Removed,
    /// The user declined or dismissed the prompt, or the item changed meanwhile.
    Kept,
    /// No product with that identifier.
    NotFound,
}

/// Shopping cart state container.
///
/// Every command computes the complete next list from the current one,
/// commits it in memory, publishes a snapshot and writes that same list to
/// storage before releasing the state lock. Storage therefore always ends up
/// holding the most recently applied list.
pub struct CartStore {
    cache: Cache<Arc<dyn KeyValueStore>>,
    config: CartConfig,
    formatter: Arc<dyn CurrencyFormatter>,
    state: Mutex<CartState>,
    loaded: OnceCell<()>,
    snapshots: watch::Sender<CartSnapshot>,
}

impl CartStore {
    /// Create an empty, not yet loaded store.
    ///
    /// The cart total is formatted with a [`LocaleFormatter`] for the
    /// configured locale.
    pub fn new(config: CartConfig, storage: Arc<dyn KeyValueStore>) -> Self {
        let formatter: Arc<dyn CurrencyFormatter> =
            Arc::new(LocaleFormatter::new(config.locale));
        let initial = snapshot_of(&CartState::new(), false, &config, formatter.as_ref());
        let (snapshots, _) = watch::channel(initial);

        Self {
            cache: Cache::new(storage),
            config,
            formatter,
            state: Mutex::new(CartState::new()),
            loaded: OnceCell::new(),
            snapshots,
        }
    }

    /// Replace the currency formatter.
    pub fn with_formatter(mut self, formatter: impl CurrencyFormatter + 'static) -> Self {
        self.formatter = Arc::new(formatter);
        let initial = snapshot_of(&CartState::new(), false, &self.config, self.formatter.as_ref());
        self.snapshots.send_replace(initial);
        self
    }

    /// The store's configuration.
    pub fn config(&self) -> &CartConfig {
        &self.config
    }

    /// Load the persisted cart.
    ///
    /// Runs at most once; later calls (and every command) wait for the first
    /// load to finish. A missing key leaves the cart empty. Unreadable or
    /// malformed data is logged and also leaves the cart empty.
    pub async fn initialize(&self) {
        self.loaded.get_or_init(|| self.load()).await;
    }

    /// Whether [`CartStore::initialize`] has completed.
    pub fn is_loaded(&self) -> bool {
        self.loaded.initialized()
    }

    #[instrument(skip(self), fields(key = %self.config.storage_key))]
    async fn load(&self) {
        let key = &self.config.storage_key;
        let items = match self.cache.get::<Vec<CartItem>>(key).await {
            Ok(Some(items)) => items,
            Ok(None) => {
                debug!("no persisted cart");
                Vec::new()
            }
            Err(StorageError::Serialization(e)) => {
                warn!(error = %e, "persisted cart is malformed, starting empty");
                Vec::new()
            }
            Err(e) => {
                error!(error = %e, "failed to read persisted cart, starting empty");
                Vec::new()
            }
        };

        let (state, repairs) = CartState::from_loaded(items, self.config.max_quantity_per_item);

        let mut guard = self.state.lock().await;
        *guard = state;
        self.publish(&guard, true);

        if repairs.any() {
            warn!(
                dropped_empty = repairs.dropped_empty,
                merged_duplicates = repairs.merged_duplicates,
                capped = repairs.capped,
                "repaired persisted cart"
            );
            if let Err(e) = self.persist(&guard).await {
                error!(error = %e, "failed to write repaired cart");
            }
        }

        info!(
            products = guard.len(),
            total_items = guard.total_items(),
            "cart loaded"
        );
    }

    /// Add a product, or bump its quantity if it is already in the cart.
    #[instrument(skip(self, candidate), fields(product_id = %candidate.id))]
    pub async fn add_to_cart(&self, candidate: NewCartItem) -> Result<AddOutcome, CartError> {
        let max = self.config.max_quantity_per_item;
        let outcome = self
            .mutate(|next| next.add(candidate, max).map(|outcome| (outcome, true)))
            .await?;
        debug!(?outcome, "added to cart");
        Ok(outcome)
    }

    /// Increase a product's quantity by one; `Ok(None)` if it is not in the cart.
    #[instrument(skip(self))]
    pub async fn increment(&self, id: &str) -> Result<Option<u32>, CartError> {
        let max = self.config.max_quantity_per_item;
        let quantity = self
            .mutate(|next| {
                let quantity = next.increment(id, max)?;
                Ok((quantity, quantity.is_some()))
            })
            .await?;
        debug!(?quantity, "incremented");
        Ok(quantity)
    }

    /// Decrease a product's quantity by one.
    ///
    /// At quantity 1 the cart is left untouched and a
    /// [`DecrementOutcome::NeedsConfirmation`] is returned; pass its
    /// [`PendingRemoval`] to [`CartStore::finalize_removal`] once the user
    /// has agreed.
    #[instrument(skip(self))]
    pub async fn decrement(&self, id: &str) -> Result<DecrementOutcome, CartError> {
        let outcome = self
            .mutate(|next| {
                let outcome = next.decrement(id);
                let changed = matches!(outcome, DecrementOutcome::Decremented { .. });
                Ok((outcome, changed))
            })
            .await?;
        debug!(?outcome, "decremented");
        Ok(outcome)
    }

    /// Remove a product whose removal the user confirmed.
    #[instrument(skip(self, pending), fields(product_id = %pending.id))]
    pub async fn finalize_removal(
        &self,
        pending: &PendingRemoval,
    ) -> Result<RemovalOutcome, CartError> {
        let outcome = self
            .mutate(|next| {
                let outcome = next.finalize_removal(pending);
                Ok((outcome, outcome == RemovalOutcome::Removed))
            })
            .await?;
        debug!(?outcome, "finalized removal");
        Ok(outcome)
    }

    /// Decrement, asking `confirm` before removing the last unit.
    ///
    /// The state lock is not held while the prompt is open.
    pub async fn decrement_with(
        &self,
        id: &str,
        confirm: &dyn ConfirmRemoval,
    ) -> Result<DecrementResult, CartError> {
        let pending = match self.decrement(id).await? {
            DecrementOutcome::Decremented { quantity } => {
                return Ok(DecrementResult::Decremented { quantity })
            }
            DecrementOutcome::NotFound => return Ok(DecrementResult::NotFound),
            DecrementOutcome::NeedsConfirmation(pending) => pending,
        };

        let answer = confirm.confirm(&RemovalPrompt::for_removal(pending.clone())).await;
        if !answer.is_accepted() {
            debug!(product_id = %pending.id, ?answer, "removal cancelled");
            return Ok(DecrementResult::Kept);
        }

        match self.finalize_removal(&pending).await? {
            RemovalOutcome::Removed => Ok(DecrementResult::Removed),
            RemovalOutcome::Stale => Ok(DecrementResult::Kept),
            RemovalOutcome::NotFound => Ok(DecrementResult::NotFound),
        }
    }

    /// Remove a product regardless of its quantity.
    #[instrument(skip(self))]
    pub async fn remove(&self, id: &str) -> Result<Option<CartItem>, CartError> {
        self.mutate(|next| {
            let removed = next.remove(id);
            let changed = removed.is_some();
            Ok((removed, changed))
        })
        .await
    }

    /// Empty the cart, returning how many products were removed.
    #[instrument(skip(self))]
    pub async fn clear(&self) -> Result<usize, CartError> {
        self.mutate(|next| {
            let removed = next.clear();
            Ok((removed, removed > 0))
        })
        .await
    }

    /// Current snapshot.
    pub fn snapshot(&self) -> CartSnapshot {
        self.snapshots.borrow().clone()
    }

    /// Subscribe to snapshot updates.
    ///
    /// The receiver always holds the latest snapshot; intermediate ones may
    /// be skipped by slow consumers.
    pub fn subscribe(&self) -> watch::Receiver<CartSnapshot> {
        self.snapshots.subscribe()
    }

    /// Items in the cart.
    pub fn items(&self) -> Vec<CartItem> {
        self.snapshots.borrow().items.clone()
    }

    /// Formatted cart total.
    pub fn cart_total(&self) -> String {
        self.snapshots.borrow().cart_total.clone()
    }

    /// Cart total as money in the configured currency.
    pub fn cart_total_value(&self) -> Money {
        let total = self
            .snapshots
            .borrow()
            .items
            .iter()
            .fold(Price::ZERO, |acc, item| acc.plus(item.line_total()));
        total.to_money(self.config.currency)
    }

    /// Sum of quantities in the cart.
    pub fn total_items_in_cart(&self) -> u64 {
        self.snapshots.borrow().total_items_in_cart
    }

    /// Apply one transition to a copy of the current list and, if it reports
    /// a change, commit and persist the copy.
    async fn mutate<T, F>(&self, f: F) -> Result<T, CartError>
    where
        F: FnOnce(&mut CartState) -> Result<(T, bool), CartError>,
    {
        self.initialize().await;

        let mut guard = self.state.lock().await;
        let mut next = guard.clone();
        let (outcome, changed) = f(&mut next)?;
        if !changed {
            return Ok(outcome);
        }

        *guard = next;
        self.publish(&guard, true);
        self.persist(&guard).await?;
        Ok(outcome)
    }

    fn publish(&self, state: &CartState, loaded: bool) {
        let snapshot = snapshot_of(state, loaded, &self.config, self.formatter.as_ref());
        self.snapshots.send_replace(snapshot);
    }

    async fn persist(&self, state: &CartState) -> Result<(), CartError> {
        let key = &self.config.storage_key;
        match self.cache.set(key, state.items()).await {
            Ok(()) => Ok(()),
            Err(e) => match self.config.on_persist_failure {
                PersistFailurePolicy::Surface => {
                    error!(key = %key, error = %e, "failed to persist cart");
                    Err(e.into())
                }
                PersistFailurePolicy::LogAndIgnore => {
                    error!(key = %key, error = %e, "failed to persist cart, continuing");
                    Ok(())
                }
            },
        }
    }
}

fn snapshot_of(
    state: &CartState,
    loaded: bool,
    config: &CartConfig,
    formatter: &dyn CurrencyFormatter,
) -> CartSnapshot {
    CartSnapshot {
        items: state.items().to_vec(),
        cart_total: formatter.format(state.total_value().to_money(config.currency)),
        total_items_in_cart: state.total_items(),
        loaded,
    }
}
