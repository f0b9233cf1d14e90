//! Cart list and its transitions.
//!
//! Every transition here is a plain function of the current list. The store
//! clones the list, applies one transition to the clone, and only then
//! commits the result to memory and storage.

use serde::{Deserialize, Serialize};

use crate::cart::{CartItem, NewCartItem};
use crate::error::CartError;
use crate::ids::ProductId;
use crate::money::Price;

/// Default maximum quantity allowed per line item.
pub const MAX_QUANTITY_PER_ITEM: u32 = 9999;

/// Ordered, identifier-unique list of cart items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CartState {
    items: Vec<CartItem>,
}

/// Result of adding a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// The product was appended with quantity 1.
    Added,
    /// The product was already present; its quantity is now `quantity`.
    Incremented { quantity: u32 },
}

/// Result of decrementing a product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecrementOutcome {
    /// Quantity went down by one.
    Decremented { quantity: u32 },
    /// The product is at quantity 1; removing it needs the user's consent.
    NeedsConfirmation(PendingRemoval),
    /// No product with that identifier.
    NotFound,
}

/// A removal waiting for user confirmation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingRemoval {
    /// Product to remove.
    pub id: ProductId,
    /// Its title, for the prompt.
    pub title: String,
}

/// Result of finalizing a pending removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemovalOutcome {
    /// The item was removed.
    Removed,
    /// The item changed quantity since the removal was requested; kept.
    Stale,
    /// The item is no longer in the cart.
    NotFound,
}

/// What [`CartState::from_loaded`] had to fix in persisted data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadRepairs {
    /// Entries dropped because their quantity was 0.
    pub dropped_empty: usize,
    /// Entries folded into an earlier entry with the same identifier.
    pub merged_duplicates: usize,
    /// Entries whose quantity was lowered to the per-item maximum.
    pub capped: usize,
}

impl LoadRepairs {
    /// Whether anything was changed.
    pub fn any(&self) -> bool {
        self.dropped_empty + self.merged_duplicates + self.capped > 0
    }
}

impl CartState {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cart from persisted items, restoring the list invariants.
    ///
    /// Quantity-0 entries are dropped, duplicate identifiers are merged into
    /// the first occurrence (quantities summed), and quantities above
    /// `max_quantity` are capped. Order of first occurrence is preserved.
    pub fn from_loaded(items: Vec<CartItem>, max_quantity: u32) -> (Self, LoadRepairs) {
        let mut repairs = LoadRepairs::default();
        let mut state = Self::new();

        for item in items {
            if item.quantity == 0 {
                repairs.dropped_empty += 1;
                continue;
            }
            if let Some(existing) = state.items.iter_mut().find(|i| i.id == item.id) {
                existing.quantity = existing.quantity.saturating_add(item.quantity);
                repairs.merged_duplicates += 1;
                continue;
            }
            state.items.push(item);
        }

        for item in &mut state.items {
            if item.quantity > max_quantity {
                item.quantity = max_quantity;
                repairs.capped += 1;
            }
        }

        (state, repairs)
    }

    /// Items in insertion order.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Take the items out.
    pub fn into_items(self) -> Vec<CartItem> {
        self.items
    }

    /// Number of distinct products.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get an item by identifier.
    pub fn get(&self, id: &str) -> Option<&CartItem> {
        self.items.iter().find(|i| i.id == *id)
    }

    /// Add a product: bump its quantity if present, append it otherwise.
    pub fn add(
        &mut self,
        candidate: NewCartItem,
        max_quantity: u32,
    ) -> Result<AddOutcome, CartError> {
        if let Some(existing) = self.items.iter_mut().find(|i| i.id == candidate.id) {
            existing.quantity = bumped(existing.quantity, max_quantity)?;
            return Ok(AddOutcome::Incremented {
                quantity: existing.quantity,
            });
        }

        if max_quantity == 0 {
            return Err(CartError::QuantityExceedsLimit(1, max_quantity));
        }
        self.items.push(candidate.into_item());
        Ok(AddOutcome::Added)
    }

    /// Increase a product's quantity by one.
    ///
    /// Returns the new quantity, or `None` if the product is not in the cart.
    pub fn increment(&mut self, id: &str, max_quantity: u32) -> Result<Option<u32>, CartError> {
        match self.items.iter_mut().find(|i| i.id == *id) {
            Some(item) => {
                item.quantity = bumped(item.quantity, max_quantity)?;
                Ok(Some(item.quantity))
            }
            None => Ok(None),
        }
    }

    /// Decrease a product's quantity by one.
    ///
    /// At quantity 1 nothing changes; the caller gets a [`PendingRemoval`]
    /// to confirm and pass to [`CartState::finalize_removal`].
    pub fn decrement(&mut self, id: &str) -> DecrementOutcome {
        match self.items.iter_mut().find(|i| i.id == *id) {
            Some(item) if item.quantity > 1 => {
                item.quantity -= 1;
                DecrementOutcome::Decremented {
                    quantity: item.quantity,
                }
            }
            Some(item) => DecrementOutcome::NeedsConfirmation(PendingRemoval {
                id: item.id.clone(),
                title: item.title.clone(),
            }),
            None => DecrementOutcome::NotFound,
        }
    }

    /// Remove a confirmed pending removal.
    ///
    /// The item is only removed if it is still at quantity 1, so an
    /// increment that landed while the prompt was open is not thrown away.
    pub fn finalize_removal(&mut self, pending: &PendingRemoval) -> RemovalOutcome {
        let Some(quantity) = self.get(pending.id.as_str()).map(|i| i.quantity) else {
            return RemovalOutcome::NotFound;
        };
        if quantity != 1 {
            return RemovalOutcome::Stale;
        }
        self.remove(pending.id.as_str());
        RemovalOutcome::Removed
    }

    /// Remove a product regardless of quantity.
    pub fn remove(&mut self, id: &str) -> Option<CartItem> {
        let index = self.items.iter().position(|i| i.id == *id)?;
        Some(self.items.remove(index))
    }

    /// Empty the cart, returning how many products were removed.
    pub fn clear(&mut self) -> usize {
        let count = self.items.len();
        self.items.clear();
        count
    }

    /// Sum of unit price times quantity over all items.
    pub fn total_value(&self) -> Price {
        self.items
            .iter()
            .fold(Price::ZERO, |total, item| total.plus(item.line_total()))
    }

    /// Sum of quantities over all items.
    pub fn total_items(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }
}

fn bumped(quantity: u32, max_quantity: u32) -> Result<u32, CartError> {
    let next = u64::from(quantity) + 1;
    if next > u64::from(max_quantity) {
        return Err(CartError::QuantityExceedsLimit(next, max_quantity));
    }
    Ok(quantity + 1)
}
