//! Shopping cart state container for the GoMarketplace storefront.
//!
//! This crate provides:
//!
//! - **Cart**: line items and the pure list transitions (add, increment,
//!   decrement, confirmed removal)
//! - **Store**: the shared [`CartStore`], mirrored to key-value storage after
//!   every change and observable through snapshots
//! - **Provider**: [`CartProvider`] and [`use_cart`] for reaching the store
//!   from anywhere inside the app
//! - **Money**: prices, totals and localized formatting
//!
//! # Example
//!
//! ```rust,ignore
//! use marketplace_cart::prelude::*;
//! use marketplace_storage::MemoryStore;
//!
//! let provider = CartProvider::from_config(CartConfig::default(), Arc::new(MemoryStore::new()));
//! let cart = provider.handle();
//!
//! cart.add_to_cart(NewCartItem::new("1", "Camiseta", "https://...", Price::from_decimal(49.9)?))
//!     .await?;
//!
//! if let DecrementOutcome::NeedsConfirmation(pending) = cart.decrement("1").await? {
//!     // ask the user, then:
//!     cart.finalize_removal(&pending).await?;
//! }
//!
//! println!("{} items, {}", cart.total_items_in_cart(), cart.cart_total());
//! ```

pub mod cart;
pub mod config;
pub mod confirm;
pub mod error;
pub mod format;
pub mod ids;
pub mod money;
pub mod provider;
pub mod store;

pub use cart::{CartItem, CartState, NewCartItem};
pub use config::CartConfig;
pub use error::CartError;
pub use ids::ProductId;
pub use money::{Currency, Money, Price};
pub use provider::{try_use_cart, use_cart, CartHandle, CartProvider};
pub use store::{CartSnapshot, CartStore, DecrementResult};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::cart::{
        AddOutcome, CartItem, CartState, DecrementOutcome, NewCartItem, PendingRemoval,
        RemovalOutcome,
    };
    pub use crate::config::{CartConfig, PersistFailurePolicy};
    pub use crate::confirm::{ConfirmRemoval, Confirmation, FixedAnswer, RemovalPrompt};
    pub use crate::error::CartError;
    pub use crate::format::{CurrencyFormatter, Locale, LocaleFormatter};
    pub use crate::ids::ProductId;
    pub use crate::money::{Currency, Money, Price};
    pub use crate::provider::{try_use_cart, use_cart, CartHandle, CartProvider};
    pub use crate::store::{CartSnapshot, CartStore, DecrementResult};
}
