//! Shopping cart module.
//!
//! Contains the line item types and the pure list transitions.

mod item;
mod state;

pub use item::{CartItem, NewCartItem};
pub use state::{
    AddOutcome, CartState, DecrementOutcome, LoadRepairs, PendingRemoval, RemovalOutcome,
    MAX_QUANTITY_PER_ITEM,
};
