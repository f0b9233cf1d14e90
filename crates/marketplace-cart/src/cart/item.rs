//! Cart line item types.

use serde::{Deserialize, Serialize};

use crate::ids::ProductId;
use crate::money::Price;

/// A product in the cart.
///
/// The field names are the persisted JSON keys.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CartItem {
    /// Product identifier, unique within the cart.
    pub id: ProductId,
    /// Display title.
    pub title: String,
    /// Product image URI.
    pub image_url: String,
    /// Unit price.
    pub price: Price,
    /// Quantity, at least 1 while the item is in the cart.
    pub quantity: u32,
}

impl CartItem {
    /// Price of this line (unit price times quantity).
    pub fn line_total(&self) -> Price {
        self.price.times(self.quantity)
    }
}

/// A product being added to the cart: a [`CartItem`] without quantity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewCartItem {
    /// Product identifier.
    pub id: ProductId,
    /// Display title.
    pub title: String,
    /// Product image URI.
    pub image_url: String,
    /// Unit price.
    pub price: Price,
}

impl NewCartItem {
    /// Create an add candidate.
    pub fn new(
        id: impl Into<ProductId>,
        title: impl Into<String>,
        image_url: impl Into<String>,
        price: Price,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            image_url: image_url.into(),
            price,
        }
    }

    /// Turn the candidate into a line item with quantity 1.
    pub(crate) fn into_item(self) -> CartItem {
        CartItem {
            id: self.id,
            title: self.title,
            image_url: self.image_url,
            price: self.price,
            quantity: 1,
        }
    }
}
