//! Cart store.
//!
//! Lines are unique by product ID and kept in first-added order. Every line
//! holds a quantity of at least one; a line only ever leaves the cart through
//! [`Cart::remove_from_cart`] or [`Cart::clear_cart`].

use serde::Serialize;
use thiserror::Error;

use crate::types::{Price, Product, ProductId};

/// Errors raised by cart mutations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CartError {
    /// Quantities must be at least one. Remove the line instead.
    #[error("invalid quantity {quantity} for product {id}: must be at least 1")]
    InvalidQuantity { id: ProductId, quantity: u32 },
}

/// One product entry in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartLine {
    pub id: ProductId,
    pub title: String,
    pub price: Price,
    pub thumbnail: String,
    quantity: u32,
}

impl CartLine {
    fn from_product(product: &Product) -> Self {
        Self {
            id: product.id,
            title: product.title.clone(),
            price: product.price,
            thumbnail: product.thumbnail.clone(),
            quantity: 1,
        }
    }

    /// Number of units on this line (always at least 1).
    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price.times(self.quantity)
    }
}

/// The shopping cart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Add one unit of `product`.
    ///
    /// Increments the existing line for `product.id`, or appends a new line
    /// with quantity 1 copying the product's title, price and thumbnail.
    pub fn add_to_cart(&mut self, product: &Product) {
        if let Some(line) = self.lines.iter_mut().find(|l| l.id == product.id) {
            line.quantity = line.quantity.saturating_add(1);
        } else {
            self.lines.push(CartLine::from_product(product));
        }
    }

    /// Remove the line for `id`. Returns whether a line was removed.
    pub fn remove_from_cart(&mut self, id: ProductId) -> bool {
        let len_before = self.lines.len();
        self.lines.retain(|l| l.id != id);
        self.lines.len() < len_before
    }

    /// Replace the quantity of the line for `id`.
    ///
    /// Returns `Ok(false)` when no line matches.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::InvalidQuantity`] when `quantity` is zero; the line
    /// is left unchanged.
    pub fn update_quantity(&mut self, id: ProductId, quantity: u32) -> Result<bool, CartError> {
        if quantity == 0 {
            return Err(CartError::InvalidQuantity { id, quantity });
        }

        let Some(line) = self.lines.iter_mut().find(|l| l.id == id) else {
            return Ok(false);
        };
        line.quantity = quantity;
        Ok(true)
    }

    /// Remove every line.
    pub fn clear_cart(&mut self) {
        self.lines.clear();
    }

    /// Lines in first-added order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// The line for `id`, if present.
    #[must_use]
    pub fn line(&self, id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.id == id)
    }

    /// Number of distinct lines.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total units across all lines (the cart badge count).
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    /// Sum of line totals.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.lines.iter().map(CartLine::line_total).sum()
    }
}
