//! Order summary and order placement.

use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use crate::cart::{Cart, CartLine};
use crate::types::Price;

/// Flat shipping charge applied to every order.
pub const SHIPPING_FLAT: Price = Price::new(Decimal::TEN);

/// Errors raised at checkout.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutError {
    #[error("cannot place an order with an empty cart")]
    EmptyCart,
}

/// Totals shown on the checkout page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckoutSummary {
    pub lines: Vec<CartLine>,
    pub item_count: u64,
    pub subtotal: Price,
    pub shipping: Price,
    pub total: Price,
}

impl CheckoutSummary {
    /// Compute the summary for the current cart contents.
    #[must_use]
    pub fn from_cart(cart: &Cart) -> Self {
        let subtotal = cart.subtotal();
        Self {
            lines: cart.lines().to_vec(),
            item_count: cart.item_count(),
            subtotal,
            shipping: SHIPPING_FLAT,
            total: subtotal + SHIPPING_FLAT,
        }
    }
}

/// Place the order: snapshot the summary and empty the cart.
///
/// # Errors
///
/// Returns [`CheckoutError::EmptyCart`] if the cart has no lines; the cart is
/// left as it was.
pub fn place_order(cart: &mut Cart) -> Result<CheckoutSummary, CheckoutError> {
    if cart.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }
    let summary = CheckoutSummary::from_cart(cart);
    cart.clear_cart();
    Ok(summary)
}
