//! Checkout command.

use shopfront_client::Storefront;
use shopfront_core::ProductId;

use super::CommandError;
use crate::output::{self, Format};

/// Add each listed product to a fresh cart (once per mention) and show the
/// summary, optionally placing the order.
pub async fn checkout(
    mut store: Storefront,
    ids: &[ProductId],
    place: bool,
    format: Format,
) -> Result<(), CommandError> {
    store.refresh_catalog().await?;

    for &id in ids {
        store.add_to_cart(id)?;
    }

    let summary = if place {
        store.place_order()?
    } else {
        store.checkout_summary()?
    };
    output::checkout(format, &summary, place)?;
    Ok(())
}
