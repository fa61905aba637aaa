//! Catalog browsing command.

use shopfront_client::Storefront;

use super::CommandError;
use crate::output::{self, Format};

/// Load the catalog, apply the category filter and show one page.
pub async fn browse(
    mut store: Storefront,
    category: &str,
    page: usize,
    format: Format,
) -> Result<(), CommandError> {
    store.refresh_catalog().await?;

    store.set_category(category);
    store.set_page(page)?;

    output::catalog(format, &store.catalog_page(), &store.categories())?;
    Ok(())
}
