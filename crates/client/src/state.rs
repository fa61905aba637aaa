//! Storefront session state.
//!
//! [`Storefront`] owns everything a front end reads and mutates: the API
//! client, the current login, the cart and the catalog view. Each operation
//! is a method; nothing is global.
//!
//! Browsing, the cart and checkout require a login. Those operations return
//! [`StorefrontError::NotAuthenticated`] until [`Storefront::login`] succeeds.

use shopfront_core::checkout::{self, CheckoutSummary};
use shopfront_core::{Cart, CatalogPage, CatalogView, CategoryFilter, ProductId, User};
use tracing::{debug, info, instrument, warn};

use crate::api::{ApiClient, AuthSession};
use crate::error::StorefrontError;

/// Result type alias for `StorefrontError`.
pub type Result<T> = std::result::Result<T, StorefrontError>;

/// One shopper's session against the storefront.
#[derive(Debug)]
pub struct Storefront {
    client: ApiClient,
    auth: Option<AuthSession>,
    cart: Cart,
    catalog: CatalogView,
}

impl Storefront {
    /// Create a logged-out session with an empty cart and catalog.
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        let catalog = CatalogView::new(client.config().catalog_page_size);
        Self {
            client,
            auth: None,
            cart: Cart::new(),
            catalog,
        }
    }

    /// Get a reference to the API client.
    #[must_use]
    pub const fn client(&self) -> &ApiClient {
        &self.client
    }

    // =========================================================================
    // Auth
    // =========================================================================

    /// Log in, replacing any current session.
    ///
    /// # Errors
    ///
    /// Returns the API error; the previous session (if any) is kept.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<&User> {
        let session = self.client.login(username, password).await?;
        info!(username = %session.user().username, demo = session.is_demo(), "Logged in");
        Ok(self.auth.insert(session).user())
    }

    /// Drop the session and empty the cart.
    pub fn logout(&mut self) {
        if self.auth.take().is_some() {
            info!("Logged out");
        }
        self.cart.clear_cart();
    }

    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.auth.is_some()
    }

    #[must_use]
    pub fn user(&self) -> Option<&User> {
        self.auth.as_ref().map(AuthSession::user)
    }

    #[must_use]
    pub const fn session(&self) -> Option<&AuthSession> {
        self.auth.as_ref()
    }

    fn require_session(&self) -> Result<&AuthSession> {
        self.session().ok_or(StorefrontError::NotAuthenticated)
    }

    // =========================================================================
    // Cart
    // =========================================================================

    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Add one unit of a catalog product to the cart. Returns the line's new
    /// quantity.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::NotAuthenticated`] when logged out, or
    /// [`StorefrontError::UnknownProduct`] if the product is not in the
    /// loaded catalog.
    pub fn add_to_cart(&mut self, id: ProductId) -> Result<u32> {
        self.require_session()?;
        let product = self
            .catalog
            .products()
            .iter()
            .find(|p| p.id == id)
            .ok_or(StorefrontError::UnknownProduct(id))?;
        self.cart.add_to_cart(product);

        let quantity = self.cart.line(id).map_or(0, |line| line.quantity());
        debug!(product_id = %id, quantity, "Added to cart");
        Ok(quantity)
    }

    /// Remove a product's line. Returns whether one was removed.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::NotAuthenticated`] when logged out.
    pub fn remove_from_cart(&mut self, id: ProductId) -> Result<bool> {
        self.require_session()?;
        Ok(self.cart.remove_from_cart(id))
    }

    /// Set a line's quantity. Returns whether the line exists.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::NotAuthenticated`] when logged out, or
    /// [`StorefrontError::Cart`] if `quantity` is zero.
    pub fn update_quantity(&mut self, id: ProductId, quantity: u32) -> Result<bool> {
        self.require_session()?;
        Ok(self.cart.update_quantity(id, quantity)?)
    }

    /// # Errors
    ///
    /// Returns [`StorefrontError::NotAuthenticated`] when logged out.
    pub fn clear_cart(&mut self) -> Result<()> {
        self.require_session()?;
        self.cart.clear_cart();
        Ok(())
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    #[must_use]
    pub const fn catalog(&self) -> &CatalogView {
        &self.catalog
    }

    /// Reload the full catalog and the category list.
    ///
    /// Returns the number of products loaded. A failed category fetch falls
    /// back to categories derived from the products.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::NotAuthenticated`] when logged out, or the
    /// product fetch error; the previous product set is kept.
    #[instrument(skip(self))]
    pub async fn refresh_catalog(&mut self) -> Result<usize> {
        self.require_session()?;
        let ticket = self.catalog.begin_fetch();
        let per_page = self.client.config().per_page.get();

        let (products, categories) = tokio::join!(
            self.client.load_catalog(per_page),
            self.client.list_categories()
        );

        let products = match products {
            Ok(products) => products,
            Err(e) => {
                warn!(error = %e, "Catalog refresh failed");
                self.catalog.abort_fetch(ticket);
                return Err(e.into());
            }
        };

        let categories = categories
            .inspect_err(|e| warn!(error = %e, "Category list unavailable, deriving from products"))
            .ok();

        let count = products.len();
        if self.catalog.commit_fetch(ticket, products) {
            self.catalog.set_categories(categories);
            info!(products = count, "Catalog refreshed");
        } else {
            debug!("Discarding superseded catalog fetch");
        }
        Ok(count)
    }

    /// Filter by category (`"all"` for everything) and return to page 1.
    pub fn set_category(&mut self, category: impl Into<CategoryFilter>) {
        self.catalog.set_category(category);
    }

    /// Move to a catalog page.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::Catalog`] if `page` is out of range.
    pub fn set_page(&mut self, page: usize) -> Result<()> {
        Ok(self.catalog.set_page(page)?)
    }

    /// Snapshot of the current catalog page.
    #[must_use]
    pub fn catalog_page(&self) -> CatalogPage {
        self.catalog.current_page()
    }

    /// Categories available for filtering.
    #[must_use]
    pub fn categories(&self) -> Vec<String> {
        self.catalog.categories()
    }

    // =========================================================================
    // Checkout
    // =========================================================================

    /// Totals for the current cart.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::NotAuthenticated`] when logged out.
    pub fn checkout_summary(&self) -> Result<CheckoutSummary> {
        self.require_session()?;
        Ok(CheckoutSummary::from_cart(&self.cart))
    }

    /// Place the order and empty the cart.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::NotAuthenticated`] when logged out, or
    /// [`StorefrontError::Checkout`] if the cart is empty.
    pub fn place_order(&mut self) -> Result<CheckoutSummary> {
        let username = self.require_session()?.user().username.clone();
        let summary = checkout::place_order(&mut self.cart)?;
        info!(
            username = %username,
            items = summary.item_count,
            total = %summary.total,
            "Order placed"
        );
        Ok(summary)
    }
}
