//! Product listing and management endpoints.

use std::collections::HashSet;

use reqwest::multipart::{Form, Part};
use serde_json::Value;
use shopfront_core::{Price, Product, ProductId};
use tracing::{debug, info, instrument, warn};

use super::ApiClient;
use super::responses::{
    CategoriesBody, ListingBody, ProductBody, ProductListing, normalize_categories,
    normalize_listing, normalize_product,
};
use crate::error::{ApiError, Result};

/// Upper bound on pages fetched by [`ApiClient::load_catalog`].
pub const MAX_CATALOG_PAGES: u32 = 100;

/// An image file attached to a product create/edit request.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    #[must_use]
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }
}

impl std::fmt::Debug for ImageUpload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageUpload")
            .field("file_name", &self.file_name)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Fields submitted when creating or editing a product.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductDraft {
    /// Required.
    pub title: String,
    /// Required.
    pub description: String,
    pub price: Option<Price>,
    pub images: Vec<ImageUpload>,
}

impl ProductDraft {
    #[must_use]
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn with_price(mut self, price: Price) -> Self {
        self.price = Some(price);
        self
    }

    #[must_use]
    pub fn with_image(mut self, image: ImageUpload) -> Self {
        self.images.push(image);
        self
    }

    /// Reject drafts missing a required field.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] naming the first blank required field.
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(ApiError::Validation("Title is required".to_string()));
        }
        if self.description.trim().is_empty() {
            return Err(ApiError::Validation("Description is required".to_string()));
        }
        Ok(())
    }

    /// Multipart body: `title`, `description`, optional `price`, `images[i]`.
    fn into_form(self) -> Form {
        let mut form = Form::new()
            .text("title", self.title)
            .text("description", self.description);
        if let Some(price) = self.price {
            form = form.text("price", price.amount().normalize().to_string());
        }
        for (index, image) in self.images.into_iter().enumerate() {
            let part = Part::bytes(image.bytes).file_name(image.file_name);
            form = form.part(format!("images[{index}]"), part);
        }
        form
    }
}

/// Body returned by a successful delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteConfirmation {
    /// The server's `message` field, when present.
    pub message: Option<String>,
    pub body: Value,
}

impl ApiClient {
    /// Fetch one page of products.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Validation`] if `page` or `per_page` is zero
    /// - [`ApiError::ShapeMismatch`] if the body is not a recognized listing
    /// - [`ApiError::Http`] / [`ApiError::Network`] if the request fails
    #[instrument(skip(self))]
    pub async fn list_products(&self, page: u32, per_page: u32) -> Result<ProductListing> {
        if page == 0 || per_page == 0 {
            return Err(ApiError::Validation(
                "page and per_page must be at least 1".to_string(),
            ));
        }

        let url = format!(
            "{}?page={page}&per_page={per_page}",
            self.endpoint("products/list")
        );
        let body: ListingBody = self.send(self.http().get(url)).await?;
        let listing = normalize_listing(body)?;

        debug!(
            count = listing.products.len(),
            total_pages = ?listing.total_pages,
            "Fetched product page"
        );
        Ok(listing)
    }

    /// Fetch the whole catalog by walking listing pages from page 1.
    ///
    /// Stops at the reported page count, or, when the backend reports none,
    /// at the first short page or page with no new products. Never fetches
    /// more than [`MAX_CATALOG_PAGES`] pages.
    ///
    /// # Errors
    ///
    /// Returns the first page error; products from earlier pages are dropped.
    #[instrument(skip(self))]
    pub async fn load_catalog(&self, per_page: u32) -> Result<Vec<Product>> {
        let mut products = Vec::new();
        let mut seen = HashSet::<ProductId>::new();

        for page in 1..=MAX_CATALOG_PAGES {
            let listing = self.list_products(page, per_page).await?;
            let fetched = listing.products.len();
            let before = products.len();
            products.extend(listing.products.into_iter().filter(|p| seen.insert(p.id)));

            let last_page = match listing.total_pages {
                Some(total) => u64::from(page) >= total,
                None => fetched < usize::try_from(per_page).unwrap_or(usize::MAX),
            };
            if last_page || fetched == 0 || products.len() == before {
                info!(pages = page, products = products.len(), "Catalog loaded");
                return Ok(products);
            }
        }

        warn!(
            max_pages = MAX_CATALOG_PAGES,
            products = products.len(),
            "Catalog page limit reached, listing may be incomplete"
        );
        Ok(products)
    }

    /// Fetch the backend's category list.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body is not a list.
    #[instrument(skip(self))]
    pub async fn list_categories(&self) -> Result<Vec<String>> {
        let body: CategoriesBody = self
            .send(self.http().get(self.endpoint("products/categories")))
            .await?;
        let categories = normalize_categories(body)?;
        debug!(count = categories.len(), "Fetched categories");
        Ok(categories)
    }

    /// Create a product.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Validation`] if the title or description is blank
    /// - [`ApiError::ShapeMismatch`] if the response holds no product
    /// - [`ApiError::Http`] / [`ApiError::Network`] if the request fails
    #[instrument(skip(self, draft), fields(title = %draft.title))]
    pub async fn create_product(&self, draft: ProductDraft) -> Result<Product> {
        draft.validate()?;

        let request = self
            .http()
            .post(self.endpoint("products/create"))
            .multipart(draft.into_form());
        let body: ProductBody = self.send(request).await?;
        let product = normalize_product(body)?;

        info!(product_id = %product.id, "Product created");
        Ok(product)
    }

    /// Edit a product.
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::create_product`].
    #[instrument(skip(self, draft), fields(title = %draft.title))]
    pub async fn edit_product(&self, id: ProductId, draft: ProductDraft) -> Result<Product> {
        draft.validate()?;

        let request = self
            .http()
            .post(self.endpoint(&format!("products/{id}/edit")))
            .multipart(draft.into_form());
        let body: ProductBody = self.send(request).await?;
        let product = normalize_product(body)?;

        info!("Product updated");
        Ok(product)
    }

    /// Delete a product.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body is not JSON.
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: ProductId) -> Result<DeleteConfirmation> {
        let body: Value = self
            .send(self.http().delete(self.endpoint(&format!("products/{id}/delete"))))
            .await?;
        let message = body
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string);

        info!("Product deleted");
        Ok(DeleteConfirmation { message, body })
    }
}
