//! Product API client.
//!
//! Thin `reqwest` wrapper over the storefront backend:
//! - `POST /auth/login` (with a local demo-admin shortcut)
//! - `GET /products/list`, `GET /products/categories`
//! - `POST /products/create`, `POST /products/:id/edit`, `DELETE /products/:id/delete`
//!
//! Every response body is normalized by [`responses`] before it reaches the
//! caller. Nothing is retried.
//!
//! # Example
//!
//! ```rust,ignore
//! use shopfront_client::{ApiClient, ClientConfig};
//!
//! let client = ApiClient::new(&ClientConfig::from_env()?)?;
//! let session = client.login("admin", "admin").await?;
//! let page = client.list_products(1, 10).await?;
//! ```

mod auth;
mod products;
pub mod responses;

use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::error;

use crate::config::ClientConfig;
use crate::error::{ApiError, Result};

pub use auth::{AuthSession, DEMO_PASSWORD, DEMO_USERNAME};
pub use products::{DeleteConfirmation, ImageUpload, MAX_CATALOG_PAGES, ProductDraft};
pub use responses::ProductListing;

// =============================================================================
// ApiClient
// =============================================================================

/// Client for the storefront product API.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    client: reqwest::Client,
    config: ClientConfig,
}

impl ApiClient {
    /// Create a new API client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("shopfront/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            inner: Arc::new(ApiClientInner {
                client,
                config: config.clone(),
            }),
        })
    }

    /// Get a reference to the client configuration.
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    fn http(&self) -> &reqwest::Client {
        &self.inner.client
    }

    fn endpoint(&self, path: &str) -> String {
        self.inner.config.endpoint(path)
    }

    /// Send a request and decode its JSON body.
    ///
    /// Non-success statuses become [`ApiError::Http`] carrying the server's
    /// `message` when it sent one. A success body that is not JSON is a
    /// [`ApiError::ShapeMismatch`].
    async fn send<T: DeserializeOwned>(&self, request: reqwest::RequestBuilder) -> Result<T> {
        let response = request.send().await?;
        let status = response.status();
        let url = response.url().path().to_string();

        // Get response body as text first for better error diagnostics
        let body = response.text().await?;

        if !status.is_success() {
            let message = responses::error_message(status.as_u16(), &body);
            error!(
                status = %status,
                path = %url,
                body = %body.chars().take(500).collect::<String>(),
                "API returned non-success status"
            );
            return Err(ApiError::Http {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            error!(
                error = %e,
                path = %url,
                body = %body.chars().take(500).collect::<String>(),
                "Failed to parse API response"
            );
            ApiError::ShapeMismatch(format!("response is not valid JSON: {e}"))
        })
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("api_url", &self.inner.config.api_url.as_str())
            .finish_non_exhaustive()
    }
}
