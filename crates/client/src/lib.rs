//! Shopfront Client - HTTP access to the product API and the storefront session.
//!
//! # Architecture
//!
//! - [`api`] - `reqwest` client for login and product endpoints, with response
//!   normalization for the backend's loosely shaped JSON
//! - [`state`] - [`Storefront`], the owned session object combining the
//!   client with the cart and catalog state from `shopfront-core`
//! - [`config`] - environment configuration
//! - [`error`] - error types
//!
//! # Example
//!
//! ```rust,ignore
//! use shopfront_client::{ApiClient, ClientConfig, Storefront};
//!
//! let config = ClientConfig::from_env()?;
//! let mut store = Storefront::new(ApiClient::new(&config)?);
//!
//! store.login("admin", "admin").await?;
//! store.refresh_catalog().await?;
//! store.set_category("beauty");
//! let page = store.catalog_page();
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod config;
pub mod error;
pub mod state;

pub use api::{ApiClient, AuthSession, DeleteConfirmation, ImageUpload, ProductDraft, ProductListing};
pub use config::{ClientConfig, ConfigError};
pub use error::{ApiError, StorefrontError};
pub use state::Storefront;
