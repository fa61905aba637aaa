//! Error types for API calls and storefront session operations.

use shopfront_core::{CartError, CatalogError, CheckoutError, ProductId};
use thiserror::Error;

/// Errors that can occur when talking to the product API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response (connection, timeout, body read).
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("HTTP error {status}: {message}")]
    Http { status: u16, message: String },

    /// The response body matched none of the recognized structures.
    #[error("Unexpected response shape: {0}")]
    ShapeMismatch(String),

    /// Input was rejected before a request was built.
    #[error("Validation error: {0}")]
    Validation(String),
}

impl ApiError {
    /// HTTP status of the failed response, if there was one.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Text suitable for showing to the user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Network(err) if err.is_timeout() => {
                "The server took too long to respond. Please try again.".to_string()
            }
            Self::Network(_) => "Network error. Please try again.".to_string(),
            Self::Http { message, .. } | Self::Validation(message) => message.clone(),
            Self::ShapeMismatch(detail) => format!("Invalid response from server. {detail}"),
        }
    }
}

/// Result type alias for `ApiError`.
pub type Result<T> = std::result::Result<T, ApiError>;

/// Errors raised by [`Storefront`](crate::Storefront) operations.
#[derive(Debug, Error)]
pub enum StorefrontError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Cart(#[from] CartError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    /// The product is not part of the loaded catalog.
    #[error("Product {0} is not in the catalog")]
    UnknownProduct(ProductId),

    /// The operation needs a logged-in session.
    #[error("Please log in to continue")]
    NotAuthenticated,
}

impl StorefrontError {
    /// Text suitable for showing to the user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Api(err) => err.user_message(),
            Self::Checkout(CheckoutError::EmptyCart) => "Your cart is empty".to_string(),
            other => other.to_string(),
        }
    }
}
