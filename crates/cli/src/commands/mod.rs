//! Subcommand implementations.

pub mod auth;
pub mod catalog;
pub mod checkout;
pub mod products;

use std::path::PathBuf;

use shopfront_client::{ApiClient, ApiError, ClientConfig, Storefront, StorefrontError};
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// API call failed.
    #[error("{}", .0.user_message())]
    Api(#[from] ApiError),

    /// Storefront session operation failed.
    #[error("{}", .0.user_message())]
    Storefront(#[from] StorefrontError),

    /// An image file could not be read.
    #[error("Cannot read image {}: {source}", path.display())]
    Image {
        path: PathBuf,
        source: std::io::Error,
    },

    /// JSON output could not be written.
    #[error("Output error: {0}")]
    Output(#[from] serde_json::Error),
}

/// Build an API client from configuration.
fn client(config: &ClientConfig) -> Result<ApiClient, CommandError> {
    Ok(ApiClient::new(config)?)
}

/// Start a storefront session logged in as `username`.
///
/// Nothing persists between runs, so commands that browse or check out log
/// in first.
pub async fn session(
    config: &ClientConfig,
    username: &str,
    password: &str,
) -> Result<Storefront, CommandError> {
    let mut store = Storefront::new(client(config)?);
    let user = store.login(username, password).await?;
    tracing::debug!(username = %user.username, "Session started");
    Ok(store)
}
