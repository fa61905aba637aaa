//! Login and the authenticated session.

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use shopfront_core::User;
use tracing::{debug, info, instrument};

use super::ApiClient;
use super::responses::{LoginBody, normalize_login};
use crate::error::{ApiError, Result};

/// Username of the built-in demo administrator.
pub const DEMO_USERNAME: &str = "admin";

/// Password of the built-in demo administrator.
pub const DEMO_PASSWORD: &str = "admin";

const DEMO_TOKEN_PREFIX: &str = "admin_token_";

/// An authenticated user and their session token.
///
/// Implements `Debug` manually to redact the token.
#[derive(Clone)]
pub struct AuthSession {
    user: User,
    token: SecretString,
}

impl AuthSession {
    /// Create a session from a user and token.
    #[must_use]
    pub fn new(user: User, token: impl Into<String>) -> Self {
        Self {
            user,
            token: SecretString::from(token.into()),
        }
    }

    /// A locally issued demo-admin session (`admin_token_<unix millis>`).
    #[must_use]
    pub fn demo() -> Self {
        let issued_at = chrono::Utc::now().timestamp_millis();
        Self::new(User::demo_admin(), format!("{DEMO_TOKEN_PREFIX}{issued_at}"))
    }

    #[must_use]
    pub const fn user(&self) -> &User {
        &self.user
    }

    #[must_use]
    pub const fn token(&self) -> &SecretString {
        &self.token
    }

    /// Whether this session was issued locally by the demo shortcut.
    #[must_use]
    pub fn is_demo(&self) -> bool {
        self.token.expose_secret().starts_with(DEMO_TOKEN_PREFIX) && self.user.is_admin()
    }
}

impl std::fmt::Debug for AuthSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSession")
            .field("user", &self.user)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

impl ApiClient {
    /// Log in with a username and password.
    ///
    /// The demo pair `admin`/`admin` succeeds locally without a network call
    /// unless disabled in [`ClientConfig`](crate::ClientConfig).
    ///
    /// # Errors
    ///
    /// - [`ApiError::Validation`] if either field is empty
    /// - [`ApiError::Http`] with the server's message on a rejected login
    /// - [`ApiError::ShapeMismatch`] if the response carries no token
    /// - [`ApiError::Network`] if the request fails
    #[instrument(skip(self, password))]
    pub async fn login(&self, username: &str, password: &str) -> Result<AuthSession> {
        if username.is_empty() || password.is_empty() {
            return Err(ApiError::Validation(
                "Username and password are required".to_string(),
            ));
        }

        if self.config().demo_login && username == DEMO_USERNAME && password == DEMO_PASSWORD {
            info!("Demo admin login, skipping the API");
            return Ok(AuthSession::demo());
        }

        let request = self
            .http()
            .post(self.endpoint("auth/login"))
            .json(&LoginRequest { username, password });
        let body: LoginBody = self.send(request).await?;
        let (mut user, token) = normalize_login(body)?;

        if user.username.is_empty() {
            user.username = username.to_string();
        }

        debug!(role = user.role.as_str(), "Login succeeded");
        Ok(AuthSession::new(user, token))
    }
}
