//! Authenticated user snapshot.

use serde::{Deserialize, Serialize};

use super::id::UserId;

/// Role attached to a user record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Full access, including product management.
    Admin,
    /// Regular shopper.
    #[default]
    Customer,
    /// Any role this client does not know about.
    #[serde(other)]
    Other,
}

impl Role {
    /// Get the role as a string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Customer => "customer",
            Self::Other => "other",
        }
    }
}

/// The user returned by a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<UserId>,
    #[serde(default)]
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Role,
}

impl User {
    /// The built-in demo administrator.
    #[must_use]
    pub fn demo_admin() -> Self {
        Self {
            id: None,
            username: "admin".to_string(),
            email: None,
            role: Role::Admin,
        }
    }

    /// Whether this user may manage products.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self.role, Role::Admin)
    }
}
