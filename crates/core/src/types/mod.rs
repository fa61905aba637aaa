//! Core types for Shopfront.
//!
//! This module provides type-safe wrappers for common domain concepts and
//! the read-only snapshots returned by the storefront API.

pub mod id;
pub mod price;
pub mod product;
pub mod user;

pub use id::*;
pub use price::{Price, PriceError};
pub use product::Product;
pub use user::{Role, User};
