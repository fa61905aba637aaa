//! Shopfront Core - storefront state library.
//!
//! This crate holds the state that the storefront front ends (the `shopfront`
//! CLI, or any UI) read and mutate:
//! - [`cart`] - the cart store (merge-by-identity line items)
//! - [`catalog`] - the catalog view (category filter, pagination, fetch tracking)
//! - [`checkout`] - order summary and order placement
//!
//! # Architecture
//!
//! The core crate contains only types and pure state transitions - no I/O, no
//! HTTP clients, no clocks. Everything here is synchronous and deterministic.
//! Network access lives in `shopfront-client`.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for IDs and prices, plus the API snapshot
//!   types (`Product`, `User`)

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod types;

pub use cart::{Cart, CartError, CartLine};
pub use catalog::{CatalogError, CatalogPage, CatalogView, CategoryFilter, FetchTicket};
pub use checkout::{CheckoutError, CheckoutSummary};
pub use types::*;
