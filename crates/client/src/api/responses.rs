//! Response bodies accepted from the product API, and their normalization.
//!
//! The backend is loose about envelopes: a product list may arrive bare or
//! wrapped, and paging metadata may sit at the top level or under `meta` /
//! `pagination`. Every accepted body is an untagged enum whose last variant
//! captures anything else, so an unknown shape becomes
//! [`ApiError::ShapeMismatch`] instead of a JSON decode failure.

use serde::Deserialize;
use serde::de::IgnoredAny;
use serde_json::Value;
use shopfront_core::{Product, User};

use crate::error::{ApiError, Result};

// =============================================================================
// Product listing
// =============================================================================

/// One page of products, normalized from any accepted listing shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductListing {
    pub products: Vec<Product>,
    /// Total number of pages, when the backend reports it.
    pub total_pages: Option<u64>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum ListingBody {
    Bare(Vec<Product>),
    Products(ProductsEnvelope),
    Data(DataEnvelope),
    Unrecognized(Value),
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProductsEnvelope {
    products: Vec<Product>,
    #[serde(flatten)]
    paging: Paging,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DataEnvelope {
    data: Vec<Product>,
    #[serde(flatten)]
    paging: Paging,
}

#[derive(Debug, Deserialize)]
struct Paging {
    #[serde(flatten)]
    top: PageFields,
    #[serde(default, deserialize_with = "lenient_fields")]
    meta: Option<PageFields>,
    #[serde(default, deserialize_with = "lenient_fields")]
    pagination: Option<PageFields>,
}

impl Paging {
    fn total_pages(&self) -> Option<u64> {
        self.top
            .total_pages()
            .or_else(|| self.meta.as_ref().and_then(PageFields::total_pages))
            .or_else(|| self.pagination.as_ref().and_then(PageFields::total_pages))
    }
}

// Flattened structs only see keys under their primary names, so each
// spelling gets its own field.
#[derive(Debug, Default, Deserialize)]
struct PageFields {
    #[serde(default, deserialize_with = "lenient_count")]
    total_pages: Option<u64>,
    #[serde(default, rename = "totalPages", deserialize_with = "lenient_count")]
    total_pages_camel: Option<u64>,
    #[serde(default, deserialize_with = "lenient_count")]
    last_page: Option<u64>,
    #[serde(default, deserialize_with = "lenient_count")]
    total: Option<u64>,
    #[serde(default, deserialize_with = "lenient_count")]
    per_page: Option<u64>,
}

impl PageFields {
    fn total_pages(&self) -> Option<u64> {
        self.total_pages
            .or(self.total_pages_camel)
            .or(self.last_page)
            .or_else(|| match (self.total, self.per_page) {
                (Some(total), Some(per_page)) if per_page > 0 => Some(total.div_ceil(per_page)),
                _ => None,
            })
    }
}

/// Accept counts as JSON numbers or numeric strings; anything else is absent.
fn lenient_count<'de, D>(deserializer: D) -> std::result::Result<Option<u64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_u64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

/// A `meta`/`pagination` member that is not an object is ignored.
fn lenient_fields<'de, D>(deserializer: D) -> std::result::Result<Option<PageFields>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(deserializer)?
        .filter(Value::is_object)
        .and_then(|v| serde_json::from_value(v).ok()))
}

/// Normalize a listing body into products plus optional page count.
///
/// # Errors
///
/// Returns [`ApiError::ShapeMismatch`] for any body that is not a product
/// array, `{products: [...]}` or `{data: [...]}`.
pub(crate) fn normalize_listing(body: ListingBody) -> Result<ProductListing> {
    match body {
        ListingBody::Bare(products) => Ok(ProductListing {
            products,
            total_pages: None,
        }),
        ListingBody::Products(envelope) => Ok(ProductListing {
            total_pages: envelope.paging.total_pages(),
            products: envelope.products,
        }),
        ListingBody::Data(envelope) => Ok(ProductListing {
            total_pages: envelope.paging.total_pages(),
            products: envelope.data,
        }),
        ListingBody::Unrecognized(value) => Err(ApiError::ShapeMismatch(format!(
            "expected a product list, got {}",
            describe(&value)
        ))),
    }
}

// =============================================================================
// Single product (create / edit)
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum ProductBody {
    Data { data: Product },
    Wrapped { product: Product },
    Bare(Product),
    Unrecognized(Value),
}

pub(crate) fn normalize_product(body: ProductBody) -> Result<Product> {
    match body {
        ProductBody::Data { data: product }
        | ProductBody::Wrapped { product }
        | ProductBody::Bare(product) => Ok(product),
        ProductBody::Unrecognized(value) => Err(ApiError::ShapeMismatch(format!(
            "expected a product, got {}",
            describe(&value)
        ))),
    }
}

// =============================================================================
// Login
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum LoginBody {
    WithUser { token: String, user: User },
    /// No `user` object: the rest of the body describes the user.
    Flat {
        token: String,
        #[serde(flatten)]
        user: User,
    },
    Unrecognized(IgnoredAny),
}

/// Extract `(user, token)` from a login response.
pub(crate) fn normalize_login(body: LoginBody) -> Result<(User, String)> {
    match body {
        LoginBody::WithUser { token, user } | LoginBody::Flat { token, user }
            if !token.is_empty() =>
        {
            Ok((user, token))
        }
        _ => Err(ApiError::ShapeMismatch("Token not found.".to_string())),
    }
}

// =============================================================================
// Categories and errors
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum CategoriesBody {
    List(Vec<CategoryEntry>),
    Unrecognized(Value),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum CategoryEntry {
    Name(String),
    Object {
        #[serde(default)]
        slug: Option<String>,
        #[serde(default)]
        name: Option<String>,
    },
}

/// Category filter values, preferring `slug` over `name` for object entries.
pub(crate) fn normalize_categories(body: CategoriesBody) -> Result<Vec<String>> {
    match body {
        CategoriesBody::List(entries) => Ok(entries
            .into_iter()
            .filter_map(|entry| match entry {
                CategoryEntry::Name(name) => Some(name),
                CategoryEntry::Object { slug, name } => slug.or(name),
            })
            .filter(|c| !c.is_empty())
            .collect()),
        CategoriesBody::Unrecognized(value) => Err(ApiError::ShapeMismatch(format!(
            "expected a category list, got {}",
            describe(&value)
        ))),
    }
}

/// Error body returned with non-success statuses.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// The server's `message`, or a generic status line.
pub(crate) fn error_message(status: u16, body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| format!("HTTP error! status: {status}"))
}

/// Short description of an unrecognized body for error messages.
fn describe(value: &Value) -> String {
    match value {
        Value::Object(map) => {
            let keys: Vec<&str> = map.keys().map(String::as_str).take(5).collect();
            format!("an object with keys [{}]", keys.join(", "))
        }
        Value::Array(_) => "an array of unrecognized records".to_string(),
        Value::String(_) => "a string".to_string(),
        Value::Number(_) => "a number".to_string(),
        Value::Bool(_) => "a boolean".to_string(),
        Value::Null => "null".to_string(),
    }
}
