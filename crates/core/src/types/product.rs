//! Product snapshot as returned by the storefront API.

use serde::{Deserialize, Deserializer, Serialize};

use super::id::ProductId;
use super::price::Price;

/// A product in the catalog.
///
/// Products are read-only snapshots of the backend's data; nothing in the
/// storefront mutates them locally. Missing or `null` text fields become
/// empty strings so that sparse backend records still render. The `id` may
/// arrive as a number or a numeric string; a record without a usable `id`
/// is rejected since carts are keyed by it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub price: Price,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    /// Image URL used for listings and cart lines.
    #[serde(default, alias = "image", deserialize_with = "null_as_default")]
    pub thumbnail: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: String,
}

impl Product {
    /// Create a product with the required fields; the rest start empty.
    #[must_use]
    pub fn new(id: ProductId, title: impl Into<String>, price: Price) -> Self {
        Self {
            id,
            title: title.into(),
            price,
            description: String::new(),
            thumbnail: String::new(),
            category: String::new(),
        }
    }

    /// Set the category.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Set the thumbnail URL.
    #[must_use]
    pub fn with_thumbnail(mut self, thumbnail: impl Into<String>) -> Self {
        self.thumbnail = thumbnail.into();
        self
    }
}

/// Treat an explicit JSON `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_product_deserializes_full_record() {
        let json = r#"{
            "id": 1,
            "title": "Essence Mascara",
            "price": 9.99,
            "description": "Volumizing mascara",
            "thumbnail": "https://cdn.example.com/1.png",
            "category": "beauty",
            "rating": 4.94
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, ProductId::new(1));
        assert_eq!(product.price, Price::from_cents(999));
        assert_eq!(product.category, "beauty");
    }

    #[test]
    fn test_product_tolerates_missing_and_null_fields() {
        let json = r#"{"id": 2, "title": "Bare", "description": null, "image": "x.png"}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.price, Price::ZERO);
        assert_eq!(product.description, "");
        assert_eq!(product.thumbnail, "x.png");
        assert_eq!(product.category, "");
    }

    #[test]
    fn test_product_accepts_string_id_and_null_title() {
        let product: Product =
            serde_json::from_str(r#"{"id": "7", "title": null, "price": "3.25"}"#).unwrap();
        assert_eq!(product.id, ProductId::new(7));
        assert_eq!(product.title, "");
        assert_eq!(product.price, Price::from_cents(325));
    }

    #[test]
    fn test_product_requires_usable_id() {
        assert!(serde_json::from_str::<Product>(r#"{"title": "No id"}"#).is_err());
        assert!(serde_json::from_str::<Product>(r#"{"id": "x7", "title": "Bad"}"#).is_err());
    }
}
