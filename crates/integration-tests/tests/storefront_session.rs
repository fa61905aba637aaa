//! End-to-end storefront session tests: login, catalog, cart and checkout.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use axum::extract::Query;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use shopfront_client::{Storefront, StorefrontError};
use shopfront_core::{CategoryFilter, ProductId};
use shopfront_integration_tests::{
    ListingShape, MockBackend, PageQuery, listing_page, listing_router, sample_catalog,
};

/// A session logged in with the demo account, which makes no request.
async fn signed_in(backend: &MockBackend) -> Storefront {
    let mut store = Storefront::new(backend.client());
    store.login("admin", "admin").await.unwrap();
    store
}

fn categories_route() -> Router {
    Router::new().route(
        "/products/categories",
        get(|| async { Json(json!(["furniture", "beauty", "fragrances"])) }),
    )
}

#[tokio::test]
async fn test_refresh_catalog_loads_every_page() {
    let routes = listing_router(sample_catalog(30), ListingShape::DataMeta).merge(categories_route());
    let backend = MockBackend::start(routes).await;
    let mut store = signed_in(&backend).await;

    let loaded = store.refresh_catalog().await.unwrap();

    assert_eq!(loaded, 30);
    assert!(!store.catalog().is_fetching());
    assert_eq!(store.categories(), vec!["furniture", "beauty", "fragrances"]);

    // 30 products at 12 per catalog page
    let page = store.catalog_page();
    assert_eq!(page.total_pages, 3);
    assert_eq!(page.items.len(), 12);
    assert!(page.has_next());
    assert!(!page.has_previous());
}

#[tokio::test]
async fn test_category_filter_and_pagination() {
    let routes = listing_router(sample_catalog(30), ListingShape::Products);
    let backend = MockBackend::start(routes).await;
    let mut store = signed_in(&backend).await;
    store.refresh_catalog().await.unwrap();

    store.set_page(3).unwrap();
    store.set_category("beauty");

    let page = store.catalog_page();
    assert_eq!(page.page_number, 1);
    assert_eq!(page.category, CategoryFilter::Category("beauty".to_string()));
    assert_eq!(page.total_items, 10);
    assert!(page.items.iter().all(|p| p.category == "beauty"));
    assert!(store.set_page(2).is_err());

    store.set_category("all");
    assert_eq!(store.catalog_page().total_items, 30);
}

#[tokio::test]
async fn test_missing_category_endpoint_falls_back_to_derived() {
    let backend = MockBackend::start(listing_router(sample_catalog(6), ListingShape::Bare)).await;
    let mut store = signed_in(&backend).await;

    store.refresh_catalog().await.unwrap();

    assert_eq!(store.categories(), vec!["beauty", "fragrances", "furniture"]);
}

#[tokio::test]
async fn test_failed_refresh_keeps_previous_catalog() {
    let failing = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&failing);
    let products = sample_catalog(5);
    let routes = Router::new().route(
        "/products/list",
        get(move |Query(query): Query<PageQuery>| {
            let flag = Arc::clone(&flag);
            let products = products.clone();
            async move {
                if flag.load(Ordering::SeqCst) {
                    return StatusCode::INTERNAL_SERVER_ERROR.into_response();
                }
                let page = listing_page(
                    &products,
                    query.page.unwrap_or(1),
                    query.per_page.unwrap_or(10),
                    ListingShape::Products,
                );
                Json(page).into_response()
            }
        }),
    );
    let backend = MockBackend::start(routes).await;
    let mut store = signed_in(&backend).await;
    store.refresh_catalog().await.unwrap();

    failing.store(true, Ordering::SeqCst);
    let err = store.refresh_catalog().await.unwrap_err();

    assert!(matches!(err, StorefrontError::Api(_)));
    assert!(!store.catalog().is_fetching());
    assert_eq!(store.catalog().products().len(), 5);
}

#[tokio::test]
async fn test_shopping_flow() {
    let routes = listing_router(sample_catalog(12), ListingShape::Products)
        .merge(categories_route())
        .route(
            "/auth/login",
            post(|| async {
                Json(json!({ "token": "jwt", "user": { "id": 3, "username": "kim" } }))
            }),
        );
    let backend = MockBackend::start(routes).await;
    let mut store = Storefront::new(backend.client());

    let user = store.login("kim", "pw").await.unwrap();
    assert_eq!(user.username, "kim");
    assert!(!user.is_admin());

    store.refresh_catalog().await.unwrap();

    // Product 1 costs 1.50, product 4 costs 4.50
    store.add_to_cart(ProductId::new(1)).unwrap();
    store.add_to_cart(ProductId::new(1)).unwrap();
    store.add_to_cart(ProductId::new(4)).unwrap();
    assert!(matches!(
        store.add_to_cart(ProductId::new(999)),
        Err(StorefrontError::UnknownProduct(_))
    ));

    let summary = store.checkout_summary().unwrap();
    assert_eq!(summary.item_count, 3);
    assert_eq!(summary.subtotal.display_amount(), "7.50");
    assert_eq!(summary.total.display_amount(), "17.50");

    store.update_quantity(ProductId::new(4), 2).unwrap();
    assert!(store.remove_from_cart(ProductId::new(1)).unwrap());
    let placed = store.place_order().unwrap();
    assert_eq!(placed.subtotal.display_amount(), "9.00");
    assert!(store.cart().is_empty());

    store.add_to_cart(ProductId::new(2)).unwrap();
    store.logout();
    assert!(!store.is_authenticated());
    assert!(store.cart().is_empty());
    assert!(matches!(
        store.add_to_cart(ProductId::new(2)),
        Err(StorefrontError::NotAuthenticated)
    ));
}

#[tokio::test]
async fn test_logged_out_session_cannot_browse_or_order() {
    let backend = MockBackend::start(listing_router(sample_catalog(3), ListingShape::Products)).await;
    let mut store = Storefront::new(backend.client());

    assert!(matches!(
        store.refresh_catalog().await,
        Err(StorefrontError::NotAuthenticated)
    ));
    assert!(matches!(
        store.place_order(),
        Err(StorefrontError::NotAuthenticated)
    ));
    assert_eq!(backend.hits(), 0);

    store.login("admin", "admin").await.unwrap();
    store.refresh_catalog().await.unwrap();
    store.add_to_cart(ProductId::new(3)).unwrap();

    // 3.50 plus flat shipping
    let placed = store.place_order().unwrap();
    assert_eq!(placed.total.display_amount(), "13.50");
    assert!(store.cart().is_empty());
}
