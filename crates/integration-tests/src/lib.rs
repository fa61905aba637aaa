//! Integration test support for Shopfront.
//!
//! Tests run the real `reqwest` client against an in-process `axum` mock of
//! the product API, bound to an ephemeral port.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p shopfront-integration-tests
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! let backend = MockBackend::start(listing_router(sample_catalog(25), ListingShape::Products)).await;
//! let listing = backend.client().list_products(1, 10).await?;
//! assert_eq!(backend.hits(), 1);
//! ```

#![allow(clippy::expect_used, clippy::missing_panics_doc)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::extract::{Query, Request};
use axum::middleware::{self, Next};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{Value, json};
use shopfront_client::{ApiClient, ClientConfig};
use tokio::task::JoinHandle;
use url::Url;

// =============================================================================
// Mock backend
// =============================================================================

/// A running mock of the product API, served under `/api`.
///
/// The server task is aborted on drop.
pub struct MockBackend {
    addr: SocketAddr,
    hits: Arc<AtomicUsize>,
    server: JoinHandle<()>,
}

impl MockBackend {
    /// Serve `routes` (paths relative to `/api`) on an ephemeral port.
    pub async fn start(routes: Router) -> Self {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);

        let app = Router::new()
            .nest("/api", routes)
            .layer(middleware::from_fn(move |request: Request, next: Next| {
                let counter = Arc::clone(&counter);
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    next.run(request).await
                }
            }));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind listener");
        let addr = listener.local_addr().expect("local addr");
        let server = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve mock backend");
        });

        Self { addr, hits, server }
    }

    /// Base URL the client should use.
    #[must_use]
    pub fn url(&self) -> Url {
        Url::parse(&format!("http://{}/api", self.addr)).expect("mock backend url")
    }

    /// Default configuration pointed at this backend.
    #[must_use]
    pub fn config(&self) -> ClientConfig {
        ClientConfig::new(self.url())
    }

    /// A client built from [`MockBackend::config`].
    #[must_use]
    pub fn client(&self) -> ApiClient {
        ApiClient::new(&self.config()).expect("build api client")
    }

    /// Number of requests the backend has received.
    #[must_use]
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        self.server.abort();
    }
}

/// A URL on which nothing is listening.
pub async fn unreachable_url() -> Url {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind listener");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    Url::parse(&format!("http://{addr}/api")).expect("unreachable url")
}

// =============================================================================
// Fixtures
// =============================================================================

const CATEGORIES: [&str; 3] = ["beauty", "fragrances", "furniture"];

/// Product record as the backend would send it. Price is `id + 0.50`.
#[must_use]
pub fn product_json(id: i64, category: &str) -> Value {
    json!({
        "id": id,
        "title": format!("Product {id}"),
        "description": format!("Description of product {id}"),
        "price": format!("{id}.50"),
        "thumbnail": format!("https://cdn.example.com/products/{id}.png"),
        "category": category,
    })
}

/// `count` products with IDs `1..=count`, cycling through three categories.
#[must_use]
pub fn sample_catalog(count: i64) -> Vec<Value> {
    (1..=count)
        .zip(CATEGORIES.iter().cycle())
        .map(|(id, category)| product_json(id, category))
        .collect()
}

/// Envelope used by [`listing_router`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingShape {
    /// A bare array with no paging metadata.
    Bare,
    /// `{products, total_pages}`
    Products,
    /// `{data, meta: {total, per_page}}`
    DataMeta,
}

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<usize>,
    pub per_page: Option<usize>,
}

/// One page of `products` in the given envelope.
#[must_use]
pub fn listing_page(products: &[Value], page: usize, per_page: usize, shape: ListingShape) -> Value {
    let per_page = per_page.max(1);
    let items: Vec<Value> = products
        .iter()
        .skip(page.saturating_sub(1) * per_page)
        .take(per_page)
        .cloned()
        .collect();

    match shape {
        ListingShape::Bare => json!(items),
        ListingShape::Products => json!({
            "products": items,
            "total_pages": products.len().div_ceil(per_page),
        }),
        ListingShape::DataMeta => json!({
            "data": items,
            "meta": { "total": products.len(), "per_page": per_page },
        }),
    }
}

/// Routes serving `GET /products/list` over `products`.
pub fn listing_router(products: Vec<Value>, shape: ListingShape) -> Router {
    let products = Arc::new(products);
    Router::new().route(
        "/products/list",
        get(move |Query(query): Query<PageQuery>| {
            let products = Arc::clone(&products);
            async move {
                Json(listing_page(
                    &products,
                    query.page.unwrap_or(1),
                    query.per_page.unwrap_or(10),
                    shape,
                ))
            }
        }),
    )
}
