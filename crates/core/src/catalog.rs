//! Catalog view: the fetched product set, a category filter and a page cursor.
//!
//! The visible subset and the current page are derived from
//! `(products, category, page)` and recomputed synchronously on every change.
//! Changing the product set or the filter always restarts pagination at
//! page 1, so a shrinking result set never leaves the cursor out of range.
//!
//! # Fetch tracking
//!
//! A view allows at most one product fetch in flight. [`CatalogView::begin_fetch`]
//! hands out a [`FetchTicket`]; starting another fetch supersedes it, and
//! [`CatalogView::commit_fetch`] drops results carried by a superseded ticket.

use core::fmt;
use core::num::NonZeroUsize;

use serde::{Serialize, Serializer};
use thiserror::Error;

use crate::types::Product;

/// Products per catalog page when none is configured.
pub const DEFAULT_PAGE_SIZE: NonZeroUsize = match NonZeroUsize::new(12) {
    Some(size) => size,
    None => unreachable!(),
};

/// Filter value that selects every category.
pub const ALL_CATEGORIES: &str = "all";

/// Errors raised by catalog navigation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// Requested page lies outside `1..=total_pages`.
    #[error("page {requested} is out of range (1..={total_pages})")]
    PageOutOfRange { requested: usize, total_pages: usize },
}

/// Active category filter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    /// Exact, case-sensitive match on `Product::category`.
    Category(String),
}

impl CategoryFilter {
    /// Parse a filter value; `"all"` selects every category.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        if value == ALL_CATEGORIES {
            Self::All
        } else {
            Self::Category(value.to_string())
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::All => ALL_CATEGORIES,
            Self::Category(category) => category,
        }
    }

    /// Whether `product` passes this filter.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            Self::All => true,
            Self::Category(category) => product.category == *category,
        }
    }
}

impl From<&str> for CategoryFilter {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl From<String> for CategoryFilter {
    fn from(value: String) -> Self {
        if value == ALL_CATEGORIES {
            Self::All
        } else {
            Self::Category(value)
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for CategoryFilter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Identifies one product fetch. Only the newest ticket may commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use = "a fetch ticket must be committed or aborted"]
pub struct FetchTicket {
    generation: u64,
}

/// Snapshot of the visible page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogPage {
    pub items: Vec<Product>,
    pub page_number: usize,
    pub total_pages: usize,
    /// Number of products passing the filter, across all pages.
    pub total_items: usize,
    pub category: CategoryFilter,
}

impl CatalogPage {
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.page_number > 1
    }

    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.page_number < self.total_pages
    }
}

/// Paged, filtered view over the fetched product set.
#[derive(Debug, Clone)]
pub struct CatalogView {
    products: Vec<Product>,
    /// Indices into `products` that pass the filter, in product order.
    visible: Vec<usize>,
    category: CategoryFilter,
    page: usize,
    page_size: NonZeroUsize,
    backend_categories: Option<Vec<String>>,
    generation: u64,
    in_flight: Option<u64>,
}

impl Default for CatalogView {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl CatalogView {
    /// Create an empty view.
    #[must_use]
    pub const fn new(page_size: NonZeroUsize) -> Self {
        Self {
            products: Vec::new(),
            visible: Vec::new(),
            category: CategoryFilter::All,
            page: 1,
            page_size,
            backend_categories: None,
            generation: 0,
            in_flight: None,
        }
    }

    /// Replace the product set wholesale, reapply the filter, go to page 1.
    pub fn replace_products(&mut self, products: Vec<Product>) {
        self.products = products;
        self.refilter();
    }

    /// Select a category (or [`CategoryFilter::All`]) and go to page 1.
    pub fn set_category(&mut self, category: impl Into<CategoryFilter>) {
        self.category = category.into();
        self.refilter();
    }

    /// Move to page `page`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::PageOutOfRange`] unless
    /// `1 <= page <= total_pages()`; the cursor is left unchanged.
    pub fn set_page(&mut self, page: usize) -> Result<(), CatalogError> {
        let total_pages = self.total_pages();
        if page == 0 || page > total_pages {
            return Err(CatalogError::PageOutOfRange {
                requested: page,
                total_pages,
            });
        }
        self.page = page;
        Ok(())
    }

    /// Advance one page.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::PageOutOfRange`] on the last page.
    pub fn next_page(&mut self) -> Result<usize, CatalogError> {
        self.set_page(self.page.saturating_add(1))?;
        Ok(self.page)
    }

    /// Go back one page.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::PageOutOfRange`] on the first page.
    pub fn previous_page(&mut self) -> Result<usize, CatalogError> {
        self.set_page(self.page.saturating_sub(1))?;
        Ok(self.page)
    }

    /// Current page number (1-based).
    #[must_use]
    pub const fn page(&self) -> usize {
        self.page
    }

    #[must_use]
    pub const fn page_size(&self) -> usize {
        self.page_size.get()
    }

    #[must_use]
    pub const fn category(&self) -> &CategoryFilter {
        &self.category
    }

    /// The full, unfiltered product set.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Number of products passing the filter.
    #[must_use]
    pub const fn visible_count(&self) -> usize {
        self.visible.len()
    }

    /// `ceil(visible_count / page_size)`, and never less than 1 so that an
    /// empty result still has a (blank) first page.
    #[must_use]
    pub const fn total_pages(&self) -> usize {
        let pages = self.visible.len().div_ceil(self.page_size.get());
        if pages == 0 { 1 } else { pages }
    }

    /// Products passing the filter, in product order.
    pub fn visible(&self) -> impl Iterator<Item = &Product> {
        self.visible.iter().filter_map(|&i| self.products.get(i))
    }

    /// Products on the current page.
    pub fn page_items(&self) -> impl Iterator<Item = &Product> {
        let start = (self.page - 1) * self.page_size.get();
        self.visible().skip(start).take(self.page_size.get())
    }

    /// Build a snapshot of the current page.
    #[must_use]
    pub fn current_page(&self) -> CatalogPage {
        CatalogPage {
            items: self.page_items().cloned().collect(),
            page_number: self.page,
            total_pages: self.total_pages(),
            total_items: self.visible_count(),
            category: self.category.clone(),
        }
    }

    /// Store a category list supplied by the backend. `None` falls back to
    /// categories derived from the loaded products.
    pub fn set_categories(&mut self, categories: Option<Vec<String>>) {
        self.backend_categories = categories;
    }

    /// Categories available for filtering.
    #[must_use]
    pub fn categories(&self) -> Vec<String> {
        self.backend_categories
            .clone()
            .unwrap_or_else(|| derive_categories(&self.products))
    }

    /// Start a product fetch, superseding any fetch already in flight.
    pub const fn begin_fetch(&mut self) -> FetchTicket {
        self.generation += 1;
        self.in_flight = Some(self.generation);
        FetchTicket {
            generation: self.generation,
        }
    }

    /// Whether a fetch is outstanding (navigation should be disabled).
    #[must_use]
    pub const fn is_fetching(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Apply the result of the fetch identified by `ticket`.
    ///
    /// Returns `false` and leaves the view untouched when the ticket has been
    /// superseded or already settled.
    pub fn commit_fetch(&mut self, ticket: FetchTicket, products: Vec<Product>) -> bool {
        if self.in_flight != Some(ticket.generation) {
            return false;
        }
        self.in_flight = None;
        self.replace_products(products);
        true
    }

    /// Settle a failed fetch without touching the product set.
    pub fn abort_fetch(&mut self, ticket: FetchTicket) {
        if self.in_flight == Some(ticket.generation) {
            self.in_flight = None;
        }
    }

    fn refilter(&mut self) {
        let category = &self.category;
        self.visible = self
            .products
            .iter()
            .enumerate()
            .filter(|(_, p)| category.matches(p))
            .map(|(i, _)| i)
            .collect();
        self.page = 1;
    }
}

/// Distinct non-empty categories in first-seen order, case preserved.
#[must_use]
pub fn derive_categories(products: &[Product]) -> Vec<String> {
    let mut categories: Vec<String> = Vec::new();
    for product in products {
        if !product.category.is_empty() && !categories.contains(&product.category) {
            categories.push(product.category.clone());
        }
    }
    categories
}

/// Capitalize the first letter for display (`"home-decoration"` →
/// `"Home-decoration"`). Filtering always uses the raw value.
#[must_use]
pub fn display_category(category: &str) -> String {
    let mut chars = category.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::{Price, ProductId};

    fn product(id: i64, category: &str) -> Product {
        Product::new(ProductId::new(id), format!("P{id}"), Price::from_cents(100))
            .with_category(category)
    }

    fn view_with(n: i64, page_size: usize) -> CatalogView {
        let mut view = CatalogView::new(NonZeroUsize::new(page_size).unwrap());
        view.replace_products((1..=n).map(|i| product(i, "misc")).collect());
        view
    }

    fn ids<'a>(items: impl Iterator<Item = &'a Product>) -> Vec<i64> {
        items.map(|p| p.id.as_i64()).collect()
    }

    #[test]
    fn test_page_derivation() {
        let mut view = view_with(25, 10);
        assert_eq!(view.total_pages(), 3);
        assert_eq!(ids(view.page_items()), (1..=10).collect::<Vec<_>>());

        view.set_page(3).unwrap();
        assert_eq!(ids(view.page_items()), (21..=25).collect::<Vec<_>>());
    }

    #[test]
    fn test_empty_catalog_has_one_blank_page() {
        let view = CatalogView::default();
        assert_eq!(view.total_pages(), 1);
        assert_eq!(view.page_items().count(), 0);
        let page = view.current_page();
        assert!(!page.has_next());
        assert!(!page.has_previous());
    }

    #[test]
    fn test_set_page_rejects_out_of_range() {
        let mut view = view_with(25, 10);
        assert_eq!(
            view.set_page(0),
            Err(CatalogError::PageOutOfRange {
                requested: 0,
                total_pages: 3
            })
        );
        assert!(view.set_page(4).is_err());
        assert_eq!(view.page(), 1);
    }

    #[test]
    fn test_next_and_previous_stop_at_boundaries() {
        let mut view = view_with(15, 10);
        assert!(view.previous_page().is_err());
        assert_eq!(view.next_page().unwrap(), 2);
        assert!(view.next_page().is_err());
        assert_eq!(view.previous_page().unwrap(), 1);
    }

    #[test]
    fn test_set_category_filters_and_resets_page() {
        let mut view = CatalogView::new(NonZeroUsize::new(2).unwrap());
        view.replace_products(vec![
            product(1, "beauty"),
            product(2, "groceries"),
            product(3, "beauty"),
            product(4, "beauty"),
            product(5, "Beauty"),
        ]);
        view.set_page(3).unwrap();

        view.set_category("beauty");
        assert_eq!(view.page(), 1);
        assert_eq!(ids(view.visible()), vec![1, 3, 4]);
        assert_eq!(view.total_pages(), 2);
    }

    #[test]
    fn test_set_category_all_restores_full_set() {
        let mut view = view_with(30, 12);
        view.set_category("nothing-matches");
        assert_eq!(view.visible_count(), 0);

        view.set_category(ALL_CATEGORIES);
        assert_eq!(view.category(), &CategoryFilter::All);
        assert_eq!(view.visible_count(), 30);
        assert_eq!(view.page(), 1);
    }

    #[test]
    fn test_replace_products_keeps_filter_and_resets_page() {
        let mut view = CatalogView::new(NonZeroUsize::new(1).unwrap());
        view.replace_products(vec![product(1, "a"), product(2, "b"), product(3, "a")]);
        view.set_category("a");
        view.set_page(2).unwrap();

        view.replace_products(vec![product(4, "a"), product(5, "b")]);
        assert_eq!(view.page(), 1);
        assert_eq!(ids(view.visible()), vec![4]);
    }

    #[test]
    fn test_derived_categories_first_seen_order() {
        let mut view = CatalogView::default();
        view.replace_products(vec![
            product(1, "smartphones"),
            product(2, "Laptops"),
            product(3, "smartphones"),
            product(4, ""),
            product(5, "fragrances"),
        ]);
        assert_eq!(view.categories(), vec!["smartphones", "Laptops", "fragrances"]);
    }

    #[test]
    fn test_backend_categories_take_precedence() {
        let mut view = CatalogView::default();
        view.replace_products(vec![product(1, "smartphones")]);
        view.set_categories(Some(vec!["beauty".to_string(), "laptops".to_string()]));
        assert_eq!(view.categories(), vec!["beauty", "laptops"]);

        view.set_categories(None);
        assert_eq!(view.categories(), vec!["smartphones"]);
    }

    #[test]
    fn test_display_category() {
        assert_eq!(display_category("home-decoration"), "Home-decoration");
        assert_eq!(display_category("Laptops"), "Laptops");
        assert_eq!(display_category(""), "");
    }

    #[test]
    fn test_superseded_fetch_is_discarded() {
        let mut view = CatalogView::default();
        let first = view.begin_fetch();
        let second = view.begin_fetch();

        assert!(view.commit_fetch(second, vec![product(2, "new")]));
        assert!(!view.commit_fetch(first, vec![product(1, "old")]));
        assert_eq!(ids(view.visible()), vec![2]);
        assert!(!view.is_fetching());
    }

    #[test]
    fn test_stale_result_after_newer_start_is_discarded() {
        let mut view = CatalogView::default();
        let first = view.begin_fetch();
        let _second = view.begin_fetch();

        assert!(!view.commit_fetch(first, vec![product(1, "old")]));
        assert!(view.is_fetching());
        assert!(view.products().is_empty());
    }

    #[test]
    fn test_abort_fetch_keeps_products() {
        let mut view = view_with(3, 12);
        let ticket = view.begin_fetch();
        assert!(view.is_fetching());

        view.abort_fetch(ticket);
        assert!(!view.is_fetching());
        assert_eq!(view.products().len(), 3);
        assert!(!view.commit_fetch(ticket, Vec::new()));
    }
}
