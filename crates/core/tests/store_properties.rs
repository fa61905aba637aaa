#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use std::collections::HashMap;
use std::num::NonZeroUsize;

use proptest::prelude::*;
use proptest::test_runner::Config;
use shopfront_core::catalog::ALL_CATEGORIES;
use shopfront_core::{Cart, CatalogView, Price, Product, ProductId};

const CATEGORIES: [&str; 4] = ["beauty", "laptops", "groceries", "Laptops"];

fn catalog(categories: &[usize]) -> Vec<Product> {
    categories
        .iter()
        .zip(1_i64..)
        .map(|(&c, id)| {
            Product::new(ProductId::new(id), format!("P{id}"), Price::from_cents(id * 100))
                .with_category(CATEGORIES[c % CATEGORIES.len()])
        })
        .collect()
}

#[derive(Debug, Clone)]
enum CartOp {
    Add(i64),
    Remove(i64),
    Update(i64, u32),
    Clear,
}

fn cart_op() -> impl Strategy<Value = CartOp> {
    prop_oneof![
        4 => (1_i64..6).prop_map(CartOp::Add),
        1 => (1_i64..6).prop_map(CartOp::Remove),
        2 => ((1_i64..6), (0_u32..5)).prop_map(|(id, q)| CartOp::Update(id, q)),
        1 => Just(CartOp::Clear),
    ]
}

proptest! {
    #![proptest_config(Config::with_cases(128))]

    #[test]
    fn pages_cover_visible_products_exactly_once(
        categories in prop::collection::vec(0_usize..4, 0..60),
        page_size in 1_usize..15,
        filter in prop::option::of(0_usize..4),
    ) {
        let mut view = CatalogView::new(NonZeroUsize::new(page_size).unwrap());
        view.replace_products(catalog(&categories));
        if let Some(c) = filter {
            view.set_category(CATEGORIES[c]);
        }

        let expected: Vec<ProductId> = view.visible().map(|p| p.id).collect();
        let mut seen = Vec::new();
        for page in 1..=view.total_pages() {
            view.set_page(page).unwrap();
            let items: Vec<ProductId> = view.page_items().map(|p| p.id).collect();
            prop_assert!(items.len() <= page_size);
            seen.extend(items);
        }
        prop_assert_eq!(seen, expected);
        prop_assert!(view.total_pages() >= 1);
    }

    #[test]
    fn filtered_products_all_match_category(
        categories in prop::collection::vec(0_usize..4, 0..60),
        filter in 0_usize..4,
    ) {
        let mut view = CatalogView::default();
        view.replace_products(catalog(&categories));
        view.set_category(CATEGORIES[filter]);

        prop_assert!(view.visible().all(|p| p.category == CATEGORIES[filter]));
        let expected = categories.iter().filter(|&&c| c == filter).count();
        prop_assert_eq!(view.visible_count(), expected);
    }

    #[test]
    fn selecting_all_restores_full_set(
        categories in prop::collection::vec(0_usize..4, 0..60),
        filter in 0_usize..4,
        page in 1_usize..6,
    ) {
        let mut view = CatalogView::new(NonZeroUsize::new(5).unwrap());
        view.replace_products(catalog(&categories));
        view.set_category(CATEGORIES[filter]);
        let _ = view.set_page(page);

        view.set_category(ALL_CATEGORIES);
        prop_assert_eq!(view.visible_count(), categories.len());
        prop_assert_eq!(view.page(), 1);
    }

    #[test]
    fn cart_lines_stay_unique_and_positive(ops in prop::collection::vec(cart_op(), 0..50)) {
        let mut cart = Cart::new();
        let mut model: HashMap<i64, u32> = HashMap::new();

        for op in ops {
            match op {
                CartOp::Add(id) => {
                    let product = Product::new(ProductId::new(id), "P", Price::from_cents(id * 250));
                    cart.add_to_cart(&product);
                    *model.entry(id).or_default() += 1;
                }
                CartOp::Remove(id) => {
                    prop_assert_eq!(cart.remove_from_cart(ProductId::new(id)), model.remove(&id).is_some());
                }
                CartOp::Update(id, quantity) => {
                    let result = cart.update_quantity(ProductId::new(id), quantity);
                    if quantity == 0 {
                        prop_assert!(result.is_err());
                    } else if let Some(q) = model.get_mut(&id) {
                        *q = quantity;
                        prop_assert!(result.unwrap());
                    } else {
                        prop_assert!(!result.unwrap());
                    }
                }
                CartOp::Clear => {
                    cart.clear_cart();
                    model.clear();
                }
            }

            prop_assert_eq!(cart.len(), model.len());
            for line in cart.lines() {
                prop_assert!(line.quantity() >= 1);
                prop_assert_eq!(Some(&line.quantity()), model.get(&line.id.as_i64()));
            }
            let count: u64 = model.values().map(|&q| u64::from(q)).sum();
            prop_assert_eq!(cart.item_count(), count);
            let subtotal: Price = model
                .iter()
                .map(|(&id, &q)| Price::from_cents(id * 250).times(q))
                .sum();
            prop_assert_eq!(cart.subtotal(), subtotal);
        }
    }
}
