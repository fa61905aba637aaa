//! Terminal output for command results.

#![allow(clippy::print_stdout)]

use serde::Serialize;
use serde_json::json;
use shopfront_client::{DeleteConfirmation, ProductListing};
use shopfront_core::catalog::display_category;
use shopfront_core::{CatalogPage, CheckoutSummary, Product, ProductId, User};

/// Output format selected by `--json`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Text,
    Json,
}

fn print_json(value: &impl Serialize) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn product_row(product: &Product) {
    let category = if product.category.is_empty() {
        String::new()
    } else {
        format!("  [{}]", display_category(&product.category))
    };
    println!(
        "{:>6}  {:<40}  {:>10}{category}",
        product.id.to_string(),
        product.title,
        product.price.to_string()
    );
}

pub fn user(format: Format, user: &User, token: Option<&str>) -> Result<(), serde_json::Error> {
    if format == Format::Json {
        return print_json(&json!({ "user": user, "token": token }));
    }

    println!("Logged in as {} ({})", user.username, user.role.as_str());
    if let Some(email) = &user.email {
        println!("Email: {email}");
    }
    if let Some(token) = token {
        println!("Token: {token}");
    }
    Ok(())
}

pub fn listing(format: Format, page: u32, listing: &ProductListing) -> Result<(), serde_json::Error> {
    if format == Format::Json {
        return print_json(&json!({
            "page": page,
            "total_pages": listing.total_pages,
            "products": listing.products,
        }));
    }

    if listing.products.is_empty() {
        println!("No products on page {page}.");
    }
    for product in &listing.products {
        product_row(product);
    }
    match listing.total_pages {
        Some(total) => println!("\nPage {page} of {total}"),
        None => println!("\nPage {page}"),
    }
    Ok(())
}

pub fn product(format: Format, verb: &str, product: &Product) -> Result<(), serde_json::Error> {
    if format == Format::Json {
        return print_json(product);
    }

    println!("{verb} product {}: {}", product.id, product.title);
    println!("Price: {}", product.price);
    if !product.description.is_empty() {
        println!("Description: {}", product.description);
    }
    Ok(())
}

pub fn deleted(
    format: Format,
    id: ProductId,
    confirmation: &DeleteConfirmation,
) -> Result<(), serde_json::Error> {
    if format == Format::Json {
        return print_json(&confirmation.body);
    }

    match &confirmation.message {
        Some(message) => println!("Deleted product {id}: {message}"),
        None => println!("Deleted product {id}"),
    }
    Ok(())
}

pub fn catalog(
    format: Format,
    page: &CatalogPage,
    categories: &[String],
) -> Result<(), serde_json::Error> {
    if format == Format::Json {
        return print_json(&json!({ "page": page, "categories": categories }));
    }

    let names: Vec<String> = categories.iter().map(|c| display_category(c)).collect();
    println!("Categories: All, {}", names.join(", "));
    println!("Showing: {}\n", display_category(page.category.as_str()));

    if page.items.is_empty() {
        println!("No products found.");
    }
    for product in &page.items {
        product_row(product);
    }

    let previous = if page.has_previous() { "< Previous" } else { "" };
    let next = if page.has_next() { "Next >" } else { "" };
    println!(
        "\n{previous}  Page {} of {} ({} products)  {next}",
        page.page_number, page.total_pages, page.total_items
    );
    Ok(())
}

pub fn checkout(
    format: Format,
    summary: &CheckoutSummary,
    placed: bool,
) -> Result<(), serde_json::Error> {
    if format == Format::Json {
        return print_json(&json!({ "summary": summary, "placed": placed }));
    }

    for line in &summary.lines {
        println!(
            "{:>3} x {:<40} {:>10}  {:>10}",
            line.quantity(),
            line.title,
            line.price.to_string(),
            line.line_total().to_string()
        );
    }
    println!();
    println!("Items:    {}", summary.item_count);
    println!("Subtotal: {}", summary.subtotal);
    println!("Shipping: {}", summary.shipping);
    println!("Total:    {}", summary.total);
    if placed {
        println!("\nOrder placed. Your cart is now empty.");
    }
    Ok(())
}
