//! Console rendering of crawl progress
//!
//! Rendering is kept separate from printing so the exact text can be tested.

use crate::crawler::{ListingEntry, ProductDetails};
use crate::storage::ProductRecord;

/// Line framing each product block
pub const SEPARATOR: &str =
    "=====================================================================";

/// Opening of a product block: separator, title and price
pub fn render_listing_header(entry: &ListingEntry, currency: &str) -> String {
    format!(
        "{}\n\nTitle: {}\nPrice: {:.2} {}",
        SEPARATOR, entry.title, entry.price, currency
    )
}

/// Specification rows followed by the detail page URL
pub fn render_details(details: &ProductDetails) -> String {
    let mut out = String::new();
    for spec in &details.specs {
        out.push_str(&spec.to_string());
        out.push('\n');
    }
    out.push_str(&format!("URL : {}", details.url));
    out
}

/// Closing of a product block
pub fn render_listing_footer() -> String {
    format!("\n{}\n", SEPARATOR)
}

/// One stored product as a table line
pub fn render_product_line(product: &ProductRecord, currency: &str) -> String {
    format!(
        "{:>5}  {:>10.2} {}  {}\n       {}",
        product.id, product.price, currency, product.title, product.url
    )
}

/// Prints stored products to stdout
pub fn print_products(products: &[ProductRecord], currency: &str) {
    if products.is_empty() {
        println!("No products recorded.");
        return;
    }

    for product in products {
        println!("{}", render_product_line(product, currency));
    }
}
