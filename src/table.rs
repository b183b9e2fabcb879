//! Markdown product table scraping.
//!
//! The backend renders its suggestions as a seven column markdown table inside the
//! reply text. When a response carries no structured `products` list, the session
//! falls back to reading the rows back out of that table.

use crate::product::{parse_number, Product};
use regex::Regex;
use std::sync::OnceLock;

/// Row layout: title | $price | score | [View](link) | availability | delivery | category
const ROW_PATTERN: &str =
    r"\| (.*?) \| \$(.*?) \| (.*?) \| \[View\]\((.*?)\) \| (.*?) \| (.*?) \| (.*?) \|";

fn row_regex() -> &'static Regex {
    static ROW: OnceLock<Regex> = OnceLock::new();
    ROW.get_or_init(|| Regex::new(ROW_PATTERN).expect("row pattern is a valid regex"))
}

/// Extract product rows from a markdown table embedded in free text
///
/// Rows that do not match the exact column layout are skipped, including the
/// header and separator rows. Price and score cells that are not numbers become
/// `f64::NAN`.
///
/// # Example
///
/// ```rust
/// use buying_assistant::extract_products_from_text;
///
/// let text = "| Title | Price | Match Score | Link | Availability | Delivery Time | Category |\n\
///             | Laptop X | $499.99 | 0.91 | [View](http://x) | In Stock | 2 days | Electronics |\n";
/// let products = extract_products_from_text(text);
///
/// assert_eq!(products.len(), 1);
/// assert_eq!(products[0].price, 499.99);
/// assert_eq!(products[0].link, "http://x");
/// ```
pub fn extract_products_from_text(text: &str) -> Vec<Product> {
    row_regex()
        .captures_iter(text)
        .map(|caps| {
            let cell = |i: usize| caps.get(i).map_or("", |m| m.as_str()).to_string();
            Product {
                title: cell(1),
                price: parse_number(&cell(2)),
                match_score: parse_number(&cell(3)),
                link: cell(4),
                availability: cell(5),
                delivery_time: cell(6),
                category: cell(7),
                description: None,
                product_id: None,
            }
        })
        .collect()
}
