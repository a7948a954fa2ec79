//! Price text cleanup
//!
//! Storefront prices are rendered for a comma-decimal locale with spaces
//! (often non-breaking) as thousands separators, e.g. `3 299,00`.

use regex::Regex;
use std::sync::LazyLock;

static NON_PRICE_CHARS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^0-9,]+").unwrap());

/// Parses displayed price text into currency units
///
/// Everything but digits and commas is stripped, commas become decimal
/// points, and the longest leading number is read. Text without a leading
/// number yields `0.0`, which the listing filter discards.
///
/// # Examples
///
/// ```
/// use product_crawler::crawler::parse_price;
///
/// assert_eq!(parse_price("1 234,99"), 1234.99);
/// assert_eq!(parse_price("brak"), 0.0);
/// ```
pub fn parse_price(text: &str) -> f64 {
    let digits = NON_PRICE_CHARS.replace_all(text, "");
    let dotted = digits.replace(',', ".");
    leading_number(&dotted)
}

/// Reads `digits[.digits]` from the start of `text`
fn leading_number(text: &str) -> f64 {
    let bytes = text.as_bytes();
    let mut end = bytes.iter().take_while(|b| b.is_ascii_digit()).count();

    if bytes.get(end) == Some(&b'.') {
        let fraction = bytes[end + 1..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count();
        if fraction > 0 {
            end += 1 + fraction;
        }
    }

    text[..end].parse().unwrap_or(0.0)
}
