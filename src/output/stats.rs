//! Statistics over the recorded products

use crate::storage::ProductStore;
use crate::CrawlerError;

/// Summary of the product table
#[derive(Debug, Clone, PartialEq)]
pub struct ProductStatistics {
    pub total_products: u64,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub average_price: Option<f64>,
}

/// Loads statistics from storage
///
/// # Arguments
///
/// * `storage` - The store to query
///
/// # Returns
///
/// * `Ok(ProductStatistics)` - Successfully loaded statistics
/// * `Err(CrawlerError)` - Failed to query the store
pub fn load_statistics(storage: &dyn ProductStore) -> Result<ProductStatistics, CrawlerError> {
    let total_products = storage.count_products()?;
    let prices: Vec<f64> = storage
        .list_products()?
        .into_iter()
        .map(|p| p.price)
        .collect();

    let min_price = prices.iter().copied().reduce(f64::min);
    let max_price = prices.iter().copied().reduce(f64::max);
    let average_price = if prices.is_empty() {
        None
    } else {
        Some(prices.iter().sum::<f64>() / prices.len() as f64)
    };

    Ok(ProductStatistics {
        total_products,
        min_price,
        max_price,
        average_price,
    })
}

/// Prints statistics to stdout
pub fn print_statistics(stats: &ProductStatistics, currency: &str) {
    println!("=== Product Statistics ===\n");
    println!("  Products recorded: {}", stats.total_products);

    if let (Some(min), Some(max), Some(avg)) =
        (stats.min_price, stats.max_price, stats.average_price)
    {
        println!("  Lowest price: {:.2} {}", min, currency);
        println!("  Highest price: {:.2} {}", max, currency);
        println!("  Average price: {:.2} {}", avg, currency);
    }
    println!();
}
