//! Product-Crawler main entry point
//!
//! This is the command-line interface for the Product-Crawler scraper.

use clap::Parser;
use product_crawler::config::{load_config_with_hash, validate, Config};
use product_crawler::crawler::crawl;
use product_crawler::url::build_search_url;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Product-Crawler: a single-page storefront scraper
///
/// Fetches one search-results page, prints each product's specification
/// table and records the products in a local SQLite database. Without a
/// configuration file the built-in storefront, category and keywords are used.
#[derive(Parser, Debug)]
#[command(name = "product-crawler")]
#[command(version = "1.0.0")]
#[command(about = "A single-page storefront scraper", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Search category, overriding the configuration
    #[arg(short, long)]
    category: Option<String>,

    /// Search keyword, repeatable; replaces the configured keyword list
    #[arg(short = 'k', long = "keyword", value_name = "KEYWORD")]
    keywords: Vec<String>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show the search URL without crawling
    #[arg(long, conflicts_with = "list")]
    dry_run: bool,

    /// Show recorded products from the database and exit
    #[arg(long, conflicts_with = "dry_run")]
    list: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            match load_config_with_hash(path) {
                Ok((cfg, hash)) => {
                    tracing::info!("Configuration loaded successfully (hash: {})", hash);
                    cfg
                }
                Err(e) => {
                    tracing::error!("Failed to load configuration: {}", e);
                    return Err(e.into());
                }
            }
        }
        None => Config::default(),
    };

    if let Some(category) = cli.category {
        config.site.category = category;
    }
    if !cli.keywords.is_empty() {
        config.site.keywords = cli.keywords;
    }
    validate(&config)?;

    if cli.dry_run {
        handle_dry_run(&config)?;
    } else if cli.list {
        handle_list(&config)?;
    } else {
        handle_crawl(config).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("product_crawler=info,warn"),
            1 => EnvFilter::new("product_crawler=debug,info"),
            2 => EnvFilter::new("product_crawler=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Handles the --dry-run mode: validates config and shows what would be crawled
fn handle_dry_run(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Product-Crawler Dry Run ===\n");

    println!("Search:");
    println!("  Base URL: {}", config.site.base_url);
    println!("  Category: {}", config.site.category);
    println!("  Keywords: {}", config.site.keywords.join(", "));

    println!("\nRequests:");
    println!("  User-Agent: {}", config.request.user_agent);
    println!("  Accept: {}", config.request.accept);
    println!("  Crawl timeout: {}ms", config.request.crawl_timeout_ms);

    println!("\nSelectors:");
    println!("  Result item: {}", config.selectors.result_item);
    println!("  Link: {}", config.selectors.link);
    println!(
        "  Titles ({:?}): {}",
        config.selectors.title_mode,
        config.selectors.titles.join(", ")
    );
    println!("  Price: {}", config.selectors.price);
    println!(
        "  Specifications: {} {}",
        config.selectors.detail_section, config.selectors.detail_specs
    );

    println!("\nOutput:");
    println!("  Database: {}", config.output.database_path);
    println!("  Currency: {}", config.output.currency);

    let search_url = build_search_url(&config.site)?;

    println!("\n✓ Configuration is valid");
    println!("✓ Would start crawling {}", search_url);

    Ok(())
}

/// Handles the --list mode: shows products recorded in the database
fn handle_list(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    use product_crawler::output::{load_statistics, print_products, print_statistics};
    use product_crawler::storage::{open_storage, ProductStore};
    use std::path::Path;

    println!("Database: {}\n", config.output.database_path);

    let storage = open_storage(Path::new(&config.output.database_path))?;

    let stats = load_statistics(&storage)?;
    print_statistics(&stats, &config.output.currency);

    let products = storage.list_products()?;
    print_products(&products, &config.output.currency);

    storage.close()?;

    Ok(())
}

/// Handles the main crawl operation
async fn handle_crawl(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!(
        "Category: {}, keywords: {}",
        config.site.category,
        config.site.keywords.join(" ")
    );

    match crawl(config).await {
        Ok(summary) if summary.timed_out => {
            tracing::warn!(
                "Crawl timed out with {} products recorded",
                summary.products_recorded
            );
            Ok(())
        }
        Ok(summary) => {
            tracing::info!(
                "Crawl completed successfully: {} products recorded",
                summary.products_recorded
            );
            Ok(())
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            Err(e.into())
        }
    }
}
