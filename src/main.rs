//! CLI entry point for the catalog browser.

use anyhow::Result;
use catalog_core::{
    ApiClient, ApiConfig, FilterCriteria, fetch_details, fetch_filter_options, fetch_ids,
};
use clap::Parser;
use tracing::{debug, info};

mod cli;

use cli::{Args, Command};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Determine log level based on verbose/quiet flags
    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (warn)
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt().with_env_filter(filter).init();

    debug!(?args, "CLI arguments parsed");

    let config = ApiConfig::new(args.base_url, args.secret).with_max_attempts(args.max_attempts);
    let client = ApiClient::new(config)?;

    match args.command {
        Command::List {
            page,
            product,
            price,
            brand,
        } => {
            let criteria = FilterCriteria {
                product,
                price,
                brand,
            };
            list_page(&client, page, &criteria).await?;
        }
        Command::Fields => {
            print_fields(&client).await;
        }
    }

    Ok(())
}

/// Fetches and prints one page: IDs first, then resolved records.
async fn list_page(client: &ApiClient, page: u32, criteria: &FilterCriteria) -> Result<()> {
    info!(page, filtered = !criteria.is_empty(), "fetching catalog page");

    let id_page = fetch_ids(client, page, criteria).await?;
    let products = fetch_details(client, &id_page.ids).await?;

    if products.is_empty() {
        println!("no products on page {page}");
    }
    for product in &products {
        let brand = product.brand.as_deref().unwrap_or("-");
        println!(
            "{}  {} ({}) - {}",
            product.id, product.product, brand, product.price
        );
    }
    println!("page {} of {}", page + 1, id_page.total_pages.max(1));

    Ok(())
}

/// Prints the distinct values available for each filterable field.
async fn print_fields(client: &ApiClient) {
    let options = fetch_filter_options(client).await;

    println!("brand ({} values):", options.brand.len());
    for brand in &options.brand {
        println!("  {brand}");
    }
    println!("price ({} values):", options.price.len());
    for price in &options.price {
        println!("  {price}");
    }
    println!("product ({} values):", options.product.len());
    for product in &options.product {
        println!("  {product}");
    }
}
