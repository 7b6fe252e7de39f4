//! CLI argument definitions using clap derive macros.

use clap::{Parser, Subcommand};

use catalog_core::{DEFAULT_BASE_URL, DEFAULT_MAX_ATTEMPTS, DEFAULT_SECRET};

/// Browse a paged, filterable remote product catalog.
#[derive(Parser, Debug)]
#[command(name = "catalog")]
#[command(author, version, about)]
pub struct Args {
    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,

    /// Catalog API endpoint
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Credential seed for the daily auth token
    #[arg(long, default_value = DEFAULT_SECRET)]
    pub secret: String,

    /// Maximum attempts per API call (1-10)
    #[arg(short = 'r', long, default_value_t = DEFAULT_MAX_ATTEMPTS, value_parser = clap::value_parser!(u32).range(1..=10))]
    pub max_attempts: u32,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fetch and print one page of products
    List {
        /// Zero-based page index
        #[arg(short, long, default_value_t = 0)]
        page: u32,

        /// Filter by product name
        #[arg(long)]
        product: Option<String>,

        /// Filter by exact price
        #[arg(long)]
        price: Option<f64>,

        /// Filter by brand
        #[arg(long)]
        brand: Option<String>,
    },

    /// Print the available filter options per field
    Fields,
}
