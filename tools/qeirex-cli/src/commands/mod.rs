//! CLI command implementations.

pub mod cart;
pub mod catalog;
pub mod config;

use clap::{Args, Subcommand};

/// Arguments for the catalog command.
#[derive(Args)]
pub struct CatalogArgs {
    #[command(subcommand)]
    pub command: CatalogCommand,
}

#[derive(Subcommand)]
pub enum CatalogCommand {
    /// List products, optionally filtered and sorted.
    List(ListArgs),
    /// List categories with product counts.
    Categories,
}

/// Filters and paging for `catalog list`.
#[derive(Args, Default)]
pub struct ListArgs {
    /// Only products in this category ("All" for every category).
    #[arg(long)]
    pub category: Option<String>,

    /// Only products carrying this tag.
    #[arg(short, long)]
    pub tag: Option<String>,

    /// Hide sold-out products.
    #[arg(long)]
    pub in_stock: bool,

    /// Minimum price in dollars.
    #[arg(long)]
    pub min_price: Option<f64>,

    /// Maximum price in dollars.
    #[arg(long)]
    pub max_price: Option<f64>,

    /// Minimum average rating.
    #[arg(long)]
    pub min_rating: Option<f32>,

    /// Free-text search over name, description and category.
    #[arg(short, long)]
    pub search: Option<String>,

    /// Sort order (featured, price-asc, price-desc, name-asc, name-desc, rating).
    #[arg(long, default_value = "featured")]
    pub sort: String,

    /// Page number, starting at 1.
    #[arg(short, long, default_value = "1")]
    pub page: usize,

    /// Products per page.
    #[arg(long, default_value = "24")]
    pub per_page: usize,
}

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: CartCommand,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// Apply a JSON file of cart actions to a saved session.
    Run {
        /// Path to a JSON array of actions.
        actions: String,

        /// Session to load and save (default: from config).
        #[arg(short, long)]
        session: Option<String>,

        /// Don't save the resulting cart.
        #[arg(long)]
        no_save: bool,
    },
    /// Show a saved cart.
    Show {
        /// Session to show (default: from config).
        #[arg(short, long)]
        session: Option<String>,
    },
    /// Delete a saved cart.
    Clear {
        /// Session to clear (default: from config).
        #[arg(short, long)]
        session: Option<String>,
    },
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// File to create (default: qeirex.toml). A `.json` name writes JSON.
        path: Option<String>,

        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
}
