//! Atelier Client CLI
//!
//! Local entry point for exercising the client core: run the category
//! aggregation, filter and page through the combined listing, or
//! validate the configuration files.

use std::path::PathBuf;
use std::sync::Arc;

use atelier_client::{
    error::Result,
    models::{Artwork, Config},
    services::{fetch_page, AggregationFetcher, BrowseController, HttpCategoryFetch, ScrollLoader},
    utils::http,
};
use clap::{Parser, Subcommand};

/// Atelier - Art Marketplace Client
#[derive(Parser, Debug)]
#[command(name = "atelier", version, about = "Atelier art marketplace client core")]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Aggregate all category endpoints and print the combined listing
    Browse {
        /// Substring search over the combined listing
        #[arg(long)]
        search: Option<String>,

        /// Category filter (defaults to everything)
        #[arg(long)]
        category: Option<String>,

        /// Items shown per page
        #[arg(long, default_value_t = 20)]
        page_size: usize,

        /// How many pages to reveal
        #[arg(long, default_value_t = 1)]
        pages: usize,
    },

    /// Page through the sold-artworks admin listing
    Sold {
        /// Server-side search term
        #[arg(long)]
        search: Option<String>,

        /// Items requested per page
        #[arg(long, default_value_t = 20)]
        page_size: usize,

        /// How many pages to fetch
        #[arg(long, default_value_t = 1)]
        pages: usize,
    },

    /// List the configured category descriptors
    Categories,

    /// Validate the configuration file
    Validate,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = Config::load_or_default(&cli.config);
    config.apply_env();

    match cli.command {
        Command::Browse {
            search,
            category,
            page_size,
            pages,
        } => {
            config.validate()?;
            let client = http::create_async_client(&config.client)?;
            let fetcher = AggregationFetcher::new(
                Arc::new(HttpCategoryFetch::new(
                    client,
                    config.api.clone(),
                    config.client.page_size,
                )),
                config.client.max_concurrent,
            );

            log::info!(
                "Aggregating {} categories from {}",
                config.categories.len(),
                config.api.base_url
            );
            let outcome = fetcher.fetch_all(&config.categories).await;
            if outcome.category_failures > 0 {
                log::warn!(
                    "{} of {} categories failed and were skipped",
                    outcome.category_failures,
                    outcome.category_total
                );
            }

            let mut browse = BrowseController::new(outcome.items, page_size);
            if let Some(query) = search {
                browse.set_search_query(query);
            }
            if let Some(category) = category {
                browse.set_category(category);
            }
            for _ in 1..pages {
                if !browse.load_more() {
                    break;
                }
            }

            let filtered = browse.filtered().len();
            for item in browse.visible() {
                let city = item
                    .locations
                    .first()
                    .and_then(|l| l.city.clone())
                    .unwrap_or_default();
                println!("{:<40} {:<24} {}", item.name, item.category, city);
            }
            println!(
                "-- page {}/{} ({} of {} items shown){}",
                browse.current_page(),
                browse.total_pages(),
                browse.visible().len(),
                filtered,
                if browse.has_more() { ", more available" } else { "" }
            );
        }

        Command::Sold {
            search,
            page_size,
            pages,
        } => {
            config.validate()?;
            let client = http::create_async_client(&config.client)?;

            let first: atelier_client::models::ListPayload<Artwork> = fetch_page(
                &client,
                &config.api,
                "/api/artworks/sold",
                1,
                page_size,
                search.as_deref(),
            )
            .await?;
            let total_pages = first.total_pages().unwrap_or(1);
            let mut artworks = first.items;

            let loader = ScrollLoader::new();
            while loader.page() < pages.min(total_pages) {
                let loaded = loader
                    .on_sentinel_visible(loader.page() < total_pages, |page| {
                        fetch_page::<Artwork>(
                            &client,
                            &config.api,
                            "/api/artworks/sold",
                            page,
                            page_size,
                            search.as_deref(),
                        )
                    })
                    .await;
                match loaded {
                    Some(Ok(payload)) => artworks.extend(payload.items),
                    Some(Err(error)) => return Err(error),
                    None => break,
                }
            }

            for artwork in &artworks {
                let price = artwork
                    .sold_price
                    .map(|value| format!("{value:.2}"))
                    .unwrap_or_default();
                println!(
                    "{:<40} {:<24} {:?} {}",
                    artwork.title, artwork.artist, artwork.status, price
                );
            }
            println!(
                "-- {} artworks over {} of {} pages",
                artworks.len(),
                loader.page(),
                total_pages
            );
        }

        Command::Categories => {
            for descriptor in &config.categories {
                println!(
                    "{:<28} {:<12} {}",
                    descriptor.name,
                    descriptor.slug,
                    descriptor.endpoint
                );
            }
        }

        Command::Validate => {
            config.validate()?;
            log::info!("Configuration OK: {}", cli.config.display());
            println!("Configuration is valid.");
        }
    }

    Ok(())
}
