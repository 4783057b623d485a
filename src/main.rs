//! Catalog-Harvest main entry point
//!
//! This is the command-line interface for the catalogue harvester.

use anyhow::Context;
use catalog_harvest::config::{load_config_with_hash, Config};
use catalog_harvest::crawler::Harvester;
use catalog_harvest::output::print_statistics;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Catalog-Harvest: a paginated catalog scraper
///
/// Discovers every category on the site index, follows each category's
/// pagination, extracts one record per item page and writes one CSV file
/// per category, optionally downloading item images.
#[derive(Parser, Debug)]
#[command(name = "catalog-harvest")]
#[command(version)]
#[command(about = "A paginated catalog scraper", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Only harvest the named category (repeatable, case-insensitive)
    #[arg(long = "category", value_name = "NAME")]
    categories: Vec<String>,

    /// Do not download item images
    #[arg(long)]
    no_images: bool,

    /// Show the configuration and discovered categories without harvesting
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("Failed to load configuration {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    let mut harvester = Harvester::new(config.clone())
        .context("Failed to build harvester")?
        .with_category_filter(cli.categories.clone())
        .with_config_hash(config_hash);
    if cli.no_images {
        harvester = harvester.without_images();
    }

    if cli.dry_run {
        handle_dry_run(&config, &harvester, cli.no_images).await
    } else {
        handle_harvest(&harvester).await
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("catalog_harvest=info,warn"),
            1 => EnvFilter::new("catalog_harvest=debug,info"),
            2 => EnvFilter::new("catalog_harvest=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: shows configuration and what would be harvested
async fn handle_dry_run(
    config: &Config,
    harvester: &Harvester,
    no_images: bool,
) -> anyhow::Result<()> {
    println!("=== Catalog-Harvest Dry Run ===\n");

    println!("Site:");
    println!("  Base URL: {}", config.site.base_url);
    println!("  Index: {}", config.index_url()?);

    println!("\nHTTP:");
    println!("  User agent: {}", config.http.user_agent);
    println!(
        "  Timeout: {}s (connect {}s)",
        config.http.timeout_secs, config.http.connect_timeout_secs
    );

    println!("\nOutput:");
    println!("  CSV directory: {}", config.output.csv_dir.display());
    println!("  Images directory: {}", config.output.images_dir.display());
    if let Some(summary) = &config.output.summary_path {
        println!("  Summary: {}", summary.display());
    }
    let images = config.images.enabled && !no_images;
    println!("  Images: {}", if images { "enabled" } else { "disabled" });

    let collections = harvester
        .discover()
        .await
        .context("Failed to read the index page")?;

    println!("\nCollections ({}):", collections.len());
    for collection in &collections {
        println!("  - {} ({})", collection.name, collection.url);
    }

    println!("\n✓ Configuration is valid");
    Ok(())
}

/// Handles the main harvest operation
async fn handle_harvest(harvester: &Harvester) -> anyhow::Result<()> {
    match harvester.run().await {
        Ok(stats) => {
            tracing::info!("Harvest completed successfully");
            println!();
            print_statistics(&stats);
            Ok(())
        }
        Err(e) => {
            tracing::error!("Harvest failed: {}", e);
            Err(e.into())
        }
    }
}
