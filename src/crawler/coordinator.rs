//! Harvest coordinator - top-level orchestration
//!
//! This module contains the main harvest loop:
//! - Discovering collections from the index page
//! - Walking each collection's listing pages
//! - Extracting every item, downloading its image
//! - Handing each finished collection to the output sink
//!
//! One bad item never aborts its collection, and one bad collection never
//! aborts the run.

use crate::assets::ImageFetcher;
use crate::config::Config;
use crate::crawler::extractor::ItemExtractor;
use crate::crawler::fetcher::build_http_client;
use crate::crawler::index::discover_collections_with;
use crate::crawler::selectors::SiteSelectors;
use crate::crawler::walker::CollectionWalker;
use crate::model::Collection;
use crate::output::{
    generate_markdown_summary, CollectionReport, CollectionSink, CsvOutput, HarvestStats,
    HarvestedItem,
};
use crate::HarvestError;
use reqwest::Client;

/// Main harvester structure
pub struct Harvester {
    config: Config,
    client: Client,
    selectors: SiteSelectors,
    walker: CollectionWalker,
    extractor: ItemExtractor,
    images: Option<ImageFetcher>,
    sink: Box<dyn CollectionSink>,
    category_filter: Vec<String>,
    config_hash: Option<String>,
}

impl Harvester {
    /// Creates a harvester writing CSV files to the configured directory
    ///
    /// # Returns
    ///
    /// * `Ok(Harvester)` - Successfully created harvester
    /// * `Err(HarvestError)` - HTTP client could not be built
    pub fn new(config: Config) -> Result<Self, HarvestError> {
        let client = build_http_client(&config.http)?;

        let images = config.images.enabled.then(|| {
            ImageFetcher::new(
                client.clone(),
                config.output.images_dir.clone(),
                config.images.jpeg_quality,
            )
        });
        let sink = Box::new(CsvOutput::new(config.output.csv_dir.clone()));
        let selectors = SiteSelectors::default();

        Ok(Self {
            walker: CollectionWalker::with_selectors(client.clone(), selectors.clone()),
            extractor: ItemExtractor::with_selectors(client.clone(), selectors.clone()),
            selectors,
            client,
            images,
            sink,
            category_filter: Vec::new(),
            config_hash: None,
            config,
        })
    }

    /// Reads every page type with `selectors` instead of the default site markup
    pub fn with_selectors(mut self, selectors: SiteSelectors) -> Self {
        self.walker = CollectionWalker::with_selectors(self.client.clone(), selectors.clone());
        self.extractor = ItemExtractor::with_selectors(self.client.clone(), selectors.clone());
        self.selectors = selectors;
        self
    }

    /// Replaces the output sink
    pub fn with_sink(mut self, sink: Box<dyn CollectionSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Restricts the run to collections with these names (case-insensitive)
    pub fn with_category_filter(mut self, names: Vec<String>) -> Self {
        self.category_filter = names;
        self
    }

    /// Records the configuration hash in the run statistics
    pub fn with_config_hash(mut self, hash: impl Into<String>) -> Self {
        self.config_hash = Some(hash.into());
        self
    }

    /// Skips image downloads regardless of configuration
    pub fn without_images(mut self) -> Self {
        self.images = None;
        self
    }

    /// Lists the collections this run would harvest
    pub async fn discover(&self) -> Result<Vec<Collection>, HarvestError> {
        let index_url = self.config.index_url()?;
        let collections =
            discover_collections_with(&self.client, &index_url, &self.selectors).await?;

        if self.category_filter.is_empty() {
            return Ok(collections);
        }

        let selected: Vec<Collection> = collections
            .into_iter()
            .filter(|c| {
                self.category_filter
                    .iter()
                    .any(|name| matches_category(name, &c.name))
            })
            .collect();

        if selected.is_empty() {
            tracing::warn!(
                filter = ?self.category_filter,
                "No collection matches the category filter"
            );
        }
        Ok(selected)
    }

    /// Runs the full harvest
    ///
    /// Fails only when the index page itself cannot be fetched. An index
    /// without collections is an empty, successful run.
    pub async fn run(&self) -> Result<HarvestStats, HarvestError> {
        let mut stats = HarvestStats::new();
        stats.config_hash = self.config_hash.clone();

        let collections = self.discover().await?;
        stats.collections_discovered = collections.len();
        tracing::info!("Harvesting {} collections", collections.len());

        for (index, collection) in collections.iter().enumerate() {
            tracing::info!(
                "[{}/{}] Harvesting collection '{}' -> {}",
                index + 1,
                collections.len(),
                collection.name,
                collection.url
            );

            let (items, mut report) = self.harvest_collection(collection).await;

            if items.is_empty() {
                tracing::warn!(
                    collection = %collection.name,
                    "No items collected, skipping output"
                );
            } else {
                match self.sink.write_collection(collection, &items) {
                    Ok(path) => report.output = path,
                    Err(e) => {
                        tracing::error!(
                            collection = %collection.name,
                            error = %e,
                            "Failed to write collection"
                        );
                        report.write_error = Some(e.to_string());
                    }
                }
            }

            stats.collections.push(report);
        }

        stats.finish();

        if let Some(summary_path) = &self.config.output.summary_path {
            match generate_markdown_summary(&stats, summary_path) {
                Ok(()) => tracing::info!("Run summary written to {}", summary_path.display()),
                Err(e) => tracing::error!("Failed to write run summary: {}", e),
            }
        }

        tracing::info!(
            "Harvest completed: {} items from {} collections",
            stats.items_extracted(),
            stats.collections.len()
        );

        Ok(stats)
    }

    /// Walks one collection and extracts its items in crawl order
    pub async fn harvest_collection(
        &self,
        collection: &Collection,
    ) -> (Vec<HarvestedItem>, CollectionReport) {
        let mut report = CollectionReport::new(&collection.name);

        let walk = self.walker.walk(&collection.url).await;
        report.pages_visited = walk.pages_visited;
        report.urls_found = walk.item_urls.len();
        report.declared_total = walk.declared_total;
        report.halted = walk.halted.as_ref().map(|h| h.to_string());

        if let Some((expected, found)) = walk.count_mismatch() {
            tracing::warn!(
                collection = %collection.name,
                expected,
                found,
                "Listing count mismatch"
            );
        }
        tracing::info!(
            "Found {} items in '{}' across {} pages",
            walk.item_urls.len(),
            collection.name,
            walk.pages_visited
        );

        let mut items = Vec::with_capacity(walk.item_urls.len());
        for url in &walk.item_urls {
            let record = match self.extractor.extract_item(url.as_str()).await {
                Ok(record) => record,
                Err(e) => {
                    tracing::warn!(url = %url, error = %e, "Skipping item");
                    report.items_failed += 1;
                    continue;
                }
            };
            report.items_extracted += 1;

            let item = match &self.images {
                Some(images) => {
                    let filename = images.fetch(&record).await;
                    if filename.is_empty() {
                        report.images_failed += 1;
                    } else {
                        report.images_saved += 1;
                    }
                    HarvestedItem::with_image(record, filename)
                }
                None => HarvestedItem::new(record),
            };
            items.push(item);
        }

        (items, report)
    }
}

/// Case-insensitive collection name match, Unicode-aware
fn matches_category(filter: &str, name: &str) -> bool {
    filter.trim().to_lowercase() == name.trim().to_lowercase()
}
