//! Run statistics
//!
//! This module collects per-collection outcomes during a harvest run and
//! prints them as a summary at the end.

use chrono::{DateTime, Utc};
use std::path::PathBuf;

/// Outcome of one collection
#[derive(Debug, Clone, Default)]
pub struct CollectionReport {
    pub name: String,

    /// Listing pages successfully read
    pub pages_visited: usize,

    /// Item URLs gathered from the listing
    pub urls_found: usize,

    /// Total announced by the first listing page
    pub declared_total: Option<usize>,

    pub items_extracted: usize,
    pub items_failed: usize,
    pub images_saved: usize,
    pub images_failed: usize,

    /// Why pagination stopped early, if it did
    pub halted: Option<String>,

    /// Where the collection was written
    pub output: Option<PathBuf>,

    /// Why writing the collection failed, if it did
    pub write_error: Option<String>,
}

impl CollectionReport {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// `(expected, found)` when the announced total differs from the URLs found
    pub fn count_mismatch(&self) -> Option<(usize, usize)> {
        self.declared_total
            .filter(|expected| *expected != self.urls_found)
            .map(|expected| (expected, self.urls_found))
    }
}

/// Summary of a harvest run
#[derive(Debug, Clone)]
pub struct HarvestStats {
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,

    /// SHA-256 of the configuration file, when run from one
    pub config_hash: Option<String>,

    /// Collections listed on the index page
    pub collections_discovered: usize,

    /// One report per collection harvested, in harvest order
    pub collections: Vec<CollectionReport>,
}

impl HarvestStats {
    pub fn new() -> Self {
        Self {
            started_at: Utc::now(),
            finished_at: None,
            config_hash: None,
            collections_discovered: 0,
            collections: Vec::new(),
        }
    }

    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    pub fn duration_seconds(&self) -> Option<i64> {
        self.finished_at
            .map(|finished| (finished - self.started_at).num_seconds())
    }

    pub fn items_extracted(&self) -> usize {
        self.collections.iter().map(|c| c.items_extracted).sum()
    }

    pub fn items_failed(&self) -> usize {
        self.collections.iter().map(|c| c.items_failed).sum()
    }

    pub fn images_saved(&self) -> usize {
        self.collections.iter().map(|c| c.images_saved).sum()
    }

    pub fn images_failed(&self) -> usize {
        self.collections.iter().map(|c| c.images_failed).sum()
    }

    pub fn collections_written(&self) -> usize {
        self.collections.iter().filter(|c| c.output.is_some()).count()
    }

    /// Collections whose listing did not match the announced total
    pub fn count_mismatches(&self) -> Vec<&CollectionReport> {
        self.collections
            .iter()
            .filter(|c| c.count_mismatch().is_some())
            .collect()
    }

    /// Percentage of item pages that produced a record
    pub fn success_rate(&self) -> f64 {
        let attempted = self.items_extracted() + self.items_failed();
        if attempted == 0 {
            return 0.0;
        }
        (self.items_extracted() as f64 / attempted as f64) * 100.0
    }
}

impl Default for HarvestStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &HarvestStats) {
    println!("=== Harvest Statistics ===\n");

    println!("Overview:");
    println!("  Collections discovered: {}", stats.collections_discovered);
    println!("  Collections harvested: {}", stats.collections.len());
    println!("  Collections written: {}", stats.collections_written());
    println!("  Items extracted: {}", stats.items_extracted());
    println!("  Items failed: {}", stats.items_failed());
    println!("  Images saved: {}", stats.images_saved());
    println!("  Images failed: {}", stats.images_failed());
    if let Some(duration) = stats.duration_seconds() {
        println!("  Duration: {}s", duration);
    }
    println!();

    let mismatches = stats.count_mismatches();
    if !mismatches.is_empty() {
        println!("Count Mismatches ({}):", mismatches.len());
        for report in mismatches {
            if let Some((expected, found)) = report.count_mismatch() {
                println!("  - {}: expected {}, found {}", report.name, expected, found);
            }
        }
        println!();
    }

    let halted: Vec<_> = stats
        .collections
        .iter()
        .filter_map(|c| c.halted.as_ref().map(|h| (&c.name, h)))
        .collect();
    if !halted.is_empty() {
        println!("Incomplete Listings ({}):", halted.len());
        for (name, reason) in halted {
            println!("  - {}: {}", name, reason);
        }
        println!();
    }

    let write_errors: Vec<_> = stats
        .collections
        .iter()
        .filter_map(|c| c.write_error.as_ref().map(|e| (&c.name, e)))
        .collect();
    if !write_errors.is_empty() {
        println!("Write Failures ({}):", write_errors.len());
        for (name, error) in write_errors {
            println!("  - {}: {}", name, error);
        }
        println!();
    }

    println!(
        "Success Rate: {:.1}% ({} / {} item pages extracted)",
        stats.success_rate(),
        stats.items_extracted(),
        stats.items_extracted() + stats.items_failed()
    );
}
