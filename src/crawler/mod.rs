//! Crawler module for catalogue page fetching and processing
//!
//! This module contains the core harvesting logic, including:
//! - HTTP fetching
//! - Collection discovery from the index page
//! - Pagination-aware walking of collection listings
//! - Field extraction from item pages
//! - Overall harvest coordination

mod coordinator;
mod extractor;
mod fetcher;
mod index;
mod selectors;
mod walker;

pub use coordinator::Harvester;
pub use extractor::{parse_quantity, ItemExtractor};
pub use fetcher::{build_http_client, fetch_bytes, fetch_page, FetchedPage};
pub use index::{discover_collections, discover_collections_with, parse_index};
pub use selectors::SiteSelectors;
pub use walker::{
    parse_listing, walk_collection, CollectionWalk, CollectionWalker, ListingPage, WalkHalt,
};
