//! Data model for harvested catalogue entries
//!
//! # Components
//!
//! - `ItemRecord`: the fixed-schema record produced once per item page
//! - `Rating`: the discrete star level of an item
//! - `Lookup`: outcome of locating one field on a page
//! - `Collection`: a named category and its first listing page

mod item;
mod lookup;
mod rating;

pub use item::{ItemFields, ItemRecord, COLUMNS};
pub use lookup::Lookup;
pub use rating::Rating;

use url::Url;

/// A named grouping of items reachable through a paginated listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collection {
    pub name: String,
    pub url: Url,
}

/// Records of one collection, in crawl order
pub type CollectionResult = Vec<ItemRecord>;
