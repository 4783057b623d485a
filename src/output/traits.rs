//! Output sink trait and associated types
//!
//! This module defines the interface through which finished collections
//! leave the crawler, and the row type that carries an item record together
//! with its downloaded image filename.

use crate::model::{Collection, ItemRecord};
use crate::ParseError;
use std::path::PathBuf;
use thiserror::Error;

/// Name of the column added when images were downloaded
pub const IMAGE_FILENAME_COLUMN: &str = "image_filename";

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write output: {0}")]
    Write(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Malformed row {row}: {source}")]
    Row { row: usize, source: ParseError },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// An item record ready for persistence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarvestedItem {
    pub record: ItemRecord,

    /// Saved image filename; `None` when images were not fetched at all,
    /// `Some("")` when fetching failed
    pub image_filename: Option<String>,
}

impl HarvestedItem {
    pub fn new(record: ItemRecord) -> Self {
        Self {
            record,
            image_filename: None,
        }
    }

    pub fn with_image(record: ItemRecord, image_filename: String) -> Self {
        Self {
            record,
            image_filename: Some(image_filename),
        }
    }

    /// Column/value pairs of this row
    pub fn columns(&self) -> Vec<(&'static str, String)> {
        let mut columns = self.record.columns();
        if let Some(filename) = &self.image_filename {
            columns.push((IMAGE_FILENAME_COLUMN, filename.clone()));
        }
        columns
    }
}

/// Destination for finished collections
///
/// Write failures are returned to the caller, which logs them and moves on
/// to the next collection.
pub trait CollectionSink {
    /// Persists one collection's items in the given order
    ///
    /// # Returns
    ///
    /// * `Ok(Some(path))` - where the collection was written
    /// * `Ok(None)` - nothing was written (no items)
    fn write_collection(
        &self,
        collection: &Collection,
        items: &[HarvestedItem],
    ) -> OutputResult<Option<PathBuf>>;
}
