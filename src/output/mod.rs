//! Output module for persisting harvest results
//!
//! This module handles:
//! - Writing one CSV file per collection
//! - Reading collection files back
//! - Recording run statistics and the markdown run report

mod csv_output;
mod markdown;
pub mod stats;
mod traits;

pub use csv_output::{read_collection_csv, union_headers, CsvOutput};
pub use markdown::{format_markdown_summary, generate_markdown_summary};
pub use stats::{print_statistics, CollectionReport, HarvestStats};
pub use traits::{
    CollectionSink, HarvestedItem, OutputError, OutputResult, IMAGE_FILENAME_COLUMN,
};
