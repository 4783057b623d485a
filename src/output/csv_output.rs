//! Per-collection CSV files
//!
//! One file per collection, named after the collection. The header is the
//! union of the row columns in first-seen order; a row lacking a column gets
//! an empty cell.

use crate::assets::{sanitize_for_filename, MAX_COMPONENT_LEN};
use crate::model::{Collection, ItemRecord};
use crate::output::traits::{
    CollectionSink, HarvestedItem, OutputError, OutputResult, IMAGE_FILENAME_COLUMN,
};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Writes collections as CSV files into one directory
#[derive(Debug, Clone)]
pub struct CsvOutput {
    dir: PathBuf,
}

impl CsvOutput {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path the given collection is written to
    pub fn path_for(&self, collection_name: &str) -> PathBuf {
        let stem = sanitize_for_filename(collection_name, MAX_COMPONENT_LEN);
        let stem = if stem.is_empty() {
            "collection".to_string()
        } else {
            stem
        };
        self.dir.join(format!("{}.csv", stem))
    }
}

impl CollectionSink for CsvOutput {
    fn write_collection(
        &self,
        collection: &Collection,
        items: &[HarvestedItem],
    ) -> OutputResult<Option<PathBuf>> {
        if items.is_empty() {
            return Ok(None);
        }

        std::fs::create_dir_all(&self.dir)?;
        let path = self.path_for(&collection.name);

        let rows: Vec<HashMap<&'static str, String>> = items
            .iter()
            .map(|item| item.columns().into_iter().collect())
            .collect();
        let headers = union_headers(items);

        let mut writer = csv::Writer::from_path(&path)?;
        writer.write_record(&headers)?;
        for row in &rows {
            writer.write_record(
                headers
                    .iter()
                    .map(|h| row.get(h).map(String::as_str).unwrap_or("")),
            )?;
        }
        writer.flush()?;

        tracing::info!(
            collection = %collection.name,
            rows = rows.len(),
            path = %path.display(),
            "Saved CSV"
        );
        Ok(Some(path))
    }
}

/// Column names across all rows, in first-seen order
pub fn union_headers(items: &[HarvestedItem]) -> Vec<&'static str> {
    let mut headers: Vec<&'static str> = Vec::new();
    for item in items {
        for (name, _) in item.columns() {
            if !headers.contains(&name) {
                headers.push(name);
            }
        }
    }
    headers
}

/// Reads a collection file back into items
pub fn read_collection_csv(path: &Path) -> OutputResult<Vec<HarvestedItem>> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    let has_images = headers.iter().any(|h| h == IMAGE_FILENAME_COLUMN);

    let mut items = Vec::new();
    for (index, result) in reader.records().enumerate() {
        let record = result?;
        let row: HashMap<String, String> = headers
            .iter()
            .cloned()
            .zip(record.iter().map(str::to_string))
            .collect();

        let item = ItemRecord::from_columns(&row).map_err(|source| OutputError::Row {
            row: index + 1,
            source,
        })?;

        items.push(HarvestedItem {
            record: item,
            image_filename: has_images
                .then(|| row.get(IMAGE_FILENAME_COLUMN).cloned().unwrap_or_default()),
        });
    }

    Ok(items)
}
