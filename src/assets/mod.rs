//! Item image download
//!
//! Images are saved once per item under a filename derived from its title
//! and product code, re-encoded as JPEG. Failures never fail the item: the
//! caller receives an empty filename instead.

mod filename;

pub use filename::{image_filename, sanitize_for_filename, MAX_COMPONENT_LEN};

use crate::crawler::fetch_bytes;
use crate::model::ItemRecord;
use crate::url::parse_page_url;
use crate::FetchError;
use image::codecs::jpeg::JpegEncoder;
use reqwest::Client;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while saving an image
#[derive(Debug, Error)]
pub enum AssetError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// How an image ended up on disk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SavedImage {
    /// File was already present; nothing downloaded
    Existing,
    /// Decoded and re-encoded as JPEG
    Converted,
    /// Could not be decoded; original bytes written as-is
    Raw,
}

/// Downloads item images into one directory
#[derive(Debug, Clone)]
pub struct ImageFetcher {
    client: Client,
    images_dir: PathBuf,
    jpeg_quality: u8,
}

impl ImageFetcher {
    pub fn new(client: Client, images_dir: impl Into<PathBuf>, jpeg_quality: u8) -> Self {
        Self {
            client,
            images_dir: images_dir.into(),
            jpeg_quality,
        }
    }

    /// Saves the image of `record`, returning its filename
    ///
    /// Returns an empty string when the record has no image URL or the
    /// download fails.
    pub async fn fetch(&self, record: &ItemRecord) -> String {
        if record.image_url().is_empty() {
            return String::new();
        }

        let filename = image_filename(record.title(), record.upc());
        let path = self.images_dir.join(&filename);

        match self.save(record.image_url(), &path).await {
            Ok(saved) => {
                tracing::debug!(file = %filename, ?saved, "Image saved");
                filename
            }
            Err(e) => {
                tracing::warn!(url = record.image_url(), error = %e, "Failed to save image");
                if tokio::fs::try_exists(&path).await.unwrap_or(false) {
                    let _ = tokio::fs::remove_file(&path).await;
                }
                String::new()
            }
        }
    }

    async fn save(&self, image_url: &str, path: &Path) -> Result<SavedImage, AssetError> {
        if tokio::fs::try_exists(path).await? {
            return Ok(SavedImage::Existing);
        }

        let url = parse_page_url(image_url)?;
        let bytes = fetch_bytes(&self.client, &url).await?;

        let (contents, saved) = match encode_jpeg(&bytes, self.jpeg_quality) {
            Ok(jpeg) => (jpeg, SavedImage::Converted),
            Err(e) => {
                tracing::warn!(
                    url = image_url,
                    error = %e,
                    "Image conversion failed, saving raw bytes"
                );
                (bytes, SavedImage::Raw)
            }
        };

        tokio::fs::create_dir_all(&self.images_dir).await?;
        tokio::fs::write(path, contents).await?;
        Ok(saved)
    }
}

/// Decodes any supported format and re-encodes it as RGB JPEG
pub fn encode_jpeg(bytes: &[u8], quality: u8) -> Result<Vec<u8>, image::ImageError> {
    let rgb = image::load_from_memory(bytes)?.to_rgb8();
    let mut out = Vec::new();
    JpegEncoder::new_with_quality(&mut out, quality).encode_image(&rgb)?;
    Ok(out)
}
