//! Item page extraction
//!
//! Turns one item-detail page into an `ItemRecord`. The title and the
//! product information table are required; every other field degrades to
//! an empty value when the page omits it.

use crate::crawler::fetcher::fetch_page;
use crate::crawler::selectors::{
    clean_text, SiteSelectors, LABEL_AVAILABILITY, LABEL_PRICE_EXCL_TAX, LABEL_PRICE_INCL_TAX,
    LABEL_UPC,
};
use crate::model::{ItemFields, ItemRecord, Lookup, Rating};
use crate::url::{parse_page_url, resolve_link};
use crate::{ExtractError, ParseError};
use reqwest::Client;
use scraper::{ElementRef, Html};
use std::collections::HashMap;
use url::Url;

/// Fetches and parses item-detail pages
#[derive(Debug, Clone)]
pub struct ItemExtractor {
    client: Client,
    selectors: SiteSelectors,
}

impl ItemExtractor {
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self::with_selectors(client, SiteSelectors::default())
    }

    #[must_use]
    pub fn with_selectors(client: Client, selectors: SiteSelectors) -> Self {
        Self { client, selectors }
    }

    /// Fetches `url` and extracts its record
    ///
    /// # Errors
    ///
    /// * `ExtractError::Fetch` - non-2xx status or network failure
    /// * `ExtractError::Parse` - title or product table missing
    pub async fn extract_item(&self, url: &str) -> Result<ItemRecord, ExtractError> {
        let page_url = parse_page_url(url)?;
        let page = fetch_page(&self.client, &page_url).await?;
        let record = self.parse_item(&page.body, &page.url, url)?;

        tracing::debug!(url, title = record.title(), "Extracted item");
        Ok(record)
    }

    /// Parses an already retrieved item page
    ///
    /// # Arguments
    ///
    /// * `html` - The page body
    /// * `page_url` - Address the page was served from, used to resolve the image
    /// * `source_url` - Address recorded in the item record
    pub fn parse_item(
        &self,
        html: &str,
        page_url: &Url,
        source_url: &str,
    ) -> Result<ItemRecord, ParseError> {
        let document = Html::parse_document(html);
        let sel = &self.selectors;

        let table = self.spec_table(&document, source_url).or_default()?;
        let title = Lookup::required(
            document
                .select(&sel.title)
                .next()
                .map(|e| clean_text(e.text()))
                .filter(|t| !t.is_empty()),
            source_url,
            "title",
        )
        .or_default()?;

        let field = |label: &str| table.get(label).cloned().unwrap_or_default();
        let availability = field(LABEL_AVAILABILITY);

        ItemRecord::new(ItemFields {
            source_url: source_url.to_string(),
            upc: field(LABEL_UPC),
            title,
            price_including_tax: field(LABEL_PRICE_INCL_TAX),
            price_excluding_tax: field(LABEL_PRICE_EXCL_TAX),
            quantity_available: parse_quantity(&availability),
            description: self.description(&document).or_default()?,
            category: self.category(&document).or_default()?,
            rating: self.rating(&document).into_result()?,
            image_url: self.image_url(&document, page_url).or_default()?,
        })
    }

    /// Label → value mapping of the product information table
    fn spec_table(&self, document: &Html, url: &str) -> Lookup<HashMap<String, String>> {
        let sel = &self.selectors;
        let table = document.select(&sel.spec_table).next().map(|table| {
            table
                .select(&sel.table_row)
                .filter_map(|row| {
                    let label = row.select(&sel.table_header).next()?;
                    let value = row.select(&sel.table_cell).next()?;
                    Some((clean_text(label.text()), clean_text(value.text())))
                })
                .collect()
        });
        Lookup::required(table, url, "product information table")
    }

    /// Text of the first paragraph following the description marker
    fn description(&self, document: &Html) -> Lookup<String> {
        let text = document
            .select(&self.selectors.description_marker)
            .next()
            .and_then(|marker| {
                marker
                    .next_siblings()
                    .filter_map(ElementRef::wrap)
                    .find(|e| e.value().name() == "p")
            })
            .map(|p| clean_text(p.text()));
        Lookup::optional(text)
    }

    /// Last breadcrumb link before the item itself
    fn category(&self, document: &Html) -> Lookup<String> {
        let category = document
            .select(&self.selectors.breadcrumb_links)
            .last()
            .map(|a| clean_text(a.text()))
            .filter(|c| !c.is_empty());
        Lookup::optional(category)
    }

    /// Level encoded as the non-base class token of the rating element
    fn rating(&self, document: &Html) -> Lookup<Rating> {
        let base = self.selectors.rating_base_class;
        let rating = document
            .select(&self.selectors.rating)
            .next()
            .and_then(|e| e.value().classes().find(|c| *c != base))
            .and_then(Rating::from_class_token);
        Lookup::optional(rating)
    }

    /// Gallery image, falling back to the first image on the page
    fn image_url(&self, document: &Html, page_url: &Url) -> Lookup<String> {
        let sel = &self.selectors;
        let src = document
            .select(&sel.image)
            .next()
            .or_else(|| document.select(&sel.any_image).next())
            .and_then(|img| img.value().attr("src"));

        Lookup::optional(
            src.and_then(|s| resolve_link(s, page_url))
                .map(|u| u.to_string()),
        )
    }
}

/// Reads the first run of digits out of an availability text
///
/// Text without digits gives 0. A number too large for `u32` saturates.
///
/// # Examples
///
/// ```
/// use catalog_harvest::crawler::parse_quantity;
///
/// assert_eq!(parse_quantity("In stock (7 available)"), 7);
/// assert_eq!(parse_quantity("Out of stock"), 0);
/// ```
pub fn parse_quantity(text: &str) -> u32 {
    let digits: String = text
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();
    if digits.is_empty() {
        return 0;
    }
    // Only overflow can fail on a pure digit run
    digits.parse().unwrap_or(u32::MAX)
}
