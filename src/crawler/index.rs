//! Collection discovery from the site index page

use crate::crawler::fetcher::fetch_page;
use crate::crawler::selectors::{clean_text, SiteSelectors};
use crate::model::Collection;
use crate::url::resolve_link;
use crate::FetchError;
use reqwest::Client;
use scraper::Html;
use url::Url;

/// Fetches the index page and lists its collections in navigation order
///
/// An index page without category navigation yields an empty list.
pub async fn discover_collections(
    client: &Client,
    index_url: &Url,
) -> Result<Vec<Collection>, FetchError> {
    discover_collections_with(client, index_url, &SiteSelectors::default()).await
}

/// Same as [`discover_collections`], reading the index with `selectors`
pub async fn discover_collections_with(
    client: &Client,
    index_url: &Url,
    selectors: &SiteSelectors,
) -> Result<Vec<Collection>, FetchError> {
    let page = fetch_page(client, index_url).await?;
    let collections = parse_index(&page.body, &page.url, selectors);

    tracing::info!(url = %index_url, count = collections.len(), "Discovered collections");
    Ok(collections)
}

/// Extracts `(name, url)` pairs from the side-category navigation
pub fn parse_index(html: &str, page_url: &Url, selectors: &SiteSelectors) -> Vec<Collection> {
    let document = Html::parse_document(html);

    document
        .select(&selectors.category_links)
        .filter_map(|a| {
            let name = clean_text(a.text());
            let url = resolve_link(a.value().attr("href")?, page_url)?;
            if name.is_empty() {
                return None;
            }
            Some(Collection { name, url })
        })
        .collect()
}
