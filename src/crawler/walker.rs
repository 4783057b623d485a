//! Collection walker
//!
//! Follows the "next" links of one category listing and gathers every
//! item-detail URL in page order, then document order within a page.
//! Listing failures never propagate: the walk stops and reports what it
//! already collected together with the reason it stopped.

use crate::crawler::fetcher::fetch_page;
use crate::crawler::selectors::{clean_text, SiteSelectors};
use crate::url::resolve_link;
use crate::FetchError;
use reqwest::Client;
use scraper::Html;
use std::collections::HashSet;
use std::fmt;
use url::Url;

/// Items and pagination link found on one listing page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingPage {
    /// Absolute item URLs in document order
    pub item_urls: Vec<Url>,

    /// Absolute URL of the next listing page, if any
    pub next_page: Option<Url>,

    /// Total number of results announced by the page
    pub declared_total: Option<usize>,
}

/// Why a walk stopped before the last listing page
#[derive(Debug)]
pub enum WalkHalt {
    /// A listing page could not be retrieved
    Fetch(FetchError),

    /// The "next" link pointed at an already visited page
    PaginationLoop(Url),
}

impl fmt::Display for WalkHalt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fetch(e) => write!(f, "{}", e),
            Self::PaginationLoop(url) => write!(f, "pagination loops back to {}", url),
        }
    }
}

/// Result of walking one collection
#[derive(Debug)]
pub struct CollectionWalk {
    /// Item URLs in crawl order
    pub item_urls: Vec<Url>,

    /// Number of listing pages successfully read
    pub pages_visited: usize,

    /// Total announced on the first listing page
    pub declared_total: Option<usize>,

    /// Set when pagination stopped early
    pub halted: Option<WalkHalt>,
}

impl CollectionWalk {
    /// `(expected, found)` when the announced total differs from what was collected
    pub fn count_mismatch(&self) -> Option<(usize, usize)> {
        match self.declared_total {
            Some(expected) if expected != self.item_urls.len() => {
                Some((expected, self.item_urls.len()))
            }
            _ => None,
        }
    }

    /// True when the walk reached the last page and the count matches
    pub fn is_complete(&self) -> bool {
        self.halted.is_none() && self.count_mismatch().is_none()
    }
}

/// Walks paginated category listings
#[derive(Debug, Clone)]
pub struct CollectionWalker {
    client: Client,
    selectors: SiteSelectors,
}

impl CollectionWalker {
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self::with_selectors(client, SiteSelectors::default())
    }

    #[must_use]
    pub fn with_selectors(client: Client, selectors: SiteSelectors) -> Self {
        Self { client, selectors }
    }

    /// Collects every item URL reachable from `collection_url`
    ///
    /// # State Machine
    ///
    /// The only state is the current listing page URL, starting at
    /// `collection_url`. Each page contributes its item links, then the
    /// current URL becomes the page's "next" link, or the walk ends when
    /// there is none. A failed page also ends the walk, keeping the items
    /// gathered so far.
    pub async fn walk(&self, collection_url: &Url) -> CollectionWalk {
        let mut walk = CollectionWalk {
            item_urls: Vec::new(),
            pages_visited: 0,
            declared_total: None,
            halted: None,
        };
        let mut visited = HashSet::new();
        let mut current = Some(collection_url.clone());

        while let Some(page_url) = current.take() {
            if !visited.insert(page_url.clone()) {
                walk.halted = Some(WalkHalt::PaginationLoop(page_url));
                break;
            }

            let page = match fetch_page(&self.client, &page_url).await {
                Ok(page) => page,
                Err(e) => {
                    tracing::warn!(
                        url = %page_url,
                        error = %e,
                        "Listing page failed, stopping pagination"
                    );
                    walk.halted = Some(WalkHalt::Fetch(e));
                    break;
                }
            };

            let listing = parse_listing(&page.body, &page.url, &self.selectors);

            if walk.pages_visited > 0 && listing.item_urls.is_empty() {
                tracing::warn!(url = %page_url, "Listing page has no items");
            }

            if walk.pages_visited == 0 {
                walk.declared_total = listing.declared_total;
            }

            tracing::debug!(
                url = %page_url,
                items = listing.item_urls.len(),
                has_next = listing.next_page.is_some(),
                "Read listing page"
            );

            walk.pages_visited += 1;
            walk.item_urls.extend(listing.item_urls);
            current = listing.next_page;
        }

        walk
    }
}

/// Walks one collection with the default site selectors
pub async fn walk_collection(client: &Client, collection_url: &Url) -> CollectionWalk {
    CollectionWalker::new(client.clone()).walk(collection_url).await
}

/// Parses one listing page
///
/// Links resolve against `page_url`, the address of this listing page.
/// Item links on later pages use different `../` depths than on the first
/// page, so resolving against the site root would produce wrong paths.
pub fn parse_listing(html: &str, page_url: &Url, selectors: &SiteSelectors) -> ListingPage {
    let document = Html::parse_document(html);

    let item_urls = document
        .select(&selectors.listing_item_links)
        .filter_map(|a| a.value().attr("href"))
        .filter_map(|href| resolve_link(href, page_url))
        .collect();

    let next_page = document
        .select(&selectors.listing_next)
        .next()
        .and_then(|a| a.value().attr("href"))
        .and_then(|href| resolve_link(href, page_url));

    let declared_total = document
        .select(&selectors.listing_total)
        .next()
        .and_then(|strong| clean_text(strong.text()).parse().ok());

    ListingPage {
        item_urls,
        next_page,
        declared_total,
    }
}
