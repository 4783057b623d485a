//! CSS selectors for the catalogue site's markup
//!
//! Everything that depends on how this particular site lays out its pages
//! lives here, including the class-token convention used for ratings.

use scraper::Selector;

macro_rules! parse_selector {
    ($s:expr) => {
        Selector::parse($s).expect(concat!("Invalid CSS selector: ", $s))
    };
}

/// Labels of the product information table
pub const LABEL_UPC: &str = "UPC";
pub const LABEL_PRICE_EXCL_TAX: &str = "Price (excl. tax)";
pub const LABEL_PRICE_INCL_TAX: &str = "Price (incl. tax)";
pub const LABEL_AVAILABILITY: &str = "Availability";

/// Selectors for every page type the harvester reads
#[derive(Debug, Clone)]
pub struct SiteSelectors {
    // Index page
    pub category_links: Selector,

    // Listing pages
    pub listing_item_links: Selector,
    pub listing_next: Selector,
    pub listing_total: Selector,

    // Item pages
    pub title: Selector,
    pub spec_table: Selector,
    pub table_row: Selector,
    pub table_header: Selector,
    pub table_cell: Selector,
    pub description_marker: Selector,
    pub breadcrumb_links: Selector,
    pub rating: Selector,
    pub image: Selector,
    pub any_image: Selector,

    /// Class shared by every rating element; the other class is the level
    pub rating_base_class: &'static str,
}

impl SiteSelectors {
    /// Selectors for books.toscrape.com
    #[must_use]
    pub fn books_toscrape() -> Self {
        Self {
            category_links: parse_selector!("div.side_categories ul li ul li a"),

            listing_item_links: parse_selector!("article.product_pod h3 a"),
            listing_next: parse_selector!("li.next a"),
            listing_total: parse_selector!("form.form-horizontal strong"),

            title: parse_selector!("div.product_main h1"),
            spec_table: parse_selector!("table.table-striped"),
            table_row: parse_selector!("tr"),
            table_header: parse_selector!("th"),
            table_cell: parse_selector!("td"),
            description_marker: parse_selector!("#product_description"),
            breadcrumb_links: parse_selector!("ul.breadcrumb li a"),
            rating: parse_selector!("p.star-rating"),
            image: parse_selector!("#product_gallery img"),
            any_image: parse_selector!("img"),

            rating_base_class: "star-rating",
        }
    }
}

impl Default for SiteSelectors {
    fn default() -> Self {
        Self::books_toscrape()
    }
}

/// Collapses runs of whitespace and trims the ends
pub fn clean_text<'a>(text: impl Iterator<Item = &'a str>) -> String {
    text.collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
