//! URL handling module for Catalog-Harvest
//!
//! Every relative reference on this site (item links, pagination links,
//! image sources) is resolved against the address of the page it appears
//! on, never against the site root.

mod resolve;

pub use resolve::{parse_page_url, resolve_link};
