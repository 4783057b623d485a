use crate::FetchError;
use url::Url;

/// Parses an absolute page address, accepting only HTTP and HTTPS
///
/// # Examples
///
/// ```
/// use catalog_harvest::url::parse_page_url;
///
/// let url = parse_page_url("http://books.toscrape.com/index.html").unwrap();
/// assert_eq!(url.host_str(), Some("books.toscrape.com"));
/// assert!(parse_page_url("ftp://books.toscrape.com/").is_err());
/// ```
pub fn parse_page_url(url_str: &str) -> Result<Url, FetchError> {
    let url = Url::parse(url_str.trim()).map_err(|e| FetchError::InvalidUrl {
        url: url_str.to_string(),
        message: e.to_string(),
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(FetchError::InvalidUrl {
            url: url_str.to_string(),
            message: format!("unsupported scheme '{}'", other),
        }),
    }
}

/// Resolves an `href`/`src` attribute against the page it was found on
///
/// Uses standard URL-join semantics, so `..` segments collapse relative to
/// the page's own directory depth.
///
/// Returns None if the reference should be ignored:
/// - empty or fragment-only references
/// - javascript:, mailto:, tel: and data: references
/// - references that do not resolve to an HTTP(S) URL
///
/// # Examples
///
/// ```
/// use catalog_harvest::url::resolve_link;
/// use url::Url;
///
/// let page = Url::parse("http://books.toscrape.com/catalogue/category/books/poetry_23/page-2.html").unwrap();
/// let item = resolve_link("../../../a-light-in-the-attic_1000/index.html", &page).unwrap();
/// assert_eq!(item.as_str(), "http://books.toscrape.com/catalogue/a-light-in-the-attic_1000/index.html");
/// ```
pub fn resolve_link(href: &str, base_url: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    match base_url.join(href) {
        Ok(absolute_url) if absolute_url.scheme() == "http" || absolute_url.scheme() == "https" => {
            Some(absolute_url)
        }
        _ => None,
    }
}
