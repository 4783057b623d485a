//! HTML builders mimicking the catalogue site's markup

use catalog_harvest::config::{Config, HttpConfig, ImagesConfig, OutputConfig, SiteConfig};
use std::path::Path;

pub const CATEGORY_DIR: &str = "/catalogue/category/books/poetry_23";

/// Item href as written on a listing page (three levels up to `/catalogue/`)
pub fn item_href(n: usize) -> String {
    format!("../../../book_{}/index.html", n)
}

/// Absolute path of an item page on the mock server
pub fn item_path(n: usize) -> String {
    format!("/catalogue/book_{}/index.html", n)
}

pub fn listing_page(
    declared_total: usize,
    items: impl IntoIterator<Item = usize>,
    next: Option<&str>,
) -> String {
    let articles: String = items
        .into_iter()
        .map(|n| {
            format!(
                r#"<li><article class="product_pod">
  <div class="image_container"><a href="{href}"><img src="../../../../media/thumb_{n}.jpg"></a></div>
  <p class="star-rating Two"></p>
  <h3><a href="{href}" title="Book {n}">Book {n}</a></h3>
</article></li>
"#,
                href = item_href(n),
                n = n
            )
        })
        .collect();

    let next = next
        .map(|href| format!(r#"<li class="next"><a href="{}">next</a></li>"#, href))
        .unwrap_or_default();

    format!(
        r#"<html><body>
<form method="get" class="form-horizontal"><strong>{total}</strong> results.</form>
<ol class="row">
{articles}</ol>
<ul class="pager">{next}</ul>
</body></html>"#,
        total = declared_total,
        articles = articles,
        next = next
    )
}

pub fn item_page(title: &str, upc: &str, availability: &str, image_src: &str) -> String {
    format!(
        r#"<html><body>
<ul class="breadcrumb">
  <li><a href="../../index.html">Home</a></li>
  <li><a href="../category/books_1/index.html">Books</a></li>
  <li><a href="../category/books/poetry_23/index.html">Poetry</a></li>
  <li class="active">{title}</li>
</ul>
<div id="product_gallery"><div class="item active"><img src="{image_src}" alt="{title}"></div></div>
<div class="col-sm-6 product_main">
  <h1>{title}</h1>
  <p class="star-rating Four"></p>
</div>
<div id="product_description" class="sub-header"><h2>Product Description</h2></div>
<p>Description of {title}.</p>
<table class="table table-striped">
  <tr><th>UPC</th><td>{upc}</td></tr>
  <tr><th>Price (excl. tax)</th><td>£10.00</td></tr>
  <tr><th>Price (incl. tax)</th><td>£12.00</td></tr>
  <tr><th>Availability</th><td>{availability}</td></tr>
</table>
</body></html>"#,
        title = title,
        upc = upc,
        availability = availability,
        image_src = image_src
    )
}

pub fn index_page(categories: &[(&str, &str)]) -> String {
    let links: String = categories
        .iter()
        .map(|(name, href)| format!("<li><a href=\"{}\">\n    {}\n</a></li>\n", href, name))
        .collect();

    format!(
        r#"<html><body>
<div class="side_categories"><ul class="nav nav-list"><li>
  <a href="catalogue/category/books_1/index.html">Books</a>
  <ul>
{links}  </ul>
</li></ul></div>
</body></html>"#,
        links = links
    )
}

pub fn png_bytes() -> Vec<u8> {
    use image::{ImageFormat, Rgb, RgbImage};
    use std::io::Cursor;

    let img = RgbImage::from_pixel(3, 2, Rgb([10, 120, 200]));
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Png).unwrap();
    buf.into_inner()
}

pub fn test_config(base_url: &str, out: &Path, images: bool) -> Config {
    Config {
        site: SiteConfig {
            base_url: format!("{}/", base_url.trim_end_matches('/')),
            index_path: "index.html".to_string(),
        },
        http: HttpConfig {
            user_agent: "TestHarvester/1.0".to_string(),
            timeout_secs: 5,
            connect_timeout_secs: 2,
        },
        output: OutputConfig {
            csv_dir: out.join("csv"),
            images_dir: out.join("images"),
            summary_path: Some(out.join("summary.md")),
        },
        images: ImagesConfig {
            enabled: images,
            jpeg_quality: 85,
        },
    }
}
