use crate::fixtures::{
    index_page, item_page, item_path, listing_page, png_bytes, test_config, CATEGORY_DIR,
};
use catalog_harvest::crawler::{Harvester, SiteSelectors};
use catalog_harvest::model::Collection;
use catalog_harvest::output::{
    read_collection_csv, CollectionSink, HarvestedItem, OutputError, OutputResult,
};
use catalog_harvest::Rating;
use scraper::Selector;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_html(server: &MockServer, at: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(at.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

/// Serves an index with Poetry (2 good items, 1 broken) and Travel (listing down)
async fn mount_site(server: &MockServer) {
    mount_html(
        server,
        "/index.html",
        index_page(&[
            ("Poetry", "catalogue/category/books/poetry_23/index.html"),
            ("Travel", "catalogue/category/books/travel_2/index.html"),
        ]),
    )
    .await;

    mount_html(
        server,
        &format!("{}/index.html", CATEGORY_DIR),
        listing_page(3, 1..=3, None),
    )
    .await;

    mount_html(
        server,
        &item_path(1),
        item_page("Olio", "upc-0001", "In stock (3 available)", "../../media/olio.png"),
    )
    .await;
    Mock::given(method("GET"))
        .and(path(item_path(2)))
        .respond_with(ResponseTemplate::new(500))
        .mount(server)
        .await;
    mount_html(
        server,
        &item_path(3),
        item_page("Mesaerion", "upc-0003", "Out of stock", "../../media/missing.jpg"),
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/media/olio.png"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(png_bytes()))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_harvest() {
    let server = MockServer::start().await;
    mount_site(&server).await;
    let out = tempfile::tempdir().unwrap();

    let config = test_config(&server.uri(), out.path(), true);
    let harvester = Harvester::new(config).expect("Failed to create harvester");
    let stats = harvester.run().await.expect("Harvest failed");

    assert_eq!(stats.collections_discovered, 2);
    assert_eq!(stats.collections.len(), 2);
    assert_eq!(stats.items_extracted(), 2);
    assert_eq!(stats.items_failed(), 1);
    assert_eq!(stats.images_saved(), 1);
    assert_eq!(stats.images_failed(), 1);
    assert_eq!(stats.collections_written(), 1);

    let poetry = &stats.collections[0];
    assert_eq!(poetry.name, "Poetry");
    assert_eq!(poetry.urls_found, 3);
    assert!(poetry.count_mismatch().is_none());

    let travel = &stats.collections[1];
    assert_eq!(travel.name, "Travel");
    assert_eq!(travel.urls_found, 0);
    assert!(travel.halted.is_some());
    assert!(travel.output.is_none());

    // CSV in crawl order, with the image column
    let csv_path = out.path().join("csv").join("Poetry.csv");
    let rows = read_collection_csv(&csv_path).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].record.title(), "Olio");
    assert_eq!(rows[0].record.quantity_available(), 3);
    assert_eq!(rows[0].record.rating(), Some(Rating::Four));
    assert_eq!(rows[0].image_filename.as_deref(), Some("Olio_upc-0001.jpg"));
    assert_eq!(rows[1].record.title(), "Mesaerion");
    assert_eq!(rows[1].record.quantity_available(), 0);
    assert_eq!(rows[1].image_filename.as_deref(), Some(""));

    // Converted to JPEG
    let image = std::fs::read(out.path().join("images").join("Olio_upc-0001.jpg")).unwrap();
    assert_eq!(&image[..2], &[0xFF, 0xD8]);
    assert!(!out.path().join("images").join("Mesaerion_upc-0003.jpg").exists());

    assert!(!out.path().join("csv").join("Travel.csv").exists());

    let summary = std::fs::read_to_string(out.path().join("summary.md")).unwrap();
    assert!(summary.contains("| Poetry |"));
}

#[tokio::test]
async fn test_existing_image_is_not_downloaded_again() {
    let server = MockServer::start().await;
    mount_html(
        &server,
        "/index.html",
        index_page(&[("Poetry", "catalogue/category/books/poetry_23/index.html")]),
    )
    .await;
    mount_html(
        &server,
        &format!("{}/index.html", CATEGORY_DIR),
        listing_page(1, 1..=1, None),
    )
    .await;
    mount_html(
        &server,
        &item_path(1),
        item_page("Olio", "upc-0001", "In stock (3 available)", "../../media/olio.png"),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/media/olio.png"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(png_bytes()))
        .expect(0)
        .mount(&server)
        .await;

    let out = tempfile::tempdir().unwrap();
    let images_dir = out.path().join("images");
    std::fs::create_dir_all(&images_dir).unwrap();
    std::fs::write(images_dir.join("Olio_upc-0001.jpg"), b"already here").unwrap();

    let harvester = Harvester::new(test_config(&server.uri(), out.path(), true)).unwrap();
    let stats = harvester.run().await.unwrap();

    assert_eq!(stats.images_saved(), 1);
    assert_eq!(
        std::fs::read(images_dir.join("Olio_upc-0001.jpg")).unwrap(),
        b"already here"
    );
}

#[tokio::test]
async fn test_harvest_without_images_has_no_image_column() {
    let server = MockServer::start().await;
    mount_site(&server).await;
    let out = tempfile::tempdir().unwrap();

    let harvester = Harvester::new(test_config(&server.uri(), out.path(), true))
        .unwrap()
        .without_images()
        .with_category_filter(vec!["poetry".to_string()]);
    let stats = harvester.run().await.unwrap();

    assert_eq!(stats.collections.len(), 1);
    assert_eq!(stats.images_saved(), 0);

    let rows = read_collection_csv(&out.path().join("csv").join("Poetry.csv")).unwrap();
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| r.image_filename.is_none()));
    assert!(!out.path().join("images").exists());
}

#[tokio::test]
async fn test_index_without_collections_is_empty_run() {
    let server = MockServer::start().await;
    mount_html(
        &server,
        "/index.html",
        "<html><body>Down for maintenance</body></html>".to_string(),
    )
    .await;
    let out = tempfile::tempdir().unwrap();

    let harvester = Harvester::new(test_config(&server.uri(), out.path(), false)).unwrap();
    let stats = harvester.run().await.unwrap();

    assert_eq!(stats.collections_discovered, 0);
    assert!(stats.collections.is_empty());
    assert!(!out.path().join("csv").exists());
}

#[tokio::test]
async fn test_unreachable_index_fails_run() {
    let server = MockServer::start().await;
    let out = tempfile::tempdir().unwrap();

    let harvester = Harvester::new(test_config(&server.uri(), out.path(), false)).unwrap();
    assert!(harvester.run().await.is_err());
}

/// Sink that fails for one collection and records the rest
struct FlakySink {
    fail_on: String,
    written: Arc<Mutex<Vec<(String, usize)>>>,
}

impl CollectionSink for FlakySink {
    fn write_collection(
        &self,
        collection: &Collection,
        items: &[HarvestedItem],
    ) -> OutputResult<Option<PathBuf>> {
        if collection.name == self.fail_on {
            return Err(OutputError::Write("disk full".to_string()));
        }
        self.written
            .lock()
            .unwrap()
            .push((collection.name.clone(), items.len()));
        Ok(None)
    }
}

#[tokio::test]
async fn test_write_failure_does_not_stop_run() {
    let server = MockServer::start().await;
    mount_html(
        &server,
        "/index.html",
        index_page(&[
            ("Poetry", "catalogue/category/books/poetry_23/index.html"),
            ("Classics", "catalogue/category/books/classics_6/index.html"),
        ]),
    )
    .await;
    mount_html(
        &server,
        &format!("{}/index.html", CATEGORY_DIR),
        listing_page(1, 1..=1, None),
    )
    .await;
    mount_html(
        &server,
        "/catalogue/category/books/classics_6/index.html",
        listing_page(1, 4..=4, None),
    )
    .await;
    for n in [1, 4] {
        mount_html(
            &server,
            &item_path(n),
            item_page(&format!("Book {}", n), "upc", "In stock (1 available)", "x.jpg"),
        )
        .await;
    }

    let written = Arc::new(Mutex::new(Vec::new()));
    let out = tempfile::tempdir().unwrap();
    let harvester = Harvester::new(test_config(&server.uri(), out.path(), false))
        .unwrap()
        .with_sink(Box::new(FlakySink {
            fail_on: "Poetry".to_string(),
            written: Arc::clone(&written),
        }));

    let stats = harvester.run().await.unwrap();

    assert_eq!(
        stats.collections[0].write_error.as_deref(),
        Some("Failed to write output: disk full")
    );
    assert_eq!(*written.lock().unwrap(), vec![("Classics".to_string(), 1)]);
}

#[tokio::test]
async fn test_custom_selectors_reach_index_discovery() {
    let server = MockServer::start().await;
    mount_html(
        &server,
        "/index.html",
        r#"<html><body><nav class="shelves">
<a href="catalogue/category/books/poetry_23/index.html">Poetry</a>
</nav></body></html>"#
            .to_string(),
    )
    .await;
    mount_html(
        &server,
        &format!("{}/index.html", CATEGORY_DIR),
        listing_page(1, 1..=1, None),
    )
    .await;
    mount_html(
        &server,
        &item_path(1),
        item_page("Olio", "upc-0001", "In stock (3 available)", "x.jpg"),
    )
    .await;
    let out = tempfile::tempdir().unwrap();

    let default_harvester = Harvester::new(test_config(&server.uri(), out.path(), false)).unwrap();
    assert!(default_harvester.discover().await.unwrap().is_empty());

    let selectors = SiteSelectors {
        category_links: Selector::parse("nav.shelves a").unwrap(),
        ..SiteSelectors::default()
    };
    let harvester = Harvester::new(test_config(&server.uri(), out.path(), false))
        .unwrap()
        .with_selectors(selectors);

    let collections = harvester.discover().await.unwrap();
    assert_eq!(collections.len(), 1);
    assert_eq!(collections[0].name, "Poetry");

    let stats = harvester.run().await.unwrap();
    assert_eq!(stats.items_extracted(), 1);
    let rows = read_collection_csv(&out.path().join("csv").join("Poetry.csv")).unwrap();
    assert_eq!(rows[0].record.title(), "Olio");
}
