use crate::fixtures::{item_page, item_path};
use catalog_harvest::crawler::ItemExtractor;
use catalog_harvest::{ExtractError, FetchError, ParseError, Rating};
use reqwest::Client;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_extract_item_from_server() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(item_path(7)))
        .respond_with(ResponseTemplate::new(200).set_body_string(item_page(
            "Seven Brief Lessons",
            "upc-0007",
            "In stock (7 available)",
            "../../media/cache/77/seven.jpg",
        )))
        .expect(1)
        .mount(&server)
        .await;

    let url = format!("{}{}", server.uri(), item_path(7));
    let record = ItemExtractor::new(Client::new())
        .extract_item(&url)
        .await
        .expect("extraction failed");

    assert_eq!(record.source_url(), url);
    assert_eq!(record.title(), "Seven Brief Lessons");
    assert_eq!(record.upc(), "upc-0007");
    assert_eq!(record.price_excluding_tax(), "£10.00");
    assert_eq!(record.price_including_tax(), "£12.00");
    assert_eq!(record.quantity_available(), 7);
    assert_eq!(record.description(), "Description of Seven Brief Lessons.");
    assert_eq!(record.category(), "Poetry");
    assert_eq!(record.rating(), Some(Rating::Four));
    assert_eq!(
        record.image_url(),
        format!("{}/media/cache/77/seven.jpg", server.uri())
    );
}

#[tokio::test]
async fn test_extract_item_status_error() {
    let server = MockServer::start().await;

    let url = format!("{}{}", server.uri(), item_path(1));
    let result = ItemExtractor::new(Client::new()).extract_item(&url).await;

    assert!(matches!(
        result,
        Err(ExtractError::Fetch(FetchError::Status { status: 404, .. }))
    ));
}

#[tokio::test]
async fn test_extract_item_missing_title() {
    let server = MockServer::start().await;
    let body = item_page("Gone", "upc-1", "Out of stock", "x.jpg").replace("<h1>Gone</h1>", "");
    Mock::given(method("GET"))
        .and(path(item_path(1)))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(&server)
        .await;

    let url = format!("{}{}", server.uri(), item_path(1));
    let result = ItemExtractor::new(Client::new()).extract_item(&url).await;

    assert!(matches!(
        result,
        Err(ExtractError::Parse(ParseError::MissingElement { element: "title", .. }))
    ));
}

#[tokio::test]
async fn test_extract_item_invalid_url() {
    let result = ItemExtractor::new(Client::new())
        .extract_item("not a url")
        .await;
    assert!(matches!(
        result,
        Err(ExtractError::Fetch(FetchError::InvalidUrl { .. }))
    ));
}
