//! Integration tests for the page-level pipelines (offers and image URL
//! collection) against a local `wiremock` server.

use akcija_scraper::{scrape_image_urls, scrape_offers, PageClient};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client() -> PageClient {
    PageClient::new(5, "akcija-test/0.1").expect("failed to build test PageClient")
}

const OFFERS_HTML: &str = r#"<html><body>
  <section id="offer_list_1">
    <h2>Savaitės akcijos</h2>
    <div class="card-body">
      <h4>Bananai, 1 kg</h4>
      <div class="price-eur">1</div><span class="price-cents">19</span>
    </div>
  </section>
</body></html>"#;

#[tokio::test]
async fn scrape_offers_extracts_sections() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/pasiulymai"))
        .and(header("user-agent", "akcija-test/0.1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(OFFERS_HTML))
        .mount(&server)
        .await;

    let client = test_client();
    let sections = scrape_offers(&client, &format!("{}/pasiulymai", server.uri())).await;

    assert_eq!(sections.len(), 1);
    assert_eq!(sections[0].title, "Savaitės akcijos");
    assert_eq!(sections[0].items[0].name, "Bananai");
    assert_eq!(sections[0].items[0].amount, "1 kg");
    assert_eq!(sections[0].items[0].price, "1,19");
}

#[tokio::test]
async fn scrape_offers_returns_empty_on_server_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/pasiulymai"))
        .respond_with(ResponseTemplate::new(503).set_body_string(OFFERS_HTML))
        .mount(&server)
        .await;

    let client = test_client();
    let sections = scrape_offers(&client, &format!("{}/pasiulymai", server.uri())).await;

    assert!(sections.is_empty(), "non-2xx must yield no sections");
}

#[tokio::test]
async fn scrape_offers_returns_empty_when_unreachable() {
    let client = test_client();
    let sections = scrape_offers(&client, "http://127.0.0.1:9/pasiulymai").await;
    assert!(sections.is_empty());
}

#[tokio::test]
async fn scrape_image_urls_resolves_against_page() {
    let server = MockServer::start().await;

    let html = r#"<html><body>
        <img data-src="/admin/contentfiles/leidinys/1.jpg" src="/blank.gif">
        <img src="/admin/contentfiles/placeholder.jpg">
        <img data-srcset="/admin/contentfiles/leidinys/2.jpg 1x, /admin/contentfiles/leidinys/2@2x.jpg 2x">
        <img src="/static/logo.svg">
    </body></html>"#;

    Mock::given(method("GET"))
        .and(path("/leidinys.htm"))
        .respond_with(ResponseTemplate::new(200).set_body_string(html))
        .mount(&server)
        .await;

    let client = test_client();
    let urls = scrape_image_urls(&client, &format!("{}/leidinys.htm", server.uri())).await;

    assert_eq!(
        urls,
        vec![
            format!("{}/admin/contentfiles/leidinys/1.jpg", server.uri()),
            format!("{}/admin/contentfiles/leidinys/2.jpg", server.uri()),
        ]
    );
}

#[tokio::test]
async fn scrape_image_urls_returns_empty_on_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/leidinys.htm"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = test_client();
    let urls = scrape_image_urls(&client, &format!("{}/leidinys.htm", server.uri())).await;
    assert!(urls.is_empty());
}
