//! Tests for the reqwest-backed fetcher against a local mock server.

use std::sync::Arc;
use std::time::Duration;

use vitibrasil_scraper::category;
use vitibrasil_scraper::testing::sample_page;
use vitibrasil_scraper::{CategoryScraper, HttpFetcher, PageFetcher, ScrapeError, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fetcher(server: &MockServer) -> HttpFetcher {
    HttpFetcher::with_options(format!("{}/index.php", server.uri()), Duration::from_secs(5))
        .unwrap()
}

#[tokio::test]
async fn test_builds_query_and_returns_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/index.php"))
        .and(query_param("opcao", "opt_05"))
        .and(query_param("subopcao", "subopt_04"))
        .and(query_param("ano", "2019"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
        .expect(1)
        .mount(&server)
        .await;

    let endpoint = category::find("importacao/uvasPassas").unwrap();
    let page = fetcher(&server).fetch(endpoint, 2019).await.unwrap();

    assert_eq!(page.status, 200);
    assert_eq!(page.text(), "<html>ok</html>");
}

#[tokio::test]
async fn test_non_success_status_is_fetch_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let endpoint = category::find("comercializacao").unwrap();
    let err = fetcher(&server).fetch(endpoint, 2001).await.unwrap_err();

    assert!(matches!(
        err,
        ScrapeError::Fetch {
            year: 2001,
            status: 500,
            ..
        }
    ));
}

#[tokio::test]
async fn test_timeout_is_http_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
        .mount(&server)
        .await;

    let fetcher = HttpFetcher::with_options(
        format!("{}/index.php", server.uri()),
        Duration::from_millis(200),
    )
    .unwrap();
    let endpoint = category::find("producao").unwrap();
    let err = fetcher.fetch(endpoint, 2000).await.unwrap_err();

    assert!(matches!(err, ScrapeError::Http { year: 2000, .. }));
}

#[tokio::test]
async fn test_end_to_end_scrape_is_cached() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("opcao", "opt_02"))
        .and(query_param("ano", "2022"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(sample_page(&[("VINHO DE MESA", "169.762.429")])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let endpoint = *category::find("producao").unwrap();
    let scraper = CategoryScraper::new(endpoint, Arc::new(fetcher(&server)));

    for _ in 0..3 {
        let records = scraper.get_year(2022).await.unwrap();
        assert_eq!(
            records[0].get("Quantidade (L.)"),
            Some(Value::Integer(169_762_429))
        );
    }
    // `expect(1)` is verified when the server drops
}
