//! Fetchers: one outbound request per (category, year).

use async_trait::async_trait;
use bytes::Bytes;
use std::time::Duration;
use tracing::{debug, warn};

use crate::category::{CategoryEndpoint, DEFAULT_BASE_URL};
use crate::error::{Result, ScrapeError};

/// Default request timeout for upstream fetches
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Raw upstream response.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub status: u16,
    pub body: Bytes,
}

impl FetchedPage {
    pub fn ok(body: impl Into<Bytes>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    /// Body decoded as UTF-8, invalid sequences replaced
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Retrieves one year of one category.
///
/// Implementations must return `ScrapeError::Fetch` for non-success statuses
/// and never retry on their own.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, endpoint: &CategoryEndpoint, year: i32) -> Result<FetchedPage>;
}

/// Fetcher backed by reqwest.
pub struct HttpFetcher {
    client: reqwest::Client,
    base_url: String,
}

impl HttpFetcher {
    /// Fetcher against the public site with the default timeout
    pub fn new() -> Result<Self> {
        Self::with_options(DEFAULT_BASE_URL, DEFAULT_TIMEOUT)
    }

    pub fn with_options(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            ),
        );
        headers.insert(
            reqwest::header::ACCEPT_LANGUAGE,
            reqwest::header::HeaderValue::from_static("pt-BR,pt;q=0.9,en;q=0.5"),
        );

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent("Mozilla/5.0 (X11; Linux x86_64) vitibrasil-scraper/0.1")
            .default_headers(headers)
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, endpoint: &CategoryEndpoint, year: i32) -> Result<FetchedPage> {
        let url = endpoint.url(&self.base_url, year);
        debug!(url = %url, category = %endpoint, year, "HTTP fetch starting");

        let http_error = |source: reqwest::Error| ScrapeError::Http {
            category: endpoint.slug(),
            year,
            source,
        };

        let response = self.client.get(&url).send().await.map_err(|e| {
            warn!(url = %url, error = %e, "HTTP request failed");
            http_error(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(url = %url, status = status.as_u16(), "Upstream returned non-success status");
            return Err(ScrapeError::Fetch {
                category: endpoint.slug(),
                year,
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(http_error)?;

        Ok(FetchedPage {
            status: status.as_u16(),
            body,
        })
    }
}
