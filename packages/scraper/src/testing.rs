//! Test doubles.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::category::CategoryEndpoint;
use crate::error::{Result, ScrapeError};
use crate::fetcher::{FetchedPage, PageFetcher};

enum Canned {
    Page(String),
    Status(u16),
}

/// Mock fetcher serving canned pages and recording every call.
///
/// ```rust
/// use vitibrasil_scraper::testing::MockFetcher;
///
/// let mock = MockFetcher::new()
///     .with_page("comercializacao", 2020, "<table class=\"tb_base tb_dados\"></table>")
///     .with_status("comercializacao", 2021, 503);
/// assert_eq!(mock.call_count(), 0);
/// ```
#[derive(Default, Clone)]
pub struct MockFetcher {
    responses: Arc<RwLock<HashMap<(String, i32), Canned>>>,
    default_page: Arc<RwLock<Option<String>>>,
    calls: Arc<RwLock<Vec<(String, i32)>>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `html` for `(slug, year)`
    pub fn with_page(self, slug: &str, year: i32, html: impl Into<String>) -> Self {
        self.responses
            .write()
            .unwrap()
            .insert((slug.to_string(), year), Canned::Page(html.into()));
        self
    }

    /// Answer `(slug, year)` with a non-success status
    pub fn with_status(self, slug: &str, year: i32, status: u16) -> Self {
        self.responses
            .write()
            .unwrap()
            .insert((slug.to_string(), year), Canned::Status(status));
        self
    }

    /// Serve `html` for anything without a specific response
    pub fn with_default_page(self, html: impl Into<String>) -> Self {
        *self.default_page.write().unwrap() = Some(html.into());
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.read().unwrap().len()
    }

    /// Recorded `(slug, year)` calls in order
    pub fn calls(&self) -> Vec<(String, i32)> {
        self.calls.read().unwrap().clone()
    }

    pub fn reset_calls(&self) {
        self.calls.write().unwrap().clear();
    }
}

#[async_trait]
impl PageFetcher for MockFetcher {
    async fn fetch(&self, endpoint: &CategoryEndpoint, year: i32) -> Result<FetchedPage> {
        let slug = endpoint.slug();
        self.calls.write().unwrap().push((slug.clone(), year));

        let responses = self.responses.read().unwrap();
        match responses.get(&(slug.clone(), year)) {
            Some(Canned::Page(html)) => Ok(FetchedPage::ok(html.clone())),
            Some(Canned::Status(status)) => Err(ScrapeError::Fetch {
                category: slug,
                year,
                status: *status,
            }),
            None => match self.default_page.read().unwrap().as_ref() {
                Some(html) => Ok(FetchedPage::ok(html.clone())),
                None => Err(ScrapeError::Fetch {
                    category: slug,
                    year,
                    status: 404,
                }),
            },
        }
    }
}

/// Minimal page with a header row and the given `(product, quantity)` rows
pub fn sample_page(rows: &[(&str, &str)]) -> String {
    let body: String = rows
        .iter()
        .map(|(product, quantity)| {
            format!("<tr><td>{}</td><td>{}</td></tr>", product, quantity)
        })
        .collect();
    format!(
        "<html><body><table class=\"tb_base tb_dados\">\
         <thead><tr><th>Produto</th><th>Quantidade (L.)</th></tr></thead>\
         <tbody>{}</tbody></table></body></html>",
        body
    )
}
