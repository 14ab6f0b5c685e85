//! Category scrapers and the registry that owns them.

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, info};

use crate::cache::{Records, YearCache};
use crate::category::{CategoryEndpoint, CATALOGUE};
use crate::error::{Result, ScrapeError};
use crate::fetcher::PageFetcher;
use crate::record::YearRecord;
use crate::table::extract_records;

/// Counters for one category.
#[derive(Debug, Clone, Serialize)]
pub struct ScrapeStats {
    pub category: String,
    pub fetches: u64,
    pub cached_years: Vec<i32>,
    pub degraded_cells: u64,
}

/// Scraper for a single category, owning its year cache.
pub struct CategoryScraper {
    endpoint: CategoryEndpoint,
    fetcher: Arc<dyn PageFetcher>,
    cache: YearCache,
    fetches: AtomicU64,
    degraded_cells: AtomicU64,
}

impl CategoryScraper {
    pub fn new(endpoint: CategoryEndpoint, fetcher: Arc<dyn PageFetcher>) -> Self {
        Self {
            endpoint,
            fetcher,
            cache: YearCache::new(),
            fetches: AtomicU64::new(0),
            degraded_cells: AtomicU64::new(0),
        }
    }

    pub fn endpoint(&self) -> &CategoryEndpoint {
        &self.endpoint
    }

    async fn scrape(&self, year: i32) -> Result<Vec<YearRecord>> {
        info!(category = %self.endpoint, year, "Cache miss, scraping");
        self.fetches.fetch_add(1, Ordering::Relaxed);

        let page = self.fetcher.fetch(&self.endpoint, year).await?;
        let table = extract_records(&page.text(), year)?;

        if table.degraded_cells > 0 {
            self.degraded_cells
                .fetch_add(table.degraded_cells as u64, Ordering::Relaxed);
        }

        Ok(table.records)
    }

    /// Records for one year, fetched at most once per process.
    pub async fn get_year(&self, year: i32) -> Result<Records> {
        if let Some(records) = self.cache.get(year) {
            debug!(category = %self.endpoint, year, "Cache hit");
            return Ok(records);
        }
        self.cache
            .get_or_try_insert(year, || self.scrape(year))
            .await
    }

    /// Records for every year in `start..=end`, ascending.
    ///
    /// Years are processed one after another; the first failure aborts the
    /// whole range.
    pub async fn get_range(&self, start: i32, end: i32) -> Result<Vec<YearRecord>> {
        if start > end {
            return Err(ScrapeError::InvalidRange { start, end });
        }

        let mut all = Vec::new();
        for year in start..=end {
            let records = self.get_year(year).await?;
            all.extend(records.iter().cloned());
        }
        Ok(all)
    }

    pub fn stats(&self) -> ScrapeStats {
        ScrapeStats {
            category: self.endpoint.slug(),
            fetches: self.fetches.load(Ordering::Relaxed),
            cached_years: self.cache.years(),
            degraded_cells: self.degraded_cells.load(Ordering::Relaxed),
        }
    }
}

/// All category scrapers, built once at startup.
pub struct ScraperRegistry {
    scrapers: Vec<Arc<CategoryScraper>>,
}

impl ScraperRegistry {
    /// One scraper per catalogue entry, sharing `fetcher`
    pub fn new(fetcher: Arc<dyn PageFetcher>) -> Self {
        Self::with_endpoints(CATALOGUE, fetcher)
    }

    pub fn with_endpoints(endpoints: &[CategoryEndpoint], fetcher: Arc<dyn PageFetcher>) -> Self {
        let scrapers = endpoints
            .iter()
            .map(|endpoint| Arc::new(CategoryScraper::new(*endpoint, fetcher.clone())))
            .collect();
        Self { scrapers }
    }

    pub fn get(&self, slug: &str) -> Option<Arc<CategoryScraper>> {
        self.scrapers
            .iter()
            .find(|s| s.endpoint().slug() == slug)
            .cloned()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<CategoryScraper>> {
        self.scrapers.iter()
    }

    pub fn len(&self) -> usize {
        self.scrapers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scrapers.is_empty()
    }

    pub fn stats(&self) -> Vec<ScrapeStats> {
        self.scrapers.iter().map(|s| s.stats()).collect()
    }
}
