//! Vitibrasil Scraper
//!
//! Fetches the yearly statistics tables published by Embrapa's Vitibrasil
//! site, turns each table row into a typed record and memoizes the result per
//! (category, year).
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use vitibrasil_scraper::{HttpFetcher, ScraperRegistry};
//!
//! let registry = ScraperRegistry::new(Arc::new(HttpFetcher::new()?));
//! let exports = registry.get("exportacao/vinhosMesa").unwrap();
//! let records = exports.get_range(2015, 2020).await?;
//! ```
//!
//! # Modules
//!
//! - [`category`] - The fixed catalogue of series and their URLs
//! - [`fetcher`] - One outbound request per (category, year)
//! - [`table`] - Table location and header inference
//! - [`value`] - Brazilian number normalization
//! - [`cache`] - Per-year memoization
//! - [`service`] - Category scrapers, range aggregation and the registry
//! - [`testing`] - Mock fetcher for tests

pub mod cache;
pub mod category;
pub mod error;
pub mod fetcher;
pub mod record;
pub mod service;
pub mod table;
pub mod testing;
pub mod value;

pub use cache::{Records, YearCache};
pub use category::{CategoryEndpoint, CATALOGUE, DEFAULT_BASE_URL};
pub use error::{Result, ScrapeError};
pub use fetcher::{FetchedPage, HttpFetcher, PageFetcher, DEFAULT_TIMEOUT};
pub use record::{YearRecord, YEAR_FIELD};
pub use service::{CategoryScraper, ScrapeStats, ScraperRegistry};
pub use table::{extract_records, ExtractedTable};
pub use value::{normalize, Normalized, Value};
