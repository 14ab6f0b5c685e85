//! Typed errors for the scraper library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) so the HTTP boundary
//! can map each failure to its own status code.

use thiserror::Error;

/// Errors that can occur while producing year records for a category.
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// Upstream answered with a non-success status
    #[error("upstream returned HTTP {status} for {category} in {year}")]
    Fetch {
        category: String,
        year: i32,
        status: u16,
    },

    /// Request never produced a response (connect, timeout, body read)
    #[error("request for {category} in {year} failed: {source}")]
    Http {
        category: String,
        year: i32,
        #[source]
        source: reqwest::Error,
    },

    /// The data table is absent from the returned page
    #[error("data table not found for year {year}")]
    TableNotFound { year: i32 },

    /// Range start is after range end
    #[error("invalid year range: start {start} is after end {end}")]
    InvalidRange { start: i32, end: i32 },

    /// HTTP client could not be constructed
    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),
}

/// Result type alias for scraper operations.
pub type Result<T> = std::result::Result<T, ScrapeError>;
