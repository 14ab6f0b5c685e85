//! Production domain - yearly production figures read from a local flat file
//!
//! Alternate, non-scraping data path: one row per product, one column per year.

pub mod source;

pub use source::{ProductionError, ProductionFile, ProductionRow, Row};
