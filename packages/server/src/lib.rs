// Vitibrasil API - Core
//
// HTTP API over Embrapa's Vitibrasil grape and wine statistics: authenticated
// per-category endpoints backed by the scraper crate, JWT accounts, and the
// local production file.

pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
