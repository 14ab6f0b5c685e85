use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use vitibrasil_scraper::DEFAULT_BASE_URL;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub jwt_secret: String,
    pub jwt_issuer: String,
    pub access_token_expire_minutes: i64,
    pub refresh_token_expire_days: i64,
    pub scraper_base_url: String,
    pub scraper_timeout: Duration,
    pub production_csv_path: PathBuf,
}

fn parsed<T: std::str::FromStr>(name: &str, default: &str) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    env::var(name)
        .unwrap_or_else(|_| default.to_string())
        .parse()
        .with_context(|| format!("{} must be a valid number", name))
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            port: parsed("PORT", "8080")?,
            jwt_secret: env::var("SECRET_KEY").context("SECRET_KEY must be set")?,
            jwt_issuer: env::var("JWT_ISSUER").unwrap_or_else(|_| "vitibrasil-api".to_string()),
            access_token_expire_minutes: parsed("ACCESS_TOKEN_EXPIRE_MINUTES", "30")?,
            refresh_token_expire_days: parsed("REFRESH_TOKEN_EXPIRE_DAYS", "7")?,
            scraper_base_url: env::var("SCRAPER_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            scraper_timeout: Duration::from_secs(parsed("SCRAPER_TIMEOUT_SECS", "30")?),
            production_csv_path: env::var("PRODUCTION_CSV_PATH")
                .unwrap_or_else(|_| "data/Producao.csv".to_string())
                .into(),
        })
    }
}
