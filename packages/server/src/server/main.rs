// Main entry point for API server

use std::sync::Arc;

use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vitibrasil_core::domains::auth::{JwtService, PgUserStore};
use vitibrasil_core::server::{build_app, AppState};
use vitibrasil_core::Config;
use vitibrasil_scraper::{HttpFetcher, ScraperRegistry};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "info,vitibrasil_core=debug,vitibrasil_scraper=debug,sqlx=warn".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Vitibrasil API");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!("Configuration loaded");

    // Connect to database
    tracing::info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connected");

    // Run migrations
    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Migrations complete");

    let fetcher = HttpFetcher::with_options(&config.scraper_base_url, config.scraper_timeout)
        .context("Failed to build HTTP client")?;
    tracing::info!(
        base_url = %config.scraper_base_url,
        timeout_secs = config.scraper_timeout.as_secs(),
        "Scraper configured"
    );

    let jwt_service = JwtService::new(
        &config.jwt_secret,
        config.jwt_issuer.clone(),
        chrono::Duration::minutes(config.access_token_expire_minutes),
        chrono::Duration::days(config.refresh_token_expire_days),
    );

    let state = AppState::new(
        Arc::new(PgUserStore::new(pool)),
        jwt_service,
        ScraperRegistry::new(Arc::new(fetcher)),
        config.production_csv_path.clone(),
    );

    // Build application
    let app = build_app(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);
    tracing::info!("Health check: http://localhost:{}/api/v1/health", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
