//! Application setup and server configuration.

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    extract::Extension,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        Method,
    },
    middleware,
    routing::{delete, get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::debug;

use vitibrasil_scraper::ScraperRegistry;

use crate::domains::auth::JwtService;
use crate::domains::production::ProductionFile;
use crate::kernel::BaseUserStore;
use crate::server::middleware::require_auth;
use crate::server::routes::{
    create_token_handler, create_user_handler, delete_user_handler, health_handler,
    production_rows_handler, production_year_handler, range_handler, refresh_token_handler,
    year_handler,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn BaseUserStore>,
    pub jwt_service: Arc<JwtService>,
    pub scrapers: Arc<ScraperRegistry>,
    pub production: Arc<ProductionFile>,
}

impl AppState {
    pub fn new(
        users: Arc<dyn BaseUserStore>,
        jwt_service: JwtService,
        scrapers: ScraperRegistry,
        production_csv_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            users,
            jwt_service: Arc::new(jwt_service),
            scrapers: Arc::new(scrapers),
            production: Arc::new(ProductionFile::new(production_csv_path)),
        }
    }
}

/// Routes that require a valid access token
fn protected_routes(scrapers: &ScraperRegistry) -> Router {
    let mut router = Router::new()
        .route("/auth/user/:user_id", delete(delete_user_handler))
        .route("/arquivo/producao", get(production_rows_handler))
        .route("/arquivo/producao/:year", get(production_year_handler));

    // One range + one single-year route per catalogue entry
    for scraper in scrapers.iter() {
        let base = format!("/{}", scraper.endpoint().slug());
        debug!(route = %base, category = %scraper.endpoint(), "Registering category routes");
        router = router
            .route(&base, get(range_handler).layer(Extension(scraper.clone())))
            .route(
                &format!("{}/:year", base),
                get(year_handler).layer(Extension(scraper.clone())),
            );
    }

    router.route_layer(middleware::from_fn(require_auth))
}

/// Build the Axum application router
pub fn build_app(state: AppState) -> Router {
    let public = Router::new()
        .route("/auth/createToken", post(create_token_handler))
        .route("/auth/refreshToken", post(refresh_token_handler))
        .route("/auth/createUser", post(create_user_handler))
        .route("/health", get(health_handler));

    let api = public.merge(protected_routes(&state.scrapers));

    // CORS configuration - allow any origin
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE]);

    Router::new()
        .nest("/api/v1", api)
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(Extension(state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
