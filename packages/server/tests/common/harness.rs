//! In-process test harness.
//!
//! Builds the full router over an in-memory user store, a recording mock
//! fetcher and a temporary production file. Requests go through
//! `tower::ServiceExt::oneshot`, so no socket or database is needed.

use std::io::Write;
use std::sync::Arc;

use axum::{
    body::Body,
    http::{header::AUTHORIZATION, HeaderMap, Method, Request, StatusCode},
    Router,
};
use serde_json::Value as Json;
use tempfile::NamedTempFile;
use tower::ServiceExt;

use vitibrasil_core::domains::auth::password::hash_password;
use vitibrasil_core::domains::auth::{JwtService, User};
use vitibrasil_core::kernel::{BaseUserStore, MemoryUserStore};
use vitibrasil_core::server::{build_app, AppState};
use vitibrasil_scraper::testing::MockFetcher;
use vitibrasil_scraper::ScraperRegistry;

use super::fixtures::PRODUCTION_CSV;

pub const TEST_SECRET: &str = "test_secret_key";

/// Status, headers and JSON body (`Null` when the body is not JSON)
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Json,
}

impl TestResponse {
    pub fn detail(&self) -> &str {
        self.body["detail"].as_str().unwrap_or_default()
    }
}

pub struct TestHarness {
    pub users: MemoryUserStore,
    pub fetcher: MockFetcher,
    pub jwt_service: JwtService,
    pub app: Router,
    _production_file: Option<NamedTempFile>,
}

fn jwt_service() -> JwtService {
    JwtService::new(
        TEST_SECRET,
        "test_issuer".to_string(),
        chrono::Duration::minutes(30),
        chrono::Duration::days(7),
    )
}

impl TestHarness {
    pub fn new() -> Self {
        Self::with_fetcher(MockFetcher::new())
    }

    pub fn with_fetcher(fetcher: MockFetcher) -> Self {
        let mut file = NamedTempFile::new().expect("create temp production file");
        file.write_all(PRODUCTION_CSV.as_bytes())
            .expect("write temp production file");
        let path = file.path().to_path_buf();
        Self::build(fetcher, path, Some(file))
    }

    /// Harness whose production file does not exist
    pub fn without_production_file() -> Self {
        Self::build(
            MockFetcher::new(),
            "/nonexistent/Producao.csv".into(),
            None,
        )
    }

    fn build(
        fetcher: MockFetcher,
        production_path: std::path::PathBuf,
        production_file: Option<NamedTempFile>,
    ) -> Self {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        let users = MemoryUserStore::new();
        let state = AppState::new(
            Arc::new(users.clone()),
            jwt_service(),
            ScraperRegistry::new(Arc::new(fetcher.clone())),
            production_path,
        );

        Self {
            users,
            fetcher,
            jwt_service: jwt_service(),
            app: build_app(state),
            _production_file: production_file,
        }
    }

    /// Insert a user directly into the store
    pub async fn create_user(&self, username: &str, password: &str) -> User {
        self.users
            .create(username, &hash_password(password))
            .await
            .expect("user store available")
            .expect("username not taken")
    }

    /// A stored user plus a valid access token for it
    pub async fn authenticated(&self, username: &str) -> (User, String) {
        let user = self.create_user(username, "password").await;
        let token = self
            .jwt_service
            .create_access_token(username)
            .expect("create access token");
        (user, token)
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Json>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("build request");

        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");
        let body = serde_json::from_slice(&bytes).unwrap_or(Json::Null);

        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> TestResponse {
        self.request(Method::GET, uri, token, None).await
    }

    pub async fn post(&self, uri: &str, body: Json) -> TestResponse {
        self.request(Method::POST, uri, None, Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> TestResponse {
        self.request(Method::DELETE, uri, token, None).await
    }
}
