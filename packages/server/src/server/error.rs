//! Boundary error type - every handler failure becomes `{"detail": ...}`

use axum::{
    http::{header::WWW_AUTHENTICATE, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use vitibrasil_scraper::ScrapeError;

use crate::domains::auth::AuthError;
use crate::domains::production::ProductionError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    BadGateway(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::BadGateway(_) => StatusCode::BAD_GATEWAY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = match &self {
            ApiError::Internal(e) => {
                error!(error = %e, "Request failed");
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        let body = Json(json!({ "detail": detail }));
        if status == StatusCode::UNAUTHORIZED {
            (status, [(WWW_AUTHENTICATE, "Bearer")], body).into_response()
        } else {
            (status, body).into_response()
        }
    }
}

impl From<ScrapeError> for ApiError {
    fn from(err: ScrapeError) -> Self {
        match err {
            ScrapeError::InvalidRange { .. } => ApiError::BadRequest(err.to_string()),
            ScrapeError::TableNotFound { .. } => ApiError::NotFound(err.to_string()),
            ScrapeError::Fetch { .. } | ScrapeError::Http { .. } => {
                ApiError::BadGateway(err.to_string())
            }
            ScrapeError::Client(e) => ApiError::Internal(e.into()),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials
            | AuthError::InvalidToken
            | AuthError::InvalidRefreshToken => ApiError::Unauthorized(err.to_string()),
            AuthError::UsernameTaken | AuthError::EmptyCredentials => {
                ApiError::BadRequest(err.to_string())
            }
            AuthError::UserNotFound => ApiError::NotFound(err.to_string()),
            AuthError::InternalError(e) => ApiError::Internal(e),
        }
    }
}

impl From<ProductionError> for ApiError {
    fn from(err: ProductionError) -> Self {
        match err {
            ProductionError::NotFound(_) => ApiError::NotFound(err.to_string()),
            ProductionError::Empty | ProductionError::YearNotFound { .. } => {
                ApiError::BadRequest(err.to_string())
            }
            ProductionError::MissingColumn(_)
            | ProductionError::Io(_)
            | ProductionError::Csv(_) => ApiError::Internal(err.into()),
        }
    }
}
