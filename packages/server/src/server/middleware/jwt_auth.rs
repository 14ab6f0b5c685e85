use axum::{
    extract::{Extension, Request},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};
use tracing::debug;

use crate::domains::auth::actions::current_user;
use crate::domains::auth::AuthError;
use crate::server::app::AppState;
use crate::server::error::ApiError;

/// Authenticated user information from JWT
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub user_id: i32,
    pub username: String,
}

/// Bearer token from the Authorization header (a raw token is accepted too)
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    let auth_str = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = auth_str.strip_prefix("Bearer ").unwrap_or(auth_str).trim();
    (!token.is_empty()).then_some(token)
}

/// JWT authentication middleware
///
/// Rejects the request with 401 unless it carries a valid access token whose
/// user still exists; otherwise adds AuthUser to request extensions.
pub async fn require_auth(
    Extension(state): Extension<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer_token(request.headers()).ok_or(AuthError::InvalidToken)?;

    let user = current_user(token, state.users.as_ref(), &state.jwt_service).await?;
    debug!(user_id = user.id, username = %user.username, "Authenticated user");

    request.extensions_mut().insert(AuthUser {
        user_id: user.id,
        username: user.username,
    });

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_extract_token_with_bearer() {
        assert_eq!(extract_bearer_token(&headers("Bearer abc.def")), Some("abc.def"));
    }

    #[test]
    fn test_extract_token_without_bearer() {
        assert_eq!(extract_bearer_token(&headers("abc.def")), Some("abc.def"));
    }

    #[test]
    fn test_no_auth_header() {
        assert_eq!(extract_bearer_token(&HeaderMap::new()), None);
    }

    #[test]
    fn test_empty_bearer() {
        assert_eq!(extract_bearer_token(&headers("Bearer ")), None);
    }
}
