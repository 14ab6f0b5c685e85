//! Token issuance, refresh and verification

use serde::Serialize;
use tracing::{debug, info};

use crate::domains::auth::errors::AuthError;
use crate::domains::auth::jwt::{JwtService, TokenKind};
use crate::domains::auth::models::User;
use crate::domains::auth::password::verify_password;
use crate::kernel::BaseUserStore;

/// Response of a successful login
#[derive(Debug, Serialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: &'static str,
}

/// Response of a successful refresh
#[derive(Debug, Serialize)]
pub struct AccessToken {
    pub access_token: String,
    pub token_type: &'static str,
}

/// Check credentials and issue an access + refresh token pair.
pub async fn create_tokens(
    username: &str,
    password: &str,
    users: &dyn BaseUserStore,
    jwt: &JwtService,
) -> Result<TokenPair, AuthError> {
    let user = users
        .find_by_username(username)
        .await?
        .ok_or(AuthError::InvalidCredentials)?;

    if !verify_password(password, &user.password) {
        debug!(username, "Password mismatch");
        return Err(AuthError::InvalidCredentials);
    }

    info!(username, "Issued token pair");
    Ok(TokenPair {
        access_token: jwt.create_access_token(&user.username)?,
        refresh_token: jwt.create_refresh_token(&user.username)?,
        token_type: "bearer",
    })
}

/// Trade a refresh token for a new access token.
///
/// The user must still exist.
pub async fn refresh_access_token(
    refresh_token: &str,
    users: &dyn BaseUserStore,
    jwt: &JwtService,
) -> Result<AccessToken, AuthError> {
    let claims = jwt
        .verify_token(refresh_token, TokenKind::Refresh)
        .map_err(|_| AuthError::InvalidRefreshToken)?;

    users
        .find_by_username(&claims.sub)
        .await?
        .ok_or(AuthError::InvalidRefreshToken)?;

    Ok(AccessToken {
        access_token: jwt.create_access_token(&claims.sub)?,
        token_type: "bearer",
    })
}

/// Resolve the user behind an access token.
pub async fn current_user(
    access_token: &str,
    users: &dyn BaseUserStore,
    jwt: &JwtService,
) -> Result<User, AuthError> {
    let claims = jwt
        .verify_token(access_token, TokenKind::Access)
        .map_err(|_| AuthError::InvalidToken)?;

    users
        .find_by_username(&claims.sub)
        .await?
        .ok_or(AuthError::InvalidToken)
}
