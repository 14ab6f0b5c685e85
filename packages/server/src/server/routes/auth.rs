use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::domains::auth::actions::{
    create_tokens, delete_user, refresh_access_token, register_user, AccessToken,
    RegisteredUser, TokenPair,
};
use crate::server::app::AppState;
use crate::server::error::ApiResult;
use crate::server::middleware::AuthUser;

#[derive(Debug, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// POST /auth/createToken
pub async fn create_token_handler(
    Extension(state): Extension<AppState>,
    Json(body): Json<Credentials>,
) -> ApiResult<Json<TokenPair>> {
    let pair = create_tokens(
        &body.username,
        &body.password,
        state.users.as_ref(),
        &state.jwt_service,
    )
    .await?;
    Ok(Json(pair))
}

/// POST /auth/refreshToken
pub async fn refresh_token_handler(
    Extension(state): Extension<AppState>,
    Json(body): Json<RefreshRequest>,
) -> ApiResult<Json<AccessToken>> {
    let token =
        refresh_access_token(&body.refresh_token, state.users.as_ref(), &state.jwt_service)
            .await?;
    Ok(Json(token))
}

/// POST /auth/createUser
pub async fn create_user_handler(
    Extension(state): Extension<AppState>,
    Json(body): Json<Credentials>,
) -> ApiResult<(StatusCode, Json<RegisteredUser>)> {
    let user = register_user(&body.username, &body.password, state.users.as_ref()).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// DELETE /auth/user/:user_id
pub async fn delete_user_handler(
    Extension(state): Extension<AppState>,
    Extension(caller): Extension<AuthUser>,
    Path(user_id): Path<i32>,
) -> ApiResult<Json<MessageResponse>> {
    tracing::info!(caller = %caller.username, user_id, "Deleting user");
    delete_user(user_id, state.users.as_ref()).await?;
    Ok(Json(MessageResponse {
        message: "User deleted successfully",
    }))
}
