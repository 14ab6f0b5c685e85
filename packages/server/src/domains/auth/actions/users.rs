//! Account registration and removal

use serde::Serialize;
use tracing::info;

use crate::domains::auth::errors::AuthError;
use crate::domains::auth::password::hash_password;
use crate::kernel::BaseUserStore;

/// Response of a successful registration
#[derive(Debug, Serialize)]
pub struct RegisteredUser {
    pub username: String,
    pub message: &'static str,
}

/// Create a new account with a hashed password.
pub async fn register_user(
    username: &str,
    password: &str,
    users: &dyn BaseUserStore,
) -> Result<RegisteredUser, AuthError> {
    if username.trim().is_empty() || password.is_empty() {
        return Err(AuthError::EmptyCredentials);
    }

    if users.find_by_username(username).await?.is_some() {
        return Err(AuthError::UsernameTaken);
    }

    // The store's unique constraint settles concurrent registrations
    let user = users
        .create(username, &hash_password(password))
        .await?
        .ok_or(AuthError::UsernameTaken)?;
    info!(user_id = user.id, username = %user.username, "Registered user");

    Ok(RegisteredUser {
        username: user.username,
        message: "User created successfully",
    })
}

/// Delete an account by id.
pub async fn delete_user(id: i32, users: &dyn BaseUserStore) -> Result<(), AuthError> {
    if !users.delete_by_id(id).await? {
        return Err(AuthError::UserNotFound);
    }
    info!(user_id = id, "Deleted user");
    Ok(())
}
