use thiserror::Error;

/// Authentication and account errors
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Incorrect username or password")]
    InvalidCredentials,

    #[error("Could not validate credentials")]
    InvalidToken,

    #[error("Could not validate refresh token")]
    InvalidRefreshToken,

    #[error("Username already registered")]
    UsernameTaken,

    #[error("Username and password must not be empty")]
    EmptyCredentials,

    #[error("User not found")]
    UserNotFound,

    #[error("Internal error: {0}")]
    InternalError(#[from] anyhow::Error),
}
