//! Auth domain actions - business logic functions
//!
//! Actions are async functions called directly from the HTTP handlers.

mod tokens;
mod users;

pub use tokens::{create_tokens, current_user, refresh_access_token, AccessToken, TokenPair};
pub use users::{delete_user, register_user, RegisteredUser};
