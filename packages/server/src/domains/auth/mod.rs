//! Auth domain - handles authentication via username/password and JWT
//!
//! Responsibilities:
//! - Access/refresh token issuance and verification
//! - Account registration and removal
//! - Password hashing

pub mod actions;
pub mod errors;
pub mod jwt;
pub mod models;
pub mod password;

pub use errors::AuthError;
pub use jwt::{Claims, JwtService, TokenKind};
pub use models::{PgUserStore, User};
