pub mod auth;
pub mod production;
