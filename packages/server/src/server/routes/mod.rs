// HTTP routes
pub mod auth;
pub mod categories;
pub mod health;
pub mod production;

pub use auth::*;
pub use categories::*;
pub use health::*;
pub use production::*;
