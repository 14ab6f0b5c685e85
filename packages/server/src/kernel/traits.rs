// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Business logic (like "issue a token pair") lives in domain actions that use these traits.
//
// Naming convention: Base* for trait names (e.g., BaseUserStore)

use anyhow::Result;
use async_trait::async_trait;

use crate::domains::auth::models::User;

// =============================================================================
// User Store Trait (Infrastructure - account persistence)
// =============================================================================

#[async_trait]
pub trait BaseUserStore: Send + Sync {
    /// Find a user by exact username
    async fn find_by_username(&self, username: &str) -> Result<Option<User>>;

    /// Insert a user with an already hashed password
    ///
    /// Returns `None` when the username is already taken.
    async fn create(&self, username: &str, password_hash: &str) -> Result<Option<User>>;

    /// Delete a user, returning false when no such id exists
    async fn delete_by_id(&self, id: i32) -> Result<bool>;

    /// Cheap connectivity check for health reporting
    async fn ping(&self) -> Result<()>;
}
