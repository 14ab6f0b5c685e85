// TestDependencies - mock implementations for testing
//
// Provides in-memory services that can be injected into the app for tests.

use anyhow::{bail, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use super::BaseUserStore;
use crate::domains::auth::models::User;

// =============================================================================
// Memory User Store
// =============================================================================

#[derive(Default)]
struct MemoryUsers {
    next_id: i32,
    rows: Vec<User>,
}

/// User store kept in memory; ids start at 1 like a SERIAL column.
#[derive(Clone, Default)]
pub struct MemoryUserStore {
    users: Arc<Mutex<MemoryUsers>>,
    unavailable: Arc<Mutex<bool>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every call fail, as if the database were down
    pub fn set_unavailable(&self, unavailable: bool) {
        *self.unavailable.lock().unwrap() = unavailable;
    }

    pub fn user_count(&self) -> usize {
        self.users.lock().unwrap().rows.len()
    }

    fn check(&self) -> Result<()> {
        if *self.unavailable.lock().unwrap() {
            bail!("user store unavailable");
        }
        Ok(())
    }
}

#[async_trait]
impl BaseUserStore for MemoryUserStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        self.check()?;
        let users = self.users.lock().unwrap();
        Ok(users.rows.iter().find(|u| u.username == username).cloned())
    }

    async fn create(&self, username: &str, password_hash: &str) -> Result<Option<User>> {
        self.check()?;
        let mut users = self.users.lock().unwrap();
        if users.rows.iter().any(|u| u.username == username) {
            return Ok(None);
        }
        users.next_id += 1;
        let user = User {
            id: users.next_id,
            username: username.to_string(),
            password: password_hash.to_string(),
        };
        users.rows.push(user.clone());
        Ok(Some(user))
    }

    async fn delete_by_id(&self, id: i32) -> Result<bool> {
        self.check()?;
        let mut users = self.users.lock().unwrap();
        let before = users.rows.len();
        users.rows.retain(|u| u.id != id);
        Ok(users.rows.len() != before)
    }

    async fn ping(&self) -> Result<()> {
        self.check()
    }
}
