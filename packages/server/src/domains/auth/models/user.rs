use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;

use crate::kernel::BaseUserStore;

/// User model - SQL persistence layer
///
/// Rows of the `usuarios` table: `id SERIAL PRIMARY KEY, username TEXT UNIQUE,
/// password TEXT` (salted hash, never the plain password).
#[derive(sqlx::FromRow, Debug, Clone, PartialEq)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub password: String,
}

impl User {
    /// Find user by username
    pub async fn find_by_username(username: &str, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT id, username, password FROM usuarios WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    /// Insert new user, `None` if the username violates the unique constraint
    pub async fn insert(
        username: &str,
        password_hash: &str,
        pool: &PgPool,
    ) -> Result<Option<Self>> {
        let inserted = sqlx::query_as::<_, Self>(
            "INSERT INTO usuarios (username, password)
             VALUES ($1, $2)
             RETURNING id, username, password",
        )
        .bind(username)
        .bind(password_hash)
        .fetch_one(pool)
        .await;

        match inserted {
            Ok(user) => Ok(Some(user)),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Delete user by id, returning whether a row was removed
    pub async fn delete(id: i32, pool: &PgPool) -> Result<bool> {
        let result = sqlx::query("DELETE FROM usuarios WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// User store backed by Postgres
#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BaseUserStore for PgUserStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        User::find_by_username(username, &self.pool).await
    }

    async fn create(&self, username: &str, password_hash: &str) -> Result<Option<User>> {
        User::insert(username, password_hash, &self.pool).await
    }

    async fn delete_by_id(&self, id: i32) -> Result<bool> {
        User::delete(id, &self.pool).await
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
