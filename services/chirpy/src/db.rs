// SPDX-License-Identifier: PMPL-1.0-or-later
//! User persistence: Postgres via sqlx, or an in-memory map

use crate::models::User;
use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::collections::HashMap;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

/// Store error types
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Email already registered: {0}")]
    DuplicateEmail(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, StoreError>;

/// Persistence contract for user records
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Create a user with a generated id and timestamps
    async fn create_user(&self, email: &str) -> Result<User>;

    /// Delete every user, returning how many were removed
    async fn delete_all_users(&self) -> Result<u64>;
}

/// Postgres-backed user store
#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    /// Connect to Postgres and apply pending migrations
    pub async fn connect(url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new().max_connections(5).connect(url).await?;
        sqlx::migrate!("./migrations").run(&pool).await?;
        info!("Database migrations applied");
        Ok(Self { pool })
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn create_user(&self, email: &str) -> Result<User> {
        let user = User::new(email.to_string());
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, created_at, updated_at, email)
            VALUES ($1, $2, $3, $4)
            RETURNING id, created_at, updated_at, email
            "#,
        )
        .bind(user.id)
        .bind(user.created_at)
        .bind(user.updated_at)
        .bind(&user.email)
        .fetch_one(&self.pool)
        .await
        .map_err(|err| match err {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                StoreError::DuplicateEmail(email.to_string())
            }
            other => StoreError::Database(other),
        })
    }

    async fn delete_all_users(&self) -> Result<u64> {
        let result = sqlx::query("DELETE FROM users").execute(&self.pool).await?;
        Ok(result.rows_affected())
    }
}

/// In-memory user store, used without `DB_URL` and in tests
#[derive(Default)]
pub struct MemoryUserStore {
    users: RwLock<HashMap<Uuid, User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn create_user(&self, email: &str) -> Result<User> {
        let mut users = self.users.write().await;

        // Same rule as the UNIQUE constraint on users.email
        if users.values().any(|u| u.email == email) {
            return Err(StoreError::DuplicateEmail(email.to_string()));
        }

        let user = User::new(email.to_string());
        users.insert(user.id, user.clone());
        debug!(id = %user.id, "User stored in memory");
        Ok(user)
    }

    async fn delete_all_users(&self) -> Result<u64> {
        let mut users = self.users.write().await;
        let removed = users.len() as u64;
        users.clear();
        Ok(removed)
    }
}
