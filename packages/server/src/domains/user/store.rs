// Persistence seam for user accounts.
//
// AuthService talks to users only through `UserStore`; the Postgres implementation
// below calls the stored functions via the `User` model, and tests swap in
// `kernel::test_dependencies::MockUserStore`.

use async_trait::async_trait;
use sqlx::PgPool;
use std::time::Duration;
use thiserror::Error;

use super::models::User;
use crate::common::UserId;

/// Failures reported by a `UserStore`.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("User not found")]
    NotFound,

    #[error("Unique constraint violated: {constraint}")]
    Conflict { constraint: String },

    #[error("Database error: {0}")]
    Database(#[source] sqlx::Error),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(error: sqlx::Error) -> Self {
        match error {
            sqlx::Error::RowNotFound => StoreError::NotFound,
            sqlx::Error::Database(ref db) if db.is_unique_violation() => StoreError::Conflict {
                constraint: db.constraint().unwrap_or("unknown").to_string(),
            },
            other => StoreError::Database(other),
        }
    }
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Create a user; `Conflict` if the phone number is taken
    async fn insert_user(
        &self,
        phone_number: &str,
        name: &str,
        password_hash: &str,
    ) -> Result<UserId, StoreError>;

    async fn find_by_phone(&self, phone_number: &str) -> Result<User, StoreError>;

    async fn find_by_id(&self, id: UserId) -> Result<User, StoreError>;

    /// Change phone number and name; `Conflict` if the new phone number is taken
    async fn update(&self, id: UserId, phone_number: &str, name: &str)
        -> Result<User, StoreError>;

    async fn record_login(&self, user: &User) -> Result<(), StoreError>;

    /// Liveness probe for `/health`
    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// `UserStore` backed by PostgreSQL stored functions.
#[derive(Clone)]
pub struct PostgresUserStore {
    pool: PgPool,
}

impl PostgresUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl UserStore for PostgresUserStore {
    async fn insert_user(
        &self,
        phone_number: &str,
        name: &str,
        password_hash: &str,
    ) -> Result<UserId, StoreError> {
        User::insert(phone_number, name, password_hash, &self.pool).await
    }

    async fn find_by_phone(&self, phone_number: &str) -> Result<User, StoreError> {
        User::find_by_phone_number(phone_number, &self.pool).await
    }

    async fn find_by_id(&self, id: UserId) -> Result<User, StoreError> {
        User::find_by_id(id, &self.pool).await
    }

    async fn update(
        &self,
        id: UserId,
        phone_number: &str,
        name: &str,
    ) -> Result<User, StoreError> {
        User::update(id, phone_number, name, &self.pool).await
    }

    async fn record_login(&self, user: &User) -> Result<(), StoreError> {
        user.record_login(&self.pool).await
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        match tokio::time::timeout(
            Duration::from_secs(5),
            sqlx::query("SELECT 1").execute(&self.pool),
        )
        .await
        {
            Ok(Ok(_)) => Ok(()),
            Ok(Err(e)) => Err(e.into()),
            Err(_) => Err(StoreError::Unavailable("Query timeout (>5s)".to_string())),
        }
    }
}
