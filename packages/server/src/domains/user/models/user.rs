use sqlx::PgPool;

use crate::common::UserId;
use crate::domains::user::store::StoreError;

/// User model - SQL persistence layer
///
/// All reads and writes go through stored functions (see migrations/); nothing here
/// touches the `users` table directly.
#[derive(sqlx::FromRow, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub phone_number: String,
    pub name: String,
    #[sqlx(rename = "password")]
    pub password_hash: String,
}

// Hand-written so the password hash never ends up in logs.
impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("phone_number", &self.phone_number)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// SQL Queries - ALL queries must be in models/
// =============================================================================

impl User {
    /// Insert a new user, returning the store-assigned id
    pub async fn insert(
        phone_number: &str,
        name: &str,
        password_hash: &str,
        pool: &PgPool,
    ) -> Result<UserId, StoreError> {
        let id = sqlx::query_scalar::<_, i32>("SELECT insert_user($1, $2, $3)")
            .bind(phone_number)
            .bind(name)
            .bind(password_hash)
            .fetch_one(pool)
            .await?;
        Ok(UserId::new(id))
    }

    /// Find user by phone number
    pub async fn find_by_phone_number(
        phone_number: &str,
        pool: &PgPool,
    ) -> Result<Self, StoreError> {
        sqlx::query_as::<_, Self>("SELECT * FROM get_user_by_phone_number($1)")
            .bind(phone_number)
            .fetch_optional(pool)
            .await?
            .ok_or(StoreError::NotFound)
    }

    /// Find user by ID
    pub async fn find_by_id(id: UserId, pool: &PgPool) -> Result<Self, StoreError> {
        sqlx::query_as::<_, Self>("SELECT * FROM get_user_by_id($1)")
            .bind(id)
            .fetch_optional(pool)
            .await?
            .ok_or(StoreError::NotFound)
    }

    /// Update phone number and name, returning the updated row
    pub async fn update(
        id: UserId,
        phone_number: &str,
        name: &str,
        pool: &PgPool,
    ) -> Result<Self, StoreError> {
        sqlx::query_as::<_, Self>("SELECT * FROM update_user($1, $2, $3)")
            .bind(id)
            .bind(phone_number)
            .bind(name)
            .fetch_optional(pool)
            .await?
            .ok_or(StoreError::NotFound)
    }

    /// Append a row to the login history
    pub async fn record_login(&self, pool: &PgPool) -> Result<(), StoreError> {
        sqlx::query("SELECT insert_user_login_history($1, $2, $3, $4)")
            .bind(self.id)
            .bind(&self.phone_number)
            .bind(&self.name)
            .bind(&self.password_hash)
            .execute(pool)
            .await?;
        Ok(())
    }
}
