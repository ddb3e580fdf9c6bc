//! # User Repository
//!
//! Database operations for storefront user accounts.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use super::generate_id;
use crate::error::{DbError, DbResult};
use storefront_core::{User, UserChanges};

const SELECT_USER: &str =
    "SELECT id, username, email, is_admin, created_at, updated_at FROM users";

/// Repository for user database operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    /// Creates a new UserRepository.
    pub fn new(pool: SqlitePool) -> Self {
        UserRepository { pool }
    }

    /// Lists users, oldest account first.
    pub async fn list(&self) -> DbResult<Vec<User>> {
        let sql = format!("{SELECT_USER} ORDER BY rowid");
        let users = sqlx::query_as::<_, User>(&sql).fetch_all(&self.pool).await?;
        Ok(users)
    }

    /// Gets a user by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<User>> {
        let sql = format!("{SELECT_USER} WHERE id = ?1");
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    /// Inserts a new user. Inputs are expected to be validated already.
    ///
    /// ## Returns
    /// * `Err(DbError::UniqueViolation)` - Email already registered
    pub async fn insert(&self, username: &str, email: &str, is_admin: bool) -> DbResult<User> {
        debug!(email = %email, "Inserting user");

        let now = Utc::now();
        let user = User {
            id: generate_id(),
            username: username.to_string(),
            email: email.to_string(),
            is_admin,
            created_at: now,
            updated_at: now,
        };

        sqlx::query(
            r#"
            INSERT INTO users (id, username, email, is_admin, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&user.id)
        .bind(&user.username)
        .bind(&user.email)
        .bind(user.is_admin)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| duplicate_email(e, email))?;

        Ok(user)
    }

    /// Applies the present fields of `changes`.
    pub async fn update(&self, id: &str, changes: &UserChanges) -> DbResult<User> {
        debug!(id = %id, "Updating user");

        let result = sqlx::query(
            r#"
            UPDATE users SET
                username = COALESCE(?2, username),
                email = COALESCE(?3, email),
                is_admin = COALESCE(?4, is_admin),
                updated_at = ?5
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(&changes.username)
        .bind(&changes.email)
        .bind(changes.is_admin)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e| duplicate_email(e, changes.email.as_deref().unwrap_or_default()))?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("User", id));
        }

        self.get_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("User", id))
    }

    /// Deletes a user and returns it.
    pub async fn delete(&self, id: &str) -> DbResult<User> {
        debug!(id = %id, "Deleting user");

        let mut tx = self.pool.begin().await?;

        let sql = format!("{SELECT_USER} WHERE id = ?1");
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| DbError::not_found("User", id))?;

        sqlx::query("DELETE FROM users WHERE id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(user)
    }
}

fn duplicate_email(err: sqlx::Error, email: &str) -> DbError {
    match DbError::from(err) {
        DbError::UniqueViolation { field, .. } => DbError::duplicate(field, email),
        other => other,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
