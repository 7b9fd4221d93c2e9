//! User model and database operations
//!
//! This module provides the User model and the PostgreSQL queries backing
//! the `/api/users` resource. Tasks reference users through `tasks.user_id`;
//! deleting a user unassigns its tasks (`ON DELETE SET NULL`).
//!
//! # Schema
//!
//! ```sql
//! CREATE TABLE users (
//!     id BIGSERIAL PRIMARY KEY,
//!     name VARCHAR(255) NOT NULL CHECK (char_length(name) > 0),
//!     email VARCHAR(255) NOT NULL CHECK (char_length(email) > 0)
//! );
//! ```
//!
//! # Example
//!
//! ```no_run
//! use taskboard_shared::models::user::{NewUser, User};
//! use taskboard_shared::db::pool::{create_pool, PoolConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = create_pool(&PoolConfig::new("postgresql://localhost/taskboard")).await?;
//!
//! let user = User::create(&pool, NewUser {
//!     name: "Ann".to_string(),
//!     email: "ann@example.com".to_string(),
//! }).await?;
//! println!("Created user: {}", user.id);
//! # Ok(())
//! # }
//! ```

use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// User record as stored and returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Store-assigned identity, never reused
    pub id: i64,

    /// Display name (non-empty)
    pub name: String,

    /// Email address
    pub email: String,
}

/// Writable user fields, used for both insert and full replace
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
}

impl NewUser {
    /// Builds the record this input produces once an identity is assigned
    pub fn into_user(self, id: i64) -> User {
        User {
            id,
            name: self.name,
            email: self.email,
        }
    }
}

impl User {
    /// Inserts a new user and returns it with its assigned ID
    ///
    /// # Errors
    ///
    /// Returns an error if a check constraint rejects the values or the
    /// database connection fails
    pub async fn create(pool: &PgPool, data: NewUser) -> Result<Self, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email)
            VALUES ($1, $2)
            RETURNING id, name, email
            "#,
        )
        .bind(data.name)
        .bind(data.email)
        .fetch_one(pool)
        .await?;

        Ok(user)
    }

    /// Finds a user by ID
    ///
    /// Returns `None` if no user has this ID.
    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Lists all users in insertion order
    pub async fn list(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email
            FROM users
            ORDER BY id
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(users)
    }

    /// Replaces every writable field of an existing user
    ///
    /// # Returns
    ///
    /// The persisted user, or `None` if no row matched `id`
    pub async fn replace(
        pool: &PgPool,
        id: i64,
        data: NewUser,
    ) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET name = $2, email = $3
            WHERE id = $1
            RETURNING id, name, email
            "#,
        )
        .bind(id)
        .bind(data.name)
        .bind(data.email)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Deletes a user by ID
    ///
    /// Tasks assigned to the user are kept with `user_id` set to NULL.
    ///
    /// # Returns
    ///
    /// True if a user was deleted, false if none existed
    pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
