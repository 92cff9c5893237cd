//! User model and database operations
//!
//! Users are identity records: name, unique lowercase email, and a bcrypt
//! password digest. The digest never crosses the HTTP boundary — responses
//! use [`SafeUser`], which simply has no field for it.
//!
//! # Schema
//!
//! ```sql
//! CREATE TABLE users (
//!     user_id BIGSERIAL PRIMARY KEY,
//!     first_name VARCHAR(255) NOT NULL,
//!     last_name VARCHAR(255) NOT NULL,
//!     email VARCHAR(255) NOT NULL UNIQUE,
//!     password_hash VARCHAR(255) NOT NULL,
//!     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
//!     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
//! );
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// User model representing a user account
///
/// Carries the password digest for credential checks; never serialize this
/// type into a response — convert to [`SafeUser`] first.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    /// Unique user id (generated)
    pub user_id: i64,

    /// First name
    pub first_name: String,

    /// Last name
    pub last_name: String,

    /// Email address, stored lowercase, unique across all users
    pub email: String,

    /// bcrypt password digest
    pub password_hash: String,

    /// When the account was created
    pub created_at: DateTime<Utc>,

    /// When the account was last updated
    pub updated_at: DateTime<Utc>,
}

/// User attributes safe to return to clients (no password digest)
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct SafeUser {
    pub user_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for SafeUser {
    fn from(user: User) -> Self {
        Self {
            user_id: user.user_id,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Input for creating a new user
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub first_name: String,
    pub last_name: String,

    /// Email address, already normalized to lowercase by the caller
    pub email: String,

    /// bcrypt digest, never the plaintext password
    pub password_hash: String,
}

impl User {
    /// Creates a new user
    ///
    /// # Errors
    ///
    /// Returns an error if the email already exists (unique constraint
    /// violation) or the database operation fails.
    pub async fn create(pool: &PgPool, data: CreateUser) -> Result<Self, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (first_name, last_name, email, password_hash)
            VALUES ($1, $2, $3, $4)
            RETURNING user_id, first_name, last_name, email, password_hash,
                      created_at, updated_at
            "#,
        )
        .bind(data.first_name)
        .bind(data.last_name)
        .bind(data.email)
        .bind(data.password_hash)
        .fetch_one(pool)
        .await?;

        Ok(user)
    }

    /// Finds a user by id
    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT user_id, first_name, last_name, email, password_hash,
                   created_at, updated_at
            FROM users
            WHERE user_id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Finds a user by email address
    ///
    /// Callers are expected to pass a lowercased email; the column stores
    /// normalized values.
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT user_id, first_name, last_name, email, password_hash,
                   created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Lists all users with safe fields only, newest id first
    ///
    /// The digest column is not even selected, so it cannot leak through
    /// this path.
    pub async fn list_safe(pool: &PgPool) -> Result<Vec<SafeUser>, sqlx::Error> {
        let users = sqlx::query_as::<_, SafeUser>(
            r#"
            SELECT user_id, first_name, last_name, email, created_at, updated_at
            FROM users
            ORDER BY user_id DESC
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(users)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            user_id: 1,
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            password_hash: "$2b$10$digest".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_safe_user_from_user() {
        let safe = SafeUser::from(sample_user());

        assert_eq!(safe.user_id, 1);
        assert_eq!(safe.email, "ada@example.com");
    }

    #[test]
    fn test_safe_user_serialization_has_no_digest() {
        let safe = SafeUser::from(sample_user());
        let json = serde_json::to_value(&safe).unwrap();

        assert!(json.get("password_hash").is_none());
        assert!(json.get("password").is_none());
        assert_eq!(json["first_name"], "Ada");
    }

    // Integration tests for the queries require a live database and live in
    // the API crate's test suite.
}
