//! Task model and database operations
//!
//! Tasks are ownership records: a title, an optional description, a boolean
//! read-state, and a nullable owner. When the owner is set, only that owner
//! may read or mutate the task — the handlers enforce this after fetching.
//!
//! # Schema
//!
//! ```sql
//! CREATE TABLE tasks (
//!     task_id BIGSERIAL PRIMARY KEY,
//!     task_title VARCHAR(255) NOT NULL,
//!     task_description TEXT,
//!     is_read BOOLEAN NOT NULL DEFAULT FALSE,
//!     user_id BIGINT REFERENCES users(user_id) ON DELETE SET NULL,
//!     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
//!     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
//! );
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// Task model
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    /// Unique task id (generated)
    pub task_id: i64,

    /// Title, required and non-empty
    pub task_title: String,

    /// Optional free-form description
    pub task_description: Option<String>,

    /// Read-state flag, defaults to false
    pub is_read: bool,

    /// Owner reference; a task may exist unowned
    pub user_id: Option<i64>,

    /// When the task was created
    pub created_at: DateTime<Utc>,

    /// When the task was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new task
#[derive(Debug, Clone)]
pub struct CreateTask {
    pub task_title: String,
    pub task_description: Option<String>,
    pub is_read: bool,
    pub user_id: Option<i64>,
}

/// Input for a partial task update
///
/// `None` means "leave the field unchanged". The owner is not part of this
/// struct — updates never reassign ownership.
#[derive(Debug, Clone, Default)]
pub struct UpdateTask {
    pub task_title: Option<String>,
    pub task_description: Option<String>,
    pub is_read: Option<bool>,
}

impl Task {
    /// Creates a new task
    pub async fn create(pool: &PgPool, data: CreateTask) -> Result<Self, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (task_title, task_description, is_read, user_id)
            VALUES ($1, $2, $3, $4)
            RETURNING task_id, task_title, task_description, is_read, user_id,
                      created_at, updated_at
            "#,
        )
        .bind(data.task_title)
        .bind(data.task_description)
        .bind(data.is_read)
        .bind(data.user_id)
        .fetch_one(pool)
        .await?;

        Ok(task)
    }

    /// Finds a task by id
    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            SELECT task_id, task_title, task_description, is_read, user_id,
                   created_at, updated_at
            FROM tasks
            WHERE task_id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Lists all tasks owned by a user, newest id first
    pub async fn list_by_user(pool: &PgPool, user_id: i64) -> Result<Vec<Self>, sqlx::Error> {
        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT task_id, task_title, task_description, is_read, user_id,
                   created_at, updated_at
            FROM tasks
            WHERE user_id = $1
            ORDER BY task_id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(tasks)
    }

    /// Applies a partial update to a task
    ///
    /// Only fields set in `data` are written; the owner column is never
    /// touched. Returns `None` if the row no longer exists — a concurrent
    /// delete between the caller's fetch and this update is absorbed here
    /// rather than surfaced as a store fault.
    pub async fn update(
        pool: &PgPool,
        id: i64,
        data: UpdateTask,
    ) -> Result<Option<Self>, sqlx::Error> {
        // Build the SET clause from whichever fields are present
        let mut query = String::from("UPDATE tasks SET updated_at = NOW()");
        let mut bind_count = 1;

        if data.task_title.is_some() {
            bind_count += 1;
            query.push_str(&format!(", task_title = ${}", bind_count));
        }
        if data.task_description.is_some() {
            bind_count += 1;
            query.push_str(&format!(", task_description = ${}", bind_count));
        }
        if data.is_read.is_some() {
            bind_count += 1;
            query.push_str(&format!(", is_read = ${}", bind_count));
        }

        query.push_str(
            " WHERE task_id = $1 RETURNING task_id, task_title, task_description, is_read, user_id, created_at, updated_at",
        );

        let mut q = sqlx::query_as::<_, Task>(&query).bind(id);

        if let Some(title) = data.task_title {
            q = q.bind(title);
        }
        if let Some(description) = data.task_description {
            q = q.bind(description);
        }
        if let Some(is_read) = data.is_read {
            q = q.bind(is_read);
        }

        let task = q.fetch_optional(pool).await?;

        Ok(task)
    }

    /// Deletes a task
    ///
    /// Returns `true` if a row was deleted, `false` if the id no longer
    /// exists (including a delete that raced this one).
    pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE task_id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Flips the read-state and persists it
    ///
    /// The negation happens in SQL, so two rapid toggles still land on the
    /// original value. Returns `None` if the row vanished.
    pub async fn toggle_read(pool: &PgPool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks
            SET is_read = NOT is_read,
                updated_at = NOW()
            WHERE task_id = $1
            RETURNING task_id, task_title, task_description, is_read, user_id,
                      created_at, updated_at
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_task_default_leaves_everything_unset() {
        let update = UpdateTask::default();
        assert!(update.task_title.is_none());
        assert!(update.task_description.is_none());
        assert!(update.is_read.is_none());
    }

    #[test]
    fn test_task_serialization_shape() {
        let task = Task {
            task_id: 3,
            task_title: "Read the log".to_string(),
            task_description: None,
            is_read: false,
            user_id: Some(1),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["task_id"], 3);
        assert_eq!(json["task_title"], "Read the log");
        assert!(json["task_description"].is_null());
        assert_eq!(json["is_read"], false);
    }
}
