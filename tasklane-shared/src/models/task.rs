/// Task model and database operations
///
/// This module provides the Task model: a unit of work with a title, a
/// description, a status lifecycle, a creation timestamp, and an optional
/// owning user.
///
/// # Status lifecycle
///
/// The four statuses form a flat enumeration, not a transition graph: any
/// value may follow any other, including moving a `deleted` task back to
/// `pending`. New tasks always start as `pending`. "Deleting" a task via
/// [`Task::remove`] only flips the status to `deleted`; the row persists.
///
/// # Schema
///
/// ```sql
/// CREATE TYPE task_status AS ENUM (
///     'pending', 'in_progress', 'completed', 'deleted'
/// );
///
/// CREATE TABLE tasks (
///     id BIGSERIAL PRIMARY KEY,
///     title TEXT NOT NULL,
///     description TEXT NOT NULL,
///     status task_status NOT NULL DEFAULT 'pending',
///     created_date TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     user_id BIGINT
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use tasklane_shared::models::task::{Task, CreateTask, TaskStatus};
/// use tasklane_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let task = Task::create(&pool, CreateTask {
///     title: "Write report".to_string(),
///     description: "Quarterly numbers".to_string(),
///     user_id: None,
/// }).await?;
///
/// // Mark it completed
/// Task::change_status(&pool, task.id, TaskStatus::Completed).await?;
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::fmt;
use std::str::FromStr;

/// Task lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "task_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Initial status for every new task
    Pending,

    /// Task is being worked on
    InProgress,

    /// Task is done
    Completed,

    /// Task was soft-deleted; the row is retained
    Deleted,
}

/// Error returned when a string is not one of the four status values
#[derive(Debug, Clone, thiserror::Error)]
#[error("Invalid status '{0}'. Must be one of: pending, in_progress, completed, deleted")]
pub struct InvalidStatus(pub String);

impl TaskStatus {
    /// All statuses, in declaration order
    pub const ALL: [TaskStatus; 4] = [
        TaskStatus::Pending,
        TaskStatus::InProgress,
        TaskStatus::Completed,
        TaskStatus::Deleted,
    ];

    /// Converts status to its database/wire token
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Completed => "completed",
            TaskStatus::Deleted => "deleted",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = InvalidStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(TaskStatus::Pending),
            "in_progress" => Ok(TaskStatus::InProgress),
            "completed" => Ok(TaskStatus::Completed),
            "deleted" => Ok(TaskStatus::Deleted),
            other => Err(InvalidStatus(other.to_string())),
        }
    }
}

/// Task model representing a unit of work
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    /// Unique task ID, assigned by the database on insert
    pub id: i64,

    /// Task title
    pub title: String,

    /// Task description
    pub description: String,

    /// Current lifecycle status
    pub status: TaskStatus,

    /// When the task was created; immutable after insert
    pub created_date: DateTime<Utc>,

    /// Owning user (None if unassigned)
    ///
    /// Validated against the users table when set at creation, never
    /// re-validated afterwards. May be stale if the user was deleted.
    pub user_id: Option<i64>,
}

/// Input for creating a new task
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTask {
    /// Task title
    pub title: String,

    /// Task description
    pub description: String,

    /// Optional owning user
    pub user_id: Option<i64>,
}

/// Input for updating a task
///
/// Status is deliberately not settable through this path; use
/// [`Task::change_status`] instead.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTask {
    /// New title
    pub title: Option<String>,

    /// New description
    pub description: Option<String>,
}

impl Task {
    /// Creates a new task in pending status
    ///
    /// `status` and `created_date` are set by the database defaults. The
    /// caller is responsible for validating `user_id` against the users
    /// table before calling this.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn create(pool: &PgPool, data: CreateTask) -> Result<Self, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (title, description, user_id)
            VALUES ($1, $2, $3)
            RETURNING id, title, description, status, created_date, user_id
            "#,
        )
        .bind(data.title)
        .bind(data.description)
        .bind(data.user_id)
        .fetch_one(pool)
        .await?;

        Ok(task)
    }

    /// Finds a task by ID
    ///
    /// This is the shared lookup primitive: update, remove, change_status
    /// and days-elapsed all resolve the task through it and fail identically
    /// when the id is absent.
    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, title, description, status, created_date, user_id
            FROM tasks
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Lists all tasks in insertion order, no filtering
    ///
    /// Soft-deleted tasks are included; deletion is a status, not an
    /// exclusion.
    pub async fn list(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, title, description, status, created_date, user_id
            FROM tasks
            ORDER BY id ASC
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(tasks)
    }

    /// Updates title and/or description of an existing task
    ///
    /// Only non-None fields are written; omitted fields keep their prior
    /// values.
    ///
    /// # Returns
    ///
    /// The updated task if found, None if the id does not exist
    pub async fn update(
        pool: &PgPool,
        id: i64,
        data: UpdateTask,
    ) -> Result<Option<Self>, sqlx::Error> {
        // Build dynamic update query based on which fields are present
        let mut query = String::from("UPDATE tasks SET id = id");
        let mut bind_count = 1;

        if data.title.is_some() {
            bind_count += 1;
            query.push_str(&format!(", title = ${}", bind_count));
        }
        if data.description.is_some() {
            bind_count += 1;
            query.push_str(&format!(", description = ${}", bind_count));
        }

        query.push_str(
            " WHERE id = $1 RETURNING id, title, description, status, created_date, user_id",
        );

        let mut q = sqlx::query_as::<_, Task>(&query).bind(id);

        if let Some(title) = data.title {
            q = q.bind(title);
        }
        if let Some(description) = data.description {
            q = q.bind(description);
        }

        let task = q.fetch_optional(pool).await?;

        Ok(task)
    }

    /// Soft-deletes a task by setting its status to `deleted`
    ///
    /// The row is retained and every other field is untouched. Removing an
    /// already-deleted task is allowed and leaves it deleted (idempotent).
    ///
    /// # Returns
    ///
    /// The task with status `deleted` if found, None if the id does not exist
    pub async fn remove(pool: &PgPool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        Self::change_status(pool, id, TaskStatus::Deleted).await
    }

    /// Sets the task status to any of the four enumerated values
    ///
    /// No transition restriction: any status may follow any other,
    /// including reviving a `deleted` task.
    ///
    /// # Returns
    ///
    /// The task with its new status if found, None if the id does not exist
    pub async fn change_status(
        pool: &PgPool,
        id: i64,
        status: TaskStatus,
    ) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks
            SET status = $2
            WHERE id = $1
            RETURNING id, title, description, status, created_date, user_id
            "#,
        )
        .bind(id)
        .bind(status)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Lists tasks whose status exactly equals the given value
    ///
    /// Returns an empty vec when nothing matches.
    pub async fn find_by_status(
        pool: &PgPool,
        status: TaskStatus,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, title, description, status, created_date, user_id
            FROM tasks
            WHERE status = $1
            ORDER BY id ASC
            "#,
        )
        .bind(status)
        .fetch_all(pool)
        .await?;

        Ok(tasks)
    }

    /// Whole days elapsed between creation and `now`, rounded to nearest
    ///
    /// Rounding, not truncation: a task created 12 hours ago counts as 1 day.
    pub fn days_elapsed(&self, now: DateTime<Utc>) -> i64 {
        let elapsed_seconds = (now - self.created_date).num_seconds();
        (elapsed_seconds as f64 / 86_400.0).round() as i64
    }
}
