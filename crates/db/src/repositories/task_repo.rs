//! Repository for the `tasks` table.

use sqlx::PgPool;
use tasklist_core::types::DbId;

use crate::models::task::{CreateTask, Task, UpdateTask};

/// Column list for `tasks` queries.
const COLUMNS: &str = "id, task, completed, category, created_at";

/// Provides CRUD operations for tasks.
pub struct TaskRepo;

impl TaskRepo {
    /// List tasks ordered alphabetically by text.
    ///
    /// When `category` is given only rows whose category equals it exactly
    /// are returned.
    pub async fn list(pool: &PgPool, category: Option<&str>) -> Result<Vec<Task>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tasks
             WHERE ($1::TEXT IS NULL OR category = $1)
             ORDER BY task ASC, id ASC"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(category)
            .fetch_all(pool)
            .await
    }

    /// Distinct non-null categories in use, sorted.
    pub async fn list_categories(pool: &PgPool) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>(
            "SELECT DISTINCT category FROM tasks
             WHERE category IS NOT NULL
             ORDER BY category ASC",
        )
        .fetch_all(pool)
        .await
    }

    /// Find a task by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Task>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tasks WHERE id = $1");
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a new task, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateTask) -> Result<Task, sqlx::Error> {
        let query = format!(
            "INSERT INTO tasks (task, category)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(&input.task)
            .bind(&input.category)
            .fetch_one(pool)
            .await
    }

    /// Replace a task's text and category. `id`, `completed` and
    /// `created_at` are left as they are.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTask,
    ) -> Result<Option<Task>, sqlx::Error> {
        let query = format!(
            "UPDATE tasks SET
                task = $2,
                category = $3
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .bind(&input.task)
            .bind(&input.category)
            .fetch_optional(pool)
            .await
    }

    /// Flip the completed flag in a single statement.
    ///
    /// Returns `None` if no task has this ID.
    pub async fn toggle(pool: &PgPool, id: DbId) -> Result<Option<Task>, sqlx::Error> {
        let query = format!(
            "UPDATE tasks SET completed = NOT completed
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a task by ID. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
