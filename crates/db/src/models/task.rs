//! Task model and write DTOs.

use sqlx::FromRow;
use tasklist_core::tasks::TaskInput;
use tasklist_core::types::{DbId, Timestamp};

/// A row from the `tasks` table.
#[derive(Debug, Clone, FromRow)]
pub struct Task {
    pub id: DbId,
    pub task: String,
    pub completed: bool,
    pub category: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for inserting a task. Built from validated input only.
#[derive(Debug, Clone)]
pub struct CreateTask {
    pub task: String,
    pub category: Option<String>,
}

/// DTO for editing a task. Replaces both text and category.
#[derive(Debug, Clone)]
pub struct UpdateTask {
    pub task: String,
    pub category: Option<String>,
}

impl From<TaskInput> for CreateTask {
    fn from(input: TaskInput) -> Self {
        Self {
            task: input.text,
            category: input.category,
        }
    }
}

impl From<TaskInput> for UpdateTask {
    fn from(input: TaskInput) -> Self {
        Self {
            task: input.text,
            category: input.category,
        }
    }
}
