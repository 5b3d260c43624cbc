//! Handlers for the task list pages and form actions.
//!
//! Page handlers (`GET /`, `GET /edit/{id}`) render HTML. Form handlers
//! validate input before touching the database, then always answer with a
//! `303 See Other` redirect carrying a flash notice; errors are logged and
//! turned into an error notice at this boundary.

use axum::extract::{Path, Query, State};
use axum::response::{Html, IntoResponse, Response};
use axum::Form;
use serde::Deserialize;
use tasklist_core::error::CoreError;
use tasklist_core::flash::Flash;
use tasklist_core::tasks::TaskInput;
use tasklist_core::types::DbId;
use tasklist_db::models::task::{CreateTask, Task, UpdateTask};
use tasklist_db::repositories::TaskRepo;

use crate::error::{AppError, AppResult};
use crate::flash::{clear_flash, redirect_with_flash, IncomingFlash};
use crate::state::AppState;
use crate::views;

/// Query parameters for `GET /`.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub category: Option<String>,
}

/// Form body for `POST /add` and `POST /edit/{id}`.
#[derive(Debug, Deserialize)]
pub struct TaskForm {
    #[serde(default)]
    pub task: String,
    pub category: Option<String>,
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Task", id })
}

/// Turn a form action outcome into a redirect with a notice.
fn respond(
    state: &AppState,
    outcome: AppResult<Flash>,
    success_to: &str,
    failure_to: &str,
) -> Response {
    match outcome {
        Ok(flash) => redirect_with_flash(success_to, &flash, &state.config.session_secret),
        Err(err) => {
            let (status, message) = err.classify();
            // Server-side failures were already logged by `classify`.
            if !status.is_server_error() {
                tracing::warn!(status = status.as_u16(), error = %err, "Task action failed");
            }
            redirect_with_flash(
                failure_to,
                &Flash::error(message),
                &state.config.session_secret,
            )
        }
    }
}

// ---------------------------------------------------------------------------
// Pages
// ---------------------------------------------------------------------------

/// GET /
///
/// List tasks alphabetically, optionally filtered by an exact `?category=` match.
pub async fn index(
    State(state): State<AppState>,
    IncomingFlash(flash): IncomingFlash,
    Query(params): Query<ListParams>,
) -> AppResult<Response> {
    // A blank value means "no filter"; anything else is matched as given.
    let category = params.category.filter(|c| !c.trim().is_empty());

    let tasks = TaskRepo::list(&state.pool, category.as_deref()).await?;
    let categories = TaskRepo::list_categories(&state.pool).await?;

    let html = views::index_page(&tasks, &categories, category.as_deref(), flash.as_ref());
    Ok(clear_flash(Html(html).into_response(), flash.is_some()))
}

/// GET /edit/{id}
///
/// Show the edit form. Unknown ids redirect to the list with a notice.
pub async fn edit_form(
    State(state): State<AppState>,
    IncomingFlash(flash): IncomingFlash,
    Path(task_id): Path<DbId>,
) -> Response {
    let loaded = load_for_edit(&state, task_id).await;
    match loaded {
        Ok((task, categories)) => {
            let html = views::edit_page(&task, &categories, flash.as_ref());
            clear_flash(Html(html).into_response(), flash.is_some())
        }
        Err(err) => respond(&state, Err(err), "/", "/"),
    }
}

async fn load_for_edit(
    state: &AppState,
    task_id: DbId,
) -> AppResult<(Task, Vec<String>)> {
    let task = TaskRepo::find_by_id(&state.pool, task_id)
        .await?
        .ok_or_else(|| not_found(task_id))?;
    let categories = TaskRepo::list_categories(&state.pool).await?;
    Ok((task, categories))
}

// ---------------------------------------------------------------------------
// Form actions
// ---------------------------------------------------------------------------

/// POST /add
pub async fn add_task(State(state): State<AppState>, Form(form): Form<TaskForm>) -> Response {
    let outcome = create(&state, &form).await;
    respond(&state, outcome, "/", "/")
}

async fn create(state: &AppState, form: &TaskForm) -> AppResult<Flash> {
    let input = TaskInput::parse(&form.task, form.category.as_deref())?;
    let task = TaskRepo::create(&state.pool, &CreateTask::from(input)).await?;

    tracing::info!(
        task_id = task.id,
        category = ?task.category,
        "Task created",
    );

    Ok(Flash::success("Task added"))
}

/// POST /edit/{id}
///
/// Replace the task's text and category. Validation failures return to the
/// edit form; a missing task returns to the list.
pub async fn update_task(
    State(state): State<AppState>,
    Path(task_id): Path<DbId>,
    Form(form): Form<TaskForm>,
) -> Response {
    let outcome = update(&state, task_id, &form).await;
    let failure_to = match &outcome {
        Err(AppError::Core(CoreError::Validation(_))) => format!("/edit/{task_id}"),
        _ => "/".to_string(),
    };
    respond(&state, outcome, "/", &failure_to)
}

async fn update(state: &AppState, task_id: DbId, form: &TaskForm) -> AppResult<Flash> {
    let input = TaskInput::parse(&form.task, form.category.as_deref())?;
    let task = TaskRepo::update(&state.pool, task_id, &UpdateTask::from(input))
        .await?
        .ok_or_else(|| not_found(task_id))?;

    tracing::info!(task_id = task.id, category = ?task.category, "Task updated");

    Ok(Flash::success("Task updated"))
}

/// POST /toggle/{id}
pub async fn toggle_task(State(state): State<AppState>, Path(task_id): Path<DbId>) -> Response {
    let outcome = toggle(&state, task_id).await;
    respond(&state, outcome, "/", "/")
}

async fn toggle(state: &AppState, task_id: DbId) -> AppResult<Flash> {
    let task = TaskRepo::toggle(&state.pool, task_id)
        .await?
        .ok_or_else(|| not_found(task_id))?;

    tracing::info!(task_id, completed = task.completed, "Task toggled");

    let message = if task.completed {
        "Task marked as done"
    } else {
        "Task marked as not done"
    };
    Ok(Flash::success(message))
}

/// POST /delete/{id}
pub async fn delete_task(State(state): State<AppState>, Path(task_id): Path<DbId>) -> Response {
    let outcome = delete(&state, task_id).await;
    respond(&state, outcome, "/", "/")
}

async fn delete(state: &AppState, task_id: DbId) -> AppResult<Flash> {
    if !TaskRepo::delete(&state.pool, task_id).await? {
        return Err(not_found(task_id));
    }

    tracing::info!(task_id, "Task deleted");

    Ok(Flash::success("Task deleted"))
}
