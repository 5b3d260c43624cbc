//! Route definitions for the task list, mounted at the root.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::tasks;
use crate::state::AppState;

/// Task list routes.
///
/// ```text
/// GET    /                  -> index (optional ?category=)
/// POST   /add               -> add_task
/// POST   /delete/{id}       -> delete_task
/// POST   /toggle/{id}       -> toggle_task
/// GET    /edit/{id}         -> edit_form
/// POST   /edit/{id}         -> update_task
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(tasks::index))
        .route("/add", post(tasks::add_task))
        .route("/delete/{id}", post(tasks::delete_task))
        .route("/toggle/{id}", post(tasks::toggle_task))
        .route("/edit/{id}", get(tasks::edit_form).post(tasks::update_task))
}
