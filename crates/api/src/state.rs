use std::sync::Arc;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: the pool is reference-counted internally and the
/// configuration sits behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: tasklist_db::DbPool,
    /// Server configuration (session secret, timeouts).
    pub config: Arc<ServerConfig>,
}
