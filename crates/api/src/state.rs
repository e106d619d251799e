use std::sync::Arc;

use kanban_db::DbPool;

use crate::config::ServerConfig;

/// State handed to every handler through `State<AppState>`.
#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    /// Read by the router builder for CORS origins and the request timeout.
    pub config: Arc<ServerConfig>,
}
