//! Route definitions for categories.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::category;
use crate::state::AppState;

/// Routes mounted at `/categories`.
///
/// ```text
/// GET    /               -> list
/// POST   /               -> create
/// GET    /{id}           -> get_by_id
/// PUT    /{id}           -> rename
/// DELETE /{id}           -> delete
/// PUT    /reorder/{id}   -> reorder
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(category::list).post(category::create))
        .route(
            "/{id}",
            get(category::get_by_id)
                .put(category::rename)
                .delete(category::delete),
        )
        .route("/reorder/{id}", put(category::reorder))
}
