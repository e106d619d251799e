//! Route definitions for cards.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::card;
use crate::state::AppState;

/// Routes mounted at `/cards`.
///
/// ```text
/// GET    /                  -> list
/// POST   /                  -> create
/// GET    /{id}              -> get_by_id
/// PUT    /{id}              -> update
/// DELETE /{id}              -> delete
/// PUT    /reorder/{id}      -> reorder
/// PUT    /categorize/{id}   -> categorize
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(card::list).post(card::create))
        .route(
            "/{id}",
            get(card::get_by_id).put(card::update).delete(card::delete),
        )
        .route("/reorder/{id}", put(card::reorder))
        .route("/categorize/{id}", put(card::categorize))
}
