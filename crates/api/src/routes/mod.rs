pub mod card;
pub mod category;
pub mod health;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the board route tree.
///
/// Route hierarchy:
///
/// ```text
/// /categories                       list, create
/// /categories/{id}                  get, rename, delete
/// /categories/reorder/{id}          reorder (PUT)
///
/// /cards                            list (with category), create
/// /cards/{id}                       get, update, delete
/// /cards/reorder/{id}               reorder within category (PUT)
/// /cards/categorize/{id}            move to category at position (PUT)
///
/// /api/todos                        legacy card listing (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/categories", category::router())
        .nest("/cards", card::router())
        .route("/api/todos", get(handlers::todos::list))
}
