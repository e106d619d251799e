//! Handler for the legacy `/api/todos` listing.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use kanban_db::repositories::CardRepo;

use crate::error::AppResult;
use crate::state::AppState;

/// GET /api/todos
///
/// Every card, without its category attached.
pub async fn list(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let cards = CardRepo::list(&state.pool).await?;
    Ok(Json(cards))
}
