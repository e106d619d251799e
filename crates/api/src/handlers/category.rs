//! Handlers for the `/categories` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use kanban_core::error::CoreError;
use kanban_core::types::DbId;
use kanban_db::models::category::{CreateCategory, RenameCategory};
use kanban_db::models::reorder::ReorderInput;
use kanban_db::repositories::CategoryRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::{ApiPath, ValidatedJson};
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Category",
        id,
    })
}

/// GET /categories
///
/// List every category in board order.
pub async fn list(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let categories = CategoryRepo::list(&state.pool).await?;
    Ok(Json(categories))
}

/// GET /categories/{id}
///
/// Returns a single-element array.
pub async fn get_by_id(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let category = CategoryRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(vec![category]))
}

/// POST /categories
pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateCategory>,
) -> AppResult<impl IntoResponse> {
    let category = CategoryRepo::create(&state.pool, &input).await?;
    tracing::info!(category_id = category.id, "Category created");
    Ok((StatusCode::CREATED, Json(category)))
}

/// PUT /categories/{id}
///
/// Rename a category.
pub async fn rename(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
    ValidatedJson(input): ValidatedJson<RenameCategory>,
) -> AppResult<impl IntoResponse> {
    let category = CategoryRepo::rename(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(category))
}

/// PUT /categories/reorder/{id}
///
/// Move a category to a 1-based position; every category is renumbered.
pub async fn reorder(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
    ValidatedJson(input): ValidatedJson<ReorderInput>,
) -> AppResult<impl IntoResponse> {
    let target = input.target()?;
    let category = CategoryRepo::reorder(&state.pool, id, target)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(
        category_id = id,
        position = target,
        order = category.order,
        "Category reordered"
    );
    Ok(Json(category))
}

/// DELETE /categories/{id}
///
/// Cards still in the category are detached, not deleted.
pub async fn delete(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<impl IntoResponse> {
    if !CategoryRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    tracing::info!(category_id = id, "Category deleted");
    Ok(StatusCode::OK)
}
