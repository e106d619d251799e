//! Handlers for the `/cards` resource.
//!
//! Cards are ordered within their category. Archiving (any status update)
//! and deletion take a card out of its category; categorize moves it into
//! another one at a given position.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use kanban_core::error::CoreError;
use kanban_core::types::DbId;
use kanban_db::models::card::{CategorizeCard, CreateCard, UpdateCard};
use kanban_db::models::reorder::ReorderInput;
use kanban_db::repositories::{CardRepo, CategoryRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::{ApiPath, ValidatedJson};
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Card", id })
}

fn unknown_category(id: DbId) -> AppError {
    AppError::Core(CoreError::BadReference {
        entity: "Category",
        id,
    })
}

/// GET /cards
///
/// List every card with its category attached.
pub async fn list(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let cards = CardRepo::list_with_category(&state.pool).await?;
    Ok(Json(cards))
}

/// GET /cards/{id}
///
/// Returns a single-element array.
pub async fn get_by_id(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let card = CardRepo::find_by_id_with_category(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(vec![card]))
}

/// POST /cards
///
/// The category must exist; otherwise nothing is stored.
pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateCard>,
) -> AppResult<impl IntoResponse> {
    let card = CardRepo::create(&state.pool, &input)
        .await?
        .ok_or_else(|| unknown_category(input.category_id))?;
    tracing::info!(card_id = card.id, category_id = input.category_id, "Card created");
    Ok((StatusCode::CREATED, Json(card)))
}

/// PUT /cards/{id}
///
/// Partial update of name, description and status. A status detaches the
/// card from its category.
pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
    ValidatedJson(input): ValidatedJson<UpdateCard>,
) -> AppResult<impl IntoResponse> {
    let card = CardRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    if input.status.is_some() {
        tracing::info!(card_id = id, status = ?card.status, "Card detached by status update");
    }
    Ok(Json(card))
}

/// PUT /cards/reorder/{id}
///
/// Move a card to a 1-based position within its current category.
pub async fn reorder(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
    ValidatedJson(input): ValidatedJson<ReorderInput>,
) -> AppResult<impl IntoResponse> {
    let target = input.target()?;

    let card = CardRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    let category_id = card.category_id.ok_or_else(|| {
        AppError::Core(CoreError::Validation(format!(
            "Card {id} is not attached to a category"
        )))
    })?;

    let card = CardRepo::reorder(&state.pool, id, category_id, target)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(
        card_id = id,
        category_id,
        position = target,
        order = card.order,
        "Card reordered"
    );
    Ok(Json(card))
}

/// PUT /cards/categorize/{id}
///
/// Attach a card to a category at a 1-based position in one transaction.
pub async fn categorize(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
    ValidatedJson(input): ValidatedJson<CategorizeCard>,
) -> AppResult<impl IntoResponse> {
    let target = input.target()?;

    CategoryRepo::find_by_id(&state.pool, input.category_id)
        .await?
        .ok_or_else(|| unknown_category(input.category_id))?;

    let card = CardRepo::categorize(&state.pool, id, input.category_id, target)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(
        card_id = id,
        category_id = input.category_id,
        position = target,
        order = card.order,
        "Card categorized"
    );
    Ok(Json(card))
}

/// DELETE /cards/{id}
pub async fn delete(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<impl IntoResponse> {
    if !CardRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    tracing::info!(card_id = id, "Card deleted");
    Ok(StatusCode::OK)
}
