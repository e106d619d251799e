//! Card entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;
use kanban_core::error::CoreError;
use kanban_core::types::{DbId, Timestamp};

use crate::models::category::Category;

/// A row from the `card` table.
///
/// `category_id` is `None` for detached (archived) cards, which sit outside
/// every ordered scope.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Card {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub order: i32,
    pub status: Option<String>,
    pub category_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A card together with its category, if attached.
#[derive(Debug, Clone, Serialize)]
pub struct CardWithCategory {
    #[serde(flatten)]
    pub card: Card,
    pub category: Option<Category>,
}

/// DTO for creating a card. Attachment to a category is mandatory.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CreateCard {
    #[serde(rename = "categoryId")]
    pub category_id: DbId,
    #[validate(custom(function = "super::name_rule"))]
    pub name: String,
    pub description: Option<String>,
}

/// DTO for a partial card update. Any supplied `status` detaches the card.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct UpdateCard {
    #[validate(custom(function = "super::name_rule"))]
    pub name: Option<String>,
    pub description: Option<String>,
    #[validate(custom(function = "super::non_blank"))]
    pub status: Option<String>,
}

/// DTO for `PUT /cards/categorize/{id}`: move a card into another category
/// at a given position.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CategorizeCard {
    #[serde(rename = "categoryId")]
    pub category_id: DbId,
    pub order: Option<serde_json::Value>,
}

impl CategorizeCard {
    /// The validated 1-based position within the new category.
    pub fn target(&self) -> Result<usize, CoreError> {
        super::order_target(self.order.as_ref())
    }
}
