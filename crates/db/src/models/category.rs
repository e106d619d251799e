//! Category (board column) entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;
use kanban_core::types::DbId;

/// A row from the `category` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Category {
    pub id: DbId,
    pub name: String,
    pub order: i32,
}

/// DTO for creating a category. Order is never client-supplied on create.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CreateCategory {
    #[validate(custom(function = "super::name_rule"))]
    pub name: String,
}

/// DTO for renaming a category.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct RenameCategory {
    #[validate(custom(function = "super::name_rule"))]
    pub name: String,
}
