//! DTO shared by the category and card reorder endpoints.

use serde::Deserialize;
use validator::Validate;
use kanban_core::error::CoreError;

/// DTO for `PUT /categories/reorder/{id}` and `PUT /cards/reorder/{id}`.
///
/// `order` is kept as raw JSON so that a missing, null or non-integer value
/// is reported as an invalid target rather than a generic body error.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct ReorderInput {
    pub order: Option<serde_json::Value>,
}

impl ReorderInput {
    /// The validated 1-based target position.
    pub fn target(&self) -> Result<usize, CoreError> {
        super::order_target(self.order.as_ref())
    }
}
