//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - `Deserialize` + `Validate` request DTOs for inserts and patches

pub mod card;
pub mod category;
pub mod reorder;

use std::borrow::Cow;

use kanban_core::error::CoreError;
use kanban_core::ordering::validate_target_position;
use serde_json::Value;
use validator::ValidationError;

/// `validator` adapter for [`kanban_core::validation::validate_name`].
pub(crate) fn name_rule(value: &str) -> Result<(), ValidationError> {
    kanban_core::validation::validate_name("name", value).map_err(|err| {
        let message = match err {
            kanban_core::error::CoreError::Validation(msg) => msg,
            other => other.to_string(),
        };
        ValidationError::new("name").with_message(Cow::Owned(message))
    })
}

/// Rejects blank optional text such as `status`.
pub(crate) fn non_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank")
            .with_message(Cow::Borrowed("value must not be blank")));
    }
    Ok(())
}

/// Turn a raw JSON `order` into a target position.
///
/// Absent and `null` count as missing. Anything that is not a JSON integer
/// (strings, fractions, booleans) is an invalid target, the same class as
/// zero or negative values.
pub(crate) fn order_target(order: Option<&Value>) -> Result<usize, CoreError> {
    match order {
        None | Some(Value::Null) => validate_target_position(None),
        Some(Value::Number(n)) if n.is_i64() => validate_target_position(n.as_i64()),
        // Integers above i64::MAX are out of range for the column anyway.
        Some(Value::Number(n)) if n.is_u64() => validate_target_position(Some(i64::MAX)),
        Some(other) => Err(CoreError::InvalidOrderTarget(format!(
            "order must be an integer, got {other}"
        ))),
    }
}
