//! Ordered sibling lists.
//!
//! A sibling scope is a set of rows sharing a parent (all categories, or all
//! cards of one category) whose `order` column must form `1..=N`. A move
//! removes the entity from the scope, splices it back at the requested
//! position and renumbers the whole scope from scratch.

use crate::error::CoreError;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Order assigned to newly created rows so they sort after every placed
/// sibling until the scope is next renumbered.
pub const SENTINEL_ORDER: i32 = 999_999;

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate a requested 1-based target position.
///
/// Missing, zero and negative values are rejected, as are values that do not
/// fit the `order` column. Positions beyond the end of the scope are accepted
/// here and clamped by [`reinsert`].
pub fn validate_target_position(order: Option<i64>) -> Result<usize, CoreError> {
    let Some(order) = order else {
        return Err(CoreError::InvalidOrderTarget(
            "order is required".to_string(),
        ));
    };
    if order < 1 {
        return Err(CoreError::InvalidOrderTarget(format!(
            "order must be >= 1, got {order}"
        )));
    }
    if order > i64::from(i32::MAX) {
        return Err(CoreError::InvalidOrderTarget(format!(
            "order must be <= {}, got {order}",
            i32::MAX
        )));
    }
    Ok(order as usize)
}

// ---------------------------------------------------------------------------
// Algorithm
// ---------------------------------------------------------------------------

/// Splice `moving` into `siblings` so that it lands at 1-based `target`.
///
/// `siblings` must already be sorted and must not contain `moving`. A target
/// past the end appends.
pub fn reinsert<T>(mut siblings: Vec<T>, moving: T, target: usize) -> Vec<T> {
    let index = target.saturating_sub(1).min(siblings.len());
    siblings.insert(index, moving);
    siblings
}

/// Assign dense 1-based orders to `ids` in sequence order.
pub fn dense_orders<I>(ids: I) -> Vec<(DbId, i32)>
where
    I: IntoIterator<Item = DbId>,
{
    ids.into_iter()
        .zip(1..)
        .collect()
}

/// Compute the full `(id, order)` assignment for moving `moving_id` to
/// `target` within a scope whose other members are `sibling_ids` (sorted,
/// `moving_id` excluded).
pub fn plan_move(sibling_ids: Vec<DbId>, moving_id: DbId, target: usize) -> Vec<(DbId, i32)> {
    dense_orders(reinsert(sibling_ids, moving_id, target))
}

/// Whether `orders` is exactly `1..=N` in some permutation.
pub fn is_dense(orders: &[i32]) -> bool {
    let mut sorted = orders.to_vec();
    sorted.sort_unstable();
    sorted.iter().zip(1..).all(|(&o, expected)| o == expected)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
