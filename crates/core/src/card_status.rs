//! Card status rules.
//!
//! `status` is free text. Setting it takes the card off the board: the
//! category reference is cleared in the same write.

/// The status value clients send when archiving a card.
pub const ARCHIVED_STATUS: &str = "archived";

/// Whether an update carrying `status` must detach the card from its category.
///
/// Any supplied non-blank status detaches, not only [`ARCHIVED_STATUS`].
pub fn detaches_category(status: Option<&str>) -> bool {
    status.is_some_and(|s| !s.trim().is_empty())
}
