use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The target row does not exist (read, update or delete by id).
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// A referenced row (e.g. a card's category) does not exist.
    #[error("Bad reference: {entity} with id {id} does not exist")]
    BadReference { entity: &'static str, id: DbId },

    /// A requested sibling position is missing, non-positive or out of range.
    #[error("Invalid order target: {0}")]
    InvalidOrderTarget(String),

    #[error("Validation failed: {0}")]
    Validation(String),
}
