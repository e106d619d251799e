//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod card_repo;
pub mod category_repo;
pub mod sibling_order;

pub use card_repo::CardRepo;
pub use category_repo::CategoryRepo;
pub use sibling_order::SiblingScope;
