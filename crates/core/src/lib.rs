//! Domain logic for the kanban board backend.
//!
//! Everything in this crate is pure: no database, no HTTP. The persistence
//! and API layers call into these modules for ordering and validation rules.

pub mod card_status;
pub mod error;
pub mod ordering;
pub mod types;
pub mod validation;
