//! Kanban board API server library.
//!
//! Everything the binary wires together lives here so the integration tests
//! drive exactly the same router.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod routes;
pub mod state;
