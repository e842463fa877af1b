//! Shared module - Common types
//!
//! Types shared by every feature: the heap graph model, predicates and
//! numeric constraints. No dependency on the inclusion engine.

pub mod models;

// Re-exports for convenience
pub use models::*;
