//! Application layer for inclusion checking

pub mod checker;
pub mod query;

pub use checker::InclusionChecker;
pub use query::InclusionQuery;
