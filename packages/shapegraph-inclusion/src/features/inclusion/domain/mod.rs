//! Domain models for inclusion checking
//!
//! - NodeEmbedding: right → left node correspondence (grow-only)
//! - Rule / RuleWorklist: pending rewrite steps and their priorities
//! - classify: which rule applies at a node pair
//! - InclusionState: everything one search branch owns
//! - PartialInclusion / NodeMap: results returned to callers

pub mod classifier;
pub mod embedding;
pub mod outcome;
pub mod rule;
pub mod state;
pub mod worklist;

pub use classifier::classify;
pub use embedding::{EmbeddingError, NodeEmbedding};
pub use outcome::{NodeMap, PartialInclusion};
pub use rule::{Rule, RuleKind};
pub use state::InclusionState;
pub use worklist::RuleWorklist;
