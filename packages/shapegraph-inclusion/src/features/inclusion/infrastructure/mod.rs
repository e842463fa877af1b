//! Infrastructure layer for inclusion checking
//!
//! - **rules**: one local rewrite per rule kind
//! - **engine**: rule loop, backtracking unfolding search, unfold-on-failure retry
//! - **discharge**: residual numeric obligations
//! - **FactOracle**: union-find based `LeftOracle`
//! - **DefinitionUnfolder**: `Unfolder` driven by a predicate registry

pub mod definition_unfolder;
pub mod discharge;
pub mod engine;
pub mod fact_oracle;
pub mod rules;
pub mod union_find;

pub use definition_unfolder::DefinitionUnfolder;
pub use discharge::discharge;
pub use engine::{saturate, search};
pub use fact_oracle::FactOracle;
pub use rules::apply_rule;
pub use union_find::NodeUnionFind;
