//! # Shape Graph Inclusion
//!
//! Decides whether a right heap graph describes (a part of) a left heap
//! graph, producing the node correspondence that witnesses it:
//! - **Embedding**: grow-only right → left node map
//! - **Rule loop**: pt-pt, ind-ind, seg-seg (with peeling), seg-ind,
//!   void-seg and stop rewrites, prioritized and deduplicated
//! - **Backtracking**: case splits on right inductives and segments,
//!   first successful branch wins
//! - **Discharge**: residual numeric facts proven by the left oracle
//!
//! ## References
//! - Chang, Rival, Necula "Shape Analysis with Structural Invariant Checkers" (SAS 2007)
//! - Chang, Rival "Relational Inductive Shape Analysis" (POPL 2008)
//!
//! ## Usage
//! ```text
//! use shapegraph_inclusion::features::inclusion::{
//!     DefinitionUnfolder, FactOracle, InclusionChecker, InclusionQuery,
//! };
//!
//! let registry = PredicateRegistry::with_list();
//! let unfolder = DefinitionUnfolder::new(&registry);
//! let checker = InclusionChecker::new(InclusionConfig::default(), &registry, &unfolder)?;
//!
//! let oracle = FactOracle::from_graph(&left);
//! let map = checker.check_inclusion(InclusionQuery::new(left, right).map(r, l), &oracle)?;
//! ```

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod ports;

// Re-exports for public API
pub use application::{InclusionChecker, InclusionQuery};
pub use domain::{
    EmbeddingError, InclusionState, NodeEmbedding, NodeMap, PartialInclusion, Rule, RuleKind,
    RuleWorklist,
};
pub use infrastructure::{DefinitionUnfolder, FactOracle};
pub use ports::{EmptyPreference, LeftOracle, SearchContext, UnfoldAlternative, Unfolder};
