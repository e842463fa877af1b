//! Ports (Interfaces) for inclusion checking
//!
//! The procedure only needs two collaborators from the surrounding analyzer:
//! - [`LeftOracle`]: numeric facts known about the left graph
//! - [`Unfolder`]: case splits of an inductive or segment edge
//!
//! Both are used through trait objects so one checker instance can serve
//! several abstract domains.

use std::fmt;

use crate::config::InclusionConfig;
use crate::errors::InclusionResult;
use crate::shared::models::{HeapGraph, NodeId, NumConstraint, PredicateRegistry};

/// Read-only numeric oracle over left-graph node values
pub trait LeftOracle {
    /// True when the constraint holds in every concretization of the left graph
    fn sat(&self, constraint: &NumConstraint) -> bool;

    /// True when `a` and `b` are provably distinct
    fn diseq(&self, a: NodeId, b: NodeId) -> bool;
}

/// Which cases of a predicate an unfolding should try first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EmptyPreference {
    PreferEmpty,
    PreferNonEmpty,
}

/// One case of an unfolding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnfoldAlternative {
    /// Right graph with the summary edge replaced by this case
    pub graph: HeapGraph,
    /// Pure facts of the case, over right-graph nodes
    pub constraints: Vec<NumConstraint>,
}

/// Case splitter for right-graph summary edges
pub trait Unfolder {
    /// Alternatives for the summary edge at `node`, in the order they should
    /// be tried. An empty list means the edge has no satisfiable case.
    fn unfold(
        &self,
        submem: bool,
        preference: EmptyPreference,
        node: NodeId,
        graph: &HeapGraph,
    ) -> InclusionResult<Vec<UnfoldAlternative>>;
}

/// Read-only handles shared by every branch of one check
#[derive(Clone, Copy)]
pub struct SearchContext<'a> {
    pub config: &'a InclusionConfig,
    pub registry: &'a PredicateRegistry,
    pub unfolder: &'a dyn Unfolder,
    pub oracle: &'a dyn LeftOracle,
}

impl fmt::Debug for SearchContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchContext")
            .field("config", self.config)
            .field("predicates", &self.registry.len())
            .finish_non_exhaustive()
    }
}
