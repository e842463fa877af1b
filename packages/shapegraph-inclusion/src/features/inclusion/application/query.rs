//! Inputs of one inclusion check

use std::collections::BTreeSet;

use crate::features::inclusion::domain::NodeMap;
use crate::shared::models::{HeapGraph, NodeId};

/// Graphs and seeds of an inclusion check
///
/// # Example
/// ```rust,ignore
/// let query = InclusionQuery::new(left, right)
///     .map(right_root, left_root)
///     .hint([left_end]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct InclusionQuery {
    /// The graph that must be described
    pub left: HeapGraph,
    /// The candidate description
    pub right: HeapGraph,
    /// Known right → left correspondence (roots, variables)
    pub initial_map: NodeMap,
    /// Left nodes where matching stops
    pub hint: BTreeSet<NodeId>,
    /// Left nodes where right summaries are never unfolded
    pub segment_ends: BTreeSet<NodeId>,
    /// Right nodes the discharge may bind to left expressions
    pub instantiable: BTreeSet<NodeId>,
    /// Compare sub-memories: allocation origins are ignored
    pub submem: bool,
}

impl InclusionQuery {
    pub fn new(left: HeapGraph, right: HeapGraph) -> Self {
        Self {
            left,
            right,
            ..Self::default()
        }
    }

    /// Builder: Seed `right ↦ left`
    pub fn map(mut self, right: NodeId, left: NodeId) -> Self {
        self.initial_map.insert(right, left);
        self
    }

    /// Builder: Replace the initial correspondence
    pub fn with_map(mut self, map: NodeMap) -> Self {
        self.initial_map = map;
        self
    }

    /// Builder: Set hint nodes
    pub fn hint(mut self, nodes: impl IntoIterator<Item = NodeId>) -> Self {
        self.hint = nodes.into_iter().collect();
        self
    }

    /// Builder: Set segment ends
    pub fn segment_ends(mut self, nodes: impl IntoIterator<Item = NodeId>) -> Self {
        self.segment_ends = nodes.into_iter().collect();
        self
    }

    /// Builder: Set instantiable right nodes
    pub fn instantiable(mut self, nodes: impl IntoIterator<Item = NodeId>) -> Self {
        self.instantiable = nodes.into_iter().collect();
        self
    }

    /// Builder: Set sub-memory mode
    pub fn submem(mut self, v: bool) -> Self {
        self.submem = v;
        self
    }
}
