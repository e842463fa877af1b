//! Search state of one inclusion check
//!
//! The state is threaded by value through every rule application. A choice
//! point clones it, so a failed branch never leaks into its siblings.

use std::collections::{BTreeMap, BTreeSet};
use tracing::trace;

use super::classifier::classify;
use super::embedding::NodeEmbedding;
use super::rule::Rule;
use super::worklist::RuleWorklist;
use crate::errors::{InclusionError, InclusionResult};
use crate::features::inclusion::ports::SearchContext;
use crate::shared::models::{
    HeapGraph, InductiveDef, LinExpr, NodeId, NumConstraint, PredicateId, PredicateRegistry,
    ShapeEdge,
};

#[derive(Debug, Clone)]
pub struct InclusionState<'a> {
    pub ctx: SearchContext<'a>,
    /// Left graph; only loses edges
    pub left: HeapGraph,
    /// Right graph; grows through unfolding and peeling
    pub right: HeapGraph,
    pub embedding: NodeEmbedding,
    pub worklist: RuleWorklist,
    /// Left nodes whose edge has been matched
    pub consumed: BTreeSet<NodeId>,
    /// Pure facts over right nodes still to be proven
    pub residual: Vec<NumConstraint>,
    /// Right nodes that may be bound to a left expression at discharge
    pub instantiable: BTreeSet<NodeId>,
    pub instantiation: BTreeMap<NodeId, LinExpr>,
    /// Sub-memory mode: allocation origins are not compared
    pub submem: bool,
    /// Require both graphs to be fully consumed
    pub emp_both: bool,
    /// Left nodes where matching stops
    pub hint: BTreeSet<NodeId>,
    /// Left nodes where right summaries must not be unfolded
    pub segment_ends: BTreeSet<NodeId>,
    /// Right edges set aside at hint nodes
    pub excluded: HeapGraph,
    pub success: bool,
    /// Nested case splits on the current branch
    pub depth: usize,
}

impl<'a> InclusionState<'a> {
    pub fn new(ctx: SearchContext<'a>, left: HeapGraph, right: HeapGraph) -> Self {
        Self {
            ctx,
            left,
            right,
            embedding: NodeEmbedding::new(),
            worklist: RuleWorklist::new(),
            consumed: BTreeSet::new(),
            residual: Vec::new(),
            instantiable: BTreeSet::new(),
            instantiation: BTreeMap::new(),
            submem: false,
            emp_both: true,
            hint: BTreeSet::new(),
            segment_ends: BTreeSet::new(),
            excluded: HeapGraph::new(),
            success: false,
            depth: 0,
        }
    }

    /// Queue the rule that currently applies at `(left, right)`, if any
    pub fn schedule(&mut self, left: NodeId, right: NodeId) {
        if let Some(kind) = classify(self, left, right) {
            let rule = Rule::new(kind, left, right);
            if self.worklist.push(rule) {
                trace!("scheduled {}", rule);
            }
        }
    }

    /// Record that right node `right` stands for left node `left`
    ///
    /// A right node already mapped elsewhere is accepted only when the left
    /// oracle proves both left nodes equal.
    pub fn merge_nodes(&mut self, left: NodeId, right: NodeId) -> InclusionResult<()> {
        match self.embedding.get(right) {
            Some(existing) if existing == left => Ok(()),
            Some(existing) => {
                if self.ctx.oracle.sat(&NumConstraint::equal(existing, left)) {
                    Ok(())
                } else {
                    Err(InclusionError::not_included(format!(
                        "{} maps to {} and cannot also stand for {}",
                        right, existing, left
                    )))
                }
            }
            None => {
                self.embedding.add(right, left)?;
                self.schedule(left, right);
                Ok(())
            }
        }
    }

    /// Merge argument lists pairwise
    pub fn merge_args(&mut self, left: &[NodeId], right: &[NodeId]) -> InclusionResult<()> {
        if left.len() != right.len() {
            return Err(InclusionError::fatal(format!(
                "argument arity mismatch: {} vs {}",
                left.len(),
                right.len()
            )));
        }
        for (&l, &r) in left.iter().zip(right) {
            self.merge_nodes(l, r)?;
        }
        Ok(())
    }

    pub fn left_edge(&self, node: NodeId) -> InclusionResult<&ShapeEdge> {
        Ok(self.left.edge(node)?)
    }

    pub fn right_edge(&self, node: NodeId) -> InclusionResult<&ShapeEdge> {
        Ok(self.right.edge(node)?)
    }

    /// Remove the edge of a left node and mark the node consumed
    pub fn consume_left(&mut self, node: NodeId) -> InclusionResult<ShapeEdge> {
        let edge = self.left.take_edge(node)?;
        self.consumed.insert(node);
        Ok(edge)
    }

    pub fn definition(&self, pred: PredicateId) -> InclusionResult<&'a InductiveDef> {
        let registry: &'a PredicateRegistry = self.ctx.registry;
        registry
            .get(pred)
            .ok_or_else(|| InclusionError::fatal(format!("unknown predicate {}", pred)))
    }
}
