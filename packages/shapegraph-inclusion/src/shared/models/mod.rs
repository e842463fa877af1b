//! Shared models
//!
//! The heap graph (nodes, shape edges), inductive predicate definitions and
//! the numeric constraint language used by both graphs of an inclusion check.

pub mod constraint;
mod edge;
mod error;
mod heap_graph;
mod node;
pub mod predicate;

pub use constraint::{CmpOp, LinExpr, NumConstraint};
pub use edge::{Block, Cell, InductiveEdge, Offset, SegmentEdge, ShapeEdge};
pub use error::{GraphError, GraphResult};
pub use heap_graph::HeapGraph;
pub use node::{AllocOrigin, HeapNode, NodeId, NodeKind};
pub use predicate::{
    InductiveDef, InductiveRule, PredicateId, PredicateRegistry, RuleCall, RuleCell, RulePure,
    RuleTerm,
};
