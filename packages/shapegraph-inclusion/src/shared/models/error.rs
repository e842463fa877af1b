//! Heap graph errors
//!
//! Raised by the graph primitives when a caller refers to a node that does not
//! exist or breaks the one-edge-per-node invariant. For the inclusion engine
//! these are always ill-formed input, never a legitimate "not included".

use thiserror::Error;

use super::node::NodeId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// Node id not present in the graph
    #[error("unknown node {0}")]
    UnknownNode(NodeId),

    /// Node id already allocated
    #[error("node {0} already exists")]
    DuplicateNode(NodeId),

    /// No id is left after this one for fresh nodes
    #[error("node {0} exhausts the id space")]
    IdOverflow(NodeId),

    /// Attempt to attach a second edge to a node
    #[error("node {node} already carries a {existing} edge")]
    EdgeOccupied { node: NodeId, existing: &'static str },

    /// Node merge requires an empty target
    #[error("cannot merge {from} into {into}: both carry edges")]
    MergeConflict { from: NodeId, into: NodeId },
}

/// Result type alias for graph primitives
pub type GraphResult<T> = std::result::Result<T, GraphError>;
