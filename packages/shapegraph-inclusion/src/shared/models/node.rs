//! Heap graph nodes
//!
//! A node is an abstract memory location (pointer node) or an abstract
//! numeric value (integer node). Nodes are owned by a [`HeapGraph`] arena and
//! referenced everywhere else by [`NodeId`].
//!
//! [`HeapGraph`]: super::HeapGraph

use serde::{Deserialize, Serialize};
use std::fmt;

use super::edge::ShapeEdge;

/// Opaque node identifier
///
/// Identifiers are only meaningful relative to one graph. The left and the
/// right graph of an inclusion check have independent id spaces; the
/// [`NodeEmbedding`](crate::features::inclusion::domain::NodeEmbedding)
/// relates them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u32);

impl NodeId {
    pub fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

impl From<u32> for NodeId {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

/// Type tag of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// Address of a memory block
    Ptr,
    /// Scalar value (predicate integer parameters, offsets)
    Int,
}

/// Allocation origin of the block a node denotes
///
/// Two points-to blocks can only be matched when their origins agree, except
/// in sub-memory mode where the check is suppressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllocOrigin {
    /// Not (yet) known to be allocated
    #[default]
    None,
    /// Stack variable
    Stack,
    /// Heap block from the given allocation region
    Heap(u32),
}

/// A node together with its (single) shape edge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeapNode {
    pub id: NodeId,
    pub kind: NodeKind,
    #[serde(default)]
    pub origin: AllocOrigin,
    #[serde(default)]
    pub edge: ShapeEdge,
}

impl HeapNode {
    pub fn new(id: NodeId, kind: NodeKind, origin: AllocOrigin) -> Self {
        Self {
            id,
            kind,
            origin,
            edge: ShapeEdge::Empty,
        }
    }

    /// True when the node carries a non-empty shape edge
    pub fn has_edge(&self) -> bool {
        !self.edge.is_empty()
    }
}
