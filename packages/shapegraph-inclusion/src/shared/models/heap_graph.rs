//! Heap graph arena
//!
//! Nodes live in a single ordered map keyed by [`NodeId`]; edges refer to
//! other nodes by id only, so cyclic shapes need no shared ownership.
//! Iteration order is the id order, which keeps every search over the graph
//! deterministic.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::edge::{Block, Cell, InductiveEdge, SegmentEdge, ShapeEdge};
use super::error::{GraphError, GraphResult};
use super::node::{AllocOrigin, HeapNode, NodeId, NodeKind};

/// Symbolic heap graph
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "HeapGraphRepr", into = "HeapGraphRepr")]
pub struct HeapGraph {
    nodes: BTreeMap<NodeId, HeapNode>,
    next_id: u32,
}

impl HeapGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a node with a fresh id
    pub fn add_node(&mut self, kind: NodeKind, origin: AllocOrigin) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.nodes.insert(id, HeapNode::new(id, kind, origin));
        id
    }

    /// Allocate a node with a caller-chosen id
    pub fn add_node_with_id(
        &mut self,
        id: NodeId,
        kind: NodeKind,
        origin: AllocOrigin,
    ) -> GraphResult<NodeId> {
        if self.nodes.contains_key(&id) {
            return Err(GraphError::DuplicateNode(id));
        }
        let after = id.0.checked_add(1).ok_or(GraphError::IdOverflow(id))?;
        self.nodes.insert(id, HeapNode::new(id, kind, origin));
        self.next_id = self.next_id.max(after);
        Ok(id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn node(&self, id: NodeId) -> GraphResult<&HeapNode> {
        self.nodes.get(&id).ok_or(GraphError::UnknownNode(id))
    }

    fn node_mut(&mut self, id: NodeId) -> GraphResult<&mut HeapNode> {
        self.nodes.get_mut(&id).ok_or(GraphError::UnknownNode(id))
    }

    pub fn edge(&self, id: NodeId) -> GraphResult<&ShapeEdge> {
        self.node(id).map(|n| &n.edge)
    }

    /// Attach an edge to a node that currently has none
    pub fn set_edge(&mut self, id: NodeId, edge: ShapeEdge) -> GraphResult<()> {
        let node = self.node_mut(id)?;
        if node.has_edge() && !edge.is_empty() {
            return Err(GraphError::EdgeOccupied {
                node: id,
                existing: node.edge.kind_name(),
            });
        }
        node.edge = edge;
        Ok(())
    }

    /// Detach and return the edge of a node, leaving it `Empty`
    pub fn take_edge(&mut self, id: NodeId) -> GraphResult<ShapeEdge> {
        Ok(std::mem::take(&mut self.node_mut(id)?.edge))
    }

    pub fn set_origin(&mut self, id: NodeId, origin: AllocOrigin) -> GraphResult<()> {
        self.node_mut(id)?.origin = origin;
        Ok(())
    }

    pub fn set_points_to(&mut self, id: NodeId, cells: Vec<Cell>) -> GraphResult<()> {
        self.set_edge(id, ShapeEdge::PointsTo(Block::new(cells)))
    }

    pub fn set_inductive(&mut self, id: NodeId, edge: InductiveEdge) -> GraphResult<()> {
        self.set_edge(id, ShapeEdge::Inductive(edge))
    }

    pub fn set_segment(&mut self, id: NodeId, edge: SegmentEdge) -> GraphResult<()> {
        self.set_edge(id, ShapeEdge::Segment(edge))
    }

    /// Identify `from` with `into`: the edge of `from` (if any) moves to
    /// `into`, every reference is redirected, and `from` disappears.
    pub fn merge_into(&mut self, from: NodeId, into: NodeId) -> GraphResult<()> {
        if from == into {
            return Ok(());
        }
        let from_edge = self.node(from)?.edge.clone();
        let into_node = self.node(into)?;
        if into_node.has_edge() && !from_edge.is_empty() {
            return Err(GraphError::MergeConflict { from, into });
        }
        let removed = self
            .nodes
            .remove(&from)
            .ok_or(GraphError::UnknownNode(from))?;
        let target = self.node_mut(into)?;
        if !removed.edge.is_empty() {
            target.edge = removed.edge;
        }
        if target.origin == AllocOrigin::None {
            target.origin = removed.origin;
        }
        for node in self.nodes.values_mut() {
            node.edge.rename(from, into);
        }
        Ok(())
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of non-empty edges
    pub fn edge_count(&self) -> usize {
        self.nodes.values().filter(|n| n.has_edge()).count()
    }

    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.keys().copied()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &HeapNode> {
        self.nodes.values()
    }
}

/// Serialized form: a flat node list
#[derive(Debug, Clone, Serialize, Deserialize)]
struct HeapGraphRepr {
    nodes: Vec<HeapNode>,
}

impl TryFrom<HeapGraphRepr> for HeapGraph {
    type Error = GraphError;

    fn try_from(repr: HeapGraphRepr) -> GraphResult<Self> {
        let mut graph = HeapGraph::new();
        for node in repr.nodes {
            let id = graph.add_node_with_id(node.id, node.kind, node.origin)?;
            graph.node_mut(id)?.edge = node.edge;
        }
        Ok(graph)
    }
}

impl From<HeapGraph> for HeapGraphRepr {
    fn from(graph: HeapGraph) -> Self {
        Self {
            nodes: graph.nodes.into_values().collect(),
        }
    }
}
