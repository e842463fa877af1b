//! Test data builders

use std::cell::RefCell;

use shapegraph_inclusion::{
    AllocOrigin, Cell, DefinitionUnfolder, EmptyPreference, HeapGraph, InclusionResult,
    InductiveEdge, NodeId, NodeKind, PredicateId, SegmentEdge, UnfoldAlternative, Unfolder,
};

pub const LIST: PredicateId = PredicateId(0);
pub const TREE_P: PredicateId = PredicateId(1);

/// Builder for heap graphs
#[derive(Debug, Default)]
pub struct GraphBuilder {
    graph: HeapGraph,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pointer node allocated in heap region 0 (the region unfolding uses)
    pub fn heap(&mut self) -> NodeId {
        self.graph.add_node(NodeKind::Ptr, AllocOrigin::Heap(0))
    }

    /// Pointer node with unknown origin
    pub fn var(&mut self) -> NodeId {
        self.graph.add_node(NodeKind::Ptr, AllocOrigin::None)
    }

    /// `node ↦ { offset: dest [size], ... }`
    pub fn points_to(&mut self, node: NodeId, cells: &[(i64, u32, NodeId)]) -> &mut Self {
        let cells = cells
            .iter()
            .map(|&(offset, size, dest)| Cell::new(offset, size, dest))
            .collect();
        self.graph.set_points_to(node, cells).unwrap();
        self
    }

    /// `node ↦ { 0: next }`
    pub fn next(&mut self, node: NodeId, next: NodeId) -> &mut Self {
        self.points_to(node, &[(0, 8, next)])
    }

    pub fn inductive(&mut self, node: NodeId, edge: InductiveEdge) -> &mut Self {
        self.graph.set_inductive(node, edge).unwrap();
        self
    }

    /// `node · list()`
    pub fn list(&mut self, node: NodeId) -> &mut Self {
        self.inductive(node, InductiveEdge::new(LIST))
    }

    /// `node · list() *= dest · list()`
    pub fn list_segment(&mut self, node: NodeId, dest: NodeId) -> &mut Self {
        self.graph.set_segment(node, SegmentEdge::new(LIST, dest)).unwrap();
        self
    }

    pub fn build(self) -> HeapGraph {
        self.graph
    }
}

/// `n` heap cells linked through offset 0, ending in an edgeless tail node
///
/// Returns the graph and its nodes in list order (tail last).
pub fn list_chain(n: usize) -> (HeapGraph, Vec<NodeId>) {
    let mut b = GraphBuilder::new();
    let mut nodes: Vec<NodeId> = (0..n).map(|_| b.heap()).collect();
    nodes.push(b.var());
    for pair in nodes.windows(2) {
        b.next(pair[0], pair[1]);
    }
    (b.build(), nodes)
}

/// Right graph holding a single `list` summary at node 0
pub fn list_summary() -> (HeapGraph, NodeId) {
    let mut b = GraphBuilder::new();
    let root = b.var();
    b.list(root);
    (b.build(), root)
}

/// Unfolder that records which nodes it was asked to split
pub struct RecordingUnfolder<'a> {
    inner: DefinitionUnfolder<'a>,
    pub calls: RefCell<Vec<(NodeId, EmptyPreference)>>,
}

impl<'a> RecordingUnfolder<'a> {
    pub fn new(inner: DefinitionUnfolder<'a>) -> Self {
        Self {
            inner,
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn unfolded_nodes(&self) -> Vec<NodeId> {
        self.calls.borrow().iter().map(|&(node, _)| node).collect()
    }
}

impl Unfolder for RecordingUnfolder<'_> {
    fn unfold(
        &self,
        submem: bool,
        preference: EmptyPreference,
        node: NodeId,
        graph: &HeapGraph,
    ) -> InclusionResult<Vec<UnfoldAlternative>> {
        self.calls.borrow_mut().push((node, preference));
        self.inner.unfold(submem, preference, node, graph)
    }
}
