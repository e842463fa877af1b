//! Shape edges
//!
//! ```text
//! Edge ::= emp                                 // Empty
//!        | α ↦ { o₁: β₁ [s₁], ... }            // PointsTo
//!        | α · P(π⃗ | ι⃗)                        // Inductive
//!        | α · P(π⃗ | ι⃗) *= β · P(π⃗' | ι⃗')       // Segment, hole β
//! ```
//!
//! Every edge is owned by exactly one node (the source `α`). Destinations and
//! parameters are node ids looked up in the same graph.

use serde::{Deserialize, Serialize};

use super::node::NodeId;
use super::predicate::PredicateId;

/// Symbolic byte offset: `constant` or `symbol + constant`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Offset {
    pub constant: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<NodeId>,
}

impl Offset {
    pub fn constant(constant: i64) -> Self {
        Self {
            constant,
            symbol: None,
        }
    }

    pub fn symbolic(symbol: NodeId, constant: i64) -> Self {
        Self {
            constant,
            symbol: Some(symbol),
        }
    }

    pub fn zero() -> Self {
        Self::constant(0)
    }
}

/// One occupied fragment of a block: `[offset, offset + size) ↦ dest + dest_offset`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub offset: Offset,
    pub size: u32,
    pub dest: NodeId,
    #[serde(default)]
    pub dest_offset: Offset,
}

impl Cell {
    pub fn new(offset: i64, size: u32, dest: NodeId) -> Self {
        Self {
            offset: Offset::constant(offset),
            size,
            dest,
            dest_offset: Offset::zero(),
        }
    }
}

/// Points-to block: occupied fragments ordered by offset
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Block {
    pub cells: Vec<Cell>,
}

impl Block {
    pub fn new(mut cells: Vec<Cell>) -> Self {
        cells.sort_by_key(|c| (c.offset.constant, c.offset.symbol));
        Self { cells }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Inductive predicate instance `α · P(ptr_args | int_args)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InductiveEdge {
    pub pred: PredicateId,
    #[serde(default)]
    pub ptr_args: Vec<NodeId>,
    #[serde(default)]
    pub int_args: Vec<NodeId>,
}

impl InductiveEdge {
    pub fn new(pred: PredicateId) -> Self {
        Self {
            pred,
            ptr_args: Vec::new(),
            int_args: Vec::new(),
        }
    }

    pub fn with_args(pred: PredicateId, ptr_args: Vec<NodeId>, int_args: Vec<NodeId>) -> Self {
        Self {
            pred,
            ptr_args,
            int_args,
        }
    }
}

/// Segment `α · P(src) *= dest · P(dst)`: a predicate instance with a hole at `dest`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentEdge {
    pub pred: PredicateId,
    #[serde(default)]
    pub src_ptr_args: Vec<NodeId>,
    #[serde(default)]
    pub src_int_args: Vec<NodeId>,
    pub dest: NodeId,
    #[serde(default)]
    pub dst_ptr_args: Vec<NodeId>,
    #[serde(default)]
    pub dst_int_args: Vec<NodeId>,
}

impl SegmentEdge {
    /// Segment of a parameterless predicate
    pub fn new(pred: PredicateId, dest: NodeId) -> Self {
        Self {
            pred,
            src_ptr_args: Vec::new(),
            src_int_args: Vec::new(),
            dest,
            dst_ptr_args: Vec::new(),
            dst_int_args: Vec::new(),
        }
    }
}

/// The shape edge carried by a node
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ShapeEdge {
    #[default]
    Empty,
    PointsTo(Block),
    Inductive(InductiveEdge),
    Segment(SegmentEdge),
}

impl ShapeEdge {
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Inductive or segment edge
    pub fn is_summary(&self) -> bool {
        matches!(self, Self::Inductive(_) | Self::Segment(_))
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Empty => "emp",
            Self::PointsTo(_) => "pt",
            Self::Inductive(_) => "ind",
            Self::Segment(_) => "seg",
        }
    }

    /// Replace every reference to `from` by `to`
    pub fn rename(&mut self, from: NodeId, to: NodeId) {
        let swap = |n: &mut NodeId| {
            if *n == from {
                *n = to;
            }
        };
        match self {
            Self::Empty => {}
            Self::PointsTo(block) => {
                for cell in &mut block.cells {
                    swap(&mut cell.dest);
                    if let Some(s) = cell.offset.symbol.as_mut() {
                        swap(s);
                    }
                    if let Some(s) = cell.dest_offset.symbol.as_mut() {
                        swap(s);
                    }
                }
            }
            Self::Inductive(ind) => {
                ind.ptr_args.iter_mut().chain(ind.int_args.iter_mut()).for_each(swap);
            }
            Self::Segment(seg) => {
                swap(&mut seg.dest);
                seg.src_ptr_args
                    .iter_mut()
                    .chain(seg.src_int_args.iter_mut())
                    .chain(seg.dst_ptr_args.iter_mut())
                    .chain(seg.dst_int_args.iter_mut())
                    .for_each(swap);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_sorted_by_offset() {
        let block = Block::new(vec![Cell::new(8, 8, NodeId(2)), Cell::new(0, 8, NodeId(1))]);
        assert_eq!(block.cells[0].dest, NodeId(1));
        assert_eq!(block.cells[1].offset, Offset::constant(8));
        assert_eq!(block.len(), 2);
    }

    #[test]
    fn test_segment_rename() {
        let mut edge = ShapeEdge::Segment(SegmentEdge {
            pred: PredicateId(0),
            src_ptr_args: vec![NodeId(5)],
            src_int_args: vec![],
            dest: NodeId(3),
            dst_ptr_args: vec![NodeId(3)],
            dst_int_args: vec![],
        });
        edge.rename(NodeId(3), NodeId(9));
        match edge {
            ShapeEdge::Segment(seg) => {
                assert_eq!(seg.src_ptr_args, vec![NodeId(5)]);
                assert_eq!(seg.dest, NodeId(9));
                assert_eq!(seg.dst_ptr_args, vec![NodeId(9)]);
            }
            other => panic!("expected a segment, got {:?}", other),
        }
    }

    #[test]
    fn test_summary_kinds() {
        assert!(ShapeEdge::Inductive(InductiveEdge::new(PredicateId(0))).is_summary());
        assert!(!ShapeEdge::PointsTo(Block::default()).is_summary());
        assert_eq!(ShapeEdge::Empty.kind_name(), "emp");
    }
}
