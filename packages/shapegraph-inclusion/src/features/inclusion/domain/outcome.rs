//! Results handed back to callers

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::shared::models::{HeapGraph, InductiveEdge, LinExpr, NodeId};

/// Witnessing correspondence right node → left node
pub type NodeMap = BTreeMap<NodeId, NodeId>;

/// Outcome of partial inclusion (join / widening support)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum PartialInclusion {
    /// The right graph does not describe (part of) the left one
    NotIncluded,

    /// The left graph, minus the consumed part, folds back into the
    /// inductive the caller searched for
    IncludedAsInductive { left: HeapGraph },

    /// Inclusion stopped at a hint node: the consumed left part is a segment
    /// ending at `hole`, and `edge` is the right inductive edge found there
    IncludedAsSegment {
        left: HeapGraph,
        hole: NodeId,
        edge: InductiveEdge,
        map: NodeMap,
    },

    /// The right graph matched a subset of the left one
    IncludedWithRemainder {
        left: HeapGraph,
        consumed: Vec<NodeId>,
        map: NodeMap,
        instantiation: BTreeMap<NodeId, LinExpr>,
    },
}

impl PartialInclusion {
    pub fn as_str(&self) -> &'static str {
        match self {
            PartialInclusion::NotIncluded => "not_included",
            PartialInclusion::IncludedAsInductive { .. } => "included_as_inductive",
            PartialInclusion::IncludedAsSegment { .. } => "included_as_segment",
            PartialInclusion::IncludedWithRemainder { .. } => "included_with_remainder",
        }
    }

    pub fn is_included(&self) -> bool {
        !matches!(self, PartialInclusion::NotIncluded)
    }

    /// Correspondence for the variants that carry one
    pub fn map(&self) -> Option<&NodeMap> {
        match self {
            PartialInclusion::IncludedAsSegment { map, .. }
            | PartialInclusion::IncludedWithRemainder { map, .. } => Some(map),
            _ => None,
        }
    }
}
