//! Rule selection for a node pair
//!
//! | left \ right | pt    | ind                   | seg                                   |
//! |--------------|-------|-----------------------|---------------------------------------|
//! | emp          | -     | unfold (empty first)  | void-seg if hole mapped, else unfold  |
//! | pt           | pt-pt | unfold (non-empty)    | unfold, empty first if hole ↦ left    |
//! | ind          | -     | ind-ind               | unfold (empty first)                  |
//! | seg          | -     | seg-ind               | seg-seg                               |
//!
//! A left node in the hint set always yields `Stop`; unfolding is never
//! proposed at a segment end.

use super::rule::RuleKind;
use super::state::InclusionState;
use crate::shared::models::{NodeId, ShapeEdge};

static EMPTY: ShapeEdge = ShapeEdge::Empty;

pub fn classify(state: &InclusionState<'_>, left: NodeId, right: NodeId) -> Option<RuleKind> {
    let right_edge = state.right.edge(right).ok()?;
    if right_edge.is_empty() {
        return None;
    }
    if state.hint.contains(&left) {
        return Some(RuleKind::Stop);
    }
    let left_edge = state.left.edge(left).unwrap_or(&EMPTY);

    let kind = match (left_edge, right_edge) {
        (ShapeEdge::PointsTo(_), ShapeEdge::PointsTo(_)) => RuleKind::PtPt,
        (ShapeEdge::Inductive(_), ShapeEdge::Inductive(_)) => RuleKind::IndInd,
        (ShapeEdge::Segment(_), ShapeEdge::Segment(_)) => RuleKind::SegSeg,
        (ShapeEdge::Segment(_), ShapeEdge::Inductive(_)) => RuleKind::SegInd,
        (ShapeEdge::Empty, ShapeEdge::Segment(seg)) => {
            if state.embedding.contains(seg.dest) {
                RuleKind::VoidSeg
            } else {
                RuleKind::UnfoldPreferEmpty
            }
        }
        (ShapeEdge::Empty, ShapeEdge::Inductive(_)) => RuleKind::UnfoldPreferEmpty,
        (ShapeEdge::PointsTo(_), ShapeEdge::Inductive(_)) => RuleKind::UnfoldPreferNonEmpty,
        // A left summary only matches an empty right segment
        (ShapeEdge::Inductive(_), ShapeEdge::Segment(_)) => RuleKind::UnfoldPreferEmpty,
        (ShapeEdge::PointsTo(_), ShapeEdge::Segment(seg)) => {
            if state.embedding.get(seg.dest) == Some(left) {
                RuleKind::UnfoldPreferEmpty
            } else {
                RuleKind::UnfoldPreferNonEmpty
            }
        }
        _ => return None,
    };

    if kind.is_unfold() && state.segment_ends.contains(&left) {
        return None;
    }
    Some(kind)
}
