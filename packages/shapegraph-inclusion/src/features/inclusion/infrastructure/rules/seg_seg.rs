//! segment / segment
//!
//! After the source arguments are unified, three cases:
//! 1. the right hole already maps to the left hole: both segments match
//! 2. both graphs have the same number of nodes: the holes are identified
//! 3. otherwise the left segment is peeled off the right one, which then
//!    continues from a fresh node standing for the left hole

use tracing::trace;

use super::{expect_segment, fresh_copies};
use crate::errors::{InclusionError, InclusionResult};
use crate::features::inclusion::domain::InclusionState;
use crate::shared::models::{AllocOrigin, NodeId, NodeKind, SegmentEdge};

pub(super) fn apply<'a>(
    mut state: InclusionState<'a>,
    left: NodeId,
    right: NodeId,
) -> InclusionResult<InclusionState<'a>> {
    let left_seg = expect_segment(state.left_edge(left)?, left)?;
    let right_seg = expect_segment(state.right_edge(right)?, right)?;
    if left_seg.pred != right_seg.pred {
        return Err(InclusionError::fatal(format!(
            "predicate mismatch: {} at {}, {} at {}",
            left_seg.pred, left, right_seg.pred, right
        )));
    }
    state.merge_args(&left_seg.src_ptr_args, &right_seg.src_ptr_args)?;
    state.merge_args(&left_seg.src_int_args, &right_seg.src_int_args)?;

    if state.embedding.get(right_seg.dest) == Some(left_seg.dest) {
        trace!("seg-seg {} / {}: holes already matched", left, right);
        state.consume_left(left)?;
        state.right.take_edge(right)?;
        state.merge_args(&left_seg.dst_ptr_args, &right_seg.dst_ptr_args)?;
        state.merge_args(&left_seg.dst_int_args, &right_seg.dst_int_args)?;
        return Ok(state);
    }

    if state.ctx.config.node_count_heuristic
        && state.left.node_count() == state.right.node_count()
    {
        trace!("seg-seg {} / {}: same node count, identifying holes", left, right);
        state.consume_left(left)?;
        state.right.take_edge(right)?;
        state.merge_nodes(left_seg.dest, right_seg.dest)?;
        state.merge_args(&left_seg.dst_ptr_args, &right_seg.dst_ptr_args)?;
        state.merge_args(&left_seg.dst_int_args, &right_seg.dst_int_args)?;
        return Ok(state);
    }

    peel(state, left, right, left_seg, right_seg)
}

fn peel<'a>(
    mut state: InclusionState<'a>,
    left: NodeId,
    right: NodeId,
    left_seg: SegmentEdge,
    right_seg: SegmentEdge,
) -> InclusionResult<InclusionState<'a>> {
    state.consume_left(left)?;
    state.right.take_edge(right)?;

    let pivot = state.right.add_node(NodeKind::Ptr, AllocOrigin::None);
    let ptr_copies = fresh_copies(&mut state, &left_seg.dst_ptr_args)?;
    let int_copies = fresh_copies(&mut state, &left_seg.dst_int_args)?;
    trace!(
        "seg-seg {} / {}: peeled, remainder continues at {}",
        left,
        right,
        pivot
    );

    state.right.set_segment(
        pivot,
        SegmentEdge {
            pred: right_seg.pred,
            src_ptr_args: ptr_copies.clone(),
            src_int_args: int_copies.clone(),
            dest: right_seg.dest,
            dst_ptr_args: right_seg.dst_ptr_args,
            dst_int_args: right_seg.dst_int_args,
        },
    )?;
    state.merge_nodes(left_seg.dest, pivot)?;
    state.merge_args(&left_seg.dst_ptr_args, &ptr_copies)?;
    state.merge_args(&left_seg.dst_int_args, &int_copies)?;
    Ok(state)
}
