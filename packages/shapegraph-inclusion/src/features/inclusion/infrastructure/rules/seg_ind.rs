//! left segment / right inductive
//!
//! The left segment covers a prefix of the right inductive; what remains is
//! an inductive of the same predicate at the left hole.

use super::{expect_inductive, expect_segment, fresh_copies};
use crate::errors::{InclusionError, InclusionResult};
use crate::features::inclusion::domain::InclusionState;
use crate::shared::models::{AllocOrigin, InductiveEdge, NodeId, NodeKind};

pub(super) fn apply<'a>(
    mut state: InclusionState<'a>,
    left: NodeId,
    right: NodeId,
) -> InclusionResult<InclusionState<'a>> {
    let left_seg = expect_segment(state.left_edge(left)?, left)?;
    let right_ind = expect_inductive(state.right_edge(right)?, right)?;
    if left_seg.pred != right_ind.pred {
        return Err(InclusionError::not_implemented(format!(
            "segment of {} against inductive of {}",
            left_seg.pred, right_ind.pred
        )));
    }
    state.merge_args(&left_seg.src_ptr_args, &right_ind.ptr_args)?;
    state.merge_args(&left_seg.src_int_args, &right_ind.int_args)?;

    state.consume_left(left)?;
    state.right.take_edge(right)?;

    let rest = state.right.add_node(NodeKind::Ptr, AllocOrigin::None);
    let ptr_copies = fresh_copies(&mut state, &left_seg.dst_ptr_args)?;
    let int_copies = fresh_copies(&mut state, &left_seg.dst_int_args)?;
    state.right.set_inductive(
        rest,
        InductiveEdge::with_args(right_ind.pred, ptr_copies.clone(), int_copies.clone()),
    )?;
    state.merge_nodes(left_seg.dest, rest)?;
    state.merge_args(&left_seg.dst_ptr_args, &ptr_copies)?;
    state.merge_args(&left_seg.dst_int_args, &int_copies)?;
    Ok(state)
}
