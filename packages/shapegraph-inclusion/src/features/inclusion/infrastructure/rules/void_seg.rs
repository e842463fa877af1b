//! left emp / right segment whose hole maps to the same left node
//!
//! The right segment must be empty: its source and destination arguments
//! denote the same left nodes.

use super::expect_segment;
use crate::errors::{InclusionError, InclusionResult};
use crate::features::inclusion::domain::InclusionState;
use crate::shared::models::NodeId;

pub(super) fn apply<'a>(
    mut state: InclusionState<'a>,
    left: NodeId,
    right: NodeId,
) -> InclusionResult<InclusionState<'a>> {
    let seg = expect_segment(state.right_edge(right)?, right)?;
    if state.embedding.get(seg.dest) != Some(left) {
        return Err(InclusionError::not_implemented(format!(
            "segment at {} into non-empty territory",
            right
        )));
    }

    let src = seg.src_ptr_args.iter().chain(&seg.src_int_args);
    let dst = seg.dst_ptr_args.iter().chain(&seg.dst_int_args);
    for (&s, &d) in src.zip(dst) {
        match (state.embedding.get(s), state.embedding.get(d)) {
            (None, None) => {
                return Err(InclusionError::not_included(format!(
                    "empty segment at {}: neither {} nor {} is mapped",
                    right, s, d
                )))
            }
            (Some(ls), None) => state.merge_nodes(ls, d)?,
            (None, Some(ld)) => state.merge_nodes(ld, s)?,
            (Some(ls), Some(ld)) if ls != ld => {
                return Err(InclusionError::not_included(format!(
                    "empty segment at {}: {} and {} map to different nodes",
                    right, s, d
                )))
            }
            (Some(_), Some(_)) => {}
        }
    }

    state.right.take_edge(right)?;
    Ok(state)
}
