//! points-to / points-to

use super::expect_points_to;
use crate::errors::{InclusionError, InclusionResult};
use crate::features::inclusion::domain::InclusionState;
use crate::shared::models::{NodeId, Offset};

pub(super) fn apply<'a>(
    mut state: InclusionState<'a>,
    left: NodeId,
    right: NodeId,
) -> InclusionResult<InclusionState<'a>> {
    let left_origin = state.left.node(left)?.origin;
    let right_origin = state.right.node(right)?.origin;
    if !state.submem && left_origin != right_origin {
        return Err(InclusionError::fatal(format!(
            "allocation origin mismatch: {} is {:?}, {} is {:?}",
            left, left_origin, right, right_origin
        )));
    }

    let left_block = expect_points_to(state.left_edge(left)?, left)?;
    let right_block = expect_points_to(state.right_edge(right)?, right)?;
    if left_block.len() != right_block.len() {
        return Err(InclusionError::not_included(format!(
            "{} has {} cells, {} has {}",
            left,
            left_block.len(),
            right,
            right_block.len()
        )));
    }

    state.consume_left(left)?;
    state.right.take_edge(right)?;

    for (lc, rc) in left_block.cells.iter().zip(&right_block.cells) {
        if lc.size != rc.size {
            return Err(InclusionError::not_included(format!(
                "cell size {} vs {} at {}",
                lc.size, rc.size, left
            )));
        }
        unify_offsets(&mut state, lc.offset, rc.offset)?;
        unify_offsets(&mut state, lc.dest_offset, rc.dest_offset)?;
        state.merge_nodes(lc.dest, rc.dest)?;
    }
    Ok(state)
}

/// Constant parts must agree; symbolic parts are identified
fn unify_offsets(state: &mut InclusionState<'_>, left: Offset, right: Offset) -> InclusionResult<()> {
    if left.constant != right.constant {
        return Err(InclusionError::not_included(format!(
            "offset {} vs {}",
            left.constant, right.constant
        )));
    }
    match (left.symbol, right.symbol) {
        (None, None) => Ok(()),
        (Some(l), Some(r)) => state.merge_nodes(l, r),
        _ => Err(InclusionError::not_included(
            "symbolic offset against constant offset",
        )),
    }
}
