//! inductive / inductive

use tracing::trace;

use super::expect_inductive;
use crate::errors::{InclusionError, InclusionResult};
use crate::features::inclusion::domain::InclusionState;
use crate::shared::models::{NodeId, NumConstraint};

pub(super) fn apply<'a>(
    mut state: InclusionState<'a>,
    left: NodeId,
    right: NodeId,
) -> InclusionResult<InclusionState<'a>> {
    let left_ind = expect_inductive(state.left_edge(left)?, left)?;
    let right_ind = expect_inductive(state.right_edge(right)?, right)?;
    if left_ind.pred != right_ind.pred {
        return Err(InclusionError::fatal(format!(
            "predicate mismatch: {} at {}, {} at {}",
            left_ind.pred, left, right_ind.pred, right
        )));
    }
    let def = state.definition(left_ind.pred)?;

    // Null owner with a parameter-free empty case: nothing to unify
    let trivial = def.trivial_when_null()
        && state.ctx.oracle.sat(&NumConstraint::is_null(left))
        && !right_ind
            .ptr_args
            .iter()
            .any(|&arg| state.embedding.contains(arg));

    if trivial {
        trace!("ind-ind at null {}: arguments left free", left);
    } else {
        state.merge_args(&left_ind.ptr_args, &right_ind.ptr_args)?;
        state.merge_args(&left_ind.int_args, &right_ind.int_args)?;
    }

    state.consume_left(left)?;
    state.right.take_edge(right)?;
    Ok(state)
}
