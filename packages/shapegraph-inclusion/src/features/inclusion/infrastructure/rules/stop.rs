//! Stop at a hint node
//!
//! Right inductive edges found at a hint node are set aside in the exclusion
//! graph; partial inclusion reports them as the part left to fold.

use tracing::debug;

use crate::errors::{InclusionError, InclusionResult};
use crate::features::inclusion::domain::InclusionState;
use crate::shared::models::{NodeId, ShapeEdge};

pub(super) fn apply<'a>(
    mut state: InclusionState<'a>,
    left: NodeId,
    right: NodeId,
) -> InclusionResult<InclusionState<'a>> {
    let ind = match state.right_edge(right)? {
        ShapeEdge::Empty | ShapeEdge::PointsTo(_) => return Ok(state),
        ShapeEdge::Segment(_) => {
            return Err(InclusionError::not_implemented(format!(
                "segment at stop node {}",
                left
            )))
        }
        ShapeEdge::Inductive(ind) => ind.clone(),
    };

    if let Some(&arg) = ind
        .ptr_args
        .iter()
        .find(|&&arg| !state.embedding.contains(arg))
    {
        return Err(InclusionError::fatal(format!(
            "stop at {}: argument {} of {} is not mapped",
            left, arg, right
        )));
    }

    let node = state.right.node(right)?;
    let (kind, origin) = (node.kind, node.origin);
    state.right.take_edge(right)?;
    if !state.excluded.contains(right) {
        state.excluded.add_node_with_id(right, kind, origin)?;
    }
    state.excluded.set_inductive(right, ind)?;
    debug!("stop at {}: excluded inductive edge of {}", left, right);
    Ok(state)
}
