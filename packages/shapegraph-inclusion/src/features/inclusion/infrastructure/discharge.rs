//! Obligation discharge
//!
//! Runs once the worklist is empty:
//! 1. termination: the right graph (and, with `emp_both`, the left graph)
//!    has no edge left
//! 2. residual constraints are renamed into the left vocabulary
//! 3. `x = y` with one side mapped maps the other side (to a fixpoint)
//! 4. `x = e` with `x` instantiable binds `x` to the left expression `e`
//! 5. renamed constraints must hold in the left oracle (`≠` between two
//!    nodes may also be shown by `diseq`)

use std::mem;
use tracing::{debug, trace};

use crate::errors::{InclusionError, InclusionResult};
use crate::features::inclusion::domain::InclusionState;
use crate::shared::models::{CmpOp, LinExpr, NodeId, NumConstraint};

pub fn discharge<'a>(mut state: InclusionState<'a>) -> InclusionResult<InclusionState<'a>> {
    let right_edges = state.right.edge_count();
    let left_edges = state.left.edge_count();
    if right_edges > 0 || (state.emp_both && left_edges > 0) {
        return Err(InclusionError::not_included(format!(
            "leftover edges: {} right, {} left",
            right_edges, left_edges
        )));
    }

    let residual = mem::take(&mut state.residual);
    let (mut translated, mut pending) = translate_all(&state, residual);

    resolve_equalities(&mut state, &pending)?;
    let (now_translated, still_pending) = translate_all(&state, pending);
    translated.extend(now_translated);
    pending = still_pending;

    for constraint in &pending {
        instantiate(&mut state, constraint)?;
    }

    for constraint in &translated {
        if state.ctx.oracle.sat(constraint) {
            continue;
        }
        let by_diseq = constraint.op == CmpOp::Ne
            && constraint
                .as_var_pair()
                .map(|(a, b)| state.ctx.oracle.diseq(a, b))
                .unwrap_or(false);
        if !by_diseq {
            debug!("discharge: {} not entailed", constraint);
            return Err(InclusionError::not_included(format!(
                "cannot prove {}",
                constraint
            )));
        }
    }

    state.success = true;
    Ok(state)
}

/// Split into (renamed, untranslatable)
fn translate_all(
    state: &InclusionState<'_>,
    constraints: Vec<NumConstraint>,
) -> (Vec<NumConstraint>, Vec<NumConstraint>) {
    let mut translated = Vec::new();
    let mut pending = Vec::new();
    for constraint in constraints {
        match constraint.translate(|n| state.embedding.get(n)) {
            Some(renamed) => translated.push(renamed),
            None => pending.push(constraint),
        }
    }
    (translated, pending)
}

/// Map unmapped nodes through `x = y` facts until nothing changes
fn resolve_equalities(state: &mut InclusionState<'_>, pending: &[NumConstraint]) -> InclusionResult<()> {
    loop {
        let mut progress = false;
        for constraint in pending {
            if constraint.op != CmpOp::Eq {
                continue;
            }
            let Some((x, y)) = constraint.as_var_pair() else {
                continue;
            };
            let (unmapped, image) = match (state.embedding.get(x), state.embedding.get(y)) {
                (Some(lx), None) => (y, lx),
                (None, Some(ly)) => (x, ly),
                _ => continue,
            };
            trace!("discharge: {} ↦ {} from {}", unmapped, image, constraint);
            state.embedding.add(unmapped, image)?;
            progress = true;
        }
        if !progress {
            return Ok(());
        }
    }
}

/// Bind an instantiable node from a still-untranslatable equality
fn instantiate(state: &mut InclusionState<'_>, constraint: &NumConstraint) -> InclusionResult<()> {
    let fail = || {
        InclusionError::not_included(format!("cannot translate {}", constraint))
    };
    if constraint.op != CmpOp::Eq {
        return Err(fail());
    }

    let embedding = &state.embedding;
    let bind = |var: NodeId, expr: &LinExpr| -> Option<(NodeId, LinExpr)> {
        if embedding.contains(var) || !state.instantiable.contains(&var) {
            return None;
        }
        expr.translate(|n| embedding.get(n)).map(|e| (var, e))
    };
    let binding = constraint
        .lhs
        .as_var()
        .and_then(|x| bind(x, &constraint.rhs))
        .or_else(|| constraint.rhs.as_var().and_then(|y| bind(y, &constraint.lhs)));

    let (var, expr) = binding.ok_or_else(fail)?;
    if state.instantiation.contains_key(&var) {
        return Err(InclusionError::not_included(format!(
            "{} instantiated twice",
            var
        )));
    }
    trace!("discharge: instantiate {} := {}", var, expr);
    state.instantiation.insert(var, expr);
    Ok(())
}
