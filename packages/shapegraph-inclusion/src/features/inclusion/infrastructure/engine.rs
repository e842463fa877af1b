//! Rule loop and backtracking unfolding search
//!
//! `saturate` pops rules until the worklist is empty and then discharges the
//! remaining obligations. An unfolding rule hands the rest of the run to
//! `search`, which tries each case on a clone of the state: the first branch
//! that saturates and discharges wins, soft failures move on to the next
//! branch, anything else aborts the whole check.

use tracing::{debug, trace};

use super::discharge::discharge;
use super::rules::apply_rule;
use crate::errors::{InclusionError, InclusionResult};
use crate::features::inclusion::domain::{classify, InclusionState, Rule, RuleKind};
use crate::features::inclusion::ports::EmptyPreference;
use crate::shared::models::NodeId;

/// Outcome of one structural step
enum Step<'a> {
    /// Keep popping rules
    Continue(InclusionState<'a>),
    /// A fallback search already ran the check to completion
    Finished(InclusionState<'a>),
}

/// Run the rule loop to completion, then discharge
pub fn saturate<'a>(mut state: InclusionState<'a>) -> InclusionResult<InclusionState<'a>> {
    while let Some(rule) = state.worklist.pop() {
        match classify(&state, rule.left, rule.right) {
            None => {
                trace!("drop {}: no longer applicable", rule);
                continue;
            }
            Some(kind) if kind != rule.kind => {
                state.schedule(rule.left, rule.right);
                continue;
            }
            Some(_) => {}
        }

        match rule.kind {
            RuleKind::UnfoldPreferEmpty => {
                return search(state, rule.left, rule.right, EmptyPreference::PreferEmpty)
            }
            RuleKind::UnfoldPreferNonEmpty => {
                return search(state, rule.left, rule.right, EmptyPreference::PreferNonEmpty)
            }
            _ => match apply_with_fallback(state, rule)? {
                Step::Continue(next) => state = next,
                Step::Finished(done) => return Ok(done),
            },
        }
    }
    discharge(state)
}

/// Case split on the right summary at `right`
pub fn search<'a>(
    state: InclusionState<'a>,
    left: NodeId,
    right: NodeId,
    preference: EmptyPreference,
) -> InclusionResult<InclusionState<'a>> {
    if state.depth >= state.ctx.config.max_unfold_depth {
        debug!("unfold depth {} reached at {}", state.depth, right);
        return Err(InclusionError::DepthExceeded { depth: state.depth });
    }

    let alternatives = state
        .ctx
        .unfolder
        .unfold(state.submem, preference, right, &state.right)?;
    let total = alternatives.len();

    for (index, alternative) in alternatives.into_iter().enumerate() {
        debug!(
            "unfold {} (depth {}): branch {}/{}",
            right,
            state.depth,
            index + 1,
            total
        );
        let mut branch = state.clone();
        branch.right = alternative.graph;
        branch.residual.extend(alternative.constraints);
        branch.depth += 1;
        branch.schedule(left, right);

        match saturate(branch) {
            Ok(done) => return Ok(done),
            Err(err) if err.is_soft() => {
                debug!("unfold {}: branch {} failed: {}", right, index + 1, err);
            }
            Err(err) => return Err(err),
        }
    }
    Err(InclusionError::NoSuccessfulBranch { node: right })
}

/// Apply a structural rule; a soft failure at a right summary edge is
/// retried by unfolding that summary
fn apply_with_fallback<'a>(state: InclusionState<'a>, rule: Rule) -> InclusionResult<Step<'a>> {
    let retry = state.ctx.config.unfold_on_failure
        && !state.hint.contains(&rule.left)
        && !state.segment_ends.contains(&rule.left)
        && state
            .right
            .edge(rule.right)
            .map(|edge| edge.is_summary())
            .unwrap_or(false);
    let snapshot = retry.then(|| state.clone());

    match apply_rule(state, rule) {
        Ok(next) => Ok(Step::Continue(next)),
        Err(err) if err.is_soft() => match snapshot {
            Some(snapshot) => {
                debug!("{} failed ({}), retrying by unfolding", rule, err);
                search(snapshot, rule.left, rule.right, EmptyPreference::PreferEmpty)
                    .map(Step::Finished)
            }
            None => Err(err),
        },
        Err(err) => Err(err),
    }
}
