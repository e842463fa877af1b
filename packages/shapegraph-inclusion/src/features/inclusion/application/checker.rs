//! Inclusion checker entry points
//!
//! - [`InclusionChecker::check_inclusion`]: does the right graph describe the
//!   whole left graph?
//! - [`InclusionChecker::check_inclusion_partial`]: does it describe a part
//!   of it, and what is left over? (join / widening)
//! - [`InclusionChecker::check_inclusion_generic`]: the shared search, which
//!   returns the final state.
//!
//! Soft failures become negative answers here; fatal and not-implemented
//! errors are returned as `Err`.

use tracing::debug;

use super::query::InclusionQuery;
use crate::config::{ConfigResult, InclusionConfig};
use crate::errors::InclusionResult;
use crate::features::inclusion::domain::{InclusionState, NodeEmbedding, NodeMap, PartialInclusion};
use crate::features::inclusion::infrastructure::saturate;
use crate::features::inclusion::ports::{LeftOracle, SearchContext, Unfolder};
use crate::shared::models::{PredicateRegistry, ShapeEdge};

pub struct InclusionChecker<'a> {
    config: InclusionConfig,
    registry: &'a PredicateRegistry,
    unfolder: &'a dyn Unfolder,
}

impl<'a> InclusionChecker<'a> {
    pub fn new(
        config: InclusionConfig,
        registry: &'a PredicateRegistry,
        unfolder: &'a dyn Unfolder,
    ) -> ConfigResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            registry,
            unfolder,
        })
    }

    pub fn config(&self) -> &InclusionConfig {
        &self.config
    }

    /// Full inclusion: `Some(map)` witnesses that `right` describes `left`
    pub fn check_inclusion(
        &self,
        query: InclusionQuery,
        oracle: &dyn LeftOracle,
    ) -> InclusionResult<Option<NodeMap>> {
        let emp_both = self.config.require_left_consumed;
        match self.check_inclusion_generic(query, emp_both, oracle) {
            Ok(state) => {
                debug!("inclusion holds ({} nodes mapped)", state.embedding.len());
                Ok(Some(state.embedding.into_image()))
            }
            Err(err) if err.is_soft() => {
                debug!("inclusion fails: {}", err);
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    /// Partial inclusion for join and widening
    ///
    /// With `search_inductive`, the caller asks whether the consumed part of
    /// `left` folds into the right inductive (possibly as a segment ending at
    /// a hint node); otherwise the remainder of `left` is returned.
    pub fn check_inclusion_partial(
        &self,
        query: InclusionQuery,
        search_inductive: bool,
        oracle: &dyn LeftOracle,
    ) -> InclusionResult<PartialInclusion> {
        let state = match self.check_inclusion_generic(query, false, oracle) {
            Ok(state) => state,
            Err(err) if err.is_soft() => {
                debug!("partial inclusion fails: {}", err);
                return Ok(PartialInclusion::NotIncluded);
            }
            Err(err) => return Err(err),
        };

        let result = if !search_inductive {
            PartialInclusion::IncludedWithRemainder {
                consumed: state.consumed.iter().copied().collect(),
                map: state.embedding.into_image(),
                instantiation: state.instantiation,
                left: state.left,
            }
        } else if state.excluded.edge_count() == 0 {
            PartialInclusion::IncludedAsInductive { left: state.left }
        } else {
            let at_hint = {
                let mut excluded = state.excluded.nodes().filter_map(|node| match &node.edge {
                    ShapeEdge::Inductive(ind) => Some((node.id, ind)),
                    _ => None,
                });
                match (excluded.next(), excluded.next()) {
                    (Some((right, ind)), None) => state
                        .embedding
                        .get(right)
                        .filter(|left| state.hint.contains(left))
                        .map(|hole| (hole, ind.clone())),
                    _ => None,
                }
            };
            match at_hint {
                Some((hole, edge)) => PartialInclusion::IncludedAsSegment {
                    hole,
                    edge,
                    map: state.embedding.into_image(),
                    left: state.left,
                },
                None => PartialInclusion::NotIncluded,
            }
        };
        debug!("partial inclusion: {}", result.as_str());
        Ok(result)
    }

    /// Build the search state, seed it from the initial map and run it
    ///
    /// Soft failures are returned as `Err` so callers can tell them apart
    /// from a successful run.
    pub fn check_inclusion_generic<'s>(
        &'s self,
        query: InclusionQuery,
        emp_both: bool,
        oracle: &'s dyn LeftOracle,
    ) -> InclusionResult<InclusionState<'s>> {
        let ctx = SearchContext {
            config: &self.config,
            registry: self.registry,
            unfolder: self.unfolder,
            oracle,
        };
        let InclusionQuery {
            left,
            right,
            initial_map,
            hint,
            segment_ends,
            instantiable,
            submem,
        } = query;

        let mut state = InclusionState::new(ctx, left, right);
        state.embedding = NodeEmbedding::from_pairs(initial_map.iter().map(|(&r, &l)| (r, l)))?;
        state.hint = hint;
        state.segment_ends = segment_ends;
        state.instantiable = instantiable;
        state.submem = submem;
        state.emp_both = emp_both;

        for (&right, &left) in &initial_map {
            state.schedule(left, right);
        }
        debug!(
            "inclusion check: {} left nodes, {} right nodes, {} seeds, {} pending",
            state.left.node_count(),
            state.right.node_count(),
            initial_map.len(),
            state.worklist.len()
        );
        saturate(state)
    }
}
