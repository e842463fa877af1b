//! Rule appliers
//!
//! Each applier takes the state by value, rewrites both graphs locally at
//! one `(left, right)` pair and hands the state back. A soft error means
//! the pair does not match; the caller may retry by unfolding.

mod ind_ind;
mod pt_pt;
mod seg_ind;
mod seg_seg;
mod stop;
mod void_seg;

use tracing::trace;

use crate::errors::{InclusionError, InclusionResult};
use crate::features::inclusion::domain::{InclusionState, Rule, RuleKind};
use crate::shared::models::{AllocOrigin, Block, InductiveEdge, NodeId, SegmentEdge, ShapeEdge};

/// Apply a structural rule
pub fn apply_rule<'a>(state: InclusionState<'a>, rule: Rule) -> InclusionResult<InclusionState<'a>> {
    trace!("apply {}", rule);
    let Rule { kind, left, right } = rule;
    match kind {
        RuleKind::PtPt => pt_pt::apply(state, left, right),
        RuleKind::IndInd => ind_ind::apply(state, left, right),
        RuleKind::SegSeg => seg_seg::apply(state, left, right),
        RuleKind::SegInd => seg_ind::apply(state, left, right),
        RuleKind::VoidSeg => void_seg::apply(state, left, right),
        RuleKind::Stop => stop::apply(state, left, right),
        RuleKind::UnfoldPreferEmpty | RuleKind::UnfoldPreferNonEmpty => Err(InclusionError::fatal(
            format!("{} is not a structural rule", rule),
        )),
    }
}

fn expect_points_to(edge: &ShapeEdge, node: NodeId) -> InclusionResult<Block> {
    match edge {
        ShapeEdge::PointsTo(block) => Ok(block.clone()),
        other => Err(unexpected("pt", other, node)),
    }
}

fn expect_inductive(edge: &ShapeEdge, node: NodeId) -> InclusionResult<InductiveEdge> {
    match edge {
        ShapeEdge::Inductive(ind) => Ok(ind.clone()),
        other => Err(unexpected("ind", other, node)),
    }
}

fn expect_segment(edge: &ShapeEdge, node: NodeId) -> InclusionResult<SegmentEdge> {
    match edge {
        ShapeEdge::Segment(seg) => Ok(seg.clone()),
        other => Err(unexpected("seg", other, node)),
    }
}

fn unexpected(expected: &str, found: &ShapeEdge, node: NodeId) -> InclusionError {
    InclusionError::fatal(format!(
        "expected {} edge at {}, found {}",
        expected,
        node,
        found.kind_name()
    ))
}

/// Fresh right nodes of the same kinds as the given left nodes
fn fresh_copies(
    state: &mut InclusionState<'_>,
    left_args: &[NodeId],
) -> InclusionResult<Vec<NodeId>> {
    let mut copies = Vec::with_capacity(left_args.len());
    for &arg in left_args {
        let kind = state.left.node(arg)?.kind;
        copies.push(state.right.add_node(kind, AllocOrigin::None));
    }
    Ok(copies)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::InclusionConfig;
    use crate::features::inclusion::infrastructure::{DefinitionUnfolder, FactOracle};
    use crate::features::inclusion::ports::SearchContext;
    use crate::shared::models::{HeapGraph, NodeKind, PredicateId, PredicateRegistry};

    const LIST: PredicateId = PredicateId(0);
    const TREE_P: PredicateId = PredicateId(1);

    fn with_state<R>(
        left: HeapGraph,
        right: HeapGraph,
        test: impl FnOnce(InclusionState<'_>) -> R,
    ) -> R {
        let config = InclusionConfig::default();
        let registry = PredicateRegistry::with_tree_parent();
        let unfolder = DefinitionUnfolder::new(&registry);
        let oracle = FactOracle::new();
        let ctx = SearchContext {
            config: &config,
            registry: &registry,
            unfolder: &unfolder,
            oracle: &oracle,
        };
        test(InclusionState::new(ctx, left, right))
    }

    fn ptrs(g: &mut HeapGraph, n: usize) -> Vec<NodeId> {
        (0..n)
            .map(|_| g.add_node(NodeKind::Ptr, AllocOrigin::None))
            .collect()
    }

    #[test]
    fn test_void_seg_removes_empty_segment() {
        let mut left = HeapGraph::new();
        let e = ptrs(&mut left, 1)[0];
        let mut right = HeapGraph::new();
        let n = ptrs(&mut right, 2);
        right.set_segment(n[0], SegmentEdge::new(LIST, n[1])).unwrap();

        with_state(left, right, |mut state| {
            state.embedding.add(n[0], e).unwrap();
            state.embedding.add(n[1], e).unwrap();
            let state = apply_rule(state, Rule::new(RuleKind::VoidSeg, e, n[0])).unwrap();
            assert_eq!(state.right.edge_count(), 0);
        });
    }

    #[test]
    fn test_void_seg_maps_missing_argument() {
        let mut left = HeapGraph::new();
        let l = ptrs(&mut left, 2);
        let mut right = HeapGraph::new();
        // c · tree_p(p) *= d · tree_p(q)
        let n = ptrs(&mut right, 4);
        let (c, d, p, q) = (n[0], n[1], n[2], n[3]);
        let mut seg = SegmentEdge::new(TREE_P, d);
        seg.src_ptr_args = vec![p];
        seg.dst_ptr_args = vec![q];
        right.set_segment(c, seg).unwrap();

        with_state(left, right, |mut state| {
            state.embedding.add(d, l[0]).unwrap();
            state.embedding.add(p, l[1]).unwrap();
            let state = apply_rule(state, Rule::new(RuleKind::VoidSeg, l[0], c)).unwrap();
            assert_eq!(state.embedding.get(q), Some(l[1]));
        });
    }

    #[test]
    fn test_void_seg_hole_elsewhere_is_not_implemented() {
        let mut left = HeapGraph::new();
        let l = ptrs(&mut left, 2);
        let mut right = HeapGraph::new();
        let n = ptrs(&mut right, 2);
        right.set_segment(n[0], SegmentEdge::new(LIST, n[1])).unwrap();

        with_state(left, right, |mut state| {
            state.embedding.add(n[1], l[1]).unwrap();
            let err = apply_rule(state, Rule::new(RuleKind::VoidSeg, l[0], n[0])).unwrap_err();
            assert!(matches!(err, InclusionError::NotImplemented { .. }));
        });
    }

    #[test]
    fn test_stop_excludes_inductive() {
        let mut left = HeapGraph::new();
        let a = ptrs(&mut left, 1)[0];
        let mut right = HeapGraph::new();
        let c = ptrs(&mut right, 1)[0];
        right.set_inductive(c, InductiveEdge::new(LIST)).unwrap();

        with_state(left, right, |state| {
            let state = apply_rule(state, Rule::new(RuleKind::Stop, a, c)).unwrap();
            assert_eq!(state.right.edge_count(), 0);
            assert_eq!(
                state.excluded.edge(c).unwrap(),
                &ShapeEdge::Inductive(InductiveEdge::new(LIST))
            );
        });
    }

    #[test]
    fn test_stop_needs_mapped_parameters() {
        let mut left = HeapGraph::new();
        let a = ptrs(&mut left, 1)[0];
        let mut right = HeapGraph::new();
        let n = ptrs(&mut right, 2);
        right
            .set_inductive(n[0], InductiveEdge::with_args(TREE_P, vec![n[1]], Vec::new()))
            .unwrap();

        with_state(left, right, |state| {
            let err = apply_rule(state, Rule::new(RuleKind::Stop, a, n[0])).unwrap_err();
            assert!(matches!(err, InclusionError::Fatal { .. }));
        });
    }

    #[test]
    fn test_ind_ind_predicate_mismatch_is_fatal() {
        let mut left = HeapGraph::new();
        let l = ptrs(&mut left, 2);
        left.set_inductive(l[0], InductiveEdge::new(LIST)).unwrap();
        let mut right = HeapGraph::new();
        let n = ptrs(&mut right, 2);
        right
            .set_inductive(n[0], InductiveEdge::with_args(TREE_P, vec![n[1]], Vec::new()))
            .unwrap();

        with_state(left, right, |state| {
            let err = apply_rule(state, Rule::new(RuleKind::IndInd, l[0], n[0])).unwrap_err();
            assert!(!err.is_soft());
        });
    }

    #[test]
    fn test_unfold_kinds_are_not_applied_here() {
        with_state(HeapGraph::new(), HeapGraph::new(), |state| {
            let rule = Rule::new(RuleKind::UnfoldPreferEmpty, NodeId(0), NodeId(0));
            assert!(matches!(apply_rule(state, rule), Err(InclusionError::Fatal { .. })));
        });
    }
}
