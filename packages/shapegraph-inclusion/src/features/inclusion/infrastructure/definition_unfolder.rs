//! Unfolder driven by inductive definitions
//!
//! Inductive edge `α · P(π⃗ | ι⃗)`: one alternative per rule of `P`. Each
//! alternative replaces the edge with the rule body (fresh nodes, the block
//! at `α`, recursive calls) and returns the rule's pure part as constraints.
//!
//! Segment edge `α · P(π⃗) *= β · P(π⃗')`:
//! - empty: `β` is merged into `α`, with `α = β` and `π⃗ = π⃗'`
//! - non-empty: one alternative per (non-empty rule, call to `P` in that
//!   rule); the chosen call carries the rest of the segment.

use tracing::debug;

use crate::errors::{InclusionError, InclusionResult};
use crate::features::inclusion::ports::{EmptyPreference, UnfoldAlternative, Unfolder};
use crate::shared::models::{
    AllocOrigin, Block, Cell, HeapGraph, InductiveDef, InductiveEdge, InductiveRule, LinExpr,
    NodeId, NodeKind, NumConstraint, Offset, PredicateId, PredicateRegistry, RuleCall, RulePure,
    RuleTerm, SegmentEdge, ShapeEdge,
};

pub struct DefinitionUnfolder<'a> {
    registry: &'a PredicateRegistry,
}

impl<'a> DefinitionUnfolder<'a> {
    pub fn new(registry: &'a PredicateRegistry) -> Self {
        Self { registry }
    }

    fn definition(&self, pred: PredicateId) -> InclusionResult<&'a InductiveDef> {
        let registry: &'a PredicateRegistry = self.registry;
        registry
            .get(pred)
            .ok_or_else(|| InclusionError::fatal(format!("unknown predicate {}", pred)))
    }

    fn unfold_inductive(
        &self,
        submem: bool,
        preference: EmptyPreference,
        node: NodeId,
        edge: &InductiveEdge,
        graph: &HeapGraph,
    ) -> InclusionResult<Vec<UnfoldAlternative>> {
        let def = self.definition(edge.pred)?;
        check_arity(def, &edge.ptr_args, &edge.int_args)?;

        ordered_rules(def, preference)
            .map(|rule| -> InclusionResult<UnfoldAlternative> {
                let mut g = graph.clone();
                g.take_edge(node)?;
                let mut body = RuleBody::new(&mut g, node, &edge.ptr_args, &edge.int_args, rule);
                body.build_block(def, submem)?;
                for call in &rule.calls {
                    let (owner, ptr_args, int_args) = body.call_site(call)?;
                    body.graph
                        .set_inductive(owner, InductiveEdge::with_args(call.pred, ptr_args, int_args))?;
                }
                let constraints = body.pure()?;
                Ok(UnfoldAlternative {
                    graph: g,
                    constraints,
                })
            })
            .collect()
    }

    fn unfold_segment(
        &self,
        submem: bool,
        preference: EmptyPreference,
        node: NodeId,
        edge: &SegmentEdge,
        graph: &HeapGraph,
    ) -> InclusionResult<Vec<UnfoldAlternative>> {
        let def = self.definition(edge.pred)?;
        check_arity(def, &edge.src_ptr_args, &edge.src_int_args)?;
        check_arity(def, &edge.dst_ptr_args, &edge.dst_int_args)?;

        let empty = self.empty_segment(node, edge, graph)?;
        let mut non_empty = Vec::new();
        for rule in def.non_empty_rules() {
            for (index, call) in rule.calls.iter().enumerate() {
                if call.pred != edge.pred {
                    continue;
                }
                non_empty.push(self.segment_step(submem, def, node, edge, rule, index, graph)?);
            }
        }

        Ok(match preference {
            EmptyPreference::PreferEmpty => std::iter::once(empty).chain(non_empty).collect(),
            EmptyPreference::PreferNonEmpty => {
                non_empty.push(empty);
                non_empty
            }
        })
    }

    fn empty_segment(
        &self,
        node: NodeId,
        edge: &SegmentEdge,
        graph: &HeapGraph,
    ) -> InclusionResult<UnfoldAlternative> {
        let mut g = graph.clone();
        g.take_edge(node)?;
        g.merge_into(edge.dest, node)?;

        let mut constraints = vec![NumConstraint::equal(node, edge.dest)];
        let src = edge.src_ptr_args.iter().chain(&edge.src_int_args);
        let dst = edge.dst_ptr_args.iter().chain(&edge.dst_int_args);
        constraints.extend(
            src.zip(dst)
                .filter(|(s, d)| s != d)
                .map(|(&s, &d)| NumConstraint::equal(s, d)),
        );
        Ok(UnfoldAlternative {
            graph: g,
            constraints,
        })
    }

    /// One step of the segment: `rule` at the owner, `calls[via]` keeps the rest
    #[allow(clippy::too_many_arguments)]
    fn segment_step(
        &self,
        submem: bool,
        def: &InductiveDef,
        node: NodeId,
        edge: &SegmentEdge,
        rule: &InductiveRule,
        via: usize,
        graph: &HeapGraph,
    ) -> InclusionResult<UnfoldAlternative> {
        let mut g = graph.clone();
        g.take_edge(node)?;
        let mut body = RuleBody::new(&mut g, node, &edge.src_ptr_args, &edge.src_int_args, rule);
        body.build_block(def, submem)?;
        for (index, call) in rule.calls.iter().enumerate() {
            let (owner, ptr_args, int_args) = body.call_site(call)?;
            if index == via {
                body.graph.set_segment(
                    owner,
                    SegmentEdge {
                        pred: call.pred,
                        src_ptr_args: ptr_args,
                        src_int_args: int_args,
                        dest: edge.dest,
                        dst_ptr_args: edge.dst_ptr_args.clone(),
                        dst_int_args: edge.dst_int_args.clone(),
                    },
                )?;
            } else {
                body.graph
                    .set_inductive(owner, InductiveEdge::with_args(call.pred, ptr_args, int_args))?;
            }
        }
        let constraints = body.pure()?;
        Ok(UnfoldAlternative {
            graph: g,
            constraints,
        })
    }
}

impl Unfolder for DefinitionUnfolder<'_> {
    fn unfold(
        &self,
        submem: bool,
        preference: EmptyPreference,
        node: NodeId,
        graph: &HeapGraph,
    ) -> InclusionResult<Vec<UnfoldAlternative>> {
        let alternatives = match graph.edge(node)? {
            ShapeEdge::Inductive(edge) => {
                self.unfold_inductive(submem, preference, node, edge, graph)?
            }
            ShapeEdge::Segment(edge) => self.unfold_segment(submem, preference, node, edge, graph)?,
            other => {
                return Err(InclusionError::fatal(format!(
                    "cannot unfold {} edge at {}",
                    other.kind_name(),
                    node
                )))
            }
        };
        debug!("unfolded {} into {} alternatives", node, alternatives.len());
        Ok(alternatives)
    }
}

fn check_arity(def: &InductiveDef, ptr_args: &[NodeId], int_args: &[NodeId]) -> InclusionResult<()> {
    if ptr_args.len() != def.ptr_arity || int_args.len() != def.int_arity {
        return Err(InclusionError::fatal(format!(
            "{} expects {}/{} arguments, got {}/{}",
            def.name,
            def.ptr_arity,
            def.int_arity,
            ptr_args.len(),
            int_args.len()
        )));
    }
    Ok(())
}

fn ordered_rules(
    def: &InductiveDef,
    preference: EmptyPreference,
) -> impl Iterator<Item = &InductiveRule> {
    let (first, second): (Vec<_>, Vec<_>) = match preference {
        EmptyPreference::PreferEmpty => (def.empty_rules().collect(), def.non_empty_rules().collect()),
        EmptyPreference::PreferNonEmpty => {
            (def.non_empty_rules().collect(), def.empty_rules().collect())
        }
    };
    first.into_iter().chain(second)
}

/// Instantiation of one rule at `owner`
struct RuleBody<'g, 'r> {
    graph: &'g mut HeapGraph,
    owner: NodeId,
    ptr_args: &'r [NodeId],
    int_args: &'r [NodeId],
    rule: &'r InductiveRule,
    fresh: Vec<NodeId>,
}

impl<'g, 'r> RuleBody<'g, 'r> {
    fn new(
        graph: &'g mut HeapGraph,
        owner: NodeId,
        ptr_args: &'r [NodeId],
        int_args: &'r [NodeId],
        rule: &'r InductiveRule,
    ) -> Self {
        let mut fresh = Vec::with_capacity(rule.fresh_ptrs + rule.fresh_ints);
        for _ in 0..rule.fresh_ptrs {
            fresh.push(graph.add_node(NodeKind::Ptr, AllocOrigin::None));
        }
        for _ in 0..rule.fresh_ints {
            fresh.push(graph.add_node(NodeKind::Int, AllocOrigin::None));
        }
        Self {
            graph,
            owner,
            ptr_args,
            int_args,
            rule,
            fresh,
        }
    }

    fn node(&self, term: RuleTerm) -> InclusionResult<NodeId> {
        let found = match term {
            RuleTerm::Owner => Some(self.owner),
            RuleTerm::Fresh(i) => self.fresh.get(i).copied(),
            RuleTerm::PtrArg(i) => self.ptr_args.get(i).copied(),
            RuleTerm::IntArg(i) => self.int_args.get(i).copied(),
            RuleTerm::Null => None,
        };
        found.ok_or_else(|| InclusionError::fatal(format!("rule term {:?} does not name a node", term)))
    }

    fn expr(&self, term: RuleTerm) -> InclusionResult<LinExpr> {
        match term {
            RuleTerm::Null => Ok(LinExpr::null()),
            other => self.node(other).map(LinExpr::var),
        }
    }

    /// Points-to block of a non-empty rule; the owner gets the predicate's
    /// allocation origin unless it already has one
    fn build_block(&mut self, def: &InductiveDef, submem: bool) -> InclusionResult<()> {
        if self.rule.cells.is_empty() {
            return Ok(());
        }
        let cells = self
            .rule
            .cells
            .iter()
            .map(|cell| -> InclusionResult<Cell> {
                Ok(Cell {
                    offset: Offset::constant(cell.offset),
                    size: cell.size,
                    dest: self.node(cell.target)?,
                    dest_offset: Offset::zero(),
                })
            })
            .collect::<InclusionResult<Vec<_>>>()?;
        self.graph
            .set_edge(self.owner, ShapeEdge::PointsTo(Block::new(cells)))?;
        if !submem && self.graph.node(self.owner)?.origin == AllocOrigin::None {
            self.graph.set_origin(self.owner, def.block_origin)?;
        }
        Ok(())
    }

    fn call_site(
        &self,
        call: &RuleCall,
    ) -> InclusionResult<(NodeId, Vec<NodeId>, Vec<NodeId>)> {
        let owner = self.node(call.owner)?;
        let ptr_args = call
            .ptr_args
            .iter()
            .map(|&t| self.node(t))
            .collect::<InclusionResult<Vec<_>>>()?;
        let int_args = call
            .int_args
            .iter()
            .map(|&t| self.node(t))
            .collect::<InclusionResult<Vec<_>>>()?;
        Ok((owner, ptr_args, int_args))
    }

    fn pure(&self) -> InclusionResult<Vec<NumConstraint>> {
        self.rule
            .pure
            .iter()
            .map(|fact| -> InclusionResult<NumConstraint> {
                match *fact {
                    RulePure::Eq(a, b) => Ok(NumConstraint::equal(self.expr(a)?, self.expr(b)?)),
                    RulePure::Ne(a, b) => {
                        Ok(NumConstraint::not_equal(self.expr(a)?, self.expr(b)?))
                    }
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIST: PredicateId = PredicateId(0);

    fn list_node() -> (HeapGraph, NodeId) {
        let mut g = HeapGraph::new();
        let a = g.add_node(NodeKind::Ptr, AllocOrigin::None);
        g.set_inductive(a, InductiveEdge::new(LIST)).unwrap();
        (g, a)
    }

    #[test]
    fn test_inductive_empty_first() {
        let registry = PredicateRegistry::with_list();
        let unfolder = DefinitionUnfolder::new(&registry);
        let (g, a) = list_node();

        let alts = unfolder
            .unfold(false, EmptyPreference::PreferEmpty, a, &g)
            .unwrap();
        assert_eq!(alts.len(), 2);
        assert_eq!(alts[0].graph.edge_count(), 0);
        assert_eq!(alts[0].constraints, vec![NumConstraint::is_null(a)]);

        let step = &alts[1].graph;
        assert_eq!(step.node_count(), 2);
        assert_eq!(step.node(a).unwrap().origin, AllocOrigin::Heap(0));
        let next = match step.edge(a).unwrap() {
            ShapeEdge::PointsTo(block) => block.cells[0].dest,
            other => panic!("unexpected edge {:?}", other),
        };
        assert!(matches!(step.edge(next).unwrap(), ShapeEdge::Inductive(e) if e.pred == LIST));
        assert_eq!(alts[1].constraints, vec![NumConstraint::non_null(a)]);
    }

    #[test]
    fn test_inductive_non_empty_first_in_submem() {
        let registry = PredicateRegistry::with_list();
        let unfolder = DefinitionUnfolder::new(&registry);
        let (g, a) = list_node();

        let alts = unfolder
            .unfold(true, EmptyPreference::PreferNonEmpty, a, &g)
            .unwrap();
        assert!(matches!(alts[0].graph.edge(a).unwrap(), ShapeEdge::PointsTo(_)));
        assert_eq!(alts[0].graph.node(a).unwrap().origin, AllocOrigin::None);
        assert!(alts[1].graph.edge(a).unwrap().is_empty());
    }

    #[test]
    fn test_segment_alternatives() {
        let registry = PredicateRegistry::with_list();
        let unfolder = DefinitionUnfolder::new(&registry);
        let mut g = HeapGraph::new();
        let a = g.add_node(NodeKind::Ptr, AllocOrigin::None);
        let b = g.add_node(NodeKind::Ptr, AllocOrigin::None);
        g.set_segment(a, SegmentEdge::new(LIST, b)).unwrap();

        let alts = unfolder
            .unfold(false, EmptyPreference::PreferEmpty, a, &g)
            .unwrap();
        assert_eq!(alts.len(), 2);

        let empty = &alts[0];
        assert!(!empty.graph.contains(b));
        assert_eq!(empty.constraints, vec![NumConstraint::equal(a, b)]);

        let step = &alts[1].graph;
        let next = match step.edge(a).unwrap() {
            ShapeEdge::PointsTo(block) => block.cells[0].dest,
            other => panic!("unexpected edge {:?}", other),
        };
        assert!(matches!(step.edge(next).unwrap(), ShapeEdge::Segment(s) if s.dest == b));
    }

    #[test]
    fn test_unfold_rejects_points_to() {
        let registry = PredicateRegistry::with_list();
        let unfolder = DefinitionUnfolder::new(&registry);
        let mut g = HeapGraph::new();
        let a = g.add_node(NodeKind::Ptr, AllocOrigin::None);
        g.set_points_to(a, vec![Cell::new(0, 8, a)]).unwrap();

        let err = unfolder
            .unfold(false, EmptyPreference::PreferEmpty, a, &g)
            .unwrap_err();
        assert!(!err.is_soft());
    }
}
