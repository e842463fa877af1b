//! Fact-based left oracle
//!
//! Keeps equalities as union-find classes, per-class constants, and
//! disequalities between classes or against constants. Queries are decided
//! only when the normalized difference `lhs - rhs` is a constant or one of
//! the recorded (dis)equalities; everything else is answered `false`.

use rustc_hash::FxHashMap;
use tracing::{trace, warn};

use super::union_find::NodeUnionFind;
use crate::features::inclusion::ports::LeftOracle;
use crate::shared::models::{CmpOp, HeapGraph, LinExpr, NodeId, NumConstraint, ShapeEdge};

#[derive(Debug, Clone, Default)]
pub struct FactOracle {
    classes: NodeUnionFind,
    /// Known value per class, keyed by class representative
    constants: FxHashMap<NodeId, i64>,
    disequalities: Vec<(NodeId, NodeId)>,
    /// `node ≠ value`
    excluded_values: Vec<(NodeId, i64)>,
    /// Conflicting constants were recorded: every query holds vacuously
    contradiction: bool,
}

impl FactOracle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Oracle knowing that every points-to owner of `graph` is non-null
    pub fn from_graph(graph: &HeapGraph) -> Self {
        let mut oracle = Self::new();
        for node in graph.nodes() {
            if matches!(node.edge, ShapeEdge::PointsTo(_)) {
                oracle.excluded_values.push((node.id, 0));
            }
        }
        oracle
    }

    pub fn with_equal(mut self, a: NodeId, b: NodeId) -> Self {
        self.assume_equal(a, b);
        self
    }

    pub fn with_constant(mut self, node: NodeId, value: i64) -> Self {
        self.assume_constant(node, value);
        self
    }

    pub fn with_disequal(mut self, a: NodeId, b: NodeId) -> Self {
        self.disequalities.push((a, b));
        self
    }

    pub fn with_non_null(mut self, node: NodeId) -> Self {
        self.excluded_values.push((node, 0));
        self
    }

    /// Record a fact of the shapes `x = y`, `x = c`, `x ≠ y`, `x ≠ c`
    ///
    /// Returns false (and ignores the fact) for any other shape.
    pub fn assume(&mut self, fact: &NumConstraint) -> bool {
        let (lhs, rhs) = (&fact.lhs, &fact.rhs);
        match (fact.op, lhs.as_var(), rhs.as_var()) {
            (CmpOp::Eq, Some(a), Some(b)) => self.assume_equal(a, b),
            (CmpOp::Ne, Some(a), Some(b)) => self.disequalities.push((a, b)),
            (CmpOp::Eq, Some(a), None) if rhs.is_constant() => self.assume_constant(a, rhs.constant),
            (CmpOp::Eq, None, Some(b)) if lhs.is_constant() => self.assume_constant(b, lhs.constant),
            (CmpOp::Ne, Some(a), None) if rhs.is_constant() => {
                self.excluded_values.push((a, rhs.constant))
            }
            (CmpOp::Ne, None, Some(b)) if lhs.is_constant() => {
                self.excluded_values.push((b, lhs.constant))
            }
            _ => {
                warn!("fact oracle ignores {}", fact);
                return false;
            }
        }
        true
    }

    fn assume_equal(&mut self, a: NodeId, b: NodeId) {
        let va = self.value(a);
        let vb = self.value(b);
        let root = self.classes.union(a, b);
        match (va, vb) {
            (Some(x), Some(y)) if x != y => self.contradiction = true,
            (Some(v), _) | (_, Some(v)) => {
                self.constants.insert(root, v);
            }
            _ => {}
        }
    }

    fn assume_constant(&mut self, node: NodeId, value: i64) {
        let root = self.classes.find(node);
        match self.constants.get(&root) {
            Some(&existing) if existing != value => self.contradiction = true,
            _ => {
                self.constants.insert(root, value);
            }
        }
    }

    /// Known value of `node`
    pub fn value(&self, node: NodeId) -> Option<i64> {
        self.constants
            .get(&self.classes.find_readonly(node))
            .copied()
    }

    /// Rewrite to class representatives and fold known constants
    fn normalize(&self, expr: &LinExpr) -> LinExpr {
        let mut out = LinExpr::constant(expr.constant);
        for (&node, &coeff) in &expr.terms {
            let root = self.classes.find_readonly(node);
            match self.constants.get(&root) {
                Some(&value) => out.constant += coeff * value,
                None => out.add_term(root, coeff),
            }
        }
        out
    }

    fn excludes(&self, root: NodeId, value: i64) -> bool {
        self.excluded_values
            .iter()
            .any(|&(n, v)| v == value && self.classes.find_readonly(n) == root)
            || self.disequalities.iter().any(|&(a, b)| {
                let (ra, rb) = (self.classes.find_readonly(a), self.classes.find_readonly(b));
                (ra == root && self.value(b) == Some(value))
                    || (rb == root && self.value(a) == Some(value))
            })
    }

    fn distinct_classes(&self, x: NodeId, y: NodeId) -> bool {
        self.disequalities.iter().any(|&(a, b)| {
            let (ra, rb) = (self.classes.find_readonly(a), self.classes.find_readonly(b));
            (ra == x && rb == y) || (ra == y && rb == x)
        })
    }
}

impl LeftOracle for FactOracle {
    fn sat(&self, constraint: &NumConstraint) -> bool {
        if self.contradiction {
            return true;
        }
        let diff = self.normalize(&constraint.difference());
        let holds = if diff.is_constant() {
            let k = diff.constant;
            match constraint.op {
                CmpOp::Eq => k == 0,
                CmpOp::Ne => k != 0,
                CmpOp::Le => k <= 0,
                CmpOp::Lt => k < 0,
            }
        } else if constraint.op == CmpOp::Ne {
            let terms: Vec<(NodeId, i64)> = diff.terms.iter().map(|(&n, &c)| (n, c)).collect();
            match terms.as_slice() {
                // c·x + k ≠ 0 with c = ±1
                &[(x, 1)] => self.excludes(x, -diff.constant),
                &[(x, -1)] => self.excludes(x, diff.constant),
                &[(x, 1), (y, -1)] | &[(y, -1), (x, 1)] if diff.constant == 0 => {
                    self.distinct_classes(x, y)
                }
                _ => false,
            }
        } else {
            false
        };
        trace!("fact oracle: {} ⇒ {}", constraint, holds);
        holds
    }

    fn diseq(&self, a: NodeId, b: NodeId) -> bool {
        if self.contradiction {
            return true;
        }
        let (ra, rb) = (self.classes.find_readonly(a), self.classes.find_readonly(b));
        if ra == rb {
            return false;
        }
        match (self.value(a), self.value(b)) {
            (Some(x), Some(y)) => x != y,
            (Some(x), None) => self.excludes(rb, x) || self.distinct_classes(ra, rb),
            (None, Some(y)) => self.excludes(ra, y) || self.distinct_classes(ra, rb),
            (None, None) => self.distinct_classes(ra, rb),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::models::{AllocOrigin, Cell, NodeKind};

    #[test]
    fn test_points_to_owners_are_non_null() {
        let mut g = HeapGraph::new();
        let a = g.add_node(NodeKind::Ptr, AllocOrigin::Heap(0));
        let b = g.add_node(NodeKind::Ptr, AllocOrigin::None);
        g.set_points_to(a, vec![Cell::new(0, 8, b)]).unwrap();

        let oracle = FactOracle::from_graph(&g);
        assert!(oracle.sat(&NumConstraint::non_null(a)));
        assert!(!oracle.sat(&NumConstraint::non_null(b)));
        assert!(!oracle.diseq(a, b));
    }

    #[test]
    fn test_equalities_and_constants() {
        let oracle = FactOracle::new()
            .with_equal(NodeId(1), NodeId(2))
            .with_constant(NodeId(2), 0);
        assert!(oracle.sat(&NumConstraint::is_null(NodeId(1))));
        assert!(oracle.sat(&NumConstraint::equal(NodeId(1), NodeId(2))));
        assert!(oracle.sat(&NumConstraint::new(NodeId(1), CmpOp::Le, LinExpr::constant(3))));
        assert!(!oracle.sat(&NumConstraint::new(NodeId(1), CmpOp::Lt, LinExpr::constant(0))));
        assert!(!oracle.sat(&NumConstraint::equal(NodeId(1), NodeId(3))));
        assert_eq!(oracle.value(NodeId(1)), Some(0));
    }

    #[test]
    fn test_disequalities() {
        let oracle = FactOracle::new()
            .with_disequal(NodeId(1), NodeId(2))
            .with_constant(NodeId(3), 0)
            .with_non_null(NodeId(4));
        assert!(oracle.diseq(NodeId(2), NodeId(1)));
        assert!(oracle.sat(&NumConstraint::not_equal(NodeId(1), NodeId(2))));
        assert!(oracle.diseq(NodeId(3), NodeId(4)));
        assert!(!oracle.diseq(NodeId(1), NodeId(3)));
        assert!(!oracle.sat(&NumConstraint::not_equal(NodeId(1), NodeId(5))));
    }

    #[test]
    fn test_assume_shapes() {
        let mut oracle = FactOracle::new();
        assert!(oracle.assume(&NumConstraint::is_null(NodeId(1))));
        assert!(oracle.assume(&NumConstraint::not_equal(NodeId(2), NodeId(1))));
        let mut sum = LinExpr::var(NodeId(1));
        sum.add_term(NodeId(2), 1);
        assert!(!oracle.assume(&NumConstraint::equal(sum, NodeId(3))));
        assert!(oracle.sat(&NumConstraint::non_null(NodeId(2))));
    }
}
