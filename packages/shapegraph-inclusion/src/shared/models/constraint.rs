//! Numeric constraints over node values
//!
//! Linear arithmetic only: `a₁·n₁ + ... + aₖ·nₖ + c  <op>  b₁·m₁ + ... + d`.
//! Node ids stand for the numeric value of the node (an address for pointer
//! nodes, a scalar for integer nodes); null is the constant 0.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::node::NodeId;

/// Linear expression `Σ coeff·node + constant`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct LinExpr {
    /// Non-zero coefficients only
    #[serde(default)]
    pub terms: BTreeMap<NodeId, i64>,
    #[serde(default)]
    pub constant: i64,
}

impl LinExpr {
    pub fn var(node: NodeId) -> Self {
        let mut terms = BTreeMap::new();
        terms.insert(node, 1);
        Self { terms, constant: 0 }
    }

    pub fn constant(constant: i64) -> Self {
        Self {
            terms: BTreeMap::new(),
            constant,
        }
    }

    pub fn null() -> Self {
        Self::constant(0)
    }

    /// Add `coeff·node`, dropping the term when it cancels out
    pub fn add_term(&mut self, node: NodeId, coeff: i64) {
        let entry = self.terms.entry(node).or_insert(0);
        *entry += coeff;
        if *entry == 0 {
            self.terms.remove(&node);
        }
    }

    /// `self - other`
    pub fn minus(&self, other: &LinExpr) -> LinExpr {
        let mut out = self.clone();
        for (&node, &coeff) in &other.terms {
            out.add_term(node, -coeff);
        }
        out.constant -= other.constant;
        out
    }

    pub fn is_constant(&self) -> bool {
        self.terms.is_empty()
    }

    /// `Some(n)` when the expression is exactly the node `n`
    pub fn as_var(&self) -> Option<NodeId> {
        if self.constant != 0 || self.terms.len() != 1 {
            return None;
        }
        self.terms
            .iter()
            .next()
            .filter(|(_, coeff)| **coeff == 1)
            .map(|(&node, _)| node)
    }

    pub fn vars(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.terms.keys().copied()
    }

    /// Rename every variable; `None` as soon as one variable has no image
    pub fn translate(&self, mut image: impl FnMut(NodeId) -> Option<NodeId>) -> Option<LinExpr> {
        let mut out = LinExpr::constant(self.constant);
        for (&node, &coeff) in &self.terms {
            out.add_term(image(node)?, coeff);
        }
        Some(out)
    }

    /// Replace variables by expressions where `subst` has one
    pub fn substitute(&self, subst: impl Fn(NodeId) -> Option<LinExpr>) -> LinExpr {
        let mut out = LinExpr::constant(self.constant);
        for (&node, &coeff) in &self.terms {
            match subst(node) {
                Some(expr) => {
                    for (&n, &c) in &expr.terms {
                        out.add_term(n, c * coeff);
                    }
                    out.constant += expr.constant * coeff;
                }
                None => out.add_term(node, coeff),
            }
        }
        out
    }
}

impl From<NodeId> for LinExpr {
    fn from(node: NodeId) -> Self {
        Self::var(node)
    }
}

impl fmt::Display for LinExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (node, coeff) in &self.terms {
            if !first {
                write!(f, " + ")?;
            }
            first = false;
            if *coeff == 1 {
                write!(f, "{}", node)?;
            } else {
                write!(f, "{}·{}", coeff, node)?;
            }
        }
        if first {
            write!(f, "{}", self.constant)
        } else if self.constant != 0 {
            write!(f, " + {}", self.constant)
        } else {
            Ok(())
        }
    }
}

/// Comparison operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CmpOp {
    Eq,
    Ne,
    Le,
    Lt,
}

impl CmpOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Ne => "≠",
            Self::Le => "≤",
            Self::Lt => "<",
        }
    }
}

/// `lhs <op> rhs`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NumConstraint {
    pub lhs: LinExpr,
    pub op: CmpOp,
    pub rhs: LinExpr,
}

impl NumConstraint {
    pub fn new(lhs: impl Into<LinExpr>, op: CmpOp, rhs: impl Into<LinExpr>) -> Self {
        Self {
            lhs: lhs.into(),
            op,
            rhs: rhs.into(),
        }
    }

    pub fn equal(lhs: impl Into<LinExpr>, rhs: impl Into<LinExpr>) -> Self {
        Self::new(lhs, CmpOp::Eq, rhs)
    }

    pub fn not_equal(lhs: impl Into<LinExpr>, rhs: impl Into<LinExpr>) -> Self {
        Self::new(lhs, CmpOp::Ne, rhs)
    }

    pub fn is_null(node: NodeId) -> Self {
        Self::equal(node, LinExpr::null())
    }

    pub fn non_null(node: NodeId) -> Self {
        Self::not_equal(node, LinExpr::null())
    }

    /// `lhs - rhs`, the normal form the oracles reason about
    pub fn difference(&self) -> LinExpr {
        self.lhs.minus(&self.rhs)
    }

    pub fn vars(&self) -> Vec<NodeId> {
        let mut vars: Vec<NodeId> = self.lhs.vars().chain(self.rhs.vars()).collect();
        vars.sort();
        vars.dedup();
        vars
    }

    /// `Some((a, b))` for the exact shape `a <op> b` over two single nodes
    pub fn as_var_pair(&self) -> Option<(NodeId, NodeId)> {
        Some((self.lhs.as_var()?, self.rhs.as_var()?))
    }

    /// Rename both sides; `None` when some variable has no image
    pub fn translate(&self, mut image: impl FnMut(NodeId) -> Option<NodeId>) -> Option<Self> {
        Some(Self {
            lhs: self.lhs.translate(&mut image)?,
            op: self.op,
            rhs: self.rhs.translate(&mut image)?,
        })
    }
}

impl fmt::Display for NumConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.lhs, self.op.as_str(), self.rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difference_cancels() {
        let c = NumConstraint::equal(NodeId(1), NodeId(1));
        assert!(c.difference().is_constant());
        assert_eq!(c.difference().constant, 0);
    }

    #[test]
    fn test_as_var_pair() {
        let c = NumConstraint::not_equal(NodeId(1), NodeId(2));
        assert_eq!(c.as_var_pair(), Some((NodeId(1), NodeId(2))));
        assert_eq!(NumConstraint::non_null(NodeId(1)).as_var_pair(), None);
    }

    #[test]
    fn test_translate_partial_map() {
        let c = NumConstraint::equal(NodeId(1), NodeId(2));
        let full = c.translate(|n| Some(NodeId(n.0 + 10))).unwrap();
        assert_eq!(full, NumConstraint::equal(NodeId(11), NodeId(12)));
        assert!(c.translate(|n| (n == NodeId(1)).then_some(n)).is_none());
    }

    #[test]
    fn test_substitute_and_display() {
        let mut e = LinExpr::var(NodeId(1));
        e.add_term(NodeId(2), 2);
        e.constant = 3;
        let s = e.substitute(|n| (n == NodeId(2)).then(|| LinExpr::constant(4)));
        assert_eq!(s.constant, 11);
        assert_eq!(s.as_var(), None);
        assert_eq!(LinExpr::var(NodeId(4)).to_string(), "n4");
        assert_eq!(NumConstraint::is_null(NodeId(4)).to_string(), "n4 = 0");
    }
}
