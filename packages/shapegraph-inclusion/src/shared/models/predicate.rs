//! Inductive predicate definitions
//!
//! A predicate `P(α | π⃗ | ι⃗)` is a finite disjunction of rules. Each rule is
//! either an *empty* case (`emp` plus pure facts, typically `α = 0`) or a
//! *non-empty* case: a points-to block at `α`, fresh existential nodes and
//! recursive calls.
//!
//! ```text
//! list(α)        := emp ∧ α = 0
//!                 | α ↦ { 0: β } * β · list() ∧ α ≠ 0
//! tree_p(α | p)  := emp ∧ α = 0
//!                 | α ↦ { 0: l, 8: r, 16: p } * l · tree_p(α) * r · tree_p(α) ∧ α ≠ 0
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::node::AllocOrigin;

/// Predicate identifier (index into a [`PredicateRegistry`])
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PredicateId(pub u32);

impl fmt::Display for PredicateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}

/// Term used inside a rule body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleTerm {
    /// The node the predicate is attached to
    Owner,
    /// The numeric constant 0
    Null,
    /// i-th existential node introduced by the rule
    Fresh(usize),
    /// i-th pointer parameter
    PtrArg(usize),
    /// i-th integer parameter
    IntArg(usize),
}

/// Cell of the block a non-empty rule allocates at the owner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleCell {
    pub offset: i64,
    pub size: u32,
    pub target: RuleTerm,
}

/// Recursive call `owner · pred(ptr_args | int_args)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleCall {
    pub pred: PredicateId,
    pub owner: RuleTerm,
    #[serde(default)]
    pub ptr_args: Vec<RuleTerm>,
    #[serde(default)]
    pub int_args: Vec<RuleTerm>,
}

/// Pure fact attached to a rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RulePure {
    Eq(RuleTerm, RuleTerm),
    Ne(RuleTerm, RuleTerm),
}

/// One disjunct of an inductive definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InductiveRule {
    /// Number of fresh pointer nodes
    #[serde(default)]
    pub fresh_ptrs: usize,
    /// Number of fresh integer nodes (indices continue after the pointers)
    #[serde(default)]
    pub fresh_ints: usize,
    #[serde(default)]
    pub cells: Vec<RuleCell>,
    #[serde(default)]
    pub calls: Vec<RuleCall>,
    #[serde(default)]
    pub pure: Vec<RulePure>,
}

impl InductiveRule {
    /// Empty rule: no memory, only pure facts
    pub fn empty(pure: Vec<RulePure>) -> Self {
        Self {
            fresh_ptrs: 0,
            fresh_ints: 0,
            cells: Vec::new(),
            calls: Vec::new(),
            pure,
        }
    }

    pub fn is_empty_case(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Inductive definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InductiveDef {
    pub name: String,
    #[serde(default)]
    pub ptr_arity: usize,
    #[serde(default)]
    pub int_arity: usize,
    /// A null owner forces the empty case
    #[serde(default)]
    pub null_implies_empty: bool,
    /// The empty case says nothing about the parameters
    #[serde(default)]
    pub empty_case_param_free: bool,
    /// Allocation origin given to blocks produced by unfolding
    #[serde(default)]
    pub block_origin: AllocOrigin,
    pub rules: Vec<InductiveRule>,
}

impl InductiveDef {
    pub fn empty_rules(&self) -> impl Iterator<Item = &InductiveRule> {
        self.rules.iter().filter(|r| r.is_empty_case())
    }

    pub fn non_empty_rules(&self) -> impl Iterator<Item = &InductiveRule> {
        self.rules.iter().filter(|r| !r.is_empty_case())
    }

    /// Trivial when the owner is null: unification of parameters can be skipped
    pub fn trivial_when_null(&self) -> bool {
        self.null_implies_empty && self.empty_case_param_free
    }
}

/// Predicate table shared by both graphs of a check
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PredicateRegistry {
    defs: BTreeMap<PredicateId, InductiveDef>,
}

impl PredicateRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a definition and return its id
    pub fn register(&mut self, def: InductiveDef) -> PredicateId {
        let id = PredicateId(self.defs.len() as u32);
        self.defs.insert(id, def);
        id
    }

    pub fn get(&self, id: PredicateId) -> Option<&InductiveDef> {
        self.defs.get(&id)
    }

    pub fn find_by_name(&self, name: &str) -> Option<PredicateId> {
        self.defs
            .iter()
            .find(|(_, def)| def.name == name)
            .map(|(id, _)| *id)
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    /// Singly linked list, `next` field at offset 0
    pub fn list_def(self_id: PredicateId) -> InductiveDef {
        InductiveDef {
            name: "list".to_string(),
            ptr_arity: 0,
            int_arity: 0,
            null_implies_empty: true,
            empty_case_param_free: true,
            block_origin: AllocOrigin::Heap(0),
            rules: vec![
                InductiveRule::empty(vec![RulePure::Eq(RuleTerm::Owner, RuleTerm::Null)]),
                InductiveRule {
                    fresh_ptrs: 1,
                    fresh_ints: 0,
                    cells: vec![RuleCell {
                        offset: 0,
                        size: 8,
                        target: RuleTerm::Fresh(0),
                    }],
                    calls: vec![RuleCall {
                        pred: self_id,
                        owner: RuleTerm::Fresh(0),
                        ptr_args: Vec::new(),
                        int_args: Vec::new(),
                    }],
                    pure: vec![RulePure::Ne(RuleTerm::Owner, RuleTerm::Null)],
                },
            ],
        }
    }

    /// Binary tree with parent pointer: `l` at 0, `r` at 8, `p` at 16
    pub fn tree_parent_def(self_id: PredicateId) -> InductiveDef {
        let child = |i| RuleCall {
            pred: self_id,
            owner: RuleTerm::Fresh(i),
            ptr_args: vec![RuleTerm::Owner],
            int_args: Vec::new(),
        };
        InductiveDef {
            name: "tree_p".to_string(),
            ptr_arity: 1,
            int_arity: 0,
            null_implies_empty: true,
            empty_case_param_free: true,
            block_origin: AllocOrigin::Heap(0),
            rules: vec![
                InductiveRule::empty(vec![RulePure::Eq(RuleTerm::Owner, RuleTerm::Null)]),
                InductiveRule {
                    fresh_ptrs: 2,
                    fresh_ints: 0,
                    cells: vec![
                        RuleCell {
                            offset: 0,
                            size: 8,
                            target: RuleTerm::Fresh(0),
                        },
                        RuleCell {
                            offset: 8,
                            size: 8,
                            target: RuleTerm::Fresh(1),
                        },
                        RuleCell {
                            offset: 16,
                            size: 8,
                            target: RuleTerm::PtrArg(0),
                        },
                    ],
                    calls: vec![child(0), child(1)],
                    pure: vec![RulePure::Ne(RuleTerm::Owner, RuleTerm::Null)],
                },
            ],
        }
    }

    /// Registry holding only `list` (id 0)
    pub fn with_list() -> Self {
        let mut registry = Self::new();
        registry.register(Self::list_def(PredicateId(0)));
        registry
    }

    /// Registry holding `list` (id 0) and `tree_p` (id 1)
    pub fn with_tree_parent() -> Self {
        let mut registry = Self::with_list();
        let next = PredicateId(registry.len() as u32);
        registry.register(Self::tree_parent_def(next));
        registry
    }
}
