//! Rewrite rules of the inclusion procedure
//!
//! A rule is a kind plus the `(left, right)` node pair it applies at. Rules
//! are only a scheduling token: whether the rule still applies is decided
//! again when it is popped from the worklist.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::shared::models::NodeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    /// points-to / points-to
    PtPt,
    /// inductive / inductive
    IndInd,
    /// segment / segment
    SegSeg,
    /// left segment / right inductive
    SegInd,
    /// left emp / right segment with mapped hole
    VoidSeg,
    /// left node in the hint set
    Stop,
    /// case split on the right summary, empty cases first
    UnfoldPreferEmpty,
    /// case split on the right summary, non-empty cases first
    UnfoldPreferNonEmpty,
}

impl RuleKind {
    /// Number of priority classes
    pub const CLASSES: usize = 3;

    /// Lower classes are processed first
    pub fn priority(self) -> usize {
        match self {
            RuleKind::PtPt => 0,
            RuleKind::IndInd
            | RuleKind::SegSeg
            | RuleKind::SegInd
            | RuleKind::VoidSeg
            | RuleKind::Stop => 1,
            RuleKind::UnfoldPreferEmpty | RuleKind::UnfoldPreferNonEmpty => 2,
        }
    }

    pub fn is_unfold(self) -> bool {
        matches!(
            self,
            RuleKind::UnfoldPreferEmpty | RuleKind::UnfoldPreferNonEmpty
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RuleKind::PtPt => "pt-pt",
            RuleKind::IndInd => "ind-ind",
            RuleKind::SegSeg => "seg-seg",
            RuleKind::SegInd => "seg-ind",
            RuleKind::VoidSeg => "void-seg",
            RuleKind::Stop => "stop",
            RuleKind::UnfoldPreferEmpty => "unfold-empty",
            RuleKind::UnfoldPreferNonEmpty => "unfold-non-empty",
        }
    }
}

/// A pending rule application at `(left, right)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rule {
    pub kind: RuleKind,
    pub left: NodeId,
    pub right: NodeId,
}

impl Rule {
    pub fn new(kind: RuleKind, left: NodeId, right: NodeId) -> Self {
        Self { kind, left, right }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({}, {})", self.kind.as_str(), self.left, self.right)
    }
}
