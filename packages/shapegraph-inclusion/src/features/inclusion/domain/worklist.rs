//! Prioritized rule worklist
//!
//! One FIFO queue per priority class; a rule that is already pending is not
//! queued a second time.

use rustc_hash::FxHashSet;
use std::collections::VecDeque;

use super::rule::{Rule, RuleKind};

#[derive(Debug, Clone, Default)]
pub struct RuleWorklist {
    queues: [VecDeque<Rule>; RuleKind::CLASSES],
    pending: FxHashSet<Rule>,
}

impl RuleWorklist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `rule`; returns false when it was already pending
    pub fn push(&mut self, rule: Rule) -> bool {
        if !self.pending.insert(rule) {
            return false;
        }
        self.queues[rule.kind.priority()].push_back(rule);
        true
    }

    /// Oldest rule of the most urgent non-empty class
    pub fn pop(&mut self) -> Option<Rule> {
        let rule = self.queues.iter_mut().find_map(|q| q.pop_front())?;
        self.pending.remove(&rule);
        Some(rule)
    }

    pub fn contains(&self, rule: &Rule) -> bool {
        self.pending.contains(rule)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
