//! Union-Find over node ids
//!
//! Path compression on mutable finds, union by rank. Elements are created
//! lazily: an id never seen is its own singleton class.

use rustc_hash::FxHashMap;

use crate::shared::models::NodeId;

#[derive(Debug, Clone, Default)]
pub struct NodeUnionFind {
    /// Parent pointers; roots are absent or point to themselves
    parent: FxHashMap<NodeId, NodeId>,
    rank: FxHashMap<NodeId, u8>,
}

impl NodeUnionFind {
    pub fn new() -> Self {
        Self::default()
    }

    /// Representative of `x` with path compression
    pub fn find(&mut self, x: NodeId) -> NodeId {
        let parent = match self.parent.get(&x) {
            Some(&p) if p != x => p,
            _ => return x,
        };
        let root = self.find(parent);
        self.parent.insert(x, root);
        root
    }

    /// Find without path compression (for read-only queries)
    pub fn find_readonly(&self, x: NodeId) -> NodeId {
        let mut current = x;
        while let Some(&p) = self.parent.get(&current) {
            if p == current {
                break;
            }
            current = p;
        }
        current
    }

    /// Union two classes by rank; returns the new representative
    pub fn union(&mut self, x: NodeId, y: NodeId) -> NodeId {
        let root_x = self.find(x);
        let root_y = self.find(y);
        if root_x == root_y {
            return root_x;
        }

        let rank_x = self.rank.get(&root_x).copied().unwrap_or(0);
        let rank_y = self.rank.get(&root_y).copied().unwrap_or(0);
        if rank_x < rank_y {
            self.parent.insert(root_x, root_y);
            root_y
        } else {
            self.parent.insert(root_y, root_x);
            if rank_x == rank_y {
                self.rank.insert(root_x, rank_x + 1);
            }
            root_x
        }
    }

    /// Check connectivity without modifying structure
    pub fn connected_readonly(&self, x: NodeId, y: NodeId) -> bool {
        self.find_readonly(x) == self.find_readonly(y)
    }
}
