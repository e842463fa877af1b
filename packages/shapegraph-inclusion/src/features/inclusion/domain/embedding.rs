//! Node embedding
//!
//! Partial map from right-graph nodes to left-graph nodes. It only grows:
//! once `r ↦ l` is recorded, `r` keeps that image for the rest of the
//! check. Several right nodes may share one image (segment-empty cases
//! identify right nodes with each other).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

use crate::shared::models::NodeId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmbeddingError {
    #[error("node {0} is not mapped")]
    NotMapped(NodeId),

    #[error("node {right} already mapped to {existing}, cannot remap to {proposed}")]
    Conflict {
        right: NodeId,
        existing: NodeId,
        proposed: NodeId,
    },
}

/// Right → left node correspondence
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeEmbedding {
    map: BTreeMap<NodeId, NodeId>,
}

impl NodeEmbedding {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs(pairs: impl IntoIterator<Item = (NodeId, NodeId)>) -> Result<Self, EmbeddingError> {
        let mut embedding = Self::new();
        for (right, left) in pairs {
            embedding.add(right, left)?;
        }
        Ok(embedding)
    }

    /// Image of `right`
    pub fn find(&self, right: NodeId) -> Result<NodeId, EmbeddingError> {
        self.get(right).ok_or(EmbeddingError::NotMapped(right))
    }

    pub fn get(&self, right: NodeId) -> Option<NodeId> {
        self.map.get(&right).copied()
    }

    pub fn contains(&self, right: NodeId) -> bool {
        self.map.contains_key(&right)
    }

    /// Record `right ↦ left`
    ///
    /// Re-adding the same pair is a no-op; a different image is rejected.
    pub fn add(&mut self, right: NodeId, left: NodeId) -> Result<(), EmbeddingError> {
        match self.map.get(&right) {
            Some(&existing) if existing == left => Ok(()),
            Some(&existing) => Err(EmbeddingError::Conflict {
                right,
                existing,
                proposed: left,
            }),
            None => {
                self.map.insert(right, left);
                Ok(())
            }
        }
    }

    pub fn image(&self) -> &BTreeMap<NodeId, NodeId> {
        &self.map
    }

    pub fn into_image(self) -> BTreeMap<NodeId, NodeId> {
        self.map
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.map.iter().map(|(&r, &l)| (r, l))
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
