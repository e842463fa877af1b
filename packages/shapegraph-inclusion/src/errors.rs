//! Error types for shapegraph-inclusion
//!
//! Two tiers:
//! - **soft** failures are legitimate "not included" answers (shape mismatch,
//!   conflicting identification, exhausted case splits). The backtracking
//!   search moves on to the next alternative and the entry points turn them
//!   into a negative result.
//! - **hard** failures (fatal, not implemented, malformed graph) mean a broken
//!   precondition. They propagate through every choice point untouched.

use thiserror::Error;

use crate::features::inclusion::domain::embedding::EmbeddingError;
use crate::shared::models::{GraphError, NodeId};

/// Main error type for inclusion checking
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InclusionError {
    /// The right graph is not included in the left one (on this branch)
    #[error("not included: {reason}")]
    NotIncluded { reason: String },

    /// Every unfolding alternative at `node` failed
    #[error("no successful branch when unfolding {node}")]
    NoSuccessfulBranch { node: NodeId },

    /// Nested case splits exceeded the configured bound
    #[error("unfolding depth {depth} exceeded")]
    DepthExceeded { depth: usize },

    /// Violated structural precondition (caller or classifier bug)
    #[error("fatal: {reason}")]
    Fatal { reason: String },

    /// Recognized case without an implementation
    #[error("not implemented: {case}")]
    NotImplemented { case: String },

    /// Malformed graph access
    #[error("graph error: {0}")]
    Graph(#[from] GraphError),
}

impl InclusionError {
    /// Create a soft inclusion failure
    pub fn not_included(reason: impl Into<String>) -> Self {
        InclusionError::NotIncluded {
            reason: reason.into(),
        }
    }

    /// Create a fatal error
    pub fn fatal(reason: impl Into<String>) -> Self {
        InclusionError::Fatal {
            reason: reason.into(),
        }
    }

    /// Create a not-implemented error
    pub fn not_implemented(case: impl Into<String>) -> Self {
        InclusionError::NotImplemented { case: case.into() }
    }

    /// Soft failures may be absorbed by a backtracking point
    pub fn is_soft(&self) -> bool {
        matches!(
            self,
            InclusionError::NotIncluded { .. }
                | InclusionError::NoSuccessfulBranch { .. }
                | InclusionError::DepthExceeded { .. }
        )
    }
}

impl From<EmbeddingError> for InclusionError {
    fn from(err: EmbeddingError) -> Self {
        InclusionError::not_included(err.to_string())
    }
}

/// Result type alias for inclusion operations
pub type InclusionResult<T> = std::result::Result<T, InclusionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_tiers() {
        assert!(InclusionError::not_included("size mismatch").is_soft());
        assert!(InclusionError::NoSuccessfulBranch { node: NodeId(1) }.is_soft());
        assert!(InclusionError::DepthExceeded { depth: 3 }.is_soft());
        assert!(!InclusionError::fatal("predicate mismatch").is_soft());
        assert!(!InclusionError::not_implemented("segment at stop node").is_soft());
        assert!(!InclusionError::from(GraphError::UnknownNode(NodeId(4))).is_soft());
    }

    #[test]
    fn test_embedding_errors_are_soft() {
        let err: InclusionError = EmbeddingError::NotMapped(NodeId(2)).into();
        assert!(err.is_soft());
        assert_eq!(err.to_string(), "not included: node n2 is not mapped");
    }
}
