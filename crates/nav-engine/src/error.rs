//! Error types for the navigation engine

use nav_model::{NodeId, PathError, Status};

/// Failures of the pure tree operations
///
/// None of these are retried internally. [`EngineError::TargetNotFound`]
/// almost always means the caller holds a stale forest and should refetch.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// Id absent from the forest, or the path no longer matches it
    #[error("target not found: {0}")]
    TargetNotFound(NodeId),

    /// Nested-only operation invoked on a root menu
    #[error("operation '{operation}' is not valid on root menu {id}")]
    InvalidOperationAtRoot { operation: &'static str, id: NodeId },

    /// Root-only operation invoked on a nested item
    #[error("{0} is not a root menu")]
    NotARoot(NodeId),

    /// Id would occur twice in the forest
    #[error("duplicate node id: {0}")]
    DuplicateId(NodeId),

    /// Status change outside the review workflow
    #[error("illegal status transition for {id}: {from} -> {to}")]
    IllegalTransition { id: NodeId, from: Status, to: Status },

    /// Path construction failed
    #[error("path error: {0}")]
    Path(String),
}

impl EngineError {
    /// Whether the caller should refetch the forest before trying again
    #[inline]
    #[must_use]
    pub fn should_refresh(&self) -> bool {
        matches!(self, Self::TargetNotFound(_))
    }

    /// Id the error refers to (if any)
    #[must_use]
    pub fn node_id(&self) -> Option<&NodeId> {
        match self {
            Self::TargetNotFound(id)
            | Self::NotARoot(id)
            | Self::DuplicateId(id)
            | Self::InvalidOperationAtRoot { id, .. }
            | Self::IllegalTransition { id, .. } => Some(id),
            Self::Path(_) => None,
        }
    }
}

impl From<PathError> for EngineError {
    fn from(err: PathError) -> Self {
        Self::Path(err.to_string())
    }
}
