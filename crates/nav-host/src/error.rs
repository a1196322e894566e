//! Error types for the navigation host
//!
//! Provides error handling for:
//! - Engine failures (stale targets, invalid operations)
//! - Remote store failures on fetch and persist
//! - Concurrent edits of a root that is being saved
//! - Configuration loading

use nav_engine::EngineError;
use nav_model::{NodeId, NodeRecord};

/// Failure reported by a [`ForestStore`](crate::ForestStore)
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// Store refused the request (validation, permissions, conflict)
    #[error("store rejected request: {0}")]
    Rejected(String),

    /// Store does not know the addressed root
    #[error("root not found in store: {0}")]
    NotFound(String),

    /// Store could not be reached
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Reading the file failed
    #[error("reading config failed: {0}")]
    Io(#[from] std::io::Error),

    /// TOML did not parse
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Parsed, but unusable
    #[error("invalid config value: {0}")]
    Invalid(String),
}

/// Main host error type
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    /// Pure engine operation failed
    #[error("engine error: {0}")]
    Engine(#[from] EngineError),

    /// Loading the forest failed
    #[error("fetching forest failed: {0}")]
    Fetch(#[source] StoreError),

    /// Store refused a save; in-memory forest left unchanged
    #[error("persisting root {root} rejected: {source}")]
    PersistenceRejected {
        /// Root that was being saved
        root: NodeId,
        /// Fragment that was sent, for retry or display
        attempted: Box<NodeRecord>,
        #[source]
        source: StoreError,
    },

    /// Root is being persisted; editing is disabled until it lands
    #[error("root {0} is being saved, try again when it completes")]
    RootBusy(NodeId),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl HostError {
    /// Whether the caller should refetch the forest before retrying
    #[must_use]
    pub fn should_refresh(&self) -> bool {
        match self {
            Self::Engine(err) => err.should_refresh(),
            Self::PersistenceRejected { source, .. } => matches!(source, StoreError::NotFound(_)),
            _ => false,
        }
    }

    /// Fragment that failed to persist (if any)
    #[must_use]
    pub fn attempted_fragment(&self) -> Option<&NodeRecord> {
        match self {
            Self::PersistenceRejected { attempted, .. } => Some(&**attempted),
            _ => None,
        }
    }

    /// Check if a plain retry could succeed
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::RootBusy(_)
                | Self::Fetch(StoreError::Unavailable(_))
                | Self::PersistenceRejected {
                    source: StoreError::Unavailable(_),
                    ..
                }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rejected(source: StoreError) -> HostError {
        HostError::PersistenceRejected {
            root: NodeId::persisted("r1"),
            attempted: Box::new(NodeRecord::default()),
            source,
        }
    }

    #[test]
    fn host_error_display() {
        let err = HostError::RootBusy(NodeId::persisted("r1"));
        assert!(err.to_string().contains("r1"));
        assert!(rejected(StoreError::Rejected("bad title".into())).to_string().contains("bad title"));
    }

    #[test]
    fn refresh_advice() {
        let stale = HostError::from(EngineError::TargetNotFound(NodeId::persisted("x")));
        assert!(stale.should_refresh());
        assert!(rejected(StoreError::NotFound("r1".into())).should_refresh());
        assert!(!rejected(StoreError::Rejected("no".into())).should_refresh());
        assert!(!HostError::RootBusy(NodeId::persisted("r1")).should_refresh());
    }

    #[test]
    fn retry_advice() {
        assert!(HostError::RootBusy(NodeId::persisted("r1")).is_retryable());
        assert!(rejected(StoreError::Unavailable("timeout".into())).is_retryable());
        assert!(!rejected(StoreError::Rejected("no".into())).is_retryable());
    }

    #[test]
    fn attempted_fragment_only_on_rejection() {
        assert!(rejected(StoreError::Rejected("no".into())).attempted_fragment().is_some());
        assert!(HostError::RootBusy(NodeId::persisted("r1")).attempted_fragment().is_none());
    }
}
