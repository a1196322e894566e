//! Ancestor paths for addressing nodes within a forest
//!
//! Provides [`NodePath`], the chain of nodes from a root menu down to (and
//! including) a target node. Paths are snapshots: they are only meaningful
//! against the forest they were resolved from.

use crate::id::NodeId;
use crate::node::Node;
use std::fmt::{self, Display, Formatter};
use std::sync::Arc;

/// One link of a path: a node and its position among its siblings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathStep {
    /// Index within the parent's children (or the forest's roots)
    pub index: usize,
    pub node: Arc<Node>,
}

impl PathStep {
    #[inline]
    #[must_use]
    pub fn new(index: usize, node: Arc<Node>) -> Self {
        Self { index, node }
    }

    #[inline]
    #[must_use]
    pub fn id(&self) -> &NodeId {
        &self.node.id
    }
}

/// Path from a root menu to a target node
///
/// # Invariants
/// - Never empty: the first step is a root, the last is the target
/// - Each step's node is a child of the previous step's node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodePath(Vec<PathStep>);

impl NodePath {
    /// Create path from steps
    ///
    /// # Errors
    /// Returns error if `steps` is empty
    pub fn new(steps: Vec<PathStep>) -> Result<Self, PathError> {
        if steps.is_empty() {
            return Err(PathError::Empty);
        }
        Ok(Self(steps))
    }

    /// Path of length one addressing a root
    #[inline]
    #[must_use]
    pub fn root(index: usize, node: Arc<Node>) -> Self {
        Self(vec![PathStep::new(index, node)])
    }

    /// Get path steps, root first
    #[inline]
    #[must_use]
    pub fn steps(&self) -> &[PathStep] {
        &self.0
    }

    /// Number of steps (depth + 1)
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; paths hold at least one step
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Target is itself a root menu
    #[inline]
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0.len() == 1
    }

    /// Root menu the path starts from
    #[inline]
    #[must_use]
    pub fn first(&self) -> &PathStep {
        &self.0[0]
    }

    /// Node the path addresses
    #[inline]
    #[must_use]
    pub fn target(&self) -> &PathStep {
        &self.0[self.0.len() - 1]
    }

    /// Direct parent of the target (if not a root)
    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<&PathStep> {
        self.0.len().checked_sub(2).map(|i| &self.0[i])
    }

    /// Every step except the target
    #[inline]
    #[must_use]
    pub fn ancestors(&self) -> &[PathStep] {
        &self.0[..self.0.len() - 1]
    }

    /// Path to the parent (if not a root)
    #[must_use]
    pub fn parent_path(&self) -> Option<Self> {
        if self.is_root() {
            None
        } else {
            Some(Self(self.0[..self.0.len() - 1].to_vec()))
        }
    }

    /// Ids from root to target
    #[must_use]
    pub fn ids(&self) -> Vec<NodeId> {
        self.0.iter().map(|s| s.node.id.clone()).collect()
    }

    /// Iterator over steps from root to target
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &PathStep> {
        self.0.iter()
    }
}

impl Display for NodePath {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let ids: Vec<&str> = self.0.iter().map(|s| s.node.id.as_str()).collect();
        write!(f, "{}", ids.join(" > "))
    }
}

/// Errors related to node paths
#[derive(Debug, thiserror::Error)]
pub enum PathError {
    /// Path without steps
    #[error("path must contain at least one node")]
    Empty,
}
