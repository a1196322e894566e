//! Two-namespace node identities
//!
//! A [`NodeId`] is either issued by the remote store (persisted) or derived
//! locally for a node the store has not seen yet (synthesized). The two
//! namespaces never compare equal, even when their text happens to match.

use std::fmt::{self, Display, Formatter};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
enum Namespace {
    Persisted,
    Synthesized,
}

/// Identifier of a node within a forest
///
/// Cheap to clone (shared string). Use [`NodeId::is_persisted`] rather than
/// inspecting the text to decide whether the store knows this node.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId {
    namespace: Namespace,
    value: Arc<str>,
}

impl NodeId {
    /// Identifier issued by the remote store
    #[inline]
    #[must_use]
    pub fn persisted(value: impl AsRef<str>) -> Self {
        Self {
            namespace: Namespace::Persisted,
            value: Arc::from(value.as_ref()),
        }
    }

    /// Locally derived identifier for a node awaiting its first save
    #[inline]
    #[must_use]
    pub fn synthesized(value: impl AsRef<str>) -> Self {
        Self {
            namespace: Namespace::Synthesized,
            value: Arc::from(value.as_ref()),
        }
    }

    /// Whether the remote store issued this identifier
    #[inline]
    #[must_use]
    pub fn is_persisted(&self) -> bool {
        self.namespace == Namespace::Persisted
    }

    /// Identifier text
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Text the store should see for this id: `None` when synthesized
    #[inline]
    #[must_use]
    pub fn store_key(&self) -> Option<&str> {
        self.is_persisted().then(|| self.as_str())
    }
}

impl Display for NodeId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl serde::Serialize for NodeId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.value)
    }
}
