//! Forests of root menus
//!
//! A [`Forest`] is an immutable value. Every "mutating" method returns a new
//! forest and leaves `self` as it was; untouched roots are shared.

use crate::id::NodeId;
use crate::node::{Children, Node};
use crate::record::NodeRecord;
use std::sync::Arc;

/// Ordered sequence of root menus
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Forest {
    roots: Children,
}

impl Forest {
    /// Empty forest
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Forest over an existing root sequence
    #[inline]
    #[must_use]
    pub fn from_roots(roots: Children) -> Self {
        Self { roots }
    }

    /// Root menus in stored order
    #[inline]
    #[must_use]
    pub fn roots(&self) -> &Children {
        &self.roots
    }

    #[inline]
    #[must_use]
    pub fn root_count(&self) -> usize {
        self.roots.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Total nodes at every depth
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.roots.iter().map(|r| r.subtree_len()).sum()
    }

    /// Pre-order traversal in stored order
    #[must_use]
    pub fn iter(&self) -> Iter {
        Iter {
            stack: self.roots.iter().rev().cloned().collect(),
        }
    }

    /// Position of a root by id
    #[must_use]
    pub fn root_position(&self, id: &NodeId) -> Option<usize> {
        self.roots.iter().position(|r| &r.id == id)
    }

    /// Root menu by id
    #[must_use]
    pub fn root(&self, id: &NodeId) -> Option<&Arc<Node>> {
        self.roots.iter().find(|r| &r.id == id)
    }

    /// Follow a chain of ids from a root downwards
    ///
    /// Returns the node reached by the last id, or `None` if any link is
    /// missing.
    #[must_use]
    pub fn walk(&self, ids: &[NodeId]) -> Option<Arc<Node>> {
        let (first, rest) = ids.split_first()?;
        let mut current = self.root(first)?.clone();
        for id in rest {
            let next = current.children.iter().find(|c| &c.id == id)?.clone();
            current = next;
        }
        Some(current)
    }

    /// Append a root menu
    #[must_use]
    pub fn push_root(&self, root: Node) -> Self {
        let mut roots = self.roots.clone();
        roots.push_back(Arc::new(root));
        Self { roots }
    }

    /// Drop a root menu by id; `None` if absent
    #[must_use]
    pub fn remove_root(&self, id: &NodeId) -> Option<Self> {
        let index = self.root_position(id)?;
        let mut roots = self.roots.clone();
        roots.remove(index);
        Some(Self { roots })
    }

    /// Swap a root menu (matched by `id`) for `root`; `None` if absent
    #[must_use]
    pub fn replace_root(&self, id: &NodeId, root: Arc<Node>) -> Option<Self> {
        let index = self.root_position(id)?;
        Some(Self {
            roots: self.roots.update(index, root),
        })
    }

    /// Wire shape of every root
    #[must_use]
    pub fn to_records(&self) -> Vec<NodeRecord> {
        self.roots.iter().map(|r| r.to_record()).collect()
    }
}

impl<'a> IntoIterator for &'a Forest {
    type Item = Arc<Node>;
    type IntoIter = Iter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<Node> for Forest {
    fn from_iter<I: IntoIterator<Item = Node>>(iter: I) -> Self {
        Self {
            roots: iter.into_iter().map(Arc::new).collect(),
        }
    }
}

/// Pre-order iterator over a forest, explicit stack
#[derive(Debug)]
pub struct Iter {
    stack: Vec<Arc<Node>>,
}

impl Iterator for Iter {
    type Item = Arc<Node>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev().cloned());
        Some(node)
    }
}
