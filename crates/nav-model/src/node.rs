//! Navigation nodes
//!
//! One shape serves both root menus and nested items. Children are shared
//! (`Arc`) inside a persistent vector, so rebuilding one branch leaves every
//! sibling subtree pointer-identical to the original.

use crate::id::NodeId;
use crate::record::NodeRecord;
use crate::status::Status;
use crate::text::LocalizedText;
use im::Vector;
use std::sync::Arc;

/// Shared child sequence
pub type Children = Vector<Arc<Node>>;

/// Root menu or nested item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NodeKind {
    /// Top-level entry of the forest
    Menu,
    /// Nested entry at any depth
    #[default]
    Item,
}

/// Where a node sends the visitor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination<'a> {
    /// External URL; wins over an internal path when both are set
    Redirect(&'a str),
    /// Internal site path
    Internal(&'a str),
    /// No destination of its own, groups children
    Container,
}

/// A single navigation entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub id: NodeId,
    pub kind: NodeKind,
    pub title: LocalizedText,
    /// Internal path, may be empty
    pub path: String,
    /// External URL, may be empty
    pub redirect: String,
    /// Sibling sort key; ties keep stored order
    pub order: i64,
    pub status: Status,
    pub children: Children,
}

impl Node {
    /// Create a childless `Created` node with empty destination
    #[must_use]
    pub fn new(id: NodeId, kind: NodeKind, title: LocalizedText) -> Self {
        Self {
            id,
            kind,
            title,
            path: String::new(),
            redirect: String::new(),
            order: 0,
            status: Status::Created,
            children: Vector::new(),
        }
    }

    #[inline]
    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    #[inline]
    #[must_use]
    pub fn with_redirect(mut self, redirect: impl Into<String>) -> Self {
        self.redirect = redirect.into();
        self
    }

    #[inline]
    #[must_use]
    pub fn with_order(mut self, order: i64) -> Self {
        self.order = order;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    /// Replace the child sequence
    #[must_use]
    pub fn with_children<I>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = Arc<Node>>,
    {
        self.children = children.into_iter().collect();
        self
    }

    /// Append one child
    #[must_use]
    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push_back(Arc::new(child));
        self
    }

    /// Root menu of the forest
    #[inline]
    #[must_use]
    pub fn is_menu(&self) -> bool {
        self.kind == NodeKind::Menu
    }

    #[inline]
    #[must_use]
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Effective destination
    ///
    /// A non-blank redirect takes precedence over the internal path.
    #[must_use]
    pub fn destination(&self) -> Destination<'_> {
        let redirect = self.redirect.trim();
        let path = self.path.trim();
        if !redirect.is_empty() {
            Destination::Redirect(redirect)
        } else if !path.is_empty() {
            Destination::Internal(path)
        } else {
            Destination::Container
        }
    }

    /// Number of nodes in this subtree, including `self`
    #[must_use]
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(|c| c.subtree_len()).sum::<usize>()
    }

    /// Convert to the store's wire shape
    ///
    /// Synthesized ids are dropped so the store assigns real ones.
    #[must_use]
    pub fn to_record(&self) -> NodeRecord {
        NodeRecord {
            id: self.id.store_key().map(str::to_owned),
            menu: self.is_menu(),
            title: self.title.clone(),
            path: self.path.clone(),
            redirect: self.redirect.clone(),
            order: self.order,
            status: self.status,
            items: self.children.iter().map(|c| c.to_record()).collect(),
        }
    }
}
