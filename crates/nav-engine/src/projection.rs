//! Read-only projections of a forest
//!
//! - [`public_tree`]: what end users may navigate. A node is shown only if it
//!   and every ancestor are `Approved`; levels are sorted by `order` with
//!   stored position breaking ties.
//! - [`pending_queue`]: every `Created` node at any depth with its breadcrumb,
//!   regardless of ancestor status.

use crate::config::EngineConfig;
use crate::slug::{join_path, slugify};
use nav_model::{Children, Destination, Forest, Node, NodeId, Status};
use serde::Serialize;
use std::sync::Arc;

/// Node of the public navigation tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublicNode {
    pub id: NodeId,
    /// Title in the primary locale (with fallback)
    pub title: String,
    /// Effective destination: redirect URL or resolved internal path
    pub href: String,
    /// `href` leaves the site
    pub external: bool,
    /// Resolved internal path, used as prefix by children
    pub path: String,
    pub order: i64,
    pub children: Vec<PublicNode>,
}

impl PublicNode {
    /// Nodes in this subtree, including `self`
    #[must_use]
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(PublicNode::subtree_len).sum::<usize>()
    }
}

/// Build the public navigation tree
#[must_use]
pub fn public_tree(forest: &Forest, config: &EngineConfig) -> Vec<PublicNode> {
    let tree = project_level(forest.roots(), "", config);
    tracing::debug!(
        visible = tree.iter().map(PublicNode::subtree_len).sum::<usize>(),
        total = forest.node_count(),
        "built public tree"
    );
    tree
}

fn project_level(siblings: &Children, parent_path: &str, config: &EngineConfig) -> Vec<PublicNode> {
    let mut visible: Vec<&Arc<Node>> = siblings.iter().filter(|n| n.status.is_approved()).collect();
    // Stable sort: equal orders keep stored position.
    visible.sort_by_key(|n| n.order);
    visible
        .into_iter()
        .map(|node| project_node(node, parent_path, config))
        .collect()
}

fn project_node(node: &Node, parent_path: &str, config: &EngineConfig) -> PublicNode {
    let title = display_title(node, config);
    let path = resolve_path(node, &title, parent_path, config);
    let (href, external) = match node.destination() {
        Destination::Redirect(url) => (url.to_string(), true),
        Destination::Internal(_) | Destination::Container => (path.clone(), false),
    };
    let children = project_level(&node.children, &path, config);

    PublicNode {
        id: node.id.clone(),
        title,
        href,
        external,
        path,
        order: node.order,
        children,
    }
}

/// Internal path of `node` below `parent_path`
///
/// Absolute paths (leading `/`) stand alone, relative ones are joined to the
/// parent, and an empty path is synthesized from the slugified title.
#[must_use]
pub fn resolve_path(node: &Node, title: &str, parent_path: &str, config: &EngineConfig) -> String {
    let own = node.path.trim();
    if own.starts_with('/') {
        return join_path("", own);
    }
    if !own.is_empty() {
        return join_path(parent_path, own);
    }
    let mut slug = slugify(title, config.slug_separator);
    if slug.is_empty() {
        slug = slugify(node.id.as_str(), config.slug_separator);
    }
    join_path(parent_path, &slug)
}

/// Title in the primary locale, falling back to the id text
#[must_use]
pub fn display_title(node: &Node, config: &EngineConfig) -> String {
    let title = node.title.resolve(&config.primary_locale);
    if title.is_empty() {
        node.id.to_string()
    } else {
        title.to_string()
    }
}

/// One row of the moderation queue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingEntry {
    pub node: Arc<Node>,
    /// Ancestor titles from the root down to the parent
    pub breadcrumb: Vec<String>,
    /// Ancestor ids, same order as `breadcrumb`
    pub ancestors: Vec<NodeId>,
}

/// Flatten every `Created` node into the moderation queue
///
/// Entries follow stored pre-order. Ancestor status is ignored.
#[must_use]
pub fn pending_queue(forest: &Forest, config: &EngineConfig) -> Vec<PendingEntry> {
    let mut queue = Vec::new();
    let mut crumbs = Vec::new();
    collect_pending(forest.roots(), config, &mut crumbs, &mut queue);
    tracing::debug!(pending = queue.len(), "built pending queue");
    queue
}

fn collect_pending(
    siblings: &Children,
    config: &EngineConfig,
    crumbs: &mut Vec<(NodeId, String)>,
    queue: &mut Vec<PendingEntry>,
) {
    for node in siblings {
        if node.status.is_pending() {
            queue.push(PendingEntry {
                node: node.clone(),
                breadcrumb: crumbs.iter().map(|(_, title)| title.clone()).collect(),
                ancestors: crumbs.iter().map(|(id, _)| id.clone()).collect(),
            });
        }
        if node.has_children() {
            crumbs.push((node.id.clone(), display_title(node, config)));
            collect_pending(&node.children, config, crumbs, queue);
            crumbs.pop();
        }
    }
}

/// Per-status totals over every node
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub created: usize,
    pub approved: usize,
    pub rejected: usize,
}

impl StatusCounts {
    #[must_use]
    pub fn get(&self, status: Status) -> usize {
        match status {
            Status::Created => self.created,
            Status::Approved => self.approved,
            Status::Rejected => self.rejected,
        }
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.created + self.approved + self.rejected
    }
}

/// Count nodes by status, full traversal
#[must_use]
pub fn status_counts(forest: &Forest) -> StatusCounts {
    forest.iter().fold(StatusCounts::default(), |mut counts, node| {
        match node.status {
            Status::Created => counts.created += 1,
            Status::Approved => counts.approved += 1,
            Status::Rejected => counts.rejected += 1,
        }
        counts
    })
}
