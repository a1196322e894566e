//! Stable identities for nodes the store has not persisted yet
//!
//! A synthesized id is derived from `(namespace, sibling index, content
//! fingerprint)`, where the namespace is the id of the parent (empty for
//! roots) and the fingerprint covers the primary-locale title, the target and
//! the order. Decorating the same records twice yields the same ids, so UI
//! state keyed by id survives a refetch of an unsaved tree.

use crate::config::EngineConfig;
use nav_model::{Fingerprint, Forest, Node, NodeId, NodeKind, NodeRecord};
use std::collections::HashSet;
use std::sync::Arc;

/// Turns store records into identified nodes
#[derive(Debug, Clone)]
pub struct IdSynthesizer {
    primary_locale: String,
    prefix: String,
}

impl IdSynthesizer {
    /// Create synthesizer from engine settings
    #[must_use]
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            primary_locale: config.primary_locale.clone(),
            prefix: config.draft_prefix.clone(),
        }
    }

    /// Content fingerprint source: primary title, target, order
    #[must_use]
    pub fn fingerprint_source(&self, record: &NodeRecord) -> String {
        let title = record.title.resolve(&self.primary_locale);
        let target = if record.redirect.trim().is_empty() {
            record.path.trim()
        } else {
            record.redirect.trim()
        };
        format!("{title}\u{1f}{target}\u{1f}{}", record.order)
    }

    /// Id for a record without a persisted id
    #[must_use]
    pub fn synthesize(&self, namespace: &str, index: usize, record: &NodeRecord) -> NodeId {
        let index = index.to_string();
        let source = self.fingerprint_source(record);
        let digest = Fingerprint::compute_parts([
            namespace.as_bytes(),
            index.as_bytes(),
            source.as_bytes(),
        ]);
        NodeId::synthesized(format!("{}:{}", self.prefix, digest.short()))
    }

    /// Decorate one subtree
    ///
    /// `namespace` is the id of the parent the subtree hangs under (empty for
    /// roots) and `index` its position among siblings. Nested records are
    /// always items; roots are always menus.
    #[must_use]
    pub fn decorate(&self, record: &NodeRecord, namespace: &str, index: usize, kind: NodeKind) -> Node {
        let id = match record.id.as_deref() {
            Some(id) => NodeId::persisted(id),
            None => self.synthesize(namespace, index, record),
        };

        let children = record
            .items
            .iter()
            .enumerate()
            .map(|(i, item)| Arc::new(self.decorate(item, id.as_str(), i, NodeKind::Item)))
            .collect();

        Node {
            id,
            kind,
            title: record.title.clone(),
            path: record.path.clone(),
            redirect: record.redirect.clone(),
            order: record.order,
            status: record.status,
            children,
        }
    }

    /// Decorate a root menu at `index`
    #[inline]
    #[must_use]
    pub fn decorate_root(&self, record: &NodeRecord, index: usize) -> Node {
        self.decorate(record, "", index, NodeKind::Menu)
    }

    /// Decorate a new item to be inserted under `parent`
    ///
    /// The sibling index is the position it will take, i.e. the parent's
    /// current child count. After removals that index may already have
    /// produced the id of a surviving sibling with the same content, so it is
    /// bumped until the id is free.
    #[must_use]
    pub fn decorate_child(&self, record: &NodeRecord, parent: &Node) -> Node {
        let namespace = parent.id.as_str();
        let mut index = parent.children.len();
        if record.id.is_none() {
            loop {
                let id = self.synthesize(namespace, index, record);
                if !parent.children.iter().any(|sibling| sibling.id == id) {
                    break;
                }
                tracing::debug!(%id, index, "synthesized id taken by a sibling");
                index += 1;
            }
        }
        self.decorate(record, namespace, index, NodeKind::Item)
    }

    /// Decorate a whole forest as returned by the store
    #[must_use]
    pub fn decorate_forest(&self, records: &[NodeRecord]) -> Forest {
        let forest: Forest = records
            .iter()
            .enumerate()
            .map(|(i, record)| self.decorate_root(record, i))
            .collect();

        let mut seen = HashSet::new();
        for node in &forest {
            if !seen.insert(node.id.clone()) {
                tracing::warn!(id = %node.id, "store returned a duplicate node id");
            }
        }

        tracing::debug!(
            roots = forest.root_count(),
            nodes = forest.node_count(),
            "decorated forest"
        );
        forest
    }
}

impl Default for IdSynthesizer {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}
