//! Tree path resolution
//!
//! Depth-first search in stored order (never presentation order), so the
//! same forest always yields the same path.

use crate::error::EngineError;
use nav_model::{Children, Forest, Node, NodeId, NodePath, PathStep};
use std::sync::Arc;

/// Ancestor chain from a root down to the node with id `target`
///
/// # Errors
/// Returns [`EngineError::TargetNotFound`] if no node carries `target`
pub fn find_path(forest: &Forest, target: &NodeId) -> Result<NodePath, EngineError> {
    let mut trail = Vec::new();
    if search(forest.roots(), target, &mut trail) {
        tracing::trace!(%target, depth = trail.len(), "resolved path");
        Ok(NodePath::new(trail)?)
    } else {
        tracing::debug!(%target, "path resolution failed");
        Err(EngineError::TargetNotFound(target.clone()))
    }
}

fn search(siblings: &Children, target: &NodeId, trail: &mut Vec<PathStep>) -> bool {
    for (index, node) in siblings.iter().enumerate() {
        trail.push(PathStep::new(index, node.clone()));
        if &node.id == target || search(&node.children, target, trail) {
            return true;
        }
        trail.pop();
    }
    false
}

/// Node with id `target`, anywhere in the forest
#[must_use]
pub fn find_node(forest: &Forest, target: &NodeId) -> Option<Arc<Node>> {
    forest.iter().find(|node| &node.id == target)
}

/// Node whose id text equals `key`, regardless of namespace
///
/// For callers holding only a textual id (command lines, deep links).
#[must_use]
pub fn find_by_key(forest: &Forest, key: &str) -> Option<Arc<Node>> {
    forest.iter().find(|node| node.id.as_str() == key)
}

/// Whether any node carries `target`
#[inline]
#[must_use]
pub fn contains(forest: &Forest, target: &NodeId) -> bool {
    find_node(forest, target).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use nav_model::{LocalizedText, NodeKind};

    fn node(id: &str) -> Node {
        Node::new(NodeId::persisted(id), NodeKind::Item, LocalizedText::single("en", id))
    }

    fn forest() -> Forest {
        [
            node("r1").with_child(node("a").with_child(node("a1"))).with_child(node("b")),
            node("r2").with_child(node("c").with_child(node("c1").with_child(node("c2")))),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn finds_root() {
        let path = find_path(&forest(), &NodeId::persisted("r2")).unwrap();
        assert!(path.is_root());
        assert_eq!(path.target().index, 1);
    }

    #[test]
    fn finds_deep_node_with_indices() {
        let path = find_path(&forest(), &NodeId::persisted("c2")).unwrap();
        let ids: Vec<&str> = path.iter().map(|s| s.id().as_str()).collect();
        assert_eq!(ids, ["r2", "c", "c1", "c2"]);
        let indices: Vec<usize> = path.iter().map(|s| s.index).collect();
        assert_eq!(indices, [1, 0, 0, 0]);
    }

    #[test]
    fn sibling_index_is_stored_position() {
        let path = find_path(&forest(), &NodeId::persisted("b")).unwrap();
        assert_eq!(path.target().index, 1);
        assert_eq!(path.parent().unwrap().id().as_str(), "r1");
    }

    #[test]
    fn missing_target() {
        let err = find_path(&forest(), &NodeId::persisted("zz")).unwrap_err();
        assert_eq!(err, EngineError::TargetNotFound(NodeId::persisted("zz")));
        assert!(err.should_refresh());
    }

    #[test]
    fn namespace_matters_for_lookup() {
        let f = forest();
        assert!(contains(&f, &NodeId::persisted("a1")));
        assert!(!contains(&f, &NodeId::synthesized("a1")));
        assert_eq!(find_by_key(&f, "a1").unwrap().id, NodeId::persisted("a1"));
        assert!(find_node(&f, &NodeId::persisted("nope")).is_none());
    }

    #[test]
    fn empty_forest() {
        assert!(find_path(&Forest::new(), &NodeId::persisted("r1")).is_err());
    }
}
