//! Path-addressed mutation
//!
//! Rebuilds only the chain of ancestors between the forest and the target.
//! Every other subtree is carried over by pointer, and the input forest is
//! never touched, so a caller can keep the old value for rollback.

use crate::error::EngineError;
use crate::resolve::find_path;
use nav_model::{Children, Forest, Node, NodeId, NodeKind, NodePath, PathStep};
use std::collections::HashSet;
use std::sync::Arc;

/// Edit applied at the end of a path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    /// Append a child under the target
    InsertChild(Node),
    /// Swap the target (and its subtree) for a new node
    Replace(Node),
    /// Drop the target from its parent's children
    Remove,
}

impl Mutation {
    /// Short operation name for logs and errors
    #[inline]
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::InsertChild(_) => "insert_child",
            Self::Replace(_) => "replace",
            Self::Remove => "remove",
        }
    }
}

/// Apply `mutation` at the node addressed by `path`
///
/// # Errors
/// - [`EngineError::InvalidOperationAtRoot`] for `Remove` on a root menu
/// - [`EngineError::TargetNotFound`] if `path` no longer matches `forest`
/// - [`EngineError::DuplicateId`] if new ids already occur elsewhere
pub fn apply_at(forest: &Forest, path: &NodePath, mutation: Mutation) -> Result<Forest, EngineError> {
    let target = path.target().id().clone();

    if path.is_root() && matches!(mutation, Mutation::Remove) {
        return Err(EngineError::InvalidOperationAtRoot {
            operation: mutation.name(),
            id: target,
        });
    }

    let mutation = fit_kind(mutation, path.len());
    match &mutation {
        Mutation::InsertChild(child) => ensure_unique(forest, child, None)?,
        Mutation::Replace(node) => ensure_unique(forest, node, Some(&target))?,
        Mutation::Remove => {}
    }

    tracing::debug!(%target, operation = mutation.name(), depth = path.len(), "applying mutation");
    let roots = rebuild(forest.roots(), path.steps(), &target, mutation)?;
    Ok(Forest::from_roots(roots))
}

/// Resolve `target` in `forest`, then apply `mutation` there
///
/// # Errors
/// Same as [`find_path`] and [`apply_at`]
pub fn resolve_and_mutate(forest: &Forest, target: &NodeId, mutation: Mutation) -> Result<Forest, EngineError> {
    let path = find_path(forest, target)?;
    apply_at(forest, &path, mutation)
}

/// Append a new root menu
///
/// # Errors
/// Returns [`EngineError::DuplicateId`] if any id in `root` already exists
pub fn insert_root(forest: &Forest, root: Node) -> Result<Forest, EngineError> {
    let root = with_kind(root, NodeKind::Menu);
    ensure_unique(forest, &root, None)?;
    Ok(forest.push_root(root))
}

/// Drop a root menu and its whole subtree
///
/// # Errors
/// - [`EngineError::NotARoot`] if `id` names a nested item
/// - [`EngineError::TargetNotFound`] if `id` is absent
pub fn remove_root(forest: &Forest, id: &NodeId) -> Result<Forest, EngineError> {
    if let Some(next) = forest.remove_root(id) {
        return Ok(next);
    }
    if crate::resolve::contains(forest, id) {
        Err(EngineError::NotARoot(id.clone()))
    } else {
        Err(EngineError::TargetNotFound(id.clone()))
    }
}

fn rebuild(
    siblings: &Children,
    steps: &[PathStep],
    target: &NodeId,
    mutation: Mutation,
) -> Result<Children, EngineError> {
    let Some((step, rest)) = steps.split_first() else {
        return Err(EngineError::TargetNotFound(target.clone()));
    };

    // Stale path: the sibling at this position is no longer the one resolved.
    let current = siblings
        .get(step.index)
        .filter(|node| node.id == step.node.id)
        .ok_or_else(|| EngineError::TargetNotFound(target.clone()))?;

    if rest.is_empty() {
        return Ok(match mutation {
            Mutation::Replace(node) => siblings.update(step.index, Arc::new(node)),
            Mutation::Remove => {
                let mut next = siblings.clone();
                next.remove(step.index);
                next
            }
            Mutation::InsertChild(child) => {
                let mut node = Node::clone(current);
                node.children.push_back(Arc::new(child));
                siblings.update(step.index, Arc::new(node))
            }
        });
    }

    let children = rebuild(&current.children, rest, target, mutation)?;
    let node = Node {
        children,
        ..Node::clone(current)
    };
    Ok(siblings.update(step.index, Arc::new(node)))
}

/// Nodes placed at depth 1 are menus, deeper ones items
fn fit_kind(mutation: Mutation, path_len: usize) -> Mutation {
    match mutation {
        Mutation::Replace(node) if path_len == 1 => Mutation::Replace(with_kind(node, NodeKind::Menu)),
        Mutation::Replace(node) => Mutation::Replace(with_kind(node, NodeKind::Item)),
        Mutation::InsertChild(node) => Mutation::InsertChild(with_kind(node, NodeKind::Item)),
        Mutation::Remove => Mutation::Remove,
    }
}

fn with_kind(mut node: Node, kind: NodeKind) -> Node {
    node.kind = kind;
    node
}

/// Reject subtrees whose ids collide with the forest or with themselves.
///
/// `replacing` names a node whose subtree is about to disappear, so its ids
/// may be reused by the incoming subtree.
fn ensure_unique(forest: &Forest, incoming: &Node, replacing: Option<&NodeId>) -> Result<(), EngineError> {
    let mut taken: HashSet<NodeId> = HashSet::new();
    let mut stack: Vec<Arc<Node>> = forest.roots().iter().cloned().collect();
    while let Some(node) = stack.pop() {
        if Some(&node.id) == replacing {
            continue;
        }
        taken.insert(node.id.clone());
        stack.extend(node.children.iter().cloned());
    }

    let mut pending: Vec<&Node> = vec![incoming];
    while let Some(node) = pending.pop() {
        if !taken.insert(node.id.clone()) {
            return Err(EngineError::DuplicateId(node.id.clone()));
        }
        pending.extend(node.children.iter().map(|c| &**c));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use nav_model::{LocalizedText, Status};

    fn node(id: &str) -> Node {
        Node::new(NodeId::persisted(id), NodeKind::Item, LocalizedText::single("en", id))
    }

    fn forest() -> Forest {
        [
            node("r1").with_child(node("a").with_child(node("a1"))).with_child(node("b")),
            node("r2").with_child(node("c")),
        ]
        .into_iter()
        .collect()
    }

    fn child_ids(forest: &Forest, id: &str) -> Vec<String> {
        crate::resolve::find_node(forest, &NodeId::persisted(id))
            .unwrap()
            .children
            .iter()
            .map(|c| c.id.to_string())
            .collect()
    }

    #[test]
    fn remove_nested() {
        let before = forest();
        let after = resolve_and_mutate(&before, &NodeId::persisted("a"), Mutation::Remove).unwrap();
        assert_eq!(child_ids(&after, "r1"), ["b"]);
        assert_eq!(child_ids(&before, "r1"), ["a", "b"]);
    }

    #[test]
    fn remove_root_via_nested_entry_point_is_refused() {
        let err = resolve_and_mutate(&forest(), &NodeId::persisted("r1"), Mutation::Remove).unwrap_err();
        assert!(matches!(err, EngineError::InvalidOperationAtRoot { operation: "remove", .. }));
    }

    #[test]
    fn insert_child_appends_and_marks_item() {
        let mut child = node("new");
        child.kind = NodeKind::Menu;
        let after = resolve_and_mutate(&forest(), &NodeId::persisted("a1"), Mutation::InsertChild(child)).unwrap();
        assert_eq!(child_ids(&after, "a1"), ["new"]);
        let inserted = crate::resolve::find_node(&after, &NodeId::persisted("new")).unwrap();
        assert_eq!(inserted.kind, NodeKind::Item);
    }

    #[test]
    fn replace_keeps_position() {
        let replacement = node("b").with_status(Status::Approved).with_order(7);
        let after = resolve_and_mutate(&forest(), &NodeId::persisted("b"), Mutation::Replace(replacement)).unwrap();
        assert_eq!(child_ids(&after, "r1"), ["a", "b"]);
        let b = crate::resolve::find_node(&after, &NodeId::persisted("b")).unwrap();
        assert_eq!(b.order, 7);
    }

    #[test]
    fn replace_root_stays_menu() {
        let after = resolve_and_mutate(&forest(), &NodeId::persisted("r2"), Mutation::Replace(node("r2"))).unwrap();
        assert_eq!(after.roots()[1].kind, NodeKind::Menu);
        assert!(after.roots()[1].children.is_empty());
    }

    #[test]
    fn untouched_subtrees_are_shared() {
        let before = forest();
        let after = resolve_and_mutate(&before, &NodeId::persisted("a1"), Mutation::Remove).unwrap();
        assert!(Arc::ptr_eq(&before.roots()[1], &after.roots()[1]));
        assert!(Arc::ptr_eq(&before.roots()[0].children[1], &after.roots()[0].children[1]));
        assert!(!Arc::ptr_eq(&before.roots()[0], &after.roots()[0]));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let err = resolve_and_mutate(&forest(), &NodeId::persisted("r2"), Mutation::InsertChild(node("a1"))).unwrap_err();
        assert_eq!(err, EngineError::DuplicateId(NodeId::persisted("a1")));

        let twin = node("x").with_child(node("x"));
        let err = resolve_and_mutate(&forest(), &NodeId::persisted("r2"), Mutation::InsertChild(twin)).unwrap_err();
        assert_eq!(err, EngineError::DuplicateId(NodeId::persisted("x")));
    }

    #[test]
    fn replace_may_reuse_ids_of_replaced_subtree() {
        let replacement = node("a").with_child(node("a1"));
        assert!(resolve_and_mutate(&forest(), &NodeId::persisted("a"), Mutation::Replace(replacement)).is_ok());
    }

    #[test]
    fn stale_path_is_target_not_found() {
        let old = forest();
        let path = find_path(&old, &NodeId::persisted("b")).unwrap();
        let shrunk = resolve_and_mutate(&old, &NodeId::persisted("a"), Mutation::Remove).unwrap();
        let err = apply_at(&shrunk, &path, Mutation::Remove).unwrap_err();
        assert_eq!(err, EngineError::TargetNotFound(NodeId::persisted("b")));
    }

    #[test]
    fn root_level_operations() {
        let f = forest();
        let grown = insert_root(&f, node("r3")).unwrap();
        assert_eq!(grown.root_count(), 3);
        assert_eq!(grown.roots()[2].kind, NodeKind::Menu);
        assert!(matches!(insert_root(&f, node("c")), Err(EngineError::DuplicateId(_))));

        assert_eq!(remove_root(&f, &NodeId::persisted("r1")).unwrap().root_count(), 1);
        assert_eq!(remove_root(&f, &NodeId::persisted("a")), Err(EngineError::NotARoot(NodeId::persisted("a"))));
        assert!(matches!(remove_root(&f, &NodeId::persisted("zz")), Err(EngineError::TargetNotFound(_))));
    }
}
