use nav_engine::prelude::*;
use nav_engine::{apply_at, set_status, status_counts, PublicNode};
use nav_model::LocalizedText;
use proptest::prelude::*;
use proptest::sample::Index;
use std::sync::Arc;

fn status() -> impl Strategy<Value = Status> {
    prop_oneof![Just(Status::Created), Just(Status::Approved), Just(Status::Rejected)]
}

fn leaf() -> impl Strategy<Value = NodeRecord> {
    (status(), -3i64..4, "[a-z]{0,6}", prop::option::of("/?[a-z]{1,4}")).prop_map(|(status, order, title, path)| {
        NodeRecord {
            title: LocalizedText::single("en", title),
            path: path.unwrap_or_default(),
            order,
            status,
            ..NodeRecord::default()
        }
    })
}

fn subtree() -> impl Strategy<Value = NodeRecord> {
    leaf().prop_recursive(3, 32, 4, |inner| {
        (leaf(), prop::collection::vec(inner, 0..4)).prop_map(|(mut record, items)| {
            record.items = items;
            record
        })
    })
}

/// Store-shaped forest; every third node carries a persisted id
fn records() -> impl Strategy<Value = Vec<NodeRecord>> {
    prop::collection::vec(subtree(), 1..4).prop_map(|mut roots| {
        let mut counter = 0usize;
        for root in &mut roots {
            root.menu = true;
            assign_some_ids(root, &mut counter);
        }
        roots
    })
}

fn assign_some_ids(record: &mut NodeRecord, counter: &mut usize) {
    if *counter % 3 == 0 {
        record.id = Some(format!("p{counter}"));
    }
    *counter += 1;
    for item in &mut record.items {
        assign_some_ids(item, counter);
    }
}

fn decorate(records: &[NodeRecord]) -> Forest {
    IdSynthesizer::default().decorate_forest(records)
}

fn pick(forest: &Forest, index: &Index) -> Arc<Node> {
    let nodes: Vec<_> = forest.iter().collect();
    nodes[index.index(nodes.len())].clone()
}

fn collect_public(nodes: &[PublicNode], out: &mut Vec<NodeId>) {
    for node in nodes {
        out.push(node.id.clone());
        collect_public(&node.children, out);
    }
}

proptest! {
    #[test]
    fn prop_decoration_is_deterministic(records in records()) {
        prop_assert_eq!(decorate(&records), decorate(&records));
    }

    #[test]
    fn prop_ids_are_unique(records in records()) {
        let forest = decorate(&records);
        let mut ids: Vec<_> = forest.iter().map(|n| n.id.clone()).collect();
        let total = ids.len();
        ids.sort();
        ids.dedup();
        prop_assert_eq!(ids.len(), total);
    }

    #[test]
    fn prop_path_resolves_back_to_node(records in records(), index in any::<Index>()) {
        let forest = decorate(&records);
        let node = pick(&forest, &index);

        let path = find_path(&forest, &node.id).unwrap();

        prop_assert_eq!(path.target().id(), &node.id);
        let walked = forest.walk(&path.ids()).unwrap();
        prop_assert!(Arc::ptr_eq(&walked, &node));
        for pair in path.steps().windows(2) {
            prop_assert!(Arc::ptr_eq(&pair[0].node.children[pair[1].index], &pair[1].node));
        }
    }

    #[test]
    fn prop_mutation_shares_untouched_subtrees(records in records(), index in any::<Index>()) {
        let forest = decorate(&records);
        let node = pick(&forest, &index);
        let path = find_path(&forest, &node.id).unwrap();
        let snapshot = forest.clone();

        let replacement = Node { order: node.order + 100, ..Node::clone(&node) };
        let next = apply_at(&forest, &path, Mutation::Replace(replacement)).unwrap();

        prop_assert_eq!(&forest, &snapshot);
        let root_index = path.first().index;
        for (i, (old, new)) in forest.roots().iter().zip(next.roots().iter()).enumerate() {
            prop_assert_eq!(Arc::ptr_eq(old, new), i != root_index);
        }
        if let Some(parent) = path.parent() {
            let rebuilt = next.walk(&path.parent_path().unwrap().ids()).unwrap();
            for (i, (old, new)) in parent.node.children.iter().zip(rebuilt.children.iter()).enumerate() {
                prop_assert_eq!(Arc::ptr_eq(old, new), i != path.target().index);
            }
        }
    }

    #[test]
    fn prop_remove_only_drops_target_subtree(records in records(), index in any::<Index>()) {
        let forest = decorate(&records);
        let node = pick(&forest, &index);
        prop_assume!(forest.root_position(&node.id).is_none());

        let next = resolve_and_mutate(&forest, &node.id, Mutation::Remove).unwrap();

        prop_assert_eq!(next.node_count(), forest.node_count() - node.subtree_len());
        prop_assert!(find_path(&next, &node.id).is_err());
    }

    #[test]
    fn prop_public_tree_requires_approved_chain(records in records()) {
        let forest = decorate(&records);
        let config = EngineConfig::default();

        let mut shown = Vec::new();
        collect_public(&public_tree(&forest, &config), &mut shown);

        let mut expected: Vec<NodeId> = forest
            .iter()
            .filter(|n| {
                find_path(&forest, &n.id)
                    .unwrap()
                    .iter()
                    .all(|step| step.node.status == Status::Approved)
            })
            .map(|n| n.id.clone())
            .collect();
        shown.sort();
        expected.sort();
        prop_assert_eq!(shown, expected);
    }

    #[test]
    fn prop_public_levels_sorted_by_order(records in records()) {
        fn check(nodes: &[PublicNode]) -> bool {
            nodes.windows(2).all(|w| w[0].order <= w[1].order) && nodes.iter().all(|n| check(&n.children))
        }
        let forest = decorate(&records);
        prop_assert!(check(&public_tree(&forest, &EngineConfig::default())));
    }

    #[test]
    fn prop_approve_is_idempotent(records in records(), index in any::<Index>()) {
        let forest = decorate(&records);
        let node = pick(&forest, &index);

        let once = review(&forest, &node.id, Decision::Approve).unwrap();
        let twice = review(&once, &node.id, Decision::Approve).unwrap();

        prop_assert_eq!(&once, &twice);
        for (a, b) in once.roots().iter().zip(twice.roots().iter()) {
            prop_assert!(Arc::ptr_eq(a, b));
        }
    }

    #[test]
    fn prop_nothing_returns_to_created(records in records(), index in any::<Index>()) {
        let forest = decorate(&records);
        let node = pick(&forest, &index);
        prop_assume!(node.status != Status::Created);

        let is_illegal = matches!(
            set_status(&forest, &node.id, Status::Created),
            Err(EngineError::IllegalTransition { .. })
        );
        prop_assert!(is_illegal);
    }

    #[test]
    fn prop_pending_queue_is_complete(records in records()) {
        let forest = decorate(&records);
        let queue = pending_queue(&forest, &EngineConfig::default());

        prop_assert_eq!(queue.len(), status_counts(&forest).created);
        for entry in &queue {
            prop_assert_eq!(entry.node.status, Status::Created);
            let path = find_path(&forest, &entry.node.id).unwrap();
            let ancestors: Vec<NodeId> = path.ancestors().iter().map(|s| s.id().clone()).collect();
            prop_assert_eq!(&entry.ancestors, &ancestors);
            prop_assert_eq!(entry.breadcrumb.len(), ancestors.len());
        }
    }
}
