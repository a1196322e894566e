use nav_engine::prelude::*;
use nav_engine::{apply_at, find_node, set_status};
use nav_model::LocalizedText;
use nav_test_utils::{draft, menu, record, sample_forest};
use pretty_assertions::assert_eq;
use std::sync::Arc;

fn id(value: &str) -> NodeId {
    NodeId::persisted(value)
}

fn child_ids(forest: &Forest) -> Vec<String> {
    forest.roots()[0].children.iter().map(|c| c.id.to_string()).collect()
}

#[test]
fn test_public_tree_hides_pending_child() {
    let config = EngineConfig::default();
    let tree = public_tree(&sample_forest(), &config);

    assert_eq!(tree.len(), 1);
    assert_eq!(tree[0].id, id("r1"));
    assert_eq!(tree[0].href, "/r1");
    let children: Vec<_> = tree[0].children.iter().map(|c| (c.id.to_string(), c.href.clone())).collect();
    assert_eq!(children, vec![("c2".to_string(), "/r1/c2".to_string())]);
}

#[test]
fn test_public_tree_serializes_for_renderers() {
    let tree = public_tree(&sample_forest(), &EngineConfig::default());

    let json = serde_json::to_value(&tree).unwrap();

    assert_eq!(json[0]["id"], "r1");
    assert_eq!(json[0]["external"], false);
    assert_eq!(json[0]["children"][0]["href"], "/r1/c2");
    assert_eq!(json[0]["children"][0]["children"], serde_json::json!([]));
}

#[test]
fn test_pending_queue_lists_draft_with_breadcrumb() {
    let queue = pending_queue(&sample_forest(), &EngineConfig::default());

    assert_eq!(queue.len(), 1);
    assert_eq!(queue[0].node.id, id("c1"));
    assert_eq!(queue[0].breadcrumb, vec!["r1".to_string()]);
    assert_eq!(queue[0].ancestors, vec![id("r1")]);
}

#[test]
fn test_remove_leaves_original_forest_intact() {
    let original = sample_forest();
    let held = original.clone();

    let next = resolve_and_mutate(&original, &id("c2"), Mutation::Remove).unwrap();

    assert_eq!(child_ids(&next), vec!["c1"]);
    assert_eq!(child_ids(&held), vec!["c1", "c2"]);
    assert_eq!(held, original);
    // The surviving child is the same allocation in both versions.
    assert!(Arc::ptr_eq(&next.roots()[0].children[0], &original.roots()[0].children[0]));
}

#[test]
fn test_approved_child_of_pending_parent_is_hidden() {
    let records = vec![menu(
        "r1",
        "Main",
        Status::Approved,
        vec![NodeRecord {
            items: vec![record("g1", "Leaf", Status::Approved, 1)],
            ..record("c1", "Section", Status::Created, 1)
        }],
    )];
    let config = EngineConfig::default();
    let forest = IdSynthesizer::new(&config).decorate_forest(&records);

    assert!(public_tree(&forest, &config)[0].children.is_empty());
    assert_eq!(find_node(&forest, &id("g1")).unwrap().status, Status::Approved);

    let parent_approved = review(&forest, &id("c1"), Decision::Approve).unwrap();
    let tree = public_tree(&parent_approved, &config);
    assert_eq!(tree[0].children[0].children[0].href, "/main/section/leaf");
}

#[test]
fn test_pending_descendant_of_rejected_parent_stays_queued() {
    let records = vec![menu(
        "r1",
        "Main",
        Status::Approved,
        vec![NodeRecord {
            items: vec![record("g1", "Grandchild", Status::Created, 1)],
            ..record("c1", "Section", Status::Rejected, 1)
        }],
    )];
    let config = EngineConfig::default();
    let forest = IdSynthesizer::new(&config).decorate_forest(&records);

    let queue = pending_queue(&forest, &config);
    assert_eq!(queue.len(), 1);
    assert_eq!(queue[0].breadcrumb, vec!["Main".to_string(), "Section".to_string()]);

    let approved = review(&forest, &id("g1"), Decision::Approve).unwrap();
    assert!(public_tree(&approved, &config)[0].children.is_empty());
}

#[test]
fn test_drafts_receive_stable_synthesized_ids() {
    let records = vec![menu("r1", "Main", Status::Approved, vec![draft("About", 1), draft("About", 1)])];
    let synthesizer = IdSynthesizer::default();

    let first = synthesizer.decorate_forest(&records);
    let second = synthesizer.decorate_forest(&records);

    let ids: Vec<_> = first.roots()[0].children.iter().map(|c| c.id.clone()).collect();
    assert!(ids.iter().all(|i| !i.is_persisted() && i.as_str().starts_with("draft:")));
    assert_ne!(ids[0], ids[1]);
    assert_eq!(first, second);
}

#[test]
fn test_insert_then_approve_new_item() {
    let config = EngineConfig::default();
    let synthesizer = IdSynthesizer::new(&config);
    let forest = sample_forest();
    let path = find_path(&forest, &id("r1")).unwrap();

    let child = synthesizer.decorate_child(&draft("Contact us", 3), &path.target().node);
    let child_id = child.id.clone();
    let grown = apply_at(&forest, &path, Mutation::InsertChild(child)).unwrap();
    assert_eq!(grown.roots()[0].children.len(), 3);

    let published = review(&grown, &child_id, Decision::Approve).unwrap();
    let hrefs: Vec<_> = public_tree(&published, &config)[0]
        .children
        .iter()
        .map(|c| c.href.clone())
        .collect();
    assert_eq!(hrefs, vec!["/r1/c2", "/r1/contact-us"]);
}

#[test]
fn test_stale_path_is_refused() {
    let forest = sample_forest();
    let path = find_path(&forest, &id("c2")).unwrap();
    let shrunk = resolve_and_mutate(&forest, &id("c1"), Mutation::Remove).unwrap();

    let err = apply_at(&shrunk, &path, Mutation::Remove).unwrap_err();

    assert!(matches!(err, EngineError::TargetNotFound(_)));
    assert!(err.should_refresh());
}

#[test]
fn test_redirect_wins_but_children_use_internal_path() {
    let records = vec![NodeRecord {
        path: "docs".into(),
        redirect: "https://docs.example.com".into(),
        items: vec![record("c1", "Guide", Status::Approved, 1)],
        ..menu("r1", "Docs", Status::Approved, vec![])
    }];
    let config = EngineConfig::default();
    let tree = public_tree(&IdSynthesizer::new(&config).decorate_forest(&records), &config);

    assert_eq!(tree[0].href, "https://docs.example.com");
    assert!(tree[0].external);
    assert_eq!(tree[0].path, "/docs");
    assert_eq!(tree[0].children[0].href, "/docs/guide");
}

#[test]
fn test_no_way_back_to_created() {
    let forest = sample_forest();
    let err = set_status(&forest, &id("c2"), Status::Created).unwrap_err();
    assert!(matches!(
        err,
        EngineError::IllegalTransition {
            from: Status::Approved,
            to: Status::Created,
            ..
        }
    ));
}

#[test]
fn test_titles_fall_back_across_locales() {
    let records = vec![NodeRecord {
        title: LocalizedText::single("id", "Beranda"),
        ..menu("r1", "", Status::Approved, vec![])
    }];
    let config = EngineConfig::default();
    let forest = IdSynthesizer::new(&config).decorate_forest(&records);

    assert_eq!(public_tree(&forest, &config)[0].title, "Beranda");
    assert_eq!(find_node(&forest, &id("r1")).unwrap().title.resolve("en"), "Beranda");
}

#[test]
fn test_reinserting_draft_after_remove_gets_fresh_id() {
    let records = vec![menu("r1", "Main", Status::Approved, vec![draft("Old", 1), draft("Faq", 2)])];
    let synthesizer = IdSynthesizer::default();
    let forest = synthesizer.decorate_forest(&records);
    let first_draft = forest.roots()[0].children[0].id.clone();
    let shrunk = resolve_and_mutate(&forest, &first_draft, Mutation::Remove).unwrap();

    let path = find_path(&shrunk, &id("r1")).unwrap();
    let again = synthesizer.decorate_child(&draft("Faq", 2), &path.target().node);
    let grown = apply_at(&shrunk, &path, Mutation::InsertChild(again)).unwrap();

    let ids: Vec<_> = grown.roots()[0].children.iter().map(|c| c.id.clone()).collect();
    assert_eq!(ids.len(), 2);
    assert_ne!(ids[0], ids[1]);
}
