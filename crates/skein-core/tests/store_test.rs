use skein_core::{Error, GraphNode, GraphStore, Upsert};

#[test]
fn edge_to_unknown_ids_creates_stubs() {
    let mut store = GraphStore::new();
    store.upsert_node(GraphNode::new("a")).unwrap();
    assert!(store.add_edge("a", "b").unwrap());

    let b = store.node("b").expect("stub");
    assert!(b.is_stub);
    assert_eq!(b.label, "b");
    assert_eq!(store.stubs().count(), 1);
    assert_eq!(store.node_count(), 2);
}

#[test]
fn backing_record_promotes_a_stub_in_place() {
    let mut store = GraphStore::new();
    store.add_edge("x", "y").unwrap();
    let outcome = store
        .upsert_node(
            GraphNode::new("x")
                .with_label("Xavier")
                .with_tag("person")
                .with_source("people.csv:4"),
        )
        .unwrap();
    assert_eq!(outcome, Upsert::Promoted);

    let x = store.node("x").unwrap();
    assert!(!x.is_stub);
    assert_eq!(x.label, "Xavier");
    // Promotion keeps the original insertion position.
    assert_eq!(store.nodes().next().map(|n| n.id.as_str()), Some("x"));

    assert_eq!(
        store.upsert_node(GraphNode::new("x").with_tag("admin")).unwrap(),
        Upsert::Updated
    );
    let tags: Vec<&str> = store.node("x").unwrap().tags.iter().map(String::as_str).collect();
    assert_eq!(tags, ["person", "admin"]);
    assert_eq!(store.node("x").unwrap().label, "Xavier");
}

#[test]
fn duplicate_edges_are_ignored_but_reverse_edges_are_kept() {
    let mut store = GraphStore::new();
    assert!(store.add_edge("a", "b").unwrap());
    assert!(!store.add_edge("a", "b").unwrap());
    assert!(store.add_edge("b", "a").unwrap());
    assert_eq!(store.edge_count(), 2);
}

#[test]
fn remove_node_drops_incident_edges_and_memberships() {
    let mut store = GraphStore::new();
    store.add_edge("a", "b").unwrap();
    store.add_edge("b", "c").unwrap();
    store.add_edge("c", "a").unwrap();
    store
        .add_meta_node("g1", "only b", vec!["b".to_string()])
        .unwrap();
    store
        .add_meta_node("g2", "a and b", vec!["a".to_string(), "b".to_string()])
        .unwrap();

    let removed = store.remove_node("b").expect("removed");
    assert_eq!(removed.id, "b");
    assert_eq!(store.edge_count(), 1);
    assert_eq!(store.edges()[0].source, "c");

    let metas: Vec<_> = store.meta_nodes().collect();
    assert_eq!(metas.len(), 1);
    assert_eq!(metas[0].id, "g2");
    assert_eq!(metas[0].members, ["a"]);

    // The removed edge can be added again.
    assert!(store.add_edge("a", "b").unwrap());
}

#[test]
fn meta_nodes_validate_members_and_ids() {
    let mut store = GraphStore::new();
    store.upsert_node(GraphNode::new("a")).unwrap();
    assert!(matches!(
        store.add_meta_node("g", "", vec!["missing".to_string()]),
        Err(Error::UnknownMember { .. })
    ));
    store.add_meta_node("g", "", vec!["a".to_string()]).unwrap();
    assert!(matches!(
        store.add_meta_node("g", "", vec!["a".to_string()]),
        Err(Error::DuplicateMetaNode { .. })
    ));
}

#[test]
fn empty_ids_are_rejected() {
    let mut store = GraphStore::new();
    assert!(matches!(store.upsert_node(GraphNode::new("")), Err(Error::EmptyId)));
    assert!(matches!(store.add_edge("", "a"), Err(Error::EmptyId)));
    assert!(store.is_empty());
}

#[test]
fn json_load_links_edges_after_nodes() {
    let json = r#"{
        "nodes": [
            {"id": "alice", "label": "Alice", "tags": ["person"]},
            {"id": "acme", "label": "ACME", "attributes": {"employees": 120}}
        ],
        "edges": [
            {"source": "alice", "target": "acme"},
            {"source": "alice", "target": "bob"}
        ],
        "metaNodes": [
            {"id": "people", "label": "People", "members": ["alice", "bob"]}
        ]
    }"#;
    let store = GraphStore::from_json(json).unwrap();
    assert_eq!(store.node_count(), 3);
    assert_eq!(store.stubs().map(|n| n.id.as_str()).collect::<Vec<_>>(), ["bob"]);
    assert_eq!(store.meta_nodes().count(), 1);

    let data = store.to_data();
    let again = GraphStore::from_data(data).unwrap();
    assert_eq!(again.node_count(), 3);
    assert!(again.node("bob").unwrap().is_stub);
}

#[test]
fn clear_resets_everything() {
    let mut store = GraphStore::new();
    store.add_edge("a", "b").unwrap();
    store.add_meta_node("m", "", vec!["a".to_string()]).unwrap();
    store.clear();
    assert!(store.is_empty());
    assert_eq!(store.edge_count(), 0);
    assert_eq!(store.meta_nodes().count(), 0);
    assert!(store.add_edge("a", "b").unwrap());
}
