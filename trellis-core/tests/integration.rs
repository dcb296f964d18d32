//! Integration Tests for the Editor Core
//!
//! These tests drive whole editing scenarios against the in-memory graph
//! host, the way the rendering layer drives the core: cycle check before
//! every edge commit, reclassification and a collapse pass after every
//! topology change.

use serde_json::json;

use trellis_core::graph::{is_acyclic, will_create_cycle, GraphFacade, GraphRecords, MemoryGraph};
use trellis_core::model::{
    has_compute_model, set_node_compute_model, update_all_nodes_type_and_level,
    update_node_type_and_level, ComputeModelForm, NodeData, NodeRole,
};
use trellis_core::view::{apply_collapse_state, set_node_collapse_state, toggle_node_collapse};

fn indicator(label: &str) -> NodeData {
    NodeData::with_label(label)
}

fn formula(expr: &str) -> serde_json::Map<String, serde_json::Value> {
    let mut payload = serde_json::Map::new();
    payload.insert("formula".to_string(), json!(expr));
    payload
}

fn visible_ids(graph: &MemoryGraph) -> Vec<String> {
    graph
        .nodes()
        .into_iter()
        .filter(|node| node.is_visible())
        .map(|node| node.id().to_string())
        .collect()
}

/// Test that the check-before-commit protocol keeps the graph a DAG.
#[test]
fn checked_edits_never_break_the_dag() {
    let mut graph = MemoryGraph::new();
    for id in ["a", "b", "c", "d"] {
        graph.add_node(id, indicator(id)).unwrap();
    }

    // The rendering layer proposes edges; two of these would close loops.
    let candidates = [
        ("a", "b"),
        ("b", "c"),
        ("a", "c"),
        ("c", "a"),
        ("c", "d"),
        ("d", "b"),
    ];
    let mut committed = 0;
    for (source, target) in candidates {
        if will_create_cycle(&graph, source, target) {
            continue;
        }
        graph.add_edge(source, target).unwrap();
        committed += 1;
        assert!(is_acyclic(&graph), "broken after {source} -> {target}");
    }

    assert_eq!(committed, 4);
    assert_eq!(graph.edge_count(), 4);
}

/// Test that a chain classifies root, sub, sub, leaf with levels 1 to 4.
#[test]
fn chain_classifies_top_to_bottom() {
    let mut graph = MemoryGraph::new();
    for id in ["a", "b", "c", "d"] {
        graph.add_node(id, indicator(id)).unwrap();
    }
    graph.add_edge("a", "b").unwrap();
    graph.add_edge("b", "c").unwrap();
    graph.add_edge("c", "d").unwrap();

    update_all_nodes_type_and_level(&graph);

    let expect = [
        ("a", NodeRole::Root, 1, None),
        ("b", NodeRole::Sub, 2, Some("a")),
        ("c", NodeRole::Sub, 3, Some("b")),
        ("d", NodeRole::Leaf, 4, Some("c")),
    ];
    for (id, role, level, parent) in expect {
        let data = graph.node_by_id(id).unwrap().data();
        assert_eq!(data.role, Some(role), "role of {id}");
        assert_eq!(data.level, Some(level), "level of {id}");
        assert_eq!(
            data.properties.parent_node_id.as_deref(),
            parent,
            "parent of {id}"
        );
    }
}

/// Test that a leaf gaining a child loses its computation model.
#[test]
fn growing_a_leaf_invalidates_its_model() {
    let mut graph = MemoryGraph::new();
    graph.add_node("r", indicator("Output")).unwrap();
    graph.add_node("k", indicator("Throughput")).unwrap();
    graph.add_edge("r", "k").unwrap();
    update_all_nodes_type_and_level(&graph);

    let form = ComputeModelForm {
        custom_type: "measurement".to_string(),
        unit: "t/h".to_string(),
        ..ComputeModelForm::default()
    };
    set_node_compute_model(&graph, "k", formula("latest(sensor_12)"), &form);
    assert!(has_compute_model(&graph.node_by_id("k").unwrap().data()));

    // The user drags a new node out of k; k is no longer a leaf.
    graph.add_node("m", indicator("Shift throughput")).unwrap();
    graph.add_edge("k", "m").unwrap();
    update_node_type_and_level(&graph, "k");
    update_node_type_and_level(&graph, "m");

    let k = graph.node_by_id("k").unwrap().data();
    assert_eq!(k.role, Some(NodeRole::Sub));
    assert!(!has_compute_model(&k));
    assert_eq!(k.properties.unit, "");

    let m = graph.node_by_id("m").unwrap().data();
    assert_eq!(m.role, Some(NodeRole::Leaf));
    assert_eq!(m.level, Some(3));
}

/// Test that collapsing a root folds the whole subtree and is idempotent.
#[test]
fn collapsing_a_root_folds_the_subtree() {
    let mut graph = MemoryGraph::new();
    for id in ["r", "c1", "c2", "g1"] {
        graph.add_node(id, indicator(id)).unwrap();
    }
    graph.add_edge("r", "c1").unwrap();
    graph.add_edge("r", "c2").unwrap();
    graph.add_edge("c1", "g1").unwrap();

    set_node_collapse_state(&graph, "r", true);
    assert_eq!(visible_ids(&graph), ["r"]);
    for edge in graph.edges() {
        assert!(!edge.is_visible());
    }

    // Siblings are hidden, not collapsed themselves.
    assert!(!graph.node_by_id("c2").unwrap().data().properties.collapsed);

    // Collapsing again, or just re-running the pass, changes nothing.
    set_node_collapse_state(&graph, "r", true);
    apply_collapse_state(&graph);
    assert_eq!(visible_ids(&graph), ["r"]);

    toggle_node_collapse(&graph, "r");
    assert_eq!(visible_ids(&graph), ["r", "c1", "c2", "g1"]);
}

/// Test a full editing session: build, attach, collapse, delete, recheck.
#[test]
fn editing_session_stays_consistent() {
    let mut graph = MemoryGraph::new();
    graph.add_node("goal", indicator("Plant goal")).unwrap();
    graph.add_node("cost", indicator("Cost")).unwrap();
    graph.add_node("quality", indicator("Quality")).unwrap();
    graph.add_node("labor", indicator("Labor cost")).unwrap();
    graph.add_node("materials", indicator("Materials cost")).unwrap();
    graph.add_edge("goal", "cost").unwrap();
    graph.add_edge("goal", "quality").unwrap();
    graph.add_edge("cost", "labor").unwrap();
    graph.add_edge("cost", "materials").unwrap();

    // Batch build finished; restore consistency network-wide.
    update_all_nodes_type_and_level(&graph);
    apply_collapse_state(&graph);

    assert_eq!(graph.node_by_id("goal").unwrap().data().role, Some(NodeRole::Root));
    assert_eq!(graph.node_by_id("cost").unwrap().data().role, Some(NodeRole::Sub));
    assert_eq!(graph.node_by_id("quality").unwrap().data().role, Some(NodeRole::Leaf));
    assert_eq!(graph.node_by_id("labor").unwrap().data().level, Some(3));
    assert!(graph.node_by_id("goal").unwrap().data().properties.has_children);

    set_node_compute_model(&graph, "labor", formula("hours * rate"), &ComputeModelForm::default());
    set_node_compute_model(&graph, "quality", formula("defects / lot"), &ComputeModelForm::default());

    // Fold the cost branch; the quality leaf stays on screen.
    set_node_collapse_state(&graph, "cost", true);
    assert_eq!(visible_ids(&graph), ["goal", "cost", "quality"]);

    // Delete the quality node; its edge goes with it.
    assert!(graph.remove_node("quality"));
    update_all_nodes_type_and_level(&graph);
    apply_collapse_state(&graph);

    assert!(is_acyclic(&graph));
    assert_eq!(graph.edge_count(), 3);
    assert_eq!(visible_ids(&graph), ["goal", "cost"]);
    assert_eq!(graph.node_by_id("goal").unwrap().data().role, Some(NodeRole::Root));

    // The surviving leaf keeps its model through the passes.
    assert!(has_compute_model(&graph.node_by_id("labor").unwrap().data()));

    set_node_collapse_state(&graph, "cost", false);
    assert_eq!(visible_ids(&graph), ["goal", "cost", "labor", "materials"]);

    // Re-running both passes with nothing changed is a fixed point.
    let before = graph.to_records();
    update_all_nodes_type_and_level(&graph);
    apply_collapse_state(&graph);
    assert_eq!(graph.to_records(), before);
}

/// Test that derived state survives a snapshot round trip.
#[test]
fn snapshot_round_trip_preserves_derived_state() {
    let mut graph = MemoryGraph::new();
    graph.add_node("top", indicator("Overall score")).unwrap();
    graph.add_node("mid", indicator("Efficiency")).unwrap();
    graph.add_node("leaf", indicator("Uptime")).unwrap();
    graph.add_edge("top", "mid").unwrap();
    graph.add_edge("mid", "leaf").unwrap();
    update_all_nodes_type_and_level(&graph);
    set_node_compute_model(&graph, "leaf", formula("uptime()"), &ComputeModelForm::default());

    let json = graph.to_records().to_json().unwrap();
    let restored = MemoryGraph::from_records(GraphRecords::from_json(&json).unwrap());

    assert!(is_acyclic(&restored));
    assert_eq!(restored.node_count(), 3);
    assert_eq!(restored.edge_count(), 2);

    let leaf = restored.node_by_id("leaf").unwrap().data();
    assert_eq!(leaf.properties.content.label, "Uptime");
    assert_eq!(leaf.level, Some(3));
    assert!(has_compute_model(&leaf));

    // Reclassifying the restored graph lands on the same answers.
    update_all_nodes_type_and_level(&restored);
    assert_eq!(restored.node_by_id("leaf").unwrap().data().level, Some(3));
    assert_eq!(restored.node_by_id("top").unwrap().data().role, Some(NodeRole::Root));
}

/// Test that a snapshot carrying an edge to a deleted node is tolerated.
#[test]
fn stale_snapshot_edge_is_tolerated() {
    let records = GraphRecords::from_json(
        r#"{
            "nodes": [
                {"id": "kept", "data": {"properties": {"content": {"label": "Kept"}}}}
            ],
            "edges": [
                {"id": "edge-0", "source": "removed", "target": "kept"}
            ]
        }"#,
    )
    .unwrap();
    let graph = MemoryGraph::from_records(records);

    assert!(is_acyclic(&graph));

    update_all_nodes_type_and_level(&graph);
    apply_collapse_state(&graph);

    // The dangling predecessor neither raises the level nor shows an edge.
    let kept = graph.node_by_id("kept").unwrap().data();
    assert_eq!(kept.level, Some(1));
    assert!(graph.node_by_id("kept").unwrap().is_visible());
    assert!(!graph.edge_by_id("edge-0").unwrap().is_visible());
}
