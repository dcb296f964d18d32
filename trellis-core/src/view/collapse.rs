//! Collapse and Visibility Propagation
//!
//! Each node carries a user-toggled `collapsed` flag. Collapsing a node
//! hides its entire descendant subgraph; the node itself stays visible so
//! the user can expand it again. Edge visibility follows the endpoints,
//! with one extra rule: an edge leaving a collapsed node is hidden even
//! though the collapsed node itself is shown.
//!
//! Nothing here is incremental. [`apply_collapse_state`] recomputes
//! `has_children` and the full visibility set from scratch on every call,
//! which keeps the logic obvious and is cheap at the graph sizes this
//! editor targets. The recursive ancestor walk carries a visited set, so
//! even a corrupt cyclic topology terminates.
//!
//! Only the two user-facing entry points mutate `collapsed`; the pass
//! itself never does.

use std::collections::{HashMap, HashSet};

use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::graph::GraphFacade;

/// Flip a node's collapse flag and recompute visibility. Silent no-op when
/// the node does not exist.
pub fn toggle_node_collapse(graph: &dyn GraphFacade, node_id: &str) {
    let node = match graph.node_by_id(node_id) {
        Some(node) => node,
        None => return,
    };
    let mut data = node.data();
    data.properties.collapsed = !data.properties.collapsed;
    node.set_data(data);
    apply_collapse_state(graph);
}

/// Set a node's collapse flag to an explicit value and recompute
/// visibility. Silent no-op when the node does not exist.
pub fn set_node_collapse_state(graph: &dyn GraphFacade, node_id: &str, collapsed: bool) {
    let node = match graph.node_by_id(node_id) {
        Some(node) => node,
        None => return,
    };
    let mut data = node.data();
    data.properties.collapsed = collapsed;
    node.set_data(data);
    apply_collapse_state(graph);
}

/// Recompute `has_children` and the visibility of every node and edge from
/// the current topology and collapse flags.
///
/// Must also run after any topology edit that can change ancestor chains,
/// not just after a toggle. Must not be re-entered from within a running
/// pass over the same graph.
pub fn apply_collapse_state(graph: &dyn GraphFacade) {
    let nodes = graph.nodes();
    let edges = graph.edges();

    let mut adjacency: HashMap<&str, SmallVec<[&str; 4]>> = HashMap::new();
    for edge in &edges {
        adjacency.entry(edge.source_id()).or_default().push(edge.target_id());
    }

    for node in &nodes {
        let has_children = adjacency.contains_key(node.id());
        let mut data = node.data();
        if data.properties.has_children != has_children {
            data.properties.has_children = has_children;
            node.set_data(data);
        }
    }

    let mut hidden_nodes = 0usize;
    for node in &nodes {
        let mut visited = HashSet::new();
        let visible = !has_collapsed_ancestor(graph, node.id(), &mut visited);
        if visible != node.is_visible() {
            trace!("node {} visibility -> {visible}", node.id());
        }
        if visible {
            node.show();
        } else {
            node.hide();
            hidden_nodes += 1;
        }
    }

    let mut hidden_edges = 0usize;
    for edge in &edges {
        let source = graph.node_by_id(edge.source_id());
        let target = graph.node_by_id(edge.target_id());
        let visible = match (source, target) {
            (Some(source), Some(target)) => {
                source.is_visible()
                    && target.is_visible()
                    && !source.data().properties.collapsed
            }
            _ => false,
        };
        if visible {
            edge.show();
        } else {
            edge.hide();
            hidden_edges += 1;
        }
    }

    debug!(
        "collapse pass over {} nodes / {} edges, hid {hidden_nodes} nodes and {hidden_edges} edges",
        nodes.len(),
        edges.len()
    );
}

/// Whether any ancestor of `node_id`, direct or transitive, is collapsed.
/// The node's own flag does not count. The visited set bounds the walk on
/// shared ancestors and on corrupt cyclic input.
fn has_collapsed_ancestor(
    graph: &dyn GraphFacade,
    node_id: &str,
    visited: &mut HashSet<String>,
) -> bool {
    for edge in graph.incoming_edges(node_id) {
        let source_id = edge.source_id();
        if !visited.insert(source_id.to_string()) {
            continue;
        }
        let source = match graph.node_by_id(source_id) {
            Some(source) => source,
            None => continue,
        };
        if source.data().properties.collapsed {
            return true;
        }
        if has_collapsed_ancestor(graph, source_id, visited) {
            return true;
        }
    }
    false
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
