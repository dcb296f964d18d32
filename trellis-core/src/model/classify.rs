//! Node Classification Engine
//!
//! A node's structural role and hierarchy level are derived from edge
//! topology alone, never set by the user:
//!
//! - no incoming edges makes a root at level 1,
//! - no outgoing edges makes a leaf,
//! - everything in between is a sub-node.
//!
//! Levels count the longest known predecessor chain: 1 at roots, otherwise
//! one more than the highest-level direct predecessor. Previously computed
//! levels cached on predecessor records are trusted to keep the common
//! single-edit case cheap.
//!
//! The write-back path also enforces the leaf-only rule for computation
//! models: a node that stops being a leaf loses its model fields here.

use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::graph::GraphFacade;
use crate::model::compute::clear_model_fields;
use crate::model::record::NodeRole;

/// A computed role/level pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub role: NodeRole,
    pub level: u32,
}

/// Derive a node's role and level from the current topology. Returns
/// `None` when the node does not exist.
pub fn classify(graph: &dyn GraphFacade, node_id: &str) -> Option<Classification> {
    graph.node_by_id(node_id)?;

    if graph.incoming_edges(node_id).is_empty() {
        return Some(Classification {
            role: NodeRole::Root,
            level: 1,
        });
    }

    let role = if graph.outgoing_edges(node_id).is_empty() {
        NodeRole::Leaf
    } else {
        NodeRole::Sub
    };
    Some(Classification {
        role,
        level: compute_level(graph, node_id),
    })
}

/// Level of a node: 1 with no predecessors, otherwise one more than the
/// highest predecessor level. A cached level on the predecessor's record
/// is preferred over recomputation; recursion is the fallback.
///
/// Self-referencing edges are skipped so a corrupt record cannot recurse
/// forever. That shape is rejected at edge commit and is not supported.
pub fn compute_level(graph: &dyn GraphFacade, node_id: &str) -> u32 {
    let mut predecessor_levels: SmallVec<[u32; 4]> = SmallVec::new();
    for edge in graph.incoming_edges(node_id) {
        let source_id = edge.source_id();
        if source_id == node_id {
            continue;
        }
        let source = match graph.node_by_id(source_id) {
            Some(source) => source,
            None => continue,
        };
        let level = match source.data().cached_level() {
            Some(level) => level,
            None => compute_level(graph, source_id),
        };
        predecessor_levels.push(level);
    }

    match predecessor_levels.into_iter().max() {
        Some(best) => best + 1,
        None => 1,
    }
}

/// Classify one node and write the result onto its record: role and level
/// to their canonical top-level homes, the parent back-reference refreshed
/// from the first incoming edge. A node that is no longer a leaf has its
/// computation-model fields cleared.
///
/// Silent no-op when the node does not exist.
pub fn update_node_type_and_level(graph: &dyn GraphFacade, node_id: &str) {
    let classification = match classify(graph, node_id) {
        Some(classification) => classification,
        None => return,
    };
    let node = match graph.node_by_id(node_id) {
        Some(node) => node,
        None => return,
    };

    let mut data = node.data();
    if data.role != Some(classification.role) {
        let previous = data.role.map_or("unset", |role| role.as_str());
        trace!(
            "node {node_id} reclassified {previous} -> {}",
            classification.role.as_str()
        );
    }
    data.role = Some(classification.role);
    data.level = Some(classification.level);
    data.properties.parent_node_id = graph
        .incoming_edges(node_id)
        .first()
        .map(|edge| edge.source_id().to_string());
    if classification.role != NodeRole::Leaf {
        clear_model_fields(&mut data);
    }
    node.set_data(data);
}

/// Reclassify every node. Required after batch topology changes (paste,
/// bulk delete); single-edge edits only need per-node updates around the
/// touched neighborhood.
pub fn update_all_nodes_type_and_level(graph: &dyn GraphFacade) {
    let ids: Vec<String> = graph
        .nodes()
        .into_iter()
        .map(|node| node.id().to_string())
        .collect();
    for id in &ids {
        update_node_type_and_level(graph, id);
    }
    debug!("reclassified {} nodes", ids.len());
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
