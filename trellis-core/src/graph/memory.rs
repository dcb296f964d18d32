//! In-Memory Graph Host
//!
//! The editor core normally runs against a canvas engine's graph. This
//! module provides the same surface without a canvas: an insertion-ordered
//! node/edge container implementing the capability traits, plus the JSON
//! record types the editor exchanges with whatever owns persistence.
//!
//! The mutation API plays the role of the canvas commit path. `add_edge`
//! performs the mandatory cycle check and refuses an edge that would break
//! the DAG invariant; `restore_edge` bypasses the check for rehydrating
//! persisted records, which are validated afterwards with
//! [`is_acyclic`](super::is_acyclic).
//!
//! Derived-state writes go through `&self` (the capability traits take
//! shared references), so node records sit behind lightweight locks and
//! visibility flags are atomics. Topology edits take `&mut self`.

use std::sync::atomic::{AtomicBool, Ordering};

use indexmap::IndexMap;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::cell::{EdgeCell, GraphFacade, NodeCell};
use super::cycle::will_create_cycle;
use crate::model::NodeData;

/// Errors surfaced by the mutation API. The read-side facade never errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// A node with this id already exists.
    #[error("node `{0}` already exists")]
    DuplicateNode(String),

    /// An edge with this id already exists.
    #[error("edge `{0}` already exists")]
    DuplicateEdge(String),

    /// An endpoint of the requested edge does not exist.
    #[error("node `{0}` does not exist")]
    MissingNode(String),

    /// The requested edge would close a directed loop.
    #[error("edge `{from}` -> `{to}` would create a cycle")]
    WouldCreateCycle {
        /// Proposed source node id.
        from: String,
        /// Proposed target node id.
        to: String,
    },
}

/// Canvas coordinates of a node. Owned by the rendering layer; the core
/// never reads or writes it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// A node held by [`MemoryGraph`].
#[derive(Debug)]
pub struct MemoryNode {
    id: String,
    position: RwLock<Position>,
    data: RwLock<NodeData>,
    visible: AtomicBool,
}

impl MemoryNode {
    fn new(id: String, position: Position, data: NodeData) -> Self {
        Self {
            id,
            position: RwLock::new(position),
            data: RwLock::new(data),
            visible: AtomicBool::new(true),
        }
    }

    /// Current canvas position.
    pub fn position(&self) -> Position {
        *self.position.read()
    }

    /// Move the node. Layout is the embedding editor's concern.
    pub fn set_position(&self, position: Position) {
        *self.position.write() = position;
    }
}

impl NodeCell for MemoryNode {
    fn id(&self) -> &str {
        &self.id
    }

    fn data(&self) -> NodeData {
        self.data.read().clone()
    }

    fn set_data(&self, data: NodeData) {
        *self.data.write() = data;
    }

    fn hide(&self) {
        self.visible.store(false, Ordering::Relaxed);
    }

    fn show(&self) {
        self.visible.store(true, Ordering::Relaxed);
    }

    fn is_visible(&self) -> bool {
        self.visible.load(Ordering::Relaxed)
    }
}

/// An edge held by [`MemoryGraph`].
#[derive(Debug)]
pub struct MemoryEdge {
    id: String,
    source: String,
    target: String,
    visible: AtomicBool,
}

impl MemoryEdge {
    fn new(id: String, source: String, target: String) -> Self {
        Self {
            id,
            source,
            target,
            visible: AtomicBool::new(true),
        }
    }
}

impl EdgeCell for MemoryEdge {
    fn id(&self) -> &str {
        &self.id
    }

    fn source_id(&self) -> &str {
        &self.source
    }

    fn target_id(&self) -> &str {
        &self.target
    }

    fn hide(&self) {
        self.visible.store(false, Ordering::Relaxed);
    }

    fn show(&self) {
        self.visible.store(true, Ordering::Relaxed);
    }

    fn is_visible(&self) -> bool {
        self.visible.load(Ordering::Relaxed)
    }
}

/// Insertion-ordered node/edge container implementing [`GraphFacade`].
#[derive(Debug, Default)]
pub struct MemoryGraph {
    nodes: IndexMap<String, MemoryNode>,
    edges: IndexMap<String, MemoryEdge>,
    next_edge: u64,
}

impl MemoryGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Concrete node accessor, for host-side concerns the capability
    /// traits do not cover (positions).
    pub fn node(&self, id: &str) -> Option<&MemoryNode> {
        self.nodes.get(id)
    }

    /// Insert a node with a default position.
    pub fn add_node(&mut self, id: impl Into<String>, data: NodeData) -> Result<(), GraphError> {
        self.add_node_at(id, Position::default(), data)
    }

    /// Insert a node at a position.
    pub fn add_node_at(
        &mut self,
        id: impl Into<String>,
        position: Position,
        data: NodeData,
    ) -> Result<(), GraphError> {
        let id = id.into();
        if self.nodes.contains_key(&id) {
            return Err(GraphError::DuplicateNode(id));
        }
        self.nodes
            .insert(id.clone(), MemoryNode::new(id, position, data));
        Ok(())
    }

    /// Remove a node and every incident edge. Returns false when the id is
    /// unknown. Callers are expected to reclassify survivors afterwards.
    pub fn remove_node(&mut self, id: &str) -> bool {
        if self.nodes.shift_remove(id).is_none() {
            return false;
        }
        self.edges
            .retain(|_, edge| edge.source != id && edge.target != id);
        true
    }

    /// Commit a user-drawn edge. Both endpoints must exist and the edge
    /// must not close a loop; this is the call-site veto the cycle checker
    /// informs. Returns the generated edge id.
    pub fn add_edge(&mut self, source: &str, target: &str) -> Result<String, GraphError> {
        if !self.nodes.contains_key(source) {
            return Err(GraphError::MissingNode(source.to_string()));
        }
        if !self.nodes.contains_key(target) {
            return Err(GraphError::MissingNode(target.to_string()));
        }
        if will_create_cycle(self, source, target) {
            return Err(GraphError::WouldCreateCycle {
                from: source.to_string(),
                to: target.to_string(),
            });
        }

        let id = format!("edge-{}", self.next_edge);
        self.next_edge += 1;
        self.edges.insert(
            id.clone(),
            MemoryEdge::new(id.clone(), source.to_string(), target.to_string()),
        );
        Ok(id)
    }

    /// Remove an edge. Returns false when the id is unknown.
    pub fn remove_edge(&mut self, id: &str) -> bool {
        self.edges.shift_remove(id).is_some()
    }

    /// Reinsert an edge record verbatim, skipping the cycle gate and
    /// endpoint checks. Used when rehydrating persisted snapshots, which
    /// may carry edges to since-deleted nodes; run
    /// [`is_acyclic`](super::is_acyclic) afterwards before trusting the
    /// topology.
    pub fn restore_edge(
        &mut self,
        id: impl Into<String>,
        source: impl Into<String>,
        target: impl Into<String>,
    ) -> Result<(), GraphError> {
        let id = id.into();
        if self.edges.contains_key(&id) {
            return Err(GraphError::DuplicateEdge(id));
        }
        // Keep generated ids clear of restored ones.
        if let Some(seq) = id.strip_prefix("edge-").and_then(|s| s.parse::<u64>().ok()) {
            self.next_edge = self.next_edge.max(seq.saturating_add(1));
        }
        self.edges
            .insert(id.clone(), MemoryEdge::new(id, source.into(), target.into()));
        Ok(())
    }

    /// Build a graph from exchanged records. A later duplicate node id
    /// replaces the earlier one; duplicate edge ids are dropped. No
    /// topology validation happens here.
    pub fn from_records(records: GraphRecords) -> Self {
        let mut graph = MemoryGraph::new();
        for node in records.nodes {
            graph
                .nodes
                .insert(node.id.clone(), MemoryNode::new(node.id, node.position, node.data));
        }
        for edge in records.edges {
            let _ = graph.restore_edge(edge.id, edge.source, edge.target);
        }
        graph
    }

    /// Snapshot the graph as exchanged records.
    pub fn to_records(&self) -> GraphRecords {
        GraphRecords {
            nodes: self
                .nodes
                .values()
                .map(|node| NodeRecord {
                    id: node.id.clone(),
                    position: node.position(),
                    data: node.data(),
                })
                .collect(),
            edges: self
                .edges
                .values()
                .map(|edge| EdgeRecord {
                    id: edge.id.clone(),
                    source: edge.source.clone(),
                    target: edge.target.clone(),
                })
                .collect(),
        }
    }
}

impl GraphFacade for MemoryGraph {
    fn node_by_id(&self, id: &str) -> Option<&dyn NodeCell> {
        self.nodes.get(id).map(|node| node as &dyn NodeCell)
    }

    fn edge_by_id(&self, id: &str) -> Option<&dyn EdgeCell> {
        self.edges.get(id).map(|edge| edge as &dyn EdgeCell)
    }

    fn nodes(&self) -> Vec<&dyn NodeCell> {
        self.nodes.values().map(|node| node as &dyn NodeCell).collect()
    }

    fn edges(&self) -> Vec<&dyn EdgeCell> {
        self.edges.values().map(|edge| edge as &dyn EdgeCell).collect()
    }

    fn incoming_edges(&self, node_id: &str) -> Vec<&dyn EdgeCell> {
        self.edges
            .values()
            .filter(|edge| edge.target == node_id)
            .map(|edge| edge as &dyn EdgeCell)
            .collect()
    }

    fn outgoing_edges(&self, node_id: &str) -> Vec<&dyn EdgeCell> {
        self.edges
            .values()
            .filter(|edge| edge.source == node_id)
            .map(|edge| edge as &dyn EdgeCell)
            .collect()
    }

    fn successors(&self, node_id: &str) -> Option<Vec<String>> {
        Some(
            self.edges
                .values()
                .filter(|edge| edge.source == node_id)
                .map(|edge| edge.target.clone())
                .collect(),
        )
    }
}

/// One node as exchanged with the persistence owner.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NodeRecord {
    pub id: String,
    pub position: Position,
    pub data: NodeData,
}

/// One edge as exchanged with the persistence owner.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EdgeRecord {
    pub id: String,
    pub source: String,
    pub target: String,
}

/// A full graph snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GraphRecords {
    pub nodes: Vec<NodeRecord>,
    pub edges: Vec<EdgeRecord>,
}

impl GraphRecords {
    /// Parse a snapshot from its JSON form.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize a snapshot to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
