//! Graph Capability Interface
//!
//! The editor core never owns the graph it works on. The canvas layer hands
//! it a graph handle on every call, and the core reads topology and writes
//! derived node state through the narrow interfaces below. Any rendering
//! engine whose cells can answer these calls is substitutable; the crate's
//! own [`MemoryGraph`](super::MemoryGraph) is one such implementation and is
//! what the tests run against.
//!
//! Lookups are total: a missing id yields `None` or an empty list, never an
//! error. Existence checks belong to the caller.

use crate::model::NodeData;

/// A node cell of the host graph.
pub trait NodeCell {
    /// Stable unique identifier, assigned at creation and never reused.
    fn id(&self) -> &str;

    /// A copy of the node's data record.
    fn data(&self) -> NodeData;

    /// Replace the node's data record wholesale. Callers must
    /// read-modify-write: fields absent from `data` are gone afterwards.
    fn set_data(&self, data: NodeData);

    /// Remove the node from view.
    fn hide(&self);

    /// Return the node to view.
    fn show(&self);

    /// Whether the node is currently in view. Nodes are visible unless
    /// explicitly hidden.
    fn is_visible(&self) -> bool;
}

/// An edge cell of the host graph. Direction reads source-feeds-target:
/// the source is the deeper node, the target the structurally higher one.
pub trait EdgeCell {
    /// Stable unique identifier.
    fn id(&self) -> &str;

    /// Id of the node this edge starts at.
    fn source_id(&self) -> &str;

    /// Id of the node this edge points to.
    fn target_id(&self) -> &str;

    /// Remove the edge from view.
    fn hide(&self);

    /// Return the edge to view.
    fn show(&self);

    /// Whether the edge is currently in view.
    fn is_visible(&self) -> bool;
}

/// Read access to the graph a canvas layer owns.
///
/// The handle is borrowed for the duration of one core operation and must
/// not be retained: the owner is free to mutate topology between calls.
pub trait GraphFacade {
    /// Look up a node by id.
    fn node_by_id(&self, id: &str) -> Option<&dyn NodeCell>;

    /// Look up an edge by id.
    fn edge_by_id(&self, id: &str) -> Option<&dyn EdgeCell>;

    /// All nodes, in insertion order.
    fn nodes(&self) -> Vec<&dyn NodeCell>;

    /// All edges, in insertion order.
    fn edges(&self) -> Vec<&dyn EdgeCell>;

    /// Edges whose target is `node_id`.
    fn incoming_edges(&self, node_id: &str) -> Vec<&dyn EdgeCell>;

    /// Edges whose source is `node_id`.
    fn outgoing_edges(&self, node_id: &str) -> Vec<&dyn EdgeCell>;

    /// Direct successor ids of `node_id`, if the host can answer this
    /// faster than an edge scan. `None` makes callers fall back to
    /// [`outgoing_edges`](Self::outgoing_edges); duplicates from parallel
    /// edges must be preserved.
    fn successors(&self, _node_id: &str) -> Option<Vec<String>> {
        None
    }
}
