//! Trellis Core
//!
//! This crate provides the graph-model core of the Trellis editor for
//! hierarchical indicator systems. It implements:
//!
//! - A capability interface over an externally-owned node/edge graph
//! - Structural classification of nodes into roles and levels
//! - Leaf-only computation-model attachment
//! - Cycle-safety checks guarding every edge commit
//! - Collapse and visibility propagation
//!
//! The rendering layer (canvas, drag-and-drop, hit-testing) lives outside
//! this crate. The core is handed a graph per call, derives per-node state
//! from topology, and writes it back through the capability traits. An
//! in-memory host is included so the core runs headless.
//!
//! # Architecture
//!
//! The crate is organized into three modules:
//!
//! - `graph`: capability traits, the in-memory host, and cycle safety
//! - `model`: the node data record, role/level classification, and
//!   computation models
//! - `view`: collapse handling, visibility recomputation, and the
//!   registration guard for visualization setup
//!
//! # Example
//!
//! ```rust,ignore
//! use trellis_core::graph::MemoryGraph;
//! use trellis_core::model::{update_all_nodes_type_and_level, NodeData};
//! use trellis_core::view::{apply_collapse_state, toggle_node_collapse};
//!
//! let mut graph = MemoryGraph::new();
//! graph.add_node("revenue", NodeData::with_label("Revenue"))?;
//! graph.add_node("volume", NodeData::with_label("Sales volume"))?;
//! graph.add_edge("revenue", "volume")?;
//!
//! // Derive roles and levels from the topology.
//! update_all_nodes_type_and_level(&graph);
//! apply_collapse_state(&graph);
//!
//! // Fold the tree away under its root.
//! toggle_node_collapse(&graph, "revenue");
//! assert!(!graph.node_by_id("volume").unwrap().is_visible());
//! ```

pub mod graph;
pub mod model;
pub mod view;
