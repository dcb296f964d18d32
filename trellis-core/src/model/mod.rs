//! Node Data Model
//!
//! Everything about what a node *is*, as opposed to where it sits on the
//! canvas: the typed data record exchanged with the host, the derived
//! role/level classification, and the computation model a leaf node can
//! carry.
//!
//! # Concepts
//!
//! ## Records
//!
//! A node's data is a JSON-shaped record ([`NodeData`]). The host treats
//! it as an opaque bag; this crate is the only component that interprets
//! it. Unknown fields ride along untouched through every read-modify-write
//! cycle.
//!
//! ## Roles and levels
//!
//! Structure determines meaning. A node with nothing feeding into it is a
//! root indicator, one with nothing flowing out is a leaf measurement, and
//! the rest are intermediate aggregations. Levels number the longest chain
//! from a root, starting at 1. Both are recomputed from topology after
//! every edit; user code never sets them.
//!
//! ## Computation models
//!
//! Leaf nodes describe how their value is measured through an attached
//! computation model. The attachment is only valid on leaves; the
//! classification write-back clears it the moment a node gains children.

mod classify;
mod compute;
mod record;

pub use classify::{
    classify, compute_level, update_all_nodes_type_and_level, update_node_type_and_level,
    Classification,
};
pub use compute::{
    clear_node_compute_model, has_compute_model, set_node_compute_model, ComputeModelForm,
};
pub use record::{
    coerce_weight, NodeContent, NodeData, NodeProperties, NodeRole, WEIGHT_EMPTY, WEIGHT_SEEDED,
};
