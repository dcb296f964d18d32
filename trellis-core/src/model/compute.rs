//! Computation-Model Attachment
//!
//! Leaf nodes carry an optional computation model: an opaque payload
//! describing how the indicator's value is calculated, plus the descriptive
//! fields the editor's model dialog collects. This module owns the
//! attach/inspect/clear operations for that state.
//!
//! Attachment does not check the node's role. Classification is the
//! enforcement point: whenever a node stops being a leaf, its model fields
//! are cleared there. Callers are expected to offer the model dialog only
//! for leaf nodes.
//!
//! All writes are read-modify-write against the node's full data record,
//! so fields this module does not interpret survive untouched.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::graph::GraphFacade;
use crate::model::record::{NodeData, WEIGHT_EMPTY, WEIGHT_SEEDED};

/// Descriptive fields collected by the editor's model dialog, applied to
/// the node alongside the opaque payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ComputeModelForm {
    /// Model kind chosen in the dialog.
    pub custom_type: String,

    /// Free-form parameter descriptors.
    pub custom_properties: Vec<Value>,

    /// Measurement unit.
    pub unit: String,

    /// Evaluation priority.
    pub priority: Option<i64>,

    /// Value used when no measurement is present.
    pub default_value: Value,

    /// Operator notes.
    pub notes: String,
}

/// Whether a computation model is attached to this record, at either of
/// the two tolerated payload locations.
pub fn has_compute_model(data: &NodeData) -> bool {
    !data.model_payload().is_empty()
}

/// Attach a computation model: write the opaque payload to its canonical
/// home and apply the dialog's descriptive fields. Everything else on the
/// record is preserved.
///
/// A node that never carried a weight gets the seeded default on first
/// attach; an explicit weight is left alone.
///
/// Silent no-op when the node does not exist.
pub fn set_node_compute_model(
    graph: &dyn GraphFacade,
    node_id: &str,
    payload: Map<String, Value>,
    form: &ComputeModelForm,
) {
    let node = match graph.node_by_id(node_id) {
        Some(node) => node,
        None => return,
    };

    let mut data = node.data();
    data.properties.other_data = payload;
    data.properties.custom_type = form.custom_type.clone();
    data.properties.custom_properties = form.custom_properties.clone();
    data.properties.unit = form.unit.clone();
    data.properties.priority = form.priority;
    data.properties.default_value = form.default_value.clone();
    data.properties.notes = form.notes.clone();
    if data.properties.weight == WEIGHT_EMPTY {
        data.properties.weight = WEIGHT_SEEDED;
    }
    node.set_data(data);
}

/// Detach the computation model: reset the payload (both storage
/// locations) and every descriptive field to its default. The node's
/// level and weight are untouched.
///
/// Silent no-op when the node does not exist.
pub fn clear_node_compute_model(graph: &dyn GraphFacade, node_id: &str) {
    let node = match graph.node_by_id(node_id) {
        Some(node) => node,
        None => return,
    };

    let mut data = node.data();
    clear_model_fields(&mut data);
    node.set_data(data);
}

/// Reset model payload and descriptive fields in place. The legacy payload
/// slot is emptied too so a cleared model cannot resurface through the
/// fallback read.
pub(crate) fn clear_model_fields(data: &mut NodeData) {
    data.properties.other_data = Map::new();
    data.other_data = Map::new();
    data.properties.custom_type = String::new();
    data.properties.custom_properties = Vec::new();
    data.properties.unit = String::new();
    data.properties.priority = None;
    data.properties.default_value = Value::Null;
    data.properties.notes = String::new();
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
