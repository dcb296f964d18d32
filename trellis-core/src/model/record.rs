//! Node Data Records
//!
//! Defines the plain-data record stored on every node of an indicator graph.
//! Records are JSON-shaped: the canvas layer persists and restores them
//! verbatim, and dialog forms patch individual fields through
//! read-modify-write cycles.
//!
//! # Canonical and legacy storage
//!
//! Two derived fields historically lived in more than one place:
//!
//! - the hierarchy level was cached both at the record top level and under
//!   `properties.level`;
//! - the computation-model payload was stored both at the record top level
//!   (`otherData`) and under `properties.otherData`.
//!
//! This crate keeps one canonical home per field (top-level `role`/`level`,
//! nested `properties.otherData`) and treats the other location as a
//! read-only fallback so that records written by older builds still load.
//! Writers only ever touch the canonical location.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Weight assigned to a node created without an explicit share.
pub const WEIGHT_EMPTY: f64 = 0.0;

/// Weight seeded by the editor when a node starts with an even split.
pub const WEIGHT_SEEDED: f64 = 50.0;

/// Structural role of a node, derived from edge topology.
///
/// Roles are never set by the user; the classification pass recomputes them
/// after every topology edit. The serialized strings match the record format
/// the canvas layer consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeRole {
    /// No incoming edges. The top of an indicator hierarchy.
    #[serde(rename = "root-node")]
    Root,

    /// Both incoming and outgoing edges. An intermediate aggregation step.
    #[serde(rename = "sub-node")]
    Sub,

    /// Incoming edges only. The only role allowed to carry a computation
    /// model.
    #[serde(rename = "leaf-node")]
    Leaf,
}

impl NodeRole {
    /// The serialized form of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeRole::Root => "root-node",
            NodeRole::Sub => "sub-node",
            NodeRole::Leaf => "leaf-node",
        }
    }
}

/// User-editable display content plus a stable content identifier.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NodeContent {
    /// Identifier of the indicator this node displays. Stable across
    /// relabeling.
    pub id: String,

    /// Display label shown on the canvas.
    pub label: String,
}

/// The editable property bag of a node record.
///
/// Unknown fields are preserved through the flattened `extra` map so that
/// read-modify-write cycles never drop data other tooling placed here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NodeProperties {
    /// Display content. A non-object value falls back to empty content.
    #[serde(deserialize_with = "de_content")]
    pub content: NodeContent,

    /// Relative weight of this node among its siblings. Tolerantly decoded:
    /// numbers, numeric strings, and absent values all coerce to a number.
    #[serde(deserialize_with = "de_weight")]
    pub weight: f64,

    /// Canonical home of the computation-model payload. Empty means no
    /// model is attached.
    pub other_data: Map<String, Value>,

    /// Descriptive model field: the model kind chosen in the editor form.
    pub custom_type: String,

    /// Descriptive model field: free-form parameter descriptors.
    pub custom_properties: Vec<Value>,

    /// Descriptive model field: measurement unit.
    pub unit: String,

    /// Descriptive model field: evaluation priority.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,

    /// Descriptive model field: value used when no measurement is present.
    pub default_value: Value,

    /// Descriptive model field: operator notes.
    pub notes: String,

    /// Back-reference to the direct predecessor. By convention the first
    /// incoming edge wins when a node has several.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_node_id: Option<String>,

    /// User-toggled collapse flag. When set, every descendant is hidden.
    pub collapsed: bool,

    /// Derived: whether the node has at least one outgoing edge.
    pub has_children: bool,

    /// Legacy level slot. Read when the top-level level is absent; never
    /// written by this crate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<u32>,

    /// Fields this crate does not interpret, preserved verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The full data record attached to a node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NodeData {
    /// Derived structural role. Absent until the first classification pass.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<NodeRole>,

    /// Derived hierarchy level, 1 at roots. Canonical home.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<u32>,

    /// Editable property bag. A non-object value falls back to an empty
    /// bag rather than failing the whole record.
    #[serde(deserialize_with = "de_properties")]
    pub properties: NodeProperties,

    /// Legacy payload slot. Read when `properties.other_data` is empty;
    /// never written by this crate.
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub other_data: Map<String, Value>,

    /// Fields this crate does not interpret, preserved verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl NodeData {
    /// A record with a display label and everything else defaulted. Used
    /// when a node is dropped onto the canvas from the palette.
    pub fn with_label(label: impl Into<String>) -> Self {
        let mut data = NodeData::default();
        data.properties.content.label = label.into();
        data
    }

    /// Previously computed level, canonical location first, legacy slot as
    /// fallback.
    pub fn cached_level(&self) -> Option<u32> {
        self.level.or(self.properties.level)
    }

    /// Computation-model payload, canonical location first, legacy slot as
    /// fallback.
    pub fn model_payload(&self) -> &Map<String, Value> {
        if !self.properties.other_data.is_empty() {
            &self.properties.other_data
        } else {
            &self.other_data
        }
    }

    /// Parse a record from its JSON form.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl NodeProperties {
    /// Replace the weight with a coerced numeric value. Dialog forms submit
    /// weights as JSON and are not trusted to send a number.
    pub fn set_weight_value(&mut self, value: &Value) {
        self.weight = coerce_weight(value);
    }
}

/// Coerce a JSON value to a numeric weight. Numbers pass through, numeric
/// strings are parsed, everything else becomes `WEIGHT_EMPTY`.
pub fn coerce_weight(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(WEIGHT_EMPTY),
        Value::String(s) => s.trim().parse().unwrap_or(WEIGHT_EMPTY),
        _ => WEIGHT_EMPTY,
    }
}

fn de_weight<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_weight(&value))
}

fn de_properties<'de, D>(deserializer: D) -> Result<NodeProperties, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::Object(_) => NodeProperties::deserialize(value).map_err(serde::de::Error::custom),
        _ => Ok(NodeProperties::default()),
    }
}

fn de_content<'de, D>(deserializer: D) -> Result<NodeContent, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::Object(_) => NodeContent::deserialize(value).map_err(serde::de::Error::custom),
        _ => Ok(NodeContent::default()),
    }
}
