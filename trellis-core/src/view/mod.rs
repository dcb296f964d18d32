//! View State
//!
//! Derived presentation state that is not rendering: which nodes and edges
//! are visible under the current collapse flags, and the process-wide
//! guard that keeps visualization setup idempotent.
//!
//! Visibility here means the `hide`/`show` capability on the host's cells.
//! How a hidden cell looks, animates, or participates in hit-testing is
//! the rendering layer's business.

mod collapse;
mod registry;

pub use collapse::{apply_collapse_state, set_node_collapse_state, toggle_node_collapse};
pub use registry::{is_registered, register_once};
