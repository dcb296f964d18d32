//! Graph Access and Cycle Safety
//!
//! This module is the boundary between the editor core and whatever owns
//! the actual graph. The rendering layer holds nodes and edges; the core
//! reads topology and writes derived per-node state through a small
//! capability interface.
//!
//! # Overview
//!
//! Three pieces:
//!
//! - The capability traits ([`NodeCell`], [`EdgeCell`], [`GraphFacade`])
//!   describe the shape any graph host must expose. Accessors only, no
//!   validation; missing ids come back as `None` or empty.
//! - [`MemoryGraph`] is the crate's own host implementing those traits,
//!   used by tests and by embedders that have no canvas. Its mutation API
//!   stands in for the rendering layer's commit path, which is where edge
//!   creation gets the mandatory cycle check.
//! - The cycle checker ([`can_reach`], [`will_create_cycle`],
//!   [`is_acyclic`]) answers reachability questions. It is the sole
//!   authority on whether a proposed edge is safe; committing the edge or
//!   refusing it is the host's job.
//!
//! # Design Decisions
//!
//! 1. Handles are borrowed per call and never retained. External code may
//!    mutate topology between calls, so caching anything across calls
//!    would go stale.
//!
//! 2. `successors` is an optional capability with a default `None` body.
//!    Hosts that track adjacency answer directly; the cycle checker falls
//!    back to scanning outgoing edges for hosts that do not.
//!
//! 3. Node and edge iteration follows insertion order. The editor relies
//!    on stable ordering when it rebuilds palettes and outlines.

mod cell;
mod cycle;
mod memory;

pub use cell::{EdgeCell, GraphFacade, NodeCell};
pub use cycle::{can_reach, is_acyclic, will_create_cycle};
pub use memory::{
    EdgeRecord, GraphError, GraphRecords, MemoryEdge, MemoryGraph, MemoryNode, NodeRecord,
    Position,
};
