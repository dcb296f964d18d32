//! Cycle Safety
//!
//! Every edit must leave the indicator graph a DAG. The canvas layer asks
//! [`will_create_cycle`] before committing a user-drawn edge; the answer is
//! authoritative, the veto itself happens at the call site.
//!
//! # Algorithm
//!
//! Reachability is a breadth-first search following outgoing edges, using
//! the host's direct-successor capability when available and an edge scan
//! otherwise. A visited set bounds the walk at O(V + E).
//!
//! [`is_acyclic`] validates a whole graph with Kahn's algorithm: compute
//! in-degrees, repeatedly remove zero-in-degree nodes, and compare the
//! removal count with the node count. It is a standalone checking utility
//! used in tests and after snapshot restore, off the hot edit path.

use std::collections::{HashMap, HashSet, VecDeque};

use smallvec::SmallVec;

use super::cell::GraphFacade;

/// Whether `target_id` can be reached from `start_id` by following edges in
/// the source-to-target direction. A node always reaches itself.
pub fn can_reach(graph: &dyn GraphFacade, start_id: &str, target_id: &str) -> bool {
    if start_id == target_id {
        return true;
    }

    let mut visited: HashSet<String> = HashSet::new();
    let mut queue: VecDeque<String> = VecDeque::new();
    visited.insert(start_id.to_string());
    queue.push_back(start_id.to_string());

    while let Some(current) = queue.pop_front() {
        for next in step_successors(graph, &current) {
            if next == target_id {
                return true;
            }
            if visited.insert(next.clone()) {
                queue.push_back(next);
            }
        }
    }

    false
}

/// Whether adding the edge `source_id -> target_id` would close a loop.
///
/// The proposed edge is unsafe exactly when the target can already reach
/// back to the source. A self-edge is always a cycle.
pub fn will_create_cycle(graph: &dyn GraphFacade, source_id: &str, target_id: &str) -> bool {
    can_reach(graph, target_id, source_id)
}

/// Whole-graph validation: true when no directed cycle exists.
pub fn is_acyclic(graph: &dyn GraphFacade) -> bool {
    let nodes = graph.nodes();
    let edges = graph.edges();

    let mut in_degree: HashMap<&str, usize> = HashMap::with_capacity(nodes.len());
    for node in &nodes {
        in_degree.insert(node.id(), 0);
    }

    // Adjacency restricted to known endpoints; an edge dangling off a
    // missing node cannot participate in a cycle.
    let mut adjacency: HashMap<&str, SmallVec<[&str; 4]>> = HashMap::new();
    for edge in &edges {
        let source = edge.source_id();
        let target = edge.target_id();
        if !in_degree.contains_key(source) {
            continue;
        }
        if let Some(degree) = in_degree.get_mut(target) {
            *degree += 1;
            adjacency.entry(source).or_default().push(target);
        }
    }

    let mut queue: VecDeque<&str> = in_degree
        .iter()
        .filter(|(_, degree)| **degree == 0)
        .map(|(id, _)| *id)
        .collect();

    // Kahn's algorithm
    let mut removed = 0usize;
    while let Some(id) = queue.pop_front() {
        removed += 1;

        if let Some(targets) = adjacency.get(id) {
            for &target in targets {
                if let Some(degree) = in_degree.get_mut(target) {
                    *degree = degree.saturating_sub(1);
                    if *degree == 0 {
                        queue.push_back(target);
                    }
                }
            }
        }
    }

    removed == nodes.len()
}

/// Direct successors of `id`, preferring the host's capability and falling
/// back to an outgoing-edge scan.
fn step_successors(graph: &dyn GraphFacade, id: &str) -> Vec<String> {
    if let Some(direct) = graph.successors(id) {
        return direct;
    }

    graph
        .outgoing_edges(id)
        .iter()
        .map(|edge| edge.target_id().to_string())
        .collect()
}
