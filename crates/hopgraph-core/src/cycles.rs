//! Cycle detection built on path search.
//!
//! For every edge `u -> v` the detector asks whether `v` can reach `u`.
//! Any such return path closes a loop with the forward edge.

use crate::graph::{Graph, NodeId};
use std::fmt::Debug;

/// Memoized answer of the cycle detector; reset by every topology change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum CycleState {
    #[default]
    Unknown,
    Acyclic,
    Cyclic,
}

impl<K, E> Graph<K, E>
where
    K: Ord + Clone + Debug,
{
    /// Returns true if the graph contains at least one directed cycle,
    /// self-loops included.
    ///
    /// Return-path searches go through the same search as [`Graph::trace`]
    /// and therefore populate the path cache when it is enabled.
    pub fn contains_cycles(&mut self) -> bool {
        match self.cycles {
            CycleState::Cyclic => return true,
            CycleState::Acyclic => return false,
            CycleState::Unknown => {}
        }

        // (search source, search target) = (edge target, edge source)
        let checks: Vec<(NodeId, NodeId)> = self
            .index
            .values()
            .flat_map(|&node| {
                self.nodes[node.index()]
                    .out
                    .iter()
                    .map(move |&neighbor| (neighbor, node))
            })
            .collect();

        for (neighbor, node) in checks {
            if self.trace_between(neighbor, node).is_some() {
                tracing::debug!(
                    "cycle found through edge {:?} -> {:?}",
                    self.nodes[node.index()].key,
                    self.nodes[neighbor.index()].key
                );
                self.cycles = CycleState::Cyclic;
                return true;
            }
        }

        tracing::debug!("graph of {} nodes is acyclic", self.nodes.len());
        self.cycles = CycleState::Acyclic;
        false
    }
}
