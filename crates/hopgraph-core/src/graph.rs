//! Graph data model: node arena, edge payload store, and path handles.

use crate::cache::PathCache;
use crate::config::GraphConfig;
use crate::cycles::CycleState;
use crate::error::{GraphError, Result};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::fmt::Debug;

/// Opaque handle to a node inside a single [`Graph`].
///
/// Handles are arena indices: they stay valid for the lifetime of the graph
/// that issued them and are meaningless for any other graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Position of the node in insertion order.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Ordered pair key addressing both the edge store and the path cache.
pub(crate) type PairKey = (NodeId, NodeId);

/// A vertex: its identity plus outgoing adjacency (by target node).
#[derive(Debug, Clone)]
pub(crate) struct Node<K> {
    pub(crate) key: K,
    pub(crate) out: Vec<NodeId>,
}

/// A traced route through the graph, source first.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Path {
    nodes: Vec<NodeId>,
}

impl Path {
    pub(crate) fn new(nodes: Vec<NodeId>) -> Self {
        Self { nodes }
    }

    /// Node handles along the path.
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    /// Number of nodes on the path.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the path holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of edges crossed (node count minus one).
    pub fn hops(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }

    pub fn first(&self) -> Option<NodeId> {
        self.nodes.first().copied()
    }

    pub fn last(&self) -> Option<NodeId> {
        self.nodes.last().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.iter().copied()
    }
}

impl From<Vec<NodeId>> for Path {
    fn from(nodes: Vec<NodeId>) -> Self {
        Self::new(nodes)
    }
}

/// Summary counters for a graph, suitable for display or JSON output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphStats {
    pub nodes: usize,
    pub edges: usize,
    pub self_loops: usize,
    pub cached_paths: usize,
    pub cache_enabled: bool,
    /// Buffer reservation hint computed by `optimize_trace`, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_path_hint: Option<usize>,
}

/// Directed graph with unique node identities `K` and edge payloads `E`.
///
/// At most one edge exists per ordered node pair; self-loops are allowed.
/// Nodes and edges are never removed.
#[derive(Debug, Clone)]
pub struct Graph<K, E> {
    pub(crate) nodes: Vec<Node<K>>,
    /// Identity index; iteration order is identity order.
    pub(crate) index: BTreeMap<K, NodeId>,
    pub(crate) edges: HashMap<PairKey, E>,
    pub(crate) cycles: CycleState,
    pub(crate) cache: PathCache,
    /// Initial path buffer capacity used when no cache hint is available.
    pub(crate) trace_reservation: usize,
}

impl<K, E> Default for Graph<K, E>
where
    K: Ord + Clone + Debug,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, E> Graph<K, E>
where
    K: Ord + Clone + Debug,
{
    /// Create an empty graph with caching enabled.
    pub fn new() -> Self {
        Self::with_config(&GraphConfig::default())
    }

    /// Create an empty graph using the cache and trace settings from `config`.
    pub fn with_config(config: &GraphConfig) -> Self {
        Self {
            nodes: Vec::new(),
            index: BTreeMap::new(),
            edges: HashMap::new(),
            cycles: CycleState::Unknown,
            cache: PathCache::new(config.cache.enabled),
            trace_reservation: config.trace.reservation,
        }
    }

    /// Insert a node. Fails if the identity is already present.
    pub fn add_node(&mut self, id: K) -> Result<NodeId> {
        if self.index.contains_key(&id) {
            tracing::debug!("rejected duplicate node {:?}", id);
            return Err(GraphError::duplicate_node(&id));
        }

        let handle = NodeId(self.nodes.len());
        self.index.insert(id.clone(), handle);
        self.nodes.push(Node {
            key: id,
            out: Vec::new(),
        });
        self.topology_changed();
        Ok(handle)
    }

    /// Insert a directed edge carrying `data`.
    ///
    /// Both endpoints must already exist and the ordered pair must not have an
    /// edge yet.
    pub fn add_edge(&mut self, from: &K, to: &K, data: E) -> Result<()> {
        let to_id = self.find(to).ok_or_else(|| {
            tracing::debug!("rejected edge {:?} -> {:?}: missing target", from, to);
            GraphError::node_not_found(to)
        })?;
        let from_id = self.find(from).ok_or_else(|| {
            tracing::debug!("rejected edge {:?} -> {:?}: missing source", from, to);
            GraphError::node_not_found(from)
        })?;

        if self.edges.contains_key(&(from_id, to_id)) {
            tracing::debug!("rejected duplicate edge {:?} -> {:?}", from, to);
            return Err(GraphError::duplicate_edge(from, to));
        }

        self.nodes[from_id.0].out.push(to_id);
        self.edges.insert((from_id, to_id), data);
        self.topology_changed();
        Ok(())
    }

    /// Resolve an identity to its node handle.
    pub fn find(&self, id: &K) -> Option<NodeId> {
        self.index.get(id).copied()
    }

    /// Identity of the node behind `handle`.
    pub fn node_key(&self, handle: NodeId) -> Option<&K> {
        self.nodes.get(handle.0).map(|n| &n.key)
    }

    /// Outgoing neighbors of `handle`, in edge insertion order.
    pub fn neighbors(&self, handle: NodeId) -> &[NodeId] {
        self.nodes
            .get(handle.0)
            .map(|n| n.out.as_slice())
            .unwrap_or_default()
    }

    pub fn contains_node(&self, id: &K) -> bool {
        self.index.contains_key(id)
    }

    pub fn contains_edge(&self, from: &K, to: &K) -> bool {
        self.edge(from, to).is_some()
    }

    /// Payload stored on the edge `from -> to`.
    pub fn edge(&self, from: &K, to: &K) -> Option<&E> {
        let from_id = self.find(from)?;
        let to_id = self.find(to)?;
        self.edges.get(&(from_id, to_id))
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Iterate over `(identity, handle)` pairs in identity order.
    pub fn nodes(&self) -> impl Iterator<Item = (&K, NodeId)> + '_ {
        self.index.iter().map(|(k, &id)| (k, id))
    }

    /// Resolve every node of `path` back to its identity.
    ///
    /// Handles that do not belong to this graph are skipped.
    pub fn path_keys(&self, path: &Path) -> Vec<&K> {
        path.iter().filter_map(|id| self.node_key(id)).collect()
    }

    /// Collect the payloads of the edges crossed by `path`, in order.
    pub fn load_edges(&self, path: &Path) -> Result<Vec<&E>> {
        if path.len() < 2 {
            return Err(GraphError::MalformedPath(format!(
                "expected at least 2 nodes, got {}",
                path.len()
            )));
        }

        path.nodes()
            .windows(2)
            .map(|pair| {
                self.edges.get(&(pair[0], pair[1])).ok_or_else(|| {
                    GraphError::MalformedPath(format!(
                        "no edge between {} and {}",
                        self.describe(pair[0]),
                        self.describe(pair[1])
                    ))
                })
            })
            .collect()
    }

    /// Snapshot of graph and cache counters.
    pub fn stats(&self) -> GraphStats {
        GraphStats {
            nodes: self.nodes.len(),
            edges: self.edges.len(),
            self_loops: self.edges.keys().filter(|(a, b)| a == b).count(),
            cached_paths: self.cache.len(),
            cache_enabled: self.cache.is_enabled(),
            average_path_hint: self.cache.reservation_hint(),
        }
    }

    /// Invalidate everything derived from the topology.
    fn topology_changed(&mut self) {
        self.cache.clear();
        self.cycles = CycleState::Unknown;
    }

    fn describe(&self, handle: NodeId) -> String {
        match self.node_key(handle) {
            Some(key) => format!("{key:?}"),
            None => format!("<unknown node #{}>", handle.0),
        }
    }
}
