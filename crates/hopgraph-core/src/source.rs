//! Bulk-load descriptions of a graph.
//!
//! A [`GraphSource`] lists node identities and edge triples. It is an input
//! format for harnesses, usually read from JSON; the graph itself is never
//! written back out.

use crate::error::Result;
use crate::graph::Graph;
use anyhow::Context;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::path::Path;

/// One edge of a bulk load: `from -> to` carrying `data`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeSpec<K, E> {
    pub from: K,
    pub to: K,
    pub data: E,
}

impl<K, E> EdgeSpec<K, E> {
    pub fn new(from: K, to: K, data: E) -> Self {
        Self { from, to, data }
    }
}

/// Nodes and edges to insert in one go. Edges are applied after all nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound(deserialize = "K: Deserialize<'de>, E: Deserialize<'de>"))]
pub struct GraphSource<K, E> {
    #[serde(default)]
    pub nodes: Vec<K>,
    #[serde(default)]
    pub edges: Vec<EdgeSpec<K, E>>,
}

impl<K, E> Default for GraphSource<K, E> {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
        }
    }
}

impl<K, E> GraphSource<K, E>
where
    K: DeserializeOwned,
    E: DeserializeOwned,
{
    /// Parse a source description from JSON.
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        serde_json::from_str(json).context("failed to parse graph source JSON")
    }

    /// Read and parse a JSON source description from disk.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read graph source from {}", path.display()))?;
        Self::from_json(&json)
            .with_context(|| format!("invalid graph source in {}", path.display()))
    }
}

impl<K, E> Graph<K, E>
where
    K: Ord + Clone + Debug,
{
    /// Insert every node of `source`, then every edge.
    ///
    /// Stops at the first rejected insertion and returns its error. Insertions
    /// made before the failure stay in the graph.
    pub fn build_from(&mut self, source: &GraphSource<K, E>) -> Result<()>
    where
        E: Clone,
    {
        for node in &source.nodes {
            if let Err(err) = self.add_node(node.clone()) {
                tracing::debug!("bulk load stopped on node: {}", err);
                return Err(err);
            }
        }
        for edge in &source.edges {
            if let Err(err) = self.add_edge(&edge.from, &edge.to, edge.data.clone()) {
                tracing::debug!("bulk load stopped on edge: {}", err);
                return Err(err);
            }
        }
        tracing::debug!(
            "bulk loaded {} nodes and {} edges",
            source.nodes.len(),
            source.edges.len()
        );
        Ok(())
    }
}
