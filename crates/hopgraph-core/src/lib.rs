//! Directed graph engine with hop-count path search.
//!
//! Provides the graph store ([`graph::Graph`]) with typed node identities and
//! edge payloads, minimum hop-count path tracing with a per-pair path cache,
//! edge payload retrieval along a path, and cycle detection.

pub mod cache;
pub mod config;
pub mod cycles;
pub mod error;
pub mod graph;
pub mod source;
pub mod traversal;

pub use config::GraphConfig;
pub use error::GraphError;
pub use graph::{Graph, GraphStats, NodeId, Path};
pub use source::{EdgeSpec, GraphSource};
