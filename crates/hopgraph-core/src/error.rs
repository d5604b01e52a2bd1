//! Error type shared by every graph operation.

/// Errors returned by [`crate::graph::Graph`] operations.
///
/// Node identities are rendered with `Debug` so the error stays non-generic.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    #[error("node {0} already exists")]
    DuplicateNode(String),
    #[error("edge {from} -> {to} already exists")]
    DuplicateEdge { from: String, to: String },
    #[error("node {0} not found")]
    NodeNotFound(String),
    #[error("no path from {from} to {to}")]
    PathNotFound { from: String, to: String },
    #[error("malformed path: {0}")]
    MalformedPath(String),
    #[error("trace optimization unavailable: cache is disabled or empty")]
    CacheOptimizationUnavailable,
}

impl GraphError {
    pub(crate) fn duplicate_node<K: std::fmt::Debug>(id: &K) -> Self {
        Self::DuplicateNode(format!("{id:?}"))
    }

    pub(crate) fn duplicate_edge<K: std::fmt::Debug>(from: &K, to: &K) -> Self {
        Self::DuplicateEdge {
            from: format!("{from:?}"),
            to: format!("{to:?}"),
        }
    }

    pub(crate) fn node_not_found<K: std::fmt::Debug>(id: &K) -> Self {
        Self::NodeNotFound(format!("{id:?}"))
    }

    pub(crate) fn path_not_found<K: std::fmt::Debug>(from: &K, to: &K) -> Self {
        Self::PathNotFound {
            from: format!("{from:?}"),
            to: format!("{to:?}"),
        }
    }
}

/// Shorthand for results carrying a [`GraphError`].
pub type Result<T> = std::result::Result<T, GraphError>;
