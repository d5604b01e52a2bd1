//! Shortest hop-count path search.
//!
//! Exhaustive depth-first search with backtracking: every node tries all of
//! its outgoing neighbors and keeps the shortest successful branch. Nodes on
//! the current search stack are skipped, so the search terminates on cyclic
//! graphs. Worst-case cost is exponential; the engine targets small and
//! medium graphs.

use crate::error::{GraphError, Result};
use crate::graph::{Graph, Node, NodeId, Path};
use std::collections::HashSet;
use std::fmt::Debug;

/// State shared by every frame of one search.
struct SearchContext<'a, K> {
    nodes: &'a [Node<K>],
    target: NodeId,
    /// Nodes with a live frame on the search stack.
    on_stack: HashSet<NodeId>,
    reservation: usize,
}

/// A node being expanded.
struct Frame {
    node: NodeId,
    /// Position of the next outgoing neighbor to try.
    cursor: usize,
    /// Shortest branch found below this node, stored target-first.
    best: Option<Vec<NodeId>>,
}

impl Frame {
    fn new(node: NodeId) -> Self {
        Self {
            node,
            cursor: 0,
            best: None,
        }
    }

    fn offer(&mut self, branch: Vec<NodeId>) {
        // Strict comparison keeps the first branch in adjacency order on ties.
        if self.best.as_ref().is_none_or(|b| branch.len() < b.len()) {
            self.best = Some(branch);
        }
    }
}

impl<K, E> Graph<K, E>
where
    K: Ord + Clone + Debug,
{
    /// Find a minimum hop-count path from `from` to `to`.
    ///
    /// When `from == to` only a cycle of at least one edge back to the node
    /// counts as a path. Results are served from and stored into the path
    /// cache while caching is enabled.
    pub fn trace(&mut self, from: &K, to: &K) -> Result<Path> {
        let to_id = self.find(to).ok_or_else(|| GraphError::node_not_found(to))?;
        let from_id = self
            .find(from)
            .ok_or_else(|| GraphError::node_not_found(from))?;

        self.trace_between(from_id, to_id)
            .ok_or_else(|| GraphError::path_not_found(from, to))
    }

    /// Search between two known handles, consulting the cache first.
    pub(crate) fn trace_between(&mut self, from: NodeId, to: NodeId) -> Option<Path> {
        if let Some(hit) = self.cache.get((from, to)) {
            return Some(hit.clone());
        }

        let reservation = self
            .cache
            .reservation_hint()
            .unwrap_or(self.trace_reservation);
        let mut ctx = SearchContext {
            nodes: &self.nodes,
            target: to,
            on_stack: HashSet::new(),
            reservation,
        };
        let path = Path::new(search(from, &mut ctx)?);
        self.cache.insert((from, to), path.clone());
        Some(path)
    }
}

/// Shortest route from `root` to the target, root first.
///
/// Frames live on a heap-allocated stack, so path length is not limited by
/// the thread stack. Branches grow target-first and are reversed once.
fn search<K: Debug>(root: NodeId, ctx: &mut SearchContext<'_, K>) -> Option<Vec<NodeId>> {
    let nodes = ctx.nodes;
    let mut stack = vec![Frame::new(root)];
    ctx.on_stack.insert(root);

    while let Some(frame) = stack.last_mut() {
        if let Some(&neighbor) = nodes[frame.node.index()].out.get(frame.cursor) {
            frame.cursor += 1;

            #[cfg(feature = "search-trace")]
            tracing::trace!(
                "{:?} scanning {:?}",
                nodes[frame.node.index()].key,
                nodes[neighbor.index()].key
            );

            // Reaching the target below the root closes the branch even when
            // the target is the root itself.
            if neighbor == ctx.target {
                let mut branch = Vec::with_capacity(ctx.reservation);
                branch.push(neighbor);
                frame.offer(branch);
            } else if ctx.on_stack.insert(neighbor) {
                stack.push(Frame::new(neighbor));
            }
            continue;
        }

        let node = frame.node;
        let best = frame.best.take();
        stack.pop();
        ctx.on_stack.remove(&node);

        let Some(mut branch) = best else {
            continue;
        };
        branch.push(node);

        #[cfg(feature = "search-trace")]
        tracing::trace!(
            "found branch of {} nodes via {:?}",
            branch.len(),
            nodes[node.index()].key
        );

        match stack.last_mut() {
            Some(parent) => parent.offer(branch),
            None => {
                branch.reverse();
                return Some(branch);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(
        nodes: &[&'static str],
        edges: &[(&'static str, &'static str)],
    ) -> Graph<&'static str, String> {
        let mut graph = Graph::new();
        for id in nodes {
            graph.add_node(*id).unwrap();
        }
        for (from, to) in edges {
            graph.add_edge(from, to, format!("{from}->{to}")).unwrap();
        }
        graph
    }

    fn keys(graph: &Graph<&'static str, String>, path: &Path) -> Vec<&'static str> {
        graph.path_keys(path).into_iter().copied().collect()
    }

    #[test]
    fn test_missing_nodes_fail() {
        let mut graph = build(&["A"], &[]);
        assert_eq!(
            graph.trace(&"A", &"X"),
            Err(GraphError::NodeNotFound("\"X\"".to_string()))
        );
        assert!(matches!(
            graph.trace(&"X", &"A"),
            Err(GraphError::NodeNotFound(_))
        ));
    }

    #[test]
    fn test_no_path_fails() {
        let mut graph = build(&["A", "B"], &[("A", "B")]);
        assert!(matches!(
            graph.trace(&"B", &"A"),
            Err(GraphError::PathNotFound { .. })
        ));
    }

    #[test]
    fn test_same_node_without_cycle_fails() {
        let mut graph = build(&["A", "B"], &[("A", "B")]);
        assert!(graph.trace(&"A", &"A").is_err());
    }

    #[test]
    fn test_self_loop_is_one_hop() {
        let mut graph = build(&["A", "B"], &[("A", "B"), ("B", "B")]);
        let path = graph.trace(&"B", &"B").unwrap();
        assert_eq!(keys(&graph, &path), vec!["B", "B"]);
        assert_eq!(path.hops(), 1);
    }

    #[test]
    fn test_same_node_via_longer_cycle() {
        let mut graph = build(
            &["A", "B", "C"],
            &[("A", "B"), ("B", "C"), ("C", "A")],
        );
        let path = graph.trace(&"A", &"A").unwrap();
        assert_eq!(keys(&graph, &path), vec!["A", "B", "C", "A"]);
    }

    #[test]
    fn test_prefers_fewer_hops_over_adjacency_order() {
        let mut graph = build(
            &["S", "X", "Y", "T"],
            &[("S", "X"), ("X", "Y"), ("Y", "T"), ("S", "T")],
        );
        let path = graph.trace(&"S", &"T").unwrap();
        assert_eq!(keys(&graph, &path), vec!["S", "T"]);
    }

    #[test]
    fn test_tie_goes_to_first_neighbor() {
        let mut graph = build(
            &["S", "L", "R", "T"],
            &[("S", "L"), ("S", "R"), ("L", "T"), ("R", "T")],
        );
        let path = graph.trace(&"S", &"T").unwrap();
        assert_eq!(keys(&graph, &path), vec!["S", "L", "T"]);
    }

    #[test]
    fn test_terminates_on_cycles() {
        let mut graph = build(
            &["A", "B", "C", "D"],
            &[("A", "B"), ("B", "A"), ("B", "C"), ("C", "B")],
        );
        assert!(graph.trace(&"A", &"D").is_err());
        assert_eq!(graph.trace(&"A", &"C").unwrap().hops(), 2);
    }

    #[test]
    fn test_long_chain_does_not_exhaust_the_stack() {
        const LEN: u32 = 50_000;
        let mut graph: Graph<u32, ()> = Graph::new();
        for id in 0..LEN {
            graph.add_node(id).unwrap();
        }
        for id in 1..LEN {
            graph.add_edge(&(id - 1), &id, ()).unwrap();
        }

        let path = graph.trace(&0, &(LEN - 1)).unwrap();
        assert_eq!(path.hops(), LEN as usize - 1);
        assert_eq!(graph.node_key(path.first().unwrap()), Some(&0));
        assert_eq!(graph.node_key(path.last().unwrap()), Some(&(LEN - 1)));
        assert!(graph.trace(&(LEN - 1), &0).is_err());
    }

    #[test]
    fn test_long_detour_beats_dead_ends() {
        // A long loop back to the start, with a dead-end spur off every node.
        const LEN: u32 = 20_000;
        let mut graph: Graph<u32, ()> = Graph::new();
        for id in 0..LEN * 2 {
            graph.add_node(id).unwrap();
        }
        for id in 0..LEN {
            graph.add_edge(&id, &(LEN + id), ()).unwrap();
            graph.add_edge(&id, &((id + 1) % LEN), ()).unwrap();
        }

        let path = graph.trace(&0, &0).unwrap();
        assert_eq!(path.hops(), LEN as usize);
        assert_eq!(graph.load_edges(&path).unwrap().len(), LEN as usize);
    }

    #[test]
    fn test_cache_hit_returns_stored_path() {
        let mut graph = build(&["A", "B", "C"], &[("A", "B"), ("B", "C")]);
        let first = graph.trace(&"A", &"C").unwrap();
        assert_eq!(graph.cached_paths(), 1);
        let second = graph.trace(&"A", &"C").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_failed_trace_is_not_cached() {
        let mut graph = build(&["A", "B"], &[("A", "B")]);
        assert!(graph.trace(&"B", &"A").is_err());
        assert_eq!(graph.cached_paths(), 0);
    }

    #[test]
    fn test_disabled_cache_stores_nothing() {
        let mut graph = build(&["A", "B"], &[("A", "B")]);
        graph.set_cache_enabled(false);
        graph.trace(&"A", &"B").unwrap();
        assert_eq!(graph.cached_paths(), 0);
    }
}
