// src/graph/reduce.rs
// =============================================================================
// Graph reduction: the first stage of the layout pipeline.
//
// How it works:
// 1. Keep the first `max_nodes` node entries, in the order given
// 2. Drop repeated identifiers (first occurrence wins)
// 3. Keep only edges whose source and target both survived
//
// Nothing is ranked or scored. A graph over the cap is silently cut; the
// number of entries cut is recorded so the caller can mention it.
// =============================================================================

use std::collections::HashSet;

use super::{Edge, Graph};

/// A graph that is safe to traverse: unique ids, no dangling edges.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReducedGraph {
    /// Surviving node ids, unique, in input order
    pub ids: Vec<String>,
    /// Edges among surviving nodes, in input order (duplicates kept)
    pub edges: Vec<Edge>,
    /// How many input node entries fell past the cap
    pub truncated: usize,
}

impl ReducedGraph {
    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|known| known == id)
    }
}

pub fn reduce(graph: &Graph, max_nodes: usize) -> ReducedGraph {
    let truncated = graph.nodes.len().saturating_sub(max_nodes);

    let mut keep: HashSet<&str> = HashSet::new();
    let mut ids = Vec::new();
    for node in graph.nodes.iter().take(max_nodes) {
        if keep.insert(node.id.as_str()) {
            ids.push(node.id.clone());
        }
    }

    let edges = graph
        .edges
        .iter()
        .filter(|e| keep.contains(e.source.as_str()) && keep.contains(e.target.as_str()))
        .cloned()
        .collect();

    ReducedGraph {
        ids,
        edges,
        truncated,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_graph_passes_through() {
        let graph = Graph::from_parts(["a", "b", "c"], &[("a", "b"), ("b", "c")]);
        let reduced = reduce(&graph, 250);
        assert_eq!(reduced.ids, vec!["a", "b", "c"]);
        assert_eq!(reduced.edges.len(), 2);
        assert_eq!(reduced.truncated, 0);
    }

    #[test]
    fn test_cap_keeps_first_nodes_in_order() {
        let ids: Vec<String> = (0..300).map(|i| format!("n{}", i)).collect();
        let graph = Graph::from_parts(ids, &[("n0", "n1"), ("n1", "n299"), ("n260", "n0")]);
        let reduced = reduce(&graph, 250);

        assert_eq!(reduced.ids.len(), 250);
        assert_eq!(reduced.ids[0], "n0");
        assert_eq!(reduced.ids[249], "n249");
        assert_eq!(reduced.truncated, 50);
        // Only the edge between two surviving nodes remains
        assert_eq!(reduced.edges, vec![Edge::new("n0", "n1")]);
    }

    #[test]
    fn test_dangling_edges_dropped() {
        let graph = Graph::from_parts(["a", "b"], &[("a", "b"), ("a", "ghost"), ("ghost", "b")]);
        let reduced = reduce(&graph, 250);
        assert_eq!(reduced.edges, vec![Edge::new("a", "b")]);
    }

    #[test]
    fn test_duplicate_ids_collapse_and_edges_are_not_deduplicated() {
        let graph = Graph::from_parts(["a", "b", "a"], &[("a", "b"), ("a", "b"), ("b", "b")]);
        let reduced = reduce(&graph, 250);
        assert_eq!(reduced.ids, vec!["a", "b"]);
        assert_eq!(reduced.edges.len(), 3);
        assert!(reduced.contains("b"));
        assert!(!reduced.contains("c"));
    }

    #[test]
    fn test_zero_cap_yields_empty_graph() {
        let graph = Graph::from_parts(["a", "b"], &[("a", "b")]);
        let reduced = reduce(&graph, 0);
        assert!(reduced.ids.is_empty());
        assert!(reduced.edges.is_empty());
        assert_eq!(reduced.truncated, 2);
    }
}
