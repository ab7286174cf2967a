// src/layout/levels.rs
// =============================================================================
// Level assignment: breadth-first layering from the root.
//
// How it works:
// 1. Put the root in a queue at depth 0
// 2. Pop a node, walk its outgoing edges (source -> target only)
// 3. Any target not yet visited gets depth(parent) + 1 and joins the queue
// 4. Repeat until the queue is empty
//
// The visited set is checked before enqueueing, so every node is queued at
// most once and cycles terminate. The first depth a node receives is its
// shortest hop count from the root.
//
// Nodes the walk never reached are not dropped: they share one trailing
// level after the deepest reached one (level 0 when there is no root).
// Every level is then sorted by URL path, then by raw id, so the same
// graph always produces the same vertical order.
// =============================================================================

use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};

use super::paths::path_key;
use crate::graph::ReducedGraph;

/// The result of layering a reduced graph.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Levels {
    /// BFS depth of every node reachable from the root
    pub depth: HashMap<String, usize>,
    /// Level index -> sorted member ids, covering every node
    pub buckets: BTreeMap<usize, Vec<String>>,
    /// Index of the trailing level holding unreachable nodes, if any
    pub unreachable_level: Option<usize>,
}

impl Levels {
    // Highest level index in use (0 for an empty graph)
    pub fn max_level(&self) -> usize {
        self.buckets.keys().next_back().copied().unwrap_or(0)
    }
}

pub fn assign_levels(graph: &ReducedGraph, root: Option<&str>) -> Levels {
    let root = root.filter(|r| graph.contains(r));
    let depth = match root {
        Some(root) => bfs_depths(graph, root),
        None => HashMap::new(),
    };

    let mut buckets: BTreeMap<usize, Vec<String>> = BTreeMap::new();
    let mut unreachable = Vec::new();
    let mut max_depth = 0;

    for id in &graph.ids {
        match depth.get(id) {
            Some(&d) => {
                buckets.entry(d).or_default().push(id.clone());
                max_depth = max_depth.max(d);
            }
            None => unreachable.push(id.clone()),
        }
    }

    let unreachable_level = if unreachable.is_empty() {
        None
    } else {
        let level = if root.is_some() { max_depth + 1 } else { 0 };
        buckets.entry(level).or_default().extend(unreachable);
        Some(level)
    };

    for members in buckets.values_mut() {
        members.sort_by_cached_key(|id| (path_key(id), id.clone()));
    }

    Levels {
        depth,
        buckets,
        unreachable_level,
    }
}

// Standard BFS over forward edges
fn bfs_depths(graph: &ReducedGraph, root: &str) -> HashMap<String, usize> {
    let mut outgoing: HashMap<&str, Vec<&str>> = HashMap::new();
    for edge in &graph.edges {
        outgoing
            .entry(edge.source.as_str())
            .or_default()
            .push(edge.target.as_str());
    }

    let mut depth: HashMap<String, usize> = HashMap::new();
    let mut visited: HashSet<&str> = HashSet::new();
    let mut queue: VecDeque<(&str, usize)> = VecDeque::new();

    visited.insert(root);
    depth.insert(root.to_string(), 0);
    queue.push_back((root, 0));

    while let Some((current, d)) = queue.pop_front() {
        let Some(targets) = outgoing.get(current) else {
            continue;
        };
        for &next in targets {
            if visited.insert(next) {
                depth.insert(next.to_string(), d + 1);
                queue.push_back((next, d + 1));
            }
        }
    }

    depth
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{reduce, Graph};

    fn level_of(levels: &Levels, id: &str) -> Option<usize> {
        levels
            .buckets
            .iter()
            .find(|(_, members)| members.iter().any(|m| m == id))
            .map(|(level, _)| *level)
    }

    fn layer(ids: &[&str], edges: &[(&str, &str)], root: Option<&str>) -> Levels {
        let graph = Graph::from_parts(ids.iter().copied(), edges);
        assign_levels(&reduce(&graph, 250), root)
    }

    #[test]
    fn test_chain_depths() {
        let levels = layer(&["a", "b", "c"], &[("a", "b"), ("b", "c")], Some("a"));
        assert_eq!(levels.depth["a"], 0);
        assert_eq!(levels.depth["b"], 1);
        assert_eq!(levels.depth["c"], 2);
        assert_eq!(levels.unreachable_level, None);
        assert_eq!(levels.max_level(), 2);
    }

    #[test]
    fn test_shortest_hop_count_wins() {
        // a -> b -> c -> d, plus a shortcut a -> d
        let levels = layer(
            &["a", "b", "c", "d"],
            &[("a", "b"), ("b", "c"), ("c", "d"), ("a", "d")],
            Some("a"),
        );
        assert_eq!(levels.depth["d"], 1);
        assert_eq!(levels.buckets[&1], vec!["b", "d"]);
    }

    #[test]
    fn test_cycle_terminates_with_finite_depths() {
        let levels = layer(&["A", "B", "C"], &[("A", "B"), ("B", "C"), ("C", "A")], Some("A"));
        assert_eq!(levels.depth.len(), 3);
        assert_eq!(levels.depth["A"], 0);
        assert_eq!(levels.depth["B"], 1);
        assert_eq!(levels.depth["C"], 2);
    }

    #[test]
    fn test_self_edges_and_duplicates_are_harmless() {
        let levels = layer(&["a", "b"], &[("a", "a"), ("a", "b"), ("a", "b"), ("b", "b")], Some("a"));
        assert_eq!(levels.depth["a"], 0);
        assert_eq!(levels.depth["b"], 1);
    }

    #[test]
    fn test_edges_are_followed_forward_only() {
        let levels = layer(&["a", "b"], &[("b", "a")], Some("a"));
        assert!(!levels.depth.contains_key("b"));
        assert_eq!(levels.unreachable_level, Some(1));
        assert_eq!(levels.buckets[&1], vec!["b"]);
    }

    #[test]
    fn test_unreachable_nodes_grouped_after_deepest_level() {
        let levels = layer(
            &["https://a.com/", "https://a.com/about", "https://other.com/"],
            &[("https://a.com/", "https://a.com/about")],
            Some("https://a.com/"),
        );
        assert_eq!(levels.depth["https://a.com/about"], 1);
        assert!(!levels.depth.contains_key("https://other.com/"));
        assert_eq!(levels.unreachable_level, Some(2));
        assert_eq!(level_of(&levels, "https://other.com/"), Some(2));
    }

    #[test]
    fn test_no_root_puts_everything_in_level_zero() {
        let levels = layer(&["x", "y"], &[("x", "y")], None);
        assert!(levels.depth.is_empty());
        assert_eq!(levels.unreachable_level, Some(0));
        assert_eq!(levels.buckets.len(), 1);
        assert_eq!(levels.buckets[&0], vec!["x", "y"]);
    }

    #[test]
    fn test_root_not_in_graph_treated_as_absent() {
        let levels = layer(&["x"], &[], Some("missing"));
        assert!(levels.depth.is_empty());
        assert_eq!(levels.buckets[&0], vec!["x"]);
    }

    #[test]
    fn test_empty_graph() {
        let levels = layer(&[], &[], None);
        assert!(levels.buckets.is_empty());
        assert_eq!(levels.unreachable_level, None);
        assert_eq!(levels.max_level(), 0);
    }

    #[test]
    fn test_levels_sorted_by_path_then_id() {
        let levels = layer(
            &[
                "https://root.com/",
                "https://root.com/zeta",
                "https://b.com/alpha",
                "https://a.com/alpha",
                "plain",
            ],
            &[
                ("https://root.com/", "https://root.com/zeta"),
                ("https://root.com/", "https://b.com/alpha"),
                ("https://root.com/", "https://a.com/alpha"),
                ("https://root.com/", "plain"),
            ],
            Some("https://root.com/"),
        );
        assert_eq!(
            levels.buckets[&1],
            vec![
                "https://a.com/alpha",
                "https://b.com/alpha",
                "https://root.com/zeta",
                "plain",
            ]
        );
    }
}
