// src/graph/model.rs
// =============================================================================
// The crawl graph document.
//
// The archive service writes one graph.json per snapshot:
//
//   {
//     "nodes": [{ "id": "https://example.com/" }, ...],
//     "edges": [{ "source": "https://example.com/", "target": "..." }, ...]
//   }
//
// Identifiers are opaque strings. In practice they are URLs, but nothing
// here depends on that; the layout engine parses them only to derive
// sort keys and labels.
// =============================================================================

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A discovered page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
}

/// A discovered hyperlink from `source` to `target`.
///
/// Duplicate edges and self-edges are legal and kept as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub source: String,
    pub target: String,
}

impl Edge {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Edge {
            source: source.into(),
            target: target.into(),
        }
    }
}

/// The raw graph as the caller supplies it.
///
/// Node ids are not guaranteed unique and edges may reference ids that are
/// not in `nodes`; `reduce` deals with both.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Graph {
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub edges: Vec<Edge>,
}

impl Graph {
    // Builds a graph from bare identifiers and (source, target) pairs.
    // Mostly handy in tests and when assembling graphs by hand.
    pub fn from_parts<I, S>(ids: I, edges: &[(&str, &str)]) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Graph {
            nodes: ids.into_iter().map(|id| Node { id: id.into() }).collect(),
            edges: edges.iter().map(|(s, t)| Edge::new(*s, *t)).collect(),
        }
    }

    // Parses a graph.json document
    pub fn from_json(text: &str) -> Result<Graph> {
        serde_json::from_str(text).context("Malformed graph document")
    }

    // Reads and parses a graph.json file from disk
    pub fn from_file(path: &Path) -> Result<Graph> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Could not read {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("In {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_graph_document() {
        let text = r#"{
            "nodes": [{"id": "https://a.com/"}, {"id": "https://a.com/about"}],
            "edges": [{"source": "https://a.com/", "target": "https://a.com/about"}]
        }"#;
        let graph = Graph::from_json(text).unwrap();
        assert_eq!(graph.nodes.len(), 2);
        assert_eq!(graph.edges[0], Edge::new("https://a.com/", "https://a.com/about"));
    }

    #[test]
    fn test_missing_keys_default_to_empty() {
        let graph = Graph::from_json("{}").unwrap();
        assert!(graph.nodes.is_empty());
        assert!(graph.edges.is_empty());

        let graph = Graph::from_json(r#"{"nodes": [{"id": "x"}]}"#).unwrap();
        assert_eq!(graph.nodes.len(), 1);
        assert!(graph.edges.is_empty());
    }

    #[test]
    fn test_malformed_document_is_an_error() {
        assert!(Graph::from_json("[1, 2, 3]").is_err());
        assert!(Graph::from_json(r#"{"nodes": [{"name": "x"}]}"#).is_err());
        assert!(Graph::from_json("not json").is_err());
    }

    #[test]
    fn test_from_file_reports_missing_path() {
        let err = Graph::from_file(Path::new("/definitely/not/here/graph.json")).unwrap_err();
        assert!(err.to_string().contains("Could not read"));
    }
}
