// src/layout/mod.rs
// =============================================================================
// The layout engine: turns a crawl graph into coordinates on a fixed canvas.
//
// Pipeline (each stage needs the one before it):
// 1. reduce       - cap the node count, drop dangling edges (graph::reduce)
// 2. select_root  - pick the page the map hangs from (root.rs)
// 3. assign_levels - breadth-first depth per node (levels.rs)
// 4. assign_coordinates - levels to columns, rank to rows (coords.rs)
//
// compute_layout is a pure function: no I/O, no state kept between calls,
// and the input graph is only borrowed. It never fails; odd input gives a
// degenerate but valid layout (no root, no edges, one column).
// =============================================================================

mod config;
mod coords;
mod levels;
mod paths;
mod root;

pub use config::{LayoutConfig, DEFAULT_MAX_NODES};
pub use coords::{assign_coordinates, Position};
pub use levels::{assign_levels, Levels};
pub use root::select_root;

use anyhow::Result;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::graph::{reduce, Edge, Graph};

/// A rendering-ready layout.
///
/// Serializes as `{W, H, positions, edges, root?, truncated}`. Positions
/// are keyed in sorted order so the JSON is reproducible.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    #[serde(rename = "W")]
    pub width: f64,
    #[serde(rename = "H")]
    pub height: f64,
    pub positions: BTreeMap<String, Position>,
    pub edges: Vec<Edge>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root: Option<String>,
    /// Input node entries dropped by the node cap
    pub truncated: usize,
    #[serde(skip)]
    levels: Levels,
}

/// Node count of one column, for reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelSummary {
    pub level: usize,
    pub nodes: usize,
    pub unreachable: bool,
}

// The JSON document with the optional curve for every edge added
#[derive(Serialize)]
struct LayoutWithPaths<'a> {
    #[serde(flatten)]
    layout: &'a Layout,
    paths: Vec<String>,
}

pub fn compute_layout(graph: &Graph, config: &LayoutConfig) -> Layout {
    let reduced = reduce(graph, config.max_nodes);
    let root = select_root(&reduced.ids);
    let levels = assign_levels(&reduced, root.as_deref());
    let positions = assign_coordinates(&levels, root.is_some(), config);

    let edges = reduced
        .edges
        .into_iter()
        .filter(|e| positions.contains_key(&e.source) && positions.contains_key(&e.target))
        .collect();

    Layout {
        width: config.width,
        height: config.height,
        positions,
        edges,
        root,
        truncated: reduced.truncated,
        levels,
    }
}

impl Layout {
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn levels(&self) -> &Levels {
        &self.levels
    }

    // A cubic Bézier from source to target, both control points on the
    // horizontal midpoint. Returns None if either end was not placed.
    //
    // Example: "M 120 300 C 310 300, 310 170, 500 170"
    pub fn edge_path(&self, edge: &Edge) -> Option<String> {
        let a = self.positions.get(&edge.source)?;
        let b = self.positions.get(&edge.target)?;
        let mid_x = (a.x + b.x) / 2.0;
        Some(format!(
            "M {} {} C {} {}, {} {}, {} {}",
            a.x, a.y, mid_x, a.y, mid_x, b.y, b.x, b.y
        ))
    }

    pub fn summary(&self) -> Vec<LevelSummary> {
        self.levels
            .buckets
            .iter()
            .map(|(&level, members)| LevelSummary {
                level,
                nodes: members.len(),
                unreachable: self.levels.unreachable_level == Some(level),
            })
            .collect()
    }

    // Serializes to pretty JSON, optionally with one curve per edge
    pub fn to_json(&self, with_paths: bool) -> Result<String> {
        let text = if with_paths {
            let paths = self.edges.iter().filter_map(|e| self.edge_path(e)).collect();
            serde_json::to_string_pretty(&LayoutWithPaths { layout: self, paths })?
        } else {
            serde_json::to_string_pretty(self)?
        };
        Ok(text)
    }
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why BTreeMap for positions and levels?
//    - HashMap iteration order changes from run to run
//    - BTreeMap iterates in key order, so the output is identical every time
//
// 2. Why is there no error type here?
//    - Every input that deserializes is a valid graph
//    - Missing nodes, cycles and non-URL ids all have a defined fallback
// -----------------------------------------------------------------------------
