// src/layout/config.rs
// =============================================================================
// Layout settings.
//
// The canvas is a fixed logical size; the renderer scales it. Only the
// node cap is meant to be tuned from the command line.
// =============================================================================

use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_NODES: usize = 250;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Logical canvas width
    pub width: f64,
    /// Logical canvas height
    pub height: f64,
    /// Space left and right of the outermost columns
    pub margin_x: f64,
    /// Space above and below each column
    pub margin_y: f64,
    /// Nodes past this count are dropped before layout
    pub max_nodes: usize,
    /// Labels longer than this many characters get cut
    pub label_max: usize,
    /// Characters kept before the ellipsis when a label is cut
    pub label_keep: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        LayoutConfig {
            width: 1000.0,
            height: 600.0,
            margin_x: 120.0,
            margin_y: 40.0,
            max_nodes: DEFAULT_MAX_NODES,
            label_max: 40,
            label_keep: 37,
        }
    }
}

impl LayoutConfig {
    pub fn with_max_nodes(mut self, max_nodes: usize) -> Self {
        self.max_nodes = max_nodes;
        self
    }
}
