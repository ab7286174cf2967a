// src/layout/coords.rs
// =============================================================================
// Coordinate assignment: levels become columns, rank within a level
// becomes the row.
//
//   x = margin_x + column_step * level
//   y = margin_y + (i + 1) * row_step
//
// A single column has no step (everything sits at margin_x), so there is
// never a division by zero. The (i + 1) keeps the first node off the top
// margin and spaces every column evenly.
// =============================================================================

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::config::LayoutConfig;
use super::levels::Levels;
use super::paths::label_for;

/// Where a node is drawn, and the text drawn next to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub label: String,
}

pub fn assign_coordinates(
    levels: &Levels,
    has_root: bool,
    config: &LayoutConfig,
) -> BTreeMap<String, Position> {
    // With a root the levels are BFS depths, so gaps still take a column.
    // Without one they are just groups.
    let column_count = if has_root {
        levels.max_level() + 1
    } else {
        levels.buckets.len()
    };
    let column_step = if column_count > 1 {
        (config.width - 2.0 * config.margin_x) / (column_count - 1) as f64
    } else {
        0.0
    };

    let mut positions = BTreeMap::new();
    for (&level, members) in &levels.buckets {
        let x = config.margin_x + column_step * level as f64;
        let rows = members.len();
        let row_step = if rows > 0 {
            (config.height - 2.0 * config.margin_y) / (rows + 1) as f64
        } else {
            0.0
        };

        for (i, id) in members.iter().enumerate() {
            let y = config.margin_y + (i + 1) as f64 * row_step;
            positions.insert(
                id.clone(),
                Position {
                    x,
                    y,
                    label: label_for(id, config.label_max, config.label_keep),
                },
            );
        }
    }

    positions
}
