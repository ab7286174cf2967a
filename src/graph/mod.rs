// src/graph/mod.rs
// =============================================================================
// This module holds the crawl graph as it arrives from the archive service:
// pages (nodes) and the hyperlinks between them (edges).
//
// Submodules:
// - model: Node, Edge and Graph types plus JSON loading
// - reduce: caps the node count and drops edges whose endpoints were cut
//
// The layout engine only ever sees a ReducedGraph, so every edge it walks
// is guaranteed to point at a node that exists.
// =============================================================================

mod model;
mod reduce;

pub use model::{Edge, Graph};
pub use reduce::{reduce, ReducedGraph};
