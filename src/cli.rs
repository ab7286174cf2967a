// src/cli.rs
// =============================================================================
// The command-line interface, defined with clap's derive API.
//
// Two kinds of commands live here:
// - layout / map: compute a crawl map layout (from a file, or from a
//   snapshot stored by the archive service)
// - archive / sites / snapshots / delete: drive the archive service
// =============================================================================

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::api::DEFAULT_API_BASE;
use crate::layout::DEFAULT_MAX_NODES;

#[derive(Parser, Debug)]
#[command(
    name = "crawl-map",
    version,
    about = "Lay out crawled website link graphs as layered maps",
    long_about = "crawl-map turns the link graph of a captured website into a layered map: \
                  the home page on the left, each column one more click away, and pages \
                  that cannot be reached from the home page grouped in a final column. \
                  It also submits and tracks captures on the archive service."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Lay out a graph.json file from disk
    ///
    /// Example: crawl-map layout ./graph.json --json
    Layout {
        /// Path to a graph document ({"nodes": [...], "edges": [...]})
        file: PathBuf,

        #[command(flatten)]
        output: LayoutArgs,
    },

    /// Fetch a snapshot's graph from the archive service and lay it out
    ///
    /// Example: crawl-map map example.com 20240101T000000Z
    Map {
        /// Host the snapshot belongs to
        host: String,

        /// Snapshot timestamp (e.g. 20240101T000000Z)
        ts: String,

        #[command(flatten)]
        output: LayoutArgs,

        #[command(flatten)]
        service: ServiceArgs,
    },

    /// Start a capture and follow it until it finishes
    ///
    /// Example: crawl-map archive https://example.com --depth 2
    Archive {
        /// Website URL to capture
        url: String,

        /// How many links deep to follow from the starting page
        #[arg(long, default_value_t = 1)]
        depth: u32,

        /// Stop after this many pages (server default when omitted)
        #[arg(long)]
        max_pages: Option<u32>,

        /// Return right after the job is accepted instead of polling it
        #[arg(long)]
        no_wait: bool,

        #[command(flatten)]
        service: ServiceArgs,
    },

    /// List every archived host
    Sites {
        /// Output results in JSON format instead of a table
        #[arg(long)]
        json: bool,

        /// Also fetch the snapshot listing of each host
        #[arg(long)]
        with_snapshots: bool,

        #[command(flatten)]
        service: ServiceArgs,
    },

    /// List the captures of one host, newest first
    Snapshots {
        host: String,

        /// Output results in JSON format instead of a table
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        service: ServiceArgs,
    },

    /// Delete one capture, every capture of a host, or everything
    ///
    /// Example: crawl-map delete example.com 20240101T000000Z
    Delete {
        /// Host whose captures to delete
        #[arg(required_unless_present = "all", conflicts_with = "all")]
        host: Option<String>,

        /// Only delete this capture
        #[arg(requires = "host")]
        ts: Option<String>,

        /// Delete every host and every capture
        #[arg(long)]
        all: bool,

        #[command(flatten)]
        service: ServiceArgs,
    },
}

/// Options shared by the commands that print a layout
#[derive(Args, Debug, Clone)]
pub struct LayoutArgs {
    /// Output the layout as JSON instead of a summary table
    #[arg(long)]
    pub json: bool,

    /// Nodes beyond this count are left out of the map
    #[arg(long, default_value_t = DEFAULT_MAX_NODES)]
    pub max_nodes: usize,

    /// Include a Bézier curve for every edge in the JSON output
    #[arg(long, requires = "json")]
    pub paths: bool,
}

/// Where the archive service lives
#[derive(Args, Debug, Clone)]
pub struct ServiceArgs {
    /// Base URL of the archive service
    #[arg(long, env = "CRAWL_MAP_API", default_value = DEFAULT_API_BASE)]
    pub api_base: String,
}
