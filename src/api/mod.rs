// src/api/mod.rs
// =============================================================================
// Client for the archive service that captures websites and stores their
// crawl graphs.
//
// Submodules:
// - types: JSON payloads (job status, site and snapshot listings)
// - client: the HTTP calls, plus polling a capture job until it finishes
//
// The layout engine never talks to the network; this module fetches the
// graph document and hands it over.
// =============================================================================

mod client;
mod types;

pub use client::{ArchiveClient, DEFAULT_API_BASE, POLL_INTERVAL};
pub use types::{JobState, SiteSummary, SnapshotInfo};
