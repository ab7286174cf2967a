// src/layout/root.rs
// =============================================================================
// Root selection: picks the node the breadth-first levels hang from.
//
// Crawl graphs carry no explicit root marker, so we guess:
// 1. A URL whose path is exactly "/" (the site's home page), first found
// 2. Otherwise the URL with the shortest path, first occurrence on ties
// 3. If no identifier is a URL at all, the first node in input order
// 4. An empty node list has no root
//
// The shortest-path guess can misfire on arbitrary graphs. That is an
// accepted approximation. Ties depend on input order, so callers that
// reorder nodes between calls may see a different root.
// =============================================================================

use super::paths::{path_key, url_path};

pub fn select_root(ids: &[String]) -> Option<String> {
    let with_urls: Vec<(&String, String)> = ids
        .iter()
        .filter_map(|id| url_path(id).map(|path| (id, path)))
        .collect();

    if with_urls.is_empty() {
        return ids.first().cloned();
    }

    if let Some((home, _)) = with_urls.iter().find(|(_, path)| path == "/") {
        return Some((*home).clone());
    }

    // min_by_key returns the first of several equal minimums
    with_urls
        .iter()
        .min_by_key(|(id, _)| path_key(id).len())
        .map(|(id, _)| (*id).clone())
}
