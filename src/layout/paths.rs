// src/layout/paths.rs
// =============================================================================
// Helpers that look inside node identifiers.
//
// Identifiers are usually absolute URLs, and the layout uses their path
// component three ways: to find the home page, to sort nodes within a
// level, and as the on-screen label. Anything that does not parse as an
// absolute URL falls back to the raw identifier. None of these helpers
// can fail.
// =============================================================================

use url::Url;

// Returns the path component if `id` is a well-formed absolute URL
//
// Example:
//   "https://a.com/docs/intro" -> Some("/docs/intro")
//   "not a url"                -> None
pub fn url_path(id: &str) -> Option<String> {
    Url::parse(id).ok().map(|url| url.path().to_string())
}

// The key nodes are sorted by: the URL path when there is one,
// otherwise the identifier itself. An empty path counts as "/".
pub fn path_key(id: &str) -> String {
    match url_path(id) {
        Some(path) if path.is_empty() => "/".to_string(),
        Some(path) => path,
        None => id.to_string(),
    }
}

// Builds the text drawn next to a node
//
// Keys longer than `max_chars` characters are cut to `keep_chars`
// characters followed by an ellipsis. Counting is per character, so a
// multi-byte sequence is never split.
pub fn label_for(id: &str, max_chars: usize, keep_chars: usize) -> String {
    let key = path_key(id);
    if key.chars().count() > max_chars {
        let mut label: String = key.chars().take(keep_chars).collect();
        label.push('…');
        label
    } else {
        key
    }
}
