//! Request Header Helpers

use axum::http::HeaderMap;

/// Extract a non-empty header value as a string
///
/// Values that are not visible ASCII are treated as absent.
pub fn extract_header(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
