//! HTTP cache validation module
//!
//! `ETag` generation and `If-None-Match` handling for the asset stage.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Generate an `ETag` from response content using fast hashing.
///
/// Returns the quoted form, e.g. `"1a2b3c"`.
pub fn generate_etag(content: &[u8]) -> String {
    let mut hasher = DefaultHasher::new();
    content.hash(&mut hasher);
    format!("\"{:x}\"", hasher.finish())
}

/// Check whether a client's `If-None-Match` header revalidates `etag`.
///
/// Handles single tags, comma-separated lists, and the `*` wildcard.
pub fn check_etag_match(if_none_match: Option<&str>, etag: &str) -> bool {
    if_none_match.is_some_and(|header| {
        header
            .split(',')
            .any(|candidate| candidate.trim() == etag || candidate.trim() == "*")
    })
}
