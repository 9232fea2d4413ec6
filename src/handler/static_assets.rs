//! Static asset stage
//!
//! Serves files from the configured asset root when the request path maps to
//! one, with `ETag` revalidation. Misses fall through to the route table
//! instead of answering 404 here.

use std::path::{Path, PathBuf};

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use percent_encoding::percent_decode_str;
use tokio::fs;

use crate::error::RequestError;
use crate::http::{cache, mime, response};
use crate::logger;

/// Try to serve `request_path` from the asset root.
///
/// `Ok(None)` means the path does not map to a regular file under the root
/// and the pipeline should keep going.
pub async fn serve(
    root: &str,
    request_path: &str,
    if_none_match: Option<&str>,
) -> Result<Option<Response<Full<Bytes>>>, RequestError> {
    let Some(file_path) = resolve(root, request_path) else {
        return Ok(None);
    };

    match fs::metadata(&file_path).await {
        Ok(meta) if meta.is_file() => {}
        _ => return Ok(None),
    }

    // The file exists, so a read failure now is a server-side problem,
    // not a miss.
    let content = fs::read(&file_path).await.map_err(|e| {
        RequestError::Internal(format!(
            "failed to read asset '{}': {e}",
            file_path.display()
        ))
    })?;

    let etag = cache::generate_etag(&content);
    if cache::check_etag_match(if_none_match, &etag) {
        return Ok(Some(response::not_modified_response(&etag)));
    }

    let content_type = mime::get_content_type(file_path.extension().and_then(|e| e.to_str()));
    Ok(Some(response::asset_response(content, content_type, &etag)))
}

/// Map a request path to a file under the asset root, or refuse.
fn resolve(root: &str, request_path: &str) -> Option<PathBuf> {
    let decoded = percent_decode_str(request_path).decode_utf8().ok()?;

    // Reject traversal before touching the filesystem.
    if decoded.contains("..") || decoded.contains('\0') {
        logger::log_warning(&format!("Path traversal attempt blocked: {request_path}"));
        return None;
    }

    let relative = decoded.trim_start_matches('/');
    if relative.is_empty() {
        return None;
    }

    // Missing root means assets are simply not configured; stay quiet.
    let root_canonical = Path::new(root).canonicalize().ok()?;
    let candidate = root_canonical.join(relative).canonicalize().ok()?;

    // canonicalize resolves symlinks, so containment holds through links too
    if candidate.starts_with(&root_canonical) {
        Some(candidate)
    } else {
        logger::log_warning(&format!(
            "Path traversal attempt blocked: {request_path} -> {}",
            candidate.display()
        ));
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hyper::StatusCode;

    #[test]
    fn resolve_maps_into_root() {
        let path = resolve("public", "/styles.css").unwrap();
        assert!(path.ends_with("styles.css"));
    }

    #[test]
    fn resolve_rejects_traversal() {
        assert!(resolve("public", "/../Cargo.toml").is_none());
        assert!(resolve("public", "/%2e%2e/Cargo.toml").is_none());
        assert!(resolve("public", "/sub/../../Cargo.toml").is_none());
    }

    #[test]
    fn resolve_rejects_bare_root() {
        assert!(resolve("public", "/").is_none());
        assert!(resolve("public", "").is_none());
    }

    #[tokio::test]
    async fn missing_file_falls_through() {
        let served = serve("public", "/no-such-asset.css", None).await.unwrap();
        assert!(served.is_none());
    }

    #[tokio::test]
    async fn existing_asset_is_served_with_validators() {
        let response = serve("public", "/styles.css", None)
            .await
            .unwrap()
            .expect("styles.css ships with the repository");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["content-type"], "text/css");
        assert!(response.headers().contains_key("etag"));
    }

    #[tokio::test]
    async fn matching_etag_revalidates_to_304() {
        let first = serve("public", "/styles.css", None)
            .await
            .unwrap()
            .expect("styles.css ships with the repository");
        let etag = first.headers()["etag"].to_str().unwrap().to_string();

        let second = serve("public", "/styles.css", Some(&etag))
            .await
            .unwrap()
            .expect("etag replay still resolves the file");
        assert_eq!(second.status(), StatusCode::NOT_MODIFIED);
    }
}
