//! Static file serving module
//!
//! Handles path resolution against the static root, directory index
//! fallback, traversal defense, and file loading.

use crate::http::{self, mime};
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Serve a request path from the static root
pub async fn serve(
    root: &Path,
    path: &str,
    index_files: &[String],
    is_head: bool,
) -> Response<Full<Bytes>> {
    match load(root, path, index_files).await {
        Some((content, content_type)) => http::build_file_response(content, content_type, is_head),
        None => http::build_404_response(),
    }
}

/// Decode %XX escapes in a request path.
///
/// Returns `None` for truncated escapes, non-hex digits, or decoded bytes
/// that are not valid UTF-8; callers map that to 404.
fn percent_decode(path: &str) -> Option<String> {
    let bytes = path.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = bytes.get(i + 1..i + 3)?;
            if !hex.iter().all(u8::is_ascii_hexdigit) {
                return None;
            }
            let hex = std::str::from_utf8(hex).ok()?;
            decoded.push(u8::from_str_radix(hex, 16).ok()?);
            i += 3;
        } else {
            decoded.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8(decoded).ok()
}

/// Resolve a request path to a regular file under the root.
///
/// The path is percent-decoded first (URLs escape spaces and non-ASCII
/// names, the filesystem does not). Directories (and the empty or
/// trailing-slash path) fall back to the configured index files. The
/// resolved path is canonicalized and checked for containment in the root;
/// anything escaping resolves to `None` (404).
pub(crate) fn resolve(root: &Path, path: &str, index_files: &[String]) -> Option<PathBuf> {
    let Some(decoded) = percent_decode(path) else {
        logger::log_warning(&format!("Undecodable request path: {path}"));
        return None;
    };

    // Remove leading slash and strip traversal sequences up front
    let clean_path = decoded.trim_start_matches('/').replace("..", "");

    let mut file_path = root.join(&clean_path);

    if file_path.is_dir() || clean_path.is_empty() || clean_path.ends_with('/') {
        for index_file in index_files {
            let index_path = file_path.join(index_file);
            if index_path.is_file() {
                file_path = index_path;
                break;
            }
        }
    }

    let root_canonical = match root.canonicalize() {
        Ok(p) => p,
        Err(e) => {
            logger::log_warning(&format!(
                "Static root not found or inaccessible '{}': {e}",
                root.display()
            ));
            return None;
        }
    };

    // Missing files land here (404), no need to log
    let file_path_canonical = file_path.canonicalize().ok()?;
    if !file_path_canonical.starts_with(&root_canonical) {
        logger::log_warning(&format!(
            "Path traversal attempt blocked: {} -> {}",
            path,
            file_path_canonical.display()
        ));
        return None;
    }

    file_path_canonical.is_file().then_some(file_path_canonical)
}

/// Load file bytes and infer the Content-Type from the extension
async fn load(root: &Path, path: &str, index_files: &[String]) -> Option<(Vec<u8>, &'static str)> {
    let file_path = resolve(root, path, index_files)?;

    let content = match fs::read(&file_path).await {
        Ok(c) => c,
        Err(e) => {
            logger::log_error(&format!(
                "Failed to read file '{}': {}",
                file_path.display(),
                e
            ));
            return None;
        }
    };

    let content_type = mime::get_content_type(file_path.extension().and_then(|e| e.to_str()));

    Some((content, content_type))
}
