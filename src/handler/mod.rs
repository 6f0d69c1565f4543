//! Request handling module
//!
//! Entry point for HTTP request processing: method dispatch, static file
//! resolution, and access logging.

pub mod static_files;

use crate::config::AppState;
use crate::http;
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

/// Main entry point for HTTP request handling.
///
/// Infallible at the service boundary: every failure path maps to an HTTP
/// status, so one bad request can never take down the accept loop.
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let access_log = state.config.logging.access_log;
    if access_log {
        logger::log_request(&method, req.uri(), req.version());
    }

    let response = respond(&method, &path, &state).await;

    if access_log {
        let bytes = response
            .headers()
            .get(hyper::header::CONTENT_LENGTH)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse().ok())
            .unwrap_or(0);
        logger::log_access(&peer_addr, &method, &path, response.status().as_u16(), bytes);
    }

    Ok(response)
}

/// Dispatch on method: GET/HEAD serve files, OPTIONS short-circuits for
/// CORS preflight, everything else is 405.
pub(crate) async fn respond(method: &Method, path: &str, state: &AppState) -> Response<Full<Bytes>> {
    let index_files = &state.config.static_files.index_files;

    if method == Method::GET {
        static_files::serve(&state.root, path, index_files, false).await
    } else if method == Method::HEAD {
        static_files::serve(&state.root, path, index_files, true).await
    } else if method == Method::OPTIONS {
        http::build_options_response()
    } else {
        logger::log_warning(&format!("Method not allowed: {method}"));
        http::build_405_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use http_body_util::BodyExt;
    use std::fs as std_fs;
    use std::path::PathBuf;

    fn test_state(name: &str) -> AppState {
        let root = std::env::temp_dir().join(format!("folio-handler-{}-{name}", std::process::id()));
        let _ = std_fs::remove_dir_all(&root);
        std_fs::create_dir_all(&root).unwrap();
        std_fs::write(root.join("index.html"), b"<html>portfolio</html>").unwrap();
        let root: PathBuf = root.canonicalize().unwrap();
        let config = Config::load_from("no-such-config-file").unwrap();
        AppState::new(config, root)
    }

    #[tokio::test]
    async fn test_get_serves_index() {
        let state = test_state("get-index");
        let resp = respond(&Method::GET, "/", &state).await;
        assert_eq!(resp.status(), 200);
        let body = resp.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"<html>portfolio</html>");
    }

    #[tokio::test]
    async fn test_get_missing_is_404() {
        let state = test_state("get-missing");
        let resp = respond(&Method::GET, "/gone.js", &state).await;
        assert_eq!(resp.status(), 404);
        assert_eq!(resp.headers().get("Cache-Control").unwrap(), "no-cache");
    }

    #[tokio::test]
    async fn test_options_ignores_path() {
        let state = test_state("options");
        let resp = respond(&Method::OPTIONS, "/anything/at/all", &state).await;
        assert_eq!(resp.status(), 200);
        assert_eq!(
            resp.headers().get("Access-Control-Allow-Methods").unwrap(),
            "GET, POST, PUT, DELETE, OPTIONS"
        );
        let body = resp.into_body().collect().await.unwrap().to_bytes();
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn test_post_is_405() {
        let state = test_state("post");
        let resp = respond(&Method::POST, "/", &state).await;
        assert_eq!(resp.status(), 405);
        assert_eq!(
            resp.headers().get("Access-Control-Allow-Origin").unwrap(),
            "*"
        );
    }

    #[tokio::test]
    async fn test_delete_is_405() {
        let state = test_state("delete");
        let resp = respond(&Method::DELETE, "/index.html", &state).await;
        assert_eq!(resp.status(), 405);
    }
}
