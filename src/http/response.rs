//! HTTP response building module
//!
//! Provides builders for the status codes this server emits. All builders
//! route through [`cors::with_standard_headers`] so the fixed header set is
//! present on every response, success and error alike.

use crate::http::cors;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

/// Build 200 OK response for a static file
pub fn build_file_response(
    content: Vec<u8>,
    content_type: &'static str,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let content_length = content.len();
    let body = if is_head {
        Bytes::new()
    } else {
        Bytes::from(content)
    };

    cors::with_standard_headers(Response::builder().status(200))
        .header("Content-Type", content_type)
        .header("Content-Length", content_length)
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error("200", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build OPTIONS response (CORS preflight short-circuit)
///
/// Always 200 with an empty body, no path validation.
pub fn build_options_response() -> Response<Full<Bytes>> {
    cors::with_standard_headers(Response::builder().status(200))
        .header("Content-Length", 0)
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error("OPTIONS", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 404 Not Found response
pub fn build_404_response() -> Response<Full<Bytes>> {
    let body = "404 Not Found";
    cors::with_standard_headers(Response::builder().status(404))
        .header("Content-Type", "text/plain")
        .header("Content-Length", body.len())
        .body(Full::new(Bytes::from(body)))
        .unwrap_or_else(|e| {
            log_build_error("404", &e);
            Response::new(Full::new(Bytes::from(body)))
        })
}

/// Build 405 Method Not Allowed response
pub fn build_405_response() -> Response<Full<Bytes>> {
    let body = "405 Method Not Allowed";
    cors::with_standard_headers(Response::builder().status(405))
        .header("Content-Type", "text/plain")
        .header("Allow", "GET, HEAD, OPTIONS")
        .header("Content-Length", body.len())
        .body(Full::new(Bytes::from(body)))
        .unwrap_or_else(|e| {
            log_build_error("405", &e);
            Response::new(Full::new(Bytes::from(body)))
        })
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_standard_headers<B>(resp: &Response<B>) {
        let headers = resp.headers();
        assert_eq!(headers.get("Access-Control-Allow-Origin").unwrap(), "*");
        assert_eq!(
            headers.get("Access-Control-Allow-Methods").unwrap(),
            "GET, POST, PUT, DELETE, OPTIONS"
        );
        assert_eq!(
            headers.get("Access-Control-Allow-Headers").unwrap(),
            "Content-Type, Authorization"
        );
        assert_eq!(headers.get("Cache-Control").unwrap(), "no-cache");
    }

    #[test]
    fn test_file_response() {
        let resp = build_file_response(b"<html></html>".to_vec(), "text/html; charset=utf-8", false);
        assert_eq!(resp.status(), 200);
        assert_eq!(
            resp.headers().get("Content-Type").unwrap(),
            "text/html; charset=utf-8"
        );
        assert_eq!(resp.headers().get("Content-Length").unwrap(), "13");
        assert_standard_headers(&resp);
    }

    #[test]
    fn test_head_response_keeps_content_length() {
        let resp = build_file_response(b"body bytes".to_vec(), "text/plain; charset=utf-8", true);
        assert_eq!(resp.status(), 200);
        // HEAD drops the body but advertises the real length
        assert_eq!(resp.headers().get("Content-Length").unwrap(), "10");
        assert_standard_headers(&resp);
    }

    #[test]
    fn test_options_response() {
        let resp = build_options_response();
        assert_eq!(resp.status(), 200);
        assert_eq!(resp.headers().get("Content-Length").unwrap(), "0");
        assert_standard_headers(&resp);
    }

    #[test]
    fn test_404_response() {
        let resp = build_404_response();
        assert_eq!(resp.status(), 404);
        assert_standard_headers(&resp);
    }

    #[test]
    fn test_405_response() {
        let resp = build_405_response();
        assert_eq!(resp.status(), 405);
        assert_eq!(resp.headers().get("Allow").unwrap(), "GET, HEAD, OPTIONS");
        assert_standard_headers(&resp);
    }
}
