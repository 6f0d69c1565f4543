//! Fixed response header set module
//!
//! Every response leaving this server carries the same permissive CORS
//! headers (the served pages call external APIs such as GitHub from the
//! browser) plus `Cache-Control: no-cache` so edits to the portfolio show
//! up on reload.

use hyper::http::response::Builder;

const ALLOW_ORIGIN: &str = "*";
const ALLOW_METHODS: &str = "GET, POST, PUT, DELETE, OPTIONS";
const ALLOW_HEADERS: &str = "Content-Type, Authorization";
const CACHE_CONTROL: &str = "no-cache";

/// Append the fixed header set to a response under construction.
///
/// Applied by every response builder, success and error alike.
pub fn with_standard_headers(builder: Builder) -> Builder {
    builder
        .header("Access-Control-Allow-Origin", ALLOW_ORIGIN)
        .header("Access-Control-Allow-Methods", ALLOW_METHODS)
        .header("Access-Control-Allow-Headers", ALLOW_HEADERS)
        .header("Cache-Control", CACHE_CONTROL)
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::Full;
    use hyper::body::Bytes;
    use hyper::Response;

    #[test]
    fn test_standard_headers_present() {
        let resp = with_standard_headers(Response::builder().status(200))
            .body(Full::new(Bytes::new()))
            .unwrap();

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
    fn test_preserves_existing_headers() {
        let resp = with_standard_headers(
            Response::builder()
                .status(404)
                .header("Content-Type", "text/plain"),
        )
        .body(Full::new(Bytes::new()))
        .unwrap();

        assert_eq!(resp.status(), 404);
        assert_eq!(resp.headers().get("Content-Type").unwrap(), "text/plain");
        assert_eq!(resp.headers().get("Cache-Control").unwrap(), "no-cache");
    }
}
