//! HTTP response building module
//!
//! Builders for every response the server sends. All of them carry the CORS
//! headers from [`super::cors`].

use super::cors::with_cors;
use super::mime::IMAGE_PNG;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{header, Method, Response, StatusCode};

/// Body type for every response
pub type ResponseBody = Full<Bytes>;

/// Methods the server answers
pub const ALLOW: &str = "GET, HEAD, OPTIONS";

/// Build 200 response carrying PNG bytes
///
/// `content_length` is given separately so HEAD can report the file size with
/// an empty body.
pub fn build_png_response(body: Bytes, content_length: u64) -> Response<ResponseBody> {
    with_cors(Response::builder())
        .status(StatusCode::OK)
        .header("Content-Type", IMAGE_PNG)
        .header("Content-Length", content_length)
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error("200", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build OPTIONS response (preflight request)
pub fn build_options_response() -> Response<ResponseBody> {
    with_cors(Response::builder())
        .status(StatusCode::OK)
        .header("Content-Length", 0)
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error("OPTIONS", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build plain-text error response
pub fn build_error_response(status: StatusCode, message: &str) -> Response<ResponseBody> {
    let body = Bytes::from(message.to_owned());
    with_cors(Response::builder())
        .status(status)
        .header("Content-Type", "text/plain; charset=utf-8")
        .header("Content-Length", body.len())
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error(status.as_str(), &e);
            let mut resp = Response::new(Full::new(Bytes::from(message.to_owned())));
            *resp.status_mut() = status;
            resp
        })
}

/// Build 501 response for methods the server does not handle
pub fn build_not_implemented_response(method: &Method) -> Response<ResponseBody> {
    let mut resp = build_error_response(
        StatusCode::NOT_IMPLEMENTED,
        &format!("Unsupported method ('{method}')"),
    );
    resp.headers_mut()
        .insert(header::ALLOW, header::HeaderValue::from_static(ALLOW));
    resp
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}
