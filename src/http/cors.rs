//! CORS header module
//!
//! Every response carries the same permissive header set so browser clients
//! on any origin can load images and pass preflight.

use hyper::http::response::Builder;

pub const ALLOW_ORIGIN: &str = "*";
pub const ALLOW_METHODS: &str = "GET, OPTIONS";
pub const ALLOW_HEADERS: &str = "X-Requested-With, Content-Type, Accept";

/// Attach the CORS headers to a response builder
pub fn with_cors(builder: Builder) -> Builder {
    builder
        .header("Access-Control-Allow-Origin", ALLOW_ORIGIN)
        .header("Access-Control-Allow-Methods", ALLOW_METHODS)
        .header("Access-Control-Allow-Headers", ALLOW_HEADERS)
}
