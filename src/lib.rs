//! pngserve: a small development HTTP server for PNG images
//!
//! Serves `.png` files from a root directory over HTTP/1.1 with permissive
//! CORS headers, and answers CORS preflight requests.

pub mod config;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;

pub use crate::config::Config;
pub use crate::server::ImageServer;
