//! HTTP protocol layer module
//!
//! Response builders, CORS headers and image type detection, decoupled from
//! request routing.

pub mod cors;
pub mod mime;
pub mod response;

// Re-export commonly used types
pub use response::{
    build_error_response, build_not_implemented_response, build_options_response,
    build_png_response, ResponseBody,
};
