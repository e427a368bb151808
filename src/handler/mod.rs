//! Request handler module
//!
//! Method dispatch and PNG image serving.

pub mod images;
pub mod router;

// Re-export main entry point
pub use images::ImageError;
pub use router::handle_request;
