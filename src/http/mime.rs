//! Image type detection module

/// Content-Type sent with every served image
pub const IMAGE_PNG: &str = "image/png";

/// Whether a request path names a PNG image
///
/// This is a literal, case-sensitive suffix check on the URI path; the query
/// string must already be stripped.
///
/// # Examples
/// ```
/// use pngserve::http::mime::is_png_path;
/// assert!(is_png_path("/images/cat.png"));
/// assert!(!is_png_path("/readme.txt"));
/// ```
pub fn is_png_path(path: &str) -> bool {
    path.ends_with(".png")
}
