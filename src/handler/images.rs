//! PNG image serving module
//!
//! Resolves request paths under the root directory, reads the image and maps
//! failures to HTTP statuses.

use crate::handler::router::RequestContext;
use crate::http::{self, mime, ResponseBody};
use crate::logger;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use std::fmt;
use std::io;
use std::path::{Component, Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncReadExt;

/// Why an image request could not be served
#[derive(Debug)]
pub enum ImageError {
    /// Path does not end in `.png`
    NotPng,
    /// Path tries to leave the root directory
    Traversal(String),
    /// No regular file at the resolved path
    NotFound(PathBuf),
    /// Any other filesystem failure
    Io { path: PathBuf, source: io::Error },
}

impl ImageError {
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::NotPng | Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Traversal(_) => StatusCode::FORBIDDEN,
            Self::Io { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Body sent to the client; never includes filesystem paths
    pub const fn public_message(&self) -> &'static str {
        match self {
            Self::NotPng | Self::NotFound(_) => "File not found",
            Self::Traversal(_) => "Forbidden",
            Self::Io { .. } => "Internal Server Error",
        }
    }

    fn from_io(path: &Path, source: io::Error) -> Self {
        match source.kind() {
            io::ErrorKind::NotFound | io::ErrorKind::NotADirectory => {
                Self::NotFound(path.to_path_buf())
            }
            _ => Self::Io {
                path: path.to_path_buf(),
                source,
            },
        }
    }
}

impl fmt::Display for ImageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotPng => write!(f, "not a .png path"),
            Self::Traversal(path) => write!(f, "path escapes root directory: {path}"),
            Self::NotFound(path) => write!(f, "no such image: {}", path.display()),
            Self::Io { path, source } => write!(f, "failed to read '{}': {source}", path.display()),
        }
    }
}

impl std::error::Error for ImageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// An image ready to be sent
#[derive(Debug)]
pub struct Image {
    /// Canonical path on disk
    pub path: PathBuf,
    /// File contents, empty when only metadata was requested
    pub data: Bytes,
    /// File size in bytes
    pub size: u64,
}

/// Serve a PNG image for GET or HEAD
pub async fn serve_image(ctx: &RequestContext<'_>, root: &Path) -> Response<ResponseBody> {
    match load_image(root, ctx.path, ctx.is_head).await {
        Ok(image) => http::build_png_response(image.data, image.size),
        Err(err) => {
            match &err {
                ImageError::Traversal(_) => logger::log_warning(&format!("Blocked request: {err}")),
                ImageError::Io { .. } => logger::log_error(&err.to_string()),
                // Missing files are routine, no need to log them
                ImageError::NotPng | ImageError::NotFound(_) => {}
            }
            http::build_error_response(err.status(), err.public_message())
        }
    }
}

/// Map a request path to a candidate file under `root`
///
/// Purely lexical: rejects non-PNG paths and any `..`, absolute or prefix
/// component before the filesystem is touched.
pub fn resolve_path(root: &Path, request_path: &str) -> Result<PathBuf, ImageError> {
    if !mime::is_png_path(request_path) {
        return Err(ImageError::NotPng);
    }

    let relative = request_path.strip_prefix('/').unwrap_or(request_path);
    let mut resolved = root.to_path_buf();
    for component in Path::new(relative).components() {
        match component {
            Component::Normal(part) => resolved.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(ImageError::Traversal(request_path.to_string()));
            }
        }
    }

    Ok(resolved)
}

/// Locate and read an image; with `metadata_only` the contents are skipped
pub async fn load_image(
    root: &Path,
    request_path: &str,
    metadata_only: bool,
) -> Result<Image, ImageError> {
    let candidate = resolve_path(root, request_path)?;

    // Symlinks may still point outside the root
    let path = fs::canonicalize(&candidate)
        .await
        .map_err(|e| ImageError::from_io(&candidate, e))?;
    if !path.starts_with(root) {
        return Err(ImageError::Traversal(request_path.to_string()));
    }

    let metadata = fs::metadata(&path)
        .await
        .map_err(|e| ImageError::from_io(&path, e))?;
    if !metadata.is_file() {
        return Err(ImageError::NotFound(path));
    }

    if metadata_only {
        return Ok(Image {
            path,
            data: Bytes::new(),
            size: metadata.len(),
        });
    }

    let data = read_file(&path, metadata.len())
        .await
        .map_err(|e| ImageError::from_io(&path, e))?;
    let size = data.len() as u64;

    Ok(Image {
        path,
        data: Bytes::from(data),
        size,
    })
}

/// Read the whole file; the handle is closed when this returns
async fn read_file(path: &Path, size_hint: u64) -> io::Result<Vec<u8>> {
    let mut file = fs::File::open(path).await?;
    let mut data = Vec::with_capacity(usize::try_from(size_hint).unwrap_or(0));
    file.read_to_end(&mut data).await?;
    Ok(data)
}
