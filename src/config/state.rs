// Application state module
// Read-only state shared by every request

use std::io;
use std::path::{Path, PathBuf};

use super::types::Config;

/// Application state
pub struct AppState {
    pub config: Config,
    /// Canonical base directory, every served file must live under it
    pub root: PathBuf,
}

impl AppState {
    /// Create `AppState`, resolving the configured root directory
    ///
    /// Fails if the root does not exist or is not a directory.
    pub fn new(config: Config) -> io::Result<Self> {
        let root = Path::new(&config.server.root_dir).canonicalize()?;
        if !root.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Root is not a directory: {}", root.display()),
            ));
        }

        Ok(Self { config, root })
    }

    pub const fn access_log(&self) -> bool {
        self.config.logging.access_log
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_is_canonicalized() {
        let mut config = Config::default();
        config.server.root_dir = std::env::temp_dir().join(".").display().to_string();

        let state = AppState::new(config).unwrap();
        assert_eq!(state.root, std::env::temp_dir().canonicalize().unwrap());
    }

    #[test]
    fn test_missing_root_is_an_error() {
        let mut config = Config::default();
        config.server.root_dir = "/nonexistent/pngserve-root".to_string();
        assert!(AppState::new(config).is_err());
    }
}
