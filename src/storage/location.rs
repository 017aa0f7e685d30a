//! Data directory location detection and management

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable overriding the data directory
pub const DATA_DIR_ENV: &str = "KANBAN_TODO_DIR";

/// Directory name under the platform data directory
const APP_DIR: &str = "kanban-todo";

/// Errors related to the data location
#[derive(Debug, Error)]
pub enum LocationError {
    #[error("Failed to determine a data directory; pass --data-dir or set KANBAN_TODO_DIR")]
    NoDataDirectory,
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Where the board state is kept
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataLocation {
    /// Directory holding the persisted state
    pub data_dir: PathBuf,
}

impl DataLocation {
    /// Use an explicit directory
    pub fn at(path: impl Into<PathBuf>) -> Self {
        DataLocation {
            data_dir: path.into(),
        }
    }

    /// Resolve the data directory: explicit flag, then environment, then the platform default
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, LocationError> {
        let from_env = std::env::var_os(DATA_DIR_ENV).map(PathBuf::from);
        Self::resolve_from(explicit, from_env, dirs::data_dir())
    }

    fn resolve_from(
        explicit: Option<&Path>,
        from_env: Option<PathBuf>,
        platform: Option<PathBuf>,
    ) -> Result<Self, LocationError> {
        if let Some(path) = explicit {
            return Ok(Self::at(path));
        }

        if let Some(path) = from_env.filter(|p| !p.as_os_str().is_empty()) {
            return Ok(Self::at(path));
        }

        platform
            .map(|base| Self::at(base.join(APP_DIR)))
            .ok_or(LocationError::NoDataDirectory)
    }

    /// Create the data directory if it doesn't exist
    pub fn ensure_exists(&self) -> Result<(), LocationError> {
        if !self.data_dir.exists() {
            std::fs::create_dir_all(&self.data_dir)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_explicit_wins() {
        let loc = DataLocation::resolve_from(
            Some(Path::new("/tmp/explicit")),
            Some(PathBuf::from("/tmp/env")),
            Some(PathBuf::from("/tmp/platform")),
        )
        .unwrap();
        assert_eq!(loc.data_dir, PathBuf::from("/tmp/explicit"));
    }

    #[test]
    fn test_env_before_platform() {
        let loc = DataLocation::resolve_from(
            None,
            Some(PathBuf::from("/tmp/env")),
            Some(PathBuf::from("/tmp/platform")),
        )
        .unwrap();
        assert_eq!(loc.data_dir, PathBuf::from("/tmp/env"));
    }

    #[test]
    fn test_empty_env_ignored() {
        let loc = DataLocation::resolve_from(
            None,
            Some(PathBuf::new()),
            Some(PathBuf::from("/tmp/platform")),
        )
        .unwrap();
        assert_eq!(loc.data_dir, PathBuf::from("/tmp/platform").join(APP_DIR));
    }

    #[test]
    fn test_no_directory() {
        assert!(DataLocation::resolve_from(None, None, None).is_err());
    }

    #[test]
    fn test_ensure_exists() {
        let temp = TempDir::new().unwrap();
        let loc = DataLocation::at(temp.path().join("state"));
        assert!(!loc.data_dir.exists());

        loc.ensure_exists().unwrap();
        assert!(loc.data_dir.exists());
    }
}
