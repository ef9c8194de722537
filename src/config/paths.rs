//! Path management for the library inventory
//!
//! ## Path Resolution Order
//!
//! 1. `LIBRARY_CLI_DATA_DIR` environment variable (if set)
//! 2. The platform config directory joined with `library-cli`
//!    (`$XDG_CONFIG_HOME` or `~/.config` on Linux, `%APPDATA%` on Windows,
//!    `~/Library/Application Support` on macOS)

use std::path::PathBuf;

use directories::BaseDirs;

use crate::error::LibraryError;

/// Environment variable that overrides the base directory
pub const DATA_DIR_ENV: &str = "LIBRARY_CLI_DATA_DIR";

const APP_DIR_NAME: &str = "library-cli";

/// Manages all paths used by the application
#[derive(Debug, Clone)]
pub struct LibraryPaths {
    /// Base directory for all application data
    base_dir: PathBuf,
}

impl LibraryPaths {
    /// Resolve the base directory from the environment
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, LibraryError> {
        let base_dir = match std::env::var(DATA_DIR_ENV) {
            Ok(custom) if !custom.trim().is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create LibraryPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (<base>/data/)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the book inventory file
    pub fn books_file(&self) -> PathBuf {
        self.data_dir().join("library_books.dat")
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), LibraryError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| LibraryError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| LibraryError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }
}

fn resolve_default_path() -> Result<PathBuf, LibraryError> {
    let dirs = BaseDirs::new()
        .ok_or_else(|| LibraryError::Config("Could not determine home directory".into()))?;
    Ok(dirs.config_dir().join(APP_DIR_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LibraryPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.data_dir(), temp_dir.path().join("data"));
    }

    #[test]
    fn test_env_var_override() {
        let temp_dir = TempDir::new().unwrap();
        let custom_path = temp_dir.path().to_str().unwrap();

        env::set_var(DATA_DIR_ENV, custom_path);
        let paths = LibraryPaths::new().unwrap();
        env::remove_var(DATA_DIR_ENV);

        assert_eq!(paths.base_dir(), temp_dir.path());
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LibraryPaths::with_base_dir(temp_dir.path().join("nested"));

        paths.ensure_directories().unwrap();

        assert!(paths.base_dir().exists());
        assert!(paths.data_dir().exists());
    }

    #[test]
    fn test_file_paths() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LibraryPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.settings_file(), temp_dir.path().join("config.json"));
        assert_eq!(
            paths.books_file(),
            temp_dir.path().join("data").join("library_books.dat")
        );
    }
}
