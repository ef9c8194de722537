//! Storage layer for the library inventory
//!
//! Provides the obfuscated line-record data file, atomic writes, and the
//! in-memory book repository.

pub mod book_file;
pub mod books;
pub mod cipher;
pub mod file_io;

pub use books::BookRepository;
pub use cipher::Cipher;
pub use file_io::read_json;

use crate::config::paths::LibraryPaths;
use crate::error::LibraryError;

/// Main storage coordinator
pub struct Storage {
    paths: LibraryPaths,
    pub books: BookRepository,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: LibraryPaths, cipher: Cipher) -> Result<Self, LibraryError> {
        paths.ensure_directories()?;

        Ok(Self {
            books: BookRepository::new(paths.books_file(), cipher),
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &LibraryPaths {
        &self.paths
    }

    /// Load all data from disk
    pub fn load_all(&mut self) -> Result<(), LibraryError> {
        self.books.load()
    }

    /// Save all data to disk
    pub fn save_all(&self) -> Result<(), LibraryError> {
        self.books.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_storage_creation() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LibraryPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths, Cipher::default()).unwrap();

        assert!(temp_dir.path().join("data").exists());
        storage.load_all().unwrap();
        assert_eq!(storage.books.count().unwrap(), 0);
    }

    #[test]
    fn test_save_all_writes_data_file() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LibraryPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths, Cipher::default()).unwrap();

        storage.save_all().unwrap();
        assert!(storage.paths().books_file().exists());
    }
}
