//! File I/O utilities with atomic writes
//!
//! Provides safe file operations that won't corrupt data on failure.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::error::LibraryError;

/// Read JSON from a file, returning a default value if file doesn't exist
pub fn read_json<T, P>(path: P) -> Result<T, LibraryError>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if !path.exists() {
        return Ok(T::default());
    }

    let file = File::open(path)
        .map_err(|e| LibraryError::Storage(format!("Failed to open {}: {}", path.display(), e)))?;

    let reader = BufReader::new(file);
    serde_json::from_reader(reader)
        .map_err(|e| LibraryError::Storage(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Read a whole file, returning `None` if it doesn't exist
pub fn read_optional<P: AsRef<Path>>(path: P) -> Result<Option<Vec<u8>>, LibraryError> {
    let path = path.as_ref();

    match fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(LibraryError::Storage(format!(
            "Failed to read {}: {}",
            path.display(),
            e
        ))),
    }
}

/// Write bytes to a file atomically (write to temp, then rename)
///
/// The file is either completely written or not modified at all.
pub fn write_atomic<P: AsRef<Path>>(path: P, contents: &[u8]) -> Result<(), LibraryError> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            LibraryError::Storage(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    // Temp file must live in the same directory for the rename to be atomic
    let mut temp_name = path.as_os_str().to_owned();
    temp_name.push(".tmp");
    let temp_path = std::path::PathBuf::from(temp_name);

    let file = File::create(&temp_path)
        .map_err(|e| LibraryError::Storage(format!("Failed to create temp file: {}", e)))?;

    let mut writer = BufWriter::new(file);
    writer
        .write_all(contents)
        .map_err(|e| LibraryError::Storage(format!("Failed to write data: {}", e)))?;

    writer
        .flush()
        .map_err(|e| LibraryError::Storage(format!("Failed to flush data: {}", e)))?;

    writer
        .get_ref()
        .sync_all()
        .map_err(|e| LibraryError::Storage(format!("Failed to sync data: {}", e)))?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        LibraryError::Storage(format!("Failed to rename temp file: {}", e))
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Deserialize, Default)]
    struct TestData {
        name: String,
        value: i32,
    }

    #[test]
    fn test_read_nonexistent_returns_default() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nonexistent.json");

        let data: TestData = read_json(&path).unwrap();
        assert_eq!(data, TestData::default());
    }

    #[test]
    fn test_read_json_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("test.json");
        std::fs::write(&path, r#"{"name": "test", "value": 42}"#).unwrap();

        let loaded: TestData = read_json(&path).unwrap();
        assert_eq!(
            loaded,
            TestData {
                name: "test".to_string(),
                value: 42,
            }
        );
    }

    #[test]
    fn test_read_json_invalid_is_storage_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bad.json");
        std::fs::write(&path, "{").unwrap();

        let result: Result<TestData, _> = read_json(&path);
        assert!(matches!(result, Err(LibraryError::Storage(_))));
    }

    #[test]
    fn test_read_optional_missing() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing.dat");
        assert!(read_optional(&path).unwrap().is_none());
    }

    #[test]
    fn test_atomic_write_no_temp_file_left() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("books.dat");

        write_atomic(&path, b"first").unwrap();
        write_atomic(&path, b"second").unwrap();

        assert_eq!(read_optional(&path).unwrap().unwrap(), b"second");
        assert!(!temp_dir.path().join("books.dat.tmp").exists());
    }

    #[test]
    fn test_write_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("dir").join("books.dat");

        write_atomic(&path, b"data").unwrap();
        assert!(path.exists());
    }
}
