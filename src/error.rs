//! Custom error types for the library inventory
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

use crate::models::BookId;

/// The main error type for library operations
#[derive(Error, Debug)]
pub enum LibraryError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for user input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Duplicate entity errors
    #[error("{entity_type} already exists: {identifier}")]
    Duplicate {
        entity_type: &'static str,
        identifier: String,
    },

    /// Borrow attempted on a book that is already out
    #[error("Book {0} is already borrowed")]
    AlreadyBorrowed(BookId),

    /// Return attempted on a book that is on the shelf
    #[error("Book {0} is not borrowed")]
    NotBorrowed(BookId),

    /// Malformed data file
    #[error("Malformed data file at line {line}: {message}")]
    Codec { line: usize, message: String },

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl LibraryError {
    /// Create a "not found" error for books
    pub fn book_not_found(id: BookId) -> Self {
        Self::NotFound {
            entity_type: "Book",
            identifier: id.to_string(),
        }
    }

    /// Create a "duplicate" error for books
    pub fn duplicate_book(id: BookId) -> Self {
        Self::Duplicate {
            entity_type: "Book",
            identifier: id.to_string(),
        }
    }

    /// Create a codec error for the given 1-based line
    pub fn codec(line: usize, message: impl Into<String>) -> Self {
        Self::Codec {
            line,
            message: message.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a "duplicate" error
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::Duplicate { .. })
    }
}

impl From<std::io::Error> for LibraryError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for LibraryError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for library operations
pub type LibraryResult<T> = Result<T, LibraryError>;
