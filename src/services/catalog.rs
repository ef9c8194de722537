//! Catalog service
//!
//! Adding books and looking them up.

use crate::error::{LibraryError, LibraryResult};
use crate::models::{Book, BookId};
use crate::storage::Storage;

use super::{persist, Applied};

/// Service for catalog management
pub struct CatalogService<'a> {
    storage: &'a Storage,
}

impl<'a> CatalogService<'a> {
    /// Create a new catalog service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Add a new available book
    ///
    /// Blank text fields are replaced by placeholders. A taken id is rejected
    /// and leaves the collection untouched.
    pub fn add_book(
        &self,
        id: BookId,
        title: &str,
        author: &str,
        category: &str,
    ) -> LibraryResult<Applied<Book>> {
        if self.storage.books.contains(id)? {
            return Err(LibraryError::duplicate_book(id));
        }

        let book = Book::new(id, title, author, category);
        self.storage.books.insert(book.clone())?;
        tracing::info!(book_id = %book.id, title = %book.title, "book added");

        Ok(persist(self.storage, book))
    }

    /// Check whether an id is already in use
    pub fn id_exists(&self, id: BookId) -> LibraryResult<bool> {
        self.storage.books.contains(id)
    }

    /// Find a book by ID
    pub fn find_by_id(&self, id: BookId) -> LibraryResult<Option<Book>> {
        self.storage.books.get(id)
    }

    /// Get a book by ID, failing if it doesn't exist
    pub fn get(&self, id: BookId) -> LibraryResult<Book> {
        self.find_by_id(id)?
            .ok_or_else(|| LibraryError::book_not_found(id))
    }

    /// All books in collection order
    pub fn list(&self) -> LibraryResult<Vec<Book>> {
        self.storage.books.get_all()
    }

    /// Books whose category matches exactly (case-sensitive), in collection order
    pub fn filter_by_category(&self, category: &str) -> LibraryResult<Vec<Book>> {
        self.storage.books.get_by_category(category)
    }
}
