//! Book repository
//!
//! Holds the collection in insertion order with an id index, and syncs it
//! with the data file as a whole.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::LibraryError;
use crate::models::{Book, BookId};

use super::book_file::{decode_books, encode_books};
use super::cipher::Cipher;
use super::file_io::{read_optional, write_atomic};

/// Ordered collection keyed by unique id
#[derive(Debug, Default)]
struct BookData {
    books: Vec<Book>,
    /// Index: id -> position in `books`
    by_id: HashMap<BookId, usize>,
}

impl BookData {
    fn from_books(books: Vec<Book>) -> Result<Self, LibraryError> {
        let mut data = Self::default();
        for book in books {
            data.push(book)?;
        }
        Ok(data)
    }

    fn push(&mut self, book: Book) -> Result<(), LibraryError> {
        if self.by_id.contains_key(&book.id) {
            return Err(LibraryError::duplicate_book(book.id));
        }
        self.by_id.insert(book.id, self.books.len());
        self.books.push(book);
        Ok(())
    }
}

/// Repository for book persistence
pub struct BookRepository {
    path: PathBuf,
    cipher: Cipher,
    data: RwLock<BookData>,
}

impl BookRepository {
    /// Create a new book repository
    pub fn new(path: PathBuf, cipher: Cipher) -> Self {
        Self {
            path,
            cipher,
            data: RwLock::new(BookData::default()),
        }
    }

    /// Load books from disk; a missing file is an empty collection
    pub fn load(&self) -> Result<(), LibraryError> {
        let books = match read_optional(&self.path)? {
            Some(bytes) => decode_books(&bytes, self.cipher)?,
            None => Vec::new(),
        };

        let loaded = BookData::from_books(books)?;
        tracing::debug!(count = loaded.books.len(), path = %self.path.display(), "loaded books");

        *self.write()? = loaded;
        Ok(())
    }

    /// Save the whole collection to disk, replacing the file
    pub fn save(&self) -> Result<(), LibraryError> {
        let data = self.read()?;
        let bytes = encode_books(&data.books, self.cipher);
        write_atomic(&self.path, &bytes)?;
        tracing::debug!(count = data.books.len(), path = %self.path.display(), "saved books");
        Ok(())
    }

    /// Get a book by ID
    pub fn get(&self, id: BookId) -> Result<Option<Book>, LibraryError> {
        let data = self.read()?;
        Ok(data.by_id.get(&id).map(|&idx| data.books[idx].clone()))
    }

    /// Check whether an id is taken
    pub fn contains(&self, id: BookId) -> Result<bool, LibraryError> {
        Ok(self.read()?.by_id.contains_key(&id))
    }

    /// Get all books in collection order
    pub fn get_all(&self) -> Result<Vec<Book>, LibraryError> {
        Ok(self.read()?.books.clone())
    }

    /// Get books whose category matches exactly, in collection order
    pub fn get_by_category(&self, category: &str) -> Result<Vec<Book>, LibraryError> {
        let data = self.read()?;
        Ok(data
            .books
            .iter()
            .filter(|b| b.category == category)
            .cloned()
            .collect())
    }

    /// Append a new book; fails if the id is taken
    pub fn insert(&self, book: Book) -> Result<(), LibraryError> {
        self.write()?.push(book)
    }

    /// Replace an existing book in place
    pub fn update(&self, book: Book) -> Result<(), LibraryError> {
        let mut data = self.write()?;
        let idx = *data
            .by_id
            .get(&book.id)
            .ok_or_else(|| LibraryError::book_not_found(book.id))?;
        data.books[idx] = book;
        Ok(())
    }

    /// Count books
    pub fn count(&self) -> Result<usize, LibraryError> {
        Ok(self.read()?.books.len())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, BookData>, LibraryError> {
        self.data
            .read()
            .map_err(|e| LibraryError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, BookData>, LibraryError> {
        self.data
            .write()
            .map_err(|e| LibraryError::Storage(format!("Failed to acquire write lock: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Borrower, Loan};
    use chrono::Utc;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, BookRepository) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("library_books.dat");
        let repo = BookRepository::new(path, Cipher::Xor { key: b'X' });
        (temp_dir, repo)
    }

    #[test]
    fn test_empty_load() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_insert_and_get() {
        let (_temp_dir, repo) = create_test_repo();
        repo.insert(Book::new(BookId::new(1), "Dune", "Herbert", "Fiction"))
            .unwrap();

        let book = repo.get(BookId::new(1)).unwrap().unwrap();
        assert_eq!(book.title, "Dune");
        assert!(repo.contains(BookId::new(1)).unwrap());
        assert!(repo.get(BookId::new(2)).unwrap().is_none());
    }

    #[test]
    fn test_duplicate_insert_leaves_collection_unchanged() {
        let (_temp_dir, repo) = create_test_repo();
        repo.insert(Book::new(BookId::new(1), "Dune", "Herbert", "Fiction"))
            .unwrap();

        let err = repo
            .insert(Book::new(BookId::new(1), "Emma", "Austen", "Classic"))
            .unwrap_err();
        assert!(err.is_duplicate());
        assert_eq!(repo.count().unwrap(), 1);
        assert_eq!(repo.get(BookId::new(1)).unwrap().unwrap().title, "Dune");
    }

    #[test]
    fn test_order_is_preserved() {
        let (_temp_dir, repo) = create_test_repo();
        for id in [30, 10, 20] {
            repo.insert(Book::new(BookId::new(id), "T", "A", "C")).unwrap();
        }
        let ids: Vec<i64> = repo.get_all().unwrap().iter().map(|b| b.id.value()).collect();
        assert_eq!(ids, vec![30, 10, 20]);
    }

    #[test]
    fn test_get_by_category_is_exact() {
        let (_temp_dir, repo) = create_test_repo();
        repo.insert(Book::new(BookId::new(1), "Dune", "Herbert", "Fiction")).unwrap();
        repo.insert(Book::new(BookId::new(2), "Cosmos", "Sagan", "Science")).unwrap();
        repo.insert(Book::new(BookId::new(3), "Emma", "Austen", "fiction")).unwrap();
        repo.insert(Book::new(BookId::new(4), "Ubik", "Dick", "Fiction")).unwrap();

        let ids: Vec<i64> = repo
            .get_by_category("Fiction")
            .unwrap()
            .iter()
            .map(|b| b.id.value())
            .collect();
        assert_eq!(ids, vec![1, 4]);
    }

    #[test]
    fn test_update_unknown_fails() {
        let (_temp_dir, repo) = create_test_repo();
        let err = repo
            .update(Book::new(BookId::new(9), "T", "A", "C"))
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_save_and_reload() {
        let (temp_dir, repo) = create_test_repo();
        let mut book = Book::new(BookId::new(5), "Rebecca", "du Maurier", "Gothic");
        book.loan = Some(Loan::new(Borrower::new("Alice", "a@x.com"), Utc::now()));
        repo.insert(book.clone()).unwrap();
        repo.insert(Book::new(BookId::new(6), "Ulysses", "Joyce", "Modernist"))
            .unwrap();
        repo.save().unwrap();

        let repo2 = BookRepository::new(
            temp_dir.path().join("library_books.dat"),
            Cipher::Xor { key: b'X' },
        );
        repo2.load().unwrap();

        assert_eq!(repo2.count().unwrap(), 2);
        assert_eq!(repo2.get(BookId::new(5)).unwrap().unwrap(), book);
    }

    #[test]
    fn test_saved_file_is_obfuscated() {
        let (temp_dir, repo) = create_test_repo();
        repo.insert(Book::new(BookId::new(1), "Dune", "Herbert", "Fiction"))
            .unwrap();
        repo.save().unwrap();

        let raw = std::fs::read(temp_dir.path().join("library_books.dat")).unwrap();
        let text = String::from_utf8_lossy(&raw);
        assert!(!text.contains("Dune"));
        assert!(!text.contains("Herbert"));
    }
}
