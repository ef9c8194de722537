//! Lending service
//!
//! Borrow and return transactions plus live fine computation. The `*_at`
//! variants take the current time explicitly; the plain variants use the
//! wall clock.

use chrono::{DateTime, Utc};

use crate::error::{LibraryError, LibraryResult};
use crate::models::{Book, BookId, Borrower, LendingPolicy, Loan, Money};
use crate::storage::Storage;

use super::{persist, Applied};

/// A book together with its fine as of some instant
#[derive(Debug, Clone)]
pub struct BookSummary {
    pub book: Book,
    /// Present only for borrowed books
    pub fine: Option<Money>,
}

/// Outcome of a successful return
#[derive(Debug, Clone)]
pub struct ReturnReceipt {
    /// The book as it is now (available)
    pub book: Book,
    /// Who had it
    pub borrower: Borrower,
    pub borrowed_at: DateTime<Utc>,
    pub days_elapsed: f64,
    pub fine: Money,
}

/// Service for borrow/return transactions
pub struct LendingService<'a> {
    storage: &'a Storage,
    policy: LendingPolicy,
}

impl<'a> LendingService<'a> {
    /// Create a new lending service
    pub fn new(storage: &'a Storage, policy: LendingPolicy) -> Self {
        Self { storage, policy }
    }

    /// The policy fines are computed with
    pub fn policy(&self) -> &LendingPolicy {
        &self.policy
    }

    /// Lend a book out now
    pub fn borrow(&self, id: BookId, name: &str, contact: &str) -> LibraryResult<Applied<Book>> {
        self.borrow_at(id, name, contact, Utc::now())
    }

    /// Lend a book out at the given instant
    pub fn borrow_at(
        &self,
        id: BookId,
        name: &str,
        contact: &str,
        now: DateTime<Utc>,
    ) -> LibraryResult<Applied<Book>> {
        let mut book = self
            .storage
            .books
            .get(id)?
            .ok_or_else(|| LibraryError::book_not_found(id))?;

        if !book.is_available() {
            return Err(LibraryError::AlreadyBorrowed(id));
        }

        book.loan = Some(Loan::new(Borrower::new(name, contact), now));
        self.storage.books.update(book.clone())?;
        tracing::info!(book_id = %id, borrower = %name.trim(), "book borrowed");

        Ok(persist(self.storage, book))
    }

    /// Take a book back now
    pub fn return_book(&self, id: BookId) -> LibraryResult<Applied<ReturnReceipt>> {
        self.return_book_at(id, Utc::now())
    }

    /// Take a book back at the given instant, reporting the fine owed
    ///
    /// The receipt is returned even when the data file cannot be written, so
    /// the fine is always known to the caller.
    pub fn return_book_at(
        &self,
        id: BookId,
        now: DateTime<Utc>,
    ) -> LibraryResult<Applied<ReturnReceipt>> {
        let mut book = self
            .storage
            .books
            .get(id)?
            .ok_or_else(|| LibraryError::book_not_found(id))?;

        let loan = book.loan.take().ok_or(LibraryError::NotBorrowed(id))?;
        let fine = self.policy.fine_at(loan.borrowed_at, now);
        let days_elapsed = LendingPolicy::days_elapsed(loan.borrowed_at, now);

        self.storage.books.update(book.clone())?;
        tracing::info!(book_id = %id, fine_cents = fine.cents(), "book returned");

        let receipt = ReturnReceipt {
            book,
            borrower: loan.borrower,
            borrowed_at: loan.borrowed_at,
            days_elapsed,
            fine,
        };
        Ok(persist(self.storage, receipt))
    }

    /// Summarize a single book
    pub fn summary_at(&self, book: Book, now: DateTime<Utc>) -> BookSummary {
        let fine = book
            .loan
            .as_ref()
            .map(|loan| self.policy.fine_at(loan.borrowed_at, now));
        BookSummary { book, fine }
    }

    /// All books in collection order with live fines
    pub fn summaries_at(&self, now: DateTime<Utc>) -> LibraryResult<Vec<BookSummary>> {
        Ok(self
            .storage
            .books
            .get_all()?
            .into_iter()
            .map(|book| self.summary_at(book, now))
            .collect())
    }

    /// All books with live fines as of now
    pub fn summaries(&self) -> LibraryResult<Vec<BookSummary>> {
        self.summaries_at(Utc::now())
    }

    /// Borrowed books that have started accruing a fine
    pub fn overdue_at(&self, now: DateTime<Utc>) -> LibraryResult<Vec<BookSummary>> {
        Ok(self
            .summaries_at(now)?
            .into_iter()
            .filter(|s| s.fine.is_some_and(|fine| fine.is_positive()))
            .collect())
    }
}
