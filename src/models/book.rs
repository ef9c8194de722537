//! Book model
//!
//! A book on the shelf or out on loan. A borrowed book carries its `Loan`
//! (borrower plus timestamp); an available book carries none, so the two
//! states cannot be mixed.

use chrono::{DateTime, Utc};
use std::fmt;

use super::ids::BookId;

/// Placeholder used for a blank title or author
pub const UNKNOWN_PLACEHOLDER: &str = "Unknown";

/// Placeholder used for a blank category
pub const DEFAULT_CATEGORY: &str = "General";

/// The person holding a borrowed book
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Borrower {
    /// Borrower's name
    pub name: String,
    /// Contact info (email or phone)
    pub contact: String,
}

impl Borrower {
    /// Create a borrower, trimming surrounding whitespace
    pub fn new(name: impl Into<String>, contact: impl Into<String>) -> Self {
        Self {
            name: name.into().trim().to_string(),
            contact: contact.into().trim().to_string(),
        }
    }
}

impl fmt::Display for Borrower {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.contact)
    }
}

/// An active loan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Loan {
    pub borrower: Borrower,
    /// When the book went out, truncated to whole seconds
    pub borrowed_at: DateTime<Utc>,
}

impl Loan {
    /// Start a loan at the given instant
    pub fn new(borrower: Borrower, borrowed_at: DateTime<Utc>) -> Self {
        let borrowed_at =
            DateTime::from_timestamp(borrowed_at.timestamp(), 0).unwrap_or(borrowed_at);
        Self {
            borrower,
            borrowed_at,
        }
    }
}

/// A book in the collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    /// Unique identifier
    pub id: BookId,
    pub title: String,
    pub author: String,
    /// Free-text category label, matched case-sensitively
    pub category: String,
    /// Present while the book is borrowed
    pub loan: Option<Loan>,
}

impl Book {
    /// Create an available book, filling placeholders for blank fields
    pub fn new(
        id: BookId,
        title: impl Into<String>,
        author: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id,
            title: or_placeholder(title.into(), UNKNOWN_PLACEHOLDER),
            author: or_placeholder(author.into(), UNKNOWN_PLACEHOLDER),
            category: or_placeholder(category.into(), DEFAULT_CATEGORY),
            loan: None,
        }
    }

    /// Check whether the book is on the shelf
    pub fn is_available(&self) -> bool {
        self.loan.is_none()
    }

    /// Current borrower, if any
    pub fn borrower(&self) -> Option<&Borrower> {
        self.loan.as_ref().map(|loan| &loan.borrower)
    }

    /// Human-readable status
    pub fn status_label(&self) -> &'static str {
        if self.is_available() {
            "Available"
        } else {
            "Borrowed"
        }
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {} by {}", self.id, self.title, self.author)
    }
}

fn or_placeholder(value: String, placeholder: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        placeholder.to_string()
    } else {
        trimmed.to_string()
    }
}
