//! Core data models for the library inventory
//!
//! This module contains the data structures that represent the lending
//! domain: books, borrowers, loans, fines and the policy that prices them.

pub mod book;
pub mod ids;
pub mod money;
pub mod policy;

pub use book::{Book, Borrower, Loan, DEFAULT_CATEGORY, UNKNOWN_PLACEHOLDER};
pub use ids::BookId;
pub use money::Money;
pub use policy::LendingPolicy;
