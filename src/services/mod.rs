//! Service layer for the library inventory
//!
//! The service layer provides business logic on top of the storage layer,
//! handling validation, state transitions and computed fines.
//!
//! Mutations are applied in memory first and then saved. A failed save does
//! not undo the change; it travels back to the caller on [`Applied`] so the
//! result of the operation is never lost.

pub mod catalog;
pub mod lending;

pub use catalog::CatalogService;
pub use lending::{BookSummary, LendingService, ReturnReceipt};

use crate::error::LibraryError;
use crate::storage::Storage;

/// Outcome of a mutation that took effect in memory
#[derive(Debug)]
pub struct Applied<T> {
    pub value: T,
    /// Set when the change could not be written to the data file
    pub save_error: Option<LibraryError>,
}

impl<T> Applied<T> {
    /// Whether the change reached the data file
    pub fn is_saved(&self) -> bool {
        self.save_error.is_none()
    }
}

/// Save the collection after a mutation, keeping the change on failure
fn persist<T>(storage: &Storage, value: T) -> Applied<T> {
    let save_error = storage.save_all().err();
    if let Some(e) = &save_error {
        tracing::warn!(error = %e, "change kept in memory but not saved");
    }
    Applied { value, save_error }
}
