//! Strongly-typed book identifier
//!
//! Book ids are operator-chosen integers, so the wrapper is a plain `i64`
//! rather than a generated id.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Unique identifier of a book in the collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookId(i64);

impl BookId {
    /// Wrap a raw id
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Get the raw id
    pub const fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for BookId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim().parse()?))
    }
}
