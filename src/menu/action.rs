//! Menu choices

use std::fmt;

/// One entry of the numbered menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    AddBook,
    ViewBooks,
    SearchBook,
    BorrowBook,
    ReturnBook,
    FilterByCategory,
    Exit,
}

/// Why a menu choice was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChoiceError {
    NotANumber,
    OutOfRange,
}

impl MenuAction {
    /// All actions in menu order
    pub const ALL: [MenuAction; 7] = [
        Self::AddBook,
        Self::ViewBooks,
        Self::SearchBook,
        Self::BorrowBook,
        Self::ReturnBook,
        Self::FilterByCategory,
        Self::Exit,
    ];

    /// Parse the operator's numeric choice
    pub fn parse(input: &str) -> Result<Self, ChoiceError> {
        let choice: usize = input.trim().parse().map_err(|_| ChoiceError::NotANumber)?;
        choice
            .checked_sub(1)
            .and_then(|idx| Self::ALL.get(idx).copied())
            .ok_or(ChoiceError::OutOfRange)
    }

    /// 1-based menu number
    pub fn number(&self) -> usize {
        Self::ALL
            .iter()
            .position(|a| a == self)
            .map(|idx| idx + 1)
            .unwrap_or_default()
    }
}

impl fmt::Display for MenuAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::AddBook => "Add New Book",
            Self::ViewBooks => "View All Books",
            Self::SearchBook => "Search Book by ID",
            Self::BorrowBook => "Borrow Book",
            Self::ReturnBook => "Return Book",
            Self::FilterByCategory => "Filter Books by Category",
            Self::Exit => "Exit",
        };
        write!(f, "{}", label)
    }
}
