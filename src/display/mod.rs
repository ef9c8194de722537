//! Display formatting for terminal output
//!
//! Pure string formatting; nothing in here touches the terminal.

pub mod book;

pub use book::{format_book_details, format_book_list, format_category_listing, format_overdue_list};
