//! Book display formatting
//!
//! Formats books for terminal output in table, detail and listing views.

use std::fmt::Write;

use chrono::{DateTime, Utc};

use crate::models::{Book, Money};
use crate::services::BookSummary;

const FALLBACK_DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Format the whole collection as a table with live fines
pub fn format_book_list(summaries: &[BookSummary], currency_symbol: &str) -> String {
    if summaries.is_empty() {
        return "No books in the library.".to_string();
    }

    let id_width = column_width(summaries.iter().map(|s| s.book.id.to_string()), "ID");
    let title_width = column_width(summaries.iter().map(|s| s.book.title.clone()), "Title");
    let author_width = column_width(summaries.iter().map(|s| s.book.author.clone()), "Author");
    let category_width =
        column_width(summaries.iter().map(|s| s.book.category.clone()), "Category");

    let mut output = String::new();
    output.push_str(&format!(
        "{:<id_width$}  {:<title_width$}  {:<author_width$}  {:<category_width$}  {:<9}  {}\n",
        "ID", "Title", "Author", "Category", "Status", "Fine",
    ));
    output.push_str(&format!(
        "{:-<id_width$}  {:-<title_width$}  {:-<author_width$}  {:-<category_width$}  {:-<9}  {:-<8}\n",
        "", "", "", "", "", "",
    ));

    for summary in summaries {
        let book = &summary.book;
        let fine = summary
            .fine
            .map(|f| f.format_with_symbol(currency_symbol))
            .unwrap_or_default();

        let row = format!(
            "{:<id_width$}  {:<title_width$}  {:<author_width$}  {:<category_width$}  {:<9}  {}",
            book.id,
            book.title,
            book.author,
            book.category,
            book.status_label(),
            fine,
        );
        output.push_str(row.trim_end());
        output.push('\n');
    }

    let borrowed = summaries.iter().filter(|s| s.fine.is_some()).count();
    let total_fines: Money = summaries.iter().filter_map(|s| s.fine).sum();
    output.push_str(&format!(
        "\nTotal: {} books, {} borrowed, {} in fines\n",
        summaries.len(),
        borrowed,
        total_fines.format_with_symbol(currency_symbol)
    ));

    output
}

/// Format a single book's details
pub fn format_book_details(summary: &BookSummary, currency_symbol: &str, date_format: &str) -> String {
    let book = &summary.book;
    let mut output = String::new();

    output.push_str(&format!("ID: {}\n", book.id));
    output.push_str(&format!("Title: {}\n", book.title));
    output.push_str(&format!("Author: {}\n", book.author));
    output.push_str(&format!("Category: {}\n", book.category));
    output.push_str(&format!("Status: {}\n", book.status_label()));

    if let Some(loan) = &book.loan {
        output.push_str(&format!("Borrower: {}\n", loan.borrower));
        output.push_str(&format!(
            "Borrowed: {}\n",
            format_timestamp(loan.borrowed_at, date_format)
        ));
        let fine = summary.fine.unwrap_or_default();
        output.push_str(&format!("Fine: {}\n", fine.format_with_symbol(currency_symbol)));
    }

    output
}

/// Format the books of one category, one line each
pub fn format_category_listing(books: &[Book]) -> String {
    if books.is_empty() {
        return "No books found in this category.".to_string();
    }

    books
        .iter()
        .map(|book| {
            format!(
                "ID: {}, Title: {}, Author: {}, Status: {}\n",
                book.id,
                book.title,
                book.author,
                book.status_label()
            )
        })
        .collect()
}

/// Format overdue loans with borrower contact and fine
pub fn format_overdue_list(
    summaries: &[BookSummary],
    currency_symbol: &str,
    date_format: &str,
) -> String {
    if summaries.is_empty() {
        return "No overdue books.".to_string();
    }

    let mut output = String::new();
    for summary in summaries {
        let book = &summary.book;
        let Some(loan) = &book.loan else { continue };
        output.push_str(&format!(
            "{} - {} | {} | since {} | {}\n",
            book.id,
            book.title,
            loan.borrower,
            format_timestamp(loan.borrowed_at, date_format),
            summary.fine.unwrap_or_default().format_with_symbol(currency_symbol)
        ));
    }
    output
}

/// Format a timestamp, falling back to a fixed pattern if `date_format` is not
/// valid strftime
fn format_timestamp(at: DateTime<Utc>, date_format: &str) -> String {
    let mut out = String::new();
    if write!(out, "{}", at.format(date_format)).is_err() {
        out.clear();
        let _ = write!(out, "{}", at.format(FALLBACK_DATE_FORMAT));
    }
    out
}

fn column_width(values: impl Iterator<Item = String>, header: &str) -> usize {
    values
        .map(|v| v.chars().count())
        .max()
        .unwrap_or(0)
        .max(header.len())
}
