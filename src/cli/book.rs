//! Book CLI commands
//!
//! Non-interactive catalog commands for scripting.

use chrono::Utc;
use clap::Subcommand;

use crate::config::Settings;
use crate::display::{format_book_details, format_book_list, format_category_listing};
use crate::error::LibraryResult;
use crate::models::BookId;
use crate::services::{CatalogService, LendingService};
use crate::storage::Storage;

/// Book subcommands
#[derive(Subcommand)]
pub enum BookCommands {
    /// Add a new book
    Add {
        /// Unique numeric ID
        #[arg(allow_hyphen_values = true)]
        id: i64,
        /// Title (defaults to "Unknown")
        #[arg(short, long, default_value = "")]
        title: String,
        /// Author (defaults to "Unknown")
        #[arg(short, long, default_value = "")]
        author: String,
        /// Category (defaults to "General")
        #[arg(short, long, default_value = "")]
        category: String,
    },
    /// List all books with live fines
    List,
    /// Show a book's details
    Show {
        /// Book ID
        #[arg(allow_hyphen_values = true)]
        id: i64,
    },
    /// List books in a category (exact, case-sensitive match)
    Filter {
        /// Category label
        category: String,
    },
}

/// Handle a book command
pub fn handle_book_command(
    storage: &Storage,
    settings: &Settings,
    cmd: BookCommands,
) -> LibraryResult<()> {
    let catalog = CatalogService::new(storage);
    let lending = LendingService::new(storage, settings.lending);

    match cmd {
        BookCommands::Add {
            id,
            title,
            author,
            category,
        } => {
            let added = catalog.add_book(BookId::new(id), &title, &author, &category)?;
            println!("Added book: {} [{}]", added.value, added.value.category);
            if let Some(e) = added.save_error {
                return Err(e);
            }
        }

        BookCommands::List => {
            let summaries = lending.summaries()?;
            print!("{}", format_book_list(&summaries, &settings.currency_symbol));
            if summaries.is_empty() {
                println!();
            }
        }

        BookCommands::Show { id } => {
            let book = catalog.get(BookId::new(id))?;
            let summary = lending.summary_at(book, Utc::now());
            print!(
                "{}",
                format_book_details(&summary, &settings.currency_symbol, &settings.date_format)
            );
        }

        BookCommands::Filter { category } => {
            let books = catalog.filter_by_category(&category)?;
            println!("Books in Category '{}':", category);
            let listing = format_category_listing(&books);
            println!("{}", listing.trim_end());
        }
    }

    Ok(())
}
