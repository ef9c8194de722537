//! Interactive numbered menu
//!
//! Reads the operator's choices through a `Console` and calls into the
//! services. Every failure is reported and control returns to the menu;
//! only console I/O errors end the loop early.

pub mod action;
pub mod console;

pub use action::{ChoiceError, MenuAction};
pub use console::{Console, TerminalConsole, Tone};

use crate::config::Settings;
use crate::display::{format_book_details, format_book_list, format_category_listing};
use crate::error::{LibraryError, LibraryResult};
use crate::models::BookId;
use crate::services::{Applied, CatalogService, LendingService};
use crate::storage::Storage;

/// Whether the loop should keep going after an action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Continue,
    EndOfInput,
}

/// The interactive menu
pub struct Menu<'a> {
    storage: &'a Storage,
    settings: &'a Settings,
    catalog: CatalogService<'a>,
    lending: LendingService<'a>,
}

impl<'a> Menu<'a> {
    pub fn new(storage: &'a Storage, settings: &'a Settings) -> Self {
        Self {
            storage,
            settings,
            catalog: CatalogService::new(storage),
            lending: LendingService::new(storage, settings.lending),
        }
    }

    /// Run until Exit is chosen or input ends; saves on the way out
    pub fn run<C: Console>(&self, console: &mut C) -> LibraryResult<()> {
        loop {
            self.show_menu(console)?;

            let Some(input) = console.read_line("Enter your choice: ")? else {
                return self.exit(console);
            };

            let step = match MenuAction::parse(&input) {
                Ok(MenuAction::Exit) => return self.exit(console),
                Ok(action) => self.dispatch(action, console)?,
                Err(ChoiceError::NotANumber) => {
                    console.error("Invalid input. Please enter a number.")?;
                    Step::Continue
                }
                Err(ChoiceError::OutOfRange) => {
                    console.error("Invalid choice. Try again.")?;
                    Step::Continue
                }
            };

            if step == Step::EndOfInput {
                return self.exit(console);
            }
        }
    }

    fn show_menu<C: Console>(&self, console: &mut C) -> LibraryResult<()> {
        console.plain("")?;
        console.heading("Library Menu:")?;
        for action in MenuAction::ALL {
            console.plain(&format!("{}. {}", action.number(), action))?;
        }
        Ok(())
    }

    fn dispatch<C: Console>(&self, action: MenuAction, console: &mut C) -> LibraryResult<Step> {
        match action {
            MenuAction::AddBook => self.add_book(console),
            MenuAction::ViewBooks => self.view_books(console),
            MenuAction::SearchBook => self.search_book(console),
            MenuAction::BorrowBook => self.borrow_book(console),
            MenuAction::ReturnBook => self.return_book(console),
            MenuAction::FilterByCategory => self.filter_by_category(console),
            MenuAction::Exit => Ok(Step::EndOfInput),
        }
    }

    fn add_book<C: Console>(&self, console: &mut C) -> LibraryResult<Step> {
        console.success("Adding new book...")?;

        let mut prompt = "Enter ID (unique): ";
        let id = loop {
            let Some(input) = console.read_line(prompt)? else {
                return Ok(Step::EndOfInput);
            };
            prompt = "Invalid or duplicate ID. Try again: ";

            let Ok(id) = input.parse::<BookId>() else {
                continue;
            };
            match self.catalog.id_exists(id) {
                Ok(false) => break id,
                Ok(true) => continue,
                Err(e) => {
                    self.report(console, &e)?;
                    return Ok(Step::Continue);
                }
            }
        };

        let Some(title) = console.read_line("Enter Title: ")? else {
            return Ok(Step::EndOfInput);
        };
        let Some(author) = console.read_line("Enter Author: ")? else {
            return Ok(Step::EndOfInput);
        };
        let Some(category) = console.read_line("Enter Category (e.g., Fiction, Science): ")? else {
            return Ok(Step::EndOfInput);
        };

        match self.catalog.add_book(id, &title, &author, &category) {
            Ok(added) => {
                console.success("Book added successfully!")?;
                self.report_unsaved(console, &added)?;
            }
            Err(e) => self.report(console, &e)?,
        }
        Ok(Step::Continue)
    }

    fn view_books<C: Console>(&self, console: &mut C) -> LibraryResult<Step> {
        let summaries = match self.lending.summaries() {
            Ok(summaries) => summaries,
            Err(e) => {
                self.report(console, &e)?;
                return Ok(Step::Continue);
            }
        };

        if summaries.is_empty() {
            console.error("No books in the library.")?;
            return Ok(Step::Continue);
        }

        console.heading("\nLibrary Contents:")?;
        let table = format_book_list(&summaries, &self.settings.currency_symbol);
        console.plain(table.trim_end())?;
        Ok(Step::Continue)
    }

    fn search_book<C: Console>(&self, console: &mut C) -> LibraryResult<Step> {
        let id = match self.read_id(console, "Enter ID to search: ")? {
            Some(Some(id)) => id,
            Some(None) => return Ok(Step::Continue),
            None => return Ok(Step::EndOfInput),
        };

        match self.catalog.get(id) {
            Ok(book) => {
                let summary = self.lending.summary_at(book, chrono::Utc::now());
                console.heading("\nBook Found:")?;
                let details = format_book_details(
                    &summary,
                    &self.settings.currency_symbol,
                    &self.settings.date_format,
                );
                console.plain(details.trim_end())?;
            }
            Err(e) => self.report(console, &e)?,
        }
        Ok(Step::Continue)
    }

    fn borrow_book<C: Console>(&self, console: &mut C) -> LibraryResult<Step> {
        let id = match self.read_id(console, "Enter ID to borrow: ")? {
            Some(Some(id)) => id,
            Some(None) => return Ok(Step::Continue),
            None => return Ok(Step::EndOfInput),
        };

        // Check state before asking for borrower details
        match self.catalog.get(id) {
            Ok(book) if !book.is_available() => {
                self.report(console, &LibraryError::AlreadyBorrowed(id))?;
                return Ok(Step::Continue);
            }
            Ok(_) => {}
            Err(e) => {
                self.report(console, &e)?;
                return Ok(Step::Continue);
            }
        }

        let Some(name) = console.read_line("Enter Borrower Name: ")? else {
            return Ok(Step::EndOfInput);
        };
        let Some(contact) = console.read_line("Enter Borrower Contact: ")? else {
            return Ok(Step::EndOfInput);
        };

        match self.lending.borrow(id, &name, &contact) {
            Ok(borrowed) => {
                console.success("Book borrowed successfully!")?;
                self.report_unsaved(console, &borrowed)?;
            }
            Err(e) => self.report(console, &e)?,
        }
        Ok(Step::Continue)
    }

    fn return_book<C: Console>(&self, console: &mut C) -> LibraryResult<Step> {
        let id = match self.read_id(console, "Enter ID to return: ")? {
            Some(Some(id)) => id,
            Some(None) => return Ok(Step::Continue),
            None => return Ok(Step::EndOfInput),
        };

        match self.lending.return_book(id) {
            Ok(returned) => {
                console.success("Book returned successfully!")?;
                let fine = returned.value.fine;
                if fine.is_positive() {
                    console.heading(&format!(
                        "Fine due: {}",
                        fine.format_with_symbol(&self.settings.currency_symbol)
                    ))?;
                }
                self.report_unsaved(console, &returned)?;
            }
            Err(e) => self.report(console, &e)?,
        }
        Ok(Step::Continue)
    }

    fn filter_by_category<C: Console>(&self, console: &mut C) -> LibraryResult<Step> {
        let Some(input) = console.read_line("Enter Category to filter (e.g., Fiction, Science): ")?
        else {
            return Ok(Step::EndOfInput);
        };
        let category = input.trim();

        match self.catalog.filter_by_category(category) {
            Ok(books) => {
                console.heading(&format!("\nBooks in Category '{}':", category))?;
                let listing = format_category_listing(&books);
                if books.is_empty() {
                    console.error(&listing)?;
                } else {
                    console.plain(listing.trim_end())?;
                }
            }
            Err(e) => self.report(console, &e)?,
        }
        Ok(Step::Continue)
    }

    fn exit<C: Console>(&self, console: &mut C) -> LibraryResult<()> {
        if let Err(e) = self.storage.save_all() {
            tracing::warn!(error = %e, "library data could not be saved on exit");
            self.report_save_failure(console, &e)?;
        }
        console.success("Exiting Library.")
    }

    /// `None` at end of input, `Some(None)` after reporting a bad id
    fn read_id<C: Console>(
        &self,
        console: &mut C,
        prompt: &str,
    ) -> LibraryResult<Option<Option<BookId>>> {
        let Some(input) = console.read_line(prompt)? else {
            return Ok(None);
        };
        match input.parse::<BookId>() {
            Ok(id) => Ok(Some(Some(id))),
            Err(_) => {
                console.error("Invalid ID.")?;
                Ok(Some(None))
            }
        }
    }

    fn report<C: Console>(&self, console: &mut C, err: &LibraryError) -> LibraryResult<()> {
        match err {
            LibraryError::NotFound { .. } => console.error("Book not found."),
            LibraryError::Duplicate { .. } => console.error("Invalid or duplicate ID."),
            LibraryError::AlreadyBorrowed(_) => console.error("Book is already borrowed."),
            LibraryError::NotBorrowed(_) => console.error("Book is not borrowed."),
            other => {
                tracing::warn!(error = %other, "menu action failed");
                console.error(&other.to_string())
            }
        }
    }

    /// Tell the operator a completed change did not reach the data file
    fn report_unsaved<C: Console, T>(
        &self,
        console: &mut C,
        applied: &Applied<T>,
    ) -> LibraryResult<()> {
        match &applied.save_error {
            Some(e) => self.report_save_failure(console, e),
            None => Ok(()),
        }
    }

    fn report_save_failure<C: Console>(
        &self,
        console: &mut C,
        err: &LibraryError,
    ) -> LibraryResult<()> {
        console.error(&format!("Could not save library data: {}", err))
    }
}
