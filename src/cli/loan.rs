//! Loan CLI commands
//!
//! Borrow, return and overdue reporting from the command line.

use chrono::Utc;
use clap::Subcommand;

use crate::config::Settings;
use crate::display::format_overdue_list;
use crate::error::LibraryResult;
use crate::models::BookId;
use crate::services::LendingService;
use crate::storage::Storage;

/// Loan subcommands
#[derive(Subcommand)]
pub enum LoanCommands {
    /// Lend a book out
    Borrow {
        /// Book ID
        #[arg(allow_hyphen_values = true)]
        id: i64,
        /// Borrower name
        #[arg(short, long)]
        name: String,
        /// Borrower contact (email or phone)
        #[arg(short, long, default_value = "")]
        contact: String,
    },
    /// Take a book back and report the fine
    Return {
        /// Book ID
        #[arg(allow_hyphen_values = true)]
        id: i64,
    },
    /// List borrowed books that are accruing fines
    Overdue,
}

/// Handle a loan command
pub fn handle_loan_command(
    storage: &Storage,
    settings: &Settings,
    cmd: LoanCommands,
) -> LibraryResult<()> {
    let service = LendingService::new(storage, settings.lending);

    match cmd {
        LoanCommands::Borrow { id, name, contact } => {
            let borrowed = service.borrow(BookId::new(id), &name, &contact)?;
            let due = service.policy().borrow_limit_days;
            println!("Borrowed: {}", borrowed.value);
            if let Some(borrower) = borrowed.value.borrower() {
                println!("Borrower: {}", borrower);
            }
            println!("Return within {} days to avoid fines.", due);
            if let Some(e) = borrowed.save_error {
                return Err(e);
            }
        }

        LoanCommands::Return { id } => {
            let returned = service.return_book(BookId::new(id))?;
            let receipt = &returned.value;
            println!("Returned: {}", receipt.book);
            println!(
                "Borrowed by {} for {:.1} days",
                receipt.borrower, receipt.days_elapsed
            );
            if receipt.fine.is_positive() {
                println!(
                    "Fine due: {}",
                    receipt.fine.format_with_symbol(&settings.currency_symbol)
                );
            } else {
                println!("No fine due.");
            }
            if let Some(e) = returned.save_error {
                return Err(e);
            }
        }

        LoanCommands::Overdue => {
            let overdue = service.overdue_at(Utc::now())?;
            let listing =
                format_overdue_list(&overdue, &settings.currency_symbol, &settings.date_format);
            println!("{}", listing.trim_end());
        }
    }

    Ok(())
}
