use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use library_cli::cli::{handle_book_command, handle_loan_command, BookCommands, LoanCommands};
use library_cli::config::{LibraryPaths, Settings};
use library_cli::menu::{Menu, TerminalConsole};
use library_cli::storage::Storage;

#[derive(Parser)]
#[command(
    name = "library",
    version,
    about = "Terminal-based book inventory and lending tracker",
    long_about = "Tracks a small library's books: add and look up titles, lend them \
                  out, take them back and compute overdue fines. Run without a \
                  command to open the interactive menu."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive menu (default)
    Menu,

    /// Catalog commands
    #[command(subcommand, alias = "books")]
    Book(BookCommands),

    /// Borrow/return commands
    #[command(subcommand, alias = "loans")]
    Loan(LoanCommands),

    /// Show current configuration and paths
    Config,
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let paths = LibraryPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    let mut storage = Storage::new(paths.clone(), settings.cipher())?;
    storage.load_all()?;
    tracing::debug!(base_dir = %paths.base_dir().display(), "storage ready");

    match cli.command {
        None | Some(Commands::Menu) => {
            let mut console = TerminalConsole::stdio(settings.color);
            Menu::new(&storage, &settings).run(&mut console)?;
        }
        Some(Commands::Book(cmd)) => {
            handle_book_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Loan(cmd)) => {
            handle_loan_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Config) => {
            println!("Library Configuration");
            println!("=====================");
            println!("Base directory:  {}", paths.base_dir().display());
            println!("Settings file:   {}", paths.settings_file().display());
            println!("Data file:       {}", paths.books_file().display());
            println!();
            println!("Settings:");
            println!("  Borrow limit:     {} days", settings.lending.borrow_limit_days);
            println!(
                "  Fine per day:     {}",
                settings
                    .lending
                    .fine_per_day
                    .format_with_symbol(&settings.currency_symbol)
            );
            println!(
                "  Obfuscation:      {}",
                if settings.obfuscation.enabled {
                    "XOR (not encryption)"
                } else {
                    "off"
                }
            );
            println!("  Books on file:    {}", storage.books.count()?);
        }
    }

    Ok(())
}
