//! library-cli - Terminal-based book inventory and lending tracker
//!
//! This library provides the core functionality for a small library's
//! inventory: adding books, looking them up, lending them out, taking them
//! back, and pricing late returns.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Path resolution and user settings
//! - `error`: Custom error types
//! - `models`: Books, borrowers, loans, money and the lending policy
//! - `storage`: Obfuscated line-record data file and the book repository
//! - `services`: Catalog and lending business logic
//! - `display`: Plain-text formatting for terminal output
//! - `menu`: Interactive numbered menu over an injectable console
//! - `cli`: Non-interactive subcommands
//!
//! # Example
//!
//! ```rust,ignore
//! use library_cli::config::{LibraryPaths, Settings};
//! use library_cli::storage::Storage;
//!
//! let paths = LibraryPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let mut storage = Storage::new(paths, settings.cipher())?;
//! storage.load_all()?;
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod menu;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{LibraryError, LibraryResult};
