//! Configuration module
//!
//! This module provides configuration management including:
//! - Base and data directory resolution
//! - User settings persistence (lending policy, obfuscation, display)

pub mod paths;
pub mod settings;

pub use paths::LibraryPaths;
pub use settings::{ObfuscationSettings, Settings};
