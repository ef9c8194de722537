//! User settings for the library inventory
//!
//! Manages the lending policy, the data-file obfuscation toggle and display
//! preferences. Every field has a serde default so older or hand-edited
//! files keep loading. The file is read-only to the application.

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};

use super::paths::LibraryPaths;
use crate::error::LibraryError;
use crate::models::LendingPolicy;
use crate::storage::{read_json, Cipher};

/// Data-file obfuscation settings
///
/// This is NOT encryption. The XOR transform only keeps the data file from
/// being casually readable; anyone with the file can reverse it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObfuscationSettings {
    /// Whether fields are XOR-obfuscated on disk
    #[serde(default = "default_obfuscation_enabled")]
    pub enabled: bool,

    /// The single key byte
    #[serde(default = "default_obfuscation_key")]
    pub key: u8,
}

fn default_obfuscation_enabled() -> bool {
    true
}

fn default_obfuscation_key() -> u8 {
    b'X'
}

impl Default for ObfuscationSettings {
    fn default() -> Self {
        Self {
            enabled: default_obfuscation_enabled(),
            key: default_obfuscation_key(),
        }
    }
}

/// User settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Borrow limit and daily fine
    #[serde(default)]
    pub lending: LendingPolicy,

    /// Data-file obfuscation
    #[serde(default)]
    pub obfuscation: ObfuscationSettings,

    /// Currency symbol used when printing fines
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Format for borrow timestamps (strftime)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Whether the interactive menu uses colors
    #[serde(default = "default_color")]
    pub color: bool,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d %H:%M".to_string()
}

fn default_color() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            lending: LendingPolicy::default(),
            obfuscation: ObfuscationSettings::default(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            color: default_color(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or fall back to defaults if the file doesn't exist
    pub fn load_or_create(paths: &LibraryPaths) -> Result<Self, LibraryError> {
        let settings: Self = read_json(paths.settings_file()).map_err(|e| {
            LibraryError::Config(format!("Failed to load settings file: {}", e))
        })?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject values that would produce negative fines or unprintable dates
    pub fn validate(&self) -> Result<(), LibraryError> {
        if self.lending.fine_per_day.cents() < 0 {
            return Err(LibraryError::Validation(format!(
                "lending.fine_per_day must not be negative (got {} cents)",
                self.lending.fine_per_day.cents()
            )));
        }

        if StrftimeItems::new(&self.date_format).any(|item| matches!(item, Item::Error)) {
            return Err(LibraryError::Validation(format!(
                "date_format '{}' is not a valid strftime pattern",
                self.date_format
            )));
        }

        Ok(())
    }

    /// The cipher applied to the data file
    pub fn cipher(&self) -> Cipher {
        if self.obfuscation.enabled {
            Cipher::Xor {
                key: self.obfuscation.key,
            }
        } else {
            Cipher::Plain
        }
    }
}
