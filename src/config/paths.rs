//! Path management for ledgerbook
//!
//! Ledger files live in a single base directory, next to the settings file.
//!
//! ## Path Resolution Order
//!
//! 1. `LEDGERBOOK_DIR` environment variable (if set)
//! 2. The current working directory

use std::path::{Path, PathBuf};

use crate::error::{LedgerError, LedgerResult};

/// Environment variable that overrides the base directory
pub const BASE_DIR_ENV: &str = "LEDGERBOOK_DIR";

/// Manages all paths used by ledgerbook
#[derive(Debug, Clone)]
pub struct LedgerPaths {
    /// Directory holding the yearly ledger files and settings
    base_dir: PathBuf,
}

impl LedgerPaths {
    /// Resolve the base directory from the environment
    ///
    /// # Errors
    ///
    /// Returns an error if `LEDGERBOOK_DIR` is unset and the current
    /// directory cannot be determined.
    pub fn new() -> LedgerResult<Self> {
        let base_dir = match std::env::var_os(BASE_DIR_ENV) {
            Some(custom) if !custom.is_empty() => PathBuf::from(custom),
            _ => std::env::current_dir().map_err(|e| {
                LedgerError::Config(format!("Could not determine current directory: {}", e))
            })?,
        };

        Ok(Self { base_dir })
    }

    /// Create LedgerPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Directory holding `<year>_transactions.*` files
    pub fn ledger_dir(&self) -> PathBuf {
        self.base_dir.clone()
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("ledgerbook.json")
    }

    /// Default root for the folder-backed remote
    pub fn remote_dir(&self) -> PathBuf {
        self.base_dir.join("remote")
    }

    /// Ensure the base directory exists
    pub fn ensure_directories(&self) -> LedgerResult<()> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| LedgerError::Io(format!("Failed to create base directory: {}", e)))
    }
}
