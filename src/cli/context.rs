//! Shared state for CLI command handlers

use crate::config::{LedgerPaths, Settings};
use crate::error::LedgerResult;
use crate::models::Ledger;
use crate::storage::{current_year, FileFormat, LedgerStore};

/// Resolved paths, settings and the global `--year`/`--format` options
#[derive(Debug, Clone)]
pub struct CliContext {
    pub paths: LedgerPaths,
    pub settings: Settings,
    pub store: LedgerStore,
    year: Option<i32>,
    format: Option<FileFormat>,
}

impl CliContext {
    pub fn new(
        paths: LedgerPaths,
        settings: Settings,
        year: Option<i32>,
        format: Option<FileFormat>,
    ) -> Self {
        let store = LedgerStore::new(paths.ledger_dir());
        Self {
            paths,
            settings,
            store,
            year,
            format,
        }
    }

    /// The `--year` option, or the current year
    pub fn year(&self) -> i32 {
        self.year.unwrap_or_else(current_year)
    }

    /// The `--year` option, or `fallback`
    pub fn year_or(&self, fallback: i32) -> i32 {
        self.year.unwrap_or(fallback)
    }

    /// The `--format` option, or the configured default
    pub fn format(&self) -> FileFormat {
        self.format.unwrap_or(self.settings.default_format)
    }

    /// Load a year's ledger, empty if the file does not exist yet
    pub fn load_ledger(&self, year: i32) -> LedgerResult<Ledger> {
        self.store.load_or_default(Some(year), self.format())
    }

    pub fn symbol(&self) -> &str {
        &self.settings.currency_symbol
    }
}
