//! Storage layer for ledgerbook
//!
//! One file per calendar year, named `<year>_transactions.<csv|xlsx>`, in a
//! single directory. Writes are atomic.

pub mod catalog;
pub mod csv_file;
pub mod file_io;
pub mod tabular;
pub mod xlsx_file;

pub use catalog::{list_year_files, parse_year_filename};
pub use csv_file::{decode_csv, encode_csv};
pub use file_io::{read_file, write_atomic};
pub use xlsx_file::{encode_xlsx, read_xlsx};

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use chrono::{Datelike, Local};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::LedgerResult;
use crate::models::Ledger;

/// On-disk encoding of a ledger file
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum FileFormat {
    #[default]
    Csv,
    #[value(alias = "excel")]
    Xlsx,
}

impl FileFormat {
    /// File extension, without the dot
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Xlsx => "xlsx",
        }
    }

    /// The other encoding
    pub fn other(&self) -> Self {
        match self {
            Self::Csv => Self::Xlsx,
            Self::Xlsx => Self::Csv,
        }
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// File name for a year's ledger
pub fn year_filename(year: i32, format: FileFormat) -> String {
    format!("{}_transactions.{}", year, format.extension())
}

/// The current calendar year in local time
pub fn current_year() -> i32 {
    Local::now().year()
}

/// Reads and writes yearly ledger files in one directory
#[derive(Debug, Clone)]
pub struct LedgerStore {
    dir: PathBuf,
}

impl LedgerStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of a year's file; `None` means the current year
    pub fn path_for(&self, year: Option<i32>, format: FileFormat) -> PathBuf {
        let year = year.unwrap_or_else(current_year);
        self.dir.join(year_filename(year, format))
    }

    /// Write the ledger to its year file
    ///
    /// The file holds a copy sorted by date; same-day rows keep insertion
    /// order and balances are written as stored. The ledger is left as is.
    pub fn save(
        &self,
        ledger: &Ledger,
        year: Option<i32>,
        format: FileFormat,
    ) -> LedgerResult<PathBuf> {
        let path = self.path_for(year, format);
        let rows = ledger.sorted_by_date();

        let bytes = match format {
            FileFormat::Csv => encode_csv(&rows)?,
            FileFormat::Xlsx => encode_xlsx(&rows)?,
        };
        write_atomic(&path, &bytes)?;

        info!(path = %path.display(), count = rows.len(), "Saved ledger");
        Ok(path)
    }

    /// Write the ledger to both the CSV and the XLSX year file
    pub fn save_both(&self, ledger: &Ledger, year: Option<i32>) -> LedgerResult<Vec<PathBuf>> {
        [FileFormat::Csv, FileFormat::Xlsx]
            .into_iter()
            .map(|format| self.save(ledger, year, format))
            .collect()
    }

    /// Read a year file into a fresh ledger
    ///
    /// Fails with `FileNotFound` when the file does not exist.
    pub fn load(&self, year: Option<i32>, format: FileFormat) -> LedgerResult<Ledger> {
        let path = self.path_for(year, format);

        let transactions = match format {
            FileFormat::Csv => {
                let bytes = read_file(&path)?;
                decode_csv(&bytes, &path.display().to_string())?
            }
            FileFormat::Xlsx => read_xlsx(&path)?,
        };

        info!(path = %path.display(), count = transactions.len(), "Loaded ledger");
        Ok(Ledger::from_transactions(transactions))
    }

    /// Like [`load`](Self::load), but a missing file yields an empty ledger
    pub fn load_or_default(&self, year: Option<i32>, format: FileFormat) -> LedgerResult<Ledger> {
        match self.load(year, format) {
            Ok(ledger) => Ok(ledger),
            Err(e) if e.is_not_found() => {
                info!(path = %self.path_for(year, format).display(), "No ledger file yet, starting empty");
                Ok(Ledger::new())
            }
            Err(e) => Err(e),
        }
    }

    /// Years with a ledger file in this store's directory
    pub fn list_year_files(&self, format: FileFormat) -> LedgerResult<BTreeMap<i32, String>> {
        list_year_files(&self.dir, format)
    }
}
