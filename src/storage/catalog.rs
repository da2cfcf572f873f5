//! Discovery of yearly ledger files in a directory

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{LedgerError, LedgerResult};

use super::FileFormat;

/// Map each year that has a ledger file in `dir` to that file's name
///
/// Only names of the exact form `<4 digits>_transactions.<ext>` count.
/// Directory enumeration order decides which entry wins if two names map to
/// the same year.
pub fn list_year_files(dir: &Path, format: FileFormat) -> LedgerResult<BTreeMap<i32, String>> {
    let entries = fs::read_dir(dir)
        .map_err(|e| LedgerError::Io(format!("Failed to read {}: {}", dir.display(), e)))?;

    let mut years = BTreeMap::new();
    for entry in entries {
        let entry = entry?;
        if !entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
            continue;
        }
        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            continue;
        };
        match parse_year_filename(&name, format) {
            Some(year) => {
                debug!(year, file = %name, "Found ledger file");
                years.insert(year, name);
            }
            None => debug!(file = %name, "Ignoring non-ledger file"),
        }
    }

    Ok(years)
}

/// Extract the year from a `<year>_transactions.<ext>` file name
pub fn parse_year_filename(name: &str, format: FileFormat) -> Option<i32> {
    let stem = name.strip_suffix(format.extension())?.strip_suffix('.')?;
    let year = stem.strip_suffix("_transactions")?;

    if year.len() != 4 || !year.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    year.parse().ok()
}
