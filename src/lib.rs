//! ledgerbook - a personal income and expense ledger
//!
//! Transactions are recorded into an in-memory [`Ledger`] with a running
//! balance, kept on disk as one CSV or XLSX file per calendar year, and
//! summarized in monthly and yearly reports.
//!
//! # Architecture
//!
//! - `models`: transactions, money, ids, report periods and the ledger
//! - `storage`: yearly CSV/XLSX files and the file catalog
//! - `reports`: period summaries and their export
//! - `sync`: the remote gateway capability and push/pull helpers
//! - `config`: paths and user settings
//! - `cli`, `display`: command handlers and terminal formatting
//!
//! # Example
//!
//! ```rust,ignore
//! use ledgerbook::models::{Ledger, ReportPeriod};
//! use ledgerbook::reports::PeriodReport;
//! use ledgerbook::storage::{FileFormat, LedgerStore};
//!
//! let store = LedgerStore::new(".");
//! let mut ledger = store.load_or_default(Some(2024), FileFormat::Csv)?;
//! ledger.record_input("2024-01-05", "1000", "Salary", "Jan pay")?;
//! store.save(&ledger, Some(2024), FileFormat::Csv)?;
//!
//! let report = PeriodReport::generate(&ledger, ReportPeriod::month(2024, 1)?)?;
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod logging;
pub mod models;
pub mod reports;
pub mod storage;
pub mod sync;

pub use error::{LedgerError, LedgerResult};
pub use models::Ledger;
