//! Reports module for ledgerbook
//!
//! Monthly and yearly summaries over a ledger, with terminal and file
//! output.

pub mod export;
pub mod period_report;

pub use export::{export_report, export_report_json, export_report_yaml, ReportFormat};
pub use period_report::{CategoryBreakdown, CategoryShare, PeriodReport};
