//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the ledger and storage layers.

pub mod context;
pub mod files;
pub mod remote;
pub mod report;
pub mod transaction;

pub use context::CliContext;
pub use files::{handle_convert_command, handle_files_command};
pub use remote::{handle_remote_command, RemoteCommands};
pub use report::{handle_report_command, ReportCommands};
pub use transaction::{handle_add_command, handle_list_command};
