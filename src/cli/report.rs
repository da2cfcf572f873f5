//! CLI commands for reports
//!
//! Monthly and yearly summaries, printed or exported to a file.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use chrono::{Datelike, Local};
use clap::Subcommand;

use crate::error::{LedgerError, LedgerResult};
use crate::models::ReportPeriod;
use crate::reports::{export_report, PeriodReport, ReportFormat};

use super::CliContext;

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Summary of one calendar month
    Month {
        /// Month to report on (e.g., "2024-01"), defaults to the current month
        period: Option<String>,

        /// Export format instead of terminal output
        #[arg(short, long, value_enum)]
        output: Option<ReportFormat>,

        /// Write the export to this file instead of stdout
        #[arg(long, requires = "output")]
        file: Option<PathBuf>,
    },

    /// Summary of one calendar year
    Year {
        /// Year to report on, defaults to the current year
        #[arg(value_name = "YEAR")]
        calendar_year: Option<i32>,

        /// Export format instead of terminal output
        #[arg(short, long, value_enum)]
        output: Option<ReportFormat>,

        /// Write the export to this file instead of stdout
        #[arg(long, requires = "output")]
        file: Option<PathBuf>,
    },
}

/// Handle report commands
pub fn handle_report_command(ctx: &CliContext, cmd: ReportCommands) -> LedgerResult<()> {
    let (period, output, file) = match cmd {
        ReportCommands::Month {
            period,
            output,
            file,
        } => {
            let period = match period {
                Some(text) => parse_period(&text)?,
                None => {
                    let today = Local::now().date_naive();
                    ReportPeriod::month(today.year(), today.month()).map_err(invalid_period)?
                }
            };
            (period, output, file)
        }
        ReportCommands::Year {
            calendar_year,
            output,
            file,
        } => {
            let year = calendar_year.unwrap_or_else(|| ctx.year());
            (ReportPeriod::year(year).map_err(invalid_period)?, output, file)
        }
    };

    // The ledger comes from the period's own year file unless --year says otherwise
    let ledger = ctx.load_ledger(ctx.year_or(period.start_date().year()))?;
    let report = PeriodReport::generate(&ledger, period)?;

    match (output, file) {
        (None, _) => print!("{}", report.format_terminal(ctx.symbol())),
        (Some(format), Some(path)) => {
            let file = File::create(&path).map_err(|e| {
                LedgerError::Export(format!("Failed to create file {}: {}", path.display(), e))
            })?;
            let mut writer = BufWriter::new(file);
            export_report(&report, format, &mut writer)?;
            writer
                .flush()
                .map_err(|e| LedgerError::Export(e.to_string()))?;
            println!("Report exported to: {}", path.display());
        }
        (Some(format), None) => {
            let stdout = io::stdout();
            let mut writer = stdout.lock();
            export_report(&report, format, &mut writer)?;
        }
    }

    Ok(())
}

fn parse_period(text: &str) -> LedgerResult<ReportPeriod> {
    let period = ReportPeriod::parse(text).map_err(invalid_period)?;
    if !period.is_monthly() {
        return Err(LedgerError::InvalidInput(format!(
            "'{}' is not a month. Use YYYY-MM (e.g., 2024-01)",
            text
        )));
    }
    Ok(period)
}

fn invalid_period(err: impl std::fmt::Display) -> LedgerError {
    LedgerError::InvalidInput(format!("Invalid period: {}", err))
}
