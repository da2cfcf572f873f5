//! Report export
//!
//! Writes a [`PeriodReport`] as CSV, JSON or YAML. Money values are
//! serialized in cents.

use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, LedgerResult};

use super::PeriodReport;

/// Machine-readable report encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    Csv,
    Json,
    Yaml,
}

/// Export a report to JSON
pub fn export_report_json<W: Write>(
    report: &PeriodReport,
    writer: &mut W,
    pretty: bool,
) -> LedgerResult<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut *writer, report)
    } else {
        serde_json::to_writer(&mut *writer, report)
    }
    .map_err(|e| LedgerError::Export(e.to_string()))?;

    writeln!(writer).map_err(|e| LedgerError::Export(e.to_string()))?;
    Ok(())
}

/// Export a report to YAML, with a short comment header
pub fn export_report_yaml<W: Write>(report: &PeriodReport, writer: &mut W) -> LedgerResult<()> {
    writeln!(writer, "# ledgerbook {}", report.title())
        .map_err(|e| LedgerError::Export(e.to_string()))?;
    writeln!(writer, "# Amounts are in cents")
        .map_err(|e| LedgerError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, report).map_err(|e| LedgerError::Export(e.to_string()))?;
    Ok(())
}

/// Export a report in the requested format
pub fn export_report<W: Write>(
    report: &PeriodReport,
    format: ReportFormat,
    writer: &mut W,
) -> LedgerResult<()> {
    match format {
        ReportFormat::Csv => report.export_csv(writer),
        ReportFormat::Json => export_report_json(report, writer, true),
        ReportFormat::Yaml => export_report_yaml(report, writer),
    }
}
