//! Spreadsheet ledger files
//!
//! Written with `rust_xlsxwriter`, read back with `calamine`. Dates are
//! stored as Excel serial numbers with a date format, amounts as numbers.
//! On read the rows are sorted by date before a legacy file's balances are
//! rebuilt, unlike the CSV path.

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};
use chrono::{Days, NaiveDate};
use rust_xlsxwriter::{Format, Workbook, XlsxError};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{parse_date, Money, Transaction, TransactionId};

use super::tabular::{into_transactions, skip_row, ColumnIndex, LedgerRow, RowError, HEADERS};

const SHEET_NAME: &str = "Transactions";

/// Encode transactions as an XLSX workbook, in the order given
pub fn encode_xlsx(transactions: &[Transaction]) -> LedgerResult<Vec<u8>> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();
    let date_format = Format::new().set_num_format("yyyy-mm-dd");
    let money_format = Format::new().set_num_format("0.00");

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME).map_err(xlsx_error)?;

    for (col, header) in HEADERS.iter().enumerate() {
        worksheet
            .write_string_with_format(0, col as u16, *header, &header_format)
            .map_err(xlsx_error)?;
    }

    for (index, txn) in transactions.iter().enumerate() {
        let row = index as u32 + 1;
        worksheet
            .write_number(row, 0, txn.id.value() as f64)
            .map_err(xlsx_error)?;
        worksheet
            .write_number_with_format(row, 1, date_to_serial(txn.date), &date_format)
            .map_err(xlsx_error)?;
        worksheet
            .write_number_with_format(row, 2, txn.amount.as_f64(), &money_format)
            .map_err(xlsx_error)?;
        worksheet
            .write_string(row, 3, txn.category.as_str())
            .map_err(xlsx_error)?;
        worksheet
            .write_string(row, 4, txn.description.as_str())
            .map_err(xlsx_error)?;
        worksheet
            .write_number_with_format(row, 5, txn.balance.as_f64(), &money_format)
            .map_err(xlsx_error)?;
    }

    worksheet.set_column_width(1, 12.0).map_err(xlsx_error)?;
    worksheet.set_column_width(4, 30.0).map_err(xlsx_error)?;

    workbook.save_to_buffer().map_err(xlsx_error)
}

/// Read an XLSX ledger file
///
/// Only the first worksheet is read. Rows come back sorted by date (stable,
/// so same-day rows keep sheet order).
pub fn read_xlsx(path: &Path) -> LedgerResult<Vec<Transaction>> {
    if !path.exists() {
        return Err(LedgerError::file_not_found(path));
    }
    let source = path.display().to_string();

    let mut workbook = open_workbook_auto(path)
        .map_err(|e| LedgerError::corrupt(path, format!("not a readable workbook: {}", e)))?;
    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| LedgerError::corrupt(path, "workbook has no worksheets"))?;
    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| LedgerError::corrupt(path, format!("failed to read sheet: {}", e)))?;

    let mut sheet_rows = range.rows();
    let header: Vec<String> = sheet_rows
        .next()
        .ok_or_else(|| LedgerError::corrupt(path, "missing header row"))?
        .iter()
        .map(cell_text)
        .collect();
    let columns = ColumnIndex::from_headers(header.iter().map(String::as_str))
        .map_err(|reason| LedgerError::corrupt(path, reason))?;

    let mut rows = Vec::new();
    for (index, cells) in sheet_rows.enumerate() {
        if cells.iter().all(|c| matches!(c, Data::Empty)) {
            continue;
        }
        match decode_row(cells, &columns, index + 1) {
            Ok(row) => rows.push(row),
            Err(err) => skip_row(&source, &err),
        }
    }

    rows.sort_by_key(|r| r.date);

    if columns.is_legacy() {
        tracing::warn!(file = %source, "No balance column, rebuilding balances in date order");
    }

    into_transactions(rows, columns.is_legacy())
        .map_err(|err| LedgerError::corrupt(path, format!("row {}: {}", err.row, err.reason)))
}

fn decode_row(cells: &[Data], columns: &ColumnIndex, row: usize) -> Result<LedgerRow, RowError> {
    let cell = |index: usize| cells.get(index).unwrap_or(&Data::Empty);
    let fail = |what: &str, index: usize| RowError {
        row,
        reason: format!("bad {} '{}'", what, cell_text(cell(index))),
    };

    let id = cell_id(cell(columns.id)).ok_or_else(|| fail("transaction id", columns.id))?;
    let date = cell_date(cell(columns.date)).ok_or_else(|| fail("date", columns.date))?;
    let amount = cell_money(cell(columns.amount)).ok_or_else(|| fail("amount", columns.amount))?;
    let balance = match columns.balance {
        Some(index) => Some(cell_money(cell(index)).ok_or_else(|| fail("balance", index))?),
        None => None,
    };

    Ok(LedgerRow {
        id,
        date,
        amount,
        category: cell_text(cell(columns.category)),
        description: columns
            .description
            .map(|index| cell_text(cell(index)))
            .unwrap_or_default(),
        balance,
    })
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.trim().to_string(),
        other => other.to_string(),
    }
}

fn cell_id(cell: &Data) -> Option<TransactionId> {
    match cell {
        Data::Int(n) => u64::try_from(*n).ok().and_then(TransactionId::from_value),
        Data::Float(f) => TransactionId::from_f64(*f),
        Data::String(s) => TransactionId::parse(s),
        _ => None,
    }
}

fn cell_date(cell: &Data) -> Option<NaiveDate> {
    match cell {
        Data::DateTime(dt) => serial_to_date(dt.as_f64()),
        Data::Float(f) => serial_to_date(*f),
        Data::Int(n) => serial_to_date(*n as f64),
        Data::String(s) | Data::DateTimeIso(s) => parse_date(s),
        _ => None,
    }
}

fn cell_money(cell: &Data) -> Option<Money> {
    match cell {
        Data::Float(f) => Money::from_f64(*f),
        Data::Int(n) => n.checked_mul(100).and_then(Money::try_from_cents),
        Data::String(s) => Money::parse(s).ok(),
        _ => None,
    }
}

/// Day zero of the Excel 1900 date system (serial 1 is 1900-01-01, with the
/// phantom 1900-02-29 absorbed by starting on the 30th)
fn excel_epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(1899, 12, 30).unwrap_or_default()
}

fn date_to_serial(date: NaiveDate) -> f64 {
    date.signed_duration_since(excel_epoch()).num_days() as f64
}

fn serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || serial < 1.0 {
        return None;
    }
    excel_epoch().checked_add_days(Days::new(serial.floor() as u64))
}

fn xlsx_error(err: XlsxError) -> LedgerError {
    LedgerError::Io(format!("Failed to build XLSX workbook: {}", err))
}
