//! Delimited-text ledger files
//!
//! Files start with a UTF-8 byte-order mark so spreadsheet tools pick the
//! right encoding. Rows are decoded in on-disk order and never re-sorted;
//! a legacy file's balances are rebuilt in that same order.

use csv::{ReaderBuilder, StringRecord, Trim, Writer};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{parse_date, Money, Transaction, TransactionId};

use super::tabular::{into_transactions, skip_row, ColumnIndex, LedgerRow, RowError, HEADERS};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Encode transactions as CSV, in the order given
pub fn encode_csv(transactions: &[Transaction]) -> LedgerResult<Vec<u8>> {
    let mut writer = Writer::from_writer(UTF8_BOM.to_vec());
    writer.write_record(HEADERS)?;

    for txn in transactions {
        writer.write_record([
            txn.id.to_string(),
            txn.date.format("%Y-%m-%d").to_string(),
            txn.amount.to_decimal_string(),
            txn.category.clone(),
            txn.description.clone(),
            txn.balance.to_decimal_string(),
        ])?;
    }

    writer
        .into_inner()
        .map_err(|e| LedgerError::Io(format!("Failed to finish CSV output: {}", e)))
}

/// Decode CSV bytes into transactions
///
/// `source` names the file (or remote id) in errors and logs. Bad framing
/// or a missing required column fails with `CorruptFile`; a row whose id,
/// date or amount does not parse is skipped with a warning.
pub fn decode_csv(bytes: &[u8], source: &str) -> LedgerResult<Vec<Transaction>> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(bytes);

    let headers = reader
        .headers()
        .map_err(|e| LedgerError::corrupt(source, e.to_string()))?
        .clone();
    let columns = ColumnIndex::from_headers(headers.iter())
        .map_err(|reason| LedgerError::corrupt(source, reason))?;

    let mut rows = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record.map_err(|e| LedgerError::corrupt(source, e.to_string()))?;
        match decode_record(&record, &columns, index + 1) {
            Ok(row) => rows.push(row),
            Err(err) => skip_row(source, &err),
        }
    }

    if columns.is_legacy() {
        tracing::warn!(file = source, "No balance column, rebuilding balances in file order");
    }

    into_transactions(rows, columns.is_legacy())
        .map_err(|err| LedgerError::corrupt(source, format!("row {}: {}", err.row, err.reason)))
}

fn decode_record(
    record: &StringRecord,
    columns: &ColumnIndex,
    row: usize,
) -> Result<LedgerRow, RowError> {
    let field = |index: usize| record.get(index).unwrap_or("");
    let fail = |reason: String| RowError { row, reason };

    let id = TransactionId::parse(field(columns.id))
        .ok_or_else(|| fail(format!("bad transaction id '{}'", field(columns.id))))?;
    let date = parse_date(field(columns.date))
        .ok_or_else(|| fail(format!("bad date '{}'", field(columns.date))))?;
    let amount = Money::parse(field(columns.amount)).map_err(|e| fail(e.to_string()))?;
    let balance = columns
        .balance
        .map(|index| Money::parse(field(index)).map_err(|e| fail(e.to_string())))
        .transpose()?;

    Ok(LedgerRow {
        id,
        date,
        amount,
        category: field(columns.category).to_string(),
        description: columns.description.map(field).unwrap_or("").to_string(),
        balance,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_encode_layout() {
        let txn = Transaction::new(
            TransactionId::new(1),
            date(2024, 1, 5),
            Money::from_units(1000),
            "Salary",
            "Jan pay, bonus",
            Money::from_units(1000),
        );
        let bytes = encode_csv(&[txn]).unwrap();
        assert!(bytes.starts_with(UTF8_BOM));

        let text = String::from_utf8(bytes[UTF8_BOM.len()..].to_vec()).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("Transaction ID,Date,Amount,Category,Description,Balance")
        );
        assert_eq!(
            lines.next(),
            Some("1,2024-01-05,1000.00,Salary,\"Jan pay, bonus\",1000.00")
        );
    }

    #[test]
    fn test_decode_keeps_file_order_and_balances() {
        let text = "Transaction ID,Date,Amount,Category,Description,Balance\n\
                    2,2024-03-01,-30.0,Food,lunch,70.0\n\
                    1,2024-01-01,100.0,Salary,pay,100.0\n";
        let txns = decode_csv(text.as_bytes(), "test.csv").unwrap();

        assert_eq!(txns.len(), 2);
        assert_eq!(txns[0].id, TransactionId::new(2));
        assert_eq!(txns[0].balance, Money::from_units(70));
        assert_eq!(txns[1].balance, Money::from_units(100));
    }

    #[test]
    fn test_decode_legacy_rebuilds_in_file_order() {
        let text = "Transaction ID,Date,Amount,Category,Description\n\
                    1,2024-02-01,-50,Food,lunch\n\
                    2,2024-01-05,1000,Salary,pay\n";
        let txns = decode_csv(text.as_bytes(), "legacy.csv").unwrap();

        assert_eq!(txns[0].balance, Money::from_units(-50));
        assert_eq!(txns[1].balance, Money::from_units(950));
    }

    #[test]
    fn test_decode_strips_bom_and_accepts_datetimes() {
        let mut bytes = UTF8_BOM.to_vec();
        bytes.extend_from_slice(
            b"Transaction ID,Date,Amount,Category,Description,Balance\n\
              1.0,2024-01-05 00:00:00,1000.0,Salary,,1000.0\n",
        );
        let txns = decode_csv(&bytes, "bom.csv").unwrap();
        assert_eq!(txns[0].id, TransactionId::new(1));
        assert_eq!(txns[0].date, date(2024, 1, 5));
        assert_eq!(txns[0].description, "");
    }

    #[test]
    fn test_decode_skips_malformed_rows() {
        let text = "Transaction ID,Date,Amount,Category,Description,Balance\n\
                    1,2024-01-05,1000,Salary,pay,1000\n\
                    2,not-a-date,-10,Food,x,990\n\
                    3,2024-01-07,abc,Food,y,990\n\
                    4,2024-01-08,-20,Food,z,980\n";
        let txns = decode_csv(text.as_bytes(), "mixed.csv").unwrap();
        let ids: Vec<u64> = txns.iter().map(|t| t.id.value()).collect();
        assert_eq!(ids, vec![1, 4]);
    }

    #[test]
    fn test_decode_legacy_overflow_is_corrupt() {
        let mut text = String::from("Transaction ID,Date,Amount,Category,Description\n");
        for id in 1..=9300 {
            text.push_str(&format!("{},2024-01-05,10000000000000,Windfall,\n", id));
        }

        let err = decode_csv(text.as_bytes(), "huge.csv").unwrap_err();
        match err {
            LedgerError::CorruptFile { path, reason } => {
                assert_eq!(path, "huge.csv");
                assert!(reason.contains("out of range"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_decode_missing_column_is_corrupt() {
        let text = "Id,When,How much\n1,2024-01-01,5\n";
        let err = decode_csv(text.as_bytes(), "weird.csv").unwrap_err();
        assert!(matches!(err, LedgerError::CorruptFile { .. }));
    }

    #[test]
    fn test_decode_ragged_rows_is_corrupt() {
        let text = "Transaction ID,Date,Amount,Category,Description,Balance\n\
                    1,2024-01-05,1000\n";
        let err = decode_csv(text.as_bytes(), "ragged.csv").unwrap_err();
        assert!(matches!(err, LedgerError::CorruptFile { .. }));
    }

    #[test]
    fn test_decode_header_only_is_empty() {
        let bytes = encode_csv(&[]).unwrap();
        assert!(decode_csv(&bytes, "empty.csv").unwrap().is_empty());
    }
}
