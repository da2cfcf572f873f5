//! Shared row layout for the tabular ledger files
//!
//! Both encodings carry the same six columns. A file written before the
//! balance column existed (a legacy file) gets its balances rebuilt as a
//! cumulative sum of amounts over the rows in the order the caller hands
//! them in; each encoding decides that order itself.

use chrono::NaiveDate;
use tracing::warn;

use crate::models::{Money, Transaction, TransactionId};

pub const COL_ID: &str = "Transaction ID";
pub const COL_DATE: &str = "Date";
pub const COL_AMOUNT: &str = "Amount";
pub const COL_CATEGORY: &str = "Category";
pub const COL_DESCRIPTION: &str = "Description";
pub const COL_BALANCE: &str = "Balance";

/// Header row, in file column order
pub const HEADERS: [&str; 6] = [
    COL_ID,
    COL_DATE,
    COL_AMOUNT,
    COL_CATEGORY,
    COL_DESCRIPTION,
    COL_BALANCE,
];

/// Position of each known column in a file's header row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnIndex {
    pub id: usize,
    pub date: usize,
    pub amount: usize,
    pub category: usize,
    pub description: Option<usize>,
    pub balance: Option<usize>,
}

impl ColumnIndex {
    /// Locate the columns by header name (case-insensitive)
    ///
    /// Returns the name of the first required column that is missing.
    pub fn from_headers<'a, I>(headers: I) -> Result<Self, String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let headers: Vec<&str> = headers.into_iter().map(str::trim).collect();
        let find = |name: &str| headers.iter().position(|h| h.eq_ignore_ascii_case(name));
        let require = |name: &str| find(name).ok_or_else(|| format!("missing column '{}'", name));

        Ok(Self {
            id: require(COL_ID)?,
            date: require(COL_DATE)?,
            amount: require(COL_AMOUNT)?,
            category: require(COL_CATEGORY)?,
            description: find(COL_DESCRIPTION),
            balance: find(COL_BALANCE),
        })
    }

    /// Whether this is a legacy layout without the balance column
    pub fn is_legacy(&self) -> bool {
        self.balance.is_none()
    }
}

/// One decoded data row, before balances are settled
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerRow {
    pub id: TransactionId,
    pub date: NaiveDate,
    pub amount: Money,
    pub category: String,
    pub description: String,
    pub balance: Option<Money>,
}

/// Why a single data row could not be decoded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowError {
    /// 1-based data row number (header excluded)
    pub row: usize,
    pub reason: String,
}

/// Log and drop a row that could not be decoded
pub fn skip_row(source: &str, err: &RowError) {
    warn!(
        file = source,
        row = err.row,
        reason = %err.reason,
        "Skipping malformed ledger row"
    );
}

/// Turn decoded rows into transactions
///
/// When `legacy` is set the balance column was absent and balances are the
/// running sum of amounts in the given row order. Otherwise each row keeps
/// the balance read from the file. A running sum that overflows fails at
/// the row where it does.
pub fn into_transactions(
    rows: Vec<LedgerRow>,
    legacy: bool,
) -> Result<Vec<Transaction>, RowError> {
    let mut running = Money::zero();
    let mut transactions = Vec::with_capacity(rows.len());

    for (index, row) in rows.into_iter().enumerate() {
        let balance = match row.balance {
            Some(balance) if !legacy => balance,
            _ => {
                running = running.checked_add(row.amount).ok_or_else(|| RowError {
                    row: index + 1,
                    reason: "running balance out of range".to_string(),
                })?;
                running
            }
        };
        transactions.push(Transaction::new(
            row.id,
            row.date,
            row.amount,
            row.category,
            row.description,
            balance,
        ));
    }

    Ok(transactions)
}
