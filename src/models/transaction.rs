//! Transaction model
//!
//! One recorded monetary event. The `balance` field is the ledger's running
//! total right after this transaction was recorded, in recording order. It is
//! not recomputed when transactions are later viewed in date order.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::TransactionId;
use super::money::Money;

/// A recorded transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier, increasing in recording order
    pub id: TransactionId,

    /// Transaction date
    pub date: NaiveDate,

    /// Amount (positive for income, negative for expense)
    pub amount: Money,

    /// Free-form category label
    pub category: String,

    /// Free-form description
    #[serde(default)]
    pub description: String,

    /// Running balance immediately after this transaction was recorded
    pub balance: Money,
}

impl Transaction {
    /// Create a transaction with every field given
    pub fn new(
        id: TransactionId,
        date: NaiveDate,
        amount: Money,
        category: impl Into<String>,
        description: impl Into<String>,
        balance: Money,
    ) -> Self {
        Self {
            id,
            date,
            amount,
            category: category.into(),
            description: description.into(),
            balance,
        }
    }

    pub fn is_income(&self) -> bool {
        self.amount.is_positive()
    }

    pub fn is_expense(&self) -> bool {
        self.amount.is_negative()
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} {} {} {} ({})",
            self.id,
            self.date.format("%Y-%m-%d"),
            self.category,
            self.amount,
            self.description
        )
    }
}

/// Parse a calendar date as entered by a user or written in a file
///
/// Accepts ISO dates, and ISO date-times whose time part is dropped (the
/// legacy files were written by a tool that sometimes appended "00:00:00").
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    let date_part = s.split(|c: char| c == ' ' || c == 'T').next().unwrap_or(s);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}
