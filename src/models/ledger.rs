//! The ledger: recorded transactions plus running-balance bookkeeping
//!
//! A `Ledger` is a plain owned value. Mutation goes through `record` and
//! `replace_all`, both `&mut self`, so a caller sharing a ledger has to
//! provide its own exclusive access around writes.

use chrono::NaiveDate;

use crate::error::{LedgerError, LedgerResult};

use super::ids::TransactionId;
use super::money::Money;
use super::transaction::{parse_date, Transaction};

/// Ordered transactions, the next id to hand out and the current balance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ledger {
    transactions: Vec<Transaction>,
    next_id: TransactionId,
    current_balance: Money,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

impl Ledger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self {
            transactions: Vec::new(),
            next_id: TransactionId::FIRST,
            current_balance: Money::zero(),
        }
    }

    /// Build a ledger from already-recorded transactions
    ///
    /// Same bookkeeping as [`Ledger::replace_all`].
    pub fn from_transactions(transactions: Vec<Transaction>) -> Self {
        let mut ledger = Self::new();
        ledger.replace_all(transactions);
        ledger
    }

    /// Record a new transaction
    ///
    /// The balance snapshot is the current balance plus `amount`, in
    /// recording order. A transaction dated before earlier entries still
    /// takes its balance from whatever was recorded last.
    ///
    /// Fails with `InvalidInput`, leaving the ledger as it was, when the
    /// balance would overflow or the ids are used up.
    pub fn record(
        &mut self,
        date: NaiveDate,
        amount: Money,
        category: impl Into<String>,
        description: impl Into<String>,
    ) -> LedgerResult<Transaction> {
        let balance = self.current_balance.checked_add(amount).ok_or_else(|| {
            LedgerError::InvalidInput(format!(
                "adding {} to a balance of {} is out of range",
                amount.to_decimal_string(),
                self.current_balance.to_decimal_string()
            ))
        })?;
        if self.next_id > TransactionId::MAX {
            return Err(LedgerError::InvalidInput(
                "no transaction ids left in this ledger".to_string(),
            ));
        }

        let txn = Transaction::new(self.next_id, date, amount, category, description, balance);

        self.next_id = self.next_id.next();
        self.current_balance = balance;
        self.transactions.push(txn.clone());
        Ok(txn)
    }

    /// Record a transaction from text input
    ///
    /// Fails with `InvalidInput` without touching the ledger if the date is
    /// not an ISO calendar date, the amount is not a decimal number, or
    /// [`Ledger::record`] refuses it.
    pub fn record_input(
        &mut self,
        date: &str,
        amount: &str,
        category: &str,
        description: &str,
    ) -> LedgerResult<Transaction> {
        let date = parse_date(date).ok_or_else(|| {
            LedgerError::InvalidInput(format!("'{}' is not a date (use YYYY-MM-DD)", date.trim()))
        })?;
        let amount = Money::parse(amount).map_err(|e| LedgerError::InvalidInput(e.to_string()))?;

        self.record(date, amount, category.trim(), description.trim())
    }

    /// Replace the whole contents, e.g. after a load or a remote pull
    ///
    /// The next id follows the largest id present. The current balance is
    /// the balance of the last element in the order given, not of the latest
    /// date, so a caller that sorted its rows gets a different balance than
    /// one that did not.
    pub fn replace_all(&mut self, transactions: Vec<Transaction>) {
        self.next_id = transactions
            .iter()
            .map(|t| t.id)
            .max()
            .map(|id| id.next())
            .unwrap_or(TransactionId::FIRST);
        self.current_balance = transactions
            .last()
            .map(|t| t.balance)
            .unwrap_or_default();
        self.transactions = transactions;
    }

    /// Read-only view in storage order
    pub fn snapshot(&self) -> &[Transaction] {
        &self.transactions
    }

    /// A copy of the transactions sorted by date
    ///
    /// The sort is stable, so same-day entries keep their recorded order.
    /// Balances are copied as they are.
    pub fn sorted_by_date(&self) -> Vec<Transaction> {
        let mut sorted = self.transactions.clone();
        sorted.sort_by_key(|t| t.date);
        sorted
    }

    pub fn next_id(&self) -> TransactionId {
        self.next_id
    }

    pub fn current_balance(&self) -> Money {
        self.current_balance
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}
