//! Transaction display formatting
//!
//! Register-style tables for the terminal.

use std::collections::BTreeMap;

use crate::models::Transaction;

/// Format a single transaction as a register row
pub fn format_transaction_row(txn: &Transaction, symbol: &str) -> String {
    format!(
        "{:>5} {} {} {:>12} {:>12}  {}",
        txn.id.value(),
        txn.date.format("%Y-%m-%d"),
        truncate(&txn.category, 15),
        txn.amount.format_with_symbol(symbol),
        txn.balance.format_with_symbol(symbol),
        txn.description
    )
}

/// Format transactions as a register, in the order given
pub fn format_transaction_register(transactions: &[Transaction], symbol: &str) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:>5} {:10} {:15} {:>12} {:>12}  {}\n",
        "ID", "Date", "Category", "Amount", "Balance", "Description"
    ));
    output.push_str(&"-".repeat(72));
    output.push('\n');

    for txn in transactions {
        output.push_str(&format_transaction_row(txn, symbol));
        output.push('\n');
    }

    output
}

/// Format a year-to-filename listing
pub fn format_year_files(files: &BTreeMap<i32, String>) -> String {
    let mut output = String::new();
    for (index, (year, name)) in files.iter().enumerate() {
        output.push_str(&format!("{}. {} ({})\n", index + 1, year, name));
    }
    output
}

/// One-line confirmation after recording
pub fn format_recorded(txn: &Transaction, symbol: &str) -> String {
    format!(
        "Recorded #{} on {}: {} {} (balance {})",
        txn.id,
        txn.date.format("%Y-%m-%d"),
        txn.category,
        txn.amount.format_with_symbol(symbol),
        txn.balance.format_with_symbol(symbol)
    )
}

/// Pad or cut to exactly `max_len` characters
fn truncate(s: &str, max_len: usize) -> String {
    let count = s.chars().count();
    if count <= max_len {
        format!("{:width$}", s, width = max_len)
    } else {
        let cut: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}
