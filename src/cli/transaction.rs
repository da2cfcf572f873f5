//! Transaction CLI commands
//!
//! Recording and listing transactions in a year file.

use chrono::{Datelike, Local};

use crate::display::{format_recorded, format_transaction_register};
use crate::error::LedgerResult;
use crate::models::parse_date;

use super::CliContext;

/// Record one transaction and save the year file
///
/// The year file is the `--year` option, or else the transaction date's
/// year. The date defaults to today. With `both` the CSV and XLSX files
/// are both written.
pub fn handle_add_command(
    ctx: &CliContext,
    amount: &str,
    category: &str,
    description: Option<&str>,
    date: Option<&str>,
    both: bool,
) -> LedgerResult<()> {
    let today = Local::now().date_naive().format("%Y-%m-%d").to_string();
    let date = date.unwrap_or(&today);

    let year = ctx.year_or(parse_date(date).map(|d| d.year()).unwrap_or_else(|| ctx.year()));
    let mut ledger = ctx.load_ledger(year)?;

    let txn = ledger.record_input(date, amount, category, description.unwrap_or(""))?;
    let paths = if both {
        ctx.store.save_both(&ledger, Some(year))?
    } else {
        vec![ctx.store.save(&ledger, Some(year), ctx.format())?]
    };

    println!("{}", format_recorded(&txn, ctx.symbol()));
    for path in paths {
        println!("Saved to {}", path.display());
    }
    Ok(())
}

/// Print a year's transactions in file order
pub fn handle_list_command(ctx: &CliContext, limit: Option<usize>) -> LedgerResult<()> {
    let year = ctx.year();
    let ledger = ctx.load_ledger(year)?;

    let transactions = ledger.snapshot();
    let shown = match limit {
        Some(limit) if limit < transactions.len() => &transactions[transactions.len() - limit..],
        _ => transactions,
    };

    println!("Transactions for {} ({})", year, ctx.format());
    print!("{}", format_transaction_register(shown, ctx.symbol()));
    if !ledger.is_empty() {
        println!();
        println!(
            "{} transaction(s), balance {}",
            ledger.len(),
            ledger.current_balance().format_with_symbol(ctx.symbol())
        );
    }
    Ok(())
}
