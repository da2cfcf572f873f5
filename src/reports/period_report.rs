//! Period Report
//!
//! Opening balance, income, expenses and a per-category breakdown for a
//! calendar month or year.

use std::collections::BTreeMap;
use std::io::Write;

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Ledger, Money, PeriodKind, ReportPeriod, Transaction};

/// One category's share of the period's income or expenses
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    pub category: String,
    /// Summed amount (negative for expenses)
    pub amount: Money,
    /// Percentage of the matching total
    pub percent: f64,
}

/// Expense and income totals per category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryBreakdown {
    /// Most negative first
    pub expenses: Vec<CategoryShare>,
    /// Largest first
    pub income: Vec<CategoryShare>,
}

/// Summary of one reporting period
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodReport {
    pub period: ReportPeriod,
    /// First day of the window
    pub start: NaiveDate,
    /// First day after the window
    pub end: NaiveDate,
    pub transaction_count: usize,
    /// Sum of amounts dated before the window
    pub opening_balance: Money,
    pub total_income: Money,
    pub total_expenses: Money,
    pub net_change: Money,
    pub closing_balance: Money,
    /// `None` when the window holds no transactions
    pub breakdown: Option<CategoryBreakdown>,
}

impl PeriodReport {
    /// Generate the report for a period
    ///
    /// The opening balance sums amounts, not stored balances, so it is
    /// independent of the order transactions were recorded in. Fails with
    /// `InvalidInput` if a total does not fit in a [`Money`].
    pub fn generate(ledger: &Ledger, period: ReportPeriod) -> LedgerResult<Self> {
        let start = period.start_date();
        let end = period.end_date();
        let transactions = ledger.snapshot();
        let out_of_range =
            || LedgerError::InvalidInput(format!("totals for {} are out of range", period));

        let opening_balance = Money::checked_sum(
            transactions
                .iter()
                .filter(|t| t.date < start)
                .map(|t| t.amount),
        )
        .ok_or_else(out_of_range)?;

        let in_window: Vec<&Transaction> = transactions
            .iter()
            .filter(|t| period.contains(t.date))
            .collect();

        let total_income = Money::checked_sum(
            in_window
                .iter()
                .filter(|t| t.is_income())
                .map(|t| t.amount),
        )
        .ok_or_else(out_of_range)?;
        let total_expenses = Money::checked_sum(
            in_window
                .iter()
                .filter(|t| t.is_expense())
                .map(|t| t.amount),
        )
        .ok_or_else(out_of_range)?;
        let net_change = total_income
            .checked_add(total_expenses)
            .ok_or_else(out_of_range)?;
        let closing_balance = opening_balance
            .checked_add(net_change)
            .ok_or_else(out_of_range)?;

        let breakdown = if in_window.is_empty() {
            None
        } else {
            let mut expenses = group_by_category(
                in_window.iter().copied().filter(|t| t.is_expense()),
                total_expenses,
            )
            .ok_or_else(out_of_range)?;
            let mut income = group_by_category(
                in_window.iter().copied().filter(|t| t.is_income()),
                total_income,
            )
            .ok_or_else(out_of_range)?;
            // Stable sorts over name-ordered groups, so ties stay alphabetical
            expenses.sort_by_key(|s| s.amount);
            income.sort_by(|a, b| b.amount.cmp(&a.amount));
            Some(CategoryBreakdown { expenses, income })
        };

        Ok(Self {
            period,
            start,
            end,
            transaction_count: in_window.len(),
            opening_balance,
            total_income,
            total_expenses,
            net_change,
            closing_balance,
            breakdown,
        })
    }

    /// Heading line, e.g. "Monthly Report 2024-01"
    pub fn title(&self) -> String {
        match self.period.kind() {
            PeriodKind::Month { .. } => format!("Monthly Report {}", self.period),
            PeriodKind::Year { .. } => format!("Yearly Report {}", self.period),
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, symbol: &str) -> String {
        let money = |m: Money| m.format_with_symbol(symbol);
        let (opening, net, closing) = if self.period.is_monthly() {
            ("Opening balance", "Net for month", "Closing balance")
        } else {
            ("Start of year balance", "Net for year", "End of year balance")
        };

        let mut output = String::new();
        output.push_str(&format!("{}\n", self.title()));
        output.push_str(&"=".repeat(50));
        output.push('\n');
        output.push_str(&format!("{:<25} {:>15}\n", opening, money(self.opening_balance)));
        output.push_str(&format!("{:<25} {:>15}\n", "Total income", money(self.total_income)));
        output.push_str(&format!(
            "{:<25} {:>15}\n",
            "Total expenses",
            money(self.total_expenses)
        ));
        output.push_str(&format!("{:<25} {:>15}\n", net, money(self.net_change)));
        output.push_str(&format!("{:<25} {:>15}\n", closing, money(self.closing_balance)));

        if let Some(breakdown) = &self.breakdown {
            for (heading, shares) in [
                ("Expenses by category", &breakdown.expenses),
                ("Income by category", &breakdown.income),
            ] {
                output.push_str(&format!("\n{}\n", heading));
                output.push_str(&"-".repeat(50));
                output.push('\n');
                for share in shares {
                    output.push_str(&format!(
                        "  {:<23} {:>15} {:>7.2}%\n",
                        share.category,
                        money(share.amount),
                        share.percent
                    ));
                }
            }
        }

        output
    }

    /// Export the report to CSV format
    ///
    /// Summary lines first, then one line per category share.
    pub fn export_csv<W: Write>(&self, writer: W) -> LedgerResult<()> {
        let mut csv = csv::Writer::from_writer(writer);
        let export_err = |e: csv::Error| LedgerError::Export(e.to_string());

        csv.write_record(["Period", "Section", "Category", "Amount", "Percentage"])
            .map_err(export_err)?;

        let period = self.period.to_string();
        for (label, amount) in [
            ("Opening Balance", self.opening_balance),
            ("Total Income", self.total_income),
            ("Total Expenses", self.total_expenses),
            ("Net Change", self.net_change),
            ("Closing Balance", self.closing_balance),
        ] {
            csv.write_record([
                period.as_str(),
                "Summary",
                label,
                amount.to_decimal_string().as_str(),
                "",
            ])
            .map_err(export_err)?;
        }

        if let Some(breakdown) = &self.breakdown {
            for (section, shares) in [("Expense", &breakdown.expenses), ("Income", &breakdown.income)]
            {
                for share in shares {
                    csv.write_record([
                        period.as_str(),
                        section,
                        share.category.as_str(),
                        share.amount.to_decimal_string().as_str(),
                        format!("{:.2}", share.percent).as_str(),
                    ])
                    .map_err(export_err)?;
                }
            }
        }

        csv.flush()
            .map_err(|e| LedgerError::Export(e.to_string()))?;
        Ok(())
    }
}

/// Sum amounts per category, in category-name order
///
/// `None` if a category total overflows.
fn group_by_category<'a>(
    transactions: impl Iterator<Item = &'a Transaction>,
    total: Money,
) -> Option<Vec<CategoryShare>> {
    let mut totals: BTreeMap<&str, Money> = BTreeMap::new();
    for txn in transactions {
        let sum = totals.entry(txn.category.as_str()).or_default();
        *sum = sum.checked_add(txn.amount)?;
    }

    Some(
        totals
            .into_iter()
            .map(|(category, amount)| CategoryShare {
                category: category.to_string(),
                amount,
                percent: amount.percent_of(total),
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn month(y: i32, m: u32) -> ReportPeriod {
        ReportPeriod::month(y, m).unwrap()
    }

    fn year(y: i32) -> ReportPeriod {
        ReportPeriod::year(y).unwrap()
    }

    fn scenario_ledger() -> Ledger {
        let mut ledger = Ledger::new();
        ledger.record(date(2024, 1, 5), Money::from_units(1000), "Salary", "").unwrap();
        ledger.record(date(2024, 1, 10), Money::from_units(-200), "Food", "").unwrap();
        ledger.record(date(2024, 2, 1), Money::from_units(-50), "Food", "").unwrap();
        ledger
    }

    #[test]
    fn test_monthly_report() {
        let ledger = scenario_ledger();
        let report = PeriodReport::generate(&ledger, month(2024, 1)).unwrap();

        assert_eq!(report.transaction_count, 2);
        assert_eq!(report.opening_balance, Money::zero());
        assert_eq!(report.total_income, Money::from_units(1000));
        assert_eq!(report.total_expenses, Money::from_units(-200));
        assert_eq!(report.net_change, Money::from_units(800));
        assert_eq!(report.closing_balance, Money::from_units(800));

        let breakdown = report.breakdown.unwrap();
        assert_eq!(breakdown.expenses.len(), 1);
        assert_eq!(breakdown.expenses[0].category, "Food");
        assert_eq!(breakdown.expenses[0].amount, Money::from_units(-200));
        assert!((breakdown.expenses[0].percent - 100.0).abs() < 1e-9);
        assert_eq!(breakdown.income[0].category, "Salary");
    }

    #[test]
    fn test_next_month_opening_balance() {
        let ledger = scenario_ledger();
        let report = PeriodReport::generate(&ledger, month(2024, 2)).unwrap();

        assert_eq!(report.opening_balance, Money::from_units(800));
        assert_eq!(report.total_income, Money::zero());
        assert_eq!(report.closing_balance, Money::from_units(750));

        let breakdown = report.breakdown.unwrap();
        assert!(breakdown.income.is_empty());
        assert_eq!(breakdown.expenses.len(), 1);
    }

    #[test]
    fn test_empty_yearly_report() {
        let report = PeriodReport::generate(&Ledger::new(), year(2024)).unwrap();

        assert_eq!(report.transaction_count, 0);
        assert_eq!(report.opening_balance, Money::zero());
        assert_eq!(report.total_income, Money::zero());
        assert_eq!(report.total_expenses, Money::zero());
        assert_eq!(report.closing_balance, Money::zero());
        assert!(report.breakdown.is_none());
    }

    #[test]
    fn test_december_window() {
        let mut ledger = Ledger::new();
        ledger.record(date(2024, 12, 31), Money::from_units(-10), "Gifts", "").unwrap();
        ledger.record(date(2025, 1, 1), Money::from_units(-20), "Gifts", "").unwrap();

        let report = PeriodReport::generate(&ledger, month(2024, 12)).unwrap();
        assert_eq!(report.transaction_count, 1);
        assert_eq!(report.total_expenses, Money::from_units(-10));
        assert_eq!(report.end, date(2025, 1, 1));
    }

    #[test]
    fn test_breakdown_ordering_and_percentages() {
        let mut ledger = Ledger::new();
        ledger.record(date(2024, 5, 1), Money::from_units(-30), "Rent", "").unwrap();
        ledger.record(date(2024, 5, 2), Money::from_units(-60), "Food", "").unwrap();
        ledger.record(date(2024, 5, 3), Money::from_units(-10), "Bus", "").unwrap();
        ledger.record(date(2024, 5, 4), Money::from_units(-10), "Art", "").unwrap();
        ledger.record(date(2024, 5, 5), Money::from_units(100), "Gift", "").unwrap();
        ledger.record(date(2024, 5, 6), Money::from_units(300), "Salary", "").unwrap();

        let report = PeriodReport::generate(&ledger, year(2024)).unwrap();
        let breakdown = report.breakdown.unwrap();

        let expense_order: Vec<&str> = breakdown.expenses.iter().map(|s| s.category.as_str()).collect();
        assert_eq!(expense_order, vec!["Food", "Rent", "Art", "Bus"]);

        let income_order: Vec<&str> = breakdown.income.iter().map(|s| s.category.as_str()).collect();
        assert_eq!(income_order, vec!["Salary", "Gift"]);
        assert!((breakdown.income[0].percent - 75.0).abs() < 1e-9);

        let expense_total: f64 = breakdown.expenses.iter().map(|s| s.percent).sum();
        assert!((expense_total - 100.0).abs() < 1e-6);
    }

    #[test]
    fn test_closing_is_opening_plus_net() {
        let mut ledger = Ledger::new();
        ledger.record(date(2024, 3, 1), Money::from_units(100), "Salary", "").unwrap();
        // Recorded after, dated before
        ledger.record(date(2023, 12, 1), Money::from_units(-30), "Food", "").unwrap();
        ledger.record(date(2024, 3, 9), Money::from_cents(-1234), "Food", "").unwrap();

        let report = PeriodReport::generate(&ledger, month(2024, 3)).unwrap();
        assert_eq!(report.opening_balance, Money::from_units(-30));
        let expected = Money::checked_sum([
            report.opening_balance,
            report.total_income,
            report.total_expenses,
        ]);
        assert_eq!(Some(report.closing_balance), expected);
    }

    #[test]
    fn test_totals_out_of_range() {
        let huge = Money::from_cents(i64::MAX / 2 + 1);
        let txn = |id: u64, category: &str| {
            Transaction::new(
                crate::models::TransactionId::new(id),
                date(2024, 4, id as u32),
                huge,
                category,
                "",
                huge,
            )
        };
        let ledger = Ledger::from_transactions(vec![txn(1, "Salary"), txn(2, "Bonus")]);

        let err = PeriodReport::generate(&ledger, month(2024, 4)).unwrap_err();
        assert!(err.is_invalid_input());
        assert!(err.to_string().contains("2024-04"));

        // Income before the window lands in the opening balance instead
        let err = PeriodReport::generate(&ledger, month(2024, 5)).unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_format_terminal() {
        let report = PeriodReport::generate(&scenario_ledger(), month(2024, 1)).unwrap();
        let output = report.format_terminal("$");

        assert!(output.starts_with("Monthly Report 2024-01"));
        assert!(output.contains("$1000.00"));
        assert!(output.contains("-$200.00"));
        assert!(output.contains("Expenses by category"));
        assert!(output.contains("100.00%"));
    }

    #[test]
    fn test_format_terminal_without_breakdown() {
        let report = PeriodReport::generate(&Ledger::new(), year(2024)).unwrap();
        let output = report.format_terminal("$");

        assert!(output.starts_with("Yearly Report 2024"));
        assert!(!output.contains("by category"));
    }

    #[test]
    fn test_export_csv() {
        let report = PeriodReport::generate(&scenario_ledger(), month(2024, 1)).unwrap();
        let mut buffer = Vec::new();
        report.export_csv(&mut buffer).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Period,Section,Category,Amount,Percentage");
        assert_eq!(lines[1], "2024-01,Summary,Opening Balance,0.00,");
        assert!(lines.contains(&"2024-01,Expense,Food,-200.00,100.00"));
        assert!(lines.contains(&"2024-01,Income,Salary,1000.00,100.00"));
    }
}
