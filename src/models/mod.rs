//! Core data models for ledgerbook
//!
//! Money, transactions, the ledger that owns them, and reporting periods.

pub mod ids;
pub mod ledger;
pub mod money;
pub mod period;
pub mod transaction;

pub use ids::TransactionId;
pub use ledger::Ledger;
pub use money::{Money, MoneyParseError};
pub use period::{PeriodKind, PeriodParseError, ReportPeriod};
pub use transaction::{parse_date, Transaction};
