//! Transaction identifiers
//!
//! Ids are positive integers handed out by the ledger's counter, so they are
//! also the order in which transactions were recorded. They stay below 2^53
//! so a spreadsheet number holds any id exactly.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a recorded transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(u64);

impl TransactionId {
    /// The first id a fresh ledger hands out
    pub const FIRST: TransactionId = TransactionId(1);

    /// The largest id a file or the ledger may carry
    pub const MAX: TransactionId = TransactionId((1 << 53) - 1);

    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn value(&self) -> u64 {
        self.0
    }

    /// The id that follows this one
    ///
    /// The result may be past [`TransactionId::MAX`]; the ledger refuses to
    /// hand such an id out.
    pub const fn next(&self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// An id read from a file, if it is in `1..=MAX`
    pub fn from_value(value: u64) -> Option<Self> {
        (1..=Self::MAX.0).contains(&value).then_some(Self(value))
    }

    /// Parse an id as written by a tabular file
    ///
    /// Spreadsheet tools often promote integer columns to floats, so "7.0"
    /// is accepted alongside "7". Zero, negative, fractional or too large
    /// values are not.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if let Ok(n) = s.parse::<u64>() {
            return Self::from_value(n);
        }
        s.parse::<f64>().ok().and_then(Self::from_f64)
    }

    /// Convert a spreadsheet number to an id
    pub fn from_f64(value: f64) -> Option<Self> {
        (value.is_finite() && value >= 1.0 && value.fract() == 0.0 && value <= Self::MAX.0 as f64)
            .then(|| Self(value as u64))
    }
}

impl Default for TransactionId {
    fn default() -> Self {
        Self::FIRST
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next() {
        assert_eq!(TransactionId::FIRST.next(), TransactionId::new(2));
        assert_eq!(TransactionId::new(u64::MAX).next(), TransactionId::new(u64::MAX));
        assert!(TransactionId::MAX.next() > TransactionId::MAX);
    }

    #[test]
    fn test_parse_integer_and_float_forms() {
        assert_eq!(TransactionId::parse("7"), Some(TransactionId::new(7)));
        assert_eq!(TransactionId::parse(" 7.0 "), Some(TransactionId::new(7)));
        assert_eq!(TransactionId::parse("0"), None);
        assert_eq!(TransactionId::parse("-3"), None);
        assert_eq!(TransactionId::parse("2.5"), None);
        assert_eq!(TransactionId::parse("abc"), None);
    }

    #[test]
    fn test_parse_rejects_ids_past_max() {
        assert_eq!(
            TransactionId::parse("9007199254740991"),
            Some(TransactionId::MAX)
        );
        assert_eq!(TransactionId::parse("9007199254740992"), None);
        assert_eq!(TransactionId::parse("18446744073709551615"), None);
        assert_eq!(TransactionId::parse("1.8446744073709552e19"), None);
        assert_eq!(TransactionId::from_f64(9007199254740992.0), None);
        assert_eq!(TransactionId::from_value(0), None);
    }

    #[test]
    fn test_ordering() {
        assert!(TransactionId::new(3) > TransactionId::new(2));
    }

    #[test]
    fn test_serialization() {
        let id = TransactionId::new(42);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "42");
        let back: TransactionId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
