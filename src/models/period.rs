//! Reporting periods
//!
//! A period is a calendar month or a calendar year, resolved to a half-open
//! date window `[start, end)`. The window is computed once at construction so
//! that an out-of-range year is rejected up front instead of surfacing later.

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The calendar unit a period covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PeriodKind {
    /// A calendar month (e.g., "2024-01")
    Month { year: i32, month: u32 },
    /// A calendar year (e.g., "2024")
    Year { year: i32 },
}

/// A reporting window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReportPeriod {
    kind: PeriodKind,
    start: NaiveDate,
    end: NaiveDate,
}

impl ReportPeriod {
    /// The window for one calendar month
    ///
    /// December rolls over into January of the following year.
    pub fn month(year: i32, month: u32) -> Result<Self, PeriodParseError> {
        if !(1..=12).contains(&month) {
            return Err(PeriodParseError::InvalidMonth(month));
        }
        let start =
            NaiveDate::from_ymd_opt(year, month, 1).ok_or(PeriodParseError::OutOfRange(year))?;
        let end = start
            .checked_add_months(Months::new(1))
            .ok_or(PeriodParseError::OutOfRange(year))?;

        Ok(Self {
            kind: PeriodKind::Month { year, month },
            start,
            end,
        })
    }

    /// The window for one calendar year
    pub fn year(year: i32) -> Result<Self, PeriodParseError> {
        let start = NaiveDate::from_ymd_opt(year, 1, 1).ok_or(PeriodParseError::OutOfRange(year))?;
        let end = NaiveDate::from_ymd_opt(year + 1, 1, 1).ok_or(PeriodParseError::OutOfRange(year))?;

        Ok(Self {
            kind: PeriodKind::Year { year },
            start,
            end,
        })
    }

    pub fn kind(&self) -> PeriodKind {
        self.kind
    }

    /// First day inside the window
    pub fn start_date(&self) -> NaiveDate {
        self.start
    }

    /// First day after the window (exclusive bound)
    pub fn end_date(&self) -> NaiveDate {
        self.end
    }

    /// Check if a date falls in the half-open window `[start, end)`
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date < self.end
    }

    /// Check if this is a monthly period
    pub fn is_monthly(&self) -> bool {
        matches!(self.kind, PeriodKind::Month { .. })
    }

    /// Parse a period string
    ///
    /// Formats:
    /// - Monthly: "2024-01"
    /// - Yearly: "2024"
    pub fn parse(s: &str) -> Result<Self, PeriodParseError> {
        let s = s.trim();
        let invalid = || PeriodParseError::InvalidFormat(s.to_string());

        match s.split_once('-') {
            Some((year, month)) => {
                let year: i32 = year.parse().map_err(|_| invalid())?;
                let month: u32 = month.parse().map_err(|_| invalid())?;
                Self::month(year, month)
            }
            None => {
                let year: i32 = s.parse().map_err(|_| invalid())?;
                Self::year(year)
            }
        }
    }
}

impl fmt::Display for ReportPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            PeriodKind::Month { year, month } => write!(f, "{:04}-{:02}", year, month),
            PeriodKind::Year { year } => write!(f, "{:04}", year),
        }
    }
}

/// Error type for period parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeriodParseError {
    InvalidFormat(String),
    InvalidMonth(u32),
    OutOfRange(i32),
}

impl fmt::Display for PeriodParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodParseError::InvalidFormat(s) => {
                write!(f, "Invalid period '{}', use YYYY-MM or YYYY", s)
            }
            PeriodParseError::InvalidMonth(m) => write!(f, "Invalid month: {}", m),
            PeriodParseError::OutOfRange(y) => write!(f, "Year out of range: {}", y),
        }
    }
}

impl std::error::Error for PeriodParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_month_window() {
        let jan = ReportPeriod::month(2024, 1).unwrap();
        assert_eq!(jan.start_date(), date(2024, 1, 1));
        assert_eq!(jan.end_date(), date(2024, 2, 1));
        assert!(jan.contains(date(2024, 1, 31)));
        assert!(!jan.contains(date(2024, 2, 1)));
    }

    #[test]
    fn test_december_rolls_into_next_year() {
        let dec = ReportPeriod::month(2024, 12).unwrap();
        assert_eq!(dec.end_date(), date(2025, 1, 1));
    }

    #[test]
    fn test_year_window() {
        let year = ReportPeriod::year(2024).unwrap();
        assert_eq!(year.start_date(), date(2024, 1, 1));
        assert_eq!(year.end_date(), date(2025, 1, 1));
        assert!(!year.is_monthly());
    }

    #[test]
    fn test_invalid_month() {
        assert_eq!(
            ReportPeriod::month(2024, 13),
            Err(PeriodParseError::InvalidMonth(13))
        );
        assert_eq!(
            ReportPeriod::month(2024, 0),
            Err(PeriodParseError::InvalidMonth(0))
        );
    }

    #[test]
    fn test_parse() {
        assert_eq!(
            ReportPeriod::parse("2024-01").unwrap(),
            ReportPeriod::month(2024, 1).unwrap()
        );
        assert_eq!(
            ReportPeriod::parse("2024").unwrap(),
            ReportPeriod::year(2024).unwrap()
        );
        assert!(ReportPeriod::parse("January").is_err());
        assert!(ReportPeriod::parse("2024-1x").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(ReportPeriod::month(2024, 3).unwrap().to_string(), "2024-03");
        assert_eq!(ReportPeriod::year(2024).unwrap().to_string(), "2024");
    }
}
