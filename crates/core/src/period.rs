use chrono::{Datelike, Duration, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::transaction::Transaction;

/// Inclusive date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        DateRange { start, end }
    }

    pub fn contains(self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

/// A relative or absolute reporting window. `Custom` bounds are optional
/// because they come straight from a form; a half-filled range fails open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Window {
    All,
    Today,
    ThisWeek,
    ThisMonth,
    LastThreeMonths,
    LastSixMonths,
    ThisYear,
    Custom {
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    },
}

impl Window {
    /// Resolve to a concrete range relative to `today`. `None` means
    /// unfiltered: all-time, or a custom range with a missing bound.
    pub fn resolve(self, today: NaiveDate) -> Option<DateRange> {
        match self {
            Window::All => None,
            Window::Today => Some(DateRange::new(today, today)),
            Window::ThisWeek => {
                let monday =
                    today - Duration::days(i64::from(today.weekday().num_days_from_monday()));
                Some(DateRange::new(monday, today))
            }
            Window::ThisMonth => {
                let first = today.with_day(1).unwrap_or(today);
                Some(DateRange::new(first, today))
            }
            Window::LastThreeMonths => {
                let start = today.checked_sub_months(Months::new(3)).unwrap_or(today);
                Some(DateRange::new(start, today))
            }
            Window::LastSixMonths => {
                let start = today.checked_sub_months(Months::new(6)).unwrap_or(today);
                Some(DateRange::new(start, today))
            }
            Window::ThisYear => {
                let first = NaiveDate::from_ymd_opt(today.year(), 1, 1).unwrap_or(today);
                Some(DateRange::new(first, today))
            }
            Window::Custom {
                start: Some(start),
                end: Some(end),
            } => Some(DateRange::new(start, end)),
            Window::Custom { .. } => None,
        }
    }
}

/// Keep the transactions whose date falls inside the window. "Today" is
/// supplied by the caller and evaluated once for the whole pass.
pub fn filter_window(
    transactions: &[Transaction],
    window: Window,
    today: NaiveDate,
) -> Vec<Transaction> {
    match window.resolve(today) {
        None => transactions.to_vec(),
        Some(range) => transactions
            .iter()
            .filter(|tx| range.contains(tx.date))
            .cloned()
            .collect(),
    }
}
