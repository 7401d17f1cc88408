//! `Date` type.
//!
//! A thin value wrapper over [`chrono::NaiveDate`] exposing the date
//! arithmetic needed by CDS schedules: day and month shifts, period
//! arithmetic with end-of-month clamping, and signed day differences.

use std::str::FromStr;

use chrono::{Datelike, Days, Months, NaiveDate};
pub use chrono::Weekday;
use isda_core::errors::{Error, Result};

use crate::period::Period;
use crate::time_unit::TimeUnit;

/// A calendar date.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Date(NaiveDate);

impl Date {
    /// Earliest representable date.
    pub const MIN: Date = Date(NaiveDate::MIN);
    /// Latest representable date.
    pub const MAX: Date = Date(NaiveDate::MAX);

    // ── Constructors ─────────────────────────────────────────────────────────

    /// Create a date from year, month (1–12), and day-of-month (1–31).
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Date)
            .ok_or_else(|| Error::Date(format!("invalid date {year}-{month:02}-{day:02}")))
    }

    /// Wrap an existing `NaiveDate`.
    pub fn from_naive(date: NaiveDate) -> Self {
        Date(date)
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    /// The underlying `NaiveDate`.
    pub fn naive(&self) -> NaiveDate {
        self.0
    }

    /// Return the year.
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Return the month (1–12).
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Return the day of the month (1–31).
    pub fn day_of_month(&self) -> u32 {
        self.0.day()
    }

    /// Return the weekday.
    pub fn weekday(&self) -> Weekday {
        self.0.weekday()
    }

    // ── Arithmetic ────────────────────────────────────────────────────────────

    /// Shift by `n` calendar days (negative moves backwards).
    pub fn add_days(self, n: i64) -> Result<Self> {
        let shifted = if n >= 0 {
            self.0.checked_add_days(Days::new(n.unsigned_abs()))
        } else {
            self.0.checked_sub_days(Days::new(n.unsigned_abs()))
        };
        shifted
            .map(Date)
            .ok_or_else(|| Error::Date(format!("{self} shifted by {n} days is out of range")))
    }

    /// Shift by `n` units. Month and year shifts clamp the day to the end of
    /// the target month (31 Jan + 1M = 28/29 Feb).
    pub fn advance(self, n: i32, unit: TimeUnit) -> Result<Self> {
        match unit {
            TimeUnit::Days => self.add_days(i64::from(n)),
            TimeUnit::Weeks => self.add_days(7 * i64::from(n)),
            TimeUnit::Months => {
                let months = Months::new(n.unsigned_abs());
                let shifted = if n >= 0 {
                    self.0.checked_add_months(months)
                } else {
                    self.0.checked_sub_months(months)
                };
                shifted
                    .map(Date)
                    .ok_or_else(|| Error::Date(format!("{self} shifted by {n} months is out of range")))
            }
            TimeUnit::Years => self.advance(12 * n, TimeUnit::Months),
        }
    }

    /// `self + period`.
    pub fn plus(self, period: Period) -> Result<Self> {
        self.advance(period.length, period.unit)
    }

    /// `self - period`.
    pub fn minus(self, period: Period) -> Result<Self> {
        self.advance(-period.length, period.unit)
    }

    /// Number of calendar days from `self` to `other` (positive if `other`
    /// is later).
    pub fn days_until(self, other: Date) -> i64 {
        (other.0 - self.0).num_days()
    }

    /// Return the last day of the month containing this date.
    pub fn end_of_month(self) -> Self {
        let first = self.0.with_day(1).unwrap_or(self.0);
        first
            .checked_add_months(Months::new(1))
            .and_then(|d| d.pred_opt())
            .map(Date)
            .unwrap_or(self)
    }

    /// Return `true` if this is the last calendar day of its month.
    pub fn is_end_of_month(self) -> bool {
        self == self.end_of_month()
    }
}

// ── Arithmetic operators ──────────────────────────────────────────────────────

impl std::ops::Add<i64> for Date {
    type Output = Self;
    fn add(self, rhs: i64) -> Self {
        Date(self.0 + chrono::Duration::days(rhs))
    }
}

impl std::ops::Sub<i64> for Date {
    type Output = Self;
    fn sub(self, rhs: i64) -> Self {
        Date(self.0 - chrono::Duration::days(rhs))
    }
}

impl std::ops::Sub<Date> for Date {
    type Output = i64;
    fn sub(self, rhs: Date) -> i64 {
        rhs.days_until(self)
    }
}

// ── Parsing & display ─────────────────────────────────────────────────────────

impl FromStr for Date {
    type Err = Error;

    /// Parse an ISO 8601 date (`YYYY-MM-DD`).
    fn from_str(s: &str) -> Result<Self> {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Date)
            .map_err(|e| Error::Date(format!("cannot parse '{s}' as a date: {e}")))
    }
}

impl std::fmt::Display for Date {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl std::fmt::Debug for Date {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Date({})", self.0.format("%Y-%m-%d"))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
