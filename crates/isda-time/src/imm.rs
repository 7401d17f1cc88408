//! CDS IMM roll dates.
//!
//! Standard CDS contracts roll on the 20th of March, June, September and
//! December. Unlike the futures IMM dates these are fixed calendar days, not
//! weekdays, and they are *not* business-day adjusted here: callers adjust
//! when a contract requires it.

use isda_core::errors::Result;

use crate::date::Date;
use crate::period::Period;

/// Day of month of a CDS roll date.
pub const IMM_DAY: u32 = 20;

/// CDS roll-date utilities.
pub struct CdsImm;

impl CdsImm {
    /// Return `true` if `date` is a CDS roll date (20 Mar/Jun/Sep/Dec).
    pub fn is_imm_date(date: Date) -> bool {
        date.day_of_month() == IMM_DAY && date.month() % 3 == 0
    }

    /// The first roll date strictly after `date`.
    pub fn next_date(date: Date) -> Result<Date> {
        let (year, month, day) = (date.year(), date.month(), date.day_of_month());
        if month % 3 == 0 {
            if day < IMM_DAY {
                Date::from_ymd(year, month, IMM_DAY)
            } else if month != 12 {
                Date::from_ymd(year, month + 3, IMM_DAY)
            } else {
                Date::from_ymd(year + 1, 3, IMM_DAY)
            }
        } else {
            Date::from_ymd(year, 3 * (month / 3 + 1), IMM_DAY)
        }
    }

    /// The last roll date strictly before `date`.
    pub fn prev_date(date: Date) -> Result<Date> {
        let (year, month, day) = (date.year(), date.month(), date.day_of_month());
        if month % 3 == 0 {
            if day > IMM_DAY {
                Date::from_ymd(year, month, IMM_DAY)
            } else if month != 3 {
                Date::from_ymd(year, month - 3, IMM_DAY)
            } else {
                Date::from_ymd(year - 1, 12, IMM_DAY)
            }
        } else if month < 3 {
            Date::from_ymd(year - 1, 12, IMM_DAY)
        } else {
            Date::from_ymd(year, 3 * (month / 3), IMM_DAY)
        }
    }

    /// Maturity of a standard CDS of the given tenor traded on `trade_date`:
    /// the next roll date plus the tenor.
    pub fn maturity_for_tenor(trade_date: Date, tenor: Period) -> Result<Date> {
        Self::next_date(trade_date)?.plus(tenor)
    }

    /// Maturities for a strip of tenors, see [`maturity_for_tenor`](Self::maturity_for_tenor).
    pub fn maturities_for_tenors(trade_date: Date, tenors: &[Period]) -> Result<Vec<Date>> {
        let next = Self::next_date(trade_date)?;
        tenors.iter().map(|&t| next.plus(t)).collect()
    }
}
