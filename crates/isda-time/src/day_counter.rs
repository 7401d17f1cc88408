//! `DayCounter` trait and the day-count conventions used by CDS and ISDA
//! yield curves.
//!
//! Year fractions are signed: swapping the arguments flips the sign, so
//! times measured from a trade date to earlier dates come out negative.

use isda_core::{Real, Time};

use crate::date::Date;

/// A convention for counting the fraction of a year between two dates.
pub trait DayCounter: std::fmt::Debug + Send + Sync {
    /// Human-readable name of this convention (e.g. `"ACT/365F"`).
    fn name(&self) -> &str;

    /// Number of days between `d1` and `d2` (negative if `d2 < d1`).
    fn day_count(&self, d1: Date, d2: Date) -> i64 {
        d1.days_until(d2)
    }

    /// Fraction of a year between `d1` and `d2`.
    fn year_fraction(&self, d1: Date, d2: Date) -> Time;
}

/// Actual/365 (Fixed): the ISDA curve day count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Actual365Fixed;

impl DayCounter for Actual365Fixed {
    fn name(&self) -> &str {
        "ACT/365F"
    }

    fn year_fraction(&self, d1: Date, d2: Date) -> Time {
        self.day_count(d1, d2) as Real / 365.0
    }
}

/// Actual/360: the CDS premium accrual and money-market day count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Actual360;

impl DayCounter for Actual360 {
    fn name(&self) -> &str {
        "ACT/360"
    }

    fn year_fraction(&self, d1: Date, d2: Date) -> Time {
        self.day_count(d1, d2) as Real / 360.0
    }
}

/// 30/360 (Bond Basis), the fixed-leg day count of ISDA swap instruments.
///
/// `day_count = 360(Y2−Y1) + 30(M2−M1) + (D2−D1)` with D1 = 31 → 30 and
/// D2 = 31 → 30 when D1 ≥ 30.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Thirty360;

impl DayCounter for Thirty360 {
    fn name(&self) -> &str {
        "30/360"
    }

    fn day_count(&self, d1: Date, d2: Date) -> i64 {
        if d2 < d1 {
            return -self.day_count(d2, d1);
        }
        let mut dd1 = i64::from(d1.day_of_month());
        let mut dd2 = i64::from(d2.day_of_month());
        if dd1 == 31 {
            dd1 = 30;
        }
        if dd2 == 31 && dd1 == 30 {
            dd2 = 30;
        }
        360 * i64::from(d2.year() - d1.year())
            + 30 * (i64::from(d2.month()) - i64::from(d1.month()))
            + (dd2 - dd1)
    }

    fn year_fraction(&self, d1: Date, d2: Date) -> Time {
        self.day_count(d1, d2) as Real / 360.0
    }
}

/// Actual/Actual (ISDA): splits the period at year boundaries and divides
/// each piece by the length of its year.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActualActualIsda;

impl DayCounter for ActualActualIsda {
    fn name(&self) -> &str {
        "ACT/ACT ISDA"
    }

    fn year_fraction(&self, d1: Date, d2: Date) -> Time {
        if d2 < d1 {
            return -self.year_fraction(d2, d1);
        }
        let (y1, y2) = (d1.year(), d2.year());
        let days_in = |y: i32| if is_leap_year(y) { 366.0 } else { 365.0 };
        if y1 == y2 {
            return d1.days_until(d2) as Real / days_in(y1);
        }
        // Whole years in between count as 1 each.
        let Ok(start_next) = Date::from_ymd(y1 + 1, 1, 1) else {
            return d1.days_until(d2) as Real / 365.0;
        };
        let Ok(start_last) = Date::from_ymd(y2, 1, 1) else {
            return d1.days_until(d2) as Real / 365.0;
        };
        d1.days_until(start_next) as Real / days_in(y1)
            + Real::from(y2 - y1 - 1)
            + start_last.days_until(d2) as Real / days_in(y2)
    }
}

/// Whether a given year is a leap year.
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn actual365_fixed() {
        let dc = Actual365Fixed;
        let d1 = date(2023, 1, 1);
        let d2 = date(2024, 1, 1);
        assert_eq!(dc.day_count(d1, d2), 365);
        assert_abs_diff_eq!(dc.year_fraction(d1, d2), 1.0, epsilon = 1e-15);
        assert_abs_diff_eq!(dc.year_fraction(d2, d1), -1.0, epsilon = 1e-15);
    }

    #[test]
    fn actual360() {
        let dc = Actual360;
        assert_abs_diff_eq!(
            dc.year_fraction(date(2013, 3, 20), date(2013, 4, 26)),
            37.0 / 360.0,
            epsilon = 1e-15
        );
    }

    #[test]
    fn thirty360() {
        let dc = Thirty360;
        assert_eq!(dc.day_count(date(2023, 1, 1), date(2024, 1, 1)), 360);
        assert_eq!(dc.day_count(date(2013, 1, 31), date(2013, 3, 31)), 60);
        assert_eq!(dc.day_count(date(2013, 1, 15), date(2013, 3, 31)), 76);
        assert_eq!(dc.day_count(date(2013, 3, 31), date(2013, 1, 31)), -60);
    }

    #[test]
    fn actual_actual_isda() {
        let dc = ActualActualIsda;
        assert_abs_diff_eq!(dc.year_fraction(date(2023, 1, 1), date(2024, 1, 1)), 1.0, epsilon = 1e-15);
        let expected = 185.0 / 365.0 + 1.0 + 182.0 / 366.0;
        assert_abs_diff_eq!(
            dc.year_fraction(date(2022, 6, 30), date(2024, 7, 1)),
            expected,
            epsilon = 1e-14
        );
    }
}
