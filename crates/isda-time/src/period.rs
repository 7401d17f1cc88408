//! `Period`: a time span expressed in a [`TimeUnit`].

use std::str::FromStr;

use isda_core::errors::{Error, Result};

use crate::frequency::Frequency;
use crate::time_unit::TimeUnit;

/// A time span made up of an integer length and a [`TimeUnit`], e.g. a CDS
/// tenor (`5Y`) or a coupon interval (`3M`).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Period {
    /// Number of units.
    pub length: i32,
    /// The unit of time.
    pub unit: TimeUnit,
}

impl Period {
    /// Create a new period.
    pub fn new(length: i32, unit: TimeUnit) -> Self {
        Self { length, unit }
    }

    /// `n` days.
    pub fn days(n: i32) -> Self {
        Self::new(n, TimeUnit::Days)
    }

    /// `n` months.
    pub fn months(n: i32) -> Self {
        Self::new(n, TimeUnit::Months)
    }

    /// `n` years.
    pub fn years(n: i32) -> Self {
        Self::new(n, TimeUnit::Years)
    }

    /// The coupon interval of a [`Frequency`].
    pub fn from_frequency(freq: Frequency) -> Self {
        Period::months(12 / freq.periods_per_year() as i32)
    }

    /// Return `true` if the period has a positive length.
    pub fn is_positive(&self) -> bool {
        self.length > 0
    }

    /// Multiply the length by `n`, keeping the unit.
    pub fn times(self, n: i32) -> Self {
        Self::new(self.length * n, self.unit)
    }
}

impl std::ops::Neg for Period {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.length, self.unit)
    }
}

impl FromStr for Period {
    type Err = Error;

    /// Parse a tenor string such as `"3M"`, `"10Y"`, `"2W"`, `"30D"`.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let bad = || Error::InvalidArgument(format!("cannot parse '{s}' as a period"));
        let unit = match s.chars().last().ok_or_else(bad)?.to_ascii_uppercase() {
            'D' => TimeUnit::Days,
            'W' => TimeUnit::Weeks,
            'M' => TimeUnit::Months,
            'Y' => TimeUnit::Years,
            _ => return Err(bad()),
        };
        let length: i32 = s[..s.len() - 1].parse().map_err(|_| bad())?;
        Ok(Period::new(length, unit))
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.length, self.unit.code())
    }
}

impl std::fmt::Debug for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Period({self})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        assert_eq!(Period::months(3).to_string(), "3M");
        assert_eq!(Period::years(1).to_string(), "1Y");
        assert_eq!((-Period::months(6)).to_string(), "-6M");
    }

    #[test]
    fn parse_tenors() {
        assert_eq!("6M".parse::<Period>().unwrap(), Period::months(6));
        assert_eq!("10y".parse::<Period>().unwrap(), Period::years(10));
        assert_eq!(" 2W ".parse::<Period>().unwrap(), Period::new(2, TimeUnit::Weeks));
        assert_eq!("30D".parse::<Period>().unwrap(), Period::days(30));
        assert!("".parse::<Period>().is_err());
        assert!("M".parse::<Period>().is_err());
        assert!("abc".parse::<Period>().unwrap_err().is_argument_error());
    }

    #[test]
    fn from_frequency() {
        assert_eq!(Period::from_frequency(Frequency::Quarterly), Period::months(3));
        assert_eq!(Period::from_frequency(Frequency::Annual), Period::months(12));
    }
}
