//! Business-day convention.

use isda_core::errors::{Error, Result};

/// How to adjust a date that falls on a non-business day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BusinessDayConvention {
    /// Choose the first business day after the given holiday.
    #[default]
    Following,
    /// Choose the first business day after the given holiday unless it belongs
    /// to a different month; in that case choose the first business day before
    /// the holiday.
    ModifiedFollowing,
    /// Choose the first business day before the given holiday.
    Preceding,
    /// Choose the first business day before the given holiday unless it belongs
    /// to a different month; in that case choose the first business day after
    /// the holiday.
    ModifiedPreceding,
    /// Do not adjust (keep the original date).
    Unadjusted,
}

impl std::fmt::Display for BusinessDayConvention {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl BusinessDayConvention {
    /// Short code as used in ISDA curve files: `F`, `MF`, `P`, `MP`, `N`.
    pub fn code(self) -> &'static str {
        match self {
            Self::Following => "F",
            Self::ModifiedFollowing => "MF",
            Self::Preceding => "P",
            Self::ModifiedPreceding => "MP",
            Self::Unadjusted => "N",
        }
    }
}

impl std::str::FromStr for BusinessDayConvention {
    type Err = Error;

    /// Accepts the short codes and the spelled-out names, in any case.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().replace([' ', '_'], "").as_str() {
            "F" | "FOLLOWING" => Ok(Self::Following),
            "MF" | "MODIFIEDFOLLOWING" => Ok(Self::ModifiedFollowing),
            "P" | "PRECEDING" => Ok(Self::Preceding),
            "MP" | "MODIFIEDPRECEDING" => Ok(Self::ModifiedPreceding),
            "N" | "NONE" | "UNADJUSTED" => Ok(Self::Unadjusted),
            _ => Err(Error::InvalidArgument(format!(
                "unknown business-day convention '{s}'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_parse_back() {
        for c in [
            BusinessDayConvention::Following,
            BusinessDayConvention::ModifiedFollowing,
            BusinessDayConvention::Preceding,
            BusinessDayConvention::ModifiedPreceding,
            BusinessDayConvention::Unadjusted,
        ] {
            assert_eq!(c.to_string().parse::<BusinessDayConvention>().unwrap(), c);
        }
        assert_eq!(
            "Modified Following".parse::<BusinessDayConvention>().unwrap(),
            BusinessDayConvention::ModifiedFollowing
        );
        assert!("nearest".parse::<BusinessDayConvention>().is_err());
    }
}
