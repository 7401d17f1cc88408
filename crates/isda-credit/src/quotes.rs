//! CDS market quotes.
//!
//! A CDS trades either at its par spread, or with a fixed coupon plus an
//! upfront amount. The upfront can be quoted directly as points upfront or
//! indirectly as a quoted spread: the flat-curve par spread that reproduces
//! it.

use isda_core::Real;

/// Par spread: the coupon at which the CDS has zero upfront value.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParSpread {
    /// Spread as a decimal (0.01 = 100 bps).
    pub spread: Real,
}

impl ParSpread {
    /// A par-spread quote.
    pub fn new(spread: Real) -> Self {
        Self { spread }
    }
}

/// Quoted (flat) spread for a fixed-coupon CDS.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QuotedSpread {
    /// Contract coupon.
    pub coupon: Real,
    /// Spread of the flat credit curve that prices the contract.
    pub quoted_spread: Real,
}

impl QuotedSpread {
    /// A quoted-spread quote.
    pub fn new(coupon: Real, quoted_spread: Real) -> Self {
        Self {
            coupon,
            quoted_spread,
        }
    }
}

/// Points upfront for a fixed-coupon CDS.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PointsUpFront {
    /// Contract coupon.
    pub coupon: Real,
    /// Clean upfront per unit notional, paid by the protection buyer.
    pub puf: Real,
}

impl PointsUpFront {
    /// A points-upfront quote.
    pub fn new(coupon: Real, puf: Real) -> Self {
        Self { coupon, puf }
    }

    /// Build from a clean price quoted per 100 notional.
    pub fn from_clean_price(coupon: Real, price: Real) -> Self {
        Self {
            coupon,
            puf: 1.0 - price / 100.0,
        }
    }

    /// Clean price per 100 notional, `100·(1 − puf)`.
    pub fn clean_price(&self) -> Real {
        100.0 * (1.0 - self.puf)
    }
}

/// Any of the three quote conventions.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CdsQuote {
    /// Par spread.
    ParSpread(ParSpread),
    /// Quoted spread.
    QuotedSpread(QuotedSpread),
    /// Points upfront.
    PointsUpFront(PointsUpFront),
}

impl CdsQuote {
    /// The running coupon. A par spread is its own coupon.
    pub fn coupon(&self) -> Real {
        match self {
            Self::ParSpread(q) => q.spread,
            Self::QuotedSpread(q) => q.coupon,
            Self::PointsUpFront(q) => q.coupon,
        }
    }
}

impl From<ParSpread> for CdsQuote {
    fn from(q: ParSpread) -> Self {
        Self::ParSpread(q)
    }
}

impl From<QuotedSpread> for CdsQuote {
    fn from(q: QuotedSpread) -> Self {
        Self::QuotedSpread(q)
    }
}

impl From<PointsUpFront> for CdsQuote {
    fn from(q: PointsUpFront) -> Self {
        Self::PointsUpFront(q)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn coupon_of_each_quote() {
        assert_eq!(CdsQuote::from(ParSpread::new(0.012)).coupon(), 0.012);
        assert_eq!(CdsQuote::from(QuotedSpread::new(0.01, 0.015)).coupon(), 0.01);
        assert_eq!(CdsQuote::from(PointsUpFront::new(0.05, -0.02)).coupon(), 0.05);
    }

    #[test]
    fn clean_price() {
        let q = PointsUpFront::new(0.01, 0.035);
        assert_abs_diff_eq!(q.clean_price(), 96.5, epsilon = 1e-12);
        let back = PointsUpFront::from_clean_price(0.01, q.clean_price());
        assert_abs_diff_eq!(back.puf, 0.035, epsilon = 1e-15);
        // a negative upfront prices above par
        assert!(PointsUpFront::new(0.05, -0.01).clean_price() > 100.0);
    }
}
