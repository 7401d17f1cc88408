//! `YieldTermStructure`: discount curves.
//!
//! Any yield curve the credit analytics consume is seen through this trait:
//! discount factors and continuously-compounded zero rates as functions of
//! time from the trade date.

use isda_core::{DiscountFactor, Rate, Time};

use crate::term_structure::TermStructure;

/// A yield (interest-rate) term structure.
pub trait YieldTermStructure: TermStructure {
    /// Continuously-compounded zero rate for maturity `t`.
    fn zero_rate(&self, t: Time) -> Rate;

    /// Discount factor `P(0, t) = exp(−rt(t))`.
    fn discount(&self, t: Time) -> DiscountFactor {
        (-self.rt(t)).exp()
    }

    /// Forward discount factor `P(t1, t2) = P(0, t2) / P(0, t1)`.
    fn forward_discount(&self, t1: Time, t2: Time) -> DiscountFactor {
        (self.rt(t1) - self.rt(t2)).exp()
    }
}
