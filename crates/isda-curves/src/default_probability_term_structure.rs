//! `DefaultProbabilityTermStructure`: survival curves.
//!
//! Survival probabilities are `Q(t) = exp(−rt(t))` where `rt` integrates the
//! forward hazard rate; `hazard_rate(t)` is the *zero* (average) hazard rate
//! `rt(t)/t`, which is how ISDA credit curves are quoted.

use isda_core::{Probability, Real, Time};

use crate::term_structure::TermStructure;

/// Hazard rate type alias.
pub type HazardRate = Real;

/// A default-probability term structure.
pub trait DefaultProbabilityTermStructure: TermStructure {
    /// Zero hazard rate `rt(t)/t`.
    fn hazard_rate(&self, t: Time) -> HazardRate;

    /// Survival probability `Q(t) = P(τ > t)`.
    fn survival_probability(&self, t: Time) -> Probability {
        (-self.rt(t)).exp()
    }

    /// Cumulative default probability `1 − Q(t)`.
    fn default_probability(&self, t: Time) -> Probability {
        1.0 - self.survival_probability(t)
    }

    /// Probability of surviving to `t2` having survived to `t1`.
    fn conditional_survival_probability(&self, t1: Time, t2: Time) -> Probability {
        (self.rt(t1) - self.rt(t2)).exp()
    }
}
