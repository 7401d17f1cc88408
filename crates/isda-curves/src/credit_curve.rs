//! `CreditCurve`: the ISDA survival curve.
//!
//! Knots carry zero hazard rates; survival is exponential between knots and
//! the forward hazard rate is piecewise constant. A curve calibrated with
//! `ArbitrageHandling::Ignore` may have negative forward hazard rates, that
//! is, survival probabilities that increase with time; such curves are
//! returned as-is and [`CreditCurve::has_non_negative_forwards`] tells them
//! apart.

use isda_core::{errors::Result, Rate, Real, Time};

use crate::default_probability_term_structure::{DefaultProbabilityTermStructure, HazardRate};
use crate::isda_curve::IsdaCurve;
use crate::term_structure::TermStructure;

/// A credit curve of zero hazard rates at knot times.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CreditCurve {
    curve: IsdaCurve,
}

impl CreditCurve {
    /// Build from knot times and zero hazard rates.
    pub fn new(times: &[Time], hazard_rates: &[Rate]) -> Result<Self> {
        Ok(Self {
            curve: IsdaCurve::new(times, hazard_rates)?,
        })
    }

    /// A flat hazard-rate curve.
    pub fn flat(hazard_rate: Rate) -> Self {
        Self {
            curve: IsdaCurve::flat(hazard_rate),
        }
    }

    /// Wrap an existing curve.
    pub fn from_curve(curve: IsdaCurve) -> Self {
        Self { curve }
    }

    /// The underlying knots.
    pub fn curve(&self) -> &IsdaCurve {
        &self.curve
    }

    /// Zero hazard rates at the knots.
    pub fn zero_rates(&self) -> &[Rate] {
        self.curve.zero_rates()
    }

    /// `r_i·t_i` at the knots.
    pub fn knot_rts(&self) -> &[Real] {
        self.curve.knot_rts()
    }

    /// Instantaneous forward hazard rate at `t` (left segment at knots).
    pub fn forward_rate(&self, t: Time) -> Rate {
        self.curve.forward_rate(t)
    }

    /// Return `true` if no segment has a negative forward hazard rate.
    pub fn has_non_negative_forwards(&self) -> bool {
        self.curve.segment_forwards().iter().all(|&f| f >= 0.0)
    }

    /// Overwrite the zero hazard rate of knot `index` in place.
    pub fn set_rate(&mut self, index: usize, rate: Rate) -> Result<()> {
        self.curve.set_rate(index, rate)
    }

    /// A copy with knot `index` set to `rate`.
    pub fn with_rate(&self, rate: Rate, index: usize) -> Result<Self> {
        Ok(Self {
            curve: self.curve.with_rate(rate, index)?,
        })
    }

    /// A copy with the same knots and new zero hazard rates.
    pub fn with_rates(&self, rates: &[Rate]) -> Result<Self> {
        Ok(Self {
            curve: self.curve.with_rates(rates)?,
        })
    }

    /// Re-base the curve so that time zero is `offset` on this curve.
    pub fn with_offset(&self, offset: Time) -> Result<Self> {
        Ok(Self {
            curve: self.curve.with_offset(offset)?,
        })
    }
}

impl TermStructure for CreditCurve {
    fn knot_times(&self) -> &[Time] {
        self.curve.knot_times()
    }

    fn rt(&self, t: Time) -> Real {
        self.curve.rt(t)
    }
}

impl DefaultProbabilityTermStructure for CreditCurve {
    fn hazard_rate(&self, t: Time) -> HazardRate {
        self.curve.zero_rate(t)
    }
}
