//! `YieldCurve`: the ISDA discount curve.

use isda_core::{errors::Result, Rate, Real, Time};

use crate::isda_curve::IsdaCurve;
use crate::term_structure::TermStructure;
use crate::yield_term_structure::YieldTermStructure;

/// A discount curve with linear `r·t` interpolation between knots.
///
/// # Example
/// ```
/// use isda_curves::{YieldCurve, YieldTermStructure};
/// let yc = YieldCurve::new(&[1.0, 5.0], &[0.01, 0.02]).unwrap();
/// assert!((yc.discount(1.0) - (-0.01f64).exp()).abs() < 1e-15);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct YieldCurve {
    curve: IsdaCurve,
}

impl YieldCurve {
    /// Build from knot times and continuously-compounded zero rates.
    pub fn new(times: &[Time], rates: &[Rate]) -> Result<Self> {
        Ok(Self {
            curve: IsdaCurve::new(times, rates)?,
        })
    }

    /// A flat curve.
    pub fn flat(rate: Rate) -> Self {
        Self {
            curve: IsdaCurve::flat(rate),
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

    /// Zero rates at the knots.
    pub fn zero_rates(&self) -> &[Rate] {
        self.curve.zero_rates()
    }

    /// Instantaneous forward rate at `t`.
    pub fn forward_rate(&self, t: Time) -> Rate {
        self.curve.forward_rate(t)
    }

    /// A copy with knot `index` set to `rate`.
    pub fn with_rate(&self, rate: Rate, index: usize) -> Result<Self> {
        Ok(Self {
            curve: self.curve.with_rate(rate, index)?,
        })
    }

    /// Re-base the curve so that time zero is `offset` on this curve.
    pub fn with_offset(&self, offset: Time) -> Result<Self> {
        Ok(Self {
            curve: self.curve.with_offset(offset)?,
        })
    }
}

impl TermStructure for YieldCurve {
    fn knot_times(&self) -> &[Time] {
        self.curve.knot_times()
    }

    fn rt(&self, t: Time) -> Real {
        self.curve.rt(t)
    }
}

impl YieldTermStructure for YieldCurve {
    fn zero_rate(&self, t: Time) -> Rate {
        self.curve.zero_rate(t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn discount_and_zero_rate() {
        let yc = YieldCurve::new(&[1.0, 2.0], &[0.02, 0.03]).unwrap();
        assert_abs_diff_eq!(yc.discount(2.0), (-0.06f64).exp(), epsilon = 1e-15);
        assert_abs_diff_eq!(yc.zero_rate(1.5), 0.04 / 1.5, epsilon = 1e-15);
        assert_abs_diff_eq!(yc.forward_rate(1.5), 0.04, epsilon = 1e-15);
        assert_abs_diff_eq!(
            yc.forward_discount(1.0, 2.0),
            yc.discount(2.0) / yc.discount(1.0),
            epsilon = 1e-15
        );
    }

    #[test]
    fn usable_as_trait_object() {
        let yc: Box<dyn YieldTermStructure> = Box::new(YieldCurve::flat(0.05));
        assert_eq!(yc.num_knots(), 1);
        assert_abs_diff_eq!(yc.discount(10.0), (-0.5f64).exp(), epsilon = 1e-15);
        assert_eq!(yc.max_knot_time(), 1.0);
    }
}
