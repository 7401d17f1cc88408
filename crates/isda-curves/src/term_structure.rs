//! `TermStructure`: base trait of the curves in this crate.
//!
//! Curves are functions of time in years from their base date (the trade date
//! for everything this workspace builds). The primitive every curve provides
//! is `rt(t)`, the integrated rate from `0` to `t`.

use isda_core::{Real, Time};

/// Base trait for ISDA term structures.
pub trait TermStructure: std::fmt::Debug + Send + Sync {
    /// The knot times of the curve, strictly increasing.
    fn knot_times(&self) -> &[Time];

    /// Integrated rate `∫₀ᵗ f(s) ds`.
    fn rt(&self, t: Time) -> Real;

    /// Number of knots.
    fn num_knots(&self) -> usize {
        self.knot_times().len()
    }

    /// The last knot time, beyond which the curve is extrapolated.
    fn max_knot_time(&self) -> Time {
        self.knot_times().last().copied().unwrap_or(0.0)
    }
}
