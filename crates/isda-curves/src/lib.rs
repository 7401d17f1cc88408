//! # isda-curves
//!
//! Piecewise-linear `r·t` curves of the ISDA standard model: the yield curve
//! consumed by the credit analytics, the credit (survival) curve they
//! calibrate, and a bootstrap of ISDA yield curves from money-market and
//! swap rates.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// `TermStructure`: base trait for all curves.
pub mod term_structure;

/// `IsdaCurve`: knots, zero rates and linear `r·t` interpolation.
pub mod isda_curve;

/// `YieldTermStructure`: discount-curve interface.
pub mod yield_term_structure;

/// `YieldCurve`: the ISDA discount curve.
pub mod yield_curve;

/// `DefaultProbabilityTermStructure`: survival-curve interface.
pub mod default_probability_term_structure;

/// `CreditCurve`: the ISDA survival curve.
pub mod credit_curve;

/// `IsdaYieldCurveBuilder`: yield curves from money-market and swap rates.
pub mod yield_curve_builder;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use credit_curve::CreditCurve;
pub use default_probability_term_structure::{DefaultProbabilityTermStructure, HazardRate};
pub use isda_curve::IsdaCurve;
pub use term_structure::TermStructure;
pub use yield_curve::YieldCurve;
pub use yield_curve_builder::{IsdaInstrumentType, IsdaYieldCurveBuilder};
pub use yield_term_structure::YieldTermStructure;
