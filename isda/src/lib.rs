//! # isda
//!
//! CDS analytics and credit curve calibration under the ISDA standard model.
//!
//! This crate is a **façade** that re-exports the workspace crates.
//! Application code should depend on it rather than on the individual
//! `isda-*` crates.
//!
//! ## Quick start
//!
//! ```rust
//! use isda::credit::{CdsAnalyticFactory, CreditCurveCalibrator, FastCreditCurveBuilder};
//! use isda::curves::{DefaultProbabilityTermStructure, YieldCurve};
//! use isda::time::{Date, Period};
//!
//! let trade = Date::from_ymd(2013, 4, 25).unwrap();
//! let pillars = CdsAnalyticFactory::default()
//!     .make_imm_cds_series(trade, &[Period::years(3), Period::years(5)])
//!     .unwrap();
//! let cc = FastCreditCurveBuilder::default()
//!     .calibrate_par_spreads(&pillars, &[0.008, 0.01], &YieldCurve::flat(0.02))
//!     .unwrap();
//! let q5 = cc.survival_probability(5.0);
//! assert!(q5 > 0.8 && q5 < 1.0);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Core type aliases and error definitions.
pub use isda_core as core;

/// Dates, calendars, day counters, roll dates and premium-leg schedules.
pub use isda_time as time;

/// Root finding and integration helpers.
pub use isda_math as math;

/// Yield and credit curves, and the ISDA yield curve bootstrap.
pub use isda_curves as curves;

/// CDS analytics, pricing, calibration and quote conversion.
pub use isda_credit as credit;
