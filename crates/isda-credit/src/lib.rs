//! # isda-credit
//!
//! Single-name CDS analytics under the ISDA standard model: CDSs reduced to
//! curve times, market quote conventions, an analytic pricer, and the
//! calibration of credit curves to par spreads, quoted spreads and points
//! upfront.
//!
//! ```
//! use isda_credit::{
//!     ArbitrageHandling, AccrualOnDefaultFormula, CdsAnalyticFactory, CreditCurveCalibrator,
//!     FastCreditCurveBuilder,
//! };
//! use isda_curves::YieldCurve;
//! use isda_time::{Date, Period};
//!
//! let trade = Date::from_ymd(2013, 4, 25).unwrap();
//! let tenors = [Period::years(1), Period::years(3), Period::years(5)];
//! let pillars = CdsAnalyticFactory::default()
//!     .make_imm_cds_series(trade, &tenors)
//!     .unwrap();
//!
//! let builder = FastCreditCurveBuilder::new(AccrualOnDefaultFormula::MarkitFix, ArbitrageHandling::Fail);
//! let cc = builder
//!     .calibrate_par_spreads(&pillars, &[0.007, 0.009, 0.011], &YieldCurve::flat(0.01))
//!     .unwrap();
//! assert_eq!(cc.zero_rates().len(), 3);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// `CdsAnalytic`: a CDS as year fractions, and its contract conventions.
pub mod cds_analytic;

/// `CdsAnalyticFactory`: standard CDSs from trade dates and tenors.
pub mod cds_analytic_factory;

/// Par spread, quoted spread and points-upfront quotes.
pub mod quotes;

/// `AnalyticCdsPricer` and the accrual-on-default formulae.
pub mod pricer;

/// Credit curve calibrators.
pub mod curve_builder;

/// `MarketQuoteConverter`: conversions between quote conventions.
pub mod quote_converter;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use cds_analytic::{CdsAnalytic, CdsConventions, CdsCoupon, DEFAULT_RECOVERY_RATE};
pub use cds_analytic_factory::CdsAnalyticFactory;
pub use curve_builder::{
    ArbitrageHandling, CreditCurveCalibrator, FastCreditCurveBuilder, SimpleCreditCurveBuilder,
};
pub use pricer::{AccrualOnDefaultFormula, AnalyticCdsPricer, PriceType};
pub use quote_converter::MarketQuoteConverter;
pub use quotes::{CdsQuote, ParSpread, PointsUpFront, QuotedSpread};
