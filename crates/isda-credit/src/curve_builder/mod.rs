//! Credit curve calibration.
//!
//! A credit curve is bootstrapped from a strip of CDSs, one knot per pillar at
//! the pillar's protection end. Knot `i` is solved with knots `0..i` fixed, so
//! each pillar only has to be repriced on the part of the curve it sees.
//!
//! Two calibrators share the same bootstrap loop and differ in how they
//! evaluate the pricing objective:
//!
//! - [`FastCreditCurveBuilder`] precomputes everything that depends on the
//!   yield curve and only re-evaluates the credit-curve terms.
//! - [`SimpleCreditCurveBuilder`] reprices each pillar from scratch with an
//!   [`AnalyticCdsPricer`](crate::pricer::AnalyticCdsPricer).
//!
//! Both agree to well below quoting precision; the fast builder is the one
//! to use in production.

use std::fmt;
use std::str::FromStr;

use isda_core::{
    ensure,
    errors::{Error, Result},
    Real, Time,
};
use isda_curves::{CreditCurve, YieldTermStructure};
use isda_math::{bracket_root, brent, comparison::EPSILON, guess_interval, solvers1d::GUESS_WIDTH};
use isda_time::Date;
use tracing::{debug, warn};

use crate::cds_analytic::{CdsAnalytic, CdsConventions};
use crate::pricer::{AnalyticCdsPricer, PriceType};
use crate::quotes::{CdsQuote, PointsUpFront};

pub use crate::pricer::AccrualOnDefaultFormula;

mod fast;
mod simple;

pub use fast::FastCreditCurveBuilder;
pub use simple::SimpleCreditCurveBuilder;

/// Absolute accuracy of the knot root search.
pub const ROOT_ACCURACY: Real = 1.0e-15;

/// Largest objective at which a failed bracket may fall back to the previous
/// knot's zero rate.
pub const PREVIOUS_RATE_TOLERANCE: Real = 1.0e-12;

// ── ArbitrageHandling ─────────────────────────────────────────────────────────

/// What to do when a pillar can only be matched with a negative forward hazard
/// rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ArbitrageHandling {
    /// Solve anyway; the curve may have negative forward hazard rates.
    #[default]
    Ignore,
    /// Return [`Error::Arbitrage`].
    Fail,
    /// Set the forward hazard rate of the offending segment to zero and carry
    /// on. The pillar is then not repriced exactly.
    ZeroHazardRate,
}

impl fmt::Display for ArbitrageHandling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Ignore => "Ignore",
            Self::Fail => "Fail",
            Self::ZeroHazardRate => "ZeroHazardRate",
        };
        f.write_str(s)
    }
}

impl FromStr for ArbitrageHandling {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ignore" => Ok(Self::Ignore),
            "fail" => Ok(Self::Fail),
            "zerohazardrate" | "zero_hazard_rate" => Ok(Self::ZeroHazardRate),
            _ => Err(Error::InvalidArgument(format!("unknown arbitrage handling '{s}'"))),
        }
    }
}

// ── CreditCurveCalibrator ─────────────────────────────────────────────────────

/// A credit curve calibrator.
///
/// Implementors supply [`calibrate_with_upfront`](Self::calibrate_with_upfront);
/// the quote-based entry points are provided on top of it.
pub trait CreditCurveCalibrator: Send + Sync {
    /// The accrual-on-default formula used when pricing pillars.
    fn accrual_formula(&self) -> AccrualOnDefaultFormula;

    /// The arbitrage policy.
    fn arbitrage_handling(&self) -> ArbitrageHandling;

    /// Calibrate to CDSs paying running `premiums` with clean upfronts `pufs`.
    ///
    /// # Errors
    /// Argument error if the slices differ in length, are empty, the CDSs do
    /// not share a protection start or are not in increasing maturity order,
    /// or (under [`ArbitrageHandling::Fail`]) the quotes imply a negative
    /// forward hazard rate. [`Error::Calibration`] if a knot cannot be solved.
    fn calibrate_with_upfront(
        &self,
        cds: &[CdsAnalytic],
        premiums: &[Real],
        yc: &dyn YieldTermStructure,
        pufs: &[Real],
    ) -> Result<CreditCurve>;

    /// Calibrate to par spreads.
    fn calibrate_par_spreads(
        &self,
        cds: &[CdsAnalytic],
        spreads: &[Real],
        yc: &dyn YieldTermStructure,
    ) -> Result<CreditCurve> {
        let pufs = vec![0.0; spreads.len()];
        self.calibrate_with_upfront(cds, spreads, yc, &pufs)
    }

    /// Calibrate to points-upfront quotes.
    fn calibrate_points_upfront(
        &self,
        cds: &[CdsAnalytic],
        quotes: &[PointsUpFront],
        yc: &dyn YieldTermStructure,
    ) -> Result<CreditCurve> {
        let premiums: Vec<Real> = quotes.iter().map(|q| q.coupon).collect();
        let pufs: Vec<Real> = quotes.iter().map(|q| q.puf).collect();
        self.calibrate_with_upfront(cds, &premiums, yc, &pufs)
    }

    /// Calibrate to a strip of quotes in any mix of conventions.
    ///
    /// A quoted spread is first turned into points upfront by pricing its CDS
    /// at the coupon on the flat curve that matches the quoted spread.
    fn calibrate_quotes(
        &self,
        cds: &[CdsAnalytic],
        quotes: &[CdsQuote],
        yc: &dyn YieldTermStructure,
    ) -> Result<CreditCurve> {
        ensure!(
            cds.len() == quotes.len(),
            "{} CDSs but {} quotes",
            cds.len(),
            quotes.len()
        );
        let mut premiums = Vec::with_capacity(quotes.len());
        let mut pufs = Vec::with_capacity(quotes.len());
        for (c, q) in cds.iter().zip(quotes) {
            let (premium, puf) = match *q {
                CdsQuote::ParSpread(p) => (p.spread, 0.0),
                CdsQuote::PointsUpFront(p) => (p.coupon, p.puf),
                CdsQuote::QuotedSpread(q) => {
                    let flat = self.calibrate_with_upfront(
                        std::slice::from_ref(c),
                        &[q.quoted_spread],
                        yc,
                        &[0.0],
                    )?;
                    let puf = AnalyticCdsPricer::new(self.accrual_formula()).pv(
                        c,
                        yc,
                        &flat,
                        q.coupon,
                        PriceType::Clean,
                    );
                    (q.coupon, puf)
                }
            };
            premiums.push(premium);
            pufs.push(puf);
        }
        self.calibrate_with_upfront(cds, &premiums, yc, &pufs)
    }

    /// Calibrate a single-knot (flat) curve to one quote.
    fn calibrate_single(
        &self,
        cds: &CdsAnalytic,
        quote: &CdsQuote,
        yc: &dyn YieldTermStructure,
    ) -> Result<CreditCurve> {
        self.calibrate_quotes(std::slice::from_ref(cds), std::slice::from_ref(quote), yc)
    }

    /// Build the pillars from dates and calibrate to their par spreads.
    ///
    /// # Errors
    /// Argument error if `maturities` and `spreads` differ in length, plus
    /// everything [`CdsAnalytic::new`] and
    /// [`calibrate_with_upfront`](Self::calibrate_with_upfront) report.
    #[allow(clippy::too_many_arguments)]
    fn calibrate_dated(
        &self,
        conventions: &CdsConventions,
        trade_date: Date,
        step_in: Date,
        value_date: Date,
        accrual_start: Date,
        maturities: &[Date],
        spreads: &[Real],
        yc: &dyn YieldTermStructure,
    ) -> Result<CreditCurve> {
        ensure!(
            maturities.len() == spreads.len(),
            "{} maturities but {} spreads",
            maturities.len(),
            spreads.len()
        );
        let cds = maturities
            .iter()
            .map(|&m| CdsAnalytic::new(trade_date, step_in, value_date, accrual_start, m, conventions))
            .collect::<Result<Vec<_>>>()?;
        self.calibrate_par_spreads(&cds, spreads, yc)
    }
}

// ── Bootstrap ─────────────────────────────────────────────────────────────────

/// Check the pillar strip before any root finding.
pub(crate) fn validate(cds: &[CdsAnalytic], premiums: &[Real], pufs: &[Real]) -> Result<()> {
    ensure!(!cds.is_empty(), "no CDSs to calibrate to");
    ensure!(
        premiums.len() == cds.len(),
        "{} CDSs but {} premiums",
        cds.len(),
        premiums.len()
    );
    ensure!(
        pufs.len() == cds.len(),
        "{} CDSs but {} upfronts",
        cds.len(),
        pufs.len()
    );
    let start = cds[0].effective_protection_start();
    for (i, c) in cds.iter().enumerate() {
        ensure!(
            (c.effective_protection_start() - start).abs() <= EPSILON,
            "CDS {i} starts protection at {} rather than {start}",
            c.effective_protection_start()
        );
        ensure!(c.lgd() > 0.0, "CDS {i} has zero loss given default");
        ensure!(
            premiums[i].is_finite() && pufs[i].is_finite(),
            "CDS {i} has a non-finite quote"
        );
    }
    for (i, w) in cds.windows(2).enumerate() {
        ensure!(
            w[1].protection_end() > w[0].protection_end(),
            "CDS {} does not end after CDS {i} ({} <= {})",
            i + 1,
            w[1].protection_end(),
            w[0].protection_end()
        );
    }
    Ok(())
}

/// Sequential bootstrap shared by the calibrators, on a strip that has passed
/// [`validate`].
///
/// `objective(i, curve)` is the clean value of pillar `i` on `curve`, net of
/// its upfront; the knot is the rate that sets it to zero.
pub(crate) fn bootstrap<F>(
    handling: ArbitrageHandling,
    cds: &[CdsAnalytic],
    premiums: &[Real],
    pufs: &[Real],
    objective: F,
) -> Result<CreditCurve>
where
    F: Fn(usize, &CreditCurve) -> Real,
{
    let times: Vec<Time> = cds.iter().map(CdsAnalytic::protection_end).collect();
    let guesses: Vec<Real> = cds
        .iter()
        .zip(premiums.iter().zip(pufs))
        .map(|(c, (&premium, &puf))| (premium + puf / c.protection_end()) / c.lgd())
        .collect();
    let mut curve = CreditCurve::new(&times, &guesses)?;

    for i in 0..cds.len() {
        let rate = {
            let f = |x: Real| match curve.with_rate(x, i) {
                Ok(trial) => objective(i, &trial),
                Err(_) => Real::NAN,
            };
            solve_knot(handling, i, times[i], guesses[i], &curve, f)?
        };
        curve.set_rate(i, rate)?;
        debug!(pillar = i, t = times[i], zero_rate = rate, "credit knot");
    }
    debug!(knots = cds.len(), handling = %handling, "credit curve calibrated");
    Ok(curve)
}

fn solve_knot<F>(
    handling: ArbitrageHandling,
    index: usize,
    t: Time,
    guess: Real,
    curve: &CreditCurve,
    f: F,
) -> Result<Real>
where
    F: Fn(Real) -> Real,
{
    let calibration_error = |e: Error| Error::Calibration {
        index,
        message: e.to_string(),
    };

    match handling {
        ArbitrageHandling::Ignore => {
            let (lower, upper) = guess_interval(guess);
            let solved = bracket_root(&f, lower, upper, Real::NEG_INFINITY, Real::INFINITY)
                .and_then(|(a, b)| brent(&f, a, b, ROOT_ACCURACY));
            match solved {
                Ok(rate) => {
                    if index > 0 && rate * t < curve.knot_rts()[index - 1] {
                        warn!(pillar = index, t, zero_rate = rate, "negative forward hazard rate");
                    }
                    Ok(rate)
                }
                Err(e) if index > 0 => {
                    let previous = curve.zero_rates()[index - 1];
                    if f(previous).abs() < PREVIOUS_RATE_TOLERANCE {
                        warn!(pillar = index, zero_rate = previous, "reusing previous knot rate");
                        Ok(previous)
                    } else {
                        Err(calibration_error(e))
                    }
                }
                Err(e) => Err(calibration_error(e)),
            }
        }
        ArbitrageHandling::Fail | ArbitrageHandling::ZeroHazardRate => {
            let min = if index == 0 {
                0.0
            } else {
                curve.knot_rts()[index - 1] / t
            };
            if index > 0 && f(min) > 0.0 {
                if handling == ArbitrageHandling::Fail {
                    return Err(Error::Arbitrage {
                        index,
                        message: format!(
                            "matching the quote needs a negative forward hazard rate before t = {t}"
                        ),
                    });
                }
                warn!(pillar = index, t, zero_rate = min, "zero forward hazard rate imposed");
                return Ok(min);
            }
            let start = guess.max(min);
            let upper = if start > 0.0 {
                1.2 * start
            } else {
                start + GUESS_WIDTH
            };
            bracket_root(&f, start, upper, min, Real::INFINITY)
                .and_then(|(a, b)| brent(&f, a, b, ROOT_ACCURACY))
                .map_err(calibration_error)
        }
    }
}
