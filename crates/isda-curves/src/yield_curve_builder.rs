//! ISDA yield-curve bootstrap from money-market and swap rates.
//!
//! Money-market instruments give a knot directly from their simple rate:
//! `r = ln(1 + yf·rate) / t`. Each swap adds a knot at its adjusted maturity
//! whose zero rate is solved so the fixed leg prices at par:
//!
//! ```text
//! rate · Σ yf_j · P(t_j) + P(t_n) − 1 = 0
//! ```
//!
//! The curve is built with spot as time zero and re-based to the trade date,
//! so callers get discount factors measured from the trade date.

use std::fmt;
use std::str::FromStr;

use isda_core::{
    ensure,
    errors::{Error, Result},
    Rate, Real, Time,
};
use isda_math::{bracket_root, brent, guess_interval};
use isda_time::{
    BusinessDayConvention, Calendar, Date, DayCounter, Period, PremiumLegScheduleBuilder, StubType,
};
use tracing::debug;

use crate::isda_curve::IsdaCurve;
use crate::yield_curve::YieldCurve;

/// Root accuracy for swap knots.
const SWAP_ACCURACY: Real = 1.0e-14;

/// Kind of instrument quoted at a yield-curve pillar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IsdaInstrumentType {
    /// Deposit with a simple rate.
    MoneyMarket,
    /// Par swap (fixed leg against a floating leg priced at par).
    Swap,
}

impl fmt::Display for IsdaInstrumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MoneyMarket => write!(f, "M"),
            Self::Swap => write!(f, "S"),
        }
    }
}

impl FromStr for IsdaInstrumentType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "M" | "MM" | "MONEYMARKET" => Ok(Self::MoneyMarket),
            "S" | "SWAP" => Ok(Self::Swap),
            other => Err(Error::InvalidArgument(format!(
                "unknown instrument type '{other}'"
            ))),
        }
    }
}

/// Precomputed fixed leg of a swap pillar.
#[derive(Debug, Clone, PartialEq)]
struct SwapLeg {
    payment_times: Vec<Time>,
    year_fractions: Vec<Real>,
}

/// Bootstraps ISDA yield curves for a fixed set of instruments.
///
/// All date logic runs once in [`new`](Self::new); [`build`](Self::build) only
/// solves for knots, so the same builder can be reused for many rate sets.
#[derive(Debug, Clone, PartialEq)]
pub struct IsdaYieldCurveBuilder {
    offset: Time,
    instruments: Vec<IsdaInstrumentType>,
    knot_times: Vec<Time>,
    mm_year_fractions: Vec<Real>,
    swaps: Vec<SwapLeg>,
}

impl IsdaYieldCurveBuilder {
    /// Set up the bootstrap.
    ///
    /// * `trade_date` is time zero of the resulting curve.
    /// * `spot_date` is where instruments start accruing.
    /// * `instruments` and `tenors` describe the pillars; money-market
    ///   instruments must all precede swaps.
    ///
    /// # Errors
    /// Precondition error on empty or mismatched inputs, swaps listed before a
    /// money-market instrument, or pillars that do not increase.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        trade_date: Date,
        spot_date: Date,
        instruments: &[IsdaInstrumentType],
        tenors: &[Period],
        mm_day_count: &dyn DayCounter,
        swap_day_count: &dyn DayCounter,
        swap_interval: Period,
        curve_day_count: &dyn DayCounter,
        convention: BusinessDayConvention,
        calendar: &dyn Calendar,
    ) -> Result<Self> {
        ensure!(!instruments.is_empty(), "no yield curve instruments given");
        ensure!(
            instruments.len() == tenors.len(),
            "{} instruments but {} tenors",
            instruments.len(),
            tenors.len()
        );
        ensure!(
            instruments
                .windows(2)
                .all(|w| !(w[0] == IsdaInstrumentType::Swap && w[1] == IsdaInstrumentType::MoneyMarket)),
            "money-market instruments must precede swaps"
        );

        let mut knot_times = Vec::with_capacity(tenors.len());
        let mut mm_year_fractions = Vec::new();
        let mut swaps = Vec::new();

        for (kind, &tenor) in instruments.iter().zip(tenors) {
            ensure!(tenor.is_positive(), "instrument tenor must be positive, got {tenor}");
            let maturity = spot_date.plus(tenor)?;
            match kind {
                IsdaInstrumentType::MoneyMarket => {
                    let adjusted = calendar.adjust(maturity, convention);
                    knot_times.push(curve_day_count.year_fraction(spot_date, adjusted));
                    mm_year_fractions.push(mm_day_count.year_fraction(spot_date, adjusted));
                }
                IsdaInstrumentType::Swap => {
                    let schedule =
                        PremiumLegScheduleBuilder::new(spot_date, maturity, swap_interval, calendar)
                            .with_convention(convention)
                            .with_stub(StubType::FrontShort)
                            .with_protection_start(false)
                            .build()?;
                    let mut start = spot_date;
                    let mut leg = SwapLeg {
                        payment_times: Vec::with_capacity(schedule.len()),
                        year_fractions: Vec::with_capacity(schedule.len()),
                    };
                    // fixed coupons accrue between adjusted payment dates
                    for p in schedule.periods() {
                        leg.payment_times
                            .push(curve_day_count.year_fraction(spot_date, p.payment_date));
                        leg.year_fractions
                            .push(swap_day_count.year_fraction(start, p.payment_date));
                        start = p.payment_date;
                    }
                    let last = leg.payment_times.last().copied().ok_or_else(|| {
                        Error::InvalidArgument(format!("empty swap schedule for tenor {tenor}"))
                    })?;
                    knot_times.push(last);
                    swaps.push(leg);
                }
            }
        }
        for (i, w) in knot_times.windows(2).enumerate() {
            ensure!(
                w[1] > w[0],
                "yield curve pillars must increase: pillar {} at {} is not after {}",
                i + 1,
                w[1],
                w[0]
            );
        }

        Ok(Self {
            offset: curve_day_count.year_fraction(spot_date, trade_date),
            instruments: instruments.to_vec(),
            knot_times,
            mm_year_fractions,
            swaps,
        })
    }

    /// Knot times measured from the spot date.
    pub fn knot_times(&self) -> &[Time] {
        &self.knot_times
    }

    /// Bootstrap a curve from market rates, one per instrument.
    ///
    /// # Errors
    /// Precondition error on a length mismatch or a money-market rate with
    /// `1 + yf·rate ≤ 0`; [`Error::Calibration`] if a swap knot cannot be
    /// solved.
    pub fn build(&self, rates: &[Rate]) -> Result<YieldCurve> {
        ensure!(
            rates.len() == self.instruments.len(),
            "{} rates for {} instruments",
            rates.len(),
            self.instruments.len()
        );
        let mut curve = IsdaCurve::new(&self.knot_times, rates)?;

        let n_mm = self.mm_year_fractions.len();
        for (i, (&yf, &rate)) in self.mm_year_fractions.iter().zip(rates).enumerate() {
            let growth = 1.0 + yf * rate;
            ensure!(growth > 0.0, "money-market rate {rate} at pillar {i} gives a non-positive growth factor");
            let z = growth.ln() / self.knot_times[i];
            curve.set_rate(i, z)?;
            debug!(pillar = i, t = self.knot_times[i], zero_rate = z, "money-market knot");
        }

        for (k, leg) in self.swaps.iter().enumerate() {
            let index = n_mm + k;
            let rate = rates[index];
            let objective = |x: Real| {
                let mut trial = curve.clone();
                if trial.set_rate(index, x).is_err() {
                    return Real::NAN;
                }
                swap_value(&trial, leg, rate)
            };
            let guess = curve.zero_rates()[index];
            let (lower, upper) = guess_interval(guess);
            let z = bracket_root(&objective, lower, upper, Real::NEG_INFINITY, Real::INFINITY)
                .and_then(|(a, b)| brent(&objective, a, b, SWAP_ACCURACY))
                .map_err(|e| Error::Calibration {
                    index,
                    message: format!("swap knot: {e}"),
                })?;
            curve.set_rate(index, z)?;
            debug!(pillar = index, t = self.knot_times[index], zero_rate = z, "swap knot");
        }

        let curve = curve.with_offset(self.offset)?;
        debug!(knots = curve.num_knots(), offset = self.offset, "yield curve built");
        Ok(YieldCurve::from_curve(curve))
    }
}

/// Par value of the fixed leg minus one.
fn swap_value(curve: &IsdaCurve, leg: &SwapLeg, rate: Rate) -> Real {
    let annuity: Real = leg
        .payment_times
        .iter()
        .zip(&leg.year_fractions)
        .map(|(&t, &yf)| yf * curve.discount(t))
        .sum();
    let last = leg.payment_times.last().copied().unwrap_or(0.0);
    rate * annuity + curve.discount(last) - 1.0
}
