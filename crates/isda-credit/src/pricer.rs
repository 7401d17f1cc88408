//! Analytic CDS pricing under the ISDA standard model.
//!
//! Both legs are integrated exactly on the merged knot grid of the yield and
//! credit curves. On each segment the forward rates are constant, so with
//! `b = P(t)·Q(t)` the risky discount factor the integrals have closed forms;
//! when `|Δ(h·t + r·t)| < 1e-5` the series forms of [`epsilon`] and
//! [`epsilon_p`] are used instead.
//!
//! Values are per unit notional, as of the cash-settlement date, from the
//! protection buyer's side.

use std::fmt;
use std::str::FromStr;

use isda_core::{
    ensure,
    errors::{Error, Result},
    Real, Time,
};
use isda_curves::{DefaultProbabilityTermStructure, YieldTermStructure};
use isda_math::{epsilon, epsilon_p, functions::SERIES_THRESHOLD, integration_points};

use crate::cds_analytic::{CdsAnalytic, CdsCoupon};

/// Accrual-on-default integral used for the premium leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AccrualOnDefaultFormula {
    /// The ISDA standard model as published, including its half-day bias.
    #[default]
    OriginalIsda,
    /// The Markit correction of the ISDA integral.
    MarkitFix,
    /// The exact integral.
    Correct,
}

impl AccrualOnDefaultFormula {
    /// Time bias added to the accrual time of default.
    pub fn omega(self) -> Real {
        match self {
            Self::OriginalIsda => 1.0 / 730.0,
            Self::MarkitFix | Self::Correct => 0.0,
        }
    }
}

impl fmt::Display for AccrualOnDefaultFormula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::OriginalIsda => "OriginalISDA",
            Self::MarkitFix => "MarkitFix",
            Self::Correct => "Correct",
        };
        f.write_str(s)
    }
}

impl FromStr for AccrualOnDefaultFormula {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "originalisda" | "isda" => Ok(Self::OriginalIsda),
            "markitfix" | "markit" => Ok(Self::MarkitFix),
            "correct" => Ok(Self::Correct),
            other => Err(Error::InvalidArgument(format!(
                "unknown accrual-on-default formula '{other}'"
            ))),
        }
    }
}

/// Whether the accrued premium is included in a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PriceType {
    /// Accrued premium excluded (the quoted price).
    #[default]
    Clean,
    /// Accrued premium included (the cash price).
    Dirty,
}

// ── Segment integrals ─────────────────────────────────────────────────────────

/// Protection-leg integral over one segment, before the `lgd` factor.
///
/// `dht` and `drt` are the increments of the credit and yield `rt` over the
/// segment; `b0`, `b1` the risky discount factors at its ends.
pub(crate) fn protection_segment(dht: Real, drt: Real, b0: Real, b1: Real) -> Real {
    let dhrt = dht + drt;
    if dhrt.abs() < SERIES_THRESHOLD {
        dht * b0 * epsilon(-dhrt)
    } else {
        (b0 - b1) * dht / dhrt
    }
}

/// Accrual-on-default integral over one segment.
///
/// `t0`, `t1` are the accrual times (from the coupon's start, plus the bias)
/// at the segment ends and `dt = t1 − t0`.
#[allow(clippy::too_many_arguments)]
pub(crate) fn accrual_segment(
    formula: AccrualOnDefaultFormula,
    dht: Real,
    drt: Real,
    dt: Time,
    b0: Real,
    b1: Real,
    t0: Time,
    t1: Time,
) -> Real {
    let dhrt = dht + drt;
    let small = dhrt.abs() < SERIES_THRESHOLD;
    match formula {
        AccrualOnDefaultFormula::MarkitFix => {
            if small {
                dht * dt * b0 * epsilon_p(-dhrt)
            } else {
                dht * dt / dhrt * ((b0 - b1) / dhrt - b1)
            }
        }
        AccrualOnDefaultFormula::OriginalIsda | AccrualOnDefaultFormula::Correct => {
            if small {
                dht * b0 * (t0 * epsilon(-dhrt) + dt * epsilon_p(-dhrt))
            } else {
                dht / dhrt * (t0 * b0 - t1 * b1 + dt / dhrt * (b0 - b1))
            }
        }
    }
}

// ── AnalyticCdsPricer ─────────────────────────────────────────────────────────

/// Prices CDSs against a yield curve and a credit curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AnalyticCdsPricer {
    formula: AccrualOnDefaultFormula,
}

impl AnalyticCdsPricer {
    /// A pricer using the given accrual-on-default formula.
    pub fn new(formula: AccrualOnDefaultFormula) -> Self {
        Self { formula }
    }

    /// The accrual-on-default formula.
    pub fn formula(&self) -> AccrualOnDefaultFormula {
        self.formula
    }

    /// Value of the protection leg.
    pub fn protection_leg(
        &self,
        cds: &CdsAnalytic,
        yc: &dyn YieldTermStructure,
        cc: &dyn DefaultProbabilityTermStructure,
    ) -> Real {
        let start = cds.effective_protection_start();
        let end = cds.protection_end();
        if end <= start {
            return 0.0;
        }
        let knots = integration_points(start, end, yc.knot_times(), cc.knot_times());

        let mut ht0 = cc.rt(knots[0]);
        let mut rt0 = yc.rt(knots[0]);
        let mut b0 = (-ht0 - rt0).exp();
        let mut pv = 0.0;
        for &t in &knots[1..] {
            let ht1 = cc.rt(t);
            let rt1 = yc.rt(t);
            let b1 = (-ht1 - rt1).exp();
            pv += protection_segment(ht1 - ht0, rt1 - rt0, b0, b1);
            ht0 = ht1;
            rt0 = rt1;
            b0 = b1;
        }
        pv * cds.lgd() / yc.discount(cds.cash_settle_time())
    }

    /// Risky annuity (RPV01): value of a premium leg paying a unit coupon.
    pub fn annuity(
        &self,
        cds: &CdsAnalytic,
        yc: &dyn YieldTermStructure,
        cc: &dyn DefaultProbabilityTermStructure,
        price_type: PriceType,
    ) -> Real {
        let mut pv: Real = cds
            .coupons()
            .iter()
            .map(|c| c.year_frac * yc.discount(c.payment_time) * cc.survival_probability(c.eff_end))
            .sum();
        if cds.pay_acc_on_default() {
            pv += cds
                .coupons()
                .iter()
                .map(|c| self.accrual_on_default(cds, c, yc, cc))
                .sum::<Real>();
        }
        pv /= yc.discount(cds.cash_settle_time());
        match price_type {
            PriceType::Clean => pv - cds.accrued_year_fraction(),
            PriceType::Dirty => pv,
        }
    }

    /// Value to the protection buyer of a CDS paying `coupon`.
    pub fn pv(
        &self,
        cds: &CdsAnalytic,
        yc: &dyn YieldTermStructure,
        cc: &dyn DefaultProbabilityTermStructure,
        coupon: Real,
        price_type: PriceType,
    ) -> Real {
        self.protection_leg(cds, yc, cc) - coupon * self.annuity(cds, yc, cc, price_type)
    }

    /// Coupon at which the clean value is zero.
    ///
    /// # Errors
    /// Precondition error if the clean annuity is not positive.
    pub fn par_spread(
        &self,
        cds: &CdsAnalytic,
        yc: &dyn YieldTermStructure,
        cc: &dyn DefaultProbabilityTermStructure,
    ) -> Result<Real> {
        let rpv01 = self.annuity(cds, yc, cc, PriceType::Clean);
        ensure!(rpv01 > 0.0, "risky annuity is not positive ({rpv01})");
        Ok(self.protection_leg(cds, yc, cc) / rpv01)
    }

    /// Par spreads of several CDSs on the same curves.
    pub fn par_spreads(
        &self,
        cds: &[CdsAnalytic],
        yc: &dyn YieldTermStructure,
        cc: &dyn DefaultProbabilityTermStructure,
    ) -> Result<Vec<Real>> {
        cds.iter().map(|c| self.par_spread(c, yc, cc)).collect()
    }

    fn accrual_on_default(
        &self,
        cds: &CdsAnalytic,
        coupon: &CdsCoupon,
        yc: &dyn YieldTermStructure,
        cc: &dyn DefaultProbabilityTermStructure,
    ) -> Real {
        let start = coupon.eff_start.max(cds.effective_protection_start());
        let end = coupon.eff_end;
        if end <= start {
            return 0.0;
        }
        let knots = integration_points(start, end, yc.knot_times(), cc.knot_times());
        let shift = coupon.eff_start - self.formula.omega();

        let mut ht0 = cc.rt(knots[0]);
        let mut rt0 = yc.rt(knots[0]);
        let mut b0 = (-ht0 - rt0).exp();
        let mut t0 = knots[0] - shift;
        let mut pv = 0.0;
        for w in knots.windows(2) {
            let ht1 = cc.rt(w[1]);
            let rt1 = yc.rt(w[1]);
            let b1 = (-ht1 - rt1).exp();
            let t1 = w[1] - shift;
            pv += accrual_segment(self.formula, ht1 - ht0, rt1 - rt0, w[1] - w[0], b0, b1, t0, t1);
            ht0 = ht1;
            rt0 = rt1;
            b0 = b1;
            t0 = t1;
        }
        coupon.yc_ratio * pv
    }
}
