//! `FastCreditCurveBuilder`: bootstrap with the yield-curve side of every
//! pillar precomputed.
//!
//! Only the credit curve changes while a knot is solved, so integration grids,
//! yield `r·t` values and discount factors are evaluated once per pillar and
//! the objective touches nothing but the trial credit curve.

use isda_core::{errors::Result, Real, Time};
use isda_curves::{CreditCurve, TermStructure, YieldTermStructure};
use isda_math::integration_points;

use super::{bootstrap, validate, AccrualOnDefaultFormula, ArbitrageHandling, CreditCurveCalibrator};
use crate::cds_analytic::{CdsAnalytic, CdsCoupon};
use crate::pricer::{accrual_segment, protection_segment};

/// The production calibrator.
///
/// # Example
/// ```
/// use isda_credit::{CdsAnalyticFactory, CreditCurveCalibrator, FastCreditCurveBuilder};
/// use isda_curves::{DefaultProbabilityTermStructure, YieldCurve};
/// use isda_time::{Date, Period};
///
/// let trade = Date::from_ymd(2013, 4, 25).unwrap();
/// let pillars = CdsAnalyticFactory::default()
///     .make_imm_cds_series(trade, &[Period::years(1), Period::years(5)])
///     .unwrap();
/// let yc = YieldCurve::flat(0.02);
/// let cc = FastCreditCurveBuilder::default()
///     .calibrate_par_spreads(&pillars, &[0.006, 0.011], &yc)
///     .unwrap();
/// assert!(cc.survival_probability(5.0) < cc.survival_probability(1.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FastCreditCurveBuilder {
    formula: AccrualOnDefaultFormula,
    handling: ArbitrageHandling,
}

impl FastCreditCurveBuilder {
    /// A calibrator with the given accrual-on-default formula and arbitrage
    /// policy.
    pub fn new(formula: AccrualOnDefaultFormula, handling: ArbitrageHandling) -> Self {
        Self { formula, handling }
    }
}

impl CreditCurveCalibrator for FastCreditCurveBuilder {
    fn accrual_formula(&self) -> AccrualOnDefaultFormula {
        self.formula
    }

    fn arbitrage_handling(&self) -> ArbitrageHandling {
        self.handling
    }

    fn calibrate_with_upfront(
        &self,
        cds: &[CdsAnalytic],
        premiums: &[Real],
        yc: &dyn YieldTermStructure,
        pufs: &[Real],
    ) -> Result<CreditCurve> {
        validate(cds, premiums, pufs)?;
        let pillar_times: Vec<Time> = cds.iter().map(CdsAnalytic::protection_end).collect();
        let terms: Vec<PillarTerms> = cds
            .iter()
            .zip(premiums.iter().zip(pufs))
            .map(|(c, (&premium, &puf))| {
                PillarTerms::new(self.formula, c, yc, &pillar_times, premium, puf)
            })
            .collect();
        bootstrap(self.handling, cds, premiums, pufs, |i, cc| terms[i].value(cc))
    }
}

// ── Precomputed pillar terms ──────────────────────────────────────────────────

/// Yield-curve values on an integration grid.
#[derive(Debug)]
struct Grid {
    knots: Vec<Time>,
    rt: Vec<Real>,
    df: Vec<Real>,
}

impl Grid {
    /// `None` for an empty interval.
    fn new(start: Time, end: Time, yc: &dyn YieldTermStructure, pillar_times: &[Time]) -> Option<Self> {
        if end <= start {
            return None;
        }
        let knots = integration_points(start, end, yc.knot_times(), pillar_times);
        let rt: Vec<Real> = knots.iter().map(|&t| yc.rt(t)).collect();
        let df = rt.iter().map(|&x| (-x).exp()).collect();
        Some(Self { knots, rt, df })
    }
}

#[derive(Debug)]
struct AccrualTerms {
    grid: Grid,
    shift: Time,
    yc_ratio: Real,
}

#[derive(Debug)]
struct PillarTerms {
    formula: AccrualOnDefaultFormula,
    protection: Option<Grid>,
    protection_scale: Real,
    eff_ends: Vec<Time>,
    weights: Vec<Real>,
    accruals: Vec<AccrualTerms>,
    inv_df_cash: Real,
    accrued: Real,
    premium: Real,
    puf: Real,
}

impl PillarTerms {
    fn new(
        formula: AccrualOnDefaultFormula,
        cds: &CdsAnalytic,
        yc: &dyn YieldTermStructure,
        pillar_times: &[Time],
        premium: Real,
        puf: Real,
    ) -> Self {
        let inv_df_cash = 1.0 / yc.discount(cds.cash_settle_time());
        let protection = Grid::new(
            cds.effective_protection_start(),
            cds.protection_end(),
            yc,
            pillar_times,
        );

        let coupons = cds.coupons();
        let accruals = if cds.pay_acc_on_default() {
            coupons
                .iter()
                .filter_map(|c| Self::accrual_terms(formula, cds, c, yc, pillar_times))
                .collect()
        } else {
            Vec::new()
        };

        Self {
            formula,
            protection,
            protection_scale: cds.lgd() * inv_df_cash,
            eff_ends: coupons.iter().map(|c| c.eff_end).collect(),
            weights: coupons
                .iter()
                .map(|c| c.year_frac * yc.discount(c.payment_time))
                .collect(),
            accruals,
            inv_df_cash,
            accrued: cds.accrued_year_fraction(),
            premium,
            puf,
        }
    }

    fn accrual_terms(
        formula: AccrualOnDefaultFormula,
        cds: &CdsAnalytic,
        coupon: &CdsCoupon,
        yc: &dyn YieldTermStructure,
        pillar_times: &[Time],
    ) -> Option<AccrualTerms> {
        let start = coupon.eff_start.max(cds.effective_protection_start());
        Grid::new(start, coupon.eff_end, yc, pillar_times).map(|grid| AccrualTerms {
            grid,
            shift: coupon.eff_start - formula.omega(),
            yc_ratio: coupon.yc_ratio,
        })
    }

    /// Clean value net of the upfront.
    fn value(&self, cc: &CreditCurve) -> Real {
        self.protection_leg(cc) - self.premium * self.clean_annuity(cc) - self.puf
    }

    fn protection_leg(&self, cc: &CreditCurve) -> Real {
        let Some(grid) = &self.protection else {
            return 0.0;
        };
        let mut ht0 = cc.rt(grid.knots[0]);
        let mut b0 = grid.df[0] * (-ht0).exp();
        let mut pv = 0.0;
        for j in 1..grid.knots.len() {
            let ht1 = cc.rt(grid.knots[j]);
            let b1 = grid.df[j] * (-ht1).exp();
            pv += protection_segment(ht1 - ht0, grid.rt[j] - grid.rt[j - 1], b0, b1);
            ht0 = ht1;
            b0 = b1;
        }
        pv * self.protection_scale
    }

    fn clean_annuity(&self, cc: &CreditCurve) -> Real {
        let premium_leg: Real = self
            .eff_ends
            .iter()
            .zip(&self.weights)
            .map(|(&t, &w)| w * (-cc.rt(t)).exp())
            .sum();
        let aod: Real = self.accruals.iter().map(|a| self.accrual_on_default(a, cc)).sum();
        (premium_leg + aod) * self.inv_df_cash - self.accrued
    }

    fn accrual_on_default(&self, terms: &AccrualTerms, cc: &CreditCurve) -> Real {
        let grid = &terms.grid;
        let mut ht0 = cc.rt(grid.knots[0]);
        let mut b0 = grid.df[0] * (-ht0).exp();
        let mut t0 = grid.knots[0] - terms.shift;
        let mut pv = 0.0;
        for j in 1..grid.knots.len() {
            let ht1 = cc.rt(grid.knots[j]);
            let b1 = grid.df[j] * (-ht1).exp();
            let t1 = grid.knots[j] - terms.shift;
            pv += accrual_segment(
                self.formula,
                ht1 - ht0,
                grid.rt[j] - grid.rt[j - 1],
                grid.knots[j] - grid.knots[j - 1],
                b0,
                b1,
                t0,
                t1,
            );
            ht0 = ht1;
            b0 = b1;
            t0 = t1;
        }
        terms.yc_ratio * pv
    }
}
