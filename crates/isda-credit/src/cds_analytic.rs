//! `CdsAnalytic`: a CDS reduced to the times the ISDA model integrates over.
//!
//! Dates are turned into year fractions from the trade date once, at
//! construction, with the curve day count; coupon amounts use the accrual day
//! count. Pricing and calibration only ever see the resulting times.

use std::sync::Arc;

use isda_core::{ensure, errors::Result, Real, Time};
use isda_time::{
    Actual360, Actual365Fixed, BusinessDayConvention, Calendar, Date, DayCounter, Period,
    PremiumLegScheduleBuilder, StubType, WeekendsOnly,
};

/// Standard recovery rate for senior unsecured debt.
pub const DEFAULT_RECOVERY_RATE: Real = 0.4;

/// Contract conventions of a single-name CDS.
#[derive(Debug, Clone)]
pub struct CdsConventions {
    /// Whether the accrued premium is paid on default.
    pub pay_acc_on_default: bool,
    /// Coupon interval (3M for standard contracts).
    pub coupon_interval: Period,
    /// Placement of the irregular coupon period.
    pub stub_type: StubType,
    /// Whether protection starts at the beginning of the day (so each period
    /// covers one extra day).
    pub protection_start: bool,
    /// Recovery rate in `[0, 1]`.
    pub recovery_rate: Real,
    /// Adjustment of coupon dates.
    pub business_day_convention: BusinessDayConvention,
    /// Business-day calendar.
    pub calendar: Arc<dyn Calendar>,
    /// Day count for premium amounts.
    pub accrual_day_count: Arc<dyn DayCounter>,
    /// Day count from dates to curve times.
    pub curve_day_count: Arc<dyn DayCounter>,
}

impl Default for CdsConventions {
    fn default() -> Self {
        Self {
            pay_acc_on_default: true,
            coupon_interval: Period::months(3),
            stub_type: StubType::FrontShort,
            protection_start: true,
            recovery_rate: DEFAULT_RECOVERY_RATE,
            business_day_convention: BusinessDayConvention::Following,
            calendar: Arc::new(WeekendsOnly),
            accrual_day_count: Arc::new(Actual360),
            curve_day_count: Arc::new(Actual365Fixed),
        }
    }
}

/// One premium payment, in curve time from the trade date.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CdsCoupon {
    /// Time of the payment.
    pub payment_time: Time,
    /// Start of protection covered by this coupon.
    pub eff_start: Time,
    /// End of protection covered by this coupon.
    pub eff_end: Time,
    /// Accrual year fraction of the period.
    pub year_frac: Real,
    /// `year_frac` over the curve-day-count length of the period.
    pub yc_ratio: Real,
}

impl CdsCoupon {
    fn with_offset(self, offset: Time) -> Self {
        Self {
            payment_time: self.payment_time - offset,
            eff_start: self.eff_start - offset,
            eff_end: self.eff_end - offset,
            ..self
        }
    }
}

/// A CDS in analytic form.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CdsAnalytic {
    lgd: Real,
    pay_acc_on_default: bool,
    protection_from_start_of_day: bool,
    accrual_start: Time,
    effective_protection_start: Time,
    protection_end: Time,
    cash_settle_time: Time,
    accrued: Real,
    accrued_days: i64,
    coupons: Vec<CdsCoupon>,
}

impl CdsAnalytic {
    /// Build a CDS from its dates.
    ///
    /// * `step_in` is when protection starts (usually trade date + 1).
    /// * `cash_settle` is the valuation date: values are reported as of this
    ///   date.
    /// * `accrual_start` is the first coupon's accrual start (usually the
    ///   previous IMM date).
    ///
    /// # Errors
    /// Precondition error if `step_in` or `cash_settle` is before the trade
    /// date, `maturity` is not after `accrual_start`, `step_in` is after
    /// `maturity`, or the recovery rate is outside `[0, 1]`.
    pub fn new(
        trade_date: Date,
        step_in: Date,
        cash_settle: Date,
        accrual_start: Date,
        maturity: Date,
        conventions: &CdsConventions,
    ) -> Result<Self> {
        ensure!(
            step_in >= trade_date,
            "step-in date {step_in} is before trade date {trade_date}"
        );
        ensure!(
            cash_settle >= trade_date,
            "cash-settle date {cash_settle} is before trade date {trade_date}"
        );
        ensure!(
            maturity > accrual_start,
            "maturity {maturity} is not after accrual start {accrual_start}"
        );
        ensure!(
            step_in <= maturity,
            "CDS has expired: step-in {step_in} is after maturity {maturity}"
        );
        let recovery = conventions.recovery_rate;
        ensure!(
            (0.0..=1.0).contains(&recovery),
            "recovery rate must be in [0, 1], got {recovery}"
        );

        let schedule = PremiumLegScheduleBuilder::new(
            accrual_start,
            maturity,
            conventions.coupon_interval,
            conventions.calendar.as_ref(),
        )
        .with_convention(conventions.business_day_convention)
        .with_stub(conventions.stub_type)
        .with_protection_start(conventions.protection_start)
        .build()?
        .truncate(step_in)?;

        let curve_dc = conventions.curve_day_count.as_ref();
        let accrual_dc = conventions.accrual_day_count.as_ref();
        let day_shift = i64::from(conventions.protection_start);

        let protection_start_date = step_in.max(accrual_start).add_days(-day_shift)?;
        let first_start = schedule.period(0)?.accrual_start;
        let (accrued, accrued_days) = if step_in > first_start {
            (
                accrual_dc.year_fraction(first_start, step_in),
                accrual_dc.day_count(first_start, step_in),
            )
        } else {
            (0.0, 0)
        };

        let coupons = schedule
            .periods()
            .iter()
            .map(|p| {
                let year_frac = accrual_dc.year_fraction(p.accrual_start, p.accrual_end);
                Ok(CdsCoupon {
                    payment_time: curve_dc.year_fraction(trade_date, p.payment_date),
                    eff_start: curve_dc.year_fraction(trade_date, p.accrual_start.add_days(-day_shift)?),
                    eff_end: curve_dc.year_fraction(trade_date, p.accrual_end.add_days(-day_shift)?),
                    year_frac,
                    yc_ratio: year_frac / curve_dc.year_fraction(p.accrual_start, p.accrual_end),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            lgd: 1.0 - recovery,
            pay_acc_on_default: conventions.pay_acc_on_default,
            protection_from_start_of_day: conventions.protection_start,
            accrual_start: curve_dc.year_fraction(trade_date, accrual_start),
            effective_protection_start: curve_dc.year_fraction(trade_date, protection_start_date),
            protection_end: curve_dc.year_fraction(trade_date, maturity),
            cash_settle_time: curve_dc.year_fraction(trade_date, cash_settle),
            accrued,
            accrued_days,
            coupons,
        })
    }

    /// Loss given default, `1 − recovery`.
    pub fn lgd(&self) -> Real {
        self.lgd
    }

    /// Recovery rate.
    pub fn recovery_rate(&self) -> Real {
        1.0 - self.lgd
    }

    /// Whether accrued premium is paid on default.
    pub fn pay_acc_on_default(&self) -> bool {
        self.pay_acc_on_default
    }

    /// Whether protection starts at the beginning of the day.
    pub fn protection_from_start_of_day(&self) -> bool {
        self.protection_from_start_of_day
    }

    /// Time of the first accrual start (negative for seasoned contracts).
    pub fn accrual_start(&self) -> Time {
        self.accrual_start
    }

    /// Time from which default is covered.
    pub fn effective_protection_start(&self) -> Time {
        self.effective_protection_start
    }

    /// Time at which protection ends (the maturity).
    pub fn protection_end(&self) -> Time {
        self.protection_end
    }

    /// Time of the cash-settlement (valuation) date.
    pub fn cash_settle_time(&self) -> Time {
        self.cash_settle_time
    }

    /// Accrual year fraction from the current period's start to step-in.
    pub fn accrued_year_fraction(&self) -> Real {
        self.accrued
    }

    /// Accrued premium per unit notional for a given coupon rate.
    pub fn accrued_premium(&self, coupon: Real) -> Real {
        self.accrued * coupon
    }

    /// Accrual days from the current period's start to step-in.
    pub fn accrued_days(&self) -> i64 {
        self.accrued_days
    }

    /// Remaining coupons in payment order.
    pub fn coupons(&self) -> &[CdsCoupon] {
        &self.coupons
    }

    /// Number of remaining coupons.
    pub fn num_coupons(&self) -> usize {
        self.coupons.len()
    }

    /// Shift the time origin forward by `offset` years. Every time decreases
    /// by `offset`; amounts are unchanged.
    pub fn with_offset(&self, offset: Time) -> Self {
        Self {
            accrual_start: self.accrual_start - offset,
            effective_protection_start: self.effective_protection_start - offset,
            protection_end: self.protection_end - offset,
            cash_settle_time: self.cash_settle_time - offset,
            coupons: self.coupons.iter().map(|c| c.with_offset(offset)).collect(),
            ..self.clone()
        }
    }

    /// A copy with a different recovery rate.
    pub fn with_recovery_rate(&self, recovery_rate: Real) -> Result<Self> {
        ensure!(
            (0.0..=1.0).contains(&recovery_rate),
            "recovery rate must be in [0, 1], got {recovery_rate}"
        );
        Ok(Self {
            lgd: 1.0 - recovery_rate,
            ..self.clone()
        })
    }
}
