//! `CdsAnalyticFactory`: builds [`CdsAnalytic`]s from trade dates and tenors.
//!
//! The factory is an immutable set of conventions. Its `with_*` methods return
//! a modified copy, so a shared default factory can be specialised locally
//! without affecting other users.

use std::sync::Arc;

use isda_core::{errors::Result, Real};
use isda_time::{
    BusinessDayConvention, Calendar, CdsImm, Date, DayCounter, Frequency, Period, StubType,
};

use crate::cds_analytic::{CdsAnalytic, CdsConventions};

/// Calendar days from trade date to step-in.
pub const DEFAULT_STEP_IN_DAYS: i64 = 1;

/// Business days from trade date to cash settlement.
pub const DEFAULT_CASH_SETTLE_DAYS: i32 = 3;

/// Factory for CDS analytics under the ISDA standard conventions.
///
/// # Example
/// ```
/// use isda_credit::CdsAnalyticFactory;
/// use isda_time::{Date, Period};
///
/// let trade = Date::from_ymd(2013, 4, 25).unwrap();
/// let factory = CdsAnalyticFactory::default().with_recovery_rate(0.25);
/// let cds = factory.make_imm_cds(trade, Period::years(5)).unwrap();
/// assert_eq!(cds.num_coupons(), 21);
/// assert!((cds.lgd() - 0.75).abs() < 1e-15);
/// ```
#[derive(Debug, Clone)]
pub struct CdsAnalyticFactory {
    step_in_days: i64,
    cash_settle_days: i32,
    conventions: CdsConventions,
}

impl Default for CdsAnalyticFactory {
    fn default() -> Self {
        Self {
            step_in_days: DEFAULT_STEP_IN_DAYS,
            cash_settle_days: DEFAULT_CASH_SETTLE_DAYS,
            conventions: CdsConventions::default(),
        }
    }
}

impl CdsAnalyticFactory {
    /// Factory with the standard conventions and a given recovery rate.
    pub fn new(recovery_rate: Real) -> Self {
        Self::default().with_recovery_rate(recovery_rate)
    }

    /// The conventions handed to every CDS this factory builds.
    pub fn conventions(&self) -> &CdsConventions {
        &self.conventions
    }

    /// Calendar days from trade date to step-in.
    pub fn step_in_days(&self) -> i64 {
        self.step_in_days
    }

    /// Business days from trade date to cash settlement.
    pub fn cash_settle_days(&self) -> i32 {
        self.cash_settle_days
    }

    // ── Builders ─────────────────────────────────────────────────────────

    /// Set whether accrued premium is paid on default.
    pub fn with_pay_acc_on_default(&self, flag: bool) -> Self {
        let mut f = self.clone();
        f.conventions.pay_acc_on_default = flag;
        f
    }

    /// Set the recovery rate (checked when a CDS is built).
    pub fn with_recovery_rate(&self, recovery_rate: Real) -> Self {
        let mut f = self.clone();
        f.conventions.recovery_rate = recovery_rate;
        f
    }

    /// Set the coupon interval.
    pub fn with_coupon_interval(&self, interval: Period) -> Self {
        let mut f = self.clone();
        f.conventions.coupon_interval = interval;
        f
    }

    /// Set the coupon interval from a payment frequency.
    pub fn with_coupon_frequency(&self, frequency: Frequency) -> Self {
        self.with_coupon_interval(Period::from_frequency(frequency))
    }

    /// Set the stub placement.
    pub fn with_stub_type(&self, stub: StubType) -> Self {
        let mut f = self.clone();
        f.conventions.stub_type = stub;
        f
    }

    /// Set whether protection starts at the beginning of the day.
    pub fn with_protection_start(&self, flag: bool) -> Self {
        let mut f = self.clone();
        f.conventions.protection_start = flag;
        f
    }

    /// Set the step-in offset in calendar days.
    pub fn with_step_in(&self, days: i64) -> Self {
        let mut f = self.clone();
        f.step_in_days = days;
        f
    }

    /// Set the cash-settlement offset in business days.
    pub fn with_cash_settle(&self, days: i32) -> Self {
        let mut f = self.clone();
        f.cash_settle_days = days;
        f
    }

    /// Set the business-day convention for coupon dates.
    pub fn with_business_day_convention(&self, convention: BusinessDayConvention) -> Self {
        let mut f = self.clone();
        f.conventions.business_day_convention = convention;
        f
    }

    /// Set the calendar.
    pub fn with_calendar(&self, calendar: Arc<dyn Calendar>) -> Self {
        let mut f = self.clone();
        f.conventions.calendar = calendar;
        f
    }

    /// Set the day count of premium amounts.
    pub fn with_accrual_day_count(&self, day_count: Arc<dyn DayCounter>) -> Self {
        let mut f = self.clone();
        f.conventions.accrual_day_count = day_count;
        f
    }

    /// Set the day count from dates to curve times.
    pub fn with_curve_day_count(&self, day_count: Arc<dyn DayCounter>) -> Self {
        let mut f = self.clone();
        f.conventions.curve_day_count = day_count;
        f
    }

    // ── Construction ─────────────────────────────────────────────────────

    fn step_in_date(&self, trade_date: Date) -> Result<Date> {
        trade_date.add_days(self.step_in_days)
    }

    fn cash_settle_date(&self, trade_date: Date) -> Date {
        self.conventions
            .calendar
            .advance_business_days(trade_date, self.cash_settle_days)
    }

    /// A CDS with the factory's step-in and cash-settle offsets.
    pub fn make_cds(&self, trade_date: Date, accrual_start: Date, maturity: Date) -> Result<CdsAnalytic> {
        self.make_cds_with_dates(
            trade_date,
            self.step_in_date(trade_date)?,
            self.cash_settle_date(trade_date),
            accrual_start,
            maturity,
        )
    }

    /// A CDS with explicit step-in and valuation dates.
    pub fn make_cds_with_dates(
        &self,
        trade_date: Date,
        step_in: Date,
        value_date: Date,
        accrual_start: Date,
        maturity: Date,
    ) -> Result<CdsAnalytic> {
        CdsAnalytic::new(
            trade_date,
            step_in,
            value_date,
            accrual_start,
            maturity,
            &self.conventions,
        )
    }

    /// CDSs sharing a trade date and accrual start, one per maturity.
    pub fn make_cds_series(
        &self,
        trade_date: Date,
        accrual_start: Date,
        maturities: &[Date],
    ) -> Result<Vec<CdsAnalytic>> {
        self.make_cds_series_with_dates(
            trade_date,
            self.step_in_date(trade_date)?,
            self.cash_settle_date(trade_date),
            accrual_start,
            maturities,
        )
    }

    /// CDSs with explicit step-in and valuation dates, one per maturity.
    pub fn make_cds_series_with_dates(
        &self,
        trade_date: Date,
        step_in: Date,
        value_date: Date,
        accrual_start: Date,
        maturities: &[Date],
    ) -> Result<Vec<CdsAnalytic>> {
        maturities
            .iter()
            .map(|&m| self.make_cds_with_dates(trade_date, step_in, value_date, accrual_start, m))
            .collect()
    }

    /// Accrual start of a standard contract: the adjusted previous IMM date.
    pub fn imm_accrual_start(&self, trade_date: Date) -> Result<Date> {
        let prev = CdsImm::prev_date(trade_date)?;
        Ok(self
            .conventions
            .calendar
            .adjust(prev, self.conventions.business_day_convention))
    }

    /// A standard IMM CDS: accrual from the previous IMM date, maturity at
    /// the next IMM date plus `tenor`.
    pub fn make_imm_cds(&self, trade_date: Date, tenor: Period) -> Result<CdsAnalytic> {
        let accrual_start = self.imm_accrual_start(trade_date)?;
        let maturity = CdsImm::maturity_for_tenor(trade_date, tenor)?;
        self.make_cds(trade_date, accrual_start, maturity)
    }

    /// Standard IMM CDSs for a strip of tenors.
    pub fn make_imm_cds_series(&self, trade_date: Date, tenors: &[Period]) -> Result<Vec<CdsAnalytic>> {
        let accrual_start = self.imm_accrual_start(trade_date)?;
        let maturities = CdsImm::maturities_for_tenors(trade_date, tenors)?;
        self.make_cds_series(trade_date, accrual_start, &maturities)
    }
}
