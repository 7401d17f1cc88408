//! ISDA premium-leg schedule.
//!
//! The schedule of a CDS premium leg is generated from unadjusted nominal
//! dates (rolled backward from the maturity for front stubs, forward from the
//! start for back stubs) and then adjusted:
//!
//! * the first accrual start is kept as given;
//! * every intermediate nominal date is business-day adjusted and is both the
//!   accrual end of one period and the accrual start of the next, and the
//!   payment date of the earlier period;
//! * the last accrual end is the maturity, plus one day when protection
//!   starts at the beginning of the day, and the last payment is the adjusted
//!   maturity.

use isda_core::errors::{Error, Result};
use isda_core::ensure;

use crate::business_day_convention::BusinessDayConvention;
use crate::calendar::Calendar;
use crate::date::Date;
use crate::period::Period;

/// Placement of the irregular period of a schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StubType {
    /// Short first period (the CDS standard).
    #[default]
    FrontShort,
    /// Long first period.
    FrontLong,
    /// Short last period.
    BackShort,
    /// Long last period.
    BackLong,
    /// No stub: the interval must divide the schedule exactly.
    None,
}

/// One accrual period of a premium leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AccrualPeriod {
    /// First day of accrual.
    pub accrual_start: Date,
    /// End of accrual (exclusive).
    pub accrual_end: Date,
    /// Date the coupon is paid.
    pub payment_date: Date,
}

/// An ordered, contiguous sequence of accrual periods.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PremiumLegSchedule {
    periods: Vec<AccrualPeriod>,
}

impl PremiumLegSchedule {
    /// All accrual periods in time order.
    pub fn periods(&self) -> &[AccrualPeriod] {
        &self.periods
    }

    /// Number of coupon payments.
    pub fn len(&self) -> usize {
        self.periods.len()
    }

    /// Return `true` if the schedule has no periods.
    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    /// The `i`-th accrual period.
    pub fn period(&self, i: usize) -> Result<&AccrualPeriod> {
        self.periods.get(i).ok_or(Error::IndexOutOfRange {
            index: i,
            size: self.periods.len(),
        })
    }

    /// Drop the periods whose accrual ends on or before `step_in`. The first
    /// remaining period is the one that accrues on the step-in date.
    pub fn truncate(&self, step_in: Date) -> Result<Self> {
        let first = self
            .periods
            .iter()
            .position(|p| p.accrual_end > step_in)
            .ok_or_else(|| {
                Error::InvalidArgument(format!("schedule ends before step-in date {step_in}"))
            })?;
        Ok(Self {
            periods: self.periods[first..].to_vec(),
        })
    }
}

/// Builder for [`PremiumLegSchedule`].
#[derive(Debug)]
pub struct PremiumLegScheduleBuilder<'a> {
    start: Date,
    end: Date,
    interval: Period,
    calendar: &'a dyn Calendar,
    convention: BusinessDayConvention,
    stub: StubType,
    protection_start: bool,
}

impl<'a> PremiumLegScheduleBuilder<'a> {
    /// Begin building a schedule from `start` to `end` with coupons every
    /// `interval`. Defaults: following convention, front short stub,
    /// protection from the start of the day.
    pub fn new(start: Date, end: Date, interval: Period, calendar: &'a dyn Calendar) -> Self {
        Self {
            start,
            end,
            interval,
            calendar,
            convention: BusinessDayConvention::Following,
            stub: StubType::FrontShort,
            protection_start: true,
        }
    }

    /// Set the business-day convention.
    pub fn with_convention(mut self, convention: BusinessDayConvention) -> Self {
        self.convention = convention;
        self
    }

    /// Set the stub placement.
    pub fn with_stub(mut self, stub: StubType) -> Self {
        self.stub = stub;
        self
    }

    /// Whether protection (and the last accrual) includes the maturity date.
    pub fn with_protection_start(mut self, flag: bool) -> Self {
        self.protection_start = flag;
        self
    }

    /// Build the schedule.
    pub fn build(self) -> Result<PremiumLegSchedule> {
        ensure!(
            self.end > self.start,
            "schedule end {} must be after start {}",
            self.end,
            self.start
        );
        ensure!(self.interval.is_positive(), "coupon interval must be positive, got {}", self.interval);

        let nominal = match self.stub {
            StubType::FrontShort | StubType::FrontLong | StubType::None => {
                backward_dates(self.start, self.end, self.interval, self.stub == StubType::FrontLong)?
            }
            StubType::BackShort | StubType::BackLong => {
                forward_dates(self.start, self.end, self.interval, self.stub == StubType::BackLong)?
            }
        };
        if self.stub == StubType::None {
            let regular = self.start.plus(self.interval.times(nominal.len() as i32 - 1))?;
            ensure!(
                regular == self.end,
                "{} to {} is not a whole number of {} periods",
                self.start,
                self.end,
                self.interval
            );
        }

        let n = nominal.len() - 1;
        let mut periods = Vec::with_capacity(n);
        let mut accrual_start = self.start;
        for (i, &d) in nominal.iter().enumerate().skip(1) {
            let period = if i < n {
                let adjusted = self.calendar.adjust(d, self.convention);
                AccrualPeriod {
                    accrual_start,
                    accrual_end: adjusted,
                    payment_date: adjusted,
                }
            } else {
                let accrual_end = if self.protection_start { self.end.add_days(1)? } else { self.end };
                AccrualPeriod {
                    accrual_start,
                    accrual_end,
                    payment_date: self.calendar.adjust(self.end, self.convention),
                }
            };
            accrual_start = period.accrual_end;
            periods.push(period);
        }
        Ok(PremiumLegSchedule { periods })
    }
}

/// Nominal dates rolled back from `end`; the first date is `start`.
fn backward_dates(start: Date, end: Date, interval: Period, long_stub: bool) -> Result<Vec<Date>> {
    let mut dates = vec![end];
    let mut step = 1;
    let mut d = end.minus(interval)?;
    while d > start {
        dates.push(d);
        step += 1;
        d = end.minus(interval.times(step))?;
    }
    if long_stub && d != start && dates.len() > 1 {
        dates.pop();
    }
    dates.push(start);
    dates.reverse();
    Ok(dates)
}

/// Nominal dates rolled forward from `start`; the last date is `end`.
fn forward_dates(start: Date, end: Date, interval: Period, long_stub: bool) -> Result<Vec<Date>> {
    let mut dates = vec![start];
    let mut step = 1;
    let mut d = start.plus(interval)?;
    while d < end {
        dates.push(d);
        step += 1;
        d = start.plus(interval.times(step))?;
    }
    if long_stub && d != end && dates.len() > 1 {
        dates.pop();
    }
    dates.push(end);
    Ok(dates)
}
