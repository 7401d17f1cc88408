//! # isda-time
//!
//! Dates, periods, calendars, day counters, CDS roll dates and the ISDA
//! premium-leg schedule.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Business-day adjustment conventions.
pub mod business_day_convention;

/// Calendar trait and built-in implementations.
pub mod calendar;

/// `Date` type.
pub mod date;

/// `DayCounter` trait and built-in day-count conventions.
pub mod day_counter;

/// Coupon frequency.
pub mod frequency;

/// CDS roll dates (20th of Mar/Jun/Sep/Dec).
pub mod imm;

/// `Period`: a time span in a `TimeUnit`.
pub mod period;

/// ISDA premium-leg schedule and stub conventions.
pub mod schedule;

/// `TimeUnit`: days, weeks, months, years.
pub mod time_unit;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use business_day_convention::BusinessDayConvention;
pub use calendar::{Calendar, HolidayCalendar, NullCalendar, WeekendsOnly};
pub use date::{Date, Weekday};
pub use day_counter::{Actual360, Actual365Fixed, ActualActualIsda, DayCounter, Thirty360};
pub use frequency::Frequency;
pub use imm::CdsImm;
pub use period::Period;
pub use schedule::{AccrualPeriod, PremiumLegSchedule, PremiumLegScheduleBuilder, StubType};
pub use time_unit::TimeUnit;
