use approx::assert_abs_diff_eq;
use isda_curves::{
    IsdaInstrumentType, IsdaYieldCurveBuilder, TermStructure, YieldCurve, YieldTermStructure,
};
use isda_time::{
    Actual360, Actual365Fixed, BusinessDayConvention, Calendar, Date, DayCounter, Period,
    PremiumLegScheduleBuilder, StubType, Thirty360, WeekendsOnly,
};

fn date(y: i32, m: u32, d: u32) -> Date {
    Date::from_ymd(y, m, d).unwrap()
}

const TENORS: [&str; 21] = [
    "1M", "2M", "3M", "6M", "9M", "1Y", "2Y", "3Y", "4Y", "5Y", "6Y", "7Y", "8Y", "9Y", "10Y",
    "11Y", "12Y", "15Y", "20Y", "25Y", "30Y",
];

const RATES: [f64; 21] = [
    0.00445, 0.009488, 0.012337, 0.017762, 0.01935, 0.020838, 0.01652, 0.02018, 0.023033,
    0.02525, 0.02696, 0.02825, 0.02931, 0.03017, 0.03092, 0.0316, 0.03231, 0.03367, 0.03419,
    0.03411, 0.03412,
];

fn instruments() -> Vec<IsdaInstrumentType> {
    (0..21)
        .map(|i| {
            if i < 6 {
                IsdaInstrumentType::MoneyMarket
            } else {
                IsdaInstrumentType::Swap
            }
        })
        .collect()
}

fn build(trade: Date, spot: Date) -> YieldCurve {
    let tenors: Vec<Period> = TENORS.iter().map(|s| s.parse().unwrap()).collect();
    IsdaYieldCurveBuilder::new(
        trade,
        spot,
        &instruments(),
        &tenors,
        &Actual360,
        &Thirty360,
        Period::years(1),
        &Actual365Fixed,
        BusinessDayConvention::ModifiedFollowing,
        &WeekendsOnly,
    )
    .unwrap()
    .build(&RATES)
    .unwrap()
}

#[test]
fn reprices_every_instrument() {
    let spot = date(2013, 4, 29);
    let yc = build(spot, spot);
    assert_eq!(yc.num_knots(), 21);
    let cal = WeekendsOnly;
    let conv = BusinessDayConvention::ModifiedFollowing;

    for (i, tenor) in TENORS.iter().enumerate() {
        let mat = spot.plus(tenor.parse().unwrap()).unwrap();
        if i < 6 {
            let adj = cal.adjust(mat, conv);
            let t = Actual365Fixed.year_fraction(spot, adj);
            let yf = Actual360.year_fraction(spot, adj);
            assert_abs_diff_eq!(yc.discount(t), 1.0 / (1.0 + yf * RATES[i]), epsilon = 1e-14);
        } else {
            let schedule = PremiumLegScheduleBuilder::new(spot, mat, Period::years(1), &cal)
                .with_convention(conv)
                .with_stub(StubType::FrontShort)
                .with_protection_start(false)
                .build()
                .unwrap();
            let mut start = spot;
            let mut annuity = 0.0;
            let mut last = 0.0;
            let pay_dates = schedule.periods().iter().map(|p| cal.adjust(p.accrual_end, conv));
            for pay in pay_dates {
                last = yc.discount(Actual365Fixed.year_fraction(spot, pay));
                annuity += Thirty360.year_fraction(start, pay) * last;
                start = pay;
            }
            assert_abs_diff_eq!(RATES[i] * annuity + last, 1.0, epsilon = 1e-12);
        }
    }
}

#[test]
fn trade_date_curve_discounts_past_spot() {
    let trade = date(2013, 4, 25);
    let spot = date(2013, 4, 29);
    let at_spot = build(spot, spot);
    let at_trade = build(trade, spot);
    let gap = Actual365Fixed.year_fraction(trade, spot);
    for t in [0.1, 1.0, 5.0, 29.0] {
        let expected = at_spot.discount(t) * at_trade.discount(gap);
        assert_abs_diff_eq!(at_trade.discount(t + gap), expected, epsilon = 1e-13);
    }
}

#[test]
fn curve_is_positive_and_decreasing() {
    let yc = build(date(2013, 4, 25), date(2013, 4, 29));
    let mut prev = 1.0;
    for k in 1..=120 {
        let df = yc.discount(k as f64 * 0.25);
        assert!(df > 0.0 && df < prev);
        prev = df;
    }
}

#[test]
fn swap_knots_sit_at_adjusted_maturities() {
    let spot = date(2013, 4, 29);
    let tenors: Vec<Period> = TENORS.iter().map(|s| s.parse().unwrap()).collect();
    let builder = IsdaYieldCurveBuilder::new(
        spot,
        spot,
        &instruments(),
        &tenors,
        &Actual360,
        &Thirty360,
        Period::years(1),
        &Actual365Fixed,
        BusinessDayConvention::ModifiedFollowing,
        &WeekendsOnly,
    )
    .unwrap();
    let knot = |i: usize, d: Date| {
        assert_eq!(builder.knot_times()[i], Actual365Fixed.year_fraction(spot, d));
    };
    // Saturday maturities roll back to Friday at the month end
    knot(8, date(2017, 4, 28));
    knot(14, date(2023, 4, 28));
    knot(17, date(2028, 4, 28));
    // business days stay put
    knot(13, date(2022, 4, 29));
    knot(20, date(2043, 4, 29));
}
