use approx::assert_abs_diff_eq;
use isda_core::errors::Error;
use isda_credit::{
    AccrualOnDefaultFormula, AnalyticCdsPricer, ArbitrageHandling, CdsAnalytic, CdsAnalyticFactory,
    CdsConventions, CdsQuote, CreditCurveCalibrator, FastCreditCurveBuilder, MarketQuoteConverter,
    ParSpread, PointsUpFront, QuotedSpread, SimpleCreditCurveBuilder,
};
use isda_curves::{
    CreditCurve, DefaultProbabilityTermStructure, IsdaInstrumentType, IsdaYieldCurveBuilder,
    TermStructure, YieldCurve,
};
use isda_time::{
    Actual360, Actual365Fixed, BusinessDayConvention, Calendar, CdsImm, Date, Period, Thirty360,
    WeekendsOnly,
};

fn date(y: i32, m: u32, d: u32) -> Date {
    Date::from_ymd(y, m, d).unwrap()
}

const FORMULAE: [AccrualOnDefaultFormula; 3] = [
    AccrualOnDefaultFormula::OriginalIsda,
    AccrualOnDefaultFormula::MarkitFix,
    AccrualOnDefaultFormula::Correct,
];

const SPREADS: [f64; 6] = [0.027, 0.017, 0.012, 0.009, 0.008, 0.005];

const SAMPLE_TIMES: [f64; 15] = [
    30.0 / 365.0,
    90.0 / 365.0,
    180.0 / 365.0,
    1.0,
    2.0,
    3.0,
    4.0,
    5.0,
    6.0,
    7.0,
    8.0,
    9.0,
    10.0,
    11.0,
    12.0,
];

fn trade_date() -> Date {
    date(2013, 4, 25)
}

fn tenors() -> Vec<Period> {
    vec![
        Period::months(6),
        Period::years(1),
        Period::years(3),
        Period::years(5),
        Period::years(7),
        Period::years(10),
    ]
}

fn yield_curve() -> YieldCurve {
    let trade = trade_date();
    let spot = WeekendsOnly.advance_business_days(trade - 1, 3);
    let tenors: Vec<Period> = [
        "1M", "2M", "3M", "6M", "9M", "1Y", "2Y", "3Y", "4Y", "5Y", "6Y", "7Y", "8Y", "9Y", "10Y",
        "11Y", "12Y", "15Y", "20Y", "25Y", "30Y",
    ]
    .iter()
    .map(|s| s.parse().unwrap())
    .collect();
    let instruments: Vec<IsdaInstrumentType> = (0..tenors.len())
        .map(|i| {
            if i < 6 {
                IsdaInstrumentType::MoneyMarket
            } else {
                IsdaInstrumentType::Swap
            }
        })
        .collect();
    let rates = [
        0.00445, 0.009488, 0.012337, 0.017762, 0.01935, 0.020838, 0.01652, 0.02018, 0.023033,
        0.02525, 0.02696, 0.02825, 0.02931, 0.03017, 0.03092, 0.0316, 0.03231, 0.03367, 0.03419,
        0.03411, 0.03412,
    ];
    IsdaYieldCurveBuilder::new(
        trade,
        spot,
        &instruments,
        &tenors,
        &Actual360,
        &Thirty360,
        Period::years(1),
        &Actual365Fixed,
        BusinessDayConvention::ModifiedFollowing,
        &WeekendsOnly,
    )
    .unwrap()
    .build(&rates)
    .unwrap()
}

fn pillars(pay_acc_on_default: bool) -> Vec<CdsAnalytic> {
    CdsAnalyticFactory::default()
        .with_pay_acc_on_default(pay_acc_on_default)
        .make_imm_cds_series(trade_date(), &tenors())
        .unwrap()
}

fn assert_same_hazards(a: &CreditCurve, b: &CreditCurve, tol: f64) {
    for &t in &SAMPLE_TIMES {
        assert_abs_diff_eq!(a.hazard_rate(t), b.hazard_rate(t), epsilon = tol);
    }
}

fn assert_same_forwards(a: &CreditCurve, b: &CreditCurve, tol: f64) {
    for &t in &SAMPLE_TIMES {
        assert_abs_diff_eq!(a.forward_rate(t), b.forward_rate(t), epsilon = tol);
    }
}

// ── Fast vs simple ────────────────────────────────────────────────────────────

#[test]
fn fast_and_simple_agree_without_accrual_on_default() {
    let yc = yield_curve();
    let cds = pillars(false);
    for formula in FORMULAE {
        let fast = FastCreditCurveBuilder::new(formula, ArbitrageHandling::Ignore)
            .calibrate_par_spreads(&cds, &SPREADS, &yc)
            .unwrap();
        let simple = SimpleCreditCurveBuilder::new(formula)
            .calibrate_par_spreads(&cds, &SPREADS, &yc)
            .unwrap();
        assert_eq!(fast.num_knots(), 6);
        assert_same_hazards(&fast, &simple, 1e-6);
    }
}

#[test]
fn fast_and_simple_agree_with_accrual_on_default() {
    let yc = yield_curve();
    let cds = pillars(true);
    for formula in FORMULAE {
        let fast = FastCreditCurveBuilder::new(formula, ArbitrageHandling::Ignore)
            .calibrate_par_spreads(&cds, &SPREADS, &yc)
            .unwrap();
        let simple = SimpleCreditCurveBuilder::new(formula)
            .calibrate_par_spreads(&cds, &SPREADS, &yc)
            .unwrap();
        assert_same_hazards(&fast, &simple, 1e-6);

        let repriced = AnalyticCdsPricer::new(formula).par_spreads(&cds, &yc, &fast).unwrap();
        for (r, s) in repriced.iter().zip(&SPREADS) {
            assert_abs_diff_eq!(r, s, epsilon = 1e-10);
        }
    }
}

#[test]
fn knots_sit_at_protection_ends() {
    let yc = yield_curve();
    let cds = pillars(true);
    let cc = FastCreditCurveBuilder::default()
        .calibrate_par_spreads(&cds, &SPREADS, &yc)
        .unwrap();
    let ends: Vec<f64> = cds.iter().map(CdsAnalytic::protection_end).collect();
    assert_eq!(cc.knot_times(), ends.as_slice());
}

// ── Single pillar ─────────────────────────────────────────────────────────────

#[test]
fn single_pillar_quote_conventions_agree() {
    let yc = yield_curve();
    let cds = pillars(false);
    let pillar = &cds[3];
    let coupon = 0.025;
    let fast = FastCreditCurveBuilder::default();
    let simple = SimpleCreditCurveBuilder::new(AccrualOnDefaultFormula::OriginalIsda);
    let conv = MarketQuoteConverter::default();

    let one = std::slice::from_ref(pillar);
    let pufs = conv.par_spreads_to_puf(one, coupon, &yc, &[SPREADS[3]]).unwrap();
    let qsps = conv
        .quoted_spreads_to_par_spreads(one, coupon, &yc, &[SPREADS[3]])
        .unwrap();

    let puf: CdsQuote = PointsUpFront::new(coupon, pufs[0]).into();
    let qsp: CdsQuote = QuotedSpread::new(coupon, qsps[0]).into();
    let psp: CdsQuote = ParSpread::new(SPREADS[3]).into();

    let curve_puf = fast.calibrate_single(pillar, &puf, &yc).unwrap();
    let curve_qsp = fast.calibrate_single(pillar, &qsp, &yc).unwrap();
    let curve_psp = fast.calibrate_single(pillar, &psp, &yc).unwrap();
    let curve_simple = simple.calibrate_single(pillar, &puf, &yc).unwrap();

    let trade = trade_date();
    let conventions = CdsConventions {
        pay_acc_on_default: false,
        ..CdsConventions::default()
    };
    let curve_dated = fast
        .calibrate_dated(
            &conventions,
            trade,
            trade + 1,
            WeekendsOnly.advance_business_days(trade, 3),
            CdsImm::prev_date(trade).unwrap(),
            &[CdsImm::next_date(trade.plus(Period::years(5)).unwrap()).unwrap()],
            &[SPREADS[3]],
            &yc,
        )
        .unwrap();

    for cc in [&curve_puf, &curve_qsp, &curve_psp, &curve_dated] {
        assert_eq!(cc.num_knots(), 1);
    }
    assert_same_forwards(&curve_puf, &curve_qsp, 1e-12);
    assert_same_forwards(&curve_puf, &curve_psp, 1e-12);
    assert_same_forwards(&curve_puf, &curve_dated, 1e-12);
    assert_same_forwards(&curve_simple, &curve_puf, 1e-6);

    // a flat curve has one constant forward
    let f = curve_psp.forward_rate(0.1);
    for &t in &SAMPLE_TIMES {
        assert_abs_diff_eq!(curve_psp.forward_rate(t), f, epsilon = 1e-14);
    }
}

#[test]
fn mixed_quotes_rebuild_the_par_curve() {
    let yc = yield_curve();
    let cds = pillars(true);
    let builder = FastCreditCurveBuilder::default();
    let par_curve = builder.calibrate_par_spreads(&cds, &SPREADS, &yc).unwrap();
    let conv = MarketQuoteConverter::default();
    let pufs = conv.par_spreads_to_puf(&cds, 0.01, &yc, &SPREADS).unwrap();

    let quotes: Vec<CdsQuote> = (0..cds.len())
        .map(|i| {
            if i % 2 == 0 {
                ParSpread::new(SPREADS[i]).into()
            } else {
                PointsUpFront::new(0.01, pufs[i]).into()
            }
        })
        .collect();
    let mixed = builder.calibrate_quotes(&cds, &quotes, &yc).unwrap();
    for (a, b) in mixed.zero_rates().iter().zip(par_curve.zero_rates()) {
        assert_abs_diff_eq!(a, b, epsilon = 1e-10);
    }

    let as_puf: Vec<PointsUpFront> = pufs.iter().map(|&p| PointsUpFront::new(0.01, p)).collect();
    let from_puf = builder.calibrate_points_upfront(&cds, &as_puf, &yc).unwrap();
    for (a, b) in from_puf.zero_rates().iter().zip(par_curve.zero_rates()) {
        assert_abs_diff_eq!(a, b, epsilon = 1e-10);
    }
}

// ── Input validation ──────────────────────────────────────────────────────────

#[test]
fn bad_inputs_are_argument_errors() {
    let yc = yield_curve();
    let cds = pillars(false);
    let n = cds.len();
    let coupon = 0.025;
    let fail = FastCreditCurveBuilder::new(AccrualOnDefaultFormula::OriginalIsda, ArbitrageHandling::Fail);
    let pufs = MarketQuoteConverter::default()
        .par_spreads_to_puf(&cds, coupon, &yc, &SPREADS)
        .unwrap();
    let premiums = vec![coupon; n];

    let err = fail
        .calibrate_with_upfront(&cds, &premiums, &yc, &pufs[..n - 1])
        .unwrap_err();
    assert!(err.is_argument_error());
    let err = fail
        .calibrate_with_upfront(&cds, &premiums[..n - 1], &yc, &pufs)
        .unwrap_err();
    assert!(err.is_argument_error());

    let mut shifted = cds.clone();
    shifted[2] = shifted[2].with_offset(0.5);
    let err = fail
        .calibrate_with_upfront(&shifted, &premiums, &yc, &pufs)
        .unwrap_err();
    assert!(err.is_argument_error());

    let mut swapped = cds.clone();
    swapped.swap(2, 3);
    let err = fail
        .calibrate_with_upfront(&swapped, &premiums, &yc, &pufs)
        .unwrap_err();
    assert!(err.is_argument_error());

    let err = fail.calibrate_par_spreads(&[], &[], &yc).unwrap_err();
    assert!(err.is_argument_error());

    let trade = trade_date();
    let err = FastCreditCurveBuilder::default()
        .calibrate_dated(
            &CdsConventions::default(),
            trade,
            trade + 1,
            WeekendsOnly.advance_business_days(trade, 3),
            CdsImm::prev_date(trade).unwrap(),
            &[date(2018, 6, 20)],
            &SPREADS,
            &yc,
        )
        .unwrap_err();
    assert!(err.is_argument_error());
}

// ── Arbitrage handling ────────────────────────────────────────────────────────

#[test]
fn fail_reports_the_inverted_pillar() {
    let yc = yield_curve();
    let cds = pillars(false);
    let fail = FastCreditCurveBuilder::new(AccrualOnDefaultFormula::OriginalIsda, ArbitrageHandling::Fail);

    let err = fail.calibrate_par_spreads(&cds, &SPREADS, &yc).unwrap_err();
    assert!(err.is_argument_error());
    assert!(matches!(err, Error::Arbitrage { index: 5, .. }), "{err}");

    let coupon = 0.025;
    let quotes: Vec<PointsUpFront> = MarketQuoteConverter::default()
        .par_spreads_to_puf(&cds, coupon, &yc, &SPREADS)
        .unwrap()
        .into_iter()
        .map(|p| PointsUpFront::new(coupon, p))
        .collect();
    let err = fail.calibrate_points_upfront(&cds, &quotes, &yc).unwrap_err();
    assert!(err.is_argument_error());

    let simple_fail = SimpleCreditCurveBuilder::with_arbitrage_handling(
        AccrualOnDefaultFormula::OriginalIsda,
        ArbitrageHandling::Fail,
    );
    assert!(simple_fail
        .calibrate_par_spreads(&cds, &SPREADS, &yc)
        .unwrap_err()
        .is_argument_error());
}

#[test]
fn zero_hazard_rate_floors_the_inverted_segment() {
    let yc = yield_curve();
    let cds = pillars(true);
    let formula = AccrualOnDefaultFormula::MarkitFix;
    let cc = FastCreditCurveBuilder::new(formula, ArbitrageHandling::ZeroHazardRate)
        .calibrate_par_spreads(&cds, &SPREADS, &yc)
        .unwrap();
    assert!(cc.has_non_negative_forwards());
    assert_abs_diff_eq!(cc.forward_rate(9.0), 0.0, epsilon = 1e-12);

    let repriced = AnalyticCdsPricer::new(formula).par_spreads(&cds, &yc, &cc).unwrap();
    for i in 0..5 {
        assert_abs_diff_eq!(repriced[i], SPREADS[i], epsilon = 1e-10);
    }
    // with no default risk added past 7Y the last pillar is worth more
    assert!(repriced[5] > SPREADS[5]);
}

#[test]
fn ignore_allows_negative_forwards() {
    let yc = yield_curve();
    let cds = pillars(true);
    let formula = AccrualOnDefaultFormula::Correct;
    let cc = FastCreditCurveBuilder::new(formula, ArbitrageHandling::Ignore)
        .calibrate_par_spreads(&cds, &SPREADS, &yc)
        .unwrap();
    assert!(!cc.has_non_negative_forwards());
    assert!(cc.forward_rate(9.0) < 0.0);
    assert!(cc.survival_probability(10.0) > cc.survival_probability(7.5));

    let repriced = AnalyticCdsPricer::new(formula).par_spreads(&cds, &yc, &cc).unwrap();
    for (r, s) in repriced.iter().zip(&SPREADS) {
        assert_abs_diff_eq!(r, s, epsilon = 1e-10);
    }
}

// ── Determinism ───────────────────────────────────────────────────────────────

#[test]
fn repeat_calibration_is_bit_identical() {
    let yc = yield_curve();
    let cds = pillars(true);
    let builder = FastCreditCurveBuilder::new(AccrualOnDefaultFormula::OriginalIsda, ArbitrageHandling::Ignore);
    let first = builder.calibrate_par_spreads(&cds, &SPREADS, &yc).unwrap();
    let second = builder.calibrate_par_spreads(&cds, &SPREADS, &yc).unwrap();
    assert_eq!(first, second);
}

#[test]
fn concurrent_calibrations_match_serial() {
    let yc = yield_curve();
    let cds = pillars(true);
    let builders: Vec<Box<dyn CreditCurveCalibrator>> = FORMULAE
        .iter()
        .flat_map(|&f| {
            [
                Box::new(FastCreditCurveBuilder::new(f, ArbitrageHandling::Ignore)) as Box<dyn CreditCurveCalibrator>,
                Box::new(SimpleCreditCurveBuilder::new(f)),
            ]
        })
        .collect();
    let serial: Vec<CreditCurve> = builders
        .iter()
        .map(|b| b.calibrate_par_spreads(&cds, &SPREADS, &yc).unwrap())
        .collect();

    let (cds, yc) = (&cds, &yc);
    let parallel: Vec<CreditCurve> = std::thread::scope(|s| {
        let handles: Vec<_> = builders
            .iter()
            .map(|b| s.spawn(move || b.calibrate_par_spreads(cds, &SPREADS, yc).unwrap()))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    assert_eq!(serial, parallel);
}
