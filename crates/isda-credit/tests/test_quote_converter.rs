use approx::assert_abs_diff_eq;
use isda_credit::{
    AccrualOnDefaultFormula, CdsAnalytic, CdsAnalyticFactory, MarketQuoteConverter,
};
use isda_curves::YieldCurve;
use isda_time::{Date, Period};
use proptest::prelude::*;

fn date(y: i32, m: u32, d: u32) -> Date {
    Date::from_ymd(y, m, d).unwrap()
}

fn pillars() -> Vec<CdsAnalytic> {
    CdsAnalyticFactory::default()
        .make_imm_cds_series(
            date(2014, 2, 13),
            &[Period::years(1), Period::years(3), Period::years(5), Period::years(7)],
        )
        .unwrap()
}

fn yield_curve() -> YieldCurve {
    YieldCurve::new(&[0.25, 1.0, 3.0, 5.0, 10.0], &[0.003, 0.005, 0.011, 0.017, 0.025]).unwrap()
}

const SPREADS: [f64; 4] = [0.0041, 0.0063, 0.0089, 0.0097];

#[test]
fn par_spreads_round_trip_through_puf() {
    let cds = pillars();
    let yc = yield_curve();
    for formula in [
        AccrualOnDefaultFormula::OriginalIsda,
        AccrualOnDefaultFormula::MarkitFix,
        AccrualOnDefaultFormula::Correct,
    ] {
        let conv = MarketQuoteConverter::new(formula);
        assert_eq!(conv.formula(), formula);
        let pufs = conv.par_spreads_to_puf(&cds, 0.01, &yc, &SPREADS).unwrap();
        // below-coupon spreads mean the seller pays upfront
        assert!(pufs.iter().all(|&p| p < 0.0));
        let back = conv.puf_to_par_spreads(&cds, 0.01, &yc, &pufs).unwrap();
        for (b, s) in back.iter().zip(&SPREADS) {
            assert_abs_diff_eq!(b, s, epsilon = 1e-12);
        }
    }
}

#[test]
fn quoted_spreads_round_trip() {
    let cds = pillars();
    let yc = yield_curve();
    let conv = MarketQuoteConverter::default();
    let quoted = conv
        .par_spreads_to_quoted_spreads(&cds, 0.01, &yc, &SPREADS)
        .unwrap();
    let par = conv
        .quoted_spreads_to_par_spreads(&cds, 0.01, &yc, &quoted)
        .unwrap();
    for (p, s) in par.iter().zip(&SPREADS) {
        assert_abs_diff_eq!(p, s, epsilon = 1e-12);
    }
    // the first pillar has a flat curve of its own, so nothing changes
    assert_abs_diff_eq!(quoted[0], SPREADS[0], epsilon = 1e-12);
    assert!((quoted[3] - SPREADS[3]).abs() > 1e-7);
}

#[test]
fn puf_and_quoted_spread_are_inverse() {
    let cds = pillars();
    let yc = yield_curve();
    let conv = MarketQuoteConverter::default();
    let quoted = [0.003, 0.008, 0.012, 0.02];
    let pufs = conv.quoted_spreads_to_puf(&cds, 0.01, &yc, &quoted).unwrap();
    let back = conv.puf_to_quoted_spreads(&cds, 0.01, &yc, &pufs).unwrap();
    for (b, q) in back.iter().zip(&quoted) {
        assert_abs_diff_eq!(b, q, epsilon = 1e-12);
    }
}

#[test]
fn length_mismatches_are_argument_errors() {
    let cds = pillars();
    let yc = yield_curve();
    let conv = MarketQuoteConverter::default();
    let short = &SPREADS[..3];
    assert!(conv.par_spreads_to_puf(&cds, 0.01, &yc, short).unwrap_err().is_argument_error());
    assert!(conv.puf_to_par_spreads(&cds, 0.01, &yc, short).unwrap_err().is_argument_error());
    assert!(conv.quoted_spreads_to_puf(&cds, 0.01, &yc, short).unwrap_err().is_argument_error());
    assert!(conv.puf_to_quoted_spreads(&cds, 0.01, &yc, short).unwrap_err().is_argument_error());
    assert!(conv
        .quoted_spreads_to_par_spreads(&cds, 0.01, &yc, short)
        .unwrap_err()
        .is_argument_error());
    assert!(conv
        .par_spreads_to_quoted_spreads(&cds, 0.01, &yc, short)
        .unwrap_err()
        .is_argument_error());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn quoted_spread_round_trip(qs in 0.0005f64..0.08, coupon in prop::sample::select(vec![0.01, 0.05])) {
        let cds = &pillars()[2];
        let yc = yield_curve();
        let conv = MarketQuoteConverter::default();
        let puf = conv.quoted_spread_to_puf(cds, coupon, &yc, qs).unwrap();
        prop_assert_eq!(puf > 0.0, qs > coupon);
        let back = conv.puf_to_quoted_spread(cds, coupon, &yc, puf).unwrap();
        prop_assert!((back - qs).abs() < 1e-10);
    }
}
