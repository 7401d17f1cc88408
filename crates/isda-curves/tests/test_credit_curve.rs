use approx::assert_abs_diff_eq;
use isda_curves::{CreditCurve, DefaultProbabilityTermStructure, TermStructure};
use proptest::prelude::*;

#[test]
fn piecewise_constant_forward_hazard() {
    let cc = CreditCurve::new(&[0.5, 1.0, 3.0, 5.0], &[0.02, 0.025, 0.03, 0.035]).unwrap();
    let fwd = cc.forward_rate(4.0);
    for t in [3.2, 3.9, 4.5, 5.0] {
        assert_abs_diff_eq!(cc.forward_rate(t), fwd, epsilon = 1e-14);
    }
    // survival between knots is exponential in the forward hazard
    let q3 = cc.survival_probability(3.0);
    assert_abs_diff_eq!(cc.survival_probability(4.0), q3 * (-fwd).exp(), epsilon = 1e-14);
    assert_eq!(cc.max_knot_time(), 5.0);
}

#[test]
fn offset_curve_conditions_on_survival() {
    let cc = CreditCurve::new(&[1.0, 3.0, 5.0], &[0.01, 0.02, 0.03]).unwrap();
    let shifted = cc.with_offset(2.0).unwrap();
    assert_eq!(shifted.num_knots(), 2);
    assert_abs_diff_eq!(
        shifted.survival_probability(1.5),
        cc.conditional_survival_probability(2.0, 3.5),
        epsilon = 1e-14
    );
}

proptest! {
    #[test]
    fn survival_decreases_with_non_negative_forwards(
        h in prop::collection::vec(0.001f64..0.2, 1..6)
    ) {
        // cumulative sums of non-negative forwards give non-negative segment forwards
        let times: Vec<f64> = (1..=h.len()).map(|i| i as f64).collect();
        let mut rt = 0.0;
        let rates: Vec<f64> = h.iter().zip(&times).map(|(f, t)| { rt += f; rt / t }).collect();
        let cc = CreditCurve::new(&times, &rates).unwrap();
        prop_assert!(cc.has_non_negative_forwards());
        let mut prev = 1.0;
        for k in 0..=40 {
            let q = cc.survival_probability(k as f64 * 0.2);
            prop_assert!(q <= prev + 1e-15);
            prev = q;
        }
    }
}
