//! Functions of the form `(e^x − 1)/x` that appear when integrating
//! exponentials over short intervals, with series expansions near zero.

use isda_core::Real;

/// Below this `|x|` the series expansions are used.
pub const SERIES_THRESHOLD: Real = 1e-5;

const EPSILON_COEFFS: [Real; 5] = [1.0, 1.0 / 2.0, 1.0 / 6.0, 1.0 / 24.0, 1.0 / 120.0];
const EPSILON_P_COEFFS: [Real; 5] = [1.0 / 2.0, 1.0 / 3.0, 1.0 / 8.0, 1.0 / 30.0, 1.0 / 144.0];

/// `ε(x) = (e^x − 1) / x`, with `ε(0) = 1`.
pub fn epsilon(x: Real) -> Real {
    if x.abs() > SERIES_THRESHOLD {
        x.exp_m1() / x
    } else {
        horner(x, &EPSILON_COEFFS)
    }
}

/// `ε'(x) = ((x − 1)(e^x − 1) + x) / x²`, with `ε'(0) = 1/2`.
pub fn epsilon_p(x: Real) -> Real {
    if x.abs() > SERIES_THRESHOLD {
        ((x - 1.0) * x.exp_m1() + x) / (x * x)
    } else {
        horner(x, &EPSILON_P_COEFFS)
    }
}

fn horner(x: Real, coeffs: &[Real]) -> Real {
    coeffs.iter().rev().fold(0.0, |acc, &c| acc * x + c)
}
