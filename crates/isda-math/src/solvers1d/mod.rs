//! 1D root finding.
//!
//! [`brent`] needs a bracket with a sign change; [`bracket_root`] searches
//! for one by expanding an initial guess interval.

use isda_core::{
    errors::{Error, Result},
    Real,
};

mod bracket;

pub use bracket::{bracket_root, guess_interval, BRACKET_MAX_STEPS, BRACKET_RATIO, GUESS_WIDTH};

/// Evaluation bound of [`brent`].
pub const MAX_ITERATIONS: usize = 100;

/// Accuracy used when a non-positive accuracy is requested.
pub const DEFAULT_ACCURACY: Real = 1.0e-11;

// ── Brent ─────────────────────────────────────────────────────────────────────

/// Brent's method for finding a root of `f(x)` in `[x_min, x_max]`.
///
/// Combines bisection, secant, and inverse quadratic interpolation. The
/// endpoints may be given in either order but `f` must change sign between
/// them.
///
/// # Errors
/// [`Error::InvalidArgument`] if there is no sign change,
/// [`Error::NotConverged`] after [`MAX_ITERATIONS`] steps.
pub fn brent<F>(f: F, x_min: Real, x_max: Real, accuracy: Real) -> Result<Real>
where
    F: Fn(Real) -> Real,
{
    let acc = if accuracy > 0.0 {
        accuracy
    } else {
        DEFAULT_ACCURACY
    };
    let mut a = x_min;
    let mut b = x_max;
    let mut fa = f(a);
    let mut fb = f(b);

    if fa.is_nan() || fb.is_nan() {
        return Err(Error::InvalidArgument(format!(
            "Brent: objective is NaN at f({a}) = {fa}, f({b}) = {fb}"
        )));
    }
    if fa * fb > 0.0 {
        return Err(Error::InvalidArgument(format!(
            "Brent: f({a}) = {fa} and f({b}) = {fb} must have opposite signs"
        )));
    }
    if fa == 0.0 {
        return Ok(a);
    }
    if fb == 0.0 {
        return Ok(b);
    }

    let mut c = b;
    let mut fc = fb;
    let mut d = b - a;
    let mut e = d;

    for _ in 0..MAX_ITERATIONS {
        if fb * fc > 0.0 {
            c = a;
            fc = fa;
            d = b - a;
            e = d;
        }
        if fc.abs() < fb.abs() {
            a = b;
            b = c;
            c = a;
            fa = fb;
            fb = fc;
            fc = fa;
        }
        let tol = 2.0 * f64::EPSILON * b.abs() + 0.5 * acc;
        let xm = 0.5 * (c - b);
        if xm.abs() <= tol || fb == 0.0 {
            return Ok(b);
        }
        if e.abs() >= tol && fa.abs() > fb.abs() {
            let s = fb / fa;
            let (p, q) = if a == c {
                (2.0 * xm * s, 1.0 - s)
            } else {
                let q = fa / fc;
                let r = fb / fc;
                let p = s * (2.0 * xm * q * (q - r) - (b - a) * (r - 1.0));
                (p, (q - 1.0) * (r - 1.0) * (s - 1.0))
            };
            let (p, q) = if p > 0.0 { (p, -q) } else { (-p, q) };
            if 2.0 * p < (3.0 * xm * q - (tol * q).abs()) && 2.0 * p < (e * q).abs() {
                e = d;
                d = p / q;
            } else {
                d = xm;
                e = d;
            }
        } else {
            d = xm;
            e = d;
        }
        a = b;
        fa = fb;
        b += if d.abs() > tol {
            d
        } else if xm > 0.0 {
            tol
        } else {
            -tol
        };
        fb = f(b);
    }
    Err(Error::NotConverged {
        iterations: MAX_ITERATIONS,
    })
}
