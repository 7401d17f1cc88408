use isda_core::{
    errors::{Error, Result},
    Real,
};
use tracing::trace;

/// Growth factor applied to the interval on each expansion.
pub const BRACKET_RATIO: Real = 1.6;

/// Maximum number of expansions before giving up.
pub const BRACKET_MAX_STEPS: usize = 50;

/// Starting interval `[0.8·g, 1.25·g]` around a positive guess `g`; a guess
/// at or below zero gets a fixed-width interval instead so that expansion
/// can still move.
pub fn guess_interval(guess: Real) -> (Real, Real) {
    if guess > 0.0 {
        (0.8 * guess, 1.25 * guess)
    } else {
        (guess - GUESS_WIDTH, guess + GUESS_WIDTH)
    }
}

/// Half-width of [`guess_interval`] for non-positive guesses.
pub const GUESS_WIDTH: Real = 0.01;

/// Expand `[x_lower, x_upper]` until `f` changes sign over it.
///
/// At each step the end with the smaller `|f|` is pushed outwards by
/// [`BRACKET_RATIO`] times the interval width, never past `[min_x, max_x]`.
/// Returns the bracketing pair in increasing order.
///
/// # Errors
/// [`Error::InvalidArgument`] if the initial interval is empty or outside the
/// limits, or `f` is NaN; [`Error::NotConverged`] if both limits are reached
/// or [`BRACKET_MAX_STEPS`] expansions do not produce a sign change.
pub fn bracket_root<F>(f: F, x_lower: Real, x_upper: Real, min_x: Real, max_x: Real) -> Result<(Real, Real)>
where
    F: Fn(Real) -> Real,
{
    let (mut x1, mut x2) = if x_lower <= x_upper {
        (x_lower, x_upper)
    } else {
        (x_upper, x_lower)
    };
    if x1 == x2 {
        return Err(Error::InvalidArgument(format!("empty initial bracket at {x1}")));
    }
    if x1 < min_x || x2 > max_x {
        return Err(Error::InvalidArgument(format!(
            "initial bracket [{x1}, {x2}] outside limits [{min_x}, {max_x}]"
        )));
    }

    let mut f1 = f(x1);
    let mut f2 = f(x2);
    let mut lower_reached = false;
    let mut upper_reached = false;

    for step in 0..BRACKET_MAX_STEPS {
        if f1.is_nan() || f2.is_nan() {
            return Err(Error::InvalidArgument(format!(
                "objective is NaN while bracketing at [{x1}, {x2}]"
            )));
        }
        if f1 * f2 <= 0.0 {
            return Ok((x1, x2));
        }
        if lower_reached && upper_reached {
            return Err(Error::NotConverged { iterations: step });
        }
        if !lower_reached && (f1.abs() < f2.abs() || upper_reached) {
            x1 += BRACKET_RATIO * (x1 - x2);
            if x1 <= min_x {
                x1 = min_x;
                lower_reached = true;
            }
            f1 = f(x1);
        } else {
            x2 += BRACKET_RATIO * (x2 - x1);
            if x2 >= max_x {
                x2 = max_x;
                upper_reached = true;
            }
            f2 = f(x2);
        }
        trace!(step, x1, x2, f1, f2, "expanding root bracket");
    }
    if f1 * f2 <= 0.0 {
        return Ok((x1, x2));
    }
    Err(Error::NotConverged {
        iterations: BRACKET_MAX_STEPS,
    })
}
