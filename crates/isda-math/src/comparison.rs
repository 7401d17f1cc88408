//! Floating-point comparison utilities.

use isda_core::Real;

/// Default tolerance for close comparisons of times.
pub const EPSILON: Real = 1e-10;

/// Return `true` if `|a - b| <= epsilon`.
#[inline]
pub fn close(a: Real, b: Real, epsilon: Real) -> bool {
    (a - b).abs() <= epsilon
}

/// Merge two ascending sets of times and keep the values strictly inside
/// `(lower, upper)`, then add both ends. Values within [`EPSILON`] of a
/// neighbour or of an end are dropped.
pub fn integration_points(lower: Real, upper: Real, set_a: &[Real], set_b: &[Real]) -> Vec<Real> {
    let mut inner: Vec<Real> = set_a
        .iter()
        .chain(set_b)
        .copied()
        .filter(|&t| t > lower + EPSILON && t < upper - EPSILON)
        .collect();
    inner.sort_by(|a, b| a.total_cmp(b));
    inner.dedup_by(|a, b| close(*a, *b, EPSILON));

    let mut points = Vec::with_capacity(inner.len() + 2);
    points.push(lower);
    points.extend(inner);
    points.push(upper);
    points
}
