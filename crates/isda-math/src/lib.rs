//! # isda-math
//!
//! Numerical building blocks of the ISDA standard model: Brent root finding
//! with bracket expansion, the `ε` functions used in closed-form leg
//! integrals, and time-grid helpers.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Floating-point comparison and time-grid utilities.
pub mod comparison;

/// `ε(x)` and `ε'(x)` with series expansions near zero.
pub mod functions;

/// 1D root-finding solvers and bracketing.
pub mod solvers1d;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use comparison::{close, integration_points};
pub use functions::{epsilon, epsilon_p};
pub use solvers1d::{bracket_root, brent, guess_interval};
