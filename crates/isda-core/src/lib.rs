//! # isda-core
//!
//! Scalar type aliases and the error type shared by every crate of the ISDA
//! credit workspace.
//!
//! Nothing in here knows about dates or curves; the crate only fixes the
//! vocabulary (`Time`, `Rate`, `Result`, …) and the `ensure!` / `fail!`
//! macros used for argument checking.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Public modules ───────────────────────────────────────────────────────────

/// Error types and the `ensure!` / `fail!` / `ensure_post!` macros.
pub mod errors;

// ── Primitive type aliases ────────────────────────────────────────────────────

/// Floating-point type used throughout the workspace.
pub type Real = f64;

/// Alias used for array sizes / indices.
pub type Size = usize;

/// A rate expressed as a decimal (e.g. 0.05 = 5 %).
pub type Rate = Real;

/// A running spread (e.g. 0.01 = 100 bps).
pub type Spread = Real;

/// A discount factor in (0, 1].
pub type DiscountFactor = Real;

/// A probability in [0, 1].
pub type Probability = Real;

/// A time measurement in years.
pub type Time = Real;

// ── Re-exports for convenience ────────────────────────────────────────────────

pub use errors::{Error, Result};
