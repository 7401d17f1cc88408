//! Error types for the ISDA credit workspace.
//!
//! Every fallible operation returns [`Result`]. Input problems (bad dates,
//! mismatched array lengths, arbitrage in the quotes) are *argument errors*
//! and are reported before any numerical work happens; solver failures are
//! reported as [`Error::Calibration`] or [`Error::NotConverged`].

use thiserror::Error;

/// The top-level error type.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// General runtime error.
    #[error("{0}")]
    Runtime(String),

    /// Precondition violated (raised by `ensure!`).
    #[error("precondition not satisfied: {0}")]
    Precondition(String),

    /// Postcondition violated (raised by `ensure_post!`).
    #[error("postcondition not satisfied: {0}")]
    Postcondition(String),

    /// Invalid calendar date or date arithmetic out of range.
    #[error("date error: {0}")]
    Date(String),

    /// Index out of range.
    #[error("index ({index}) out of range [0, {size})")]
    IndexOutOfRange {
        /// The index that was out of range.
        index: usize,
        /// The size of the container.
        size: usize,
    },

    /// Invalid argument.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The quotes at a pillar can only be matched with a negative forward
    /// hazard rate.
    #[error("arbitrage at pillar {index}: {message}")]
    Arbitrage {
        /// Index of the offending pillar.
        index: usize,
        /// Description of the violation.
        message: String,
    },

    /// The root of a bootstrap step could not be bracketed or located.
    #[error("calibration failed at pillar {index}: {message}")]
    Calibration {
        /// Index of the pillar being solved.
        index: usize,
        /// Description of the failure.
        message: String,
    },

    /// An iterative algorithm exhausted its evaluation budget.
    #[error("no convergence after {iterations} iterations")]
    NotConverged {
        /// Number of iterations performed.
        iterations: usize,
    },
}

impl Error {
    /// Return `true` if the error was caused by the caller's inputs rather
    /// than by a numerical failure.
    pub fn is_argument_error(&self) -> bool {
        matches!(
            self,
            Error::Precondition(_)
                | Error::InvalidArgument(_)
                | Error::Date(_)
                | Error::IndexOutOfRange { .. }
                | Error::Arbitrage { .. }
        )
    }
}

/// Shorthand `Result` type used throughout the workspace.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Return `Err(Error::Precondition(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use isda_core::{ensure, errors::Error};
/// fn positive(x: f64) -> isda_core::errors::Result<f64> {
///     ensure!(x > 0.0, "x must be positive, got {x}");
///     Ok(x)
/// }
/// assert!(positive(1.0).is_ok());
/// assert!(positive(-1.0).unwrap_err().is_argument_error());
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::Precondition(
                format!($($msg)*)
            ));
        }
    };
}

/// Return `Err(Error::Postcondition(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use isda_core::{ensure_post, errors::Error};
/// fn compute(x: f64) -> isda_core::errors::Result<f64> {
///     let result = x * 2.0;
///     ensure_post!(result.is_finite(), "result must be finite, got {result}");
///     Ok(result)
/// }
/// assert!(compute(1.0).is_ok());
/// assert!(compute(f64::INFINITY).is_err());
/// ```
#[macro_export]
macro_rules! ensure_post {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::Postcondition(
                format!($($msg)*)
            ));
        }
    };
}

/// Return `Err(Error::Runtime(...))` immediately.
///
/// # Example
/// ```
/// use isda_core::{fail, errors::Error};
/// fn always_err() -> isda_core::errors::Result<()> {
///     fail!("something went wrong");
/// }
/// assert!(always_err().is_err());
/// ```
#[macro_export]
macro_rules! fail {
    ($($msg:tt)*) => {
        return Err($crate::errors::Error::Runtime(format!($($msg)*)))
    };
}
