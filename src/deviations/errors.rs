//! deviations::errors — shared error types and Python bridges.
//!
//! Purpose
//! -------
//! Provide the error enum and result alias for the frequency-stability
//! estimators, together with a conversion layer to Python exceptions for
//! PyO3-based bindings. This keeps configuration failures localized while
//! exposing a clean error surface to both Rust and Python.
//!
//! Key behaviors
//! -------------
//! - Define [`StabilityResult`] and [`StabilityError`] as the canonical
//!   result and error types for tau selection, phase conversion, the
//!   deviation estimators, and the three-cornered-hat combination.
//! - Attach human-readable `Display` messages to each error variant so that
//!   diagnostics are meaningful without additional context.
//! - Implement `From<StabilityError> for PyErr` to map Rust-side failures
//!   into `PyValueError` values visible to Python callers.
//!
//! Invariants & assumptions
//! ------------------------
//! - Estimator modules which use this error type validate their sample rate
//!   up front (via `deviations::validation`) and return
//!   [`StabilityResult<T>`] instead of panicking.
//! - A tau request list that survives no entry is *not* an error; it yields
//!   an empty result set. Only malformed configuration (the sample rate) and
//!   violated combination preconditions are reported here.
//! - `StabilityError` values are small, cheap to clone, and suitable for use
//!   in both unit tests and higher-level orchestration code.
//!
//! Conventions
//! -----------
//! - Error messages are phrased in terms of domain constraints (e.g., "must
//!   be finite and strictly positive") rather than low-level details.
//! - PyO3 conversion always uses `PyValueError`, with the Rust `Display`
//!   message preserved verbatim.
//!
//! Testing notes
//! -------------
//! - Unit tests in this module verify that each variant's `Display` message
//!   embeds its payload (offending rate, mismatched leg lengths).
//! - The `From<StabilityError> for PyErr` conversion requires linking the
//!   Python C API and is exercised by Python-level tests instead.

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

pub type StabilityResult<T> = Result<T, StabilityError>;

/// StabilityError — error conditions for stability estimation.
///
/// Purpose
/// -------
/// Represent the failures that can occur when computing frequency-stability
/// statistics: a malformed sample-rate configuration, and a violated
/// precondition in the three-cornered-hat combination.
///
/// Variants
/// --------
/// - `InvalidSampleRate(rate: f64)`
///   The sample rate is zero, negative, NaN, or infinite. Every entry point
///   rejects such a rate before touching the data.
/// - `CorneredLegMismatch { ab, bc, ca }`
///   The three pairwise estimator runs inside the three-cornered-hat
///   combination survived filtering with different tau counts, so the
///   pairwise variances cannot be combined elementwise. The payload carries
///   the surviving lengths of each leg.
///
/// Invariants
/// ----------
/// - Each variant carries just enough information to diagnose the failure
///   without leaking large data structures.
/// - `CorneredLegMismatch` is only produced by the combination step; direct
///   estimator calls never emit it.
///
/// Notes
/// -----
/// - This enum implements [`std::error::Error`] and [`std::fmt::Display`]
///   so it can be used with idiomatic `?`-based error propagation.
/// - A [`From<StabilityError> for PyErr`] implementation maps these cases
///   to `PyValueError` at the Python boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum StabilityError {
    //------ Configuration errors ------
    InvalidSampleRate(f64),
    //------ Combination preconditions ------
    CorneredLegMismatch { ab: usize, bc: usize, ca: usize },
}

impl std::error::Error for StabilityError {}

impl std::fmt::Display for StabilityError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StabilityError::InvalidSampleRate(rate) => {
                write!(f, "Invalid sample rate: {rate} Hz. Must be finite and strictly positive.")
            }
            StabilityError::CorneredLegMismatch { ab, bc, ca } => {
                write!(
                    f,
                    "Three-cornered-hat legs disagree on surviving tau count: \
                     AB={ab}, BC={bc}, CA={ca}. All three pairwise series must \
                     yield the same tau selection."
                )
            }
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<StabilityError> for PyErr {
    fn from(err: StabilityError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Basic `Display` formatting for StabilityError variants.
    // - Embedding of payload values (rate, leg lengths) into error messages.
    //
    // They intentionally DO NOT cover:
    // - The `From<StabilityError> for PyErr` conversion, since exercising it
    //   requires linking against the Python C API and is better handled by
    //   Python-level tests.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify that `StabilityError::InvalidSampleRate` includes the offending
    // rate in its `Display` representation.
    //
    // Given
    // -----
    // - An `InvalidSampleRate` with rate = -2.5.
    //
    // Expect
    // ------
    // - `format!("{err}")` contains "-2.5".
    fn invalid_sample_rate_includes_payload_in_display() {
        // Arrange
        let err = StabilityError::InvalidSampleRate(-2.5);

        // Act
        let msg = err.to_string();

        // Assert
        assert!(
            msg.contains("-2.5"),
            "Display message should include offending rate.\nGot: {msg}"
        );
    }

    #[test]
    // Purpose
    // -------
    // Verify that `StabilityError::CorneredLegMismatch` reports all three
    // leg lengths in its `Display` representation.
    //
    // Given
    // -----
    // - A `CorneredLegMismatch` with ab = 4, bc = 3, ca = 4.
    //
    // Expect
    // ------
    // - `format!("{err}")` contains all three lengths.
    fn cornered_leg_mismatch_includes_all_lengths_in_display() {
        // Arrange
        let err = StabilityError::CorneredLegMismatch { ab: 4, bc: 3, ca: 4 };

        // Act
        let msg = err.to_string();

        // Assert
        assert!(
            msg.contains("AB=4") && msg.contains("BC=3") && msg.contains("CA=4"),
            "Display message should include every leg length.\nGot: {msg}"
        );
    }
}
