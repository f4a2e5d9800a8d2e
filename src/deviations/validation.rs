//! deviations::validation — shared input guards for stability estimators.
//!
//! Purpose
//! -------
//! Centralize the sample-rate validation shared by every estimator entry
//! point in this crate. This avoids duplicating the check across the nine
//! statistics, the phase converter, and the tau selector.
//!
//! Key behaviors
//! -------------
//! - Enforce that the sample rate is finite and strictly positive before
//!   any arithmetic divides by it.
//! - Map invalid rates into structured `StabilityError` values for
//!   consistent error handling in Rust and Python bindings.
//!
//! Invariants & assumptions
//! ------------------------
//! - The sample rate is the only fatally-invalid configuration input: a tau
//!   request list that survives no entry is a degenerate-but-valid outcome
//!   handled by `deviations::tau`, and measurement values are taken as-is
//!   (the estimators neither require nor enforce finiteness of the data).
//!
//! Conventions
//! -----------
//! - This module is purely about *validation*; it performs no I/O and does
//!   not allocate beyond what is required for error construction.
//! - Callers treat a successful return (`Ok(())`) as a guarantee that
//!   dividing by `rate` and by `rate`-derived taus is well-defined.
//!
//! Testing notes
//! -------------
//! - Unit tests cover the success path and every rejected class of rate
//!   (zero, negative, NaN, infinite).

use crate::deviations::errors::{StabilityError, StabilityResult};

/// Validate the sample rate shared by every estimator entry point.
///
/// Parameters
/// ----------
/// - `rate`: `f64`
///   Sample rate of the measurement series, in Hz. Must be finite and
///   strictly positive; the spacing between consecutive samples is
///   `1 / rate` seconds.
///
/// Returns
/// -------
/// `StabilityResult<()>`
///   - `Ok(())` if the rate is usable.
///   - `Err(StabilityError::InvalidSampleRate(rate))` otherwise.
///
/// Errors
/// ------
/// - `StabilityError::InvalidSampleRate`
///   Returned when `rate` is zero, negative, NaN, or infinite.
///
/// Panics
/// ------
/// - Never panics. All failures are reported via `StabilityError`.
///
/// Notes
/// -----
/// - A zero rate is the classic misconfiguration (it would make every tau
///   map to a zero averaging factor and divide later normalizations by
///   zero); NaN, negative, and infinite rates are rejected for the same
///   reason rather than being allowed to poison every downstream value.
///
/// Examples
/// --------
/// ```rust
/// use rust_stability::deviations::errors::StabilityError;
/// use rust_stability::deviations::validation::validate_rate;
///
/// assert!(validate_rate(1.0).is_ok());
/// match validate_rate(0.0) {
///     Err(StabilityError::InvalidSampleRate(_)) => (),
///     other => panic!("expected InvalidSampleRate, got {other:?}"),
/// }
/// ```
pub fn validate_rate(rate: f64) -> StabilityResult<()> {
    if !rate.is_finite() || rate <= 0.0 {
        return Err(StabilityError::InvalidSampleRate(rate));
    }
    Ok(())
}
