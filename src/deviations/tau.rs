//! deviations::tau — normalization of requested averaging intervals.
//!
//! Purpose
//! -------
//! Turn a caller-supplied list of averaging intervals ("tau" values, in
//! seconds) into the integer averaging factors ("m", in samples) that the
//! deviation estimators actually evaluate, given the series length and
//! sample rate.
//!
//! Key behaviors
//! -------------
//! - Keep only requested taus inside the open interval
//!   `(0, data_len / rate)`; everything else is silently dropped, never an
//!   error.
//! - Floor `tau * rate` to an integer factor, drop factors of zero, and
//!   collapse duplicates so each distinct factor is evaluated once.
//! - Report the *actual* tau for each factor as `m / rate`; this normalized
//!   value, not the requested one, is what estimators return.
//!
//! Invariants & assumptions
//! ------------------------
//! - The returned factors are strictly increasing, unique, and satisfy
//!   `0 < m < data_len`.
//! - Selection is idempotent: re-selecting with the returned taus
//!   reproduces the same factors.
//! - An empty selection is a degenerate-but-valid outcome; callers receive
//!   empty result arrays rather than an error.
//!
//! Conventions
//! -----------
//! - The sample rate is validated here (via
//!   [`validate_rate`](crate::deviations::validation::validate_rate)), so
//!   estimators that begin with `select_taus` need no separate rate check.
//!
//! Testing notes
//! -------------
//! - Unit tests cover in-range selection, silent dropping of out-of-range
//!   and duplicate requests, the empty-selection outcome, idempotence, and
//!   the invalid-rate error path.

use crate::deviations::errors::StabilityResult;
use crate::deviations::validation::validate_rate;

/// TauSelection — normalized averaging factors for one estimator run.
///
/// Purpose
/// -------
/// Hold the integer averaging factors and their actual tau values produced
/// by [`select_taus`], in the order the estimators will evaluate them.
///
/// Fields
/// ------
/// - `factors`: `Vec<usize>`
///   Averaging factors m, strictly increasing, unique, each in
///   `(0, data_len)`.
/// - `taus`: `Vec<f64>`
///   Actual averaging intervals, `taus[i] == factors[i] as f64 / rate`.
///
/// Invariants
/// ----------
/// - `factors.len() == taus.len()`.
/// - Both vectors are sorted ascending and free of duplicates.
///
/// Notes
/// -----
/// - Constructed only by [`select_taus`]; the accessors expose read-only
///   views so the invariants cannot be broken by callers.
#[derive(Debug, Clone, PartialEq)]
pub struct TauSelection {
    factors: Vec<usize>,
    taus: Vec<f64>,
}

impl TauSelection {
    /// Averaging factors m, in samples.
    pub fn factors(&self) -> &[usize] {
        &self.factors
    }

    /// Actual averaging intervals `m / rate`, in seconds.
    pub fn taus(&self) -> &[f64] {
        &self.taus
    }

    /// Number of surviving averaging factors.
    pub fn len(&self) -> usize {
        self.factors.len()
    }

    /// Whether no requested tau survived normalization.
    pub fn is_empty(&self) -> bool {
        self.factors.is_empty()
    }
}

/// Normalize a tau request list into integer averaging factors.
///
/// Parameters
/// ----------
/// - `data_len`: `usize`
///   Length of the (phase) series the factors will be applied to.
/// - `rate`: `f64`
///   Sample rate in Hz. Must be finite and strictly positive.
/// - `taus`: `&[f64]`
///   Requested averaging intervals in seconds. Entries outside
///   `(0, data_len / rate)` — including NaN — are dropped without error.
///
/// Returns
/// -------
/// `StabilityResult<TauSelection>`
///   - `Ok(selection)` with factors `floor(tau * rate)`, zero factors
///     removed, duplicates collapsed, sorted ascending.
///   - `Err(StabilityError::InvalidSampleRate)` for an unusable rate.
///
/// Errors
/// ------
/// - `StabilityError::InvalidSampleRate`
///   Returned when `rate` is zero, negative, NaN, or infinite. This is the
///   only fatal condition; a request list that survives no entry yields an
///   empty selection instead.
///
/// Panics
/// ------
/// - Never panics.
///
/// Notes
/// -----
/// - Flooring means a requested tau between two representable multiples of
///   `1 / rate` is rounded *down*; the tau reported back to the caller is
///   the exact value `m / rate` that was evaluated.
/// - `data_len == 0` naturally produces an empty selection (no tau is
///   below a zero upper bound).
///
/// Examples
/// --------
/// ```rust
/// use rust_stability::deviations::tau::select_taus;
///
/// let selection = select_taus(10, 1.0, &[1.0, 2.0, 3.0, 99.0]).unwrap();
/// assert_eq!(selection.factors(), &[1, 2, 3]);
/// assert_eq!(selection.taus(), &[1.0, 2.0, 3.0]);
/// ```
pub fn select_taus(data_len: usize, rate: f64, taus: &[f64]) -> StabilityResult<TauSelection> {
    validate_rate(rate)?;

    let upper = data_len as f64 / rate;
    let mut factors: Vec<usize> = taus
        .iter()
        .filter(|&&tau| tau > 0.0 && tau < upper)
        .map(|&tau| (tau * rate).floor() as usize)
        .filter(|&m| m != 0)
        .collect();
    factors.sort_unstable();
    factors.dedup();

    let taus = factors.iter().map(|&m| m as f64 / rate).collect();
    Ok(TauSelection { factors, taus })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deviations::errors::StabilityError;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - In-range requests mapping to the expected factors and actual taus.
    // - Silent dropping of out-of-range, NaN, and sub-sample requests.
    // - Duplicate collapse after flooring.
    // - The empty-selection outcome and the invalid-rate error path.
    // - Idempotence of re-selecting with the returned taus.
    //
    // They intentionally DO NOT cover:
    // - Use of the factors by the estimators; see the estimator modules.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify the basic mapping from requested taus to averaging factors at
    // a unit sample rate.
    //
    // Given
    // -----
    // - data_len = 10, rate = 1.0, requested taus [1, 2, 3].
    //
    // Expect
    // ------
    // - Factors [1, 2, 3] and actual taus [1.0, 2.0, 3.0].
    fn select_taus_unit_rate_maps_requests_directly() {
        // Arrange
        let requested = [1.0, 2.0, 3.0];

        // Act
        let selection = select_taus(10, 1.0, &requested).unwrap();

        // Assert
        assert_eq!(selection.factors(), &[1, 2, 3]);
        assert_eq!(selection.taus(), &[1.0, 2.0, 3.0]);
    }

    #[test]
    // Purpose
    // -------
    // Ensure that requests outside (0, data_len / rate), NaN requests, and
    // requests that floor to m = 0 are dropped without error.
    //
    // Given
    // -----
    // - data_len = 10, rate = 1.0.
    // - Requests: -1 (negative), 0 (not strictly positive), 0.25 (floors
    //   to 0), 10.0 (not below the upper bound), 99.0 (far out of range),
    //   NaN, and one valid request 2.0.
    //
    // Expect
    // ------
    // - Only the factor 2 survives.
    fn select_taus_out_of_range_requests_are_dropped_silently() {
        // Arrange
        let requested = [-1.0, 0.0, 0.25, 10.0, 99.0, f64::NAN, 2.0];

        // Act
        let selection = select_taus(10, 1.0, &requested).unwrap();

        // Assert
        assert_eq!(selection.factors(), &[2]);
        assert_eq!(selection.taus(), &[2.0]);
    }

    #[test]
    // Purpose
    // -------
    // Verify that distinct requests flooring to the same factor are
    // evaluated once, and that results come back sorted ascending.
    //
    // Given
    // -----
    // - data_len = 100, rate = 2.0.
    // - Requests [3.0, 1.0, 1.2, 1.4, 3.0]: 1.0, 1.2, and 1.4 all floor to
    //   m = 2 at rate 2.0, and 3.0 appears twice (m = 6).
    //
    // Expect
    // ------
    // - Factors [2, 6]; actual taus [1.0, 3.0].
    fn select_taus_duplicate_factors_collapse_and_sort() {
        // Arrange
        let requested = [3.0, 1.0, 1.2, 1.4, 3.0];

        // Act
        let selection = select_taus(100, 2.0, &requested).unwrap();

        // Assert
        assert_eq!(selection.factors(), &[2, 6]);
        assert_eq!(selection.taus(), &[1.0, 3.0]);
    }

    #[test]
    // Purpose
    // -------
    // Verify that a request list surviving no entry yields an empty,
    // non-error selection.
    //
    // Given
    // -----
    // - data_len = 4, rate = 1.0, requests [10.0, 20.0] (all too large).
    //
    // Expect
    // ------
    // - `Ok` with `is_empty()` true and `len()` zero.
    fn select_taus_no_survivors_yields_empty_selection() {
        // Arrange
        let requested = [10.0, 20.0];

        // Act
        let selection = select_taus(4, 1.0, &requested).unwrap();

        // Assert
        assert!(selection.is_empty());
        assert_eq!(selection.len(), 0);
    }

    #[test]
    // Purpose
    // -------
    // Verify the fixed-point property: re-selecting with the actual taus
    // returned by a prior call reproduces the same factors.
    //
    // Given
    // -----
    // - data_len = 50, rate = 4.0, requests [0.5, 1.75, 3.0].
    //
    // Expect
    // ------
    // - Selecting again with `selection.taus()` yields identical factors
    //   and taus.
    fn select_taus_is_idempotent_on_returned_taus() {
        // Arrange
        let first = select_taus(50, 4.0, &[0.5, 1.75, 3.0]).unwrap();

        // Act
        let second = select_taus(50, 4.0, first.taus()).unwrap();

        // Assert
        assert_eq!(first, second);
    }

    #[test]
    // Purpose
    // -------
    // Ensure that an unusable sample rate is rejected before any request
    // is inspected.
    //
    // Given
    // -----
    // - rate = 0.0 with an otherwise valid request list.
    //
    // Expect
    // ------
    // - `Err(StabilityError::InvalidSampleRate(0.0))`.
    fn select_taus_zero_rate_returns_invalid_sample_rate() {
        // Arrange
        let requested = [1.0, 2.0];

        // Act
        let result = select_taus(10, 0.0, &requested);

        // Assert
        match result {
            Err(StabilityError::InvalidSampleRate(r)) => assert_eq!(r, 0.0),
            other => panic!("expected InvalidSampleRate error, got {other:?}"),
        }
    }
}
