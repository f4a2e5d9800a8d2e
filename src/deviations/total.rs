//! deviations::total — total deviation over a reflection-extended series.
//!
//! Purpose
//! -------
//! Implement the total deviation ([`totdev`]), which improves long-tau
//! confidence by evaluating the second-difference kernel over an extended
//! series: the original phase data flanked on both sides by point-reflected
//! copies of its own interior.
//!
//! Key behaviors
//! -------------
//! - Build the extension exactly once per call via [`reflect_extend`]: for
//!   a series of length N the result has length `3N − 4`, with head
//!   `2·x[0] − x[N−2], …, 2·x[0] − x[1]`, the original data in the middle,
//!   and tail `2·x[N−1] − x[N−2], …, 2·x[N−1] − x[1]`.
//! - For each factor m, sum `N − 2` centered second differences
//!   `ext[c−m] − 2·ext[c] + ext[c+m]` with `c = (N − 2) + 1 + i`, so every
//!   original interior sample anchors one difference and the reflected
//!   flanks supply the out-of-range neighbors.
//! - Normalize by `2·(m/rate)²·(N − 2)`; `n = N − 2` and
//!   `err = dev / sqrt(n)`.
//!
//! Invariants & assumptions
//! ------------------------
//! - The extension is linear whenever the input is linear, so a perfect
//!   phase ramp still reports exactly 0.
//! - Index bounds: `c − m ≥ 0` and `c + m ≤ 3N − 5` for every surviving
//!   factor (`m ≤ N − 1`), so the centered loop never leaves the extended
//!   array. The extension's boundary values are unit-tested directly —
//!   an off-by-one here would silently corrupt every tau.
//!
//! Testing notes
//! -------------
//! - Unit tests pin the extended array for concrete inputs, a
//!   hand-computed deviation, the linear-ramp zero, and the defensive
//!   handling of the two-sample series.

use crate::deviations::errors::StabilityResult;
use crate::deviations::outcome::DeviationSet;
use crate::deviations::phase::MeasurementSeries;
use crate::deviations::tau::select_taus;

/// Total deviation.
///
/// Parameters
/// ----------
/// - `series`: [`MeasurementSeries`]
///   Phase samples (seconds) or fractional-frequency samples; frequency
///   input is integrated to phase first.
/// - `rate`: `f64`
///   Sample rate in Hz; must be finite and strictly positive.
/// - `taus`: `&[f64]`
///   Requested averaging intervals in seconds; out-of-range entries are
///   dropped silently.
///
/// Returns
/// -------
/// `StabilityResult<DeviationSet>`
///   Per-tau `(tau, dev, err, n)` entries with `n > 1`, possibly empty.
///   `n` is `N − 2` for every tau — the count of centered differences —
///   so a series of length 2 yields an empty set.
///
/// Errors
/// ------
/// - `StabilityError::InvalidSampleRate`
///   Returned for a zero, negative, NaN, or infinite rate.
///
/// Panics
/// ------
/// - Never panics.
///
/// Notes
/// -----
/// - The reflected flanks let windows near the edges wrap into plausible
///   data instead of being discarded, which is what buys the improved
///   long-tau confidence relative to [`oadev`](crate::deviations::allan::oadev).
pub fn totdev(
    series: MeasurementSeries<'_>, rate: f64, taus: &[f64],
) -> StabilityResult<DeviationSet> {
    let phase = series.to_phase(rate)?;
    let selection = select_taus(phase.len(), rate, taus)?;
    if selection.is_empty() {
        return Ok(DeviationSet::from_raw(Vec::new(), Vec::new(), Vec::new(), Vec::new()));
    }

    // A surviving factor implies phase.len() >= 2, so the extension is
    // well-defined.
    let len = phase.len();
    let extended = reflect_extend(&phase);
    let mid = len - 2;

    let mut devs = Vec::with_capacity(selection.len());
    let mut errs = Vec::with_capacity(selection.len());
    let mut ns = Vec::with_capacity(selection.len());
    for &m in selection.factors() {
        if mid == 0 {
            // Two-sample series: no centered difference exists.
            devs.push(0.0);
            errs.push(0.0);
            ns.push(1);
            continue;
        }

        let mut sum_sq = 0.0;
        for i in 0..mid {
            let c = mid + 1 + i;
            let v = extended[c - m] - 2.0 * extended[c] + extended[c + m];
            sum_sq += v * v;
        }

        let var = sum_sq / (2.0 * (m as f64 / rate).powi(2) * mid as f64);
        let dev = var.sqrt();
        devs.push(dev);
        errs.push(dev / (mid as f64).sqrt());
        ns.push(mid);
    }
    Ok(DeviationSet::from_raw(selection.taus().to_vec(), devs, errs, ns))
}

//
// ---------- Private helpers (compact docs) ----------
//

/// Build the point-reflection extension of a phase series.
///
/// Parameters
/// ----------
/// - `phase`: phase series of length N ≥ 2.
///
/// Returns
/// -------
/// A vector of length `3N − 4`: the interior `x[1..N−1]` point-reflected
/// about `x[0]` (reversed) as the head, the original data in the middle,
/// and the interior point-reflected about `x[N−1]` (reversed) as the
/// tail. Index `(N − 2) + k` of the result holds `x[k]`.
#[inline]
fn reflect_extend(phase: &[f64]) -> Vec<f64> {
    let len = phase.len();
    let interior = &phase[1..len - 1];

    let mut extended = Vec::with_capacity(3 * len - 4);
    for &x in interior.iter().rev() {
        extended.push(2.0 * phase[0] - x);
    }
    extended.extend_from_slice(phase);
    for &x in interior.iter().rev() {
        extended.push(2.0 * phase[len - 1] - x);
    }
    extended
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Exact boundary values and length of the reflection extension.
    // - A hand-computed deviation on a tiny alternating series.
    // - The linear-ramp zero (reflection preserves linearity).
    // - Defensive filtering of the two-sample series.
    //
    // They intentionally DO NOT cover:
    // - The phase/frequency delegation contract, pinned once in
    //   deviations::allan and by the integration tests.
    // -------------------------------------------------------------------------

    const TOL: f64 = 1e-12;

    #[test]
    // Purpose
    // -------
    // Pin the extension's exact values, including both boundaries, for a
    // linear input. Off-by-one errors here corrupt every tau downstream.
    //
    // Given
    // -----
    // - Phase [0, 1, 2, 3] (N = 4, interior [1, 2]).
    //
    // Expect
    // ------
    // - Extension [−2, −1, 0, 1, 2, 3, 4, 5] of length 3·4 − 4 = 8, with
    //   the original data at offsets 2..6.
    fn reflect_extend_linear_input_has_exact_boundary_values() {
        // Arrange
        let phase = [0.0, 1.0, 2.0, 3.0];

        // Act
        let extended = reflect_extend(&phase);

        // Assert
        assert_eq!(extended, vec![-2.0, -1.0, 0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
    }

    #[test]
    // Purpose
    // -------
    // Pin the extension on a non-monotone series where head and tail
    // reflections differ.
    //
    // Given
    // -----
    // - Phase [1, 4, 2] (N = 3, interior [4]).
    //
    // Expect
    // ------
    // - Head 2·1 − 4 = −2, tail 2·2 − 4 = 0: extension [−2, 1, 4, 2, 0]
    //   of length 3·3 − 4 = 5.
    fn reflect_extend_non_monotone_input_reflects_about_each_end() {
        // Arrange
        let phase = [1.0, 4.0, 2.0];

        // Act
        let extended = reflect_extend(&phase);

        // Assert
        assert_eq!(extended, vec![-2.0, 1.0, 4.0, 2.0, 0.0]);
    }

    #[test]
    // Purpose
    // -------
    // Pin the full statistic against a hand computation.
    //
    // Given
    // -----
    // - Phase [0, 1, 0, 1], rate 1, tau 1. Extension
    //   [0, −1, 0, 1, 0, 1, 2, 1], mid = 2; centered differences −2 and 2
    //   (sum of squares 8); var = 8 / (2·1·2) = 2.
    //
    // Expect
    // ------
    // - dev = sqrt(2), n = 2, err = dev / sqrt(2) = 1.
    fn totdev_alternating_series_matches_hand_computation() {
        // Arrange
        let phase = [0.0, 1.0, 0.0, 1.0];

        // Act
        let set = totdev(MeasurementSeries::Phase(&phase), 1.0, &[1.0]).unwrap();

        // Assert
        assert_eq!(set.len(), 1);
        assert_eq!(set.ns().to_vec(), vec![2]);
        assert_relative_eq!(set.devs()[0], 2.0_f64.sqrt(), epsilon = TOL);
        assert_relative_eq!(set.errs()[0], 1.0, epsilon = TOL);
    }

    #[test]
    // Purpose
    // -------
    // Point reflection preserves linearity, so a linear ramp must report
    // exactly 0 at every surviving tau.
    //
    // Given
    // -----
    // - Phase 0..=5, rate 1, taus [1, 2, 3].
    //
    // Expect
    // ------
    // - Deviations all 0 with n = N − 2 = 4 at every tau.
    fn totdev_linear_ramp_yields_zero_at_every_tau() {
        // Arrange
        let ramp: Vec<f64> = (0..6).map(|i| i as f64).collect();

        // Act
        let set = totdev(MeasurementSeries::Phase(&ramp), 1.0, &[1.0, 2.0, 3.0]).unwrap();

        // Assert
        assert_eq!(set.ns().to_vec(), vec![4, 4, 4]);
        for dev in set.devs() {
            assert_relative_eq!(*dev, 0.0, epsilon = TOL);
        }
    }

    #[test]
    // Purpose
    // -------
    // A two-sample series admits a factor (m = 1) but no centered
    // difference; the defensive n = 1 entry must be filtered out.
    //
    // Given
    // -----
    // - Phase [0, 1], rate 1, tau 1.
    //
    // Expect
    // ------
    // - An empty result set, no division by zero.
    fn totdev_two_sample_series_is_filtered() {
        // Arrange
        let phase = [0.0, 1.0];

        // Act
        let set = totdev(MeasurementSeries::Phase(&phase), 1.0, &[1.0]).unwrap();

        // Assert
        assert!(set.is_empty());
    }
}
