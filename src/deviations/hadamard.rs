//! deviations::hadamard — standard and overlapping Hadamard deviation.
//!
//! Purpose
//! -------
//! Implement the three-sample (Hadamard) deviation in its non-overlapping
//! ([`hdev`]) and fully overlapping ([`ohdev`]) forms. Both are built on
//! the third-difference kernel over phase data,
//! `x[i+3m] − 3·x[i+2m] + 3·x[i+m] − x[i]`, sampled at stride `m` or 1.
//!
//! Key behaviors
//! -------------
//! - Same pipeline as the Allan pair: resolve phase, normalize taus,
//!   evaluate the kernel per factor, filter weak support.
//! - Normalize the squared-difference sum by `6·n`, take the square root,
//!   and scale by `1 / (tau0 · m)` with `tau0 = 1 / rate`; the estimate
//!   error is `dev / sqrt(n)`.
//! - Promote an empty window set (series too short for `3m`) to a
//!   defensive `n = 1` entry, removed by the filter.
//!
//! Invariants & assumptions
//! ------------------------
//! - The third difference annihilates quadratic phase, so a constant
//!   linear frequency drift — which leaves the Allan pair nonzero —
//!   reports 0 here. Tests pin this contrast.
//!
//! Testing notes
//! -------------
//! - Unit tests pin a hand-computed value on the alternating series, the
//!   drift-rejection contrast against ADEV, the m = 1 agreement of both
//!   forms, and defensive filtering.

use crate::deviations::errors::StabilityResult;
use crate::deviations::outcome::DeviationSet;
use crate::deviations::phase::MeasurementSeries;
use crate::deviations::tau::select_taus;

/// Hadamard deviation (non-overlapping estimator).
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
/// - Unlike the Allan deviation, this statistic is insensitive to linear
///   frequency drift (quadratic phase), making it the usual choice for
///   rubidium and caesium references with known drift.
pub fn hdev(series: MeasurementSeries<'_>, rate: f64, taus: &[f64]) -> StabilityResult<DeviationSet> {
    let phase = series.to_phase(rate)?;
    hadamard_family(&phase, rate, taus, false)
}

/// Overlapping Hadamard deviation.
///
/// Parameters
/// ----------
/// Identical to [`hdev`].
///
/// Returns
/// -------
/// `StabilityResult<DeviationSet>`
///   As for [`hdev`], with every sample offset contributing a difference
///   term (stride 1).
///
/// Errors
/// ------
/// - `StabilityError::InvalidSampleRate`
///   Returned for a zero, negative, NaN, or infinite rate.
///
/// Panics
/// ------
/// - Never panics.
pub fn ohdev(
    series: MeasurementSeries<'_>, rate: f64, taus: &[f64],
) -> StabilityResult<DeviationSet> {
    let phase = series.to_phase(rate)?;
    hadamard_family(&phase, rate, taus, true)
}

//
// ---------- Private helpers (compact docs) ----------
//

/// Shared driver for both Hadamard forms.
///
/// Parameters
/// ----------
/// - `phase`: resolved phase series.
/// - `rate`: validated-by-`select_taus` sample rate.
/// - `taus`: requested averaging intervals.
/// - `overlapping`: stride 1 when true, stride `m` when false.
///
/// Returns
/// -------
/// The filtered per-tau result set.
fn hadamard_family(
    phase: &[f64], rate: f64, taus: &[f64], overlapping: bool,
) -> StabilityResult<DeviationSet> {
    let selection = select_taus(phase.len(), rate, taus)?;

    let mut devs = Vec::with_capacity(selection.len());
    let mut errs = Vec::with_capacity(selection.len());
    let mut ns = Vec::with_capacity(selection.len());
    for &m in selection.factors() {
        let stride = if overlapping { 1 } else { m };
        let (dev, err, n) = calc_hadamard_at(phase, rate, m, stride);
        devs.push(dev);
        errs.push(err);
        ns.push(n);
    }
    Ok(DeviationSet::from_raw(selection.taus().to_vec(), devs, errs, ns))
}

/// Evaluate the third-difference kernel at one averaging factor.
///
/// Parameters
/// ----------
/// - `phase`: phase series of length N.
/// - `rate`: sample rate in Hz.
/// - `m`: averaging factor, `0 < m < N`.
/// - `stride`: offset between consecutive difference terms (`m` or 1).
///
/// Returns
/// -------
/// `(dev, err, n)` where `n = ceil((N − 3m) / stride)` difference terms
/// were summed (promoted to 1 with a zero sum when N ≤ 3m),
/// `dev = sqrt(s / 6 / n) / (tau0 · m)`, and `err = dev / sqrt(n)`.
#[inline]
fn calc_hadamard_at(phase: &[f64], rate: f64, m: usize, stride: usize) -> (f64, f64, usize) {
    let len = phase.len();
    let tau0 = 1.0 / rate;
    let windows = if len > 3 * m { (len - 3 * m).div_ceil(stride) } else { 0 };

    let mut sum_sq = 0.0;
    for k in 0..windows {
        let i = k * stride;
        let v = phase[i + 3 * m] - 3.0 * phase[i + 2 * m] + 3.0 * phase[i + m] - phase[i];
        sum_sq += v * v;
    }

    let n = windows.max(1);
    let dev = (sum_sq / 6.0 / n as f64).sqrt() / (tau0 * m as f64);
    let err = dev / (n as f64).sqrt();
    (dev, err, n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deviations::allan::adev;
    use approx::assert_relative_eq;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - A hand-computed overlapping value on the alternating series.
    // - Drift rejection: quadratic phase yields 0 here but not for ADEV.
    // - Agreement of hdev and ohdev at m = 1.
    // - Defensive filtering when the series is too short for 3m.
    //
    // They intentionally DO NOT cover:
    // - The phase/frequency delegation contract, pinned once in
    //   deviations::allan and by the integration tests.
    // -------------------------------------------------------------------------

    const TOL: f64 = 1e-12;

    #[test]
    // Purpose
    // -------
    // Pin the overlapping kernel against a hand computation.
    //
    // Given
    // -----
    // - Phase [0, 1, 0, 1, 0], rate 1, tau 1 (m = 1, stride 1).
    // - Third differences: 4, −4; sum of squares 32; n = 2.
    //
    // Expect
    // ------
    // - dev = sqrt(32 / 6 / 2) = sqrt(8 / 3), err = dev / sqrt(2), n = 2.
    fn ohdev_alternating_series_matches_hand_computation() {
        // Arrange
        let phase = [0.0, 1.0, 0.0, 1.0, 0.0];

        // Act
        let set = ohdev(MeasurementSeries::Phase(&phase), 1.0, &[1.0]).unwrap();

        // Assert
        assert_eq!(set.len(), 1);
        assert_eq!(set.ns().to_vec(), vec![2]);
        assert_relative_eq!(set.devs()[0], (8.0_f64 / 3.0).sqrt(), epsilon = TOL);
        assert_relative_eq!(set.errs()[0], (8.0_f64 / 3.0).sqrt() / 2.0_f64.sqrt(), epsilon = TOL);
    }

    #[test]
    // Purpose
    // -------
    // Verify drift rejection: a constant linear frequency drift produces
    // quadratic phase, which the third difference annihilates while the
    // second difference does not.
    //
    // Given
    // -----
    // - Phase x[i] = i² / 2 (drifting oscillator), rate 1, taus [1, 2].
    //
    // Expect
    // ------
    // - hdev 0 at every surviving tau; adev strictly positive.
    fn hdev_rejects_linear_frequency_drift_where_adev_does_not() {
        // Arrange
        let quad: Vec<f64> = (0..16).map(|i| (i * i) as f64 / 2.0).collect();
        let taus = [1.0, 2.0];

        // Act
        let hadamard = hdev(MeasurementSeries::Phase(&quad), 1.0, &taus).unwrap();
        let allan = adev(MeasurementSeries::Phase(&quad), 1.0, &taus).unwrap();

        // Assert
        assert_eq!(hadamard.len(), 2);
        for dev in hadamard.devs() {
            assert_relative_eq!(*dev, 0.0, epsilon = TOL);
        }
        for dev in allan.devs() {
            assert!(*dev > 0.0, "ADEV should see the drift, got {dev}");
        }
    }

    #[test]
    // Purpose
    // -------
    // At m = 1 the two forms sample identical difference terms, so their
    // results must agree exactly.
    //
    // Given
    // -----
    // - An irregular phase series, rate 1, tau 1.
    //
    // Expect
    // ------
    // - Equal result sets.
    fn hdev_and_ohdev_agree_at_unit_factor() {
        // Arrange
        let phase = [0.0, 0.9, -0.3, 1.7, 0.2, 0.8, -0.4];

        // Act
        let plain = hdev(MeasurementSeries::Phase(&phase), 1.0, &[1.0]).unwrap();
        let overlapping = ohdev(MeasurementSeries::Phase(&phase), 1.0, &[1.0]).unwrap();

        // Assert
        assert_eq!(plain, overlapping);
    }

    #[test]
    // Purpose
    // -------
    // A factor that passes tau selection but leaves no complete third
    // difference must be filtered out, not divide by zero.
    //
    // Given
    // -----
    // - Phase of length 5, rate 1, tau 2 (m = 2 < 5, but 3m = 6 > 5).
    //
    // Expect
    // ------
    // - An empty result set.
    fn hdev_factor_too_large_for_third_difference_is_filtered() {
        // Arrange
        let phase = [0.0, 1.0, 2.0, 3.0, 4.0];

        // Act
        let set = hdev(MeasurementSeries::Phase(&phase), 1.0, &[2.0]).unwrap();

        // Assert
        assert!(set.is_empty());
    }
}
