//! deviations::allan — standard and overlapping Allan deviation.
//!
//! Purpose
//! -------
//! Implement the two-sample (Allan) deviation in its non-overlapping
//! ([`adev`]) and fully overlapping ([`oadev`]) forms. Both are built on
//! the same second-difference kernel over phase data,
//! `x[i+2m] − 2·x[i+m] + x[i]`, and differ only in the stride at which the
//! difference is sampled: `m` for the classical estimator, 1 for the
//! overlapping one.
//!
//! Key behaviors
//! -------------
//! - Resolve the input to phase via
//!   [`MeasurementSeries::to_phase`](crate::deviations::phase::MeasurementSeries::to_phase),
//!   normalize the tau request with
//!   [`select_taus`](crate::deviations::tau::select_taus), and evaluate the
//!   kernel once per surviving averaging factor.
//! - Normalize the squared-difference sum by `2·n`, take the square root,
//!   and scale by `rate / m`; the estimate error is `dev / sqrt(n)`.
//! - Promote an empty window set (series too short for `2m`) to a
//!   defensive `n = 1` entry with a zero sum, which the support filter
//!   then removes.
//!
//! Invariants & assumptions
//! ------------------------
//! - For fixed data length, `n` is non-increasing in `m` for both forms.
//! - A perfectly linear phase ramp has identically zero second
//!   differences, so both estimators report exactly 0 at every surviving
//!   tau.
//!
//! Testing notes
//! -------------
//! - Unit tests pin hand-computed values on tiny series, the linear-ramp
//!   zero, the stride-1 agreement of the two forms at `m = 1`, the
//!   defensive filtering of too-large factors, and the phase/frequency
//!   delegation contract.

use crate::deviations::errors::StabilityResult;
use crate::deviations::outcome::DeviationSet;
use crate::deviations::phase::MeasurementSeries;
use crate::deviations::tau::select_taus;

/// Allan deviation (non-overlapping estimator).
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
/// - Adjacent averaging windows do not share samples (stride `m`); use
///   [`oadev`] for the estimator that reuses every sample offset.
///
/// Examples
/// --------
/// ```rust
/// use rust_stability::deviations::allan::adev;
/// use rust_stability::deviations::phase::MeasurementSeries;
///
/// // A linear phase ramp has zero second differences at every tau.
/// let ramp: Vec<f64> = (0..10).map(|i| i as f64).collect();
/// let set = adev(MeasurementSeries::Phase(&ramp), 1.0, &[1.0, 2.0, 3.0]).unwrap();
/// assert_eq!(set.taus().to_vec(), vec![1.0, 2.0, 3.0]);
/// assert!(set.devs().iter().all(|d| d.abs() < 1e-12));
/// ```
pub fn adev(series: MeasurementSeries<'_>, rate: f64, taus: &[f64]) -> StabilityResult<DeviationSet> {
    let phase = series.to_phase(rate)?;
    allan_family(&phase, rate, taus, false)
}

/// Overlapping Allan deviation.
///
/// Parameters
/// ----------
/// Identical to [`adev`].
///
/// Returns
/// -------
/// `StabilityResult<DeviationSet>`
///   As for [`adev`], but every sample offset contributes a difference
///   term (stride 1), so `n` is larger and the estimate correspondingly
///   tighter at the same tau.
///
/// Errors
/// ------
/// - `StabilityError::InvalidSampleRate`
///   Returned for a zero, negative, NaN, or infinite rate.
///
/// Panics
/// ------
/// - Never panics.
pub fn oadev(
    series: MeasurementSeries<'_>, rate: f64, taus: &[f64],
) -> StabilityResult<DeviationSet> {
    let phase = series.to_phase(rate)?;
    allan_family(&phase, rate, taus, true)
}

//
// ---------- Private helpers (compact docs) ----------
//

/// Shared driver for both Allan forms.
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
fn allan_family(
    phase: &[f64], rate: f64, taus: &[f64], overlapping: bool,
) -> StabilityResult<DeviationSet> {
    let selection = select_taus(phase.len(), rate, taus)?;

    let mut devs = Vec::with_capacity(selection.len());
    let mut errs = Vec::with_capacity(selection.len());
    let mut ns = Vec::with_capacity(selection.len());
    for &m in selection.factors() {
        let stride = if overlapping { 1 } else { m };
        let (dev, err, n) = calc_allan_at(phase, rate, m, stride);
        devs.push(dev);
        errs.push(err);
        ns.push(n);
    }
    Ok(DeviationSet::from_raw(selection.taus().to_vec(), devs, errs, ns))
}

/// Evaluate the second-difference kernel at one averaging factor.
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
/// `(dev, err, n)` where `n = ceil((N − 2m) / stride)` difference terms
/// were summed (promoted to 1 with a zero sum when N ≤ 2m),
/// `dev = sqrt(s / (2n)) · rate / m`, and `err = dev / sqrt(n)`.
#[inline]
fn calc_allan_at(phase: &[f64], rate: f64, m: usize, stride: usize) -> (f64, f64, usize) {
    let len = phase.len();
    let windows = if len > 2 * m { (len - 2 * m).div_ceil(stride) } else { 0 };

    let mut sum_sq = 0.0;
    for k in 0..windows {
        let i = k * stride;
        let v = phase[i + 2 * m] - 2.0 * phase[i + m] + phase[i];
        sum_sq += v * v;
    }

    let n = windows.max(1);
    let dev = (sum_sq / (2.0 * n as f64)).sqrt() / m as f64 * rate;
    let err = dev / (n as f64).sqrt();
    (dev, err, n)
}
