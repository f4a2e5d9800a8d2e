//! deviations::interval — time-interval-error statistics.
//!
//! Purpose
//! -------
//! Implement the two time-interval-error statistics: the maximum time
//! interval error ([`mtie`]), the worst-case peak-to-peak phase excursion
//! inside a sliding window, and the RMS time interval error ([`tierms`]),
//! the root-mean-square of phase differences at a fixed offset.
//!
//! Key behaviors
//! -------------
//! - MTIE slides a window of `m + 1` consecutive phase samples across the
//!   series, takes the local range (max − min) of each, and reports the
//!   maximum range over all `N − m` windows. This matches Stable32's
//!   "Fast(u)" computation; Stable32's Decade and Octave dataset-extension
//!   modes are explicitly out of scope.
//! - TIE-RMS forms `x[i+m] − x[i]` for every offset pair and reports the
//!   RMS of those differences over the `N − m` pairs.
//! - Both report `n = N − m`. MTIE's error is `dev / sqrt(n)`; TIE-RMS's
//!   error is reported as exactly 0.0 — no error law is established for
//!   this statistic, and a zero placeholder is deliberately kept (and
//!   pinned by a test) rather than inventing one.
//!
//! Invariants & assumptions
//! ------------------------
//! - `m < N` for every surviving factor, so `n ≥ 1` always; `n = 1`
//!   entries are removed by the support filter as everywhere else.
//! - Window ranges are non-negative, so MTIE is non-negative and
//!   non-decreasing in m for fixed data.
//!
//! Testing notes
//! -------------
//! - Unit tests pin a worked MTIE scenario, range growth with window
//!   size, TIE-RMS hand values, and the always-zero TIE-RMS error.

use crate::deviations::errors::StabilityResult;
use crate::deviations::outcome::DeviationSet;
use crate::deviations::phase::MeasurementSeries;
use crate::deviations::tau::select_taus;

/// Maximum time interval error.
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
///   Per-tau entries where the deviation is the maximum peak-to-peak
///   range over all windows of `m + 1` consecutive samples,
///   `n = N − m`, and `err = dev / sqrt(n)`.
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
/// - Matches Stable32's "Fast(u)" windowing; Stable32's Decade/Octave
///   dataset-extension modes are out of scope.
pub fn mtie(series: MeasurementSeries<'_>, rate: f64, taus: &[f64]) -> StabilityResult<DeviationSet> {
    let phase = series.to_phase(rate)?;
    let selection = select_taus(phase.len(), rate, taus)?;

    let mut devs = Vec::with_capacity(selection.len());
    let mut errs = Vec::with_capacity(selection.len());
    let mut ns = Vec::with_capacity(selection.len());
    for &m in selection.factors() {
        let n = phase.len() - m;

        // TODO: replace the per-window rescan with a monotonic-deque
        // sliding max/min so large m stops costing O(N·m).
        let mut max_range = 0.0_f64;
        for start in 0..n {
            let window = &phase[start..=start + m];
            let mut lo = window[0];
            let mut hi = window[0];
            for &x in &window[1..] {
                if x < lo {
                    lo = x;
                }
                if x > hi {
                    hi = x;
                }
            }
            let range = hi - lo;
            if range > max_range {
                max_range = range;
            }
        }

        devs.push(max_range);
        errs.push(max_range / (n as f64).sqrt());
        ns.push(n);
    }
    Ok(DeviationSet::from_raw(selection.taus().to_vec(), devs, errs, ns))
}

/// RMS time interval error.
///
/// Parameters
/// ----------
/// Identical to [`mtie`].
///
/// Returns
/// -------
/// `StabilityResult<DeviationSet>`
///   Per-tau entries where the deviation is the RMS of
///   `x[i+m] − x[i]` over the `N − m` offset pairs and `n = N − m`.
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
/// - Known limitation: the error term is reported as exactly 0.0 for
///   every entry. No error law is established for this statistic, so the
///   zero placeholder is kept (and pinned by a test) rather than silently
///   substituting an invented one.
pub fn tierms(
    series: MeasurementSeries<'_>, rate: f64, taus: &[f64],
) -> StabilityResult<DeviationSet> {
    let phase = series.to_phase(rate)?;
    let selection = select_taus(phase.len(), rate, taus)?;

    let mut devs = Vec::with_capacity(selection.len());
    let mut errs = Vec::with_capacity(selection.len());
    let mut ns = Vec::with_capacity(selection.len());
    for &m in selection.factors() {
        let n = phase.len() - m;

        let mut sum_sq = 0.0;
        for i in 0..n {
            let d = phase[i + m] - phase[i];
            sum_sq += d * d;
        }

        devs.push((sum_sq / n as f64).sqrt());
        errs.push(0.0);
        ns.push(n);
    }
    Ok(DeviationSet::from_raw(selection.taus().to_vec(), devs, errs, ns))
}
