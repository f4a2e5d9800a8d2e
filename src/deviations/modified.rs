//! deviations::modified — modified Allan deviation and time deviation.
//!
//! Purpose
//! -------
//! Implement the modified Allan deviation ([`mdev`]), which boxcar-averages
//! the second difference over the averaging window before squaring, and the
//! time deviation ([`tdev`]), a rescaling of MDEV that expresses the same
//! statistic in units of time.
//!
//! Key behaviors
//! -------------
//! - MDEV uses a two-stage accumulation: the first window sum
//!   `Σ_{i<m} (x[2m+i] − 2·x[m+i] + x[i])` is formed directly, then each
//!   subsequent window is obtained from the previous one by a running
//!   four-term update `x[3m+j] − 3·x[2m+j] + 3·x[m+j] − x[j]` — a
//!   cumulative sum, not a rescan, so the cost per tau is linear in N.
//! - The squared window sums are normalized by `2·m²·tau²·n` before the
//!   square root; the estimate error is `dev / sqrt(n)`.
//! - TDEV is `tau · mdev / sqrt(3)` with error `tdev / sqrt(n)`, reusing
//!   MDEV's surviving taus and counts unchanged.
//!
//! Invariants & assumptions
//! ------------------------
//! - `n = N − 3m + 1` complete windows when `N > 3m`, degrading to the
//!   defensive `n = 1` (filtered) below that.
//! - A truncated first window (`2m < N ≤ 3m`) still sums the available
//!   `N − 2m` second differences before the (filtered) single-window
//!   normalization.
//!
//! Testing notes
//! -------------
//! - Unit tests pin a hand-computed MDEV on the alternating series, the
//!   linear-ramp zero with exact counts, the TDEV/MDEV rescaling relation,
//!   and defensive filtering of short series.

use crate::deviations::errors::StabilityResult;
use crate::deviations::outcome::DeviationSet;
use crate::deviations::phase::MeasurementSeries;
use crate::deviations::tau::select_taus;

/// Modified Allan deviation.
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
/// - The window averaging distinguishes white from flicker phase noise,
///   which the plain Allan deviation cannot separate.
pub fn mdev(series: MeasurementSeries<'_>, rate: f64, taus: &[f64]) -> StabilityResult<DeviationSet> {
    let phase = series.to_phase(rate)?;
    let selection = select_taus(phase.len(), rate, taus)?;

    let mut devs = Vec::with_capacity(selection.len());
    let mut errs = Vec::with_capacity(selection.len());
    let mut ns = Vec::with_capacity(selection.len());
    for (&m, &tau) in selection.factors().iter().zip(selection.taus()) {
        let (dev, err, n) = calc_modified_at(&phase, m, tau);
        devs.push(dev);
        errs.push(err);
        ns.push(n);
    }
    Ok(DeviationSet::from_raw(selection.taus().to_vec(), devs, errs, ns))
}

/// Time deviation.
///
/// Parameters
/// ----------
/// Identical to [`mdev`].
///
/// Returns
/// -------
/// `StabilityResult<DeviationSet>`
///   MDEV rescaled per entry as `tdev = tau · mdev / sqrt(3)`, with error
///   `tdev / sqrt(n)`; taus and counts are those surviving the MDEV run.
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
/// - TDEV characterizes time-transfer stability in seconds rather than as
///   a dimensionless frequency statistic.
pub fn tdev(series: MeasurementSeries<'_>, rate: f64, taus: &[f64]) -> StabilityResult<DeviationSet> {
    let modified = mdev(series, rate, taus)?;

    let mut taus_used = Vec::with_capacity(modified.len());
    let mut devs = Vec::with_capacity(modified.len());
    let mut errs = Vec::with_capacity(modified.len());
    let mut ns = Vec::with_capacity(modified.len());
    for i in 0..modified.len() {
        let tau = modified.taus()[i];
        let n = modified.ns()[i];
        let td = tau * modified.devs()[i] / 3.0_f64.sqrt();
        taus_used.push(tau);
        devs.push(td);
        errs.push(td / (n as f64).sqrt());
        ns.push(n);
    }
    Ok(DeviationSet::from_raw(taus_used, devs, errs, ns))
}

//
// ---------- Private helpers (compact docs) ----------
//

/// Evaluate the averaged-window second difference at one factor.
///
/// Parameters
/// ----------
/// - `phase`: phase series of length N.
/// - `m`: averaging factor, `0 < m < N`.
/// - `tau`: actual averaging interval `m / rate`.
///
/// Returns
/// -------
/// `(dev, err, n)` with `n = N.saturating_sub(3m) + 1` window positions:
/// the first window is summed directly over `min(m, N − 2m)` second
/// differences, each later window is the previous plus one four-term
/// update, and the squared sums are normalized by `2·m²·tau²·n`.
#[inline]
fn calc_modified_at(phase: &[f64], m: usize, tau: f64) -> (f64, f64, usize) {
    let len = phase.len();

    // First window, summed directly (possibly truncated for short series).
    let head = m.min(len.saturating_sub(2 * m));
    let mut window = 0.0;
    for i in 0..head {
        window += phase[2 * m + i] - 2.0 * phase[m + i] + phase[i];
    }
    let mut sum_sq = window * window;

    // Remaining windows via the running four-term update.
    let tail = len.saturating_sub(3 * m);
    let n = tail + 1;
    let mut acc = window;
    for j in 0..tail {
        acc += phase[3 * m + j] - 3.0 * phase[2 * m + j] + 3.0 * phase[m + j] - phase[j];
        sum_sq += acc * acc;
    }

    let var = sum_sq / (2.0 * (m as f64).powi(2) * tau.powi(2) * n as f64);
    let dev = var.sqrt();
    let err = dev / (n as f64).sqrt();
    (dev, err, n)
}
