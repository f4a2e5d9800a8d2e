//! deviations::three_cornered — three-cornered-hat clock separation.
//!
//! Purpose
//! -------
//! Estimate one clock's standalone instability from three pairwise
//! comparisons among clocks A, B, and C. Each pairwise phase series is run
//! through a caller-chosen deviation estimator; the pairwise variances are
//! then combined under the uncorrelated-noise assumption as
//! `var_A = 0.5 · (var_AB + var_CA − var_BC)`.
//!
//! Key behaviors
//! -------------
//! - Generic over the estimator: any of this crate's statistics (or a
//!   caller-supplied closure with the same shape) can drive the three
//!   independent legs.
//! - The three legs must survive filtering with identical tau counts;
//!   otherwise the elementwise combination is meaningless and a
//!   [`CorneredLegMismatch`](crate::deviations::errors::StabilityError::CorneredLegMismatch)
//!   error is returned.
//! - Measurement noise can push a combined variance below zero even though
//!   no physical variance is negative; such entries clamp to deviation
//!   0.0 rather than producing NaN. This is the only place in the crate
//!   where a negative variance can arise.
//!
//! Invariants & assumptions
//! ------------------------
//! - The noise processes of the three clocks are assumed uncorrelated;
//!   the combination is only as good as that assumption.
//! - The returned taus are those of the A–B leg (all legs agree on count;
//!   equal series lengths also make the values agree).
//!
//! Testing notes
//! -------------
//! - Unit tests cover the identical-legs reduction, the negative-variance
//!   clamp, and the mismatched-legs error path.

use ndarray::Array1;

use crate::deviations::errors::{StabilityError, StabilityResult};
use crate::deviations::outcome::DeviationSet;
use crate::deviations::phase::MeasurementSeries;

/// Separate clock A's instability from three pairwise comparisons.
///
/// Parameters
/// ----------
/// - `ab`, `bc`, `ca`: `&[f64]`
///   Pairwise phase-difference series (seconds) for the clock pairs A–B,
///   B–C, and C–A, sampled at the same rate.
/// - `rate`: `f64`
///   Sample rate in Hz; must be finite and strictly positive.
/// - `taus`: `&[f64]`
///   Requested averaging intervals, handed unchanged to each leg.
/// - `estimator`: `F`
///   Deviation estimator to run on each leg, e.g.
///   [`oadev`](crate::deviations::allan::oadev). Called with
///   `MeasurementSeries::Phase` inputs.
///
/// Returns
/// -------
/// `StabilityResult<(Array1<f64>, Array1<f64>)>`
///   `(taus, devs)` for clock A: the surviving taus of the A–B leg and
///   the combined deviations, with negative combined variances clamped to
///   a deviation of 0.0.
///
/// Errors
/// ------
/// - `StabilityError::InvalidSampleRate`
///   Propagated from the estimator legs for an unusable rate.
/// - `StabilityError::CorneredLegMismatch`
///   Returned when the three legs survive filtering with different tau
///   counts (possible when the pairwise series have different lengths).
///
/// Panics
/// ------
/// - Never panics.
///
/// Notes
/// -----
/// - Estimates for clocks B and C follow by cyclic permutation of the
///   three input series.
///
/// Examples
/// --------
/// ```rust
/// use rust_stability::deviations::allan::oadev;
/// use rust_stability::deviations::three_cornered::three_cornered_hat;
///
/// // Three identical legs: var_A = 0.5 · var, so dev_A = dev / sqrt(2).
/// let noisy = [0.0, 1.0, 0.0, 1.0, 0.0, 1.0, 0.0];
/// let (taus, devs) =
///     three_cornered_hat(&noisy, &noisy, &noisy, 1.0, &[1.0], oadev).unwrap();
/// assert_eq!(taus.len(), devs.len());
/// ```
pub fn three_cornered_hat<F>(
    ab: &[f64], bc: &[f64], ca: &[f64], rate: f64, taus: &[f64], estimator: F,
) -> StabilityResult<(Array1<f64>, Array1<f64>)>
where
    F: Fn(MeasurementSeries<'_>, f64, &[f64]) -> StabilityResult<DeviationSet>,
{
    let set_ab = estimator(MeasurementSeries::Phase(ab), rate, taus)?;
    let set_bc = estimator(MeasurementSeries::Phase(bc), rate, taus)?;
    let set_ca = estimator(MeasurementSeries::Phase(ca), rate, taus)?;

    if set_ab.len() != set_bc.len() || set_ab.len() != set_ca.len() {
        return Err(StabilityError::CorneredLegMismatch {
            ab: set_ab.len(),
            bc: set_bc.len(),
            ca: set_ca.len(),
        });
    }

    let var_ab = set_ab.devs().mapv(|d| d * d);
    let var_bc = set_bc.devs().mapv(|d| d * d);
    let var_ca = set_ca.devs().mapv(|d| d * d);

    let var_a = 0.5 * (&var_ab + &var_ca - &var_bc);
    let dev_a = var_a.mapv(|v| if v < 0.0 { 0.0 } else { v.sqrt() });

    let (taus_ab, _, _, _) = set_ab.into_tuple();
    Ok((taus_ab, dev_a))
}
