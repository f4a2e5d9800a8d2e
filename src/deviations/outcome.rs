//! deviations::outcome — filtered result sets for stability estimators.
//!
//! Purpose
//! -------
//! Define the common output shape of every deviation estimator: four
//! parallel arrays (actual tau, deviation, deviation error, supporting
//! sample count), post-filtered so that statistically meaningless entries
//! never reach a caller.
//!
//! Key behaviors
//! -------------
//! - [`DeviationSet::from_raw`] is the single construction path; it drops
//!   every entry whose supporting count n is 1 or less, preserving order.
//!   Estimators route their raw per-tau results through it before
//!   returning, so the n > 1 invariant holds crate-wide by construction.
//! - Accessors expose the arrays read-only; [`DeviationSet::into_tuple`]
//!   releases them for callers that want the plain four-array contract.
//!
//! Invariants & assumptions
//! ------------------------
//! - All four arrays always have equal length.
//! - `ns[i] > 1` for every retained entry.
//! - An empty set is a valid outcome (degenerate tau selection or nothing
//!   surviving the filter), not an error.
//!
//! Conventions
//! -----------
//! - `errs[i] = devs[i] / sqrt(ns[i])` for every statistic except TIE-RMS,
//!   which carries a documented always-zero error (see
//!   [`tierms`](crate::deviations::interval::tierms)).
//!
//! Testing notes
//! -------------
//! - Unit tests cover the filter (n = 0, 1, and > 1 entries), order
//!   preservation, the empty outcome, tuple release, and the equal-length
//!   construction contract.

use ndarray::Array1;

/// DeviationSet — one estimator run's surviving per-tau results.
///
/// Purpose
/// -------
/// Hold the `(tau, deviation, error, n)` quadruple for every averaging
/// interval that survived both tau normalization and the n > 1 support
/// filter, in ascending tau order.
///
/// Fields
/// ------
/// - `taus`: `Array1<f64>`
///   Actual averaging intervals (`m / rate`), seconds.
/// - `devs`: `Array1<f64>`
///   Deviation estimates, one per surviving tau.
/// - `errs`: `Array1<f64>`
///   Estimated errors of the deviations.
/// - `ns`: `Array1<usize>`
///   Number of difference terms supporting each estimate; always > 1.
///
/// Invariants
/// ----------
/// - The four arrays have equal length.
/// - Every `ns[i] > 1`; entries failing this are removed at construction.
///
/// Notes
/// -----
/// - Constructed only through [`from_raw`](Self::from_raw); there is no
///   way to build a set that skips the support filter.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviationSet {
    taus: Array1<f64>,
    devs: Array1<f64>,
    errs: Array1<f64>,
    ns: Array1<usize>,
}

impl DeviationSet {
    /// Build a result set from raw per-tau entries, dropping weak support.
    ///
    /// Parameters
    /// ----------
    /// - `taus`, `devs`, `errs`: `Vec<f64>`
    ///   Parallel per-tau values as computed by an estimator, before
    ///   filtering.
    /// - `ns`: `Vec<usize>`
    ///   Supporting sample counts, parallel to the other three.
    ///
    /// Returns
    /// -------
    /// `DeviationSet`
    ///   The subsequence of entries with `n > 1`, order preserved.
    ///
    /// Panics
    /// ------
    /// - If the four vectors do not have equal length. Estimators always
    ///   build them in lockstep, so a mismatch is a programming error, not
    ///   a data condition.
    ///
    /// Notes
    /// -----
    /// - This is the crate-wide suppression point for estimates based on a
    ///   single difference term; it is a statistical-validity rule, not an
    ///   error path.
    ///
    /// Examples
    /// --------
    /// ```rust
    /// use rust_stability::deviations::outcome::DeviationSet;
    ///
    /// let set = DeviationSet::from_raw(
    ///     vec![1.0, 2.0, 3.0],
    ///     vec![0.5, 0.7, 0.9],
    ///     vec![0.1, 0.2, 0.3],
    ///     vec![9, 1, 4],
    /// );
    /// assert_eq!(set.len(), 2);
    /// assert_eq!(set.ns().to_vec(), vec![9, 4]);
    /// ```
    pub fn from_raw(taus: Vec<f64>, devs: Vec<f64>, errs: Vec<f64>, ns: Vec<usize>) -> Self {
        assert_eq!(taus.len(), devs.len(), "taus/devs length mismatch");
        assert_eq!(taus.len(), errs.len(), "taus/errs length mismatch");
        assert_eq!(taus.len(), ns.len(), "taus/ns length mismatch");

        let keep: Vec<usize> = (0..ns.len()).filter(|&i| ns[i] > 1).collect();
        DeviationSet {
            taus: keep.iter().map(|&i| taus[i]).collect(),
            devs: keep.iter().map(|&i| devs[i]).collect(),
            errs: keep.iter().map(|&i| errs[i]).collect(),
            ns: keep.iter().map(|&i| ns[i]).collect(),
        }
    }

    /// Actual averaging intervals, seconds.
    pub fn taus(&self) -> &Array1<f64> {
        &self.taus
    }

    /// Deviation estimates.
    pub fn devs(&self) -> &Array1<f64> {
        &self.devs
    }

    /// Estimated errors of the deviations.
    pub fn errs(&self) -> &Array1<f64> {
        &self.errs
    }

    /// Supporting sample counts.
    pub fn ns(&self) -> &Array1<usize> {
        &self.ns
    }

    /// Number of surviving tau entries.
    pub fn len(&self) -> usize {
        self.taus.len()
    }

    /// Whether no entry survived normalization and filtering.
    pub fn is_empty(&self) -> bool {
        self.taus.is_empty()
    }

    /// Release the four parallel arrays `(taus, devs, errs, ns)`.
    pub fn into_tuple(self) -> (Array1<f64>, Array1<f64>, Array1<f64>, Array1<usize>) {
        (self.taus, self.devs, self.errs, self.ns)
    }
}
