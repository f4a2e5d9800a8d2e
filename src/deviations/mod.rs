//! deviations — frequency-stability statistics for clocks and oscillators.
//!
//! Purpose
//! -------
//! Collect the Allan-deviation family of stability estimators together with
//! their shared infrastructure: tau-request normalization, phase
//! integration, the common n > 1 support filter, error handling, and the
//! three-cornered-hat combination, including Python bridges for PyO3-based
//! bindings.
//!
//! Key behaviors
//! -------------
//! - Expose nine statistics over phase or fractional-frequency series:
//!   [`adev`], [`oadev`], [`mdev`], [`tdev`], [`hdev`], [`ohdev`],
//!   [`totdev`], [`mtie`], and [`tierms`]. Each takes a
//!   [`MeasurementSeries`], a sample rate, and a tau request list, and
//!   returns a filtered [`DeviationSet`].
//! - Centralize tau normalization in [`select_taus`] and rate guarding in
//!   [`validate_rate`], so every statistic drops invalid tau requests the
//!   same way and fails identically on a bad rate.
//! - Provide [`three_cornered_hat`] to separate one clock's instability
//!   from three pairwise comparisons, reusing any of the statistics as the
//!   leg estimator.
//!
//! Invariants & assumptions
//! ------------------------
//! - Every returned entry is supported by more than one difference term;
//!   the `n > 1` filter is applied at construction of [`DeviationSet`] and
//!   cannot be bypassed.
//! - The frequency arm of every statistic equals the manual
//!   integrate-then-phase path elementwise; the measurement domain lives
//!   in the input type rather than in function names.
//! - All computations are pure functions over borrowed input slices; no
//!   global or cached state exists anywhere in the subtree.
//!
//! Conventions
//! -----------
//! - Estimator modules keep their numeric kernels as private `calc_*`
//!   helpers beneath the public entry points; shared concerns (errors,
//!   validation, tau selection, outcome filtering) live in their own
//!   modules.
//! - Error messages are phrased in terms of domain constraints; at the
//!   Python boundary every [`StabilityError`] maps to `ValueError`.
//!
//! Downstream usage
//! ----------------
//! - Typical Rust code imports the main surface as:
//!
//!   ```rust
//!   use rust_stability::deviations::prelude::*;
//!
//!   let phase = [0.0, 0.9, -0.3, 1.7, 0.2, 0.8];
//!   let set = oadev(MeasurementSeries::Phase(&phase), 1.0, &[1.0, 2.0])?;
//!   for (tau, dev) in set.taus().iter().zip(set.devs()) {
//!       println!("tau = {tau} s  oadev = {dev:e}");
//!   }
//!   # Ok::<(), rust_stability::deviations::errors::StabilityError>(())
//!   ```
//!
//! - Python bindings expose thin wrappers around the same entry points and
//!   rely on `From<StabilityError> for PyErr` to raise `ValueError`.
//!
//! Testing notes
//! -------------
//! - Each module carries its own unit tests (hand-computed kernels, edge
//!   cases, error paths); `tests/integration_stability_pipeline.rs`
//!   exercises the full measurement-to-results pipeline across statistics.

pub mod allan;
pub mod errors;
pub mod hadamard;
pub mod interval;
pub mod modified;
pub mod outcome;
pub mod phase;
pub mod tau;
pub mod three_cornered;
pub mod total;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::allan::{adev, oadev};
pub use self::errors::{StabilityError, StabilityResult};
pub use self::hadamard::{hdev, ohdev};
pub use self::interval::{mtie, tierms};
pub use self::modified::{mdev, tdev};
pub use self::outcome::DeviationSet;
pub use self::phase::{MeasurementSeries, frequency_to_phase};
pub use self::tau::{TauSelection, select_taus};
pub use self::three_cornered::three_cornered_hat;
pub use self::total::totdev;
pub use self::validation::validate_rate;

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use rust_stability::deviations::prelude::*;
//
// to import the main stability-analysis surface in a single line.

pub mod prelude {
    pub use super::allan::{adev, oadev};
    pub use super::errors::{StabilityError, StabilityResult};
    pub use super::hadamard::{hdev, ohdev};
    pub use super::interval::{mtie, tierms};
    pub use super::modified::{mdev, tdev};
    pub use super::outcome::DeviationSet;
    pub use super::phase::{MeasurementSeries, frequency_to_phase};
    pub use super::three_cornered::three_cornered_hat;
    pub use super::total::totdev;
}
