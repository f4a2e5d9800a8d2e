//! deviations::phase — measurement domains and phase integration.
//!
//! Purpose
//! -------
//! Define the two measurement domains the estimators accept — phase samples
//! and fractional-frequency samples — and the integration step that turns
//! the latter into the former. Every statistic in this crate is defined on
//! phase data; frequency data reaches it only through this module.
//!
//! Key behaviors
//! -------------
//! - Carry the measurement domain in the input type
//!   ([`MeasurementSeries`]) instead of a function-name suffix, so a caller
//!   cannot hand frequency data to a phase-only code path by mistake.
//! - Integrate fractional frequency into phase with a running prefix sum
//!   and a zero-valued sentinel prepended; output length is input length
//!   plus one.
//! - Borrow phase inputs as-is (no copy) and allocate only for the
//!   frequency arm, via `Cow`.
//!
//! Invariants & assumptions
//! ------------------------
//! - `frequency_to_phase(f, rate)[0] == 0.0` and
//!   `out[i + 1] == (f[0] + … + f[i]) / rate` under running left-to-right
//!   accumulation; the accumulation order is fixed so results are
//!   bit-for-bit reproducible.
//! - Conversion through [`MeasurementSeries::to_phase`] must match the
//!   manual convert-then-wrap-in-`Phase` path elementwise; estimators rely
//!   on this equivalence and the integration tests pin it down.
//!
//! Conventions
//! -----------
//! - Phase samples are cumulative time error in seconds; fractional
//!   frequency samples are dimensionless offsets. Neither is validated for
//!   finiteness — non-finite measurements propagate into the statistics
//!   exactly as they would through any other arithmetic.
//!
//! Testing notes
//! -------------
//! - Unit tests cover the sentinel, the output length, exact prefix-sum
//!   values, the borrow/allocate split of `to_phase`, and the invalid-rate
//!   error path.

use std::borrow::Cow;

use crate::deviations::errors::StabilityResult;
use crate::deviations::validation::validate_rate;

/// MeasurementSeries — a borrowed series tagged with its measurement domain.
///
/// Purpose
/// -------
/// Make the phase-vs-frequency distinction explicit in the type system.
/// Each deviation estimator takes a `MeasurementSeries` and obtains phase
/// data through [`to_phase`](Self::to_phase); the frequency arm delegates
/// to [`frequency_to_phase`] and is therefore guaranteed to agree with a
/// manual conversion.
///
/// Variants
/// --------
/// - `Phase(&[f64])`
///   Cumulative time-error samples, in seconds. Used directly.
/// - `FractionalFrequency(&[f64])`
///   Dimensionless fractional-frequency offsets. Integrated into phase
///   before any statistic is computed; the resulting phase series is one
///   sample longer than the input.
///
/// Notes
/// -----
/// - The enum is `Copy` over a borrow, so passing it by value is free and
///   the underlying data is never cloned by the wrapper itself.
#[derive(Debug, Clone, Copy)]
pub enum MeasurementSeries<'a> {
    Phase(&'a [f64]),
    FractionalFrequency(&'a [f64]),
}

impl<'a> MeasurementSeries<'a> {
    /// Resolve this series to phase data.
    ///
    /// Parameters
    /// ----------
    /// - `rate`: `f64`
    ///   Sample rate in Hz; must be finite and strictly positive. Used to
    ///   scale the integration for the frequency arm and validated for
    ///   both arms so the two domains fail identically on a bad rate.
    ///
    /// Returns
    /// -------
    /// `StabilityResult<Cow<'a, [f64]>>`
    ///   - `Cow::Borrowed` of the original slice for `Phase`.
    ///   - `Cow::Owned` of the integrated series for
    ///     `FractionalFrequency`.
    ///
    /// Errors
    /// ------
    /// - `StabilityError::InvalidSampleRate`
    ///   Returned when `rate` is zero, negative, NaN, or infinite.
    ///
    /// Panics
    /// ------
    /// - Never panics.
    pub fn to_phase(self, rate: f64) -> StabilityResult<Cow<'a, [f64]>> {
        match self {
            MeasurementSeries::Phase(phase) => {
                validate_rate(rate)?;
                Ok(Cow::Borrowed(phase))
            }
            MeasurementSeries::FractionalFrequency(freq) => {
                Ok(Cow::Owned(frequency_to_phase(freq, rate)?))
            }
        }
    }
}

/// Integrate a fractional-frequency series into a phase series.
///
/// Parameters
/// ----------
/// - `freq`: `&[f64]`
///   Fractional-frequency offsets, dimensionless, length N ≥ 0.
/// - `rate`: `f64`
///   Sample rate in Hz; must be finite and strictly positive.
///
/// Returns
/// -------
/// `StabilityResult<Vec<f64>>`
///   Phase series of length N + 1 with `out[0] = 0.0` and
///   `out[i + 1] = (f[0] + … + f[i]) / rate`.
///
/// Errors
/// ------
/// - `StabilityError::InvalidSampleRate`
///   Returned when `rate` is zero, negative, NaN, or infinite.
///
/// Panics
/// ------
/// - Never panics.
///
/// Notes
/// -----
/// - The prefix sum runs over the raw frequency values and each prefix is
///   scaled by `1 / rate` afterwards; keeping one fixed accumulation order
///   makes long-series results reproducible across runs.
///
/// Examples
/// --------
/// ```rust
/// use rust_stability::deviations::phase::frequency_to_phase;
///
/// let phase = frequency_to_phase(&[1.0, 1.0, 1.0], 2.0).unwrap();
/// assert_eq!(phase, vec![0.0, 0.5, 1.0, 1.5]);
/// ```
pub fn frequency_to_phase(freq: &[f64], rate: f64) -> StabilityResult<Vec<f64>> {
    validate_rate(rate)?;

    let dt = 1.0 / rate;
    let mut phase = Vec::with_capacity(freq.len() + 1);
    phase.push(0.0);

    let mut running = 0.0;
    for &f in freq {
        running += f;
        phase.push(running * dt);
    }
    Ok(phase)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deviations::errors::StabilityError;
    use approx::assert_relative_eq;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Sentinel, length, and exact prefix values of `frequency_to_phase`.
    // - The borrow/allocate split of `MeasurementSeries::to_phase`.
    // - The invalid-rate error path for both arms.
    //
    // They intentionally DO NOT cover:
    // - Elementwise equivalence of estimator results across the two
    //   domains; that contract is pinned by the estimator modules and the
    //   integration tests.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify the zero sentinel, the N + 1 output length, and the exact
    // running-sum values of the integration.
    //
    // Given
    // -----
    // - freq = [1, 1, 1], rate = 2 Hz.
    //
    // Expect
    // ------
    // - Phase [0.0, 0.5, 1.0, 1.5].
    fn frequency_to_phase_integrates_with_zero_sentinel() {
        // Arrange
        let freq = [1.0, 1.0, 1.0];

        // Act
        let phase = frequency_to_phase(&freq, 2.0).unwrap();

        // Assert
        assert_eq!(phase.len(), freq.len() + 1);
        for (got, want) in phase.iter().zip([0.0, 0.5, 1.0, 1.5]) {
            assert_relative_eq!(*got, want, epsilon = 1e-15);
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify that an empty frequency series integrates to the lone
    // sentinel sample.
    //
    // Given
    // -----
    // - freq = [], rate = 1 Hz.
    //
    // Expect
    // ------
    // - Phase [0.0].
    fn frequency_to_phase_empty_input_yields_sentinel_only() {
        // Arrange
        let freq: [f64; 0] = [];

        // Act
        let phase = frequency_to_phase(&freq, 1.0).unwrap();

        // Assert
        assert_eq!(phase, vec![0.0]);
    }

    #[test]
    // Purpose
    // -------
    // Ensure `to_phase` borrows phase inputs without copying and allocates
    // only for the frequency arm.
    //
    // Given
    // -----
    // - A phase slice and a frequency slice, rate = 1 Hz.
    //
    // Expect
    // ------
    // - `Cow::Borrowed` for the phase arm, `Cow::Owned` for the frequency
    //   arm, with the frequency arm matching `frequency_to_phase`.
    fn to_phase_borrows_phase_and_owns_converted_frequency() {
        // Arrange
        let phase_data = [0.0, 1.0, 2.0];
        let freq_data = [0.5, -0.5];

        // Act
        let borrowed = MeasurementSeries::Phase(&phase_data).to_phase(1.0).unwrap();
        let owned = MeasurementSeries::FractionalFrequency(&freq_data).to_phase(1.0).unwrap();

        // Assert
        assert!(matches!(borrowed, Cow::Borrowed(_)));
        assert!(matches!(owned, Cow::Owned(_)));
        assert_eq!(owned.as_ref(), frequency_to_phase(&freq_data, 1.0).unwrap().as_slice());
    }

    #[test]
    // Purpose
    // -------
    // Ensure both arms of `to_phase` reject an unusable rate the same way.
    //
    // Given
    // -----
    // - rate = 0.0 for a phase series and a frequency series.
    //
    // Expect
    // ------
    // - `Err(InvalidSampleRate(0.0))` from both arms.
    fn to_phase_zero_rate_fails_for_both_domains() {
        // Arrange
        let data = [0.0, 1.0];

        // Act
        let phase_result = MeasurementSeries::Phase(&data).to_phase(0.0);
        let freq_result = MeasurementSeries::FractionalFrequency(&data).to_phase(0.0);

        // Assert
        for result in [phase_result, freq_result] {
            match result {
                Err(StabilityError::InvalidSampleRate(r)) => assert_eq!(r, 0.0),
                other => panic!("expected InvalidSampleRate error, got {other:?}"),
            }
        }
    }
}
