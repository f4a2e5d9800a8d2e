//! rust_stability — frequency-stability statistics with Python bindings.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers and as the PyO3 bridge that
//! exposes the Allan-deviation family of estimators to Python via the
//! `_rust_stability` extension module. When the `python-bindings` feature
//! is enabled, this module defines the Python-facing functions and
//! submodules used by the `rust_stability` package.
//!
//! Key behaviors
//! -------------
//! - Re-export the core Rust module (`deviations`) as the public crate
//!   surface.
//! - Define `#[pyfunction]` wrappers and the `#[pymodule]` initializer for
//!   the `_rust_stability` Python extension.
//! - Create and register the `deviations` submodule under `rust_stability`
//!   so that dot-notation imports work as expected.
//!
//! Invariants & assumptions
//! ------------------------
//! - All numerical work is implemented in the inner Rust module; this file
//!   performs only FFI glue, input extraction, and error mapping.
//! - When `python-bindings` is enabled, the Python-visible functions mirror
//!   the contracts of their Rust counterparts: the same four-array result
//!   quadruple, the same silent dropping of out-of-range taus, and the
//!   same `ValueError` on a malformed sample rate.
//! - The Python `domain` keyword (`"phase"` / `"frequency"`) maps onto the
//!   [`MeasurementSeries`](deviations::phase::MeasurementSeries) variants,
//!   so the frequency path delegates through the same conversion the Rust
//!   surface uses.
//!
//! Conventions
//! -----------
//! - Python-exposed functions live under `rust_stability.deviations` and
//!   return `(taus, devs, errs, ns)` tuples of lists, matching the numeric
//!   contract of the Rust
//!   [`DeviationSet`](deviations::outcome::DeviationSet).
//! - Errors from core Rust code are propagated as rich error types
//!   internally and converted to `ValueError` at the PyO3 boundary.
//!
//! Downstream usage
//! ----------------
//! - Native Rust code should depend directly on
//!   [`deviations`](crate::deviations) (or its `prelude`) and can ignore
//!   the PyO3 items guarded by the `python-bindings` feature.
//! - The Python packaging layer imports the `_rust_stability` module
//!   defined here and re-exports its functions as the user-facing API.
//!
//! Testing notes
//! -------------
//! - Core numerical behavior is covered by unit tests in the inner modules
//!   and by `tests/integration_stability_pipeline.rs`.
//! - Smoke tests for the PyO3 bindings verify that functions can be called
//!   and round-tripped from Python; they live at the Python package level.

pub mod deviations;
pub mod utils;

#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyValueError, prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::{
    deviations::{errors::StabilityResult, outcome::DeviationSet, phase::MeasurementSeries},
    utils::{extract_f64_array, release_set, series_from_domain},
};

/// Shared shape of every statistic exposed at the Python boundary.
#[cfg(feature = "python-bindings")]
type Estimator = fn(MeasurementSeries<'_>, f64, &[f64]) -> StabilityResult<DeviationSet>;

/// Extract the Python arguments and run one statistic.
///
/// All nine `#[pyfunction]` wrappers share this body: pull the data and
/// tau arrays into contiguous slices, resolve the measurement domain, run
/// the estimator, and release the filtered set as the four-list tuple.
#[cfg(feature = "python-bindings")]
fn run_estimator<'py>(
    py: Python<'py>, data: &Bound<'py, PyAny>, rate: f64, taus: &Bound<'py, PyAny>, domain: &str,
    estimator: Estimator,
) -> PyResult<(Vec<f64>, Vec<f64>, Vec<f64>, Vec<usize>)> {
    let data_arr = extract_f64_array(py, data)?;
    let data_slice = data_arr.as_slice().map_err(|_| {
        PyValueError::new_err("data must be a 1-D contiguous float64 array or sequence")
    })?;

    let taus_arr = extract_f64_array(py, taus)?;
    let taus_slice = taus_arr.as_slice().map_err(|_| {
        PyValueError::new_err("taus must be a 1-D contiguous float64 array or sequence")
    })?;

    let series = series_from_domain(domain, data_slice)?;
    let set = estimator(series, rate, taus_slice)?;
    Ok(release_set(set))
}

/// Allan deviation. See [`deviations::allan::adev`].
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(
    signature = (data, rate, taus, domain = "phase"),
    text_signature = "(data, rate, taus, /, domain='phase')"
)]
fn adev<'py>(
    py: Python<'py>, data: &Bound<'py, PyAny>, rate: f64, taus: &Bound<'py, PyAny>, domain: &str,
) -> PyResult<(Vec<f64>, Vec<f64>, Vec<f64>, Vec<usize>)> {
    run_estimator(py, data, rate, taus, domain, deviations::allan::adev)
}

/// Overlapping Allan deviation. See [`deviations::allan::oadev`].
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(
    signature = (data, rate, taus, domain = "phase"),
    text_signature = "(data, rate, taus, /, domain='phase')"
)]
fn oadev<'py>(
    py: Python<'py>, data: &Bound<'py, PyAny>, rate: f64, taus: &Bound<'py, PyAny>, domain: &str,
) -> PyResult<(Vec<f64>, Vec<f64>, Vec<f64>, Vec<usize>)> {
    run_estimator(py, data, rate, taus, domain, deviations::allan::oadev)
}

/// Modified Allan deviation. See [`deviations::modified::mdev`].
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(
    signature = (data, rate, taus, domain = "phase"),
    text_signature = "(data, rate, taus, /, domain='phase')"
)]
fn mdev<'py>(
    py: Python<'py>, data: &Bound<'py, PyAny>, rate: f64, taus: &Bound<'py, PyAny>, domain: &str,
) -> PyResult<(Vec<f64>, Vec<f64>, Vec<f64>, Vec<usize>)> {
    run_estimator(py, data, rate, taus, domain, deviations::modified::mdev)
}

/// Time deviation. See [`deviations::modified::tdev`].
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(
    signature = (data, rate, taus, domain = "phase"),
    text_signature = "(data, rate, taus, /, domain='phase')"
)]
fn tdev<'py>(
    py: Python<'py>, data: &Bound<'py, PyAny>, rate: f64, taus: &Bound<'py, PyAny>, domain: &str,
) -> PyResult<(Vec<f64>, Vec<f64>, Vec<f64>, Vec<usize>)> {
    run_estimator(py, data, rate, taus, domain, deviations::modified::tdev)
}

/// Hadamard deviation. See [`deviations::hadamard::hdev`].
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(
    signature = (data, rate, taus, domain = "phase"),
    text_signature = "(data, rate, taus, /, domain='phase')"
)]
fn hdev<'py>(
    py: Python<'py>, data: &Bound<'py, PyAny>, rate: f64, taus: &Bound<'py, PyAny>, domain: &str,
) -> PyResult<(Vec<f64>, Vec<f64>, Vec<f64>, Vec<usize>)> {
    run_estimator(py, data, rate, taus, domain, deviations::hadamard::hdev)
}

/// Overlapping Hadamard deviation. See [`deviations::hadamard::ohdev`].
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(
    signature = (data, rate, taus, domain = "phase"),
    text_signature = "(data, rate, taus, /, domain='phase')"
)]
fn ohdev<'py>(
    py: Python<'py>, data: &Bound<'py, PyAny>, rate: f64, taus: &Bound<'py, PyAny>, domain: &str,
) -> PyResult<(Vec<f64>, Vec<f64>, Vec<f64>, Vec<usize>)> {
    run_estimator(py, data, rate, taus, domain, deviations::hadamard::ohdev)
}

/// Total deviation. See [`deviations::total::totdev`].
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(
    signature = (data, rate, taus, domain = "phase"),
    text_signature = "(data, rate, taus, /, domain='phase')"
)]
fn totdev<'py>(
    py: Python<'py>, data: &Bound<'py, PyAny>, rate: f64, taus: &Bound<'py, PyAny>, domain: &str,
) -> PyResult<(Vec<f64>, Vec<f64>, Vec<f64>, Vec<usize>)> {
    run_estimator(py, data, rate, taus, domain, deviations::total::totdev)
}

/// Maximum time interval error. See [`deviations::interval::mtie`].
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(
    signature = (data, rate, taus, domain = "phase"),
    text_signature = "(data, rate, taus, /, domain='phase')"
)]
fn mtie<'py>(
    py: Python<'py>, data: &Bound<'py, PyAny>, rate: f64, taus: &Bound<'py, PyAny>, domain: &str,
) -> PyResult<(Vec<f64>, Vec<f64>, Vec<f64>, Vec<usize>)> {
    run_estimator(py, data, rate, taus, domain, deviations::interval::mtie)
}

/// RMS time interval error. See [`deviations::interval::tierms`].
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(
    signature = (data, rate, taus, domain = "phase"),
    text_signature = "(data, rate, taus, /, domain='phase')"
)]
fn tierms<'py>(
    py: Python<'py>, data: &Bound<'py, PyAny>, rate: f64, taus: &Bound<'py, PyAny>, domain: &str,
) -> PyResult<(Vec<f64>, Vec<f64>, Vec<f64>, Vec<usize>)> {
    run_estimator(py, data, rate, taus, domain, deviations::interval::tierms)
}

/// Three-cornered-hat separation of clock A's instability.
///
/// Runs the statistic named by `statistic` on the three pairwise phase
/// series and combines the pairwise variances; see
/// [`deviations::three_cornered::three_cornered_hat`].
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(
    signature = (ab, bc, ca, rate, taus, statistic = "oadev"),
    text_signature = "(ab, bc, ca, rate, taus, /, statistic='oadev')"
)]
fn three_cornered_hat<'py>(
    py: Python<'py>, ab: &Bound<'py, PyAny>, bc: &Bound<'py, PyAny>, ca: &Bound<'py, PyAny>,
    rate: f64, taus: &Bound<'py, PyAny>, statistic: &str,
) -> PyResult<(Vec<f64>, Vec<f64>)> {
    let estimator: Estimator = match statistic {
        "adev" => deviations::allan::adev,
        "oadev" => deviations::allan::oadev,
        "mdev" => deviations::modified::mdev,
        "tdev" => deviations::modified::tdev,
        "hdev" => deviations::hadamard::hdev,
        "ohdev" => deviations::hadamard::ohdev,
        "totdev" => deviations::total::totdev,
        "mtie" => deviations::interval::mtie,
        "tierms" => deviations::interval::tierms,
        other => {
            return Err(PyValueError::new_err(format!("unknown statistic '{other}'")));
        }
    };

    let ab_arr = extract_f64_array(py, ab)?;
    let bc_arr = extract_f64_array(py, bc)?;
    let ca_arr = extract_f64_array(py, ca)?;
    let leg_err =
        || PyValueError::new_err("each leg must be a 1-D contiguous float64 array or sequence");
    let ab_slice = ab_arr.as_slice().map_err(|_| leg_err())?;
    let bc_slice = bc_arr.as_slice().map_err(|_| leg_err())?;
    let ca_slice = ca_arr.as_slice().map_err(|_| leg_err())?;

    let taus_arr = extract_f64_array(py, taus)?;
    let taus_slice = taus_arr.as_slice().map_err(|_| {
        PyValueError::new_err("taus must be a 1-D contiguous float64 array or sequence")
    })?;

    let (taus_out, devs_out) = deviations::three_cornered::three_cornered_hat(
        ab_slice, bc_slice, ca_slice, rate, taus_slice, estimator,
    )?;
    Ok((taus_out.to_vec(), devs_out.to_vec()))
}

/// _rust_stability — PyO3 module initializer for the Python extension.
///
/// Defines the `_rust_stability` Python module, registers the
/// `deviations` submodule, and inserts it into `sys.modules` so that
/// dotted imports (`rust_stability.deviations`) resolve. Invoked
/// automatically by Python when importing the compiled extension.
#[cfg(feature = "python-bindings")]
#[pymodule]
fn _rust_stability<'py>(_py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    let deviations_mod = PyModule::new(_py, "deviations")?;
    register_deviations(_py, m, &deviations_mod)?;

    // Manually add the submodule into sys.modules to allow dot notation.
    _py.import("sys")?
        .getattr("modules")?
        .set_item("rust_stability.deviations", deviations_mod)?;
    Ok(())
}

#[cfg(feature = "python-bindings")]
fn register_deviations<'py>(
    _py: Python, rust_stability: &Bound<'py, PyModule>, m: &Bound<'py, PyModule>,
) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(adev, m)?)?;
    m.add_function(wrap_pyfunction!(oadev, m)?)?;
    m.add_function(wrap_pyfunction!(mdev, m)?)?;
    m.add_function(wrap_pyfunction!(tdev, m)?)?;
    m.add_function(wrap_pyfunction!(hdev, m)?)?;
    m.add_function(wrap_pyfunction!(ohdev, m)?)?;
    m.add_function(wrap_pyfunction!(totdev, m)?)?;
    m.add_function(wrap_pyfunction!(mtie, m)?)?;
    m.add_function(wrap_pyfunction!(tierms, m)?)?;
    m.add_function(wrap_pyfunction!(three_cornered_hat, m)?)?;
    rust_stability.add_submodule(m)?;
    Ok(())
}
