#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyValueError, prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::deviations::{outcome::DeviationSet, phase::MeasurementSeries};

#[cfg(feature = "python-bindings")]
use numpy::{
    IntoPyArray,    // Vec → PyArray
    PyArrayMethods, // .readonly()
    PyReadonlyArray1,
};

#[cfg(feature = "python-bindings")]
#[inline]
pub fn extract_f64_array<'py>(
    py: Python<'py>, raw_data: &Bound<'py, PyAny>,
) -> PyResult<PyReadonlyArray1<'py, f64>> {
    if let Ok(arr_ro) = raw_data.extract::<PyReadonlyArray1<f64>>() {
        if arr_ro.as_slice().is_ok() {
            return Ok(arr_ro);
        }
    }

    if let Ok(obj) = raw_data.call_method("to_numpy", (false,), None) {
        if let Ok(series_ro) = obj.extract::<PyReadonlyArray1<f64>>() {
            if series_ro.as_slice().is_ok() {
                return Ok(series_ro);
            }
        }
    }

    let vec: Vec<f64> = raw_data.extract().map_err(|_| {
        pyo3::exceptions::PyTypeError::new_err(
            "expected a 1-D numpy.ndarray, pandas.Series, or sequence of float64",
        )
    })?;
    Ok(vec.into_pyarray(py).readonly())
}

/// Wrap a borrowed slice in the measurement domain named by `domain`.
///
/// Accepts `"phase"` (the default at the Python surface) or
/// `"frequency"`; anything else raises `ValueError`.
#[cfg(feature = "python-bindings")]
#[inline]
pub fn series_from_domain<'a>(domain: &str, data: &'a [f64]) -> PyResult<MeasurementSeries<'a>> {
    match domain {
        "phase" => Ok(MeasurementSeries::Phase(data)),
        "frequency" => Ok(MeasurementSeries::FractionalFrequency(data)),
        other => Err(PyValueError::new_err(format!(
            "domain must be 'phase' or 'frequency', got '{other}'"
        ))),
    }
}

/// Release a result set as the `(taus, devs, errs, ns)` list quadruple
/// handed back to Python callers.
#[cfg(feature = "python-bindings")]
#[inline]
pub fn release_set(set: DeviationSet) -> (Vec<f64>, Vec<f64>, Vec<f64>, Vec<usize>) {
    let (taus, devs, errs, ns) = set.into_tuple();
    (taus.to_vec(), devs.to_vec(), errs.to_vec(), ns.to_vec())
}
