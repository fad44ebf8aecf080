use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::wrap_pyfunction;

use serde::Serialize;
use serde_json as json;

use crate::models::{RawSample, SlashDateOrder};

fn to_py_err<E: std::fmt::Display>(e: E) -> PyErr {
    PyValueError::new_err(e.to_string())
}

fn parse_order(order: Option<&str>) -> PyResult<SlashDateOrder> {
    match order.unwrap_or("auto") {
        "auto" => Ok(SlashDateOrder::Auto),
        "mdy" | "month_first" => Ok(SlashDateOrder::MonthFirst),
        "dmy" | "day_first" => Ok(SlashDateOrder::DayFirst),
        other => Err(PyValueError::new_err(format!("unknown date order: {other}"))),
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CsvImportOut {
    samples: Vec<crate::Sample>,
    skipped_count: usize,
    ambiguous_count: usize,
}

/// summarize_json(samples_json, profile_json=None) -> str
#[pyfunction]
#[pyo3(name = "summarize_json")]
fn py_summarize_json(samples_json: &str, profile_json: Option<&str>) -> PyResult<String> {
    crate::summary::summarize_json(samples_json, profile_json).map_err(to_py_err)
}

/// bmi(weight_kg, height_cm) -> (bmi, label) | None
#[pyfunction]
#[pyo3(name = "bmi")]
fn py_bmi(weight_kg: Option<f64>, height_cm: Option<f64>) -> Option<(f64, String)> {
    let b = crate::bmi::bmi(weight_kg, height_cm)?;
    let cat = crate::bmi::category(Some(b))?;
    Some((b, cat.label))
}

/// csv_to_json(text, date_order="auto") -> str
#[pyfunction]
fn csv_to_json(text: &str, date_order: Option<&str>) -> PyResult<String> {
    let import = crate::csv_io::from_csv_with(text, parse_order(date_order)?);
    let out = CsvImportOut {
        samples: import.samples.into_inner(),
        skipped_count: import.skipped_count,
        ambiguous_count: import.ambiguous_count,
    };
    json::to_string(&out).map_err(to_py_err)
}

/// samples_to_csv(samples_json) -> str
#[pyfunction]
fn samples_to_csv(samples_json: &str) -> PyResult<String> {
    let mut de = json::Deserializer::from_str(samples_json);
    let raw: Vec<RawSample> = serde_path_to_error::deserialize(&mut de)
        .map_err(|e| PyValueError::new_err(format!("samples at {}: {}", e.path(), e)))?;
    let normalized = crate::normalize::normalize(raw);
    crate::csv_io::to_csv(&normalized.series).map_err(to_py_err)
}

#[pymodule]
fn weightlog_core(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(py_summarize_json, m)?)?;
    m.add_function(wrap_pyfunction!(py_bmi, m)?)?;
    m.add_function(wrap_pyfunction!(csv_to_json, m)?)?;
    m.add_function(wrap_pyfunction!(samples_to_csv, m)?)?;
    Ok(())
}
