//! Python bindings.
//!
//! Rosters cross the boundary as JSON strings in the snapshot format, so the
//! Python side never needs to mirror the Rust types.

// Allow clippy warning triggered by PyO3 macro expansion
#![allow(clippy::useless_conversion)]

use chrono::NaiveDate;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use serde::Serialize;

use crate::calendar::{special_holidays_in_month, StandardCalendar};
use crate::config::{GeneratorOptions, Jan1Policy, MonthConfig, ScenarioChoice};
use crate::demand::DemandStats;
use crate::models::Employee;
use crate::scheduler::RosterScheduler;
use crate::snapshot::RosterSnapshot;
use crate::validation::validate_month;

fn value_error(e: impl ToString) -> PyErr {
    PyValueError::new_err(e.to_string())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    employees: Vec<Employee>,
    warnings: Vec<String>,
    stats: DemandStats,
    scenario: ScenarioChoice,
    monthly_target: i32,
}

/// Generate the roster for the snapshot's month.
///
/// # Arguments
/// * `snapshot_json` - Snapshot with the target config and current employees
/// * `seed` - Optional RNG seed for reproducible tie-breaking
/// * `verbosity` - 0=silent, 1=changes, 2=checks, 3=debug (stderr)
///
/// # Returns
/// * JSON with employees, warnings, stats, scenario and monthlyTarget
///
/// # Raises
/// * ValueError if the snapshot is malformed or the config is invalid
#[pyfunction]
#[pyo3(signature = (snapshot_json, seed=None, verbosity=0))]
fn generate(snapshot_json: &str, seed: Option<u64>, verbosity: u8) -> PyResult<String> {
    let snapshot = RosterSnapshot::from_json(snapshot_json).map_err(value_error)?;
    let options = GeneratorOptions { verbosity, seed };

    let result = RosterScheduler::new(snapshot.config, &snapshot.employees, options)
        .map_err(value_error)?
        .generate();

    let response = GenerateResponse {
        warnings: result.warning_messages(),
        employees: result.employees,
        stats: result.stats,
        scenario: result.scenario,
        monthly_target: result.monthly_target,
    };
    serde_json::to_string(&response).map_err(value_error)
}

/// Coverage warnings for the snapshot under its stored scenario.
#[pyfunction]
fn validate(snapshot_json: &str) -> PyResult<Vec<String>> {
    let snapshot = RosterSnapshot::from_json(snapshot_json).map_err(value_error)?;
    Ok(
        validate_month(&snapshot.employees, &snapshot.config, snapshot.scenario())
            .iter()
            .map(ToString::to_string)
            .collect(),
    )
}

/// Recompute counters and demand/capacity figures; returns the refreshed snapshot.
#[pyfunction]
fn overview_stats(snapshot_json: &str) -> PyResult<String> {
    let mut snapshot = RosterSnapshot::from_json(snapshot_json).map_err(value_error)?;
    snapshot.refresh(&StandardCalendar);
    snapshot.to_json().map_err(value_error)
}

/// Monthly duty-point target for a config.
#[pyfunction]
fn monthly_target(config_json: &str) -> PyResult<i32> {
    let config: MonthConfig = serde_json::from_str(config_json).map_err(value_error)?;
    Ok(crate::quota::monthly_target(&config, &StandardCalendar))
}

/// Named holidays of a month as (date, name, closed).
#[pyfunction]
#[pyo3(signature = (year, month, jan1_workday=false))]
fn special_holidays(year: i32, month: u32, jan1_workday: bool) -> Vec<(NaiveDate, String, bool)> {
    let jan1 = if jan1_workday {
        Jan1Policy::Workday
    } else {
        Jan1Policy::Exempt
    };
    special_holidays_in_month(&StandardCalendar, year, month, jan1)
        .into_iter()
        .map(|h| (h.date, h.name, h.closed))
        .collect()
}

/// The roster_engine Python module.
#[pymodule]
fn roster_engine(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(generate, m)?)?;
    m.add_function(wrap_pyfunction!(validate, m)?)?;
    m.add_function(wrap_pyfunction!(overview_stats, m)?)?;
    m.add_function(wrap_pyfunction!(monthly_target, m)?)?;
    m.add_function(wrap_pyfunction!(special_holidays, m)?)?;
    Ok(())
}
