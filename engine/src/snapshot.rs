//! Persisted roster snapshot.
//!
//! The caller owns storage; this module only converts between the snapshot
//! and JSON. Older snapshots without manual flags, stats or scenario fields
//! still load.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calendar::HolidayCalendar;
use crate::config::{GeneratorOptions, MonthConfig, ScenarioChoice, ThursdayScenario};
use crate::demand::{overview_stats, DemandStats};
use crate::models::Employee;
use crate::scheduler::{GenerationResult, RosterError, RosterScheduler};

pub const SNAPSHOT_VERSION: &str = "1";

/// Errors raised while reading or writing a snapshot.
#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("Malformed snapshot JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid snapshot config: {0}")]
    InvalidConfig(#[from] RosterError),
}

fn default_version() -> String {
    SNAPSHOT_VERSION.to_string()
}

/// Everything needed to restore the roster screen.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterSnapshot {
    #[serde(default = "default_version")]
    pub version: String,
    /// Milliseconds since the epoch, as stamped by the caller.
    #[serde(default)]
    pub timestamp: i64,
    pub config: MonthConfig,
    #[serde(default)]
    pub employees: Vec<Employee>,
    #[serde(default)]
    pub stats: Option<DemandStats>,
    #[serde(default)]
    pub active_scenario: ThursdayScenario,
    #[serde(default)]
    pub tuesday_reduction: bool,
}

impl RosterSnapshot {
    pub fn new(config: MonthConfig, employees: Vec<Employee>) -> Self {
        Self {
            version: default_version(),
            timestamp: 0,
            config,
            employees,
            stats: None,
            active_scenario: ThursdayScenario::A,
            tuesday_reduction: false,
        }
    }

    /// Parse and validate a snapshot.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let snapshot: RosterSnapshot = serde_json::from_str(json)?;
        RosterScheduler::new(
            snapshot.config.clone(),
            &snapshot.employees,
            GeneratorOptions::default(),
        )?;
        Ok(snapshot)
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Scenario last used for this month.
    pub fn scenario(&self) -> ScenarioChoice {
        ScenarioChoice::new(self.active_scenario, self.tuesday_reduction)
    }

    /// Store the outcome of a generation run.
    pub fn apply_result(&mut self, result: &GenerationResult) {
        self.employees = result.employees.clone();
        self.stats = Some(result.stats);
        self.active_scenario = result.scenario.thursday;
        self.tuesday_reduction = result.scenario.tuesday_reduction;
    }

    /// Recompute counters for the configured month and refresh the stats.
    pub fn refresh(&mut self, calendar: &dyn HolidayCalendar) {
        for employee in &mut self.employees {
            employee.recalculate_stats(self.config.year, self.config.month);
        }
        self.stats = Some(overview_stats(
            &self.config,
            &self.employees,
            self.scenario(),
            calendar,
        ));
    }
}
