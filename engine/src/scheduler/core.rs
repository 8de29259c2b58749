//! Core roster generator.

use chrono::NaiveDate;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rustc_hash::{FxHashMap, FxHashSet};
use thiserror::Error;

use crate::adjacency::{adjacency_block, is_critical_day};
use crate::calendar::{HolidayCalendar, StandardCalendar};
use crate::config::{GeneratorOptions, MonthConfig, ScenarioChoice};
use crate::demand::{monthly_demand, DemandStats};
use crate::ladder::select_scenario;
use crate::models::{DutyCombo, Employee};
use crate::priority::{prioritize_days, DayPriority};
use crate::quota::monthly_target;
use crate::ranking::{rank_candidates, trim_saturated_batch, Candidate};
use crate::solver::{plan_day, standard_decompositions, DayPlan};
use crate::validation::{validate_month, CoverageWarning};
use crate::{log_changes, log_checks, log_debug};

use super::state::RosterState;

/// Errors that can occur while setting up a generation run.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RosterError {
    #[error("Invalid month: {0} (expected 1-12)")]
    InvalidMonth(u32),
    #[error("Invalid exemption range: {start} is after {end}")]
    InvalidExemptionRange { start: NaiveDate, end: NaiveDate },
    #[error("Duplicate staff id: {0}")]
    DuplicateStaffId(String),
    #[error("Negative quota override for {id}: {quota}")]
    NegativeQuotaOverride { id: String, quota: i32 },
}

/// Output of one generation run.
#[derive(Clone, Debug, PartialEq)]
pub struct GenerationResult {
    /// Roster in `staff_ids` order with the month filled in.
    pub employees: Vec<Employee>,
    /// Every slot mismatch left after generation.
    pub warnings: Vec<CoverageWarning>,
    pub stats: DemandStats,
    pub scenario: ScenarioChoice,
    pub monthly_target: i32,
}

impl GenerationResult {
    /// Warnings rendered for display.
    pub fn warning_messages(&self) -> Vec<String> {
        self.warnings.iter().map(ToString::to_string).collect()
    }
}

/// Build the working roster from `staff_ids`, in order.
///
/// Existing employees are copied; unknown ids get a placeholder record.
pub fn assemble_roster(staff_ids: &[String], employees: &[Employee]) -> Vec<Employee> {
    let by_id: FxHashMap<&str, &Employee> =
        employees.iter().map(|e| (e.id.as_str(), e)).collect();

    staff_ids
        .iter()
        .map(|id| match by_id.get(id.as_str()) {
            Some(existing) => (*existing).clone(),
            None => Employee::new(id.clone(), format!("Staff {}", id)),
        })
        .collect()
}

/// Monthly duty roster generator.
///
/// Stages: strip generated cells, select the demand scenario, order days by
/// slack, solve each day, then recompute counters and validate.
pub struct RosterScheduler {
    config: MonthConfig,
    employees: Vec<Employee>,
    options: GeneratorOptions,
    calendar: Box<dyn HolidayCalendar>,
}

impl RosterScheduler {
    /// Create a new generator for one month.
    ///
    /// # Arguments
    /// * `config` - Target month and staffing requirements
    /// * `employees` - Current employee snapshot, across all months
    /// * `options` - Verbosity and RNG seed
    pub fn new(
        config: MonthConfig,
        employees: &[Employee],
        options: GeneratorOptions,
    ) -> Result<Self, RosterError> {
        if !(1..=12).contains(&config.month) {
            return Err(RosterError::InvalidMonth(config.month));
        }

        if let Some(range) = config.exemption {
            if range.end < range.start {
                return Err(RosterError::InvalidExemptionRange {
                    start: range.start,
                    end: range.end,
                });
            }
        }

        let mut seen: FxHashSet<&str> = FxHashSet::default();
        for id in &config.staff_ids {
            if !seen.insert(id.as_str()) {
                return Err(RosterError::DuplicateStaffId(id.clone()));
            }
        }

        let employees = assemble_roster(&config.staff_ids, employees);
        if let Some(e) = employees
            .iter()
            .find(|e| e.quota_override.is_some_and(|q| q < 0))
        {
            return Err(RosterError::NegativeQuotaOverride {
                id: e.id.clone(),
                quota: e.quota_override.unwrap_or_default(),
            });
        }

        Ok(Self {
            config,
            employees,
            options,
            calendar: Box::new(StandardCalendar),
        })
    }

    /// Replace the holiday calendar used for the quota.
    pub fn with_calendar(mut self, calendar: impl HolidayCalendar + 'static) -> Self {
        self.calendar = Box::new(calendar);
        self
    }

    /// Run generation with an RNG seeded from the options (or the OS).
    pub fn generate(self) -> GenerationResult {
        let mut rng = match self.options.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };
        self.generate_with_rng(&mut rng)
    }

    /// Run generation drawing tie-breaks from `rng`.
    pub fn generate_with_rng<R: Rng + ?Sized>(self, rng: &mut R) -> GenerationResult {
        let verbosity = self.options.verbosity;
        let target = monthly_target(&self.config, self.calendar.as_ref());
        let mut state = RosterState::new(
            self.employees,
            self.config.year,
            self.config.month,
            target,
        );

        // Initialize
        let removed = state.strip_generated();
        log_checks!(
            verbosity,
            "{}-{:02}: cleared {} generated cells, monthly target {}",
            self.config.year,
            self.config.month,
            removed,
            target
        );

        // SelectScenario
        let outcome = select_scenario(&self.config, state.capacity());
        let choice = outcome.choice;
        log_changes!(
            verbosity,
            "Scenario: Thursday {:?} (tuesday reduction: {}), baseline {} vs capacity {}",
            choice.thursday,
            choice.tuesday_reduction,
            outcome.baseline_demand,
            outcome.capacity
        );

        // PrioritizeDays
        let queue = prioritize_days(&self.config, choice, state.employees());
        for day in &queue {
            log_debug!(
                verbosity,
                "  queue: {} score={} free={}",
                day.date,
                day.score,
                day.free_staff
            );
        }

        // SolveDay
        for day in &queue {
            solve_day(&mut state, day, choice, rng, verbosity);
        }

        // Finalize
        state.recompute();
        let warnings = validate_month(state.employees(), &self.config, choice);
        let stats = DemandStats::new(monthly_demand(&self.config, choice), state.capacity());
        log_changes!(
            verbosity,
            "Done: demand {} capacity {} surplus {}, {} warnings",
            stats.total_demand,
            stats.total_capacity,
            stats.surplus,
            warnings.len()
        );

        GenerationResult {
            monthly_target: state.monthly_target(),
            employees: state.into_employees(),
            warnings,
            stats,
            scenario: choice,
        }
    }
}

/// Validate, generate with a seeded or OS RNG and return the result.
pub fn generate_roster(
    config: MonthConfig,
    employees: &[Employee],
    options: GeneratorOptions,
) -> Result<GenerationResult, RosterError> {
    Ok(RosterScheduler::new(config, employees, options)?.generate())
}

/// Staff one day, most expensive combination first.
fn solve_day<R: Rng + ?Sized>(
    state: &mut RosterState,
    day: &DayPriority,
    choice: ScenarioChoice,
    rng: &mut R,
    verbosity: u8,
) {
    let date = day.date;
    let mut pool = state.free_pool(date);
    let critical = is_critical_day(pool.len());
    log_checks!(
        verbosity,
        "{} {}: pool {}{}",
        date,
        date.format("%a"),
        pool.len(),
        if critical { " (critical)" } else { "" }
    );

    match plan_day(date, pool.len() as u32, day.requirement, choice) {
        DayPlan::Saturday { single_a } => {
            assign_batch(state, &mut pool, date, DutyCombo::SingleA, single_a, false, rng, verbosity);
        }
        DayPlan::Thursday(plan) => {
            assign_batch(state, &mut pool, date, DutyCombo::DoubleAB, plan.double_ab, false, rng, verbosity);
            assign_batch(state, &mut pool, date, DutyCombo::SingleA, plan.single_a, false, rng, verbosity);
        }
        DayPlan::Standard(solution) => {
            for option in standard_decompositions(pool.len() as u32, day.requirement) {
                log_debug!(
                    verbosity,
                    "    option: {} triple + {} BC + {} A = {} staff",
                    option.triple,
                    option.double_bc,
                    option.single_a,
                    option.staff_needed()
                );
            }
            assign_batch(state, &mut pool, date, DutyCombo::Triple, solution.triple, critical, rng, verbosity);
            assign_batch(state, &mut pool, date, DutyCombo::DoubleBC, solution.double_bc, critical, rng, verbosity);
            assign_batch(state, &mut pool, date, DutyCombo::SingleA, solution.single_a, critical, rng, verbosity);
        }
        DayPlan::Unsolvable => {
            log_changes!(
                verbosity,
                "{}: no decomposition fits {} staff, left unstaffed",
                date,
                pool.len()
            );
        }
    }
}

/// Rank, trim and assign one combination, removing the assignees from `pool`.
///
/// `critical` is only meaningful for standard days: it waives the adjacency
/// guard on triples and the saturated-batch trim.
#[allow(clippy::too_many_arguments)]
fn assign_batch<R: Rng + ?Sized>(
    state: &mut RosterState,
    pool: &mut Vec<usize>,
    date: NaiveDate,
    combo: DutyCombo,
    count: u32,
    critical: bool,
    rng: &mut R,
    verbosity: u8,
) {
    if count == 0 {
        return;
    }

    let eligible: Vec<Candidate> = pool
        .iter()
        .filter(|&&index| {
            if combo != DutyCombo::Triple || critical {
                return true;
            }
            match adjacency_block(&state.employees()[index], date) {
                Some(block) => {
                    log_checks!(
                        verbosity,
                        "    {} excluded from triple ({:?})",
                        state.employees()[index].name,
                        block
                    );
                    false
                }
                None => true,
            }
        })
        .map(|&index| state.candidate(index))
        .collect();

    let requested = count as usize;
    let mut picks = rank_candidates(&eligible, requested, combo.cost(), rng);

    if matches!(combo, DutyCombo::Triple | DutyCombo::DoubleBC) {
        if let Some(dropped) = trim_saturated_batch(&mut picks, requested, critical) {
            log_checks!(
                verbosity,
                "    dropped {} from {} batch (deficit {})",
                state.employees()[dropped.index].name,
                combo,
                dropped.deficit
            );
        }
    }

    if picks.len() < requested {
        log_changes!(
            verbosity,
            "{}: {} short by {}",
            date,
            combo,
            requested - picks.len()
        );
    }

    let taken: FxHashSet<usize> = picks.iter().map(|c| c.index).collect();
    for pick in &picks {
        if state.assign(pick.index, date, combo) {
            log_changes!(
                verbosity,
                "{}: {} -> {}",
                date,
                combo,
                state.employees()[pick.index].name
            );
        }
    }
    pool.retain(|index| !taken.contains(index));
}
