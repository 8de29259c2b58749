//! Scenario ladder: pick the cheapest Thursday/Tuesday template needed to
//! close a capacity shortfall.
//!
//! This is a threshold ladder, not a search. Thursdays step A → B → C as a
//! whole; mixed Thursdays are never considered. If scenario C still leaves a
//! gap, the Tuesday reduction is switched on as well.

use chrono::{Datelike, Weekday};

use crate::config::{MonthConfig, ScenarioChoice, ThursdayMode, ThursdayScenario};
use crate::demand::monthly_demand;

/// How the ladder arrived at its choice.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LadderOutcome {
    pub choice: ScenarioChoice,
    /// Demand under scenario A without Tuesday reduction.
    pub baseline_demand: i32,
    pub capacity: i32,
    /// Staffed Thursdays in the month.
    pub thursdays: i32,
}

impl LadderOutcome {
    /// Points by which baseline demand exceeds capacity (0 if none).
    pub fn gap(&self) -> i32 {
        (self.baseline_demand - self.capacity).max(0)
    }
}

/// Thursdays the generator actually staffs this month.
pub fn staffed_thursdays(config: &MonthConfig) -> i32 {
    config
        .dates()
        .into_iter()
        .filter(|date| date.weekday() == Weekday::Thu && config.is_working_day(*date))
        .count() as i32
}

/// Run the ladder against the given capacity.
///
/// A fixed Thursday mode is used verbatim without Tuesday reduction.
pub fn select_scenario(config: &MonthConfig, capacity: i32) -> LadderOutcome {
    let baseline_demand = monthly_demand(config, ScenarioChoice::default());
    let thursdays = staffed_thursdays(config);

    let choice = match config.thursday_mode {
        ThursdayMode::Fixed(scenario) => ScenarioChoice::new(scenario, false),
        ThursdayMode::Auto => climb(baseline_demand - capacity, thursdays),
    };

    LadderOutcome {
        choice,
        baseline_demand,
        capacity,
        thursdays,
    }
}

fn climb(gap: i32, thursdays: i32) -> ScenarioChoice {
    if gap <= 0 {
        return ScenarioChoice::default();
    }

    ThursdayScenario::LADDER
        .iter()
        .skip(1)
        .find(|scenario| gap <= scenario.savings_per_thursday() * thursdays)
        .map(|scenario| ScenarioChoice::new(*scenario, false))
        .unwrap_or(ScenarioChoice::new(ThursdayScenario::C, true))
}
