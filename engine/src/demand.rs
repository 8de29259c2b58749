//! Daily headcount requirements and monthly demand figures.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::calendar::HolidayCalendar;
use crate::config::{MonthConfig, ScenarioChoice, TUESDAY_REDUCED_B, TUESDAY_REDUCED_C};
use crate::models::{Employee, Slot};
use crate::quota::{monthly_target, total_capacity};

/// Required headcount per slot on one date.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DayRequirement {
    pub a: u32,
    pub b: u32,
    pub c: u32,
}

impl DayRequirement {
    pub const NONE: DayRequirement = DayRequirement { a: 0, b: 0, c: 0 };

    pub fn new(a: u32, b: u32, c: u32) -> Self {
        Self { a, b, c }
    }

    pub fn total(&self) -> u32 {
        self.a + self.b + self.c
    }

    pub fn for_slot(&self, slot: Slot) -> u32 {
        match slot {
            Slot::A => self.a,
            Slot::B => self.b,
            Slot::C => self.c,
        }
    }
}

/// Headcounts required on `date` under the given scenario.
///
/// Exempt dates and Sundays need nobody, Saturdays staff slot A only,
/// Thursdays follow the scenario template, every other weekday uses the
/// standard requirements (with B/C lowered on Tuesdays when reduced).
pub fn daily_requirement(
    date: NaiveDate,
    config: &MonthConfig,
    choice: ScenarioChoice,
) -> DayRequirement {
    if config.is_full_exemption(date) {
        return DayRequirement::NONE;
    }

    match date.weekday() {
        Weekday::Sun => DayRequirement::NONE,
        Weekday::Sat => DayRequirement::new(config.saturday_a, 0, 0),
        Weekday::Thu => {
            let (a, b) = choice.thursday.requirement();
            DayRequirement::new(a, b, 0)
        }
        Weekday::Tue if choice.tuesday_reduction => {
            DayRequirement::new(config.standard.a, TUESDAY_REDUCED_B, TUESDAY_REDUCED_C)
        }
        _ => DayRequirement::new(config.standard.a, config.standard.b, config.standard.c),
    }
}

/// Total duty points the month requires under a scenario.
pub fn monthly_demand(config: &MonthConfig, choice: ScenarioChoice) -> i32 {
    config
        .dates()
        .into_iter()
        .map(|date| daily_requirement(date, config, choice).total() as i32)
        .sum()
}

/// Aggregate demand against capacity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DemandStats {
    pub total_demand: i32,
    pub total_capacity: i32,
    /// capacity − demand; negative when understaffed
    pub surplus: i32,
    /// Special-leave days the surplus could absorb (two points each).
    pub suggested_special_leaves: i32,
}

impl DemandStats {
    pub fn new(total_demand: i32, total_capacity: i32) -> Self {
        let surplus = total_capacity - total_demand;
        Self {
            total_demand,
            total_capacity,
            surplus,
            suggested_special_leaves: surplus.div_euclid(2).max(0),
        }
    }
}

/// Demand/capacity figures for the current roster, outside a generation run.
///
/// Employee counters must be current for the month (see
/// [`Employee::recalculate_stats`]).
pub fn overview_stats(
    config: &MonthConfig,
    employees: &[Employee],
    choice: ScenarioChoice,
    calendar: &dyn HolidayCalendar,
) -> DemandStats {
    let target = monthly_target(config, calendar);
    DemandStats::new(
        monthly_demand(config, choice),
        total_capacity(employees, target),
    )
}
