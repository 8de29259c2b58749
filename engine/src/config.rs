//! Configuration types for roster generation.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::calendar::{first_of_month, month_dates};

/// Required headcounts for the three slots on a standard weekday.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandardRequirements {
    pub a: u32,
    pub b: u32,
    pub c: u32,
}

impl StandardRequirements {
    pub fn total(&self) -> u32 {
        self.a + self.b + self.c
    }
}

impl Default for StandardRequirements {
    fn default() -> Self {
        Self { a: 5, b: 5, c: 5 }
    }
}

/// Thursday demand template.
///
/// Thursdays staff slots A and B only, with fixed headcounts per scenario.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ThursdayScenario {
    /// A=5, B=5
    #[default]
    A,
    /// A=5, B=4
    B,
    /// A=4, B=4
    C,
}

impl ThursdayScenario {
    /// Cheapest last.
    pub const LADDER: [ThursdayScenario; 3] =
        [ThursdayScenario::A, ThursdayScenario::B, ThursdayScenario::C];

    /// Required (A, B) headcounts.
    pub fn requirement(self) -> (u32, u32) {
        match self {
            ThursdayScenario::A => (5, 5),
            ThursdayScenario::B => (5, 4),
            ThursdayScenario::C => (4, 4),
        }
    }

    /// Duty points one Thursday costs.
    pub fn cost(self) -> i32 {
        let (a, b) = self.requirement();
        (a + b) as i32
    }

    /// Points saved per Thursday relative to scenario A.
    pub fn savings_per_thursday(self) -> i32 {
        ThursdayScenario::A.cost() - self.cost()
    }
}

/// How the Thursday scenario is chosen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ThursdayMode {
    /// Pick through the demand ladder.
    #[default]
    Auto,
    Fixed(ThursdayScenario),
}

/// Reduced Tuesday B/C headcount used when the Thursday ladder is exhausted.
pub const TUESDAY_REDUCED_B: u32 = 4;
pub const TUESDAY_REDUCED_C: u32 = 4;

/// The requirement model chosen for one generation run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioChoice {
    pub thursday: ThursdayScenario,
    pub tuesday_reduction: bool,
}

impl ScenarioChoice {
    pub fn new(thursday: ThursdayScenario, tuesday_reduction: bool) -> Self {
        Self {
            thursday,
            tuesday_reduction,
        }
    }
}

/// Whether Jan 1 is closed or staffed with a lowered quota.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Jan1Policy {
    #[default]
    Exempt,
    Workday,
}

/// Inclusive date range that is closed outright.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExemptionRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl ExemptionRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    #[inline]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

/// Everything the generator needs to know about the target month.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthConfig {
    pub year: i32,
    /// 1-based
    pub month: u32,
    /// Roster order; generation only covers these employees.
    pub staff_ids: Vec<String>,
    #[serde(default)]
    pub standard: StandardRequirements,
    #[serde(default = "default_saturday_a")]
    pub saturday_a: u32,
    #[serde(default)]
    pub thursday_mode: ThursdayMode,
    #[serde(default)]
    pub exemption: Option<ExemptionRange>,
    #[serde(default)]
    pub jan1_policy: Jan1Policy,
}

fn default_saturday_a() -> u32 {
    5
}

impl MonthConfig {
    pub fn new(year: i32, month: u32, staff_ids: Vec<String>) -> Self {
        Self {
            year,
            month,
            staff_ids,
            standard: StandardRequirements::default(),
            saturday_a: default_saturday_a(),
            thursday_mode: ThursdayMode::Auto,
            exemption: None,
            jan1_policy: Jan1Policy::Exempt,
        }
    }

    pub fn first_day(&self) -> Option<NaiveDate> {
        first_of_month(self.year, self.month)
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        month_dates(self.year, self.month)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// Closed outright: Jan 1 when exempt, or inside the exemption range.
    pub fn is_full_exemption(&self, date: NaiveDate) -> bool {
        if date.month() == 1 && date.day() == 1 && self.jan1_policy == Jan1Policy::Exempt {
            return true;
        }
        self.exemption.is_some_and(|range| range.contains(date))
    }

    /// Days the generator staffs: not Sunday, not fully exempt.
    pub fn is_working_day(&self, date: NaiveDate) -> bool {
        date.weekday() != Weekday::Sun && !self.is_full_exemption(date)
    }
}

/// Options controlling one generation run.
#[derive(Clone, Debug, Default)]
pub struct GeneratorOptions {
    /// 0=silent, 1=changes, 2=checks, 3=debug
    pub verbosity: u8,
    /// Seed for candidate tie-breaking; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl GeneratorOptions {
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_thursday_scenarios() {
        assert_eq!(ThursdayScenario::A.cost(), 10);
        assert_eq!(ThursdayScenario::B.cost(), 9);
        assert_eq!(ThursdayScenario::C.cost(), 8);
        assert_eq!(ThursdayScenario::B.savings_per_thursday(), 1);
        assert_eq!(ThursdayScenario::C.savings_per_thursday(), 2);
    }

    #[test]
    fn test_jan1_policy() {
        let mut config = MonthConfig::new(2025, 1, vec![]);
        assert!(config.is_full_exemption(d(2025, 1, 1)));
        assert!(!config.is_working_day(d(2025, 1, 1)));

        config.jan1_policy = Jan1Policy::Workday;
        assert!(!config.is_full_exemption(d(2025, 1, 1)));
        assert!(config.is_working_day(d(2025, 1, 1)));
    }

    #[test]
    fn test_exemption_range_inclusive() {
        let mut config = MonthConfig::new(2026, 2, vec![]);
        config.exemption = Some(ExemptionRange::new(d(2026, 2, 14), d(2026, 2, 22)));
        assert!(!config.is_full_exemption(d(2026, 2, 13)));
        assert!(config.is_full_exemption(d(2026, 2, 14)));
        assert!(config.is_full_exemption(d(2026, 2, 22)));
        assert!(!config.is_full_exemption(d(2026, 2, 23)));
    }

    #[test]
    fn test_sunday_not_working() {
        let config = MonthConfig::new(2027, 11, vec![]);
        assert!(!config.is_working_day(d(2027, 11, 7)));
        assert!(config.is_working_day(d(2027, 11, 6)));
        assert_eq!(config.dates().len(), 30);
    }

    #[test]
    fn test_config_defaults_from_json() {
        let config: MonthConfig =
            serde_json::from_str(r#"{"year":2025,"month":3,"staffIds":["1","2"]}"#).unwrap();
        assert_eq!(config.standard, StandardRequirements::default());
        assert_eq!(config.saturday_a, 5);
        assert_eq!(config.thursday_mode, ThursdayMode::Auto);
        assert_eq!(config.jan1_policy, Jan1Policy::Exempt);

        let fixed: ThursdayMode = serde_json::from_str(r#"{"Fixed":"B"}"#).unwrap();
        assert_eq!(fixed, ThursdayMode::Fixed(ThursdayScenario::B));
    }
}
