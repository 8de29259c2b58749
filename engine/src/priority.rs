//! Day ordering: solve the tightest days first.
//!
//! score = free_employees × 100 − required_total
//!
//! Lower score = less slack = solved earlier. Sundays and fully exempt
//! dates are not schedulable and never enter the queue.

use chrono::NaiveDate;
use std::cmp::Ordering;

use crate::config::{MonthConfig, ScenarioChoice};
use crate::demand::{daily_requirement, DayRequirement};
use crate::models::Employee;

/// Weight of one free employee relative to one required headcount.
pub const FREE_STAFF_WEIGHT: i64 = 100;

/// A schedulable day with its slack score.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DayPriority {
    pub date: NaiveDate,
    pub score: i64,
    pub free_staff: usize,
    pub requirement: DayRequirement,
}

impl Ord for DayPriority {
    /// Score first, calendar order breaks ties.
    fn cmp(&self, other: &Self) -> Ordering {
        self.score
            .cmp(&other.score)
            .then(self.date.cmp(&other.date))
    }
}

impl PartialOrd for DayPriority {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Employees with no cell on `date`.
pub fn free_staff_count(employees: &[Employee], date: NaiveDate) -> usize {
    employees.iter().filter(|e| e.is_free(date)).count()
}

/// Compute the slack score of one date, `None` if the date is not schedulable.
pub fn day_priority(
    date: NaiveDate,
    config: &MonthConfig,
    choice: ScenarioChoice,
    employees: &[Employee],
) -> Option<DayPriority> {
    if !config.is_working_day(date) {
        return None;
    }

    let free_staff = free_staff_count(employees, date);
    let requirement = daily_requirement(date, config, choice);
    let score = free_staff as i64 * FREE_STAFF_WEIGHT - requirement.total() as i64;

    Some(DayPriority {
        date,
        score,
        free_staff,
        requirement,
    })
}

/// Every schedulable day of the month, most constrained first.
pub fn prioritize_days(
    config: &MonthConfig,
    choice: ScenarioChoice,
    employees: &[Employee],
) -> Vec<DayPriority> {
    let mut queue: Vec<DayPriority> = config
        .dates()
        .into_iter()
        .filter_map(|date| day_priority(date, config, choice, employees))
        .collect();
    queue.sort();
    queue
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Cell, DutyCombo, LeaveSymbol};

    fn d(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn staff(n: usize) -> Vec<Employee> {
        (1..=n)
            .map(|i| Employee::new(i.to_string(), format!("Staff {}", i)))
            .collect()
    }

    #[test]
    fn test_sundays_and_exemptions_excluded() {
        let config = MonthConfig::new(2027, 11, vec![]);
        let queue = prioritize_days(&config, ScenarioChoice::default(), &staff(8));
        // 30 days minus 4 Sundays
        assert_eq!(queue.len(), 26);
        assert!(queue.iter().all(|p| p.date != d(2027, 11, 7)));
    }

    #[test]
    fn test_heavier_days_first_when_staff_equal() {
        let config = MonthConfig::new(2027, 11, vec![]);
        let queue = prioritize_days(&config, ScenarioChoice::default(), &staff(8));
        // 800 - 15 for standard days, then Thursdays (800 - 10), then Saturdays (800 - 5)
        assert_eq!(queue[0].score, 785);
        assert_eq!(queue[0].date, d(2027, 11, 1));
        assert_eq!(queue.last().map(|p| p.score), Some(795));
        assert!(queue.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_unavailable_staff_raise_priority() {
        let config = MonthConfig::new(2027, 11, vec![]);
        let mut employees = staff(8);
        employees[0] = employees[0]
            .clone()
            .with_manual_cell(d(2027, 11, 20), Cell::Leave(LeaveSymbol::Off));
        employees[1] = employees[1]
            .clone()
            .with_manual_cell(d(2027, 11, 20), DutyCombo::SingleA.cell());

        let queue = prioritize_days(&config, ScenarioChoice::default(), &employees);
        // Saturday 20 has 6 free staff: 600 - 5
        assert_eq!(queue[0].date, d(2027, 11, 20));
        assert_eq!(queue[0].free_staff, 6);
        assert_eq!(queue[0].score, 595);
    }
}
