//! Working state for one generation run.

use chrono::{Datelike, NaiveDate};

use crate::models::{DutyCombo, Employee};
use crate::quota::total_capacity;
use crate::ranking::Candidate;

/// The roster being generated, scoped to one month.
///
/// Owns its own copy of the employees; nothing outside the target month is
/// ever modified through it.
#[derive(Clone, Debug)]
pub struct RosterState {
    employees: Vec<Employee>,
    year: i32,
    month: u32,
    /// Month target shared by every employee without an override.
    monthly_target: i32,
}

impl RosterState {
    pub fn new(employees: Vec<Employee>, year: i32, month: u32, monthly_target: i32) -> Self {
        Self {
            employees,
            year,
            month,
            monthly_target,
        }
    }

    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    pub fn into_employees(self) -> Vec<Employee> {
        self.employees
    }

    pub fn monthly_target(&self) -> i32 {
        self.monthly_target
    }

    /// Drop every non-manual cell of the month and recompute counters.
    ///
    /// Returns the number of cells removed.
    pub fn strip_generated(&mut self) -> usize {
        let (year, month) = (self.year, self.month);
        let mut removed = 0;

        for employee in &mut self.employees {
            let before = employee.cells.len();
            let manual = &employee.manual;
            employee.cells.retain(|date, _| {
                date.year() != year || date.month() != month || manual.contains(date)
            });
            removed += before - employee.cells.len();
        }

        self.recompute();
        removed
    }

    /// Recompute every employee's counters from cell content.
    pub fn recompute(&mut self) {
        for employee in &mut self.employees {
            employee.recalculate_stats(self.year, self.month);
        }
    }

    /// Sum of clamped effective targets.
    pub fn capacity(&self) -> i32 {
        total_capacity(&self.employees, self.monthly_target)
    }

    /// Effective target minus duty points assigned so far.
    pub fn deficit(&self, index: usize) -> i32 {
        let employee = &self.employees[index];
        employee.effective_target(self.monthly_target) - employee.assigned_duty_count
    }

    pub fn candidate(&self, index: usize) -> Candidate {
        Candidate::new(index, self.deficit(index))
    }

    /// Indices of employees with nothing recorded on `date`.
    pub fn free_pool(&self, date: NaiveDate) -> Vec<usize> {
        self.employees
            .iter()
            .enumerate()
            .filter(|(_, e)| e.is_free(date))
            .map(|(i, _)| i)
            .collect()
    }

    /// Record a generated duty and charge its cost.
    ///
    /// Manual cells are never overwritten; returns false in that case.
    pub fn assign(&mut self, index: usize, date: NaiveDate, combo: DutyCombo) -> bool {
        let employee = &mut self.employees[index];
        if employee.is_manual(date) {
            return false;
        }
        employee.cells.insert(date, combo.cell());
        employee.assigned_duty_count += combo.cost();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Cell, LeaveSymbol};

    fn d(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn state() -> RosterState {
        let mut ann = Employee::new("1", "Ann")
            .with_manual_cell(d(2027, 11, 2), Cell::Leave(LeaveSymbol::Wedding));
        ann.cells.insert(d(2027, 11, 3), DutyCombo::Triple.cell());
        ann.cells.insert(d(2027, 11, 4), Cell::Leave(LeaveSymbol::Funeral));
        ann.cells.insert(d(2027, 12, 1), DutyCombo::Triple.cell());
        let bob = Employee::new("2", "Bob").with_quota_override(10);
        RosterState::new(vec![ann, bob], 2027, 11, 44)
    }

    #[test]
    fn test_strip_keeps_manual_and_other_months() {
        let mut state = state();
        assert_eq!(state.strip_generated(), 2);

        let ann = &state.employees()[0];
        assert!(!ann.is_free(d(2027, 11, 2)));
        assert!(ann.is_free(d(2027, 11, 3)));
        assert!(ann.is_free(d(2027, 11, 4)));
        assert!(!ann.is_free(d(2027, 12, 1)));
        assert_eq!(ann.assigned_duty_count, 0);
        assert_eq!(ann.quota_deduction, 2);
    }

    #[test]
    fn test_deficit_and_capacity() {
        let mut state = state();
        state.strip_generated();
        assert_eq!(state.deficit(0), 42);
        assert_eq!(state.deficit(1), 10);
        assert_eq!(state.capacity(), 52);
    }

    #[test]
    fn test_assign_charges_cost() {
        let mut state = state();
        state.strip_generated();
        assert!(state.assign(1, d(2027, 11, 1), DutyCombo::Triple));
        assert_eq!(state.deficit(1), 7);
        assert!(!state.free_pool(d(2027, 11, 1)).contains(&1));
    }

    #[test]
    fn test_assign_skips_manual_cell() {
        let mut state = state();
        state.strip_generated();
        assert!(!state.assign(0, d(2027, 11, 2), DutyCombo::SingleA));
        assert_eq!(
            state.employees()[0].cell(d(2027, 11, 2)),
            Some(&Cell::Leave(LeaveSymbol::Wedding))
        );
    }
}
