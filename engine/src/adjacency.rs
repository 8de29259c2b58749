//! Adjacency guard for triple duty.
//!
//! An employee may not take triple duty on day d when any of these already
//! hold triple duty for them: d−2 and d−1, d+1 and d+2, or d−1 and d+1.
//! Neighbours are real calendar dates; a neighbour with no cell yet (not
//! resolved, or in another month with no roster) counts as not triple.
//!
//! On a critical day (pool of five or fewer) the guard is bypassed.

use chrono::{Days, NaiveDate};

use crate::models::Employee;

/// Pools at or below this size waive the guard.
pub const CRITICAL_POOL_SIZE: usize = 5;

#[inline]
pub fn is_critical_day(pool_size: usize) -> bool {
    pool_size <= CRITICAL_POOL_SIZE
}

/// Which clustering pattern blocked an assignment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AdjacencyBlock {
    /// triple on d−2 and d−1
    Trailing,
    /// triple on d+1 and d+2
    Leading,
    /// triple on d−1 and d+1
    Sandwich,
}

fn triple_on(employee: &Employee, date: Option<NaiveDate>) -> bool {
    date.and_then(|d| employee.cell(d))
        .is_some_and(|cell| cell.is_triple())
}

/// The pattern that forbids triple duty on `date`, if any.
pub fn adjacency_block(employee: &Employee, date: NaiveDate) -> Option<AdjacencyBlock> {
    let back = |n| triple_on(employee, date.checked_sub_days(Days::new(n)));
    let ahead = |n| triple_on(employee, date.checked_add_days(Days::new(n)));

    let (prev1, prev2) = (back(1), back(2));
    let (next1, next2) = (ahead(1), ahead(2));

    if prev1 && prev2 {
        Some(AdjacencyBlock::Trailing)
    } else if next1 && next2 {
        Some(AdjacencyBlock::Leading)
    } else if prev1 && next1 {
        Some(AdjacencyBlock::Sandwich)
    } else {
        None
    }
}

/// Whether `employee` may take triple duty on `date`.
pub fn allows_triple(employee: &Employee, date: NaiveDate, critical: bool) -> bool {
    critical || adjacency_block(employee, date).is_none()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Cell, DutyCombo, LeaveSymbol};

    fn d(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn with_triples(days: &[NaiveDate]) -> Employee {
        days.iter().fold(Employee::new("1", "Ann"), |emp, day| {
            emp.with_manual_cell(*day, DutyCombo::Triple.cell())
        })
    }

    #[test]
    fn test_trailing_pair_blocks() {
        let emp = with_triples(&[d(2027, 11, 8), d(2027, 11, 9)]);
        assert_eq!(adjacency_block(&emp, d(2027, 11, 10)), Some(AdjacencyBlock::Trailing));
        assert!(!allows_triple(&emp, d(2027, 11, 10), false));
        assert!(allows_triple(&emp, d(2027, 11, 10), true));
    }

    #[test]
    fn test_leading_pair_blocks() {
        let emp = with_triples(&[d(2027, 11, 11), d(2027, 11, 12)]);
        assert_eq!(adjacency_block(&emp, d(2027, 11, 10)), Some(AdjacencyBlock::Leading));
    }

    #[test]
    fn test_sandwich_blocks() {
        let emp = with_triples(&[d(2027, 11, 9), d(2027, 11, 11)]);
        assert_eq!(adjacency_block(&emp, d(2027, 11, 10)), Some(AdjacencyBlock::Sandwich));
    }

    #[test]
    fn test_single_neighbour_allowed() {
        let emp = with_triples(&[d(2027, 11, 9), d(2027, 11, 12)]);
        assert_eq!(adjacency_block(&emp, d(2027, 11, 10)), None);
        assert!(allows_triple(&emp, d(2027, 11, 10), false));
    }

    #[test]
    fn test_non_triple_neighbours_ignored() {
        let emp = Employee::new("1", "Ann")
            .with_manual_cell(d(2027, 11, 8), DutyCombo::DoubleBC.cell())
            .with_manual_cell(d(2027, 11, 9), Cell::Leave(LeaveSymbol::Off));
        assert!(allows_triple(&emp, d(2027, 11, 10), false));
    }

    #[test]
    fn test_crosses_month_boundary() {
        let emp = with_triples(&[d(2027, 10, 30), d(2027, 10, 31)]);
        assert_eq!(adjacency_block(&emp, d(2027, 11, 1)), Some(AdjacencyBlock::Trailing));
    }

    #[test]
    fn test_critical_threshold() {
        assert!(is_critical_day(5));
        assert!(is_critical_day(0));
        assert!(!is_critical_day(6));
    }
}
