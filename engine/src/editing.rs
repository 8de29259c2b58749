//! Single-cell manual edits and month clearing.
//!
//! Every edit through this module marks the touched cell as manual (or drops
//! the flag together with the cell) and recomputes the employee's counters
//! for the month being viewed.

use chrono::{Datelike, NaiveDate};

use crate::models::{Cell, DutyCode, DutySet, Employee, LeaveSymbol, Slot};

/// What [`clear_month`] removes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClearMode {
    /// Non-manual duty cells only.
    Generated,
    /// Every cell and manual flag of the month.
    All,
}

fn store(employee: &mut Employee, date: NaiveDate, cell: Option<Cell>) {
    match cell {
        Some(cell) => {
            employee.cells.insert(date, cell);
            employee.manual.insert(date);
        }
        None => {
            employee.cells.remove(&date);
            employee.manual.remove(&date);
        }
    }
}

/// Toggle one duty code in a cell.
///
/// Adding a code displaces the other code for the same slot (`A` and `Xa`
/// are exclusive). A leave cell is replaced by the new duty. Removing the last
/// code empties the cell.
pub fn toggle_duty(
    employee: &mut Employee,
    date: NaiveDate,
    code: DutyCode,
    year: i32,
    month: u32,
) {
    let current: Vec<DutyCode> = employee
        .cell(date)
        .and_then(Cell::duties)
        .map(|set| set.codes().to_vec())
        .unwrap_or_default();

    let next: Vec<DutyCode> = if current.contains(&code) {
        current.into_iter().filter(|c| *c != code).collect()
    } else {
        current
            .into_iter()
            .filter(|c| c.slot() != code.slot())
            .chain(std::iter::once(code))
            .collect()
    };

    store(employee, date, DutySet::new(next).ok().map(Cell::Duties));
    employee.recalculate_stats(year, month);
}

/// Replace a cell with a leave symbol.
pub fn set_leave(
    employee: &mut Employee,
    date: NaiveDate,
    symbol: LeaveSymbol,
    year: i32,
    month: u32,
) {
    store(employee, date, Some(Cell::Leave(symbol)));
    employee.recalculate_stats(year, month);
}

/// Erase one slot of a duty cell, or the whole cell when `slot` is `None`.
///
/// Erasing a slot removes both its worked and exempted code. A leave cell is
/// removed whole either way.
pub fn erase(
    employee: &mut Employee,
    date: NaiveDate,
    slot: Option<Slot>,
    year: i32,
    month: u32,
) {
    let remaining = match (slot, employee.cell(date)) {
        (Some(slot), Some(Cell::Duties(set))) => {
            DutySet::new(set.codes().iter().copied().filter(|c| c.slot() != slot))
                .ok()
                .map(Cell::Duties)
        }
        _ => None,
    };
    store(employee, date, remaining);
    employee.recalculate_stats(year, month);
}

/// Clear a month across the roster.
pub fn clear_month(employees: &mut [Employee], year: i32, month: u32, mode: ClearMode) {
    let in_month = |date: &NaiveDate| date.year() == year && date.month() == month;

    for employee in employees.iter_mut() {
        match mode {
            ClearMode::All => {
                employee.cells.retain(|date, _| !in_month(date));
                employee.manual.retain(|date| !in_month(date));
            }
            ClearMode::Generated => {
                let manual = employee.manual.clone();
                employee.cells.retain(|date, cell| {
                    !in_month(date) || manual.contains(date) || matches!(cell, Cell::Leave(_))
                });
            }
        }
        employee.recalculate_stats(year, month);
    }
}
