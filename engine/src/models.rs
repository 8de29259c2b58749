//! Core data types: duty codes, cells, employees.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use thiserror::Error;

/// One of the three daily duty slots (early/mid/late).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Slot {
    A,
    B,
    C,
}

impl Slot {
    pub const ALL: [Slot; 3] = [Slot::A, Slot::B, Slot::C];

    #[inline]
    pub fn index(self) -> usize {
        match self {
            Slot::A => 0,
            Slot::B => 1,
            Slot::C => 2,
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Slot::A => "A",
            Slot::B => "B",
            Slot::C => "C",
        };
        f.write_str(s)
    }
}

/// A duty code stored in a cell.
///
/// `Xa`/`Xb`/`Xc` occupy their slot but are exempted: they are not worked
/// and do not count toward the duty tally.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DutyCode {
    A,
    B,
    C,
    Xa,
    Xb,
    Xc,
}

impl DutyCode {
    pub fn slot(self) -> Slot {
        match self {
            DutyCode::A | DutyCode::Xa => Slot::A,
            DutyCode::B | DutyCode::Xb => Slot::B,
            DutyCode::C | DutyCode::Xc => Slot::C,
        }
    }

    /// Whether this code is real work (A/B/C) rather than an exempted marker.
    pub fn is_worked(self) -> bool {
        matches!(self, DutyCode::A | DutyCode::B | DutyCode::C)
    }

    pub fn worked(slot: Slot) -> Self {
        match slot {
            Slot::A => DutyCode::A,
            Slot::B => DutyCode::B,
            Slot::C => DutyCode::C,
        }
    }

    pub fn exempted(slot: Slot) -> Self {
        match slot {
            Slot::A => DutyCode::Xa,
            Slot::B => DutyCode::Xb,
            Slot::C => DutyCode::Xc,
        }
    }
}

/// Errors raised when building cell content.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CellError {
    #[error("Duty set must not be empty")]
    EmptyDutySet,
    #[error("Duty set holds more than one code for slot {0}")]
    ConflictingDuties(Slot),
}

/// Non-empty set of duty codes with at most one code per slot.
///
/// Always iterates in slot order (A, B, C).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<DutyCode>", into = "Vec<DutyCode>")]
pub struct DutySet {
    codes: Vec<DutyCode>,
}

impl DutySet {
    pub fn new(codes: impl IntoIterator<Item = DutyCode>) -> Result<Self, CellError> {
        let mut by_slot: [Option<DutyCode>; 3] = [None; 3];
        for code in codes {
            let slot = code.slot();
            match by_slot[slot.index()] {
                Some(existing) if existing != code => {
                    return Err(CellError::ConflictingDuties(slot))
                }
                _ => by_slot[slot.index()] = Some(code),
            }
        }
        let codes: Vec<DutyCode> = by_slot.into_iter().flatten().collect();
        if codes.is_empty() {
            return Err(CellError::EmptyDutySet);
        }
        Ok(Self { codes })
    }

    pub fn codes(&self) -> &[DutyCode] {
        &self.codes
    }

    pub fn contains(&self, code: DutyCode) -> bool {
        self.codes.contains(&code)
    }

    /// The code occupying a slot, if any.
    pub fn code_for(&self, slot: Slot) -> Option<DutyCode> {
        self.codes.iter().copied().find(|c| c.slot() == slot)
    }

    /// Whether the slot is actually worked (excludes exempted codes).
    pub fn works(&self, slot: Slot) -> bool {
        self.contains(DutyCode::worked(slot))
    }

    /// Number of worked codes, i.e. duty points this cell is worth.
    pub fn worked_count(&self) -> i32 {
        self.codes.iter().filter(|c| c.is_worked()).count() as i32
    }

    /// Exactly A+B+C, the heaviest combination.
    pub fn is_triple(&self) -> bool {
        self.codes == [DutyCode::A, DutyCode::B, DutyCode::C]
    }
}

impl TryFrom<Vec<DutyCode>> for DutySet {
    type Error = CellError;

    fn try_from(codes: Vec<DutyCode>) -> Result<Self, Self::Error> {
        Self::new(codes)
    }
}

impl From<DutySet> for Vec<DutyCode> {
    fn from(set: DutySet) -> Self {
        set.codes
    }
}

/// A non-duty cell marking leave or absence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LeaveSymbol {
    ClinicClosed,
    Off,
    SpecialLeave,
    Wedding,
    Maternity,
    /// The month target already excludes these days, so no extra deduction.
    LunarNewYear,
    Funeral,
}

impl LeaveSymbol {
    /// Duty points removed from the employee's monthly target.
    pub fn deduction(self) -> i32 {
        match self {
            LeaveSymbol::ClinicClosed | LeaveSymbol::Off | LeaveSymbol::LunarNewYear => 0,
            LeaveSymbol::SpecialLeave
            | LeaveSymbol::Wedding
            | LeaveSymbol::Maternity
            | LeaveSymbol::Funeral => 2,
        }
    }
}

/// Content of one roster cell: either duties or exactly one leave symbol.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Duties(DutySet),
    Leave(LeaveSymbol),
}

impl Cell {
    pub fn duties(&self) -> Option<&DutySet> {
        match self {
            Cell::Duties(set) => Some(set),
            Cell::Leave(_) => None,
        }
    }

    pub fn is_triple(&self) -> bool {
        self.duties().is_some_and(DutySet::is_triple)
    }
}

/// A duty combination the generator hands out in one assignment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DutyCombo {
    /// A+B+C for one person.
    Triple,
    /// B+C back to back.
    DoubleBC,
    /// Thursday's combined A+B.
    DoubleAB,
    SingleA,
}

impl DutyCombo {
    /// Duty points this combination is worth.
    pub fn cost(self) -> i32 {
        match self {
            DutyCombo::Triple => 3,
            DutyCombo::DoubleBC | DutyCombo::DoubleAB => 2,
            DutyCombo::SingleA => 1,
        }
    }

    pub fn codes(self) -> &'static [DutyCode] {
        match self {
            DutyCombo::Triple => &[DutyCode::A, DutyCode::B, DutyCode::C],
            DutyCombo::DoubleBC => &[DutyCode::B, DutyCode::C],
            DutyCombo::DoubleAB => &[DutyCode::A, DutyCode::B],
            DutyCombo::SingleA => &[DutyCode::A],
        }
    }

    pub fn cell(self) -> Cell {
        Cell::Duties(DutySet {
            codes: self.codes().to_vec(),
        })
    }
}

impl fmt::Display for DutyCombo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for code in self.codes() {
            write!(f, "{:?}", code)?;
        }
        Ok(())
    }
}

/// An employee on the roster.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: String,
    pub name: String,
    /// date -> cell content, across all months
    #[serde(default)]
    pub cells: BTreeMap<NaiveDate, Cell>,
    /// Dates whose cell was set by a human; generation never touches them.
    #[serde(default)]
    pub manual: BTreeSet<NaiveDate>,
    #[serde(default)]
    pub quota_override: Option<i32>,
    /// A/B/C letters on record for the last recalculated month.
    #[serde(default)]
    pub assigned_duty_count: i32,
    /// Sum of leave deductions for the last recalculated month.
    #[serde(default)]
    pub quota_deduction: i32,
}

impl Employee {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            cells: BTreeMap::new(),
            manual: BTreeSet::new(),
            quota_override: None,
            assigned_duty_count: 0,
            quota_deduction: 0,
        }
    }

    pub fn with_quota_override(mut self, quota: i32) -> Self {
        self.quota_override = Some(quota);
        self
    }

    /// Set a cell by hand.
    pub fn with_manual_cell(mut self, date: NaiveDate, cell: Cell) -> Self {
        self.cells.insert(date, cell);
        self.manual.insert(date);
        self
    }

    #[inline]
    pub fn cell(&self, date: NaiveDate) -> Option<&Cell> {
        self.cells.get(&date)
    }

    #[inline]
    pub fn is_manual(&self, date: NaiveDate) -> bool {
        self.manual.contains(&date)
    }

    /// No cell recorded on this date, so the generator may use this person.
    #[inline]
    pub fn is_free(&self, date: NaiveDate) -> bool {
        !self.cells.contains_key(&date)
    }

    /// Cells dated inside the given month.
    pub fn month_cells(&self, year: i32, month: u32) -> impl Iterator<Item = (&NaiveDate, &Cell)> {
        self.cells
            .iter()
            .filter(move |(date, _)| date.year() == year && date.month() == month)
    }

    /// (duty count, quota deduction) for a month, derived from cell content.
    pub fn month_tally(&self, year: i32, month: u32) -> (i32, i32) {
        self.month_cells(year, month)
            .fold((0, 0), |(duties, deduction), (_, cell)| match cell {
                Cell::Duties(set) => (duties + set.worked_count(), deduction),
                Cell::Leave(symbol) => (duties, deduction + symbol.deduction()),
            })
    }

    /// Recompute the derived counters from cell content.
    pub fn recalculate_stats(&mut self, year: i32, month: u32) {
        let (duties, deduction) = self.month_tally(year, month);
        self.assigned_duty_count = duties;
        self.quota_deduction = deduction;
    }

    /// Personal target: override or month target, minus leave deductions.
    ///
    /// May be negative; callers clamp when summing capacity.
    pub fn effective_target(&self, monthly_target: i32) -> i32 {
        self.quota_override.unwrap_or(monthly_target) - self.quota_deduction
    }
}
