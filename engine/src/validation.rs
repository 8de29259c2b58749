//! Coverage validation: compare actual slot counts against requirements.
//!
//! Pure function of the roster; used after generation and after manual edits.
//! Every date of the month is scanned, so duties recorded on a Sunday or an
//! exempt date are reported as surplus.

use chrono::{Datelike, NaiveDate};
use std::cmp::Ordering;
use std::fmt;

use crate::config::{MonthConfig, ScenarioChoice};
use crate::demand::daily_requirement;
use crate::models::{Employee, Slot};

/// Whether a slot came out short or over.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CoverageKind {
    UnderCoverage,
    OverCoverage,
}

/// One slot on one day whose headcount differs from the requirement.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CoverageWarning {
    pub date: NaiveDate,
    pub slot: Slot,
    pub actual: u32,
    pub required: u32,
}

impl CoverageWarning {
    pub fn kind(&self) -> CoverageKind {
        match self.actual.cmp(&self.required) {
            Ordering::Less => CoverageKind::UnderCoverage,
            _ => CoverageKind::OverCoverage,
        }
    }
}

impl fmt::Display for CoverageWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}): slot {} has {} (required {})",
            self.date.day(),
            self.date.weekday(),
            self.slot,
            self.actual,
            self.required
        )
    }
}

/// Worked headcount per slot on `date`, indexed by [`Slot::index`].
pub fn slot_counts(employees: &[Employee], date: NaiveDate) -> [u32; 3] {
    let mut counts = [0u32; 3];
    for set in employees
        .iter()
        .filter_map(|e| e.cell(date))
        .filter_map(|cell| cell.duties())
    {
        for slot in Slot::ALL {
            if set.works(slot) {
                counts[slot.index()] += 1;
            }
        }
    }
    counts
}

/// Every slot mismatch of the month, in calendar then slot order.
pub fn validate_month(
    employees: &[Employee],
    config: &MonthConfig,
    choice: ScenarioChoice,
) -> Vec<CoverageWarning> {
    let mut warnings = Vec::new();

    for date in config.dates() {
        let req = daily_requirement(date, config, choice);
        let counts = slot_counts(employees, date);

        for slot in Slot::ALL {
            let actual = counts[slot.index()];
            let required = req.for_slot(slot);
            if actual != required {
                warnings.push(CoverageWarning {
                    date,
                    slot,
                    actual,
                    required,
                });
            }
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StandardRequirements;
    use crate::models::{Cell, DutyCode, DutyCombo, DutySet};

    fn d(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn small_config() -> MonthConfig {
        let mut config = MonthConfig::new(2027, 11, vec![]);
        config.standard = StandardRequirements { a: 1, b: 1, c: 1 };
        config.saturday_a = 1;
        config
    }

    #[test]
    fn test_exempted_codes_not_counted() {
        let emp = Employee::new("1", "Ann").with_manual_cell(
            d(2027, 11, 1),
            Cell::Duties(DutySet::new([DutyCode::Xa, DutyCode::B, DutyCode::C]).unwrap()),
        );
        assert_eq!(slot_counts(&[emp], d(2027, 11, 1)), [0, 1, 1]);
    }

    #[test]
    fn test_empty_roster_warns_every_required_slot() {
        let config = small_config();
        let warnings = validate_month(&[], &config, ScenarioChoice::default());
        // 18 standard days × 3 slots + 4 Thursdays × 2 + 4 Saturdays × 1
        assert_eq!(warnings.len(), 18 * 3 + 4 * 2 + 4);
        assert!(warnings.iter().all(|w| w.kind() == CoverageKind::UnderCoverage));
        assert_eq!(warnings[0].date, d(2027, 11, 1));
        assert_eq!(warnings[0].slot, Slot::A);
    }

    #[test]
    fn test_duty_on_sunday_is_surplus() {
        let config = small_config();
        let emp = Employee::new("1", "Ann").with_manual_cell(d(2027, 11, 7), DutyCombo::SingleA.cell());
        let warnings = validate_month(&[emp], &config, ScenarioChoice::default());
        let sunday: Vec<&CoverageWarning> =
            warnings.iter().filter(|w| w.date == d(2027, 11, 7)).collect();
        assert_eq!(sunday.len(), 1);
        assert_eq!(sunday[0].kind(), CoverageKind::OverCoverage);
        assert_eq!(sunday[0].to_string(), "7 (Sun): slot A has 1 (required 0)");
    }

    #[test]
    fn test_exact_day_has_no_warning() {
        let config = small_config();
        let emp = Employee::new("1", "Ann").with_manual_cell(d(2027, 11, 1), DutyCombo::Triple.cell());
        let warnings = validate_month(&[emp], &config, ScenarioChoice::default());
        assert!(warnings.iter().all(|w| w.date != d(2027, 11, 1)));
    }
}
