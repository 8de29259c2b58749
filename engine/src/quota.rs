//! Monthly duty-point quota.
//!
//! target = max(0, 2 × (days_in_month − deductible_days))
//!
//! A day is deducted once per category it matches, independently:
//! - weekend (Saturday or Sunday)
//! - full exemption that is not already a weekend
//! - named holiday (stacks with the weekend deduction)

use chrono::{Datelike, Weekday};

use crate::calendar::HolidayCalendar;
use crate::config::MonthConfig;
use crate::models::Employee;

/// Duty points per counted day.
pub const POINTS_PER_DAY: i32 = 2;

/// Per-category deduction counts for one month.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct QuotaBreakdown {
    pub days_in_month: u32,
    pub weekend_days: u32,
    pub exempt_weekdays: u32,
    pub named_holidays: u32,
}

impl QuotaBreakdown {
    pub fn deductible_days(&self) -> u32 {
        self.weekend_days + self.exempt_weekdays + self.named_holidays
    }

    /// The month target in duty points, never negative.
    pub fn target(&self) -> i32 {
        let counted = self.days_in_month as i32 - self.deductible_days() as i32;
        (counted * POINTS_PER_DAY).max(0)
    }
}

/// Count each deduction category over the configured month.
pub fn quota_breakdown(config: &MonthConfig, calendar: &dyn HolidayCalendar) -> QuotaBreakdown {
    let mut breakdown = QuotaBreakdown::default();

    for date in config.dates() {
        breakdown.days_in_month += 1;

        let weekend = matches!(date.weekday(), Weekday::Sat | Weekday::Sun);
        if weekend {
            breakdown.weekend_days += 1;
        }
        if config.is_full_exemption(date) && !weekend {
            breakdown.exempt_weekdays += 1;
        }
        if calendar.holiday_name(date, config.jan1_policy).is_some() {
            breakdown.named_holidays += 1;
        }
    }

    breakdown
}

/// Monthly duty-point target shared by every employee without an override.
pub fn monthly_target(config: &MonthConfig, calendar: &dyn HolidayCalendar) -> i32 {
    quota_breakdown(config, calendar).target()
}

/// Sum of effective targets, each clamped at zero.
pub fn total_capacity(employees: &[Employee], monthly_target: i32) -> i32 {
    employees
        .iter()
        .map(|e| e.effective_target(monthly_target).max(0))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::{NoHolidays, StandardCalendar};
    use crate::config::{ExemptionRange, Jan1Policy};
    use crate::models::{Cell, LeaveSymbol};
    use chrono::NaiveDate;

    fn d(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_plain_thirty_day_month() {
        // Nov 2027: 30 days, 8 weekend days, no named holidays
        let config = MonthConfig::new(2027, 11, vec![]);
        let breakdown = quota_breakdown(&config, &StandardCalendar);
        assert_eq!(breakdown.days_in_month, 30);
        assert_eq!(breakdown.weekend_days, 8);
        assert_eq!(breakdown.deductible_days(), 8);
        assert_eq!(monthly_target(&config, &StandardCalendar), 44);
    }

    #[test]
    fn test_named_holiday_stacks_with_weekend() {
        // Oct 2025: 8 weekend days, holidays on 6 (Mon), 10 (Fri), 25 (Sat)
        let config = MonthConfig::new(2025, 10, vec![]);
        let breakdown = quota_breakdown(&config, &StandardCalendar);
        assert_eq!(breakdown.weekend_days, 8);
        assert_eq!(breakdown.named_holidays, 3);
        assert_eq!(breakdown.target(), (31 - 11) * 2);

        assert_eq!(monthly_target(&config, &NoHolidays), (31 - 8) * 2);
    }

    #[test]
    fn test_exemption_range_skips_weekend_overlap() {
        // Feb 2026: range 14..=22 covers 5 weekdays and 4 weekend days; Feb 28 is a holiday
        let mut config = MonthConfig::new(2026, 2, vec![]);
        config.exemption = Some(ExemptionRange::new(d(2026, 2, 14), d(2026, 2, 22)));
        let breakdown = quota_breakdown(&config, &StandardCalendar);
        assert_eq!(breakdown.weekend_days, 8);
        assert_eq!(breakdown.exempt_weekdays, 5);
        assert_eq!(breakdown.named_holidays, 1);
        assert_eq!(breakdown.target(), 28);
    }

    #[test]
    fn test_jan1_counted_once_under_either_policy() {
        // Jan 1 2025 is a Wednesday
        let mut config = MonthConfig::new(2025, 1, vec![]);
        let exempt = quota_breakdown(&config, &StandardCalendar);
        assert_eq!(exempt.exempt_weekdays, 1);
        assert_eq!(exempt.named_holidays, 0);

        config.jan1_policy = Jan1Policy::Workday;
        let workday = quota_breakdown(&config, &StandardCalendar);
        assert_eq!(workday.exempt_weekdays, 0);
        assert_eq!(workday.named_holidays, 1);
        assert_eq!(exempt.target(), workday.target());
        assert_eq!(workday.target(), 44);
    }

    #[test]
    fn test_target_never_negative() {
        let mut config = MonthConfig::new(2026, 2, vec![]);
        config.exemption = Some(ExemptionRange::new(d(2026, 2, 1), d(2026, 2, 28)));
        assert_eq!(monthly_target(&config, &StandardCalendar), 0);
    }

    #[test]
    fn test_total_capacity_clamps_each_employee() {
        let mut low = Employee::new("1", "Low").with_quota_override(2);
        for day in [3, 4] {
            low = low.with_manual_cell(d(2027, 11, day), Cell::Leave(LeaveSymbol::Funeral));
        }
        low.recalculate_stats(2027, 11);
        assert_eq!(low.effective_target(44), -2);

        let regular = Employee::new("2", "Regular");
        assert_eq!(total_capacity(&[low, regular], 44), 44);
    }
}
