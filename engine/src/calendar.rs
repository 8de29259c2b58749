//! Holiday calendar and month date helpers.
//!
//! The generator asks a [`HolidayCalendar`] whether a date carries a named
//! holiday. Named holidays are still staffed; they only lower the monthly
//! quota. Dates that are not staffed at all (Jan 1, the configured exemption
//! range) are decided by [`crate::config::MonthConfig::is_full_exemption`].

use chrono::{Datelike, NaiveDate};
use std::borrow::Cow;

use crate::config::Jan1Policy;

/// Source of named holidays.
pub trait HolidayCalendar {
    /// Name of the holiday falling on `date`, if any.
    fn holiday_name(&self, date: NaiveDate, jan1: Jan1Policy) -> Option<Cow<'static, str>>;
}

/// Calendar with no named holidays at all.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoHolidays;

impl HolidayCalendar for NoHolidays {
    fn holiday_name(&self, _date: NaiveDate, _jan1: Jan1Policy) -> Option<Cow<'static, str>> {
        None
    }
}

/// Fixed-date holidays as (month, day, name).
const FIXED_HOLIDAYS: &[(u32, u32, &str)] = &[
    (2, 28, "Peace Memorial Day"),
    (4, 4, "Children's Day"),
    (4, 5, "Tomb Sweeping Day"),
    (5, 1, "Labour Day"),
    (9, 28, "Teachers' Day"),
    (10, 10, "National Day"),
    (10, 25, "Retrocession Day"),
    (12, 25, "Constitution Day"),
];

/// Lunar holidays resolved to Gregorian dates as (year, month, day, name).
const LUNAR_HOLIDAYS: &[(i32, u32, u32, &str)] = &[
    (2024, 6, 10, "Dragon Boat Festival"),
    (2025, 5, 31, "Dragon Boat Festival"),
    (2026, 6, 19, "Dragon Boat Festival"),
    (2027, 6, 9, "Dragon Boat Festival"),
    (2028, 5, 28, "Dragon Boat Festival"),
    (2029, 6, 16, "Dragon Boat Festival"),
    (2030, 6, 5, "Dragon Boat Festival"),
    (2024, 9, 17, "Mid-Autumn Festival"),
    (2025, 10, 6, "Mid-Autumn Festival"),
    (2026, 9, 25, "Mid-Autumn Festival"),
    (2027, 9, 15, "Mid-Autumn Festival"),
    (2028, 10, 3, "Mid-Autumn Festival"),
    (2029, 9, 22, "Mid-Autumn Festival"),
    (2030, 9, 12, "Mid-Autumn Festival"),
];

pub const NEW_YEARS_DAY: &str = "New Year's Day";

/// The clinic's standard calendar: fixed national holidays plus the lunar table.
///
/// Jan 1 is only reported as a named holiday when it is a workday; when it is
/// exempt it is closed outright and carries no name here.
#[derive(Clone, Copy, Debug, Default)]
pub struct StandardCalendar;

impl HolidayCalendar for StandardCalendar {
    fn holiday_name(&self, date: NaiveDate, jan1: Jan1Policy) -> Option<Cow<'static, str>> {
        let (month, day) = (date.month(), date.day());

        if month == 1 && day == 1 && jan1 == Jan1Policy::Workday {
            return Some(Cow::Borrowed(NEW_YEARS_DAY));
        }

        if let Some((_, _, name)) = FIXED_HOLIDAYS
            .iter()
            .find(|(m, d, _)| *m == month && *d == day)
        {
            return Some(Cow::Borrowed(*name));
        }

        LUNAR_HOLIDAYS
            .iter()
            .find(|(y, m, d, _)| *y == date.year() && *m == month && *d == day)
            .map(|(_, _, _, name)| Cow::Borrowed(*name))
    }
}

/// First day of a month, `None` if the month is out of range.
pub fn first_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1)
}

/// Number of days in a month (0 for an invalid month).
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let Some(first) = first_of_month(year, month) else {
        return 0;
    };
    let next = if month == 12 {
        first_of_month(year + 1, 1)
    } else {
        first_of_month(year, month + 1)
    };
    next.map(|n| (n - first).num_days() as u32).unwrap_or(31)
}

/// Every date of a month in calendar order.
pub fn month_dates(year: i32, month: u32) -> Vec<NaiveDate> {
    (1..=days_in_month(year, month))
        .filter_map(|day| NaiveDate::from_ymd_opt(year, month, day))
        .collect()
}

/// A holiday listed for display.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HolidayListing {
    pub date: NaiveDate,
    pub name: String,
    /// Closed outright rather than staffed with a lowered quota.
    pub closed: bool,
}

/// Named holidays of a month, with an exempt Jan 1 listed as closed.
pub fn special_holidays_in_month(
    calendar: &dyn HolidayCalendar,
    year: i32,
    month: u32,
    jan1: Jan1Policy,
) -> Vec<HolidayListing> {
    month_dates(year, month)
        .into_iter()
        .filter_map(|date| {
            if date.month() == 1 && date.day() == 1 && jan1 == Jan1Policy::Exempt {
                return Some(HolidayListing {
                    date,
                    name: NEW_YEARS_DAY.to_string(),
                    closed: true,
                });
            }
            calendar
                .holiday_name(date, jan1)
                .map(|name| HolidayListing {
                    date,
                    name: name.into_owned(),
                    closed: false,
                })
        })
        .collect()
}
