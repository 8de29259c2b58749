//! Monthly duty roster generator.
//!
//! Builds a clinic's monthly roster: every staffed day needs exact headcounts
//! in three duty slots (A/B/C), filled from a fixed staff pool while keeping
//! each employee close to a points-based monthly quota.
//!
//! A generation run:
//! 1. clears the month's generated cells (manual cells are kept),
//! 2. picks the cheapest demand scenario the staff capacity can carry,
//! 3. orders days tightest first,
//! 4. decomposes each day into triple/double/single duties and fills them
//!    by quota deficit with random tie-breaks, keeping triple duties from
//!    clustering,
//! 5. recomputes counters and reports every slot mismatch.

#[macro_use]
pub mod logging;

pub mod adjacency;
pub mod calendar;
pub mod config;
pub mod demand;
pub mod editing;
pub mod ladder;
pub mod models;
pub mod priority;
pub mod quota;
pub mod ranking;
pub mod scheduler;
pub mod snapshot;
pub mod solver;
pub mod validation;

#[cfg(feature = "python")]
mod python;

pub use calendar::{HolidayCalendar, HolidayListing, NoHolidays, StandardCalendar};
pub use config::{
    ExemptionRange, GeneratorOptions, Jan1Policy, MonthConfig, ScenarioChoice,
    StandardRequirements, ThursdayMode, ThursdayScenario,
};
pub use demand::{overview_stats, DayRequirement, DemandStats};
pub use editing::{clear_month, erase, set_leave, toggle_duty, ClearMode};
pub use models::{Cell, CellError, DutyCode, DutyCombo, DutySet, Employee, LeaveSymbol, Slot};
pub use quota::monthly_target;
pub use scheduler::{generate_roster, GenerationResult, RosterError, RosterScheduler};
pub use snapshot::{RosterSnapshot, SnapshotError};
pub use validation::{validate_month, CoverageKind, CoverageWarning};
