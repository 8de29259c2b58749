//! Roster generation for one month.
//!
//! This module ties the quota, ladder, prioritizer, solver, ranker and
//! adjacency guard together into a single pass over the month's days.

mod core;
mod state;

pub use core::{assemble_roster, generate_roster, GenerationResult, RosterError, RosterScheduler};
pub use state::RosterState;
