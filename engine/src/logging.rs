//! Logging macros for the roster generator with verbosity level control.
//!
//! Zero-cost when disabled (verbosity=0). Levels:
//! - 0: SILENT
//! - 1: CHANGES (scenario choice, duty assignments, unsolvable days)
//! - 2: CHECKS (pool sizes, adjacency exclusions, batch trims)
//! - 3: DEBUG (solver decompositions, day queue)

/// Verbosity level constants.
pub const VERBOSITY_SILENT: u8 = 0;
pub const VERBOSITY_CHANGES: u8 = 1;
pub const VERBOSITY_CHECKS: u8 = 2;
pub const VERBOSITY_DEBUG: u8 = 3;

/// Log at CHANGES level (verbosity >= 1).
///
/// Used for: scenario selection, assignments, days left short.
#[macro_export]
macro_rules! log_changes {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_CHANGES {
            eprintln!($($arg)*);
        }
    };
}

/// Log at CHECKS level (verbosity >= 2).
///
/// Used for: candidate pools, guard exclusions, saturated-batch trims.
#[macro_export]
macro_rules! log_checks {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_CHECKS {
            eprintln!($($arg)*);
        }
    };
}

/// Log at DEBUG level (verbosity >= 3).
///
/// Used for: every feasible decomposition and the full day queue.
#[macro_export]
macro_rules! log_debug {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_DEBUG {
            eprintln!($($arg)*);
        }
    };
}
