//! Per-day slot solver.
//!
//! Splits a day's required headcounts into duty combinations. Standard days
//! use triple (A+B+C), double (B+C) and single (A) duty; every B and C is
//! covered by exactly one triple or double, so
//!
//! - double = req_c − triple
//! - triple + double = req_b
//! - single = req_a − triple
//!
//! Among exact decompositions the one using the most distinct staff wins,
//! which spreads multi-duty work over as many people as the pool allows.

use chrono::{Datelike, NaiveDate, Weekday};

use crate::config::{ScenarioChoice, ThursdayScenario};
use crate::demand::DayRequirement;

/// One exact decomposition of a standard day.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StandardDecomposition {
    pub triple: u32,
    pub double_bc: u32,
    pub single_a: u32,
}

impl StandardDecomposition {
    pub fn staff_needed(&self) -> u32 {
        self.triple + self.double_bc + self.single_a
    }
}

/// All exact decompositions that fit in `available` staff, most staff first.
pub fn standard_decompositions(
    available: u32,
    req: DayRequirement,
) -> Vec<StandardDecomposition> {
    let max_triple = available.min(req.a).min(req.b).min(req.c);

    let mut solutions: Vec<StandardDecomposition> = (0..=max_triple)
        .filter_map(|triple| {
            let double_bc = req.c.checked_sub(triple)?;
            if triple + double_bc != req.b {
                return None;
            }
            let single_a = req.a.checked_sub(triple)?;
            let solution = StandardDecomposition {
                triple,
                double_bc,
                single_a,
            };
            (solution.staff_needed() <= available).then_some(solution)
        })
        .collect();

    solutions.sort_by(|x, y| y.staff_needed().cmp(&x.staff_needed()));
    solutions
}

/// The decomposition using the most distinct staff, if any exists.
pub fn solve_standard_day(available: u32, req: DayRequirement) -> Option<StandardDecomposition> {
    standard_decompositions(available, req).into_iter().next()
}

/// Thursday split between combined A+B duty and plain A duty.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ThursdayPlan {
    pub double_ab: u32,
    pub single_a: u32,
}

/// Thursday shape is fixed by the scenario, not by the pool.
pub fn solve_thursday(scenario: ThursdayScenario) -> ThursdayPlan {
    match scenario {
        ThursdayScenario::A => ThursdayPlan {
            double_ab: 5,
            single_a: 0,
        },
        ThursdayScenario::B => ThursdayPlan {
            double_ab: 4,
            single_a: 1,
        },
        ThursdayScenario::C => ThursdayPlan {
            double_ab: 4,
            single_a: 0,
        },
    }
}

/// What the orchestrator should hand out on one day.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DayPlan {
    Saturday { single_a: u32 },
    Thursday(ThursdayPlan),
    Standard(StandardDecomposition),
    /// No exact decomposition fits the pool; the day stays short.
    Unsolvable,
}

/// Choose the shape of a day from its weekday, pool size and requirement.
pub fn plan_day(
    date: NaiveDate,
    available: u32,
    req: DayRequirement,
    choice: ScenarioChoice,
) -> DayPlan {
    match date.weekday() {
        Weekday::Sat => DayPlan::Saturday { single_a: req.a },
        Weekday::Thu => DayPlan::Thursday(solve_thursday(choice.thursday)),
        _ => match solve_standard_day(available, req) {
            Some(solution) => DayPlan::Standard(solution),
            None => DayPlan::Unsolvable,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefers_most_staff() {
        // 8 staff for 5/5/5: needs 10 - triple staff, so triple >= 2
        let best = solve_standard_day(8, DayRequirement::new(5, 5, 5)).unwrap();
        assert_eq!(
            best,
            StandardDecomposition {
                triple: 2,
                double_bc: 3,
                single_a: 3
            }
        );
        assert_eq!(best.staff_needed(), 8);
    }

    #[test]
    fn test_all_solutions_sorted_descending() {
        let all = standard_decompositions(8, DayRequirement::new(5, 5, 5));
        let staff: Vec<u32> = all.iter().map(|s| s.staff_needed()).collect();
        assert_eq!(staff, vec![8, 7, 6, 5]);
    }

    #[test]
    fn test_large_pool_avoids_triples() {
        let best = solve_standard_day(12, DayRequirement::new(5, 5, 5)).unwrap();
        assert_eq!(best.triple, 0);
        assert_eq!(best.double_bc, 5);
        assert_eq!(best.single_a, 5);
    }

    #[test]
    fn test_b_and_c_must_match() {
        // B and C are always covered together, so unequal counts have no solution
        assert_eq!(solve_standard_day(20, DayRequirement::new(5, 4, 5)), None);
    }

    #[test]
    fn test_pool_too_small() {
        assert_eq!(solve_standard_day(4, DayRequirement::new(5, 5, 5)), None);
        let tight = solve_standard_day(5, DayRequirement::new(5, 5, 5)).unwrap();
        assert_eq!(tight.triple, 5);
        assert_eq!(tight.staff_needed(), 5);
    }

    #[test]
    fn test_reduced_tuesday() {
        // A=5 with B=C=4: single A covers the extra early slot
        let best = solve_standard_day(8, DayRequirement::new(5, 4, 4)).unwrap();
        assert_eq!(best.triple, 1);
        assert_eq!(best.double_bc, 3);
        assert_eq!(best.single_a, 4);
    }

    #[test]
    fn test_thursday_shapes() {
        assert_eq!(solve_thursday(ThursdayScenario::A), ThursdayPlan { double_ab: 5, single_a: 0 });
        assert_eq!(solve_thursday(ThursdayScenario::B), ThursdayPlan { double_ab: 4, single_a: 1 });
        assert_eq!(solve_thursday(ThursdayScenario::C), ThursdayPlan { double_ab: 4, single_a: 0 });
    }

    #[test]
    fn test_plan_day_dispatch() {
        let choice = ScenarioChoice::default();
        let sat = NaiveDate::from_ymd_opt(2027, 11, 6).unwrap();
        let thu = NaiveDate::from_ymd_opt(2027, 11, 4).unwrap();
        let mon = NaiveDate::from_ymd_opt(2027, 11, 1).unwrap();

        assert_eq!(
            plan_day(sat, 8, DayRequirement::new(5, 0, 0), choice),
            DayPlan::Saturday { single_a: 5 }
        );
        assert!(matches!(plan_day(thu, 8, DayRequirement::new(5, 5, 0), choice), DayPlan::Thursday(_)));
        assert!(matches!(plan_day(mon, 8, DayRequirement::new(5, 5, 5), choice), DayPlan::Standard(_)));
        assert_eq!(plan_day(mon, 3, DayRequirement::new(5, 5, 5), choice), DayPlan::Unsolvable);
    }
}
