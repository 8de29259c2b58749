//! Fairness ranking of candidates for one batch of assignments.
//!
//! Candidates are split into two tiers: those whose deficit covers the cost
//! of the assignment, and everyone else. Each tier is shuffled and then
//! stably sorted by deficit descending, so ties are broken randomly while the
//! furthest-behind employees always come first.

use rand::seq::SliceRandom;
use rand::Rng;

/// Batch size at which an over-quota last pick is dropped.
pub const SATURATED_BATCH: usize = 5;

/// An eligible employee and how far they are behind their target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Candidate {
    /// Index into the working roster.
    pub index: usize,
    /// effective target − duty points assigned so far
    pub deficit: i32,
}

impl Candidate {
    pub fn new(index: usize, deficit: i32) -> Self {
        Self { index, deficit }
    }
}

/// Order candidates by fairness and keep the first `count`.
pub fn rank_candidates<R: Rng + ?Sized>(
    candidates: &[Candidate],
    count: usize,
    cost: i32,
    rng: &mut R,
) -> Vec<Candidate> {
    let (mut behind, mut rest): (Vec<Candidate>, Vec<Candidate>) =
        candidates.iter().copied().partition(|c| c.deficit >= cost);

    for tier in [&mut behind, &mut rest] {
        tier.shuffle(&mut *rng);
        tier.sort_by(|a, b| b.deficit.cmp(&a.deficit));
    }

    behind.into_iter().chain(rest).take(count).collect()
}

/// Drop the last pick of a full five-person batch when that person is
/// already at or above quota, unless the day is critical.
///
/// Returns the dropped candidate.
pub fn trim_saturated_batch(
    picks: &mut Vec<Candidate>,
    requested: usize,
    critical: bool,
) -> Option<Candidate> {
    if critical || requested != SATURATED_BATCH || picks.len() != SATURATED_BATCH {
        return None;
    }
    if picks.last().is_some_and(|last| last.deficit <= 0) {
        picks.pop()
    } else {
        None
    }
}
