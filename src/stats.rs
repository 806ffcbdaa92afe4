use std::ops::AddAssign;
use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::sp_rq::Priority;
use crate::Time;

/// Data structure that contains various statistics collected during the scheduling.
///
/// Not every solver fills every field: the exact solver records expanded states and cache hits,
/// the local search records iterations and accepted moves and the multi-start driver additionally
/// records the outcome of each start.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Stats<T> {
    /// objective value of the returned schedule
    pub value: T,
    /// number of jobs
    pub num_jobs: usize,
    /// elapsed time since scheduling started
    pub elapsed: Duration,
    /// no. expanded search states (exact solver)
    pub expanded: u64,
    /// no. search states answered from the memo table (exact solver)
    pub cache_hits: u64,
    /// true iff the returned schedule is known to be optimal
    pub proved_optimal: bool,
    /// no. local search passes
    pub iterations: usize,
    /// accepted improving moves per neighborhood
    pub moves: Moves,
    /// true iff local search stopped in a local optimum (rather than at the iteration cap)
    pub converged: bool,
    /// objective value after each accepted move, starting with the initial value
    pub history: Vec<T>,
    /// outcome of each multi-start run in the order they were executed
    pub starts: Vec<Start<T>>,
}

/// Counts of improving moves accepted by the local search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Moves {
    pub swaps: usize,
    pub insertions: usize,
    pub reversals: usize,
}

impl Moves {
    #[inline]
    pub fn total(&self) -> usize {
        self.swaps + self.insertions + self.reversals
    }
}

impl AddAssign for Moves {
    fn add_assign(&mut self, other: Self) {
        self.swaps += other.swaps;
        self.insertions += other.insertions;
        self.reversals += other.reversals;
    }
}

/// Outcome of a single start of the multi-start driver.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Start<T> {
    /// priority rule used by the list scheduler
    pub priority: Priority,
    /// objective value of the constructed schedule
    pub constructed: T,
    /// objective value after local search
    pub improved: T,
}

impl<T: Time> Stats<T> {
    /// Fresh stats for an instance of `num_jobs` jobs; all counters are zero.
    pub fn new(value: T, num_jobs: usize) -> Self {
        Self {
            value,
            num_jobs,
            elapsed: Duration::ZERO,
            expanded: 0,
            cache_hits: 0,
            proved_optimal: false,
            iterations: 0,
            moves: Moves::default(),
            converged: false,
            history: Vec::new(),
            starts: Vec::new(),
        }
    }
}
