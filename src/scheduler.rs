use std::time::Instant;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::multi_start::{multi_start, MultiStartConfig};
use crate::objective::{Makespan, Objective, WeightedTardiness};
use crate::sp_rq::{schrage, Priority};
use crate::sp_wt::exact;
use crate::{Error, Job, Result, RpqJob, Schedule, Stats, Time, WtJob};

/// A problem instance: the jobs together with the objective to minimize.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Instance<T> {
    /// `1||ΣwT`
    WeightedTardiness(Vec<WtJob<T>>),
    /// `1|r_j,q_j|C_max`
    Makespan(Vec<RpqJob<T>>),
}

impl<T: Time> Instance<T> {
    /// name of the objective this instance is minimizing
    pub fn objective(&self) -> &'static str {
        match self {
            Self::WeightedTardiness(_) => WeightedTardiness::<T>::NAME,
            Self::Makespan(_) => Makespan::<T>::NAME,
        }
    }

    /// number of jobs
    pub fn len(&self) -> usize {
        match self {
            Self::WeightedTardiness(jobs) => jobs.len(),
            Self::Makespan(jobs) => jobs.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Resulting processing order (as job ids), its objective value and search statistics.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Solution<T> {
    /// ids of the jobs in processing order
    pub ids: Vec<usize>,
    /// objective value
    pub value: T,
    pub stats: Stats<T>,
}

impl<T: Time> Solution<T> {
    fn new<J: Job>(schedule: Schedule<T>, jobs: &[J], stats: Stats<T>) -> Self {
        Self {
            ids: schedule.ids(jobs),
            value: schedule.value,
            stats,
        }
    }
}

/// Solver selection for single-machine sequencing problems.
///
/// # Scheduler instances
///  1. Optimal solver for `1||ΣwT` - [`Exact`](Scheduler::Exact), see [`crate::sp_wt`]
///  1. List scheduling for `1|r_j,q_j|C_max` - [`Schrage`](Scheduler::Schrage), see
///     [`crate::sp_rq`]
///  1. Multi-start list scheduling with local search for `1|r_j,q_j|C_max` -
///     [`MultiStart`](Scheduler::MultiStart), see [`crate::multi_start`]
///
/// Pairing a scheduler with an instance of the other objective is an error.
///
/// ## Example
/// ```
/// # extern crate jobseq;
/// use jobseq::{Error, Instance, Priority, RpqJob, Scheduler};
///
/// let instance = Instance::Makespan(RpqJob::from_triples([(0u32, 2, 5), (1, 1, 1)]));
///
/// let solution = Scheduler::Schrage(Priority::Standard).schedule(&instance).unwrap();
/// assert_eq!(solution.ids, vec![1, 2]);
/// assert_eq!(solution.value, 7);
///
/// assert!(matches!(Scheduler::Exact.schedule(&instance), Err(Error::Unsupported { .. })));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Scheduler {
    Exact,
    Schrage(Priority),
    MultiStart(MultiStartConfig),
}

impl Scheduler {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Schrage(_) => "schrage",
            Self::MultiStart(_) => "multi-start",
        }
    }

    /// Run the scheduling algorithm determined by this instance on the given problem `instance`.
    ///
    /// An empty instance yields an empty schedule with objective value `0`.
    pub fn schedule<T: Time>(&self, instance: &Instance<T>) -> Result<Solution<T>> {
        match (self, instance) {
            (Self::Exact, Instance::WeightedTardiness(jobs)) => {
                let (schedule, stats) = exact(jobs)?;
                Ok(Solution::new(schedule, jobs.as_slice(), stats))
            }
            (Self::Schrage(priority), Instance::Makespan(jobs)) => {
                let start = Instant::now();
                let schedule = schrage(jobs, *priority)?;
                let mut stats = Stats::new(schedule.value, jobs.len());
                stats.elapsed = start.elapsed();
                Ok(Solution::new(schedule, jobs.as_slice(), stats))
            }
            (Self::MultiStart(config), Instance::Makespan(jobs)) => {
                let (schedule, stats) = multi_start(jobs, config)?;
                Ok(Solution::new(schedule, jobs.as_slice(), stats))
            }
            (scheduler, instance) => Err(Error::Unsupported {
                scheduler: scheduler.name(),
                objective: instance.objective(),
            }),
        }
    }
}
