//! # Single-machine job sequencing
//! This crate computes processing orders of jobs on **one machine without preemption** that
//! minimize a scalar objective.
//!
//! ## Scheduling problems
//!
//! ### `1||ΣwT`
//! Total weighted tardiness of jobs with processing times `p[j]`, weights `w[j]` and due dates
//! `d[j]`. The problem is NP-hard; [`sp_wt::exact`] finds the optimum by a memoized search over
//! subsets of scheduled jobs, which is tractable for small instances (tens of jobs).
//!
//! ### `1|r_j,q_j|C_max`
//! Makespan of jobs with release times `r[j]`, processing times `p[j]` and delivery times `q[j]`
//! (the time a job needs after leaving the machine). The problem is NP-hard in the strong sense
//! and is solved approximately:
//!  1. [`sp_rq::schrage`] builds a schedule by list scheduling (Schrage's rule or a weighted
//!     priority rule)
//!  1. [`local_search::improve`] hill-climbs over swap, insertion and reversal neighborhoods
//!  1. [`multi_start::multi_start`] repeats both steps for several priority rules and keeps the
//!     best schedule
//!
//! ## Example
//! ```
//! # extern crate jobseq;
//! use jobseq::{Instance, MultiStartConfig, RpqJob, Scheduler, WtJob};
//!
//! let instance = Instance::WeightedTardiness(WtJob::from_triples([(3u32, 2, 4), (2, 1, 2)]));
//! let solution = Scheduler::Exact.schedule(&instance).expect("valid instance");
//! assert_eq!(solution.ids, vec![2, 1]);
//! assert_eq!(solution.value, 2);
//!
//! let instance = Instance::Makespan(RpqJob::from_triples([(0u32, 2, 5), (1, 1, 1)]));
//! let scheduler = Scheduler::MultiStart(MultiStartConfig::default());
//! let solution = scheduler.schedule(&instance).expect("valid instance");
//! assert_eq!(solution.value, 7);
//! ```
use std::fmt::Debug;
use std::hash::Hash;

use num_traits::{AsPrimitive, PrimInt};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub mod error;
pub mod job;
pub mod local_search;
pub mod multi_start;
pub mod objective;
pub mod scheduler;
pub mod sp_rq;
pub mod sp_wt;
pub mod stats;

pub use error::{Error, Result};
pub use job::{Job, RpqJob, WtJob};
pub use local_search::LocalSearchConfig;
pub use multi_start::MultiStartConfig;
pub use objective::Objective;
pub use scheduler::{Instance, Scheduler, Solution};
pub use sp_rq::{Priority, Weights};
pub use stats::Stats;

/// Integral time (and weight) values of jobs.
///
/// Any primitive integer type qualifies. Signed types are accepted, but negative job attributes
/// are rejected when an instance is validated.
pub trait Time: PrimInt + Hash + Debug + AsPrimitive<f64> {}

impl<T> Time for T where T: PrimInt + Hash + Debug + AsPrimitive<f64> {}

/// Processing order of jobs and its objective value
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Schedule<T> {
    /// `order[k]` is the index (into the input jobs) of the `k`-th job to process
    pub order: Vec<usize>,
    /// objective value of processing jobs in `order`
    pub value: T,
}

impl<T> Schedule<T> {
    /// Translate job indices of this schedule into the jobs' external ids.
    ///
    /// # Panics
    /// Panics if `order` holds an index out of range of `jobs`. Schedules returned by the solvers
    /// of this crate always index their own input; hand-built ones can be checked first with
    /// [`objective::check_permutation`].
    ///
    /// ## Example
    /// ```
    /// # extern crate jobseq;
    /// use jobseq::{RpqJob, Schedule};
    ///
    /// let jobs = vec![RpqJob::new(7, 0u8, 1, 0), RpqJob::new(3, 0, 1, 0)];
    /// let schedule = Schedule { order: vec![1, 0], value: 2 };
    /// assert_eq!(schedule.ids(&jobs), vec![3, 7]);
    /// ```
    pub fn ids<J: Job>(&self, jobs: &[J]) -> Vec<usize> {
        self.order.iter().map(|&j| jobs[j].id()).collect()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
