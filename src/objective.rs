//! # Objective evaluation
//! Pure `O(n)` cost functions of a processing order on a single machine starting at time `0`:
//!  - total weighted tardiness `ΣwT = Σ w[j] * max(0, C[j] - d[j])`
//!  - makespan with delivery times `C_max = max_j (C[j] + q[j])` where each job starts no sooner
//!    than its release time `r[j]`
//!
//! The free functions [`weighted_tardiness`] and [`makespan`] take the schedule directly as a
//! sequence of jobs and validate it. The [`Objective`] implementations evaluate orders given as
//! job indices and are what the solvers use internally.
//!
//! All arithmetic is checked: a value that does not fit the time type is reported as
//! [`Error::Overflow`] (or `None` from [`Objective::evaluate`]) and never wraps around.
use std::cmp::max;

use fixedbitset::FixedBitSet;

use crate::job::validate_jobs;
use crate::{Error, Result, RpqJob, Time, WtJob};

/// Total weighted tardiness of jobs processed in the given order.
///
/// ## Example
/// ```
/// # extern crate jobseq;
/// use jobseq::{objective, WtJob};
///
/// let jobs = WtJob::from_triples([(3u32, 2, 4), (2, 1, 2)]);
///
/// // job 1 finishes at 3 (on time), job 2 at 5 (3 units late with weight 1)
/// assert_eq!(objective::weighted_tardiness(&jobs), Ok(3));
/// ```
pub fn weighted_tardiness<T: Time>(schedule: &[WtJob<T>]) -> Result<T> {
    validate_jobs(schedule)?;
    wt_value(schedule.iter()).ok_or(Error::Overflow)
}

/// Maximum completion time (including delivery times) of jobs processed in the given order.
///
/// ## Example
/// ```
/// # extern crate jobseq;
/// use jobseq::{objective, RpqJob};
///
/// let jobs = RpqJob::from_triples([(0u32, 2, 5), (1, 1, 1)]);
/// assert_eq!(objective::makespan(&jobs), Ok(7));
/// ```
pub fn makespan<T: Time>(schedule: &[RpqJob<T>]) -> Result<T> {
    validate_jobs(schedule)?;
    cmax(schedule.iter()).ok_or(Error::Overflow)
}

#[inline]
fn wt_value<'a, T, I>(schedule: I) -> Option<T>
where
    T: Time + 'a,
    I: IntoIterator<Item = &'a WtJob<T>>,
{
    let mut c = T::zero();
    let mut total = T::zero();
    for job in schedule {
        c = c.checked_add(&job.p)?;
        total = total.checked_add(&job.cost(c)?)?;
    }
    Some(total)
}

#[inline]
fn cmax<'a, T, I>(schedule: I) -> Option<T>
where
    T: Time + 'a,
    I: IntoIterator<Item = &'a RpqJob<T>>,
{
    let mut c = T::zero();
    let mut c_max = T::zero();
    for job in schedule {
        c = max(c, job.r).checked_add(&job.p)?;
        c_max = max(c_max, c.checked_add(&job.q)?);
    }
    Some(c_max)
}

/// Check that `order` contains each index `0..n` exactly once.
pub fn check_permutation(order: &[usize], n: usize) -> Result<()> {
    if order.len() != n {
        return Err(Error::NotAPermutation {
            n,
            reason: format!("expected {n} jobs, got {}", order.len()),
        });
    }

    let mut seen = FixedBitSet::with_capacity(n);
    for &j in order {
        if j >= n {
            return Err(Error::NotAPermutation {
                n,
                reason: format!("index {j} out of range"),
            });
        }
        if seen.put(j) {
            return Err(Error::NotAPermutation {
                n,
                reason: format!("index {j} repeated"),
            });
        }
    }

    Ok(())
}

/// Start times of a makespan schedule and its objective value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timeline<T> {
    /// the starting time `s[j]` of job `j` (indexed as the input jobs)
    pub s: Vec<T>,
    /// maximum completion time including delivery times
    pub c: T,
}

/// Simulate processing `jobs` in `order` and report when each job starts.
///
/// Each job starts as soon as the machine is free, but not before its release time, i.e.
/// `s[j] = max(C, r[j])` where `C` is the completion time of its predecessor.
///
/// ## Example
/// ```
/// # extern crate jobseq;
/// use jobseq::{objective, RpqJob};
///
/// let jobs = RpqJob::from_triples([(4u8, 1, 0), (1, 2, 0)]);
/// let timeline = objective::start_times(&jobs, &[1, 0]).expect("valid order");
///
/// assert_eq!(timeline, objective::Timeline { s: vec![4, 1], c: 5 });
/// ```
pub fn start_times<T: Time>(jobs: &[RpqJob<T>], order: &[usize]) -> Result<Timeline<T>> {
    validate_jobs(jobs)?;
    check_permutation(order, jobs.len())?;

    let mut c = T::zero();
    let mut c_max = T::zero();
    let mut s = vec![T::zero(); jobs.len()];

    for &j in order {
        let job = &jobs[j];
        s[j] = max(c, job.r);
        c = s[j].checked_add(&job.p).ok_or(Error::Overflow)?;
        c_max = max(c_max, c.checked_add(&job.q).ok_or(Error::Overflow)?);
    }

    Ok(Timeline { s, c: c_max })
}

/// Cost function over processing orders given as indices into a fixed job slice.
///
/// Implementations assume (and do not re-check) that every evaluated order is a permutation of
/// `0..len()`.
pub trait Objective {
    type Time: Time;

    /// human readable name of the criterion
    const NAME: &'static str;

    /// number of jobs in the instance
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check the underlying jobs (see [`validate_jobs`]).
    fn validate(&self) -> Result<()>;

    /// Objective value of processing jobs in `order`, `None` if it does not fit `Self::Time`.
    fn evaluate(&self, order: &[usize]) -> Option<Self::Time>;
}

/// `C_max` of an instance of `1|r_j,q_j|C_max`
#[derive(Debug, Clone, Copy)]
pub struct Makespan<'a, T>(pub &'a [RpqJob<T>]);

impl<'a, T: Time> Objective for Makespan<'a, T> {
    type Time = T;

    const NAME: &'static str = "makespan";

    #[inline]
    fn len(&self) -> usize {
        self.0.len()
    }

    fn validate(&self) -> Result<()> {
        validate_jobs(self.0)
    }

    #[inline]
    fn evaluate(&self, order: &[usize]) -> Option<T> {
        cmax(order.iter().map(|&j| &self.0[j]))
    }
}

/// `ΣwT` of an instance of `1||ΣwT`
#[derive(Debug, Clone, Copy)]
pub struct WeightedTardiness<'a, T>(pub &'a [WtJob<T>]);

impl<'a, T: Time> Objective for WeightedTardiness<'a, T> {
    type Time = T;

    const NAME: &'static str = "weighted tardiness";

    #[inline]
    fn len(&self) -> usize {
        self.0.len()
    }

    fn validate(&self) -> Result<()> {
        validate_jobs(self.0)
    }

    #[inline]
    fn evaluate(&self, order: &[usize]) -> Option<T> {
        wt_value(order.iter().map(|&j| &self.0[j]))
    }
}
