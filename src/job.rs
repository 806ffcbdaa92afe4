//! # Job model
//! Jobs are plain immutable records. Each problem class has its own record type:
//!  - [`WtJob`] for `1||ΣwT` (processing time, weight, due date)
//!  - [`RpqJob`] for `1|r_j,q_j|C_max` (release, processing and delivery time)
//!
//! Both carry a stable external `id` (1-based, order of appearance in the input) and implement
//! the common [`Job`] trait.
use std::collections::HashSet;
use num_traits::{CheckedAdd, Zero};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Error, Result, Time};

/// Common view of a job processed non-preemptively on a single machine.
pub trait Job: Copy {
    type Time: Time;

    /// stable external identifier
    fn id(&self) -> usize;

    /// processing time
    fn p(&self) -> Self::Time;

    /// Check that all numeric attributes are non-negative.
    fn validate(&self) -> Result<()>;
}

/// Job of the weighted tardiness problem `1||ΣwT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WtJob<T> {
    pub id: usize,
    /// processing time
    pub p: T,
    /// weight of each time unit of tardiness
    pub w: T,
    /// due date
    pub d: T,
}

impl<T: Time> WtJob<T> {
    #[inline]
    pub fn new(id: usize, p: T, w: T, d: T) -> Self {
        Self { id, p, w, d }
    }

    /// Build jobs from `(p, w, d)` triples, numbering them `1..=n` in order of appearance.
    ///
    /// ## Example
    /// ```
    /// # extern crate jobseq;
    /// use jobseq::WtJob;
    ///
    /// let jobs = WtJob::from_triples([(3u32, 2, 4), (2, 1, 2)]);
    /// assert_eq!(jobs[1], WtJob::new(2, 2, 1, 2));
    /// ```
    pub fn from_triples<I>(triples: I) -> Vec<Self>
    where
        I: IntoIterator<Item = (T, T, T)>,
    {
        triples
            .into_iter()
            .enumerate()
            .map(|(i, (p, w, d))| Self::new(i + 1, p, w, d))
            .collect()
    }

    /// Weighted tardiness of this job if it completes at time `c`, `None` if it overflows `T`.
    #[inline]
    pub fn cost(&self, c: T) -> Option<T> {
        if c > self.d {
            self.w.checked_mul(&(c - self.d))
        } else {
            Some(T::zero())
        }
    }
}

impl<T: Time> Job for WtJob<T> {
    type Time = T;

    #[inline]
    fn id(&self) -> usize {
        self.id
    }

    #[inline]
    fn p(&self) -> T {
        self.p
    }

    fn validate(&self) -> Result<()> {
        non_negative(self.id, [("p", self.p), ("w", self.w), ("d", self.d)])
    }
}

/// Job of the makespan problem with release and delivery times `1|r_j,q_j|C_max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RpqJob<T> {
    pub id: usize,
    /// release time (earliest start)
    pub r: T,
    /// processing time
    pub p: T,
    /// delivery (cool-down) time after processing completes
    pub q: T,
}

impl<T: Time> RpqJob<T> {
    #[inline]
    pub fn new(id: usize, r: T, p: T, q: T) -> Self {
        Self { id, r, p, q }
    }

    /// Build jobs from `(r, p, q)` triples, numbering them `1..=n` in order of appearance.
    pub fn from_triples<I>(triples: I) -> Vec<Self>
    where
        I: IntoIterator<Item = (T, T, T)>,
    {
        triples
            .into_iter()
            .enumerate()
            .map(|(i, (r, p, q))| Self::new(i + 1, r, p, q))
            .collect()
    }
}

impl<T: Time> Job for RpqJob<T> {
    type Time = T;

    #[inline]
    fn id(&self) -> usize {
        self.id
    }

    #[inline]
    fn p(&self) -> T {
        self.p
    }

    fn validate(&self) -> Result<()> {
        non_negative(self.id, [("r", self.r), ("p", self.p), ("q", self.q)])
    }
}

#[inline]
fn non_negative<T: Time, const N: usize>(id: usize, attrs: [(&'static str, T); N]) -> Result<()> {
    match attrs.into_iter().find(|(_, x)| *x < T::zero()) {
        Some((attr, _)) => Err(Error::NegativeAttribute { id, attr }),
        None => Ok(()),
    }
}

/// Check every job's attributes and that job ids are unique within the set.
///
/// The total processing time must also fit the time type, since no schedule finishes earlier.
/// Beyond that, exact sums depend on the order and are checked when a schedule is evaluated.
pub fn validate_jobs<J: Job>(jobs: &[J]) -> Result<()> {
    let mut ids = HashSet::with_capacity(jobs.len());
    let mut total = J::Time::zero();
    for job in jobs {
        job.validate()?;
        if !ids.insert(job.id()) {
            return Err(Error::DuplicateJob { id: job.id() });
        }
        total = total.checked_add(&job.p()).ok_or(Error::Overflow)?;
    }
    Ok(())
}
