//! # List scheduling for `1|r_j,q_j|C_max`
//! Each job `j` becomes available at its release time `r[j]`, occupies the machine for `p[j]`
//! and is finished `q[j]` time units after leaving the machine. The objective is the maximum
//! `C[j] + q[j]` over all jobs.
//!
//! [`schrage`] simulates the machine: whenever it becomes free, the highest priority job among
//! the released ones is started; if none has been released yet, the clock jumps to the next
//! release time. Priority is either
//!  - [`Priority::Standard`]: Schrage's rule, the longest delivery time `q[j]` first
//!  - [`Priority::Weighted`]: `w_q * q[j] - w_r * r[j] - w_p * p[j]` for non-negative
//!    [`Weights`]
//!
//! Ties are always broken in favour of the job that comes first in the input.
use std::cmp::Reverse;
use std::collections::BinaryHeap;

use itertools::Itertools;
use ordered_float::OrderedFloat;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::job::validate_jobs;
use crate::objective::{Makespan, Objective};
use crate::{Error, Result, RpqJob, Schedule, Time};

/// Coefficients of the weighted priority rule `w_q * q - w_r * r - w_p * p`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Weights {
    pub w_r: f64,
    pub w_p: f64,
    pub w_q: f64,
}

impl Weights {
    /// prefer long delivery times
    pub const EMPHASIZE_Q: Self = Self::raw(1.0, 0.5, 2.0);
    /// prefer long delivery times and short processing times
    pub const BALANCED: Self = Self::raw(0.5, 1.0, 2.0);
    /// prefer early release times
    pub const EMPHASIZE_R: Self = Self::raw(2.0, 0.5, 1.0);
    pub const EQUAL: Self = Self::raw(1.0, 1.0, 1.0);

    const fn raw(w_r: f64, w_p: f64, w_q: f64) -> Self {
        Self { w_r, w_p, w_q }
    }

    /// Create weights, rejecting negative or non-finite values.
    ///
    /// ## Example
    /// ```
    /// # extern crate jobseq;
    /// use jobseq::Weights;
    ///
    /// assert!(Weights::new(1.0, 0.5, 2.0).is_ok());
    /// assert!(Weights::new(-1.0, 0.5, 2.0).is_err());
    /// ```
    pub fn new(w_r: f64, w_p: f64, w_q: f64) -> Result<Self> {
        let weights = Self::raw(w_r, w_p, w_q);
        weights.validate()?;
        Ok(weights)
    }

    pub fn validate(&self) -> Result<()> {
        let valid = |w: f64| w.is_finite() && w >= 0.;
        if valid(self.w_r) && valid(self.w_p) && valid(self.w_q) {
            Ok(())
        } else {
            Err(Error::InvalidWeights {
                w_r: self.w_r,
                w_p: self.w_p,
                w_q: self.w_q,
            })
        }
    }

    /// Priority of `job` (higher is scheduled sooner).
    #[inline]
    pub fn priority<T: Time>(&self, job: &RpqJob<T>) -> OrderedFloat<f64> {
        OrderedFloat(self.w_q * job.q.as_() - self.w_r * job.r.as_() - self.w_p * job.p.as_())
    }
}

/// Rule selecting the next job among the released ones.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Priority {
    /// longest delivery time first (Schrage's rule)
    #[default]
    Standard,
    /// highest `w_q * q - w_r * r - w_p * p` first
    Weighted(Weights),
}

/// Build a schedule for `1|r_j,q_j|C_max` by list scheduling with the given `priority` rule.
///
/// Runs in `O(n*log(n))` worst-case time where `n` is the number of jobs.
///
/// ## Example
/// ```
/// # extern crate jobseq;
/// use jobseq::{sp_rq, Priority, RpqJob};
///
/// // jobs as (r, p, q)
/// let jobs = RpqJob::from_triples([(0u32, 2, 5), (1, 1, 1)]);
///
/// let schedule = sp_rq::schrage(&jobs, Priority::Standard).expect("valid jobs");
///
/// assert_eq!(schedule.ids(&jobs), vec![1, 2]);
/// assert_eq!(schedule.value, 7);
/// ```
pub fn schrage<T: Time>(jobs: &[RpqJob<T>], priority: Priority) -> Result<Schedule<T>> {
    validate_jobs(jobs)?;

    let order = match priority {
        Priority::Standard => list_schedule(jobs, |job| job.q)?,
        Priority::Weighted(weights) => {
            weights.validate()?;
            list_schedule(jobs, |job| weights.priority(job))?
        }
    };

    let value = Makespan(jobs).evaluate(&order).ok_or(Error::Overflow)?;

    Ok(Schedule { order, value })
}

/// Simulate the machine and return the order in which jobs are started.
///
/// The ready pool is local to each call. Fails if the machine clock passes `T::max_value()`.
fn list_schedule<T, K, F>(jobs: &[RpqJob<T>], priority: F) -> Result<Vec<usize>>
where
    T: Time,
    K: Ord,
    F: Fn(&RpqJob<T>) -> K,
{
    let n = jobs.len();

    // pending jobs in non-decreasing order of release times (stable => ties by input order)
    let pending = (0..n).sorted_by_key(|&j| jobs[j].r).collect_vec();
    let mut next = 0;

    // released jobs: max-heap on priority, then on lower input index
    let mut ready = BinaryHeap::with_capacity(n);

    let mut order = Vec::with_capacity(n);
    let mut t = T::zero();

    while order.len() < n {
        while next < n && jobs[pending[next]].r <= t {
            let j = pending[next];
            ready.push((priority(&jobs[j]), Reverse(j)));
            next += 1;
        }

        match ready.pop() {
            Some((_, Reverse(j))) => {
                order.push(j);
                t = t.checked_add(&jobs[j].p).ok_or(Error::Overflow)?;
            }
            // idle waiting: nothing released yet, so `pending[next]` must exist
            None => t = jobs[pending[next]].r,
        }
    }

    Ok(order)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objective::check_permutation;
    use rand::prelude::*;
    use rand_pcg::Pcg64Mcg;
    use rstest::*;

    const TEXTBOOK: [(u32, u32, u32); 7] = [
        (10, 5, 7),
        (13, 6, 26),
        (11, 7, 24),
        (20, 4, 21),
        (30, 3, 8),
        (0, 6, 17),
        (30, 2, 0),
    ];

    #[rstest]
    #[case::empty(&[], &[], 0)]
    #[case::two_jobs(&[(0, 2, 5), (1, 1, 1)], &[1, 2], 7)]
    #[case::idle_start(&[(5, 1, 1)], &[1], 7)]
    #[case::input_order_ties(&[(0, 1, 3), (0, 1, 3)], &[1, 2], 5)]
    #[case::release_ties(&[(2, 1, 1), (0, 1, 1), (2, 1, 1)], &[2, 1, 3], 5)]
    #[case::textbook(&TEXTBOOK, &[6, 1, 2, 3, 4, 5, 7], 53)]
    fn standard(#[case] rpq: &[(u32, u32, u32)], #[case] ids: &[usize], #[case] expected: u32) {
        let jobs = RpqJob::from_triples(rpq.iter().copied());
        let schedule = schrage(&jobs, Priority::Standard).expect("valid jobs");
        assert_eq!(schedule.ids(&jobs), ids);
        assert_eq!(schedule.value, expected);
    }

    #[test]
    fn weighted_q_only_is_standard() {
        let jobs = RpqJob::from_triples(TEXTBOOK);
        let weights = Weights::new(0., 0., 1.).expect("valid weights");

        let standard = schrage(&jobs, Priority::Standard).expect("valid jobs");
        let weighted = schrage(&jobs, Priority::Weighted(weights)).expect("valid jobs");

        assert_eq!(standard, weighted);
    }

    #[test]
    fn weighted_prefers_short_jobs() {
        // both released at 0; q favours the first job, q - p favours the second
        let jobs = RpqJob::from_triples([(0u32, 10, 5), (0, 1, 4)]);

        let schedule = schrage(&jobs, Priority::Standard).expect("valid jobs");
        assert_eq!(schedule.order, vec![0, 1]);
        assert_eq!(schedule.value, 15);

        let weights = Weights::new(0., 1., 1.).expect("valid weights");
        let schedule = schrage(&jobs, Priority::Weighted(weights)).expect("valid jobs");
        assert_eq!(schedule.order, vec![1, 0]);
        assert_eq!(schedule.value, 16);
    }

    #[rstest]
    #[case(-1., 0., 1.)]
    #[case(0., f64::NAN, 1.)]
    #[case(0., 0., f64::INFINITY)]
    fn invalid_weights(#[case] w_r: f64, #[case] w_p: f64, #[case] w_q: f64) {
        let jobs = RpqJob::from_triples([(0u32, 1, 1)]);
        let weights = Weights { w_r, w_p, w_q };

        assert!(Weights::new(w_r, w_p, w_q).is_err());
        assert!(matches!(
            schrage(&jobs, Priority::Weighted(weights)),
            Err(Error::InvalidWeights { .. })
        ));
    }

    #[test]
    fn invalid_jobs() {
        let jobs = [RpqJob::new(1, 0i64, 1, 1), RpqJob::new(2, -3, 1, 1)];
        assert_eq!(
            schrage(&jobs, Priority::Standard),
            Err(Error::NegativeAttribute { id: 2, attr: "r" })
        );
    }

    #[test]
    fn always_a_permutation() {
        let mut rng = Pcg64Mcg::seed_from_u64(7);
        let priorities = [
            Priority::Standard,
            Priority::Weighted(Weights::EMPHASIZE_Q),
            Priority::Weighted(Weights::BALANCED),
            Priority::Weighted(Weights::EMPHASIZE_R),
            Priority::Weighted(Weights::EQUAL),
        ];

        for n in 0..30 {
            let jobs = (1..=n)
                .map(|id| {
                    RpqJob::new(
                        id,
                        rng.gen_range(0..50u64),
                        rng.gen_range(1..10),
                        rng.gen_range(0..30),
                    )
                })
                .collect_vec();

            for priority in priorities {
                let schedule = schrage(&jobs, priority).expect("valid jobs");
                assert_eq!(check_permutation(&schedule.order, n), Ok(()));
                assert_eq!(Some(schedule.value), Makespan(&jobs).evaluate(&schedule.order));
            }
        }
    }

    #[rstest]
    // the clock passes 255 after waiting for a late release
    #[case::clock(&[(250, 10, 0)])]
    // the clock fits, a delivery time does not
    #[case::delivery(&[(0, 1, 0), (0, 250, 10)])]
    fn overflow(#[case] rpq: &[(u8, u8, u8)]) {
        let jobs = RpqJob::from_triples(rpq.iter().copied());
        assert_eq!(schrage(&jobs, Priority::Standard), Err(Error::Overflow));
        assert_eq!(
            schrage(&jobs, Priority::Weighted(Weights::EQUAL)),
            Err(Error::Overflow)
        );
    }

    #[test]
    fn fits_exactly() {
        let jobs = RpqJob::from_triples([(250u8, 5, 0), (0, 200, 0)]);
        let schedule = schrage(&jobs, Priority::Standard).expect("valid jobs");
        assert_eq!(schedule.order, vec![1, 0]);
        assert_eq!(schedule.value, 255);
    }
}
