//! # Exact search for `1||ΣwT`
//! Total weighted tardiness on a single machine is minimized by a recursive search over states
//! `(mask, time)` where `mask` is the set of already scheduled jobs and `time` is the completion
//! time of the last of them.
//!
//! The optimal continuation of a state does not depend on the order in which the jobs in `mask`
//! were scheduled, so each state is solved once and memoized. There are at most `2^n` masks and
//! each expansion tries every unscheduled job, hence `O(2^n * n)` worst-case time. Keep `n`
//! small: there is no timeout.
//!
//! Among optimal orders, the lexicographically smallest sequence of job indices is returned
//! (see [`lex_less`]), which makes the result deterministic.
//!
//! Continuations whose cost does not fit the time type are dropped while branching; only when
//! no order of the jobs has a representable cost is [`Error::Overflow`] reported.
use std::collections::HashMap;
use std::time::Instant;

use fixedbitset::FixedBitSet;

use crate::job::validate_jobs;
use crate::{Error, Result, Schedule, Stats, Time, WtJob};

/// Find an optimal order of `jobs` minimizing total weighted tardiness.
///
/// ## Example
/// ```
/// # extern crate jobseq;
/// use jobseq::{sp_wt, WtJob};
///
/// // jobs as (p, w, d)
/// let jobs = WtJob::from_triples([(3u32, 2, 4), (2, 1, 2)]);
///
/// let (schedule, stats) = sp_wt::exact(&jobs).expect("valid jobs");
///
/// assert_eq!(schedule.ids(&jobs), vec![2, 1]);
/// assert_eq!(schedule.value, 2);
/// assert!(stats.proved_optimal);
/// ```
pub fn exact<T: Time>(jobs: &[WtJob<T>]) -> Result<(Schedule<T>, Stats<T>)> {
    Witi::new(jobs)?.solve()
}

/// Lexicographic order on sequences of job indices.
///
/// `a < b` iff at the first position where the sequences differ `a` has the smaller index, or
/// `a` is a proper prefix of `b`. Used only to break ties between equally good continuations.
pub fn lex_less(a: &[usize], b: &[usize]) -> bool {
    for (x, y) in a.iter().zip(b) {
        if x != y {
            return x < y;
        }
    }
    a.len() < b.len()
}

/// Memo table key
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct State<T> {
    /// jobs scheduled so far
    mask: FixedBitSet,
    /// completion time of the scheduled jobs
    time: T,
}

/// Optimal continuation of a [State]
#[derive(Debug, Clone)]
struct Continuation<T> {
    /// weighted tardiness of the remaining jobs
    cost: T,
    /// remaining jobs in processing order
    order: Vec<usize>,
}

impl<T: Time> Continuation<T> {
    #[inline]
    fn terminal() -> Self {
        Self {
            cost: T::zero(),
            order: Vec::new(),
        }
    }

    /// True iff this continuation is strictly cheaper than `other`, or equally expensive and
    /// lexicographically smaller.
    #[inline]
    fn beats(&self, other: &Self) -> bool {
        self.cost < other.cost || (self.cost == other.cost && lex_less(&self.order, &other.order))
    }
}

/// Memoized exact solver of a single `1||ΣwT` instance.
///
/// The memo table is owned by the solver, so independent instances (and repeated runs) never
/// share state.
pub struct Witi<'a, T> {
    jobs: &'a [WtJob<T>],
    memo: HashMap<State<T>, Option<Continuation<T>>>,
    expanded: u64,
    cache_hits: u64,
}

impl<'a, T: Time> Witi<'a, T> {
    /// Create a solver for `jobs` after checking that they form a valid instance.
    pub fn new(jobs: &'a [WtJob<T>]) -> Result<Self> {
        validate_jobs(jobs)?;
        Ok(Self {
            jobs,
            memo: HashMap::new(),
            expanded: 0,
            cache_hits: 0,
        })
    }

    /// Run the search from the initial state `(∅, 0)`.
    pub fn solve(mut self) -> Result<(Schedule<T>, Stats<T>)> {
        let start = Instant::now();

        let mut mask = FixedBitSet::with_capacity(self.jobs.len());
        let Continuation { cost, order } =
            self.value(&mut mask, T::zero()).ok_or(Error::Overflow)?;

        let mut stats = Stats::new(cost, self.jobs.len());
        stats.expanded = self.expanded;
        stats.cache_hits = self.cache_hits;
        stats.proved_optimal = true;
        stats.elapsed = start.elapsed();

        Ok((Schedule { order, value: cost }, stats))
    }

    /// Optimal continuation from state `(mask, time)`, `None` if every continuation overflows.
    ///
    /// `mask` is used as scratch space while branching and is restored before returning.
    fn value(&mut self, mask: &mut FixedBitSet, time: T) -> Option<Continuation<T>> {
        let n = self.jobs.len();

        if mask.count_ones(..) == n {
            return Some(Continuation::terminal());
        }

        let state = State {
            mask: mask.clone(),
            time,
        };

        if let Some(hit) = self.memo.get(&state) {
            self.cache_hits += 1;
            return hit.clone();
        }

        self.expanded += 1;

        let mut best: Option<Continuation<T>> = None;

        for i in 0..n {
            if mask.contains(i) {
                continue;
            }

            let job = self.jobs[i];
            // never skips: `validate_jobs` bounds the total processing time
            let Some(c) = time.checked_add(&job.p) else {
                continue;
            };

            mask.insert(i);
            let rest = self.value(mask, c);
            mask.set(i, false);

            let Some(rest) = rest else {
                continue;
            };
            let Some(cost) = job.cost(c).and_then(|x| x.checked_add(&rest.cost)) else {
                continue;
            };

            let mut order = Vec::with_capacity(rest.order.len() + 1);
            order.push(i);
            order.extend(rest.order);

            let candidate = Continuation { cost, order };

            if best.as_ref().map_or(true, |b| candidate.beats(b)) {
                best = Some(candidate);
            }
        }

        self.memo.insert(state, best.clone());
        best
    }
}
