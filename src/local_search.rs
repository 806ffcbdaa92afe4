//! # Local search over processing orders
//! First-improvement hill climbing with three neighborhoods, scanned in this order:
//!  1. **swap** the jobs at positions `i < j`
//!  1. **insert**: remove the job at position `i` and reinsert it at position `j != i`
//!  1. **reverse** the segment `[i, j]` for `j >= i + 2`
//!
//! The first strictly improving move is applied and the scan restarts with swaps. A later
//! neighborhood is only tried when all earlier ones failed to improve the current order. The
//! search stops in a local optimum (no neighbor is better) or after
//! [`max_iterations`](LocalSearchConfig::max_iterations) passes, whichever comes first.
//!
//! The objective value never increases, so the result is never worse than the input. Neighbors
//! whose value does not fit the time type are worse than the current order and are skipped; an
//! input order that already overflows is rejected with [`Error::Overflow`].
use std::time::Instant;

use crate::objective::{check_permutation, Objective};
use crate::{Error, Result, Schedule, Stats};

/// Configuration parameters for the local search.
///
/// ## Example
/// ```
/// # extern crate jobseq;
/// use jobseq::LocalSearchConfig;
///
/// let config = LocalSearchConfig::default().with_max_iterations(200);
/// assert_eq!(config.max_iterations, 200);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalSearchConfig {
    /// Maximum number of passes over the neighborhoods; each pass applies at most one move.
    pub max_iterations: usize,
}

impl Default for LocalSearchConfig {
    fn default() -> Self {
        Self {
            max_iterations: 100,
        }
    }
}

impl LocalSearchConfig {
    /// Sets the maximum number of passes.
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }
}

/// State of the neighborhood scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Swaps,
    Insertions,
    Reversals,
    /// a full pass found no improving move
    Converged,
}

impl Phase {
    /// Phase entered when the current one finds no improving move.
    #[inline]
    fn next(self) -> Self {
        match self {
            Self::Swaps => Self::Insertions,
            Self::Insertions => Self::Reversals,
            Self::Reversals | Self::Converged => Self::Converged,
        }
    }
}

/// Improve `order` (a permutation of job indices) with respect to `objective`.
///
/// Returns the improved schedule together with search [Stats]: passes executed, accepted moves
/// per neighborhood, the value after each accepted move and whether a local optimum was reached.
///
/// ## Example
/// ```
/// # extern crate jobseq;
/// use jobseq::local_search::improve;
/// use jobseq::objective::Makespan;
/// use jobseq::{LocalSearchConfig, RpqJob};
///
/// // starting the long job first keeps the urgent one waiting
/// let jobs = RpqJob::from_triples([(0u32, 10, 0), (1, 1, 20)]);
///
/// let (schedule, stats) = improve(&Makespan(&jobs), &[0, 1], &LocalSearchConfig::default())
///     .expect("valid order");
///
/// assert_eq!(schedule.order, vec![1, 0]);
/// assert_eq!(schedule.value, 22);
/// assert_eq!(stats.history, vec![31, 22]);
/// assert!(stats.converged);
/// ```
pub fn improve<O: Objective>(
    objective: &O,
    order: &[usize],
    config: &LocalSearchConfig,
) -> Result<(Schedule<O::Time>, Stats<O::Time>)> {
    objective.validate()?;
    check_permutation(order, objective.len())?;

    let start = Instant::now();

    let mut search = Search::new(objective, order.to_vec())?;

    let mut stats = Stats::new(search.value, order.len());
    stats.history.push(search.value);

    let mut phase = Phase::Swaps;

    while phase != Phase::Converged {
        // a pass starts with swaps
        if phase == Phase::Swaps {
            if stats.iterations == config.max_iterations {
                break;
            }
            stats.iterations += 1;
        }

        phase = if search.scan(phase) {
            match phase {
                Phase::Swaps => stats.moves.swaps += 1,
                Phase::Insertions => stats.moves.insertions += 1,
                Phase::Reversals => stats.moves.reversals += 1,
                Phase::Converged => {}
            }
            stats.history.push(search.value);
            Phase::Swaps
        } else {
            phase.next()
        };
    }

    stats.converged = phase == Phase::Converged;
    stats.value = search.value;
    stats.elapsed = start.elapsed();

    let schedule = Schedule {
        order: search.best,
        value: search.value,
    };

    Ok((schedule, stats))
}

/// Current order with its value and a scratch buffer for evaluating neighbors
struct Search<'o, O: Objective> {
    objective: &'o O,
    best: Vec<usize>,
    value: O::Time,
    candidate: Vec<usize>,
}

impl<'o, O: Objective> Search<'o, O> {
    fn new(objective: &'o O, order: Vec<usize>) -> Result<Self> {
        let value = objective.evaluate(&order).ok_or(Error::Overflow)?;
        let candidate = Vec::with_capacity(order.len());
        Ok(Self {
            objective,
            best: order,
            value,
            candidate,
        })
    }

    /// Scan the neighborhood of `phase` and commit the first strictly improving move.
    ///
    /// Returns `true` iff a move was committed.
    fn scan(&mut self, phase: Phase) -> bool {
        let n = self.best.len();

        match phase {
            Phase::Swaps => {
                for i in 0..n {
                    for j in (i + 1)..n {
                        if self.try_move(|t| t.swap(i, j)) {
                            return true;
                        }
                    }
                }
            }
            Phase::Insertions => {
                for i in 0..n {
                    for j in (0..n).filter(|&j| j != i) {
                        if self.try_move(|t| {
                            let job = t.remove(i);
                            t.insert(j, job);
                        }) {
                            return true;
                        }
                    }
                }
            }
            Phase::Reversals => {
                for i in 0..n {
                    for j in (i + 2)..n {
                        if self.try_move(|t| t[i..=j].reverse()) {
                            return true;
                        }
                    }
                }
            }
            Phase::Converged => {}
        }

        false
    }

    /// Apply `step` to a copy of the current order and keep it iff it is strictly better.
    #[inline]
    fn try_move<F>(&mut self, step: F) -> bool
    where
        F: FnOnce(&mut Vec<usize>),
    {
        self.candidate.clone_from(&self.best);
        step(&mut self.candidate);

        match self.objective.evaluate(&self.candidate) {
            Some(value) if value < self.value => {
                std::mem::swap(&mut self.best, &mut self.candidate);
                self.value = value;
                true
            }
            _ => false,
        }
    }
}
