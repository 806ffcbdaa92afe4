//! # Multi-start heuristic for `1|r_j,q_j|C_max`
//! Each start builds a schedule with [`schrage`] under a different [`Priority`] rule and improves
//! it by [`local_search::improve`](crate::local_search::improve). The best schedule over all
//! starts is kept; among equally good ones the first found wins.
use std::time::Instant;

use crate::local_search::{improve, LocalSearchConfig};
use crate::objective::Makespan;
use crate::sp_rq::{schrage, Priority, Weights};
use crate::stats::{Moves, Start};
use crate::{Error, Result, RpqJob, Schedule, Stats, Time};

/// Configuration of the multi-start driver.
///
/// ## Example
/// ```
/// # extern crate jobseq;
/// use jobseq::{LocalSearchConfig, MultiStartConfig, Priority};
///
/// let config = MultiStartConfig::default()
///     .with_num_starts(2)
///     .with_local_search(LocalSearchConfig::default().with_max_iterations(200));
///
/// assert_eq!(config.starts().count(), 2);
/// assert_eq!(config.priorities.last(), Some(&Priority::Standard));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct MultiStartConfig {
    /// Menu of priority rules, tried in order.
    pub priorities: Vec<Priority>,
    /// Number of rules (a prefix of `priorities`) actually used.
    pub num_starts: usize,
    /// Local search applied after each construction.
    pub local_search: LocalSearchConfig,
}

impl Default for MultiStartConfig {
    /// Emphasize `q`, balanced, emphasize `r`, equal weights and Schrage's rule.
    fn default() -> Self {
        let priorities = vec![
            Priority::Weighted(Weights::EMPHASIZE_Q),
            Priority::Weighted(Weights::BALANCED),
            Priority::Weighted(Weights::EMPHASIZE_R),
            Priority::Weighted(Weights::EQUAL),
            Priority::Standard,
        ];
        Self {
            num_starts: priorities.len(),
            priorities,
            local_search: LocalSearchConfig::default(),
        }
    }
}

impl MultiStartConfig {
    /// Replaces the menu of priority rules and uses all of them.
    pub fn with_priorities(mut self, priorities: Vec<Priority>) -> Self {
        self.num_starts = priorities.len();
        self.priorities = priorities;
        self
    }

    /// Sets the number of starts (at most the size of the menu is used).
    pub fn with_num_starts(mut self, n: usize) -> Self {
        self.num_starts = n;
        self
    }

    /// Sets the local search configuration.
    pub fn with_local_search(mut self, config: LocalSearchConfig) -> Self {
        self.local_search = config;
        self
    }

    /// Priority rules that will be tried, in order.
    pub fn starts(&self) -> impl Iterator<Item = &Priority> {
        self.priorities.iter().take(self.num_starts)
    }
}

/// Run list scheduling followed by local search for every configured priority rule and return
/// the best schedule found.
///
/// The total work is `O(starts * local search)`. Any start failing (e.g. with
/// [`Error::Overflow`] when its clock passes `T::max_value()`) fails the whole run.
///
/// ## Example
/// ```
/// # extern crate jobseq;
/// use jobseq::multi_start::multi_start;
/// use jobseq::{MultiStartConfig, RpqJob};
///
/// let jobs = RpqJob::from_triples([(0u32, 10, 0), (1, 1, 20), (2, 3, 4)]);
///
/// let (schedule, stats) = multi_start(&jobs, &MultiStartConfig::default())
///     .expect("valid jobs");
///
/// assert_eq!(stats.starts.len(), 5);
/// assert!(stats.starts.iter().all(|s| schedule.value <= s.improved));
/// ```
pub fn multi_start<T: Time>(
    jobs: &[RpqJob<T>],
    config: &MultiStartConfig,
) -> Result<(Schedule<T>, Stats<T>)> {
    if config.starts().next().is_none() {
        return Err(Error::NoStarts);
    }

    // fail before doing any work
    for priority in config.starts() {
        if let Priority::Weighted(weights) = priority {
            weights.validate()?;
        }
    }

    let start = Instant::now();
    let objective = Makespan(jobs);

    let mut best: Option<(Schedule<T>, Stats<T>)> = None;
    let mut starts = Vec::with_capacity(config.starts().count());
    let mut iterations = 0;
    let mut moves = Moves::default();

    for &priority in config.starts() {
        let initial = schrage(jobs, priority)?;
        let (schedule, stats) = improve(&objective, &initial.order, &config.local_search)?;

        iterations += stats.iterations;
        moves += stats.moves;

        starts.push(Start {
            priority,
            constructed: initial.value,
            improved: schedule.value,
        });

        if best.as_ref().map_or(true, |(b, _)| schedule.value < b.value) {
            best = Some((schedule, stats));
        }
    }

    let (schedule, mut stats) = best.ok_or(Error::NoStarts)?;

    // history and convergence are those of the winning start, counters cover all starts
    stats.iterations = iterations;
    stats.moves = moves;
    stats.starts = starts;
    stats.elapsed = start.elapsed();

    Ok((schedule, stats))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objective::{check_permutation, Objective};
    use itertools::Itertools;
    use rand::prelude::*;
    use rand_pcg::Pcg64Mcg;

    fn random_rpq<R: Rng>(n: usize, rng: &mut R) -> Vec<RpqJob<u32>> {
        (1..=n)
            .map(|id| {
                RpqJob::new(
                    id,
                    rng.gen_range(0..60),
                    rng.gen_range(1..12),
                    rng.gen_range(0..40),
                )
            })
            .collect()
    }

    /// One start in isolation: construction followed by local search.
    fn single(jobs: &[RpqJob<u32>], priority: Priority, config: &MultiStartConfig) -> Schedule<u32> {
        let initial = schrage(jobs, priority).expect("valid jobs");
        let (schedule, _) =
            improve(&Makespan(jobs), &initial.order, &config.local_search).expect("valid order");
        schedule
    }

    #[test]
    fn two_jobs() {
        let jobs = RpqJob::from_triples([(0u32, 2, 5), (1, 1, 1)]);
        let (schedule, stats) = multi_start(&jobs, &MultiStartConfig::default()).expect("valid");

        assert_eq!(schedule.ids(&jobs), vec![1, 2]);
        assert_eq!(schedule.value, 7);
        assert_eq!(stats.value, 7);
        assert_eq!(stats.starts.len(), 5);
    }

    #[test]
    fn no_jobs() {
        let jobs: &[RpqJob<u8>] = &[];
        let (schedule, stats) = multi_start(jobs, &MultiStartConfig::default()).expect("valid");
        assert!(schedule.is_empty());
        assert_eq!(schedule.value, 0);
        assert!(stats.starts.iter().all(|s| s.improved == 0));
    }

    #[test]
    fn no_starts() {
        let jobs = RpqJob::from_triples([(0u32, 2, 5)]);

        let config = MultiStartConfig::default().with_num_starts(0);
        assert_eq!(multi_start(&jobs, &config), Err(Error::NoStarts));

        let config = MultiStartConfig::default().with_priorities(vec![]);
        assert_eq!(multi_start(&jobs, &config), Err(Error::NoStarts));
    }

    #[test]
    fn invalid_menu() {
        let jobs = RpqJob::from_triples([(0u32, 2, 5)]);
        let bad = Weights {
            w_r: 1.,
            w_p: -1.,
            w_q: 1.,
        };
        let config = MultiStartConfig::default()
            .with_priorities(vec![Priority::Standard, Priority::Weighted(bad)]);

        assert!(matches!(
            multi_start(&jobs, &config),
            Err(Error::InvalidWeights { .. })
        ));

        // the invalid rule is never reached
        let config = config.with_num_starts(1);
        assert!(multi_start(&jobs, &config).is_ok());
    }

    #[test]
    fn num_starts_takes_prefix() {
        let jobs = RpqJob::from_triples([(0u32, 10, 0), (1, 1, 20), (2, 3, 4)]);
        let config = MultiStartConfig::default().with_num_starts(2);
        let (_, stats) = multi_start(&jobs, &config).expect("valid");

        let used = stats.starts.iter().map(|s| s.priority).collect_vec();
        assert_eq!(
            used,
            vec![
                Priority::Weighted(Weights::EMPHASIZE_Q),
                Priority::Weighted(Weights::BALANCED)
            ]
        );

        // asking for more starts than the menu has uses the whole menu
        let config = MultiStartConfig::default().with_num_starts(100);
        let (_, stats) = multi_start(&jobs, &config).expect("valid");
        assert_eq!(stats.starts.len(), 5);
    }

    #[test]
    fn at_least_as_good_as_every_start() {
        let mut rng = Pcg64Mcg::seed_from_u64(11);
        let config = MultiStartConfig::default();

        for n in [1, 3, 8, 15, 25] {
            let jobs = random_rpq(n, &mut rng);
            let (schedule, stats) = multi_start(&jobs, &config).expect("valid");

            assert_eq!(check_permutation(&schedule.order, n), Ok(()));
            assert_eq!(Some(schedule.value), Makespan(&jobs).evaluate(&schedule.order));

            let runs = config
                .starts()
                .map(|&priority| single(&jobs, priority, &config))
                .collect_vec();

            for (run, start) in runs.iter().zip(&stats.starts) {
                assert!(schedule.value <= run.value);
                assert_eq!(start.improved, run.value);
                assert!(start.improved <= start.constructed);
            }

            // ties go to the first start reaching the best value
            let first = runs
                .iter()
                .find(|run| run.value == schedule.value)
                .expect("best value comes from some start");
            assert_eq!(&schedule, first);
        }
    }

    #[test]
    fn overflow() {
        // every start waits until 250 and then runs past 255
        let jobs = RpqJob::from_triples([(250u8, 10, 0), (0, 1, 0)]);
        assert_eq!(
            multi_start(&jobs, &MultiStartConfig::default()),
            Err(Error::Overflow)
        );

        // 250 + 5 still fits u8, delivering the short job first gives 250
        let jobs = RpqJob::from_triples([(0u8, 200, 0), (0, 50, 5)]);
        let (schedule, _) = multi_start(&jobs, &MultiStartConfig::default()).expect("valid");
        assert_eq!(schedule.order, vec![1, 0]);
        assert_eq!(schedule.value, 250);
    }
}
