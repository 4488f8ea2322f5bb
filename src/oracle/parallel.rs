use crate::assignment::{Assignment, Truth};
use crate::oracle::{satisfiable_in, Oracle, OracleUnavailable, WorkerStats};
use crate::problem::Problem;
use std::ops::Range;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Fans the clause scan out across worker threads over fixed, contiguous
/// clause ranges. The partition is computed once at construction; each call
/// ships a snapshot of the assignment to fresh workers and joins every one of
/// them before reducing, so the caller sees an ordinary synchronous call.
pub struct ParallelOracle {
    problem: Arc<Problem>,
    ranges: Vec<Range<usize>>,
    busy_ns: AtomicU64,
    overhead_ns: AtomicU64,
}

impl ParallelOracle {
    /// `workers` must be at least 1. Counts above the clause count are
    /// clamped so every worker owns at least one clause.
    pub fn new(problem: Arc<Problem>, workers: usize) -> Self {
        assert!(workers >= 1, "need at least one worker");
        let ranges = partition(problem.num_clauses(), workers.min(problem.num_clauses()));
        Self {
            problem,
            ranges,
            busy_ns: AtomicU64::new(0),
            overhead_ns: AtomicU64::new(0),
        }
    }

    pub fn workers(&self) -> usize {
        self.ranges.len()
    }
}

// Equal shares of floor(K/W) clauses; the last range absorbs the remainder.
fn partition(num_clauses: usize, workers: usize) -> Vec<Range<usize>> {
    let share = num_clauses / workers;
    (0..workers)
        .map(|w| {
            let start = w * share;
            let end = if w + 1 == workers {
                num_clauses
            } else {
                start + share
            };
            start..end
        })
        .collect()
}

impl Oracle for ParallelOracle {
    fn evaluate(&self, assignment: &Assignment) -> Result<usize, OracleUnavailable> {
        let call_started = Instant::now();
        // One input snapshot per call, shared read-only by every worker and
        // released when the call returns.
        let snapshot: Arc<Vec<Truth>> = Arc::new(assignment.values().to_vec());

        let mut workers = Vec::with_capacity(self.ranges.len());
        for range in &self.ranges {
            let problem = Arc::clone(&self.problem);
            let snapshot = Arc::clone(&snapshot);
            let range = range.clone();
            let worker = thread::Builder::new()
                .name("validity-worker".into())
                .spawn(move || {
                    let started = Instant::now();
                    let count = satisfiable_in(&problem.clauses()[range], &snapshot);
                    (count, started.elapsed())
                })
                .map_err(|e| {
                    OracleUnavailable::new(format!("cannot launch validity worker: {}", e))
                })?;
            workers.push(worker);
        }

        let mut satisfiable = 0;
        let mut busy = Duration::from_nanos(0);
        let mut longest = Duration::from_nanos(0);
        for worker in workers {
            let (count, elapsed) = worker
                .join()
                .map_err(|_| OracleUnavailable::new("validity worker panicked"))?;
            satisfiable += count;
            busy += elapsed;
            longest = longest.max(elapsed);
        }

        self.busy_ns.fetch_add(busy.as_nanos() as u64, Ordering::Relaxed);
        let overhead = call_started.elapsed().saturating_sub(longest);
        self.overhead_ns
            .fetch_add(overhead.as_nanos() as u64, Ordering::Relaxed);

        Ok(satisfiable)
    }

    fn worker_stats(&self) -> Option<WorkerStats> {
        Some(WorkerStats {
            busy: Duration::from_nanos(self.busy_ns.load(Ordering::Relaxed)),
            overhead: Duration::from_nanos(self.overhead_ns.load(Ordering::Relaxed)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::SequentialOracle;
    use crate::problem::{Clause, Literal, Variable};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn random_problem(
        rng: &mut StdRng,
        num_variables: usize,
        num_clauses: usize,
        clause_width: usize,
    ) -> Arc<Problem> {
        let clauses = (0..num_clauses)
            .map(|_| {
                Clause::new(
                    (0..clause_width)
                        .map(|_| {
                            let x = Variable(rng.gen_range(0, num_variables));
                            if rng.gen::<bool>() {
                                Literal::Positive(x)
                            } else {
                                Literal::Negative(x)
                            }
                        })
                        .collect::<Vec<_>>(),
                )
            })
            .collect();
        Arc::new(Problem::new(num_variables, clause_width, clauses).unwrap())
    }

    fn random_assignment(rng: &mut StdRng, len: usize) -> Assignment {
        let values = (0..len)
            .map(|_| match rng.gen_range(0, 3) {
                0 => Truth::True,
                1 => Truth::False,
                _ => Truth::Undecided,
            })
            .collect();
        Assignment::from_values(values)
    }

    #[test]
    fn partition_is_contiguous_and_last_range_absorbs_remainder() {
        let ranges = partition(10, 4);
        assert_eq!(ranges, vec![0..2, 2..4, 4..6, 6..10]);

        let ranges = partition(9, 3);
        assert_eq!(ranges, vec![0..3, 3..6, 6..9]);

        let ranges = partition(5, 5);
        assert_eq!(ranges, vec![0..1, 1..2, 2..3, 3..4, 4..5]);
    }

    #[test]
    fn worker_count_clamps_to_clause_count() {
        let mut rng = StdRng::seed_from_u64(7);
        let problem = random_problem(&mut rng, 4, 3, 2);
        let oracle = ParallelOracle::new(Arc::clone(&problem), 64);
        assert_eq!(oracle.workers(), 3);
    }

    #[test]
    fn matches_sequential_for_every_worker_count() {
        let mut rng = StdRng::seed_from_u64(17);
        let problem = random_problem(&mut rng, 6, 11, 3);
        let sequential = SequentialOracle::new(Arc::clone(&problem));

        for workers in 1..=problem.num_clauses() {
            let parallel = ParallelOracle::new(Arc::clone(&problem), workers);
            for _ in 0..25 {
                let assignment = random_assignment(&mut rng, problem.num_variables());
                assert_eq!(
                    parallel.evaluate(&assignment).unwrap(),
                    sequential.evaluate(&assignment).unwrap(),
                    "worker count {}",
                    workers
                );
            }
        }
    }

    #[test]
    fn oversubscribed_matches_single_worker() {
        let mut rng = StdRng::seed_from_u64(23);
        let problem = random_problem(&mut rng, 5, 4, 2);
        let clamped = ParallelOracle::new(Arc::clone(&problem), 100);
        let single = ParallelOracle::new(Arc::clone(&problem), 1);

        for _ in 0..25 {
            let assignment = random_assignment(&mut rng, problem.num_variables());
            assert_eq!(
                clamped.evaluate(&assignment).unwrap(),
                single.evaluate(&assignment).unwrap()
            );
        }
    }

    #[test]
    fn accumulates_worker_stats() {
        let mut rng = StdRng::seed_from_u64(29);
        let problem = random_problem(&mut rng, 4, 6, 2);
        let oracle = ParallelOracle::new(Arc::clone(&problem), 2);
        assert_eq!(oracle.worker_stats(), Some(WorkerStats::default()));

        let assignment = random_assignment(&mut rng, problem.num_variables());
        oracle.evaluate(&assignment).unwrap();
        assert!(oracle.worker_stats().is_some());
    }
}
